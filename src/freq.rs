use std::collections::HashMap;

use serde::ser::{Serialize, Serializer};

pub const DEFAULT_TOP_N: usize = 20;

/// Token counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqDist {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FreqDist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dist = Self::new();
        for token in tokens {
            dist.add(token.as_ref());
        }
        dist
    }

    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent tokens, highest count first; equal counts keep
    /// first-seen order.
    pub fn most_common(&self, n: usize) -> MostCommon {
        let mut entries = self.counts.clone();
        // Stable sort keeps insertion order among ties.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        MostCommon(entries)
    }
}

/// Ordered `(token, count)` pairs; serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MostCommon(pub Vec<(String, usize)>);

impl MostCommon {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.0
    }
}

impl Serialize for MostCommon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(token, count)| (token, count)))
    }
}
