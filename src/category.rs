use std::collections::BTreeSet;

use serde::Serialize;

use crate::tagger::TaggedToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Determiner,
    Noun,
    Verb,
    Preposition,
    Pronoun,
}

/// Tag prefix → category, checked in order.
const TAG_PREFIXES: [(&str, Category); 5] = [
    ("DT", Category::Determiner),
    ("NN", Category::Noun),
    ("VB", Category::Verb),
    ("IN", Category::Preposition),
    ("PRP", Category::Pronoun),
];

impl Category {
    /// Maps a Penn Treebank style tag to a category by prefix. Tags with no
    /// matching prefix (adjectives, adverbs, numbers, ...) are unclassified.
    pub fn from_tag(tag: &str) -> Option<Category> {
        TAG_PREFIXES
            .iter()
            .find(|(prefix, _)| tag.starts_with(prefix))
            .map(|&(_, category)| category)
    }
}

/// Unique lowercase words per category, kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySets {
    pub determiners: BTreeSet<String>,
    pub nouns: BTreeSet<String>,
    pub verbs: BTreeSet<String>,
    pub prepositions: BTreeSet<String>,
    // Reported to clients, never used for grammar synthesis.
    pub pronouns: BTreeSet<String>,
}

impl CategorySets {
    pub fn from_tagged(tagged: &[TaggedToken]) -> Self {
        let mut sets = Self::default();
        for token in tagged {
            if let Some(category) = Category::from_tag(token.tag.as_str()) {
                sets.insert(category, &token.text);
            }
        }
        sets
    }

    pub fn insert(&mut self, category: Category, word: &str) {
        let word = word.to_lowercase();
        match category {
            Category::Determiner => self.determiners.insert(word),
            Category::Noun => self.nouns.insert(word),
            Category::Verb => self.verbs.insert(word),
            Category::Preposition => self.prepositions.insert(word),
            Category::Pronoun => self.pronouns.insert(word),
        };
    }
}
