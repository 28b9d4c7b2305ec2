//! # Grammar Module
//!
//! `synth` turns word categories into CFG rule text; `cfg` reads that text back
//! and is what makes a malformed synthesis fail loudly.

pub mod cfg;
pub mod synth;

pub use cfg::{Grammar, GrammarError, Production, Symbol};
pub use synth::{synthesize, synthesize_from_sets, SynthesizedGrammar, DEFAULT_MAX_RULES};
