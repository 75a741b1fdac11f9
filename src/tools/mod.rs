//! Shared language tools: normalisation, tokenisation, tagging, parsing,
//! lemmatisation, stemming and synonyms.

mod lemmatizer;
mod lexicon;
mod parser;
mod stemmer;
mod tagger;
mod text;
mod thesaurus;
mod tokenize;

use once_cell::sync::Lazy;

pub use lemmatizer::{Lemma, Lemmatizer, WordClass};
pub use lexicon::{is_be_form, is_get_form, is_have_form, is_subordinator};
pub use parser::{ConstituencyParser, Label, ParseTree};
pub use stemmer::Stemmer;
pub use tagger::{
    is_adjective_tag, is_adverb_tag, is_nominal_tag, is_noun_tag, is_verb_tag, PosTagger,
    TaggedToken,
};
pub use text::{clean_text, is_punctuation};
pub use thesaurus::Thesaurus;
pub use tokenize::{SentenceSplitter, WordTokenizer};

/// Read-only bundle of every tool the stages and the scorer use.
#[derive(Debug, Default)]
pub struct Tools {
    pub stemmer: Stemmer,
    pub lemmatizer: Lemmatizer,
    pub sentences: SentenceSplitter,
    pub words: WordTokenizer,
    pub tagger: PosTagger,
    pub parser: ConstituencyParser,
    pub thesaurus: Thesaurus,
}

static TOOLS: Lazy<Tools> = Lazy::new(Tools::default);

impl Tools {
    /// The process-wide instance, built on first use.
    pub fn global() -> &'static Tools {
        &TOOLS
    }

    /// Stem both words and compare, falling back to the thesaurus.
    pub fn words_match(&self, a: &str, b: &str) -> bool {
        self.stemmer.stem(a) == self.stemmer.stem(b) || self.thesaurus.are_synonyms(a, b)
    }
}
