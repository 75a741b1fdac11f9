//! Processing stages.
//!
//! Every stage reads at most one upstream artifact (named by the input key
//! the executor hands it, or the document's raw text when it runs as the
//! root) and produces exactly one artifact under its output key.

mod cleaning;
mod parsing;
mod tagging;
mod tokenizing;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::document::keys;
use crate::tools::Tools;
use crate::{Artifact, Document, ProcessError, ProcessResult};

pub use cleaning::{CitationRemover, TextCleaner};
pub use parsing::{Parser, PredicatePatternsMatcher};
pub use tagging::{Lemmatizer, PosTagger};
pub use tokenizing::{SentenceTokenizer, WordTokenizer};

/// Stable identifier of a stage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    TextCleaner,
    CitationRemover,
    SentenceTokenizer,
    Parser,
    PredicatePatternsMatcher,
    WordTokenizer,
    PosTagger,
    Lemmatizer,
}

impl StageKind {
    pub const ALL: [StageKind; 8] = [
        StageKind::TextCleaner,
        StageKind::CitationRemover,
        StageKind::SentenceTokenizer,
        StageKind::Parser,
        StageKind::PredicatePatternsMatcher,
        StageKind::WordTokenizer,
        StageKind::PosTagger,
        StageKind::Lemmatizer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::TextCleaner => "text_cleaner",
            StageKind::CitationRemover => "citation_remover",
            StageKind::SentenceTokenizer => "sentence_tokenizer",
            StageKind::Parser => "parser",
            StageKind::PredicatePatternsMatcher => "predicate_patterns_matcher",
            StageKind::WordTokenizer => "word_tokenizer",
            StageKind::PosTagger => "pos_tagger",
            StageKind::Lemmatizer => "lemmatizer",
        }
    }

    /// Artifact key the built-in stage of this kind writes.
    pub fn output_key(&self) -> &'static str {
        match self {
            StageKind::TextCleaner | StageKind::CitationRemover => keys::CLEANED_TEXT,
            StageKind::SentenceTokenizer => keys::SENTENCES,
            StageKind::Parser => keys::PARSE_DATA,
            StageKind::PredicatePatternsMatcher => keys::PREDICATE_PATTERNS,
            StageKind::WordTokenizer => keys::TOKENS,
            StageKind::PosTagger => keys::TAGGED_TOKENS,
            StageKind::Lemmatizer => keys::LEMMAS,
        }
    }

    /// The stage of this kind with its default configuration.
    pub fn default_stage(&self) -> Box<dyn Stage> {
        match self {
            StageKind::TextCleaner => Box::new(TextCleaner),
            StageKind::CitationRemover => Box::new(CitationRemover),
            StageKind::SentenceTokenizer => Box::new(SentenceTokenizer::default()),
            StageKind::Parser => Box::new(Parser),
            StageKind::PredicatePatternsMatcher => Box::new(PredicatePatternsMatcher::default()),
            StageKind::WordTokenizer => Box::new(WordTokenizer),
            StageKind::PosTagger => Box::new(PosTagger),
            StageKind::Lemmatizer => Box::new(Lemmatizer),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a stage sees while it runs.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    pub document: &'a Document,
    /// Output key of the stage that triggered this one; `None` for the root.
    pub input_key: Option<&'a str>,
    pub config: &'a RunConfig,
    pub tools: &'a Tools,
}

impl<'a> StageContext<'a> {
    /// The upstream text artifact, or the raw text for the root stage.
    pub fn input_text(&self) -> ProcessResult<&'a str> {
        match self.input_key {
            None => Ok(self.document.text()),
            Some(key) => self.document.text_artifact(key),
        }
    }

    /// The upstream artifact, looked up under `fallback` for the root stage.
    pub fn input_artifact(&self, fallback: &'a str) -> ProcessResult<(&'a str, &'a Artifact)> {
        let key = self.input_key.unwrap_or(fallback);
        match self.document.get(key) {
            Some(artifact) => Ok((key, artifact)),
            None => Err(ProcessError::MissingKey(key.to_string())),
        }
    }
}

/// A unit of processing in the graph.
pub trait Stage: fmt::Debug + Send + Sync {
    fn kind(&self) -> StageKind;

    fn output_key(&self) -> &'static str {
        self.kind().output_key()
    }

    /// Configuration attributes; part of the stage's identity and of its
    /// cache fingerprint.
    fn attrs(&self) -> serde_json::Value {
        serde_json::Value::Object(Default::default())
    }

    /// Serialized run parameters this stage reads, if any.
    fn params(&self, _config: &RunConfig) -> Option<String> {
        None
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact>;
}

impl PartialEq for dyn Stage {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.attrs() == other.attrs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_stable() {
        let names: Vec<&str> = StageKind::ALL.iter().map(StageKind::as_str).collect();
        insta::assert_debug_snapshot!(names, @r###"
        [
            "text_cleaner",
            "citation_remover",
            "sentence_tokenizer",
            "parser",
            "predicate_patterns_matcher",
            "word_tokenizer",
            "pos_tagger",
            "lemmatizer",
        ]
        "###);
    }

    #[test]
    fn stages_compare_by_configuration() {
        let a = StageKind::Parser.default_stage();
        let b = StageKind::Parser.default_stage();
        assert!(*a == *b);
        let c = StageKind::Lemmatizer.default_stage();
        assert!(*a != *c);
    }

    #[test]
    fn root_reads_raw_text() {
        let document = Document::new("raw");
        let config = RunConfig::default();
        let ctx = StageContext {
            document: &document,
            input_key: None,
            config: &config,
            tools: Tools::global(),
        };
        assert_eq!(ctx.input_text(), Ok("raw"));
        assert_eq!(
            ctx.input_artifact(keys::TOKENS).map(|(key, _)| key),
            Err(ProcessError::MissingKey("tokens".into()))
        );
    }
}
