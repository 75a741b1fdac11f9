//! Per-run artifact store.
//!
//! A [`Document`] holds the immutable raw text of one submission plus every
//! artifact the processing stages derived from it. It is built by
//! [`TextProcessor::run`](crate::TextProcessor::run) and lives only as long as
//! the caller keeps it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::predicate::PredicateTuple;
use crate::tools::{Lemma, ParseTree, TaggedToken};
use crate::{ProcessError, ProcessResult};

/// Well-known artifact keys written by the built-in stages.
pub mod keys {
    pub const CLEANED_TEXT: &str = "cleaned_text";
    pub const SENTENCES: &str = "sentences";
    pub const PARSE_DATA: &str = "parse_data";
    pub const PREDICATE_PATTERNS: &str = "predicate_patterns";
    pub const TOKENS: &str = "tokens";
    pub const TAGGED_TOKENS: &str = "tagged_tokens";
    pub const LEMMAS: &str = "lemmas";
}

/// Output of the parser stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseData {
    /// One constituency tree per sentence.
    pub constituencies: Vec<ParseTree>,
    /// Tagged tokens, grouped per sentence.
    pub tagged_tokens: Vec<Vec<TaggedToken>>,
}

/// A value produced by a processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Artifact {
    Text(String),
    Sentences(Vec<String>),
    ParseData(ParseData),
    PredicatePatterns(Vec<PredicateTuple>),
    Tokens(Vec<String>),
    TaggedTokens(Vec<TaggedToken>),
    Lemmas(Vec<Lemma>),
}

impl Artifact {
    /// Human readable name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Artifact::Text(_) => "text",
            Artifact::Sentences(_) => "sentences",
            Artifact::ParseData(_) => "parse data",
            Artifact::PredicatePatterns(_) => "predicate patterns",
            Artifact::Tokens(_) => "tokens",
            Artifact::TaggedTokens(_) => "tagged tokens",
            Artifact::Lemmas(_) => "lemmas",
        }
    }
}

/// Raw text plus the artifacts derived from it during one pipeline run.
pub struct Document {
    text: String,
    artifacts: HashMap<String, Artifact>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.artifacts.keys().collect();
        keys.sort();
        f.debug_struct("Document")
            .field("text_len", &self.text.len())
            .field("artifacts", &keys)
            .finish()
    }
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artifacts: HashMap::new(),
        }
    }

    /// The raw text this document was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get an artifact, or `None` if no stage wrote it.
    pub fn get(&self, key: &str) -> Option<&Artifact> {
        self.artifacts.get(key)
    }

    /// Store an artifact, replacing any previous value under `key`.
    pub fn put(&mut self, key: impl Into<String>, value: Artifact) {
        self.artifacts.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.artifacts.contains_key(key)
    }

    /// Keys currently present, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.artifacts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn require(&self, key: &str) -> ProcessResult<&Artifact> {
        self.get(key)
            .ok_or_else(|| ProcessError::MissingKey(key.to_string()))
    }

    pub fn text_artifact(&self, key: &str) -> ProcessResult<&str> {
        match self.require(key)? {
            Artifact::Text(text) => Ok(text),
            _ => Err(ProcessError::unexpected(key, "text")),
        }
    }

    pub fn sentences(&self, key: &str) -> ProcessResult<&[String]> {
        match self.require(key)? {
            Artifact::Sentences(sentences) => Ok(sentences),
            _ => Err(ProcessError::unexpected(key, "sentences")),
        }
    }

    pub fn parse_data(&self, key: &str) -> ProcessResult<&ParseData> {
        match self.require(key)? {
            Artifact::ParseData(data) => Ok(data),
            _ => Err(ProcessError::unexpected(key, "parse data")),
        }
    }

    pub fn predicate_patterns(&self, key: &str) -> ProcessResult<&[PredicateTuple]> {
        match self.require(key)? {
            Artifact::PredicatePatterns(patterns) => Ok(patterns),
            _ => Err(ProcessError::unexpected(key, "predicate patterns")),
        }
    }

    pub fn tokens(&self, key: &str) -> ProcessResult<&[String]> {
        match self.require(key)? {
            Artifact::Tokens(tokens) => Ok(tokens),
            _ => Err(ProcessError::unexpected(key, "tokens")),
        }
    }

    pub fn tagged_tokens(&self, key: &str) -> ProcessResult<&[TaggedToken]> {
        match self.require(key)? {
            Artifact::TaggedTokens(tagged) => Ok(tagged),
            _ => Err(ProcessError::unexpected(key, "tagged tokens")),
        }
    }

    pub fn lemmas(&self, key: &str) -> ProcessResult<&[Lemma]> {
        match self.require(key)? {
            Artifact::Lemmas(lemmas) => Ok(lemmas),
            _ => Err(ProcessError::unexpected(key, "lemmas")),
        }
    }
}
