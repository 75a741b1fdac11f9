//! Stage-graph text processing for paraphrase feedback.
//!
//! Raw text is turned into artifacts (cleaned text, sentences, tokens,
//! part-of-speech tags, lemmas, constituency parses and predicate-argument
//! tuples) by a DAG of processing stages:
//!
//! - [`GraphBuilder`] assembles and validates a [`ProcessingGraph`];
//!   [`default_graph`] and [`token_graph`] are the ready-made ones.
//! - [`TextProcessor`] runs a graph breadth-first from one root stage and
//!   returns the [`Document`] holding every artifact.
//! - [`Cache`] memoizes stage outputs in a [`CacheStore`] keyed by a
//!   fingerprint of the stage, its configuration and the input.
//! - [`Tools`] bundles the shared language tools.
//!
//! ## Example
//!
//! ```ignore
//! use scriba_nlp::{default_graph, RunConfig, StageKind, TextProcessor};
//!
//! let processor = TextProcessor::new(default_graph()?, StageKind::TextCleaner);
//! let doc = processor.run("John kicked the ball.", &RunConfig::default())?;
//! ```

mod cache;
mod config;
mod document;
mod errors;
mod graph;
mod pipeline;

pub mod predicate;
pub mod stages;
pub mod tools;

pub use cache::{Cache, CacheStats, CacheStore, Fingerprint, MemoryStore};
pub use config::{CitationConfig, RunConfig};
pub use document::{keys, Artifact, Document, ParseData};
pub use errors::{GraphError, ProcessError, ProcessResult};
pub use graph::{default_graph, token_graph, GraphBuilder, ProcessingGraph};
pub use pipeline::TextProcessor;
pub use predicate::{Argument, Predicate, PredicateKind, PredicateTuple, Relation};
pub use stages::{Stage, StageContext, StageKind};
pub use tools::Tools;
