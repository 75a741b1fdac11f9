//! Semantic similarity between a submission and a reference excerpt.
//!
//! Two measures are averaged:
//!
//! - predicate-argument tuples from both texts are paired
//!   ([`MatchingStrategy`]) and each pair is scored with
//!   [`tuple_similarity`];
//! - the submission is compared with the excerpt and any supporting
//!   paraphrases in a TF-IDF [`VectorSpace`].
//!
//! ## Example
//!
//! ```ignore
//! use scriba_nlp::{default_graph, RunConfig, StageKind, TextProcessor};
//! use scriba_semantics::SemanticsChecker;
//!
//! let processor = TextProcessor::new(default_graph()?, StageKind::TextCleaner);
//! let excerpt = processor.run("John kicked the ball.", &RunConfig::default())?;
//! let submission = processor.run("The ball was kicked by John.", &RunConfig::default())?;
//! let score = SemanticsChecker::new(&submission, &excerpt, None).run()?;
//! ```

mod checker;
mod matching;
mod similarity;
mod vector_space;

pub use checker::SemanticsChecker;
pub use matching::{mean_score, MatchingStrategy, TupleMatch};
pub use similarity::tuple_similarity;
pub use vector_space::VectorSpace;

#[cfg(test)]
mod fixtures;
