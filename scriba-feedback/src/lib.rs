//! Feedback on paraphrasing assignments.
//!
//! - [`AnalysisConfig`] says which checks run: citation removal, semantic
//!   similarity, plagiarism, grammar and academic style.
//! - [`AssignmentAnalysis`] processes a submission and its excerpt and
//!   collects the results in a [`FeedbackReport`].
//! - [`GrammarChecker`] and [`PlagiarismChecker`] are the seams to external
//!   services; [`LanguageToolClient`] talks to a LanguageTool server.
//!
//! ## Example
//!
//! ```ignore
//! use scriba_feedback::{AnalysisConfig, AssignmentAnalysis, Excerpt};
//!
//! let config = AnalysisConfig::load(Path::new("analysis.toml"))?;
//! let analysis = AssignmentAnalysis::new(config)?;
//! let excerpt = Excerpt::new("John kicked the ball.");
//! let report = analysis.analyse("The ball was kicked by John.", excerpt)?;
//! ```

mod analysis;
mod config;
mod errors;
mod grammar;
mod plagiarism;
mod style;

pub use analysis::{AssignmentAnalysis, Excerpt, FeedbackReport};
pub use config::{
    AnalysisConfig, CitationCheck, GrammarCheck, PlagiarismCheck, SemanticsCheck, StyleCheck,
};
pub use errors::{FeedbackError, FeedbackResult};
pub use grammar::{GrammarChecker, GrammarMatch, GrammarRule, LanguageToolClient, Replacement};
pub use plagiarism::PlagiarismChecker;
pub use style::{check_academic_style, StyleIssue, StyleIssueKind};
