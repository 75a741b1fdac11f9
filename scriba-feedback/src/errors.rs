//! Error types for assignment analysis.

use scriba_nlp::{GraphError, ProcessError};
use thiserror::Error;

/// Errors raised while analysing a submission.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The text-processing pipeline or the scorer failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The grammar-check service could not be reached or answered badly.
    #[error("grammar check failed: {0}")]
    Grammar(String),

    /// A plagiarism checker reported a failure.
    #[error("plagiarism check failed: {0}")]
    Plagiarism(String),

    /// The analysis configuration could not be read or is inconsistent.
    #[error("invalid analysis configuration: {0}")]
    Config(String),
}

impl From<GraphError> for FeedbackError {
    fn from(err: GraphError) -> Self {
        FeedbackError::Config(err.to_string())
    }
}

/// Result type for feedback operations.
pub type FeedbackResult<T> = Result<T, FeedbackError>;
