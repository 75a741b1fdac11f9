//! Error types for text processing.
//!
//! Every error aborts the current run; no partial [`Document`](crate::Document)
//! is ever handed back to the caller.

use thiserror::Error;

use crate::stages::StageKind;

/// Errors raised while running a processing graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// A stage's input artifact is absent from the document.
    ///
    /// Either the graph is misconfigured or a predecessor did not run.
    #[error("missing artifact `{0}` in document")]
    MissingKey(String),

    /// A stage that needs run-time configuration was reached without it.
    #[error("missing run configuration `{0}`")]
    MissingConfig(String),

    /// An artifact exists under the key but is not the expected kind.
    #[error("artifact `{key}` is not {expected}")]
    UnexpectedArtifact { key: String, expected: &'static str },

    /// The executor was asked to start from a stage the graph does not hold.
    #[error("stage `{0}` is not part of the processing graph")]
    UnknownRoot(StageKind),
}

impl ProcessError {
    pub(crate) fn unexpected(key: &str, expected: &'static str) -> Self {
        ProcessError::UnexpectedArtifact {
            key: key.to_string(),
            expected,
        }
    }
}

/// Errors raised while assembling a processing graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge mentions a stage that was never registered.
    #[error("edge references unregistered stage `{0}`")]
    UnknownStage(StageKind),

    /// Two stages would write the same artifact key.
    #[error("stages `{first}` and `{second}` both write `{key}`")]
    DuplicateOutputKey {
        key: String,
        first: StageKind,
        second: StageKind,
    },

    /// The graph is not acyclic.
    #[error("processing graph has a cycle through `{0}`")]
    Cycle(StageKind),
}

/// Result type for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;
