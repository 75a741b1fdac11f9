use scriba_nlp::Document;

use crate::errors::FeedbackResult;

/// An external plagiarism service.
///
/// Implementations receive both processed documents and return the share of
/// the submission judged to be copied, in [0, 1].
pub trait PlagiarismChecker: Send + Sync {
    fn run(&self, submission: &Document, excerpt: &Document) -> FeedbackResult<f64>;
}
