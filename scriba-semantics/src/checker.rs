use scriba_nlp::tools::clean_text;
use scriba_nlp::{keys, Document, ProcessResult, Tools};

use crate::matching::{mean_score, MatchingStrategy};
use crate::vector_space::VectorSpace;

/// Scores a submission against a reference excerpt.
///
/// Both documents must carry `predicate_patterns`. The score is the mean of
/// the tuple-matching score and the TF-IDF score, or zero when no tuple pair
/// could be formed at all.
#[derive(Debug)]
pub struct SemanticsChecker<'a> {
    submission: &'a Document,
    excerpt: &'a Document,
    supporting: Vec<String>,
    strategy: MatchingStrategy,
    tools: &'a Tools,
}

/// Cleaned, trimmed, non-blank lines of the supporting paraphrase text.
fn supporting_lines(text: &str) -> Vec<String> {
    clean_text(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl<'a> SemanticsChecker<'a> {
    pub fn new(submission: &'a Document, excerpt: &'a Document, supporting: Option<&str>) -> Self {
        Self {
            submission,
            excerpt,
            supporting: supporting.map(supporting_lines).unwrap_or_default(),
            strategy: MatchingStrategy::default(),
            tools: Tools::global(),
        }
    }

    pub fn with_strategy(mut self, strategy: MatchingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn supporting(&self) -> &[String] {
        &self.supporting
    }

    /// Mean score of matched predicate tuples, `None` if either side has no
    /// tuples.
    pub fn tuple_score(&self) -> ProcessResult<Option<f64>> {
        let submission = self.submission.predicate_patterns(keys::PREDICATE_PATTERNS)?;
        let excerpt = self.excerpt.predicate_patterns(keys::PREDICATE_PATTERNS)?;
        let matches = self.strategy.pair(self.tools, submission, excerpt);
        for m in &matches {
            tracing::trace!(
                submission = %submission[m.submission],
                excerpt = %excerpt[m.excerpt],
                score = m.score,
                "tuple pair"
            );
        }
        Ok(mean_score(&matches))
    }

    /// Mean cosine similarity of the submission against the excerpt and each
    /// supporting line.
    pub fn vector_score(&self) -> f64 {
        let corpus = std::iter::once(self.excerpt.text())
            .chain(self.supporting.iter().map(String::as_str));
        VectorSpace::new(corpus).mean_similarity(self.submission.text())
    }

    pub fn run(&self) -> ProcessResult<f64> {
        let Some(tuples) = self.tuple_score()? else {
            tracing::debug!(strategy = ?self.strategy, "no tuple pairs, scoring zero");
            return Ok(0.0);
        };
        let vector = self.vector_score();
        let score = (tuples + vector) / 2.0;
        tracing::debug!(
            strategy = ?self.strategy,
            tuples,
            vector,
            score,
            supporting = self.supporting.len(),
            "semantics scored"
        );
        Ok(score)
    }
}
