//! Running every enabled check over one submission.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use scriba_nlp::{default_graph, keys, CacheStore, Document, RunConfig, StageKind, TextProcessor};
use scriba_semantics::SemanticsChecker;

use crate::config::AnalysisConfig;
use crate::errors::FeedbackResult;
use crate::grammar::{GrammarChecker, GrammarMatch, LanguageToolClient};
use crate::plagiarism::PlagiarismChecker;
use crate::style::{check_academic_style, StyleIssue};

/// Outcome of all checks. Scores are `None` when their check did not run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub semantics_score: Option<f64>,
    pub plagiarism_score: Option<f64>,
    pub grammar_matches: Vec<GrammarMatch>,
    pub style_issues: Vec<StyleIssue>,
}

/// The reference material a submission is judged against.
#[derive(Debug, Clone, Copy)]
pub struct Excerpt<'a> {
    pub text: &'a str,
    /// Accepted paraphrases, one per line.
    pub supporting: Option<&'a str>,
}

impl<'a> Excerpt<'a> {
    pub fn new(text: &'a str) -> Self {
        Excerpt { text, supporting: None }
    }

    pub fn with_supporting(mut self, supporting: &'a str) -> Self {
        self.supporting = Some(supporting);
        self
    }
}

/// Processes submissions and excerpts with the default graph and runs the
/// checks an [`AnalysisConfig`] enables.
///
/// Submissions start from the citation remover when the citation check is
/// on; excerpts are always only cleaned.
pub struct AssignmentAnalysis {
    config: AnalysisConfig,
    submissions: TextProcessor,
    excerpts: TextProcessor,
    grammar: Option<Box<dyn GrammarChecker>>,
    plagiarism: Option<Box<dyn PlagiarismChecker>>,
}

impl std::fmt::Debug for AssignmentAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentAnalysis")
            .field("config", &self.config)
            .field("root", &self.submissions.root())
            .field("grammar", &self.grammar.is_some())
            .field("plagiarism", &self.plagiarism.is_some())
            .finish()
    }
}

impl AssignmentAnalysis {
    /// Build the pipelines. With the grammar check enabled a
    /// [`LanguageToolClient`] is created from the configuration; no
    /// plagiarism checker is installed.
    pub fn new(config: AnalysisConfig) -> FeedbackResult<Self> {
        let graph = Arc::new(default_graph()?);
        let submissions = TextProcessor::new(graph.clone(), config.root_stage());
        let excerpts = TextProcessor::new(graph, StageKind::TextCleaner)
            .with_store(submissions.store().clone());
        let grammar: Option<Box<dyn GrammarChecker>> = if config.grammar_check.enabled {
            Some(Box::new(LanguageToolClient::from_config(&config.grammar_check)?))
        } else {
            None
        };

        Ok(Self {
            config,
            submissions,
            excerpts,
            grammar,
            plagiarism: None,
        })
    }

    pub fn with_grammar_checker(mut self, checker: impl GrammarChecker + 'static) -> Self {
        self.grammar = Some(Box::new(checker));
        self
    }

    pub fn with_plagiarism_checker(mut self, checker: impl PlagiarismChecker + 'static) -> Self {
        self.plagiarism = Some(Box::new(checker));
        self
    }

    /// Share a cache store between both pipelines.
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.submissions = self.submissions.with_store(store.clone());
        self.excerpts = self.excerpts.with_store(store);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn process_submission(&self, text: &str) -> FeedbackResult<Document> {
        Ok(self.submissions.run(text, &self.config.run_config())?)
    }

    pub fn process_excerpt(&self, text: &str) -> FeedbackResult<Document> {
        Ok(self.excerpts.run(text, &RunConfig::default())?)
    }

    pub fn analyse(
        &self,
        submission: &str,
        excerpt: Excerpt<'_>,
    ) -> FeedbackResult<FeedbackReport> {
        let submission_doc = self.process_submission(submission)?;
        let excerpt_doc = self.process_excerpt(excerpt.text)?;
        let mut report = FeedbackReport::default();

        if self.config.semantics_check.enabled {
            let checker = SemanticsChecker::new(&submission_doc, &excerpt_doc, excerpt.supporting)
                .with_strategy(self.config.semantics_check.strategy);
            report.semantics_score = Some(checker.run()?);
        }

        if self.config.plagiarism_check.enabled {
            match &self.plagiarism {
                Some(checker) => {
                    report.plagiarism_score = Some(checker.run(&submission_doc, &excerpt_doc)?)
                }
                None => tracing::debug!("plagiarism check enabled without a checker"),
            }
        }

        if let Some(grammar) = self.grammar.as_ref().filter(|_| self.config.grammar_check.enabled) {
            report.grammar_matches = grammar.check(submission)?;
        }

        if self.config.academic_style_check.enabled {
            report.style_issues = check_academic_style(submission_doc.lemmas(keys::LEMMAS)?);
        }

        tracing::debug!(
            semantics = ?report.semantics_score,
            plagiarism = ?report.plagiarism_score,
            grammar = report.grammar_matches.len(),
            style = report.style_issues.len(),
            "submission analysed"
        );
        Ok(report)
    }
}
