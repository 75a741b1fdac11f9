use std::sync::Arc;

use approx::assert_relative_eq;
use scriba_nlp::{Document, MemoryStore};

use crate::{
    AnalysisConfig, AssignmentAnalysis, Excerpt, FeedbackError, FeedbackReport, FeedbackResult,
    GrammarChecker, GrammarMatch, PlagiarismChecker, StyleIssue, StyleIssueKind,
};

struct FixedGrammar(Vec<GrammarMatch>);

impl GrammarChecker for FixedGrammar {
    fn check(&self, _text: &str) -> FeedbackResult<Vec<GrammarMatch>> {
        Ok(self.0.clone())
    }
}

struct OfflineGrammar;

impl GrammarChecker for OfflineGrammar {
    fn check(&self, _text: &str) -> FeedbackResult<Vec<GrammarMatch>> {
        Err(FeedbackError::Grammar("cannot reach http://localhost:8081".into()))
    }
}

struct FixedPlagiarism(f64);

impl PlagiarismChecker for FixedPlagiarism {
    fn run(&self, _submission: &Document, _excerpt: &Document) -> FeedbackResult<f64> {
        Ok(self.0)
    }
}

/// Defaults with the grammar service switched off.
fn offline_config() -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.grammar_check.enabled = false;
    config
}

fn spelling_match() -> GrammarMatch {
    GrammarMatch {
        message: "Possible spelling mistake found.".into(),
        short_message: "Spelling mistake".into(),
        offset: 16,
        length: 4,
        replacements: Vec::new(),
        rule: None,
    }
}

#[test]
fn citation_is_removed_before_scoring() {
    let mut config = offline_config();
    config.citation_check.authors = vec!["Jane Smith".into()];
    config.citation_check.year = Some("2010".into());
    let analysis = AssignmentAnalysis::new(config)
        .unwrap()
        .with_plagiarism_checker(FixedPlagiarism(0.25));

    let report = analysis
        .analyse(
            "The ball was kicked by John (Smith, 2010).",
            Excerpt::new("John kicked the ball."),
        )
        .unwrap();

    // tuples match exactly; a one-document corpus adds nothing
    assert_relative_eq!(report.semantics_score.unwrap(), 0.5);
    assert_eq!(report.plagiarism_score, Some(0.25));
    assert!(report.grammar_matches.is_empty());
    assert!(report.style_issues.is_empty());
}

#[test]
fn supporting_paraphrases_join_the_corpus() {
    let analysis = AssignmentAnalysis::new(offline_config()).unwrap();
    let excerpt = Excerpt::new("John kicked the ball.").with_supporting("Mary threw a stone.\n\n");

    let report = analysis.analyse("The ball was kicked by John.", excerpt).unwrap();

    // only "kicked" is weighted and shared with the excerpt
    let vector = 1.0 / 3f64.sqrt() / 2.0;
    assert_relative_eq!(report.semantics_score.unwrap(), (1.0 + vector) / 2.0, epsilon = 1e-12);
}

#[test]
fn grammar_and_style_findings_are_reported() {
    let mut config = AnalysisConfig::default();
    config.semantics_check.enabled = false;
    let analysis = AssignmentAnalysis::new(config)
        .unwrap()
        .with_grammar_checker(FixedGrammar(vec![spelling_match()]));

    let report = analysis
        .analyse("They didn't like the stuff.", Excerpt::new("John kicked the ball."))
        .unwrap();

    assert_eq!(report.semantics_score, None);
    // no plagiarism checker installed
    assert_eq!(report.plagiarism_score, None);
    assert_eq!(report.grammar_matches, vec![spelling_match()]);
    let issues: Vec<(StyleIssueKind, usize, &str)> = report
        .style_issues
        .iter()
        .map(|i| (i.kind, i.position, i.word.as_str()))
        .collect();
    assert_eq!(
        issues,
        vec![(StyleIssueKind::Contraction, 2, "n't"), (StyleIssueKind::Informal, 5, "stuff")]
    );
}

#[test]
fn grammar_failure_aborts_the_analysis() {
    let analysis = AssignmentAnalysis::new(AnalysisConfig::default())
        .unwrap()
        .with_grammar_checker(OfflineGrammar);

    let err = analysis
        .analyse("John kicked the ball.", Excerpt::new("John kicked the ball."))
        .unwrap_err();
    insta::assert_snapshot!(err, @"grammar check failed: cannot reach http://localhost:8081");
}

#[test]
fn disabled_checks_leave_an_empty_report() {
    let config = AnalysisConfig::from_toml(
        r#"
citation_check.enabled = false
semantics_check.enabled = false
plagiarism_check.enabled = false
grammar_check.enabled = false
academic_style_check.enabled = false
"#,
    )
    .unwrap();
    let analysis = AssignmentAnalysis::new(config)
        .unwrap()
        .with_plagiarism_checker(FixedPlagiarism(1.0));

    let report = analysis
        .analyse("They didn't kick it.", Excerpt::new("John kicked the ball."))
        .unwrap();
    assert_eq!(report, FeedbackReport::default());
}

#[test]
fn pipelines_share_the_cache() {
    let store = Arc::new(MemoryStore::new());
    let analysis = AssignmentAnalysis::new(offline_config())
        .unwrap()
        .with_store(store.clone());

    let first = analysis
        .analyse("The ball was kicked by John.", Excerpt::new("John kicked the ball."))
        .unwrap();
    let second = analysis
        .analyse("The ball was kicked by John.", Excerpt::new("John kicked the ball."))
        .unwrap();

    assert_eq!(first, second);
    // four stages per document, both documents served from the cache the
    // second time
    let stats = store.stats();
    assert_eq!((stats.misses, stats.hits), (8, 8));
}

#[test]
fn report_serializes_to_json() {
    let report = FeedbackReport {
        semantics_score: Some(0.5),
        plagiarism_score: None,
        grammar_matches: Vec::new(),
        style_issues: vec![StyleIssue {
            kind: StyleIssueKind::Contraction,
            position: 2,
            word: "n't".into(),
            suggestion: "not".into(),
        }],
    };
    insta::assert_snapshot!(serde_json::to_string_pretty(&report).unwrap(), @r###"
    {
      "semantics_score": 0.5,
      "plagiarism_score": null,
      "grammar_matches": [],
      "style_issues": [
        {
          "kind": "contraction",
          "position": 2,
          "word": "n't",
          "suggestion": "not"
        }
      ]
    }
    "###);
}
