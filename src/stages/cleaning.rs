use regex::Regex;

use super::{Stage, StageContext, StageKind};
use crate::config::{CitationConfig, RunConfig};
use crate::tools::clean_text;
use crate::{Artifact, ProcessError, ProcessResult};

/// Normalises whitespace, quotes and dashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl Stage for TextCleaner {
    fn kind(&self) -> StageKind {
        StageKind::TextCleaner
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        Ok(Artifact::Text(clean_text(ctx.input_text()?)))
    }
}

/// Strips in-text citations of the excerpt's source, then cleans the text.
///
/// A citation is any parenthetical without nested brackets that mentions
/// one of the author surnames or the publication year.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationRemover;

impl Stage for CitationRemover {
    fn kind(&self) -> StageKind {
        StageKind::CitationRemover
    }

    fn params(&self, config: &RunConfig) -> Option<String> {
        config
            .citation_check
            .as_ref()
            .and_then(|citation| serde_json::to_string(citation).ok())
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let citation = ctx
            .config
            .citation_check
            .as_ref()
            .ok_or_else(|| ProcessError::MissingConfig("citation_check".to_string()))?;
        let text = ctx.input_text()?;
        Ok(Artifact::Text(clean_text(&remove_citations(text, citation))))
    }
}

fn citation_pattern(citation: &CitationConfig) -> Option<Regex> {
    let mut needles: Vec<String> = citation.surnames().into_iter().map(regex::escape).collect();
    if let Some(year) = citation.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
        needles.push(regex::escape(year));
    }
    if needles.is_empty() {
        return None;
    }
    let pattern = format!(r"\([^()]*?(?:{})[^()]*?\)", needles.join("|"));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(%err, "citation pattern rejected, keeping text as is");
            None
        }
    }
}

pub(crate) fn remove_citations(text: &str, citation: &CitationConfig) -> String {
    match citation_pattern(citation) {
        Some(pattern) => pattern.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tools;
    use crate::Document;

    fn run(stage: &dyn Stage, text: &str, config: &RunConfig) -> ProcessResult<Artifact> {
        let document = Document::new(text);
        stage.process(&StageContext {
            document: &document,
            input_key: None,
            config,
            tools: Tools::global(),
        })
    }

    #[test]
    fn removes_citation_and_cleans() {
        let config = RunConfig::default()
            .with_citation_check(CitationConfig::new(["John Smith"], Some("2020")));
        let out = run(&CitationRemover, "The result (Smith, 2020) confirms this.", &config);
        assert_eq!(out, Ok(Artifact::Text("The result confirms this.".into())));
    }

    #[test]
    fn keeps_unrelated_parentheticals() {
        let citation = CitationConfig::new(["John Smith"], Some("2020"));
        insta::assert_snapshot!(
            remove_citations(
                "Rates rose (see Table 2) as reported (Smith et al., 2020) and (2020).",
                &citation
            ),
            @"Rates rose (see Table 2) as reported  and ."
        );
    }

    #[test]
    fn year_alone_is_enough() {
        let citation = CitationConfig::new(Vec::<String>::new(), Some("1999"));
        assert_eq!(remove_citations("Known (cf. 1999) facts.", &citation), "Known  facts.");
    }

    #[test]
    fn nothing_to_match() {
        let citation = CitationConfig::default();
        assert_eq!(remove_citations("Keep (Smith, 2020).", &citation), "Keep (Smith, 2020).");
    }

    #[test]
    fn missing_configuration() {
        let out = run(&CitationRemover, "text", &RunConfig::default());
        assert_eq!(out, Err(ProcessError::MissingConfig("citation_check".into())));
    }

    #[test]
    fn cleaner_normalises() {
        let out = run(&TextCleaner, "  A \u{201c}quote\u{201d}  here .  ", &RunConfig::default());
        assert_eq!(out, Ok(Artifact::Text("A \"quote\" here.".into())));
    }

    #[test]
    fn params_follow_run_configuration() {
        assert_eq!(CitationRemover.params(&RunConfig::default()), None);
        let config = RunConfig::default().with_citation_check(CitationConfig::new(["A B"], None));
        assert_eq!(
            CitationRemover.params(&config).as_deref(),
            Some(r#"{"authors":["A B"],"year":null}"#)
        );
    }
}
