use serde_json::json;

use super::{Stage, StageContext, StageKind};
use crate::document::keys;
use crate::predicate::{ExtractOptions, PredicateExtractor};
use crate::{Artifact, ParseData, ProcessError, ProcessResult};

/// Tags and parses every sentence of its input.
///
/// Reads cleaned text (split into sentences here) or a sentences artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Stage for Parser {
    fn kind(&self) -> StageKind {
        StageKind::Parser
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let tools = ctx.tools;
        let sentences: Vec<String> = match ctx.input_key {
            None => tools.sentences.split(ctx.document.text()),
            Some(key) => match ctx.input_artifact(key)? {
                (_, Artifact::Text(text)) => tools.sentences.split(text),
                (_, Artifact::Sentences(sentences)) => sentences.clone(),
                (key, _) => return Err(ProcessError::unexpected(key, "text or sentences")),
            },
        };

        let mut data = ParseData {
            constituencies: Vec::with_capacity(sentences.len()),
            tagged_tokens: Vec::with_capacity(sentences.len()),
        };
        for sentence in &sentences {
            let tokens = tools.words.tokenize(sentence);
            if tokens.is_empty() {
                continue;
            }
            let tagged = tools.tagger.tag(&tokens);
            data.constituencies.push(tools.parser.parse(&tagged));
            data.tagged_tokens.push(tagged);
        }
        Ok(Artifact::ParseData(data))
    }
}

/// Extracts predicate-argument tuples from parse trees.
#[derive(Debug, Clone, Default)]
pub struct PredicatePatternsMatcher {
    extractor: PredicateExtractor,
}

impl PredicatePatternsMatcher {
    pub fn new(options: ExtractOptions) -> Self {
        PredicatePatternsMatcher {
            extractor: PredicateExtractor::new(options),
        }
    }
}

impl Stage for PredicatePatternsMatcher {
    fn kind(&self) -> StageKind {
        StageKind::PredicatePatternsMatcher
    }

    fn attrs(&self) -> serde_json::Value {
        let options = self.extractor.options();
        json!({
            "resolve_relcl": options.resolve_relcl,
            "resolve_appos": options.resolve_appos,
            "resolve_amod": options.resolve_amod,
            "resolve_conj": options.resolve_conj,
            "resolve_poss": options.resolve_poss,
        })
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let (key, artifact) = ctx.input_artifact(keys::PARSE_DATA)?;
        let Artifact::ParseData(data) = artifact else {
            return Err(ProcessError::unexpected(key, "parse data"));
        };
        let patterns = data
            .constituencies
            .iter()
            .flat_map(|tree| self.extractor.extract(tree))
            .collect();
        Ok(Artifact::PredicatePatterns(patterns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::tools::Tools;
    use crate::{Document, ProcessError};

    #[test]
    fn parses_each_sentence() {
        let mut document = Document::new("raw");
        document.put(keys::CLEANED_TEXT, Artifact::Text("John kicked the ball. It flew.".into()));
        let config = RunConfig::default();
        let ctx = StageContext {
            document: &document,
            input_key: Some(keys::CLEANED_TEXT),
            config: &config,
            tools: Tools::global(),
        };
        let Ok(Artifact::ParseData(data)) = Parser.process(&ctx) else {
            panic!("parser output is not parse data");
        };
        assert_eq!(data.constituencies.len(), 2);
        assert_eq!(data.tagged_tokens[1].len(), 3);
        insta::assert_snapshot!(
            data.constituencies[1].to_string(),
            @"(ROOT (S (NP (PRP It)) (VP (VBD flew)) (. .)))"
        );
    }

    #[test]
    fn matcher_reads_parse_data() {
        let mut document = Document::new("The ball was kicked by John.");
        let config = RunConfig::default();
        let parsed = Parser
            .process(&StageContext {
                document: &document,
                input_key: None,
                config: &config,
                tools: Tools::global(),
            })
            .unwrap();
        document.put(keys::PARSE_DATA, parsed);

        let ctx = StageContext {
            document: &document,
            input_key: Some(keys::PARSE_DATA),
            config: &config,
            tools: Tools::global(),
        };
        let output = PredicatePatternsMatcher::default().process(&ctx);
        let Ok(Artifact::PredicatePatterns(patterns)) = output else {
            panic!("matcher output is not predicate patterns");
        };
        let rendered: Vec<String> = patterns.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["was kicked(nsubjpass: ball, nmod: John)"]);
    }

    #[test]
    fn matcher_rejects_wrong_artifact() {
        let mut document = Document::new("raw");
        document.put(keys::PARSE_DATA, Artifact::Text("oops".into()));
        let config = RunConfig::default();
        let ctx = StageContext {
            document: &document,
            input_key: None,
            config: &config,
            tools: Tools::global(),
        };
        assert_eq!(
            PredicatePatternsMatcher::default().process(&ctx),
            Err(ProcessError::UnexpectedArtifact {
                key: "parse_data".into(),
                expected: "parse data"
            })
        );
    }
}
