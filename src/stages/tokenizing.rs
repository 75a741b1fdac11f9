use serde_json::json;

use super::{Stage, StageContext, StageKind};
use crate::{Artifact, ProcessError, ProcessResult};

/// Splits text into sentences.
#[derive(Debug, Clone, Default)]
pub struct SentenceTokenizer {
    /// Abbreviations recognised on top of the built-in list.
    abbreviations: Vec<String>,
}

impl SentenceTokenizer {
    pub fn with_abbreviations<S: Into<String>>(abbreviations: impl IntoIterator<Item = S>) -> Self {
        let mut abbreviations: Vec<String> = abbreviations.into_iter().map(Into::into).collect();
        abbreviations.sort();
        abbreviations.dedup();
        SentenceTokenizer { abbreviations }
    }
}

impl Stage for SentenceTokenizer {
    fn kind(&self) -> StageKind {
        StageKind::SentenceTokenizer
    }

    fn attrs(&self) -> serde_json::Value {
        json!({ "abbreviations": self.abbreviations })
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let text = ctx.input_text()?;
        let sentences = if self.abbreviations.is_empty() {
            ctx.tools.sentences.split(text)
        } else {
            let extra: Vec<&str> = self.abbreviations.iter().map(String::as_str).collect();
            ctx.tools.sentences.clone().with_custom_abbreviations(&extra).split(text)
        };
        Ok(Artifact::Sentences(sentences))
    }
}

/// Splits text, or already split sentences, into word tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Stage for WordTokenizer {
    fn kind(&self) -> StageKind {
        StageKind::WordTokenizer
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let words = &ctx.tools.words;
        let Some(key) = ctx.input_key else {
            return Ok(Artifact::Tokens(words.tokenize(ctx.document.text())));
        };
        match ctx.input_artifact(key)? {
            (_, Artifact::Text(text)) => Ok(Artifact::Tokens(words.tokenize(text))),
            (_, Artifact::Sentences(sentences)) => Ok(Artifact::Tokens(
                sentences.iter().flat_map(|s| words.tokenize(s)).collect(),
            )),
            (key, _) => Err(ProcessError::unexpected(key, "text or sentences")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::document::keys;
    use crate::tools::Tools;
    use crate::{Document, ProcessError};

    fn context<'a>(
        document: &'a Document,
        input_key: Option<&'a str>,
        config: &'a RunConfig,
    ) -> StageContext<'a> {
        StageContext {
            document,
            input_key,
            config,
            tools: Tools::global(),
        }
    }

    #[test]
    fn sentences_from_cleaned_text() {
        let mut document = Document::new("raw");
        document.put(keys::CLEANED_TEXT, Artifact::Text("One. Two here.".into()));
        let config = RunConfig::default();
        let out = SentenceTokenizer::default()
            .process(&context(&document, Some(keys::CLEANED_TEXT), &config));
        assert_eq!(out, Ok(Artifact::Sentences(vec!["One.".into(), "Two here.".into()])));
    }

    #[test]
    fn custom_abbreviations_change_identity() {
        let custom = SentenceTokenizer::with_abbreviations(["ca"]);
        assert_ne!(custom.attrs(), SentenceTokenizer::default().attrs());

        let document = Document::new("It is ca. Ten metres long.");
        let config = RunConfig::default();
        let out = custom.process(&context(&document, None, &config));
        assert_eq!(out, Ok(Artifact::Sentences(vec!["It is ca. Ten metres long.".into()])));
    }

    #[test]
    fn tokens_from_sentences() {
        let mut document = Document::new("raw");
        document.put(keys::SENTENCES, Artifact::Sentences(vec!["I can't.".into(), "Go!".into()]));
        let config = RunConfig::default();
        let out = WordTokenizer.process(&context(&document, Some(keys::SENTENCES), &config));
        assert_eq!(
            out,
            Ok(Artifact::Tokens(
                ["I", "ca", "n't", ".", "Go", "!"].iter().map(|s| s.to_string()).collect()
            ))
        );
    }

    #[test]
    fn missing_input() {
        let document = Document::new("raw");
        let config = RunConfig::default();
        let out = WordTokenizer.process(&context(&document, Some(keys::CLEANED_TEXT), &config));
        assert_eq!(out, Err(ProcessError::MissingKey("cleaned_text".into())));
    }
}
