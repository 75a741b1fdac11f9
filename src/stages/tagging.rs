use super::{Stage, StageContext, StageKind};
use crate::document::keys;
use crate::tools::{is_punctuation, Lemma, TaggedToken, Tools, WordClass};
use crate::{Artifact, ProcessError, ProcessResult};

/// Tags a token sequence with Penn Treebank part-of-speech tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosTagger;

impl Stage for PosTagger {
    fn kind(&self) -> StageKind {
        StageKind::PosTagger
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let (key, artifact) = ctx.input_artifact(keys::TOKENS)?;
        match artifact {
            Artifact::Tokens(tokens) => Ok(Artifact::TaggedTokens(ctx.tools.tagger.tag(tokens))),
            _ => Err(ProcessError::unexpected(key, "tokens")),
        }
    }
}

/// Lemmatizes tagged tokens, skipping pure punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

fn word_class(tag: &str) -> WordClass {
    match tag.chars().next() {
        Some('J') => WordClass::Adjective,
        Some('N') => WordClass::Noun,
        Some('V') => WordClass::Verb,
        _ => WordClass::default(),
    }
}

fn lemmatize<'t>(tools: &Tools, tagged: impl IntoIterator<Item = &'t TaggedToken>) -> Vec<Lemma> {
    tagged
        .into_iter()
        .filter(|token| !is_punctuation(&token.word))
        .map(|token| Lemma {
            word: token.word.clone(),
            lemma: tools.lemmatizer.lemmatize(&token.word, word_class(&token.tag)),
        })
        .collect()
}

impl Stage for Lemmatizer {
    fn kind(&self) -> StageKind {
        StageKind::Lemmatizer
    }

    fn process(&self, ctx: &StageContext<'_>) -> ProcessResult<Artifact> {
        let (key, artifact) = ctx.input_artifact(keys::TAGGED_TOKENS)?;
        let lemmas = match artifact {
            Artifact::TaggedTokens(tagged) => lemmatize(ctx.tools, tagged),
            Artifact::ParseData(data) => lemmatize(ctx.tools, data.tagged_tokens.iter().flatten()),
            _ => return Err(ProcessError::unexpected(key, "tagged tokens or parse data")),
        };
        Ok(Artifact::Lemmas(lemmas))
    }
}
