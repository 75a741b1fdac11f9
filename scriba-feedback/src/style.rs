//! Academic-register checks over lemmatized text.

use serde::{Deserialize, Serialize};

use scriba_nlp::tools::Lemma;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleIssueKind {
    Contraction,
    Informal,
}

/// A word that does not suit academic writing, with a preferred form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleIssue {
    pub kind: StyleIssueKind,
    /// Index of the word in the lemma sequence.
    pub position: usize,
    pub word: String,
    pub suggestion: String,
}

// Clitics as the word tokenizer splits them off. Possessive 's is not listed.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("n't", "not"),
    ("'m", "am"),
    ("'re", "are"),
    ("'ve", "have"),
    ("'ll", "will"),
    ("'d", "would"),
];

const INFORMAL: &[(&str, &str)] = &[
    ("kid", "child"),
    ("stuff", "material"),
    ("guy", "person"),
    ("okay", "acceptable"),
    ("ok", "acceptable"),
    ("lot", "a great deal"),
    ("lots", "many"),
    ("really", "very"),
    ("pretty", "fairly"),
    ("totally", "completely"),
    ("huge", "considerable"),
    ("nowadays", "currently"),
    ("anyway", "nevertheless"),
];

fn lookup(table: &[(&str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(form, _)| form.eq_ignore_ascii_case(word))
        .map(|(_, suggestion)| *suggestion)
}

/// Flag contractions and informal vocabulary. Informal words are matched on
/// the lemma as well as the surface form, so "kids" is caught through "kid".
pub fn check_academic_style(lemmas: &[Lemma]) -> Vec<StyleIssue> {
    let mut issues = Vec::new();
    for (position, lemma) in lemmas.iter().enumerate() {
        let found = lookup(CONTRACTIONS, &lemma.word)
            .map(|s| (StyleIssueKind::Contraction, s))
            .or_else(|| {
                lookup(INFORMAL, &lemma.lemma)
                    .or_else(|| lookup(INFORMAL, &lemma.word))
                    .map(|s| (StyleIssueKind::Informal, s))
            });
        if let Some((kind, suggestion)) = found {
            issues.push(StyleIssue {
                kind,
                position,
                word: lemma.word.clone(),
                suggestion: suggestion.to_string(),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str, lemma: &str) -> Lemma {
        Lemma {
            word: word.into(),
            lemma: lemma.into(),
        }
    }

    #[test]
    fn flags_contractions_and_informal_words() {
        let lemmas = vec![
            lemma("The", "The"),
            lemma("kids", "kid"),
            lemma("did", "do"),
            lemma("n't", "n't"),
            lemma("like", "like"),
            lemma("Stuff", "Stuff"),
        ];
        let issues = check_academic_style(&lemmas);
        let summary: Vec<String> = issues
            .iter()
            .map(|i| format!("{:?} {} {} -> {}", i.kind, i.position, i.word, i.suggestion))
            .collect();
        insta::assert_snapshot!(summary.join("\n"), @r###"
        Informal 1 kids -> child
        Contraction 3 n't -> not
        Informal 5 Stuff -> material
        "###);
    }

    #[test]
    fn possessives_are_fine() {
        let lemmas = vec![lemma("Mary", "Mary"), lemma("'s", "'s"), lemma("results", "result")];
        assert!(check_academic_style(&lemmas).is_empty());
    }
}
