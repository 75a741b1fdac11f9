use scriba_nlp::predicate::Token;
use scriba_nlp::{Argument, Predicate, PredicateKind, PredicateTuple, Relation};

fn token(text: &str) -> Token {
    Token {
        text: text.into(),
        tag: String::new(),
    }
}

/// A verbal tuple rooted at the last target word.
pub(crate) fn tuple(target: &[&str], args: &[(Relation, &str)]) -> PredicateTuple {
    let root = target.last().copied().unwrap_or_default();
    PredicateTuple {
        target: Predicate {
            root: token(root),
            tokens: target.iter().map(|t| token(t)).collect(),
            kind: PredicateKind::Verbal,
        },
        args: args
            .iter()
            .map(|(rel, text)| Argument {
                root: token(text),
                rel: *rel,
                tokens: vec![token(text)],
            })
            .collect(),
    }
}
