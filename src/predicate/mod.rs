//! Predicate-argument tuples.
//!
//! A tuple pairs a predicate (usually a verb group, but also copular
//! complements, possessors, appositives and adjectival modifiers) with the
//! arguments it governs, each labelled with its grammatical relation.

mod extract;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tools::TaggedToken;

pub use extract::{ExtractOptions, PredicateExtractor};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub tag: String,
}

impl From<&TaggedToken> for Token {
    fn from(token: &TaggedToken) -> Self {
        Token {
            text: token.word.clone(),
            tag: token.tag.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredicateKind {
    Verbal,
    Copular,
    Possessive,
    Appositive,
    Adjectival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Nsubj,
    Nsubjpass,
    Dobj,
    Nmod,
    Xcomp,
    Ccomp,
    Amod,
    Appos,
    Poss,
    /// The word a non-verbal predicate is about.
    Gov,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Nsubj => "nsubj",
            Relation::Nsubjpass => "nsubjpass",
            Relation::Dobj => "dobj",
            Relation::Nmod => "nmod",
            Relation::Xcomp => "xcomp",
            Relation::Ccomp => "ccomp",
            Relation::Amod => "amod",
            Relation::Appos => "appos",
            Relation::Poss => "poss",
            Relation::Gov => "gov",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub root: Token,
    /// Every token of the predicate: auxiliaries, negation, particles, root.
    pub tokens: Vec<Token>,
    pub kind: PredicateKind,
}

impl Predicate {
    pub fn is_negated(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| t.text.eq_ignore_ascii_case("not") || t.text.eq_ignore_ascii_case("n't"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    pub root: Token,
    pub rel: Relation,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateTuple {
    pub target: Predicate,
    pub args: Vec<Argument>,
}

impl fmt::Display for PredicateTuple {
    /// `was kicked(nsubjpass: ball, nmod: John)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.target.tokens.iter().map(|t| t.text.as_str()).collect();
        write!(f, "{}(", words.join(" "))?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", arg.rel.as_str(), arg.root.text)?;
        }
        f.write_str(")")
    }
}
