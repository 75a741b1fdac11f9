//! A small synonym inventory used to relax word comparisons.
//!
//! Groups are compared on stems, so inflected forms of a listed word count as
//! members of its group.

use std::collections::{HashMap, HashSet};

use super::stemmer::Stemmer;

const SYNONYM_GROUPS: &[&[&str]] = &[
    &["big", "large", "huge", "great"],
    &["small", "little", "tiny"],
    &["begin", "start", "commence"],
    &["end", "finish", "conclude", "complete"],
    &["show", "demonstrate", "reveal", "indicate"],
    &["use", "employ", "utilise", "utilize"],
    &["help", "assist", "aid", "support"],
    &["buy", "purchase", "acquire"],
    &["get", "obtain", "receive", "gain"],
    &["make", "create", "produce", "build"],
    &["think", "believe", "consider"],
    &["say", "state", "claim", "argue"],
    &["study", "research", "investigation"],
    &["result", "outcome", "finding", "consequence"],
    &["problem", "issue", "difficulty"],
    &["important", "significant", "crucial", "essential"],
    &["increase", "rise", "grow"],
    &["decrease", "decline", "fall", "drop"],
    &["child", "kid"],
    &["student", "learner", "pupil"],
    &["teacher", "instructor", "tutor"],
    &["method", "approach", "technique"],
    &["quick", "fast", "rapid"],
    &["hard", "difficult"],
    &["answer", "response", "reply"],
];

#[derive(Debug)]
pub struct Thesaurus {
    stemmer: Stemmer,
    groups: HashMap<String, HashSet<usize>>,
}

impl Default for Thesaurus {
    fn default() -> Self {
        Thesaurus::new()
    }
}

impl Thesaurus {
    pub fn new() -> Self {
        let stemmer = Stemmer::english();
        let mut groups: HashMap<String, HashSet<usize>> = HashMap::new();
        for (index, group) in SYNONYM_GROUPS.iter().enumerate() {
            for word in group.iter() {
                groups.entry(stemmer.stem(word)).or_default().insert(index);
            }
        }
        Thesaurus { stemmer, groups }
    }

    /// Whether two words share a synonym group. Identical stems are always synonyms.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        let (a, b) = (self.stemmer.stem(a), self.stemmer.stem(b));
        if a == b {
            return true;
        }
        match (self.groups.get(&a), self.groups.get(&b)) {
            (Some(left), Some(right)) => !left.is_disjoint(right),
            _ => false,
        }
    }
}
