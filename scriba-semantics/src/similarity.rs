//! Similarity between two predicate-argument tuples.

use scriba_nlp::{Argument, PredicateTuple, Relation, Tools};

const TARGET_WEIGHT: f64 = 1.7;
const ARGUMENT_WEIGHT: f64 = 1.0;

/// Round to two decimals, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arguments in canonical order: a passive tuple with exactly two arguments
/// is read agent-first, so "the ball was kicked by John" lines up with
/// "John kicked the ball".
fn canonical_args(tuple: &PredicateTuple) -> Vec<&Argument> {
    let passive = tuple.args.len() == 2 && tuple.args[0].rel == Relation::Nsubjpass;
    if passive {
        tuple.args.iter().rev().collect()
    } else {
        tuple.args.iter().collect()
    }
}

/// Score in [0, 1] rounded to two decimals.
///
/// The targets contribute when their negation agrees and their stems match
/// or are synonyms. Arguments are paired by position; every position counts
/// towards the normalisation, matched or not.
pub fn tuple_similarity(tools: &Tools, a: &PredicateTuple, b: &PredicateTuple) -> f64 {
    let mut weight = 0.0;

    let same_polarity = a.target.is_negated() == b.target.is_negated();
    if same_polarity && tools.words_match(&a.target.root.text, &b.target.root.text) {
        weight += TARGET_WEIGHT;
    }

    let (left, right) = (canonical_args(a), canonical_args(b));
    let positions = left.len().max(right.len());
    for i in 0..positions {
        if let (Some(x), Some(y)) = (left.get(i), right.get(i)) {
            if tools.words_match(&x.root.text, &y.root.text) {
                weight += ARGUMENT_WEIGHT;
            }
        }
    }

    round2(weight / (TARGET_WEIGHT + positions as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::tuple;
    use approx::assert_relative_eq;

    #[test]
    fn identical_tuples_score_one() {
        let t = tuple(&["kicked"], &[(Relation::Nsubj, "John"), (Relation::Dobj, "ball")]);
        assert_relative_eq!(tuple_similarity(Tools::global(), &t, &t), 1.0);
    }

    #[test]
    fn passive_reads_like_active() {
        let active = tuple(&["kicked"], &[(Relation::Nsubj, "John"), (Relation::Dobj, "ball")]);
        let passive = tuple(
            &["was", "kicked"],
            &[(Relation::Nsubjpass, "ball"), (Relation::Nmod, "John")],
        );
        assert_relative_eq!(tuple_similarity(Tools::global(), &active, &passive), 1.0);
        // the input is not reordered
        assert_eq!(passive.args[0].rel, Relation::Nsubjpass);
    }

    #[test]
    fn negation_mismatch_drops_the_target() {
        let plain = tuple(&["kick"], &[(Relation::Nsubj, "They"), (Relation::Dobj, "ball")]);
        let negated = tuple(
            &["did", "n't", "kick"],
            &[(Relation::Nsubj, "They"), (Relation::Dobj, "ball")],
        );
        // 2 / 3.7
        assert_relative_eq!(tuple_similarity(Tools::global(), &plain, &negated), 0.54);
    }

    #[test]
    fn unmatched_positions_still_count() {
        let a = tuple(&["buys"], &[(Relation::Nsubj, "Mary")]);
        let b = tuple(&["purchases"], &[(Relation::Nsubj, "Mary"), (Relation::Dobj, "apples")]);
        // synonymous targets: (1.7 + 1) / 3.7
        assert_relative_eq!(tuple_similarity(Tools::global(), &a, &b), 0.73);
    }

    #[test]
    fn unrelated_tuples() {
        let a = tuple(&["sleeps"], &[(Relation::Nsubj, "cat")]);
        let b = tuple(&["flew"], &[(Relation::Nsubj, "bird")]);
        assert_relative_eq!(tuple_similarity(Tools::global(), &a, &b), 0.0);
    }
}
