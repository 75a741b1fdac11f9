//! Rule-based Penn Treebank part-of-speech tagger.
//!
//! Tags come from, in order: punctuation and numbers, clitics, the
//! closed-class lexicon, auxiliary and irregular verb tables, capitalisation,
//! known adjectives and verbs, and finally suffix rules. Ambiguous words are
//! resolved from the tag assigned to their left neighbour.

use serde::{Deserialize, Serialize};

use super::lexicon::{
    is_be_form, is_get_form, is_have_form, ED_NON_VERBS, ING_NOUNS, LEXICON, LY_NON_ADVERBS,
};
use super::text::is_punctuation;

/// A word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

pub fn is_noun_tag(tag: &str) -> bool {
    tag.starts_with("NN")
}

pub fn is_adjective_tag(tag: &str) -> bool {
    tag.starts_with("JJ")
}

pub fn is_adverb_tag(tag: &str) -> bool {
    matches!(tag, "RB" | "RBR" | "RBS")
}

/// Verbs of any form, and modals.
pub fn is_verb_tag(tag: &str) -> bool {
    tag.starts_with("VB") || tag == "MD"
}

/// Heads that can stand as an argument: nouns, pronouns, numbers and
/// existential "there".
pub fn is_nominal_tag(tag: &str) -> bool {
    is_noun_tag(tag) || matches!(tag, "PRP" | "CD" | "EX")
}

/// Part-of-speech tagger producing Penn Treebank tags.
#[derive(Debug, Clone, Default)]
pub struct PosTagger;

impl PosTagger {
    pub fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TaggedToken> {
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let word = token.as_ref();
            let next = tokens.get(i + 1).map(|t| t.as_ref().to_lowercase());
            let tag = self.tag_word(word, &tagged, next.as_deref());
            tagged.push(TaggedToken::new(word, tag));
        }
        tagged
    }

    fn tag_word(&self, word: &str, left: &[TaggedToken], next: Option<&str>) -> &'static str {
        let lower = word.to_lowercase();
        let prev = left.last();
        let prev_tag = prev.map_or("", |t| t.tag.as_str());
        let sentence_start = prev.map_or(true, |t| matches!(t.tag.as_str(), "." | "``" | ":"));

        if is_punctuation(word) {
            return punctuation_tag(word);
        }
        if is_number(&lower) {
            return "CD";
        }

        match lower.as_str() {
            "n't" => return "RB",
            "'s" => {
                let subject = matches!(prev_tag, "PRP" | "EX" | "WP" | "WDT");
                return if subject || is_demonstrative(prev) {
                    "VBZ"
                } else {
                    "POS"
                }
            }
            "'ll" | "'d" => return "MD",
            _ => {}
        }

        if let Some(&(tag, _)) = LEXICON.auxiliaries.get(lower.as_str()) {
            return tag;
        }

        if let Some(&tag) = LEXICON.closed_class.get(lower.as_str()) {
            return resolve_closed_class(&lower, tag, prev_tag, next);
        }

        if let Some(&(_, is_past, is_participle)) = LEXICON.irregular_forms.get(lower.as_str()) {
            return match (is_past, is_participle) {
                (true, true) if follows_auxiliary(left) || prev_tag == "DT" => "VBN",
                (true, _) => "VBD",
                _ => "VBN",
            };
        }

        let capitalised = word.chars().next().map_or(false, char::is_uppercase);
        if capitalised && !sentence_start {
            return "NNP";
        }

        if LEXICON.adjectives.contains(lower.as_str()) {
            return "JJ";
        }
        if let Some(tag) = comparative_tag(&lower) {
            return tag;
        }

        if LEXICON.verbs.contains(lower.as_str()) {
            return base_verb_tag(prev_tag, prev, sentence_start);
        }

        if let Some(stem) = third_person_stem(&lower) {
            if LEXICON.verbs.contains(stem.as_str()) {
                return if matches!(prev_tag, "DT" | "JJ" | "PRP$" | "IN" | "CD" | "POS") {
                    "NNS"
                } else if matches!(prev_tag, "NN" | "NNP" | "PRP" | "WDT" | "WP" | "RB") {
                    "VBZ"
                } else {
                    "NNS"
                };
            }
        }

        if capitalised && sentence_start && !is_common_shape(&lower) {
            return "NNP";
        }

        suffix_tag(&lower, prev_tag, left)
    }
}

fn punctuation_tag(word: &str) -> &'static str {
    match word {
        "." | "?" | "!" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "..." => ":",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "\"" | "``" => "``",
        "'" | "''" => "''",
        "$" => "$",
        "#" => "#",
        _ if word.chars().all(|c| c == '.') => ":",
        _ => "SYM",
    }
}

fn is_number(lower: &str) -> bool {
    const NUMBER_WORDS: &[&str] = &[
        "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
        "thousand", "million", "billion",
    ];
    let numeric = lower.chars().any(|c| c.is_ascii_digit())
        && lower
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '%' | '-' | '/'));
    numeric || NUMBER_WORDS.contains(&lower)
}

fn is_demonstrative(prev: Option<&TaggedToken>) -> bool {
    prev.map_or(false, |t| matches!(t.word.to_lowercase().as_str(), "that" | "this" | "what"))
}

fn resolve_closed_class(
    lower: &str,
    tag: &'static str,
    prev_tag: &str,
    next: Option<&str>,
) -> &'static str {
    let next_is_verbal = next.map_or(false, |n| {
        LEXICON.auxiliaries.contains_key(n)
            || LEXICON.closed_class.get(n) == Some(&"MD")
            || LEXICON.irregular_forms.contains_key(n)
            || n.ends_with("ed")
            || LEXICON.verbs.contains(n)
            || third_person_stem(n).map_or(false, |s| LEXICON.verbs.contains(s.as_str()))
    });

    match lower {
        // relative pronoun after a noun, complementizer after a verb
        "that" if is_noun_tag(prev_tag) && next_is_verbal => "WDT",
        "that" if prev_tag.starts_with("VB") => "IN",
        "her" => {
            let next_is_nominal = next.map_or(false, |n| {
                !is_punctuation(n)
                    && !LEXICON.closed_class.contains_key(n)
                    && !LEXICON.auxiliaries.contains_key(n)
            });
            if next_is_nominal {
                "PRP$"
            } else {
                "PRP"
            }
        }
        "there" if !next.map_or(false, is_be_form) => "RB",
        "one" if prev_tag == "DT" || is_adjective_tag(prev_tag) => "NN",
        _ => tag,
    }
}

fn follows_auxiliary(left: &[TaggedToken]) -> bool {
    left.iter()
        .rev()
        .find(|t| !t.tag.starts_with("RB"))
        .map_or(false, |t| is_be_form(&t.word) || is_have_form(&t.word) || is_get_form(&t.word))
}

fn base_verb_tag(prev_tag: &str, prev: Option<&TaggedToken>, sentence_start: bool) -> &'static str {
    if sentence_start {
        return "VB";
    }
    match prev_tag {
        "MD" | "TO" => "VB",
        "DT" | "PRP$" | "JJ" | "JJR" | "JJS" | "IN" | "POS" | "CD" => "NN",
        "NNS" | "NNPS" | "WDT" | "WP" => "VBP",
        "PRP" => {
            let third_person = prev.map_or(false, |t| {
                matches!(t.word.to_lowercase().as_str(), "he" | "she" | "it")
            });
            if third_person {
                "VBD"
            } else {
                "VBP"
            }
        }
        "RB" => "VB",
        "CC" => "VB",
        _ => "NN",
    }
}

fn third_person_stem(lower: &str) -> Option<String> {
    if lower.len() < 3
        || !lower.ends_with('s')
        || lower.ends_with("ss")
        || lower.ends_with("us")
        || lower.ends_with("is")
    {
        return None;
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return Some(format!("{}y", stem));
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if lower.ends_with(suffix) {
            return Some(lower[..lower.len() - 2].to_string());
        }
    }
    Some(lower[..lower.len() - 1].to_string())
}

fn comparative_tag(lower: &str) -> Option<&'static str> {
    if LEXICON.irregular_adjectives.contains_key(lower) {
        return Some(if lower.ends_with("st") { "JJS" } else { "JJR" });
    }
    let candidates = |stem: &str| {
        let undoubled = undouble(stem);
        [
            stem.to_string(),
            format!("{}e", stem),
            undoubled,
            format!("{}y", stem.trim_end_matches('i')),
        ]
    };
    if let Some(stem) = lower.strip_suffix("est") {
        if candidates(stem).iter().any(|c| LEXICON.adjectives.contains(c.as_str())) {
            return Some("JJS");
        }
    }
    if let Some(stem) = lower.strip_suffix("er") {
        if candidates(stem).iter().any(|c| LEXICON.adjectives.contains(c.as_str())) {
            return Some("JJR");
        }
    }
    None
}

/// "bigg" -> "big", "runn" -> "run"; anything else unchanged.
pub(crate) fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let last = bytes.last().copied().unwrap_or_default();
    if n >= 3 && last == bytes[n - 2] && !matches!(last, b'l' | b's' | b'z' | b'e' | b'o') {
        stem[..n - 1].to_string()
    } else {
        stem.to_string()
    }
}

/// Words whose shape says "common word" even when capitalised.
fn is_common_shape(lower: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        "ing", "ed", "ly", "ous", "ful", "able", "ible", "ive", "less", "ment", "ness", "tion",
        "sion", "ity", "ism", "ist", "ers", "ies",
    ];
    SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s))
}

fn suffix_tag(lower: &str, prev_tag: &str, left: &[TaggedToken]) -> &'static str {
    if lower.len() > 4 && lower.ends_with("ing") && !ING_NOUNS.contains(&lower) {
        return if matches!(prev_tag, "DT" | "PRP$" | "POS") { "NN" } else { "VBG" };
    }
    if lower.len() > 4 && lower.ends_with("ed") && !ED_NON_VERBS.contains(&lower) {
        return if follows_auxiliary(left) {
            "VBN"
        } else if matches!(prev_tag, "DT" | "PRP$" | "RB" | "JJ") {
            "JJ"
        } else if matches!(prev_tag, "IN" | "," | "WRB") || prev_tag.is_empty() {
            "VBN"
        } else {
            "VBD"
        };
    }
    if lower.len() > 4 && lower.ends_with("ly") && !LY_NON_ADVERBS.contains(&lower) {
        return "RB";
    }
    const ADJECTIVE_SUFFIXES: &[&str] =
        &["ous", "ful", "able", "ible", "ive", "ical", "less", "ish", "ic"];
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| lower.len() > s.len() + 2 && lower.ends_with(s))
    {
        return "JJ";
    }
    if lower.len() > 3
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    {
        return "NNS";
    }
    "NN"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<String> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        PosTagger
            .tag(&tokens)
            .into_iter()
            .map(|t| format!("{}/{}", t.word, t.tag))
            .collect()
    }

    #[test]
    fn tag_classes() {
        assert!(is_noun_tag("NNPS"));
        assert!(is_verb_tag("MD") && is_verb_tag("VBZ"));
        assert!(is_nominal_tag("PRP") && is_nominal_tag("CD") && !is_nominal_tag("PRP$"));
        assert!(is_adjective_tag("JJR") && !is_adjective_tag("RB"));
        assert!(is_adverb_tag("RBS") && !is_adverb_tag("RP"));
    }

    #[test]
    fn active_sentence() {
        assert_eq!(
            tags("John kicked the ball ."),
            vec!["John/NNP", "kicked/VBD", "the/DT", "ball/NN", "./."]
        );
    }

    #[test]
    fn passive_sentence() {
        assert_eq!(
            tags("The ball was kicked by John ."),
            vec!["The/DT", "ball/NN", "was/VBD", "kicked/VBN", "by/IN", "John/NNP", "./."]
        );
    }

    #[test]
    fn modal_negation_and_base_verb() {
        assert_eq!(
            tags("They did n't kick the red ball"),
            vec!["They/PRP", "did/VBD", "n't/RB", "kick/VB", "the/DT", "red/JJ", "ball/NN"]
        );
    }

    #[test]
    fn relative_that_and_irregular_participle() {
        assert_eq!(
            tags("the man that has taken the prize"),
            vec!["the/DT", "man/NN", "that/WDT", "has/VBZ", "taken/VBN", "the/DT", "prize/NN"]
        );
    }

    #[test]
    fn possessive_clitic_and_plural() {
        assert_eq!(
            tags("Mary 's students work hard"),
            vec!["Mary/NNP", "'s/POS", "students/NNS", "work/VBP", "hard/JJ"]
        );
    }
}
