//! Part-of-speech aware lemmatizer.
//!
//! Exception tables first, then suffix detachment checked against the known
//! verb and adjective inventories, then plain suffix heuristics.

use serde::{Deserialize, Serialize};

use super::lexicon::LEXICON;
use super::tagger::undouble;

/// The word classes the lemmatizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
}

impl Default for WordClass {
    fn default() -> Self {
        WordClass::Noun
    }
}

/// A word paired with its dictionary form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lemma {
    pub word: String,
    pub lemma: String,
}

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Reduce `word` to its base form for the given word class.
    ///
    /// Words no rule applies to come back unchanged, case included.
    pub fn lemmatize(&self, word: &str, class: WordClass) -> String {
        let lower = word.to_lowercase();
        let lemma = match class {
            WordClass::Verb => verb_lemma(&lower),
            WordClass::Noun => noun_lemma(&lower),
            WordClass::Adjective => adjective_lemma(&lower),
        };
        match lemma {
            Some(lemma) => lemma,
            None => word.to_string(),
        }
    }
}

fn verb_lemma(lower: &str) -> Option<String> {
    if let Some(&(_, base)) = LEXICON.auxiliaries.get(lower) {
        return Some(base.to_string());
    }
    if let Some(&(base, _, _)) = LEXICON.irregular_forms.get(lower) {
        return Some(base.to_string());
    }
    if LEXICON.verbs.contains(lower) {
        return Some(lower.to_string());
    }

    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ies").or_else(|| lower.strip_suffix("ied")) {
            return Some(format!("{}y", stem));
        }
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ing") {
            return Some(detach_verb_suffix(stem));
        }
    }
    if lower.len() > 3 {
        if let Some(stem) = lower.strip_suffix("ed") {
            return Some(detach_verb_suffix(stem));
        }
    }
    if lower.len() > 3 {
        if let Some(stem) = lower.strip_suffix("es") {
            let sibilant = ["ch", "sh", "ss", "x", "z", "o"].iter().any(|s| stem.ends_with(s));
            if LEXICON.verbs.contains(stem) || sibilant {
                return Some(stem.to_string());
            }
        }
        if let Some(stem) = lower.strip_suffix('s') {
            if !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') {
                return Some(stem.to_string());
            }
        }
    }
    None
}

fn detach_verb_suffix(stem: &str) -> String {
    let with_e = format!("{}e", stem);
    if LEXICON.verbs.contains(with_e.as_str()) {
        return with_e;
    }
    if LEXICON.verbs.contains(stem) {
        return stem.to_string();
    }
    let undoubled = undouble(stem);
    if undoubled != stem {
        return undoubled;
    }
    const TAKES_E: &[&str] = &["v", "iz", "yz", "uc", "rg", "dg", "ac"];
    if TAKES_E.iter().any(|s| stem.ends_with(s)) {
        return with_e;
    }
    stem.to_string()
}

fn noun_lemma(lower: &str) -> Option<String> {
    if let Some(&singular) = LEXICON.irregular_nouns.get(lower) {
        return Some(singular.to_string());
    }
    if lower.len() <= 3 || !lower.ends_with('s') {
        return None;
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return None;
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return Some(format!("{}y", stem));
        }
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if lower.ends_with(suffix) {
            return Some(lower[..lower.len() - 2].to_string());
        }
    }
    Some(lower[..lower.len() - 1].to_string())
}

fn adjective_lemma(lower: &str) -> Option<String> {
    if let Some(&base) = LEXICON.irregular_adjectives.get(lower) {
        return Some(base.to_string());
    }
    if LEXICON.adjectives.contains(lower) {
        return Some(lower.to_string());
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            let candidates = [
                stem.to_string(),
                format!("{}e", stem),
                undouble(stem),
                format!("{}y", stem.strip_suffix('i').unwrap_or(stem)),
            ];
            let known = candidates.iter().find(|c| LEXICON.adjectives.contains(c.as_str()));
            if let Some(found) = known {
                return Some(found.clone());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs() {
        let lemmatizer = Lemmatizer;
        let cases = [
            ("running", "run"),
            ("kicked", "kick"),
            ("was", "be"),
            ("taken", "take"),
            ("studies", "study"),
            ("making", "make"),
            ("stopped", "stop"),
            ("watches", "watch"),
            ("confirms", "confirm"),
            ("giving", "give"),
        ];
        for (word, lemma) in cases {
            assert_eq!(lemmatizer.lemmatize(word, WordClass::Verb), lemma, "{}", word);
        }
    }

    #[test]
    fn nouns() {
        let lemmatizer = Lemmatizer;
        let cases = [
            ("students", "student"),
            ("classes", "class"),
            ("children", "child"),
            ("theories", "theory"),
            ("analysis", "analysis"),
            ("bus", "bus"),
        ];
        for (word, lemma) in cases {
            assert_eq!(lemmatizer.lemmatize(word, WordClass::Noun), lemma, "{}", word);
        }
    }

    #[test]
    fn adjectives() {
        let lemmatizer = Lemmatizer;
        assert_eq!(lemmatizer.lemmatize("better", WordClass::Adjective), "good");
        assert_eq!(lemmatizer.lemmatize("bigger", WordClass::Adjective), "big");
        assert_eq!(lemmatizer.lemmatize("happiest", WordClass::Adjective), "happy");
        assert_eq!(lemmatizer.lemmatize("larger", WordClass::Adjective), "large");
    }

    #[test]
    fn unknown_words_keep_their_case() {
        assert_eq!(Lemmatizer.lemmatize("London", WordClass::Noun), "London");
    }
}
