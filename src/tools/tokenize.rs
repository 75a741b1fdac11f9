//! Sentence splitting and Treebank-style word tokenization.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences at terminal punctuation.
///
/// Line breaks are hard boundaries. A period after a known abbreviation or a
/// single-letter initial does not end a sentence.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: HashSet<String>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        let abbreviations = [
            "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "inc", "ltd", "corp", "co", "llc",
            "e.g", "i.e", "vs", "etc", "approx", "al", "fig", "figs", "no", "vol", "pp", "p",
            "ed", "eds", "st", "ave", "dept", "u.s", "u.k", "p.m", "a.m", "cf", "ch",
        ];
        Self {
            abbreviations: abbreviations.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl SentenceSplitter {
    pub fn with_custom_abbreviations(mut self, abbreviations: &[&str]) -> Self {
        for abbrev in abbreviations {
            self.abbreviations
                .insert(abbrev.trim_end_matches('.').to_lowercase());
        }
        self
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for line in text.lines() {
            self.split_line(line, &mut sentences);
        }
        sentences
    }

    fn split_line(&self, line: &str, sentences: &mut Vec<String>) {
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (_, c) = chars[i];
            if !matches!(c, '.' | '?' | '!') {
                i += 1;
                continue;
            }

            // absorb runs of terminal punctuation and closing quotes/brackets
            let mut end = i + 1;
            while end < chars.len()
                && matches!(chars[end].1, '.' | '?' | '!' | '"' | '\'' | ')' | ']')
            {
                end += 1;
            }

            let at_line_end = end == chars.len();
            let followed_by_space = !at_line_end && chars[end].1.is_whitespace();
            let next_starts_sentence = chars[end..]
                .iter()
                .map(|&(_, c)| c)
                .find(|c| !c.is_whitespace())
                .map_or(true, |c| {
                    c.is_uppercase() || c.is_numeric() || matches!(c, '"' | '\'' | '(')
                });

            let boundary = (at_line_end || (followed_by_space && next_starts_sentence))
                && !(c == '.' && self.ends_with_abbreviation(&chars[start..i]));

            if boundary {
                let byte_end = if at_line_end { line.len() } else { chars[end].0 };
                push_trimmed(&line[chars[start].0..byte_end], sentences);
                start = end;
            }
            i = end;
        }

        if start < chars.len() {
            push_trimmed(&line[chars[start].0..], sentences);
        }
    }

    fn ends_with_abbreviation(&self, before_period: &[(usize, char)]) -> bool {
        let word: String = before_period
            .iter()
            .rev()
            .map(|&(_, c)| c)
            .take_while(|c| !c.is_whitespace() && *c != '(')
            .collect::<Vec<char>>()
            .into_iter()
            .rev()
            .collect();
        let word = word.to_lowercase();
        if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
            return true;
        }
        self.abbreviations.contains(word.as_str())
    }
}

fn push_trimmed(sentence: &str, sentences: &mut Vec<String>) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Splits text into word and punctuation tokens.
///
/// Word boundaries follow UAX #29; on top of that clitics are split off the
/// way the Penn Treebank does it ("don't" -> "do", "n't"), hyphenated
/// compounds are kept whole and runs of dots or dashes become one token.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.replace('\u{2019}', "'");
        let segments: Vec<&str> = normalized.split_word_bounds().collect();

        let mut merged: Vec<String> = Vec::new();
        let mut previous_was_space = true;
        let mut i = 0;
        while i < segments.len() {
            let segment = segments[i];
            if segment.trim().is_empty() {
                previous_was_space = true;
                i += 1;
                continue;
            }

            let joinable_hyphen = segment == "-"
                && !previous_was_space
                && merged.last().map_or(false, |w| is_wordlike(w))
                && segments.get(i + 1).map_or(false, |next| is_wordlike(next));
            if joinable_hyphen {
                if let Some(last) = merged.last_mut() {
                    last.push('-');
                    last.push_str(segments[i + 1]);
                }
                i += 2;
                previous_was_space = false;
                continue;
            }

            let repeats_previous = !previous_was_space
                && matches!(segment, "." | "-")
                && merged.last().map_or(false, |w| w.chars().all(|c| c.to_string() == segment));
            if repeats_previous {
                if let Some(last) = merged.last_mut() {
                    last.push_str(segment);
                }
            } else {
                merged.push(segment.to_string());
            }
            previous_was_space = false;
            i += 1;
        }

        let mut tokens = Vec::with_capacity(merged.len());
        for word in merged {
            split_clitics(&word, &mut tokens);
        }
        tokens
    }
}

fn is_wordlike(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

fn split_clitics(word: &str, tokens: &mut Vec<String>) {
    let lower = word.to_lowercase();

    if lower == "cannot" {
        tokens.push(word[..3].to_string());
        tokens.push(word[3..].to_string());
        return;
    }

    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = word.len() - 3;
        tokens.push(word[..cut].to_string());
        tokens.push(word[cut..].to_string());
        return;
    }

    for clitic in CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let cut = word.len() - clitic.len();
            tokens.push(word[..cut].to_string());
            tokens.push(word[cut..].to_string());
            return;
        }
    }

    tokens.push(word.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_terminal_punctuation() {
        let splitter = SentenceSplitter::default();
        assert_eq!(
            splitter.split("John kicked the ball. Mary laughed! Did it hurt?"),
            vec!["John kicked the ball.", "Mary laughed!", "Did it hurt?"]
        );
    }

    #[test]
    fn abbreviations_and_initials_do_not_split() {
        let splitter = SentenceSplitter::default();
        assert_eq!(
            splitter.split("Dr. Smith met J. Jones, e.g. at work. They talked."),
            vec!["Dr. Smith met J. Jones, e.g. at work.", "They talked."]
        );
    }

    #[test]
    fn lowercase_continuation_is_not_a_boundary() {
        let splitter = SentenceSplitter::default();
        assert_eq!(
            splitter.split("The value is 3.5 units. it continues"),
            vec!["The value is 3.5 units. it continues"]
        );
    }

    #[test]
    fn line_breaks_are_boundaries() {
        let splitter = SentenceSplitter::default();
        assert_eq!(
            splitter.split("A heading\nThe body text."),
            vec!["A heading", "The body text."]
        );
    }

    #[test]
    fn word_tokens_follow_treebank_conventions() {
        let tokens =
            WordTokenizer.tokenize("John's dog doesn't bark... It's well-known, (mostly).");
        assert_eq!(
            tokens,
            vec![
                "John", "'s", "dog", "does", "n't", "bark", "...", "It", "'s", "well-known", ",",
                "(", "mostly", ")", "."
            ]
        );
    }

    #[test]
    fn cannot_is_two_tokens() {
        assert_eq!(WordTokenizer.tokenize("I cannot go"), vec!["I", "can", "not", "go"]);
    }
}
