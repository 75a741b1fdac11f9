//! Text normalisation helpers shared by stages and scorers.

use once_cell::sync::Lazy;
use regex::Regex;

static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[ \t\u{a0}\u{2009}\u{202f}\u{0b}\u{0c}]+").unwrap());
static SPACE_BEFORE_CLOSING: Lazy<Regex> = Lazy::new(|| Regex::new(r" +([,.;:!?)\]}])").unwrap());
static SPACE_AFTER_OPENING: Lazy<Regex> = Lazy::new(|| Regex::new(r"([(\[{]) +").unwrap());

/// Normalise raw text.
///
/// Typographic quotes, dashes and ellipses become their ASCII forms,
/// horizontal whitespace collapses to one space, stray spaces around
/// brackets and before closing punctuation are removed and every line is
/// trimmed. Line structure is kept, but runs of blank lines shrink to one.
pub fn clean_text(text: &str) -> String {
    let normalized: String = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .map(|c| match c {
            '\u{201c}' | '\u{201d}' | '\u{201e}' | '\u{2033}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201a}' | '\u{2032}' => '\'',
            '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => '-',
            _ => c,
        })
        .collect::<String>()
        .replace('\u{2026}', "...");

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;
    for line in normalized.lines() {
        let line = HORIZONTAL_SPACE.replace_all(line, " ");
        let line = SPACE_BEFORE_CLOSING.replace_all(&line, "$1");
        let line = SPACE_AFTER_OPENING.replace_all(&line, "$1");
        let line = line.trim();

        if line.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(line.to_string());
            previous_blank = false;
        }
    }

    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// True when `word` is non-empty and consists only of punctuation or symbols.
pub fn is_punctuation(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_fixes_punctuation() {
        insta::assert_snapshot!(
            clean_text("  The   result ( see below )  confirms\tthis .  "),
            @"The result (see below) confirms this."
        );
    }

    #[test]
    fn normalises_typographic_characters() {
        insta::assert_snapshot!(
            clean_text("\u{201c}Don\u{2019}t\u{201d} \u{2014} he said\u{2026}"),
            @r#""Don't" - he said..."#
        );
    }

    #[test]
    fn keeps_lines_but_collapses_blank_runs() {
        assert_eq!(
            clean_text("\n\nFirst line.\n\n\n\n  Second   line.\n\n"),
            "First line.\n\nSecond line."
        );
    }

    #[test]
    fn punctuation_detection() {
        assert!(is_punctuation("."));
        assert!(is_punctuation("``"));
        assert!(is_punctuation("--"));
        assert!(!is_punctuation("n't"));
        assert!(!is_punctuation("2020"));
        assert!(!is_punctuation(""));
    }
}
