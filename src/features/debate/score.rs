//! Quality score extraction from critic turns.
//!
//! The critic is instructed to score each draft from 1 to 10, but its reply
//! is free text. This module scans for the score; not finding one is a
//! normal outcome (writer turns, malformed critiques) and never an error.

use regex::Regex;
use std::sync::OnceLock;

/// Labeled score, e.g. "Score: 9", "score is 7", "SCORE - 8"
fn labeled_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bscore\b[^0-9]{0,12}(10|[1-9])\b").unwrap())
}

/// Fraction form, e.g. "9/10", "9 / 10"
fn fraction_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(10|[1-9])\s*/\s*10\b").unwrap())
}

/// A line consisting of nothing but a number
fn bare_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(10|[1-9])\s*$").unwrap())
}

/// Extract a 1-10 quality score from a turn's text, if one is present.
///
/// Patterns are tried from most to least explicit so prose numbers ("3
/// paragraphs") don't shadow an actual score elsewhere in the critique.
pub fn extract(text: &str) -> Option<u8> {
    for pattern in [labeled_pattern(), fraction_pattern(), bare_pattern()] {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(score) = caps[1].parse::<u8>() {
                if (1..=10).contains(&score) {
                    return Some(score);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_score() {
        assert_eq!(extract("Solid draft. Score: 9"), Some(9));
        assert_eq!(extract("the score is 7 out of ten"), Some(7));
        assert_eq!(extract("SCORE - 10"), Some(10));
    }

    #[test]
    fn test_fraction_score() {
        assert_eq!(extract("I'd give this 8/10."), Some(8));
        assert_eq!(extract("Rating: 9 / 10, nearly there"), Some(9));
    }

    #[test]
    fn test_bare_number_line() {
        assert_eq!(extract("Good structure.\n9\n"), Some(9));
        assert_eq!(extract("6"), Some(6));
    }

    #[test]
    fn test_labeled_wins_over_other_numbers() {
        // "3 paragraphs" must not be read as the score
        assert_eq!(
            extract("Trim it to 3 paragraphs. Score: 9/10"),
            Some(9)
        );
    }

    #[test]
    fn test_no_score_is_none() {
        assert_eq!(extract("This draft wanders and lacks a thesis."), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_out_of_range_not_a_score() {
        assert_eq!(extract("Score: 11"), None);
        assert_eq!(extract("Score: 0"), None);
        assert_eq!(extract("42/10 would read again"), None);
    }

    #[test]
    fn test_writer_prose_with_numbers() {
        assert_eq!(
            extract("In 1977, Star Wars changed cinema for 40 years."),
            None
        );
    }
}
