//! Post-processing of answer text.
//!
//! Both transformations are pure functions of the raw answer.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Swiss Federal Supreme Court reporter citation, e.g. `BGE 142 II 49`.
pub const CASE_LAW_PATTERN: &str = r"BGE \d{3} [IVX]+ \d+";

/// Statute article citation, e.g. `Art. 5 BV`.
pub const STATUTE_PATTERN: &str = r"Art\. \d+ [A-Z]+";

/// Numbered-list marker at the start of a line, e.g. `1. `.
pub const NUMBERING_PATTERN: &str = r"(?m)^\d+\.\s+";

static NUMBERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBERING_PATTERN).expect("numbering pattern is valid"));

// Single alternation so matches are found left to right without overlap.
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{CASE_LAW_PATTERN}|{STATUTE_PATTERN}"))
        .expect("citation patterns are valid")
});

/// Removes numbered-list markers from the start of every line.
///
/// Occurrences that are not at a line start are left untouched.
///
/// # Examples
///
/// ```
/// use lextrek::pipeline::text::strip_numbering;
///
/// assert_eq!(strip_numbering("1. First\n2. Second"), "First\nSecond");
/// assert_eq!(strip_numbering("See point 2. below"), "See point 2. below");
/// ```
#[must_use]
pub fn strip_numbering(answer: &str) -> String {
    NUMBERING_RE.replace_all(answer, "").into_owned()
}

/// Extracts citation tokens, deduplicated and sorted ascending.
///
/// # Examples
///
/// ```
/// use lextrek::pipeline::text::extract_citations;
///
/// let citations = extract_citations("BGE 142 II 49, Art. 5 BV and BGE 142 II 49 again");
/// assert_eq!(citations, vec!["Art. 5 BV", "BGE 142 II 49"]);
/// ```
#[must_use]
pub fn extract_citations(answer: &str) -> Vec<String> {
    CITATION_RE
        .find_iter(answer)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKED_EXAMPLE: &str = "1. See BGE 142 II 49 and Art. 5 BV. 2. Also BGE 142 II 49.";

    #[test]
    fn strip_numbering_removes_line_start_markers() {
        let raw = "1. Contracts need consent.\n2. Form is free.\n10.\tExceptions apply.";
        assert_eq!(
            strip_numbering(raw),
            "Contracts need consent.\nForm is free.\nExceptions apply."
        );
    }

    #[test]
    fn strip_numbering_leaves_mid_line_numbers() {
        assert_eq!(
            strip_numbering(WORKED_EXAMPLE),
            "See BGE 142 II 49 and Art. 5 BV. 2. Also BGE 142 II 49."
        );
    }

    #[test]
    fn strip_numbering_requires_whitespace_after_period() {
        assert_eq!(strip_numbering("3.5 percent"), "3.5 percent");
        assert_eq!(strip_numbering("1.Item"), "1.Item");
    }

    #[test]
    fn strip_numbering_does_not_touch_other_text() {
        let raw = "No numbering here.\n  - bullet\nArt. 5 BV";
        assert_eq!(strip_numbering(raw), raw);
    }

    #[test]
    fn strip_numbering_handles_crlf_lines() {
        assert_eq!(strip_numbering("1. One\r\n2. Two"), "One\r\nTwo");
    }

    #[test]
    fn extract_citations_worked_example() {
        assert_eq!(
            extract_citations(WORKED_EXAMPLE),
            vec!["Art. 5 BV", "BGE 142 II 49"]
        );
    }

    #[test]
    fn extract_citations_reads_numbered_text() {
        // Numbering does not hide citations that follow it
        let raw = "1. BGE 137 III 185 applies.\n2. Compare Art. 41 OR.";
        assert_eq!(
            extract_citations(raw),
            vec!["Art. 41 OR", "BGE 137 III 185"]
        );
    }

    #[test]
    fn extract_citations_is_idempotent() {
        let raw = "Art. 8 ZGB, BGE 140 V 22, Art. 8 ZGB, BGE 99 I 1, BGE 140 V 22";
        let first = extract_citations(raw);
        let second = extract_citations(raw);
        assert_eq!(first, second);
        assert_eq!(first, vec!["Art. 8 ZGB", "BGE 140 V 22"]);
    }

    #[test]
    fn extract_citations_requires_exact_format() {
        assert!(extract_citations("BGE 1420 II 49").is_empty());
        assert!(extract_citations("BGE 142 ii 49").is_empty());
        assert!(extract_citations("Art 5 BV").is_empty());
        assert!(extract_citations("Art. 5 bv").is_empty());
        assert!(extract_citations("").is_empty());
    }

    #[test]
    fn extract_citations_takes_longest_roman_numeral_and_letters() {
        assert_eq!(
            extract_citations("BGE 145 IV 154 and Art. 271a OR and Art. 12 SchKG"),
            vec!["Art. 12 S", "BGE 145 IV 154"]
        );
    }

    #[test]
    fn extract_citations_sorts_lexicographically() {
        let citations = extract_citations("BGE 150 I 1, Art. 9 BV, Art. 10 BV, BGE 120 I 1");
        assert_eq!(
            citations,
            vec!["Art. 10 BV", "Art. 9 BV", "BGE 120 I 1", "BGE 150 I 1"]
        );
    }

    #[test]
    fn extract_citations_matches_named_patterns() {
        let case_law = Regex::new(CASE_LAW_PATTERN).unwrap();
        let statute = Regex::new(STATUTE_PATTERN).unwrap();
        let raw = "1. BGE 142 II 49 and Art. 5 BV.\n2. Art. 41 OR, BGE 137 III 185, Art. 5 BV.";

        let expected: BTreeSet<&str> = case_law
            .find_iter(raw)
            .chain(statute.find_iter(raw))
            .map(|m| m.as_str())
            .collect();

        assert_eq!(extract_citations(raw), expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn numbering_pattern_is_multiline_anchored() {
        let numbering = Regex::new(NUMBERING_PATTERN).unwrap();
        assert_eq!(numbering.find_iter(WORKED_EXAMPLE).count(), 1);
        assert_eq!(numbering.find_iter("1. a\n2. b\n  3. c").count(), 2);
    }
}
