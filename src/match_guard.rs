//! Structural-completeness checks that keep fuzzy matching away from code
//! fragments (a lone declaration header, an unclosed brace) whose application
//! would duplicate partial code.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_DECL_HEADER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[^\n{}]*\b(?:fn|function|def|class|struct|enum|trait|impl|interface)\b[^\n{}]*\{?\s*$")
		.unwrap()
});

const BRACKET_PAIRS: &[(char, char)] = &[('{', '}'), ('(', ')'), ('[', ']')];

/// Returns true when the trimmed pattern is a structurally incomplete
/// fragment: a single-line declaration header with no following body, or text
/// with more opening than closing braces/parens/brackets.
pub fn looks_incomplete(pattern: &str) -> bool {
	let trimmed = pattern.trim();
	if trimmed.is_empty() {
		return false;
	}

	if RE_DECL_HEADER.is_match(trimmed) {
		return true;
	}

	BRACKET_PAIRS
		.iter()
		.any(|&(open, close)| count_char(trimmed, open) > count_char(trimmed, close))
}

/// Returns true when, for each bracket type present in `pattern`, the
/// open/close counts in `matched_span` balance out.
pub fn is_complete(matched_span: &str, pattern: &str) -> bool {
	BRACKET_PAIRS.iter().all(|&(open, close)| {
		if pattern.contains(open) || pattern.contains(close) {
			count_char(matched_span, open) == count_char(matched_span, close)
		} else {
			true
		}
	})
}

fn count_char(s: &str, wanted: char) -> usize {
	s.chars().filter(|&c| c == wanted).count()
}

// region:    --- Tests


// endregion: --- Tests
