//! Best-effort location of a search text inside document content.
//!
//! Strategies run as an ordered cascade, first success wins. Exact matching is
//! always tried first; the fuzzier strategies only run for search texts that
//! pass the structural-completeness guard, so incomplete fragments are never
//! fuzzy-placed (applying one would duplicate partial code).

use crate::normalize::{map_offset_to_original, normalize};
use crate::{EngineConfig, match_guard};
use regex::Regex;
use tracing::debug;

/// A located span in original byte coordinates.
///
/// `start` is the match index; `end` is carried alongside because fuzzy
/// strategies can match a span whose length differs from the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
	pub start: usize,
	pub end: usize,
}

/// Finds the best-effort span of `search_text` inside `content`.
pub fn locate(search_text: &str, content: &str, config: &EngineConfig) -> Option<MatchSpan> {
	if search_text.is_empty() {
		return None;
	}

	// -- 1. Exact substring
	if let Some(idx) = content.find(search_text) {
		return Some(MatchSpan {
			start: idx,
			end: idx + search_text.len(),
		});
	}

	// -- 2. Tolerate a trailing line break the model omitted or added
	if let Some(span) = locate_without_trailing_newline(search_text, content) {
		return Some(span);
	}

	// -- 3. Normalized-space match mapped back to original coordinates
	if let Some(span) = locate_normalized(search_text, content, config.tab_width) {
		return Some(span);
	}

	// -- 4. Leading/trailing whitespace trimmed
	let trimmed = search_text.trim();
	if !trimmed.is_empty() && trimmed != search_text {
		if let Some(idx) = content.find(trimmed) {
			return Some(MatchSpan {
				start: idx,
				end: idx + trimmed.len(),
			});
		}
	}

	// -- 5. Never fuzzy-match a structurally incomplete fragment
	if match_guard::looks_incomplete(search_text) {
		debug!(search_len = search_text.len(), "search text looks like an incomplete fragment; not fuzzy-matching");
		return None;
	}

	if search_text.len() > config.max_fuzzy_len {
		debug!(search_len = search_text.len(), "search text exceeds fuzzy bound; giving up");
		return None;
	}

	// -- 6. Whitespace-tolerant pattern, gated on structural completeness
	if let Some(span) = locate_whitespace_tolerant(search_text, content) {
		return Some(span);
	}

	// -- 7. Last resort: first three whitespace-delimited tokens
	locate_by_leading_tokens(search_text, content)
}

// region:    --- Support

fn locate_without_trailing_newline(search_text: &str, content: &str) -> Option<MatchSpan> {
	let stripped = search_text.strip_suffix('\n')?;
	let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);
	if stripped.is_empty() {
		return None;
	}

	for (idx, _) in content.match_indices(stripped) {
		let end = idx + stripped.len();
		match content[end..].chars().next() {
			None | Some('\n') | Some('\r') => return Some(MatchSpan { start: idx, end }),
			_ => {}
		}
	}

	None
}

fn locate_normalized(search_text: &str, content: &str, tab_width: usize) -> Option<MatchSpan> {
	let norm_search = normalize(search_text, tab_width);
	if norm_search.is_empty() {
		return None;
	}
	let norm_content = normalize(content, tab_width);

	let idx = norm_content.find(&norm_search)?;
	let start = map_offset_to_original(content, &norm_content, idx);
	let end = map_offset_to_original(content, &norm_content, idx + norm_search.len());
	if end <= start {
		return None;
	}

	debug!(start, end, "search text located via normalized comparison");
	Some(MatchSpan { start, end })
}

fn locate_whitespace_tolerant(search_text: &str, content: &str) -> Option<MatchSpan> {
	let pattern = whitespace_tolerant_pattern(search_text, usize::MAX)?;
	let found = pattern.find(content)?;

	if !match_guard::is_complete(found.as_str(), search_text) {
		debug!("whitespace-tolerant match rejected as structurally incomplete");
		return None;
	}

	debug!(start = found.start(), "search text located via whitespace-tolerant pattern");
	Some(MatchSpan {
		start: found.start(),
		end: found.end(),
	})
}

fn locate_by_leading_tokens(search_text: &str, content: &str) -> Option<MatchSpan> {
	let pattern = whitespace_tolerant_pattern(search_text, 3)?;
	let found = pattern.find(content)?;

	debug!(start = found.start(), "search text located via leading-token fallback");
	Some(MatchSpan {
		start: found.start(),
		end: found.end(),
	})
}

/// Builds a pattern where every token is escaped verbatim and any whitespace
/// run matches one or more whitespace characters of any kind.
fn whitespace_tolerant_pattern(search_text: &str, max_tokens: usize) -> Option<Regex> {
	let tokens: Vec<String> = search_text
		.split_whitespace()
		.take(max_tokens)
		.map(|token| regex::escape(token))
		.collect();
	if tokens.is_empty() {
		return None;
	}

	Regex::new(&tokens.join(r"\s+")).ok()
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
