//! Resolution and application of located changes against document content.

use crate::{ChangeRequest, EngineConfig, locate};
use tracing::{debug, warn};

/// A located, ready-to-apply edit. Consumed once during application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
	pub search_text: String,
	pub replace_text: String,
	pub start_index: usize,
	pub end_index: usize,
}

/// Locates each candidate request in `content`.
///
/// Requests no locator strategy can place are dropped; their siblings are
/// still attempted.
pub fn resolve_changes(requests: Vec<ChangeRequest>, content: &str, config: &EngineConfig) -> Vec<AppliedChange> {
	let mut resolved = Vec::with_capacity(requests.len());

	for request in requests {
		let Some(span) = locate(&request.search_text, content, config) else {
			debug!(search_len = request.search_text.len(), "change request dropped; no locator strategy matched");
			continue;
		};

		let mut change = AppliedChange {
			search_text: request.search_text,
			replace_text: request.replace_text,
			start_index: span.start,
			end_index: span.end,
		};
		preserve_trailing_blank_lines(&mut change, content);
		resolved.push(change);
	}

	resolved
}

/// Applies the accepted changes and returns the fully substituted content.
///
/// A candidate whose `[start,end)` span overlaps any already-accepted span is
/// dropped whole. Accepted changes are applied from highest `start_index` to
/// lowest so earlier substitutions never shift later offsets.
pub fn apply_changes(content: &str, candidates: Vec<AppliedChange>) -> String {
	let mut accepted: Vec<AppliedChange> = Vec::new();

	for candidate in candidates {
		let overlaps = accepted
			.iter()
			.any(|prior| candidate.start_index < prior.end_index && prior.start_index < candidate.end_index);
		if overlaps {
			warn!(
				start = candidate.start_index,
				end = candidate.end_index,
				"dropping change that overlaps an earlier accepted change"
			);
			continue;
		}
		accepted.push(candidate);
	}

	accepted.sort_by(|a, b| b.start_index.cmp(&a.start_index));

	let mut out = content.to_string();
	for change in accepted {
		out.replace_range(change.start_index..change.end_index, &change.replace_text);
	}

	out
}

// region:    --- Support

/// When the search text ends with a line break and the document has more
/// consecutive breaks right after the match, the span absorbs them and the
/// replacement is padded so the blank lines survive the substitution.
fn preserve_trailing_blank_lines(change: &mut AppliedChange, content: &str) {
	if !change.search_text.ends_with('\n') {
		return;
	}

	let mut rest = &content[change.end_index..];
	let mut extra = 0;
	loop {
		if let Some(r) = rest.strip_prefix("\r\n") {
			rest = r;
		} else if let Some(r) = rest.strip_prefix('\n') {
			rest = r;
		} else {
			break;
		}
		extra += 1;
	}
	if extra == 0 {
		return;
	}

	change.end_index = content.len() - rest.len();

	let needed = trailing_newline_count(&change.search_text) + extra;
	let have = trailing_newline_count(&change.replace_text);
	for _ in have..needed {
		change.replace_text.push('\n');
	}
}

fn trailing_newline_count(s: &str) -> usize {
	let mut count = 0;
	let mut rest = s;
	while let Some(r) = rest.strip_suffix('\n') {
		rest = r.strip_suffix('\r').unwrap_or(r);
		count += 1;
	}
	count
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
