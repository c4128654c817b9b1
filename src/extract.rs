//! Extraction of structured edit requests from raw model response text.
//!
//! Two formats are recognized. Format A is one or more conflict-marker blocks
//! carrying verbatim search/replace payloads; Format B is a single fenced
//! block holding the complete new content of the active document. Detection
//! is exclusive: any Format-A marker makes the whole response Format A.
//! Unparsable input never errors, it extracts to nothing.

/// A candidate search/replace edit extracted from response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
	pub search_text: String,
	pub replace_text: String,
}

/// The structured result of one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedEdits {
	SearchReplace(Vec<ChangeRequest>),
	FullContent {
		file_label: Option<String>,
		content: String,
	},
	None,
}

impl ExtractedEdits {
	pub fn is_none(&self) -> bool {
		matches!(self, ExtractedEdits::None)
	}
}

const FENCE_MARKER: &str = "```";

/// Extracts the edit requests present in `input`, if any.
pub fn extract_edits(input: &str) -> ExtractedEdits {
	if input.lines().any(is_search_marker) {
		return ExtractedEdits::SearchReplace(extract_change_blocks(input));
	}

	if input.lines().any(|line| line.trim_start().starts_with(FENCE_MARKER)) {
		if let Some((file_label, content)) = extract_full_block(input) {
			return ExtractedEdits::FullContent { file_label, content };
		}
	}

	ExtractedEdits::None
}

// region:    --- Support

fn is_search_marker(line: &str) -> bool {
	let trimmed = line.trim();
	trimmed.starts_with("<<<<<<<") && trimmed.ends_with("SEARCH")
}

fn is_divider_marker(line: &str) -> bool {
	let trimmed = line.trim();
	trimmed.len() >= 5 && trimmed.bytes().all(|b| b == b'=')
}

fn is_replace_marker(line: &str) -> bool {
	let trimmed = line.trim();
	trimmed.starts_with(">>>>>>>") && trimmed.ends_with("REPLACE")
}

fn extract_change_blocks(input: &str) -> Vec<ChangeRequest> {
	enum BlockState {
		Outside,
		InSearch,
		InReplace,
	}

	let mut state = BlockState::Outside;
	let mut search_lines: Vec<&str> = Vec::new();
	let mut replace_lines: Vec<&str> = Vec::new();
	let mut requests = Vec::new();

	for line in input.lines() {
		match state {
			BlockState::Outside => {
				if is_search_marker(line) {
					state = BlockState::InSearch;
				}
			}
			BlockState::InSearch => {
				if is_divider_marker(line) {
					state = BlockState::InReplace;
				} else if is_search_marker(line) {
					// Restarted block; the dangling search payload is dropped.
					search_lines.clear();
				} else {
					search_lines.push(line);
				}
			}
			BlockState::InReplace => {
				if is_replace_marker(line) {
					requests.push(ChangeRequest {
						search_text: search_lines.join("\n"),
						replace_text: replace_lines.join("\n"),
					});
					search_lines.clear();
					replace_lines.clear();
					state = BlockState::Outside;
				} else if is_search_marker(line) {
					// The previous block lost its terminator; drop it and
					// restart rather than corrupt every following block.
					search_lines.clear();
					replace_lines.clear();
					state = BlockState::InSearch;
				} else {
					replace_lines.push(line);
				}
			}
		}
	}

	// A replace payload cut off at end-of-response is still usable.
	if matches!(state, BlockState::InReplace) && !search_lines.is_empty() {
		requests.push(ChangeRequest {
			search_text: search_lines.join("\n"),
			replace_text: replace_lines.join("\n"),
		});
	}

	requests
}

/// Extracts the first fenced block and the optional filename label line
/// preceding it. An unterminated fence swallows the rest of the response.
fn extract_full_block(input: &str) -> Option<(Option<String>, String)> {
	let mut file_label: Option<String> = None;
	let mut last_nonempty: Option<&str> = None;
	let mut content_lines: Vec<&str> = Vec::new();
	let mut in_fence = false;

	for line in input.lines() {
		let trimmed = line.trim();
		if !in_fence {
			if trimmed.starts_with(FENCE_MARKER) {
				in_fence = true;
				file_label = last_nonempty.and_then(parse_file_label);
			} else if !trimmed.is_empty() {
				last_nonempty = Some(trimmed);
			}
		} else if trimmed.starts_with(FENCE_MARKER) {
			break;
		} else {
			content_lines.push(line);
		}
	}

	if !in_fence || content_lines.is_empty() {
		return None;
	}

	let mut content = content_lines.join("\n");
	content.push('\n');
	Some((file_label, content))
}

fn parse_file_label(line: &str) -> Option<String> {
	let label = line
		.trim()
		.trim_matches(|c| c == '*' || c == '`' || c == '#')
		.trim()
		.trim_end_matches(':')
		.trim();

	if label.is_empty() || label.contains(char::is_whitespace) {
		return None;
	}
	(label.contains('.') || label.contains('/')).then(|| label.to_string())
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
