//! Text canonicalization used for comparison only.
//!
//! Documents are never rewritten through these functions; a match found in
//! normalized space is mapped back to original coordinates before anything is
//! applied.

/// Canonicalizes `text` for comparison: `\r\n`/`\r` become `\n`, tabs expand
/// to `tab_width` spaces, and per-line trailing whitespace is stripped.
///
/// Idempotent: normalizing already-normalized content is a no-op.
pub fn normalize(text: &str, tab_width: usize) -> String {
	let unified = text.replace("\r\n", "\n").replace('\r', "\n");

	let mut out = String::with_capacity(unified.len());
	let mut first = true;
	for line in unified.split('\n') {
		if !first {
			out.push('\n');
		}
		first = false;

		if line.contains('\t') {
			let expanded = line.replace('\t', &" ".repeat(tab_width));
			out.push_str(expanded.trim_end());
		} else {
			out.push_str(line.trim_end());
		}
	}

	out
}

/// Maps an offset in `normalized` back to the corresponding offset in
/// `original` by walking both strings in lockstep.
///
/// Line breaks are hard sync points (normalization never merges or splits
/// lines). Within a line, whitespace runs are consumed whole on the original
/// side against their normalized form, so the two sides stay aligned across
/// tab expansion and stripped trailing whitespace.
pub fn map_offset_to_original(original: &str, normalized: &str, normalized_offset: usize) -> usize {
	let mut orig = original.char_indices().peekable();
	let mut norm = normalized.char_indices().peekable();

	while let Some(&(norm_idx, norm_char)) = norm.peek() {
		if norm_idx >= normalized_offset {
			return orig.peek().map(|&(idx, _)| idx).unwrap_or(original.len());
		}

		let Some(&(_, orig_char)) = orig.peek() else {
			return original.len();
		};

		if norm_char == '\n' {
			// Consume the break plus any original trailing whitespace before it.
			norm.next();
			while let Some(&(_, c)) = orig.peek() {
				orig.next();
				if c == '\n' {
					break;
				}
			}
		} else if norm_char.is_whitespace() || orig_char.is_whitespace() {
			while orig.peek().is_some_and(|&(_, c)| c.is_whitespace() && c != '\n') {
				orig.next();
			}
			while norm
				.peek()
				.is_some_and(|&(idx, c)| c.is_whitespace() && c != '\n' && idx < normalized_offset)
			{
				norm.next();
			}
		} else {
			orig.next();
			norm.next();
		}
	}

	original.len()
}

// region:    --- Tests


// endregion: --- Tests
