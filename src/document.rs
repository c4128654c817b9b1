//! Minimal host document capability surface.
//!
//! Any host (editor, CLI harness, test double) implements `DocumentView`
//! instead of exposing its own document object graph; the core only needs it
//! to translate a host selection into line coordinates for group selection.

/// 0-based line/character position. Characters count bytes within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	pub line: usize,
	pub character: usize,
}

/// An inclusive 0-based line span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
	pub start: usize,
	pub end: usize,
}

impl LineSpan {
	pub fn new(a: usize, b: usize) -> Self {
		if a <= b { Self { start: a, end: b } } else { Self { start: b, end: a } }
	}

	/// Distance from this span to a line; 0 when the line falls inside it.
	pub fn distance_to_line(&self, line: usize) -> usize {
		if line < self.start {
			self.start - line
		} else if line > self.end {
			line - self.end
		} else {
			0
		}
	}
}

pub trait DocumentView {
	fn text(&self) -> &str;
	fn line_count(&self) -> usize;
	fn line_at(&self, line: usize) -> Option<&str>;
	fn offset_at(&self, position: Position) -> usize;
	fn position_at(&self, offset: usize) -> Position;
}

/// Translates a host selection given as byte offsets into the line span used
/// by group selection.
pub fn selection_line_span(document: &dyn DocumentView, start_offset: usize, end_offset: usize) -> LineSpan {
	let start = document.position_at(start_offset.min(end_offset));
	let end = document.position_at(start_offset.max(end_offset));
	LineSpan::new(start.line, end.line)
}

/// In-memory `DocumentView` implementation.
#[derive(Debug, Clone)]
pub struct TextDocument {
	text: String,
	line_starts: Vec<usize>,
}

impl TextDocument {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let mut line_starts = vec![0];
		for (idx, byte) in text.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(idx + 1);
			}
		}
		Self { text, line_starts }
	}
}

impl DocumentView for TextDocument {
	fn text(&self) -> &str {
		&self.text
	}

	fn line_count(&self) -> usize {
		self.line_starts.len()
	}

	fn line_at(&self, line: usize) -> Option<&str> {
		let start = *self.line_starts.get(line)?;
		let end = self
			.line_starts
			.get(line + 1)
			.copied()
			.unwrap_or(self.text.len());
		Some(self.text[start..end].trim_end_matches(['\n', '\r']))
	}

	fn offset_at(&self, position: Position) -> usize {
		let Some(&start) = self.line_starts.get(position.line) else {
			return self.text.len();
		};
		let line_end = self
			.line_starts
			.get(position.line + 1)
			.copied()
			.unwrap_or(self.text.len());
		(start + position.character).min(line_end)
	}

	fn position_at(&self, offset: usize) -> Position {
		let offset = offset.min(self.text.len());
		let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
		Position {
			line,
			character: offset - self.line_starts[line],
		}
	}
}

// region:    --- Tests


// endregion: --- Tests
