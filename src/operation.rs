//! Line-level operations derived from unified-diff hunks.
//!
//! Each hunk is walked with two independent 1-based counters seeded from the
//! hunk header: additions are numbered against the new content, deletions
//! against the old content. Stored `line` values are 0-based.

use diffy::{Line, create_patch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
	Addition,
	Deletion,
}

/// A single add/remove action at a specific line.
///
/// `line` is expressed in new-content numbering for an Addition and
/// old-content numbering for a Deletion. `old_line` anchors the operation in
/// the unmodified document: the deleted line itself, or the old line before
/// which an insertion lands. `content` carries no terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
	pub kind: OperationKind,
	pub line: usize,
	pub old_line: usize,
	pub content: String,
}

/// The line operations turning one content into another, plus the EOF newline
/// state of the target content. Line contents carry no terminators, so the
/// final break has to travel separately for replay to be exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript {
	pub operations: Vec<Operation>,
	pub eof_newline: bool,
}

/// Computes the line operations that turn `old` into `new`.
pub fn operations_between(old: &str, new: &str) -> EditScript {
	let patch = create_patch(old, new);
	let mut operations = Vec::new();

	for hunk in patch.hunks() {
		let mut old_line = hunk.old_range().start();
		let mut new_line = hunk.new_range().start();

		for line in hunk.lines() {
			match line {
				Line::Context(_) => {
					old_line += 1;
					new_line += 1;
				}
				Line::Delete(text) => {
					operations.push(Operation {
						kind: OperationKind::Deletion,
						line: old_line - 1,
						old_line: old_line - 1,
						content: strip_line_ending(text),
					});
					old_line += 1;
				}
				Line::Insert(text) => {
					operations.push(Operation {
						kind: OperationKind::Addition,
						line: new_line - 1,
						old_line: old_line.saturating_sub(1),
						content: strip_line_ending(text),
					});
					new_line += 1;
				}
			}
		}

		// Both counters must land on the hunk's declared end positions.
		debug_assert_eq!(old_line, hunk.old_range().start() + hunk.old_range().len());
		debug_assert_eq!(new_line, hunk.new_range().start() + hunk.new_range().len());
	}

	EditScript {
		operations,
		eof_newline: new.ends_with('\n'),
	}
}

/// Host-level "apply all operations" contract: reproduces byte-for-byte the
/// content the script was derived against.
///
/// Deletions are applied from highest old line down, then additions from
/// lowest new line up, so every index is interpreted in the numbering it was
/// recorded in. The script's `eof_newline` decides the trailing break.
pub fn apply_operations(original: &str, edits: &EditScript) -> String {
	let mut lines: Vec<&str> = split_lines(original);

	let mut deletions: Vec<&Operation> = edits
		.operations
		.iter()
		.filter(|op| op.kind == OperationKind::Deletion)
		.collect();
	deletions.sort_by(|a, b| b.line.cmp(&a.line));
	for op in deletions {
		if op.line < lines.len() {
			lines.remove(op.line);
		}
	}

	let mut additions: Vec<&Operation> = edits
		.operations
		.iter()
		.filter(|op| op.kind == OperationKind::Addition)
		.collect();
	additions.sort_by_key(|op| op.line);
	for op in additions {
		let at = op.line.min(lines.len());
		lines.insert(at, op.content.as_str());
	}

	let mut out = lines.join("\n");
	if edits.eof_newline && !lines.is_empty() {
		out.push('\n');
	}
	out
}

// region:    --- Support

fn split_lines(text: &str) -> Vec<&str> {
	let mut lines: Vec<&str> = text.split('\n').collect();
	if text.ends_with('\n') {
		lines.pop();
	}
	lines
}

fn strip_line_ending(line: &str) -> String {
	let line = line.strip_suffix('\n').unwrap_or(line);
	let line = line.strip_suffix('\r').unwrap_or(line);
	line.to_string()
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_operation_replacement_lines() -> Result<()> {
		// -- Setup & Fixtures
		let old = "a\nb\nc\nd\n";
		let new = "a\nx\ny\nd\n";

		// -- Exec
		let edits = operations_between(old, new);

		// -- Check
		assert_eq!(
			edits.operations,
			vec![
				Operation { kind: OperationKind::Deletion, line: 1, old_line: 1, content: "b".to_string() },
				Operation { kind: OperationKind::Deletion, line: 2, old_line: 2, content: "c".to_string() },
				Operation { kind: OperationKind::Addition, line: 1, old_line: 3, content: "x".to_string() },
				Operation { kind: OperationKind::Addition, line: 2, old_line: 3, content: "y".to_string() },
			]
		);
		assert!(edits.eof_newline);

		Ok(())
	}

	#[test]
	fn test_operation_pure_insertion_uses_new_numbering() -> Result<()> {
		// -- Setup & Fixtures
		let old = "a\nd\n";
		let new = "a\nb\nc\nd\n";

		// -- Exec
		let edits = operations_between(old, new);

		// -- Check
		let ops = &edits.operations;
		assert_eq!(ops.len(), 2);
		assert!(ops.iter().all(|op| op.kind == OperationKind::Addition));
		assert_eq!((ops[0].line, ops[0].content.as_str()), (1, "b"));
		assert_eq!((ops[1].line, ops[1].content.as_str()), (2, "c"));
		// Both insertions land before old line "d".
		assert!(ops.iter().all(|op| op.old_line == 1));

		Ok(())
	}

	#[test]
	fn test_operation_pure_deletion_uses_old_numbering() -> Result<()> {
		// -- Setup & Fixtures
		let old = "a\nb\nc\nd\n";
		let new = "a\nd\n";

		// -- Exec
		let edits = operations_between(old, new);

		// -- Check
		let ops = &edits.operations;
		assert_eq!(ops.len(), 2);
		assert!(ops.iter().all(|op| op.kind == OperationKind::Deletion));
		assert_eq!((ops[0].line, ops[0].content.as_str()), (1, "b"));
		assert_eq!((ops[1].line, ops[1].content.as_str()), (2, "c"));

		Ok(())
	}

	#[test]
	fn test_operation_roundtrip_mixed_counts() -> Result<()> {
		// -- Setup & Fixtures
		// One deleted line replaced by three; descending deletions then
		// ascending additions must still reproduce the new content.
		let old = "a\nb\nd\n";
		let new = "a\nx\ny\nz\nd\n";

		// -- Exec
		let edits = operations_between(old, new);
		let rebuilt = apply_operations(old, &edits);

		// -- Check
		assert_eq!(rebuilt, new);

		Ok(())
	}

	#[test]
	fn test_operation_roundtrip_eof_newline_toggle() -> Result<()> {
		// -- Setup & Fixtures
		let with_newline = "a\nb\n";
		let without_newline = "a\nb";

		// -- Exec
		let removed = operations_between(with_newline, without_newline);
		let added = operations_between(without_newline, with_newline);

		// -- Check
		assert!(!removed.eof_newline);
		assert_eq!(apply_operations(with_newline, &removed), without_newline);
		assert!(added.eof_newline);
		assert_eq!(apply_operations(without_newline, &added), with_newline);

		Ok(())
	}

	#[test]
	fn test_operation_roundtrip_multi_hunk() -> Result<()> {
		// -- Setup & Fixtures
		let old: String = (1..=40).map(|i| format!("line {i}\n")).collect();
		let mut new = old.replace("line 3\n", "line three\n");
		new = new.replace("line 37\n", "line 37\nline 37.5\n");

		// -- Exec
		let edits = operations_between(&old, &new);
		let rebuilt = apply_operations(&old, &edits);

		// -- Check
		assert_eq!(rebuilt, new);
		assert!(edits.operations.len() >= 3, "expected two hunks worth of operations");

		Ok(())
	}

	#[test]
	fn test_operation_no_difference() -> Result<()> {
		// -- Exec
		let edits = operations_between("same\n", "same\n");

		// -- Check
		assert!(edits.operations.is_empty());
		assert!(edits.eof_newline);

		Ok(())
	}
}

// endregion: --- Tests
