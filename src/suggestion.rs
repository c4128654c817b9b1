//! Proximity grouping of operations and cursor-relative group selection.

use crate::{LineSpan, Operation, OperationKind};
use once_cell::sync::OnceCell;

/// Line gap at which two neighboring operations stop sharing a group.
///
/// Operations whose sorted lines differ by less than this value cluster into
/// one navigable unit; a gap of this many lines or more starts a new group.
pub const DEFAULT_PROXIMITY_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
	Addition,
	Deletion,
	Edit,
}

/// An ordered, non-empty cluster of line-adjacent operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGroup {
	operations: Vec<Operation>,
}

impl OperationGroup {
	pub fn operations(&self) -> &[Operation] {
		&self.operations
	}

	pub fn kind(&self) -> GroupKind {
		let mut has_addition = false;
		let mut has_deletion = false;
		for op in &self.operations {
			match op.kind {
				OperationKind::Addition => has_addition = true,
				OperationKind::Deletion => has_deletion = true,
			}
		}
		match (has_addition, has_deletion) {
			(true, false) => GroupKind::Addition,
			(false, true) => GroupKind::Deletion,
			_ => GroupKind::Edit,
		}
	}

	pub fn first_line(&self) -> Option<usize> {
		self.operations.first().map(|op| op.line)
	}

	pub fn last_line(&self) -> Option<usize> {
		self.operations.last().map(|op| op.line)
	}

	/// Minimum line distance between the selection span and any member
	/// operation, measured in unmodified-document coordinates (the selection
	/// lives in the document before any edit is accepted). `None` for a (by
	/// construction impossible) empty group so callers skip it rather than
	/// produce an unbounded value.
	fn distance_to(&self, selection: LineSpan) -> Option<usize> {
		self.operations.iter().map(|op| selection.distance_to_line(op.old_line)).min()
	}
}

/// Clusters operations into proximity groups.
///
/// Operations are stable-sorted by line; consecutive ones stay in the same
/// group while the gap between neighbors is below `proximity_threshold`.
pub fn group_operations(operations: &[Operation], proximity_threshold: usize) -> Vec<OperationGroup> {
	let mut sorted: Vec<Operation> = operations.to_vec();
	sorted.sort_by_key(|op| op.line);

	let mut groups: Vec<OperationGroup> = Vec::new();
	let mut current: Vec<Operation> = Vec::new();

	for op in sorted {
		if let Some(last) = current.last()
			&& op.line - last.line >= proximity_threshold
		{
			groups.push(OperationGroup {
				operations: std::mem::take(&mut current),
			});
		}
		current.push(op);
	}
	if !current.is_empty() {
		groups.push(OperationGroup { operations: current });
	}

	groups
}

/// Per-document container of operations, lazily derived groups, and the
/// current selection state. Owned exclusively by the store that created it.
#[derive(Debug)]
pub struct SuggestionFile {
	operations: Vec<Operation>,
	proximity_threshold: usize,
	groups: OnceCell<Vec<OperationGroup>>,
	selected_group_index: Option<usize>,
}

impl SuggestionFile {
	pub fn new(operations: Vec<Operation>, proximity_threshold: usize) -> Self {
		Self {
			operations,
			proximity_threshold,
			groups: OnceCell::new(),
			selected_group_index: None,
		}
	}

	pub fn operations(&self) -> &[Operation] {
		&self.operations
	}

	pub fn has_operations(&self) -> bool {
		!self.operations.is_empty()
	}

	pub fn groups(&self) -> &[OperationGroup] {
		self.groups
			.get_or_init(|| group_operations(&self.operations, self.proximity_threshold))
	}

	pub fn selected_group_index(&self) -> Option<usize> {
		self.selected_group_index
	}

	pub fn selected_group(&self) -> Option<&OperationGroup> {
		self.selected_group_index.and_then(|index| self.groups().get(index))
	}

	/// Picks the group closest to the selection span and records it.
	///
	/// Distance ties resolve to the lowest group index. With zero groups the
	/// selection stays `None`.
	pub fn select_closest_group(&mut self, selection: LineSpan) -> Option<usize> {
		let mut best: Option<(usize, usize)> = None; // (distance, index)

		for (index, group) in self.groups().iter().enumerate() {
			let Some(distance) = group.distance_to(selection) else {
				continue;
			};
			if best.is_none_or(|(best_distance, _)| distance < best_distance) {
				best = Some((distance, index));
			}
		}

		self.selected_group_index = best.map(|(_, index)| index);
		self.selected_group_index
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	fn op(kind: OperationKind, line: usize) -> Operation {
		op_at(kind, line, line)
	}

	fn op_at(kind: OperationKind, line: usize, old_line: usize) -> Operation {
		Operation {
			kind,
			line,
			old_line,
			content: format!("line {line}"),
		}
	}

	#[test]
	fn test_suggestion_grouping_by_proximity() -> Result<()> {
		// -- Setup & Fixtures
		let ops = vec![
			op(OperationKind::Deletion, 5),
			op(OperationKind::Addition, 6),
			op(OperationKind::Addition, 50),
		];

		// -- Exec
		let groups = group_operations(&ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Check
		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].operations().len(), 2);
		assert_eq!(groups[1].first_line(), Some(50));

		Ok(())
	}

	#[test]
	fn test_suggestion_grouping_chain_within_threshold() -> Result<()> {
		// -- Setup & Fixtures
		// Each neighbor gap is 2 (< threshold); the chain spans 8 lines but
		// still forms a single group.
		let ops = vec![
			op(OperationKind::Addition, 10),
			op(OperationKind::Addition, 12),
			op(OperationKind::Addition, 14),
			op(OperationKind::Addition, 16),
			op(OperationKind::Addition, 18),
		];

		// -- Exec
		let groups = group_operations(&ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Check
		assert_eq!(groups.len(), 1);
		assert_eq!(groups[0].operations().len(), 5);

		Ok(())
	}

	#[test]
	fn test_suggestion_group_kinds() -> Result<()> {
		// -- Setup & Fixtures
		let additions = OperationGroup {
			operations: vec![op(OperationKind::Addition, 1)],
		};
		let deletions = OperationGroup {
			operations: vec![op(OperationKind::Deletion, 1)],
		};
		let edit = OperationGroup {
			operations: vec![op(OperationKind::Deletion, 1), op(OperationKind::Addition, 1)],
		};

		// -- Check
		assert_eq!(additions.kind(), GroupKind::Addition);
		assert_eq!(deletions.kind(), GroupKind::Deletion);
		assert_eq!(edit.kind(), GroupKind::Edit);

		Ok(())
	}

	#[test]
	fn test_suggestion_select_overlapping_span() -> Result<()> {
		// -- Setup & Fixtures
		let ops = vec![
			op(OperationKind::Addition, 5),
			op(OperationKind::Addition, 6),
			op(OperationKind::Addition, 50),
		];
		let mut file = SuggestionFile::new(ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Exec
		let selected = file.select_closest_group(LineSpan::new(45, 55));

		// -- Check
		assert_eq!(selected, Some(1), "span 45-55 overlaps the group at line 50");
		assert_eq!(file.selected_group().and_then(OperationGroup::first_line), Some(50));

		Ok(())
	}

	#[test]
	fn test_suggestion_select_before_and_after_all() -> Result<()> {
		// -- Setup & Fixtures
		let ops = vec![op(OperationKind::Addition, 20), op(OperationKind::Addition, 40)];
		let mut file = SuggestionFile::new(ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Exec & Check
		assert_eq!(file.select_closest_group(LineSpan::new(0, 1)), Some(0));
		assert_eq!(file.select_closest_group(LineSpan::new(90, 95)), Some(1));

		Ok(())
	}

	#[test]
	fn test_suggestion_select_tie_breaks_to_lowest_index() -> Result<()> {
		// -- Setup & Fixtures
		// Selection at line 30 is exactly 10 away from both groups.
		let ops = vec![op(OperationKind::Addition, 20), op(OperationKind::Deletion, 40)];
		let mut file = SuggestionFile::new(ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Exec
		let selected = file.select_closest_group(LineSpan::new(30, 30));

		// -- Check
		assert_eq!(selected, Some(0));

		Ok(())
	}

	#[test]
	fn test_suggestion_select_uses_original_line_numbers() -> Result<()> {
		// -- Setup & Fixtures
		// A large insertion near the top pushes these additions' new-content
		// lines to 44-45, but they land before old line 5; the deletion sits
		// at old line 48. The cursor is at old lines 44-46.
		let ops = vec![
			op_at(OperationKind::Addition, 44, 5),
			op_at(OperationKind::Addition, 45, 5),
			op(OperationKind::Deletion, 48),
		];
		let mut file = SuggestionFile::new(ops, DEFAULT_PROXIMITY_THRESHOLD);

		// -- Exec
		let selected = file.select_closest_group(LineSpan::new(44, 46));

		// -- Check: distance follows the unmodified document, not the
		// shifted new-content numbering.
		assert_eq!(selected, Some(1));

		Ok(())
	}

	#[test]
	fn test_suggestion_select_with_zero_groups() -> Result<()> {
		// -- Setup & Fixtures
		let mut file = SuggestionFile::new(Vec::new(), DEFAULT_PROXIMITY_THRESHOLD);

		// -- Exec
		let selected = file.select_closest_group(LineSpan::new(0, 10));

		// -- Check
		assert_eq!(selected, None);
		assert!(!file.has_operations());

		Ok(())
	}
}

// endregion: --- Tests
