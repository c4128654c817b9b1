//! Per-cycle suggestion state, keyed by document identity.

use crate::SuggestionFile;
use std::collections::HashMap;

/// Owns every SuggestionFile of one suggestion cycle.
///
/// A store is created when a response is processed and discarded wholesale
/// when a new cycle begins or the host clears it; nothing survives across
/// cycles.
#[derive(Debug, Default)]
pub struct SuggestionStore {
	files: HashMap<String, SuggestionFile>,
}

impl SuggestionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, doc_id: impl Into<String>, file: SuggestionFile) {
		self.files.insert(doc_id.into(), file);
	}

	pub fn file(&self, doc_id: &str) -> Option<&SuggestionFile> {
		self.files.get(doc_id)
	}

	pub fn file_mut(&mut self, doc_id: &str) -> Option<&mut SuggestionFile> {
		self.files.get_mut(doc_id)
	}

	pub fn files(&self) -> impl Iterator<Item = (&str, &SuggestionFile)> {
		self.files.iter().map(|(doc_id, file)| (doc_id.as_str(), file))
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	pub fn has_suggestions(&self) -> bool {
		self.files.values().any(SuggestionFile::has_operations)
	}

	pub fn clear(&mut self) {
		self.files.clear();
	}
}
