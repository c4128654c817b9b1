//! The full suggestion pipeline for one document: extract, locate, apply,
//! diff, group.

use crate::{
	DEFAULT_PROXIMITY_THRESHOLD, ExtractedEdits, SuggestionFile, SuggestionStore, apply_changes, extract_edits,
	operations_between, resolve_changes,
};
use tracing::debug;

/// Tuning knobs for one suggestion cycle, passed explicitly per call.
///
/// There is no global "current configuration"; each caller owns its config
/// and no state leaks across cycles.
#[derive(Debug, Clone)]
pub struct EngineConfig {
	/// Width used when expanding tabs during normalized comparison.
	pub tab_width: usize,
	/// Line gap at which neighboring operations stop sharing a group.
	pub proximity_threshold: usize,
	/// Search texts longer than this skip the regex fallback strategies.
	pub max_fuzzy_len: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			tab_width: 4,
			proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
			max_fuzzy_len: 4096,
		}
	}
}

/// Runs the pipeline for one document and returns the cycle's store.
///
/// An unrecognized or empty response yields a store with zero files.
pub fn compute_suggestions(
	config: &EngineConfig,
	doc_id: &str,
	content: &str,
	response_text: &str,
) -> SuggestionStore {
	let mut store = SuggestionStore::new();
	suggest_into(&mut store, config, doc_id, content, response_text);
	store
}

/// Same as `compute_suggestions`, reusing a caller-owned store for hosts that
/// process several documents in one cycle.
pub fn suggest_into(
	store: &mut SuggestionStore,
	config: &EngineConfig,
	doc_id: &str,
	content: &str,
	response_text: &str,
) {
	let Some(new_content) = rewrite_content(config, content, response_text) else {
		debug!(doc_id, "response produced no applicable edits");
		return;
	};

	let edits = operations_between(content, &new_content);
	if edits.operations.is_empty() {
		return;
	}

	store.insert(doc_id, SuggestionFile::new(edits.operations, config.proximity_threshold));
}

/// Produces the fully substituted document content for a response, or `None`
/// when the response contains nothing applicable to `content`.
pub fn rewrite_content(config: &EngineConfig, content: &str, response_text: &str) -> Option<String> {
	match extract_edits(response_text) {
		ExtractedEdits::SearchReplace(requests) => {
			let resolved = resolve_changes(requests, content, config);
			if resolved.is_empty() {
				return None;
			}
			Some(apply_changes(content, resolved))
		}
		ExtractedEdits::FullContent { content: new_content, .. } => Some(new_content),
		ExtractedEdits::None => None,
	}
}
