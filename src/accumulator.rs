//! Explicit state machine for incremental response accumulation.
//!
//! The matching pipeline itself only consumes finalized text; hosts that
//! stream chunks use this accumulator so that reset and cancellation are
//! explicit instead of implicit buffering on a long-lived object.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulatorState {
	#[default]
	Idle,
	Accumulating,
	Complete,
}

/// Partial result reported after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOutcome {
	pub total_len: usize,
	/// Whether a search/replace marker has appeared so far. Hosts can use it
	/// to switch on early edit rendering before the response completes.
	pub has_change_markers: bool,
}

#[derive(Debug, Default)]
pub struct ResponseAccumulator {
	state: AccumulatorState,
	buffer: String,
}

impl ResponseAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> AccumulatorState {
		self.state
	}

	/// Appends a chunk. Feeding a completed accumulator is a contract
	/// violation.
	pub fn feed(&mut self, chunk: &str) -> Result<FeedOutcome> {
		if self.state == AccumulatorState::Complete {
			return Err(Error::AccumulatorComplete);
		}
		self.state = AccumulatorState::Accumulating;
		self.buffer.push_str(chunk);

		Ok(FeedOutcome {
			total_len: self.buffer.len(),
			has_change_markers: self.buffer.contains("<<<<<<<"),
		})
	}

	/// Finalizes accumulation and hands the assembled response text to the
	/// caller. Finishing twice is a contract violation.
	pub fn finish(&mut self) -> Result<String> {
		if self.state == AccumulatorState::Complete {
			return Err(Error::AccumulatorComplete);
		}
		self.state = AccumulatorState::Complete;
		Ok(std::mem::take(&mut self.buffer))
	}

	/// Abandons the current cycle and returns to `Idle`.
	pub fn reset(&mut self) {
		self.state = AccumulatorState::Idle;
		self.buffer.clear();
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_accumulator_feed_and_finish() -> Result<()> {
		// -- Setup & Fixtures
		let mut acc = ResponseAccumulator::new();

		// -- Exec
		let first = acc.feed("<<<<<<< SEARCH\nfoo\n")?;
		let second = acc.feed("=======\nbar\n>>>>>>> REPLACE\n")?;
		let text = acc.finish()?;

		// -- Check
		assert!(first.has_change_markers);
		assert_eq!(second.total_len, text.len());
		assert_eq!(acc.state(), AccumulatorState::Complete);
		assert!(text.contains(">>>>>>> REPLACE"));

		Ok(())
	}

	#[test]
	fn test_accumulator_feed_after_finish_errors() -> Result<()> {
		// -- Setup & Fixtures
		let mut acc = ResponseAccumulator::new();
		acc.feed("chunk")?;
		acc.finish()?;

		// -- Exec
		let res = acc.feed("more");

		// -- Check
		assert!(res.is_err());

		Ok(())
	}

	#[test]
	fn test_accumulator_reset_restores_idle() -> Result<()> {
		// -- Setup & Fixtures
		let mut acc = ResponseAccumulator::new();
		acc.feed("chunk")?;
		acc.finish()?;

		// -- Exec
		acc.reset();

		// -- Check
		assert_eq!(acc.state(), AccumulatorState::Idle);
		let outcome = acc.feed("fresh")?;
		assert_eq!(outcome.total_len, 5);

		Ok(())
	}
}

// endregion: --- Tests
