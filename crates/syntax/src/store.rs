//! Host-side storage contracts.
//!
//! The engine never holds per-block state itself. A host exposes the text of
//! its blocks through [`BlockSource`] and persists each block's
//! [`EndState`] through [`BlockStateStore`].

use std::borrow::Cow;

use thiserror::Error;
use verilume_primitives::{BlockIndex, EndState};

/// Read access to the blocks of a document.
pub trait BlockSource {
	fn block_count(&self) -> usize;

	/// Text of `index` without its line terminator. Out of range yields "".
	fn block_text(&self, index: BlockIndex) -> Cow<'_, str>;
}

impl<T: AsRef<str>> BlockSource for [T] {
	fn block_count(&self) -> usize {
		self.len()
	}

	fn block_text(&self, index: BlockIndex) -> Cow<'_, str> {
		Cow::Borrowed(self.get(index).map_or("", AsRef::as_ref))
	}
}

impl<T: AsRef<str>> BlockSource for Vec<T> {
	fn block_count(&self) -> usize {
		self.len()
	}

	fn block_text(&self, index: BlockIndex) -> Cow<'_, str> {
		self.as_slice().block_text(index)
	}
}

/// Per-block end-state storage.
pub trait BlockStateStore {
	/// State stored for `index` by a previous run, if any.
	fn stored_state(&self, index: BlockIndex) -> Option<EndState>;

	fn set_state(&mut self, index: BlockIndex, state: EndState);

	/// Whether `index` lies in a region disabled by conditional compilation.
	fn is_excluded(&self, index: BlockIndex) -> bool;

	/// End state of the block before `index`, or [`EndState::INITIAL`] for
	/// the first block and for predecessors that were never highlighted.
	fn prior_state(&self, index: BlockIndex) -> EndState {
		index
			.checked_sub(1)
			.and_then(|prev| self.stored_state(prev))
			.unwrap_or(EndState::INITIAL)
	}
}

/// Errors raised by document edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
	#[error("block {index} is out of range (document has {len} blocks)")]
	BlockOutOfRange { index: BlockIndex, len: usize },
	#[error("char range {start}..{end} is out of bounds (document has {len} chars)")]
	RangeOutOfBounds { start: usize, end: usize, len: usize },
}
