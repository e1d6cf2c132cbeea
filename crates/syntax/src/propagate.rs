//! Forward propagation of end states after an edit.
//!
//! A change to block `i` can only affect blocks `>= i`. Blocks are
//! re-highlighted in order until one produces the end state that was already
//! stored for it; every later block then sees an unchanged prior state and
//! needs no work.

use std::ops::Range;

use tokio_util::sync::CancellationToken;
use verilume_primitives::BlockIndex;

use crate::engine::{BlockHighlight, HighlightEngine};
use crate::store::{BlockSource, BlockStateStore};

/// How a propagation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
	/// Block `at` reproduced its stored end state.
	Converged { at: BlockIndex },
	EndOfDocument,
	/// Stopped before `next`; blocks from `next` on are still stale.
	Cancelled { next: BlockIndex },
}

/// Summary of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
	pub outcome: RunOutcome,
	/// Number of blocks re-highlighted.
	pub processed: usize,
}

impl RunReport {
	/// First block whose highlight may still be stale, if any.
	pub fn resume_at(&self) -> Option<BlockIndex> {
		match self.outcome {
			RunOutcome::Cancelled { next } => Some(next),
			RunOutcome::Converged { .. } | RunOutcome::EndOfDocument => None,
		}
	}
}

/// Re-highlights blocks starting at `dirty.start`.
///
/// Every block in `dirty` is processed; after that, the run stops at the
/// first block whose recomputed end state equals its stored one. Each
/// result is handed to `on_block` after its state has been stored.
pub fn run<S, T, F>(
	engine: &HighlightEngine,
	source: &S,
	store: &mut T,
	dirty: Range<BlockIndex>,
	cancel: Option<&CancellationToken>,
	mut on_block: F,
) -> RunReport
where
	S: BlockSource + ?Sized,
	T: BlockStateStore + ?Sized,
	F: FnMut(BlockIndex, BlockHighlight),
{
	let count = source.block_count();
	let mut index = dirty.start;
	let mut prior = store.prior_state(index);
	let mut processed = 0;

	let outcome = loop {
		if index >= count {
			break RunOutcome::EndOfDocument;
		}
		if cancel.is_some_and(CancellationToken::is_cancelled) {
			break RunOutcome::Cancelled { next: index };
		}

		let previous = store.stored_state(index);
		let highlight = engine.highlight(&source.block_text(index), prior, store.is_excluded(index));
		let state = highlight.state;
		store.set_state(index, state);
		on_block(index, highlight);
		processed += 1;

		if index + 1 >= dirty.end && previous == Some(state) {
			break RunOutcome::Converged { at: index };
		}
		prior = state;
		index += 1;
	};

	match outcome {
		RunOutcome::Cancelled { next } => tracing::debug!(start = dirty.start, next, processed, "propagation cancelled"),
		_ => tracing::trace!(start = dirty.start, processed, ?outcome, "propagation finished"),
	}
	RunReport { outcome, processed }
}
