//! In-memory document that keeps its highlighting current across edits.
//!
//! Text lives in a [`Rope`]; every line is one block. The document owns the
//! per-block end states, exclusion flags and the latest [`BlockHighlight`]
//! of each block, and re-runs [`propagate::run`] after each change.

use std::borrow::Cow;
use std::ops::Range;

use ropey::Rope;
use tokio_util::sync::CancellationToken;
use verilume_primitives::{BlockIndex, BracketMark, EndState, FoldInfo};

use crate::brackets::{BracketPos, match_bracket};
use crate::engine::{BlockHighlight, HighlightEngine};
use crate::folds::{FoldRegion, fold_regions};
use crate::propagate::{self, RunReport};
use crate::store::{BlockSource, BlockStateStore, DocumentError};

/// Document text split into line blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockText {
	rope: Rope,
}

impl BlockText {
	pub fn new(text: &str) -> Self {
		Self { rope: Rope::from_str(text) }
	}

	pub fn rope(&self) -> &Rope {
		&self.rope
	}
}

fn strip_line_break(line: &str) -> &str {
	if let Some(stripped) = line.strip_suffix("\r\n") {
		return stripped;
	}
	line.strip_suffix(['\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}'])
		.unwrap_or(line)
}

impl BlockSource for BlockText {
	fn block_count(&self) -> usize {
		self.rope.len_lines()
	}

	fn block_text(&self, index: BlockIndex) -> Cow<'_, str> {
		if index >= self.rope.len_lines() {
			return Cow::Borrowed("");
		}
		let line = self.rope.line(index);
		match line.as_str() {
			Some(text) => Cow::Borrowed(strip_line_break(text)),
			None => {
				let text = line.to_string();
				Cow::Owned(strip_line_break(&text).to_owned())
			}
		}
	}
}

#[derive(Debug, Clone, Copy, Default)]
struct BlockSlot {
	state: Option<EndState>,
	excluded: bool,
}

/// End states and exclusion flags of every block.
#[derive(Debug, Clone, Default)]
pub struct BlockStates {
	slots: Vec<BlockSlot>,
}

impl BlockStates {
	fn with_len(len: usize) -> Self {
		Self {
			slots: vec![BlockSlot::default(); len],
		}
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl BlockStateStore for BlockStates {
	fn stored_state(&self, index: BlockIndex) -> Option<EndState> {
		self.slots.get(index).and_then(|slot| slot.state)
	}

	fn set_state(&mut self, index: BlockIndex, state: EndState) {
		if let Some(slot) = self.slots.get_mut(index) {
			slot.state = Some(state);
		}
	}

	fn is_excluded(&self, index: BlockIndex) -> bool {
		self.slots.get(index).is_some_and(|slot| slot.excluded)
	}
}

/// A highlighted document.
#[derive(Debug)]
pub struct Document {
	engine: HighlightEngine,
	text: BlockText,
	states: BlockStates,
	highlights: Vec<Option<BlockHighlight>>,
	/// First block whose highlight is known to be stale after a cancelled run.
	stale_from: Option<BlockIndex>,
}

impl Document {
	/// Creates a document. Nothing is highlighted until
	/// [`highlight_all`](Self::highlight_all) or the first edit.
	pub fn new(engine: HighlightEngine, text: &str) -> Self {
		let text = BlockText::new(text);
		let len = text.block_count();
		Self {
			engine,
			text,
			states: BlockStates::with_len(len),
			highlights: vec![None; len],
			stale_from: Some(0),
		}
	}

	pub fn engine(&self) -> &HighlightEngine {
		&self.engine
	}

	pub fn rope(&self) -> &Rope {
		self.text.rope()
	}

	pub fn block_count(&self) -> usize {
		self.text.block_count()
	}

	pub fn block_text(&self, index: BlockIndex) -> Cow<'_, str> {
		self.text.block_text(index)
	}

	/// Latest highlight of `index`, if it has been highlighted.
	pub fn block(&self, index: BlockIndex) -> Option<&BlockHighlight> {
		self.highlights.get(index).and_then(Option::as_ref)
	}

	pub fn state(&self, index: BlockIndex) -> Option<EndState> {
		self.states.stored_state(index)
	}

	pub fn is_excluded(&self, index: BlockIndex) -> bool {
		self.states.is_excluded(index)
	}

	/// First block still waiting for a cancelled run to be resumed.
	pub fn stale_from(&self) -> Option<BlockIndex> {
		self.stale_from
	}

	/// Forgets every stored state and highlights the whole document.
	pub fn highlight_all(&mut self) -> RunReport {
		self.highlight_all_with(None)
	}

	pub fn highlight_all_with(&mut self, cancel: Option<&CancellationToken>) -> RunReport {
		for slot in &mut self.states.slots {
			slot.state = None;
		}
		self.stale_from = None;
		self.propagate(0..self.block_count(), cancel)
	}

	/// Continues a cancelled run. Returns `None` when nothing is stale.
	pub fn resume(&mut self, cancel: Option<&CancellationToken>) -> Option<RunReport> {
		let stale = self.stale_from?;
		Some(self.propagate(stale..stale + 1, cancel))
	}

	/// Replaces the chars in `range` with `replacement` and re-highlights.
	pub fn edit(&mut self, range: Range<usize>, replacement: &str) -> Result<RunReport, DocumentError> {
		self.edit_with(range, replacement, None)
	}

	pub fn edit_with(
		&mut self,
		range: Range<usize>,
		replacement: &str,
		cancel: Option<&CancellationToken>,
	) -> Result<RunReport, DocumentError> {
		let len = self.text.rope.len_chars();
		if range.start > range.end || range.end > len {
			return Err(DocumentError::RangeOutOfBounds {
				start: range.start,
				end: range.end,
				len,
			});
		}

		let rope = &mut self.text.rope;
		let first = rope.char_to_line(range.start);
		let old_last = rope.char_to_line(range.end);
		rope.remove(range.clone());
		rope.insert(range.start, replacement);
		let new_last = rope.char_to_line(range.start + replacement.chars().count());

		let old_count = old_last - first + 1;
		let new_count = new_last - first + 1;
		self.splice_blocks(first, old_count, new_count);
		self.stale_from = self.stale_from.map(|stale| {
			if stale > old_last {
				stale - old_count + new_count
			} else {
				stale.min(first)
			}
		});

		tracing::trace!(first, old_count, new_count, "document edited");
		Ok(self.propagate(first..first + new_count, cancel))
	}

	/// Replaces the text of one block, keeping its line break.
	pub fn replace_block(&mut self, index: BlockIndex, text: &str) -> Result<RunReport, DocumentError> {
		let count = self.block_count();
		if index >= count {
			return Err(DocumentError::BlockOutOfRange { index, len: count });
		}
		let start = self.text.rope.line_to_char(index);
		let end = start + self.block_text(index).chars().count();
		self.edit(start..end, text)
	}

	/// Marks `blocks` as disabled (or enabled) by conditional compilation.
	pub fn set_excluded(&mut self, blocks: Range<BlockIndex>, excluded: bool) -> Result<Option<RunReport>, DocumentError> {
		let count = self.block_count();
		if blocks.start > blocks.end || blocks.end > count {
			return Err(DocumentError::BlockOutOfRange {
				index: blocks.end.max(blocks.start),
				len: count,
			});
		}

		let mut changed: Option<Range<BlockIndex>> = None;
		for index in blocks {
			let slot = &mut self.states.slots[index];
			if slot.excluded != excluded {
				slot.excluded = excluded;
				changed = Some(changed.map_or(index..index + 1, |range| range.start..index + 1));
			}
		}
		Ok(changed.map(|dirty| self.propagate(dirty, None)))
	}

	/// Fold info of every block; blocks never highlighted report their
	/// prior depth.
	pub fn fold_infos(&self) -> Vec<FoldInfo> {
		(0..self.block_count())
			.map(|index| match self.block(index) {
				Some(block) => block.fold,
				None => FoldInfo::new(self.states.prior_state(index).depth),
			})
			.collect()
	}

	pub fn fold_regions(&self) -> Vec<FoldRegion> {
		fold_regions(&self.fold_infos())
	}

	pub fn match_bracket(&self, at: BracketPos) -> Option<BracketPos> {
		match_bracket(self.block_count(), |index| self.marks(index), at)
	}

	fn marks(&self, index: BlockIndex) -> &[BracketMark] {
		self.block(index).map(|block| block.brackets.as_slice()).unwrap_or_default()
	}

	/// Replaces `old_count` blocks at `first` with `new_count` fresh ones.
	///
	/// The last replacement block inherits the old last block's end state so
	/// an edit that leaves the state unchanged converges immediately.
	fn splice_blocks(&mut self, first: BlockIndex, old_count: usize, new_count: usize) {
		let old = first..first + old_count;
		let carried = self.states.slots[old.end - 1];
		let excluded = self.states.slots[first].excluded;

		let mut fresh = vec![
			BlockSlot {
				state: None,
				excluded,
			};
			new_count
		];
		if let Some(last) = fresh.last_mut() {
			last.state = carried.state;
		}
		self.states.slots.splice(old.clone(), fresh);
		self.highlights.splice(old, std::iter::repeat_n(None, new_count));
	}

	fn propagate(&mut self, dirty: Range<BlockIndex>, cancel: Option<&CancellationToken>) -> RunReport {
		let dirty = match self.stale_from.take() {
			Some(stale) => dirty.start.min(stale)..self.block_count(),
			None => dirty,
		};
		let highlights = &mut self.highlights;
		let report = propagate::run(&self.engine, &self.text, &mut self.states, dirty, cancel, |index, highlight| {
			highlights[index] = Some(highlight);
		});
		self.stale_from = report.resume_at();
		report
	}
}
