//! Drives propagation through a host-defined store.

use std::borrow::Cow;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use verilume_language::{LanguageContext, SdfTokenizer, VerilogTokenizer};
use verilume_primitives::{BlockIndex, EndState};
use verilume_syntax::{BlockHighlight, BlockSource, BlockStateStore, HighlightEngine, RunOutcome, propagate};

/// Store that records every write, like an editor keeping states in its own block user data.
#[derive(Default)]
struct RecordingStore {
	states: Vec<Option<EndState>>,
	excluded: Vec<BlockIndex>,
	writes: Vec<BlockIndex>,
}

impl RecordingStore {
	fn with_len(len: usize) -> Self {
		Self {
			states: vec![None; len],
			..Self::default()
		}
	}
}

impl BlockStateStore for RecordingStore {
	fn stored_state(&self, index: BlockIndex) -> Option<EndState> {
		self.states.get(index).copied().flatten()
	}

	fn set_state(&mut self, index: BlockIndex, state: EndState) {
		self.states[index] = Some(state);
		self.writes.push(index);
	}

	fn is_excluded(&self, index: BlockIndex) -> bool {
		self.excluded.contains(&index)
	}
}

fn verilog() -> HighlightEngine {
	HighlightEngine::new(Arc::new(VerilogTokenizer::default()), Arc::new(LanguageContext::new()))
}

#[test]
fn slices_are_block_sources() {
	let lines = ["begin", "end"];
	assert_eq!(lines.block_count(), 2);
	assert_eq!(lines.block_text(1), Cow::Borrowed("end"));
	assert_eq!(lines.block_text(7), "");
}

#[test]
fn full_pass_then_converging_edit() {
	let engine = verilog();
	let mut lines = vec!["begin".to_owned(), "/* a".to_owned(), "b */".to_owned(), "end".to_owned(), "x;".to_owned()];
	let mut store = RecordingStore::with_len(lines.len());
	let mut seen = Vec::new();

	let report = propagate::run(&engine, &lines, &mut store, 0..lines.len(), None, |index, _| seen.push(index));
	assert_eq!(report.outcome, RunOutcome::EndOfDocument);
	assert_eq!(seen, vec![0, 1, 2, 3, 4]);
	assert_eq!(store.stored_state(1), Some(EndState::in_comment(2)));
	assert_eq!(store.prior_state(0), EndState::INITIAL);
	assert_eq!(store.prior_state(4), EndState::normal(0));

	lines[1] = "/* changed".to_owned();
	store.writes.clear();
	let report = propagate::run(&engine, &lines, &mut store, 1..2, None, |_, _| {});
	assert_eq!(report.outcome, RunOutcome::Converged { at: 1 });
	assert_eq!(store.writes, vec![1]);
}

#[test]
fn rerun_over_unchanged_text_is_a_fixed_point() {
	let engine = verilog();
	let lines = [
		"module top;",
		"  /* multi",
		"     line */ always @(posedge clk) begin",
		"`ifdef SIM",
		"    q <= d;",
		"`endif",
		"  end",
		"endmodule",
	];
	let mut store = RecordingStore::with_len(lines.len());
	let first = propagate::run(&engine, &lines[..], &mut store, 0..lines.len(), None, |_, _| {});
	assert_eq!(first.outcome, RunOutcome::EndOfDocument);
	let settled = store.states.clone();

	let mut outputs = Vec::new();
	let again = propagate::run(&engine, &lines[..], &mut store, 0..lines.len(), None, |index, block| outputs.push((index, block)));
	assert_eq!(again.outcome, RunOutcome::Converged { at: lines.len() - 1 });
	assert_eq!(again.processed, lines.len());
	assert_eq!(store.states, settled);
	for (index, block) in outputs {
		assert_eq!(Some(block.state), settled[index]);
		assert_eq!(block, engine.highlight(lines[index], store.prior_state(index), false));
	}

	let single = propagate::run(&engine, &lines[..], &mut store, 0..1, None, |_, _| {});
	assert_eq!(single.outcome, RunOutcome::Converged { at: 0 });
	assert_eq!(single.processed, 1);
	assert_eq!(store.states, settled);
}

#[test]
fn dirty_range_is_always_processed() {
	let engine = verilog();
	let lines = ["a;", "b;", "c;", "d;"];
	let mut store = RecordingStore::with_len(lines.len());
	propagate::run(&engine, &lines[..], &mut store, 0..4, None, |_, _| {});

	store.writes.clear();
	let report = propagate::run(&engine, &lines[..], &mut store, 1..3, None, |_, _| {});
	assert_eq!(report.outcome, RunOutcome::Converged { at: 2 });
	assert_eq!(store.writes, vec![1, 2]);
}

#[test]
fn exclusion_comes_from_the_store() {
	let engine = verilog();
	let lines = ["`ifdef X", "begin", "`endif"];
	let mut store = RecordingStore::with_len(lines.len());
	store.excluded.push(1);
	let mut highlights: Vec<BlockHighlight> = Vec::new();
	propagate::run(&engine, &lines[..], &mut store, 0..3, None, |_, block| highlights.push(block));
	assert_eq!(store.stored_state(2), Some(EndState::normal(0)));
	assert_eq!(highlights[1].brackets.len(), 1);
}

#[test]
fn cancellation_stops_before_next_block() {
	let engine = HighlightEngine::new(Arc::new(SdfTokenizer::default()), Arc::new(LanguageContext::new()));
	let lines = ["(DELAYFILE", "(CELL", ")", ")"];
	let mut store = RecordingStore::with_len(lines.len());
	let cancel = CancellationToken::new();

	let report = propagate::run(&engine, &lines[..], &mut store, 0..4, Some(&cancel), |index, _| {
		if index == 1 {
			cancel.cancel();
		}
	});
	assert_eq!(report.outcome, RunOutcome::Cancelled { next: 2 });
	assert_eq!(report.resume_at(), Some(2));
	assert_eq!(report.processed, 2);
	assert_eq!(store.stored_state(2), None);

	let report = propagate::run(&engine, &lines[..], &mut store, 2..4, None, |_, _| {});
	assert_eq!(report.outcome, RunOutcome::EndOfDocument);
	assert_eq!(store.stored_state(3), Some(EndState::normal(0)));
}
