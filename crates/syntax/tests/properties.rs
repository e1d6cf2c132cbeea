//! Property tests for incremental highlighting.

use std::sync::Arc;

use proptest::prelude::*;
use verilume_language::{LanguageContext, VerilogTokenizer};
use verilume_primitives::{EndState, LexMode};
use verilume_syntax::{Document, HighlightEngine};

const LINES: &[&str] = &[
	"",
	"module m(input a);",
	"endmodule",
	"always @(*) begin",
	"begin",
	"end",
	"end else begin",
	"  x = {a, b[3:0]};",
	"/* open",
	"still inside",
	"close */ y = 1;",
	"/* whole */ z;",
	"`ifdef SYNTH",
	"`else",
	"`endif",
	"// {{{ ports",
	"// }}}",
	"fork join",
	"case (s) 2'b01: q <= 1; endcase",
	"$display(\"/* not */\");",
];

fn engine() -> HighlightEngine {
	HighlightEngine::new(Arc::new(VerilogTokenizer::default()), Arc::new(LanguageContext::new()))
}

fn arb_lines() -> impl Strategy<Value = Vec<&'static str>> {
	prop::collection::vec(prop::sample::select(LINES), 1..24)
}

fn arb_prior() -> impl Strategy<Value = EndState> {
	(any::<bool>(), -4i32..12).prop_map(|(in_comment, depth)| {
		EndState::new(if in_comment { LexMode::InBlockComment } else { LexMode::Normal }, depth)
	})
}

fn highlighted(lines: &[&str]) -> Document {
	let mut doc = Document::new(engine(), &lines.join("\n"));
	doc.highlight_all();
	doc
}

fn states(doc: &Document) -> Vec<Option<EndState>> {
	(0..doc.block_count()).map(|i| doc.state(i)).collect()
}

proptest! {
	/// Incremental results equal a from-scratch pass after any sequence of block edits.
	#[test]
	fn prop_incremental_matches_fresh(
		lines in arb_lines(),
		edits in prop::collection::vec((any::<prop::sample::Index>(), prop::sample::select(LINES)), 1..8),
	) {
		let mut doc = highlighted(&lines);
		let mut current: Vec<&str> = lines.clone();
		for (at, text) in edits {
			let index = at.index(current.len());
			doc.replace_block(index, text).unwrap();
			current[index] = text;
		}

		let fresh = highlighted(&current);
		prop_assert_eq!(states(&doc), states(&fresh));
		for index in 0..doc.block_count() {
			prop_assert_eq!(doc.block(index), fresh.block(index));
		}
	}

	/// Editing block `i` never changes the end state of an earlier block.
	#[test]
	fn prop_edits_are_local(lines in arb_lines(), at in any::<prop::sample::Index>(), text in prop::sample::select(LINES)) {
		let mut doc = highlighted(&lines);
		let index = at.index(lines.len());
		let before = states(&doc);
		let report = doc.replace_block(index, text).unwrap();
		prop_assert!(report.processed >= 1);
		prop_assert_eq!(&states(&doc)[..index], &before[..index]);
	}

	/// Depth after a run of lines is the same whether the run is excluded block by block or not at all,
	/// as long as every excluded block restores its carried-in depth.
	#[test]
	fn prop_excluded_blocks_keep_depth(lines in arb_lines(), depth in 0i32..6) {
		let engine = engine();
		let mut prior = EndState::normal(depth);
		for line in &lines {
			let block = engine.highlight(line, prior, true);
			prop_assert_eq!(block.state.depth, prior.depth);
			prop_assert_eq!(block.fold.indent, prior.depth);
			prior = block.state;
		}
	}

	/// Spans stay inside the block, in order and non-overlapping.
	#[test]
	fn prop_spans_are_ordered(lines in arb_lines()) {
		let doc = highlighted(&lines);
		for (index, line) in lines.iter().enumerate() {
			let block = doc.block(index).unwrap();
			let mut end = 0;
			for span in &block.spans {
				prop_assert!(span.start >= end);
				prop_assert!(span.end() <= line.len());
				end = span.end();
			}
			let columns: Vec<usize> = block.brackets.iter().map(|mark| mark.column).collect();
			prop_assert!(columns.windows(2).all(|pair| pair[0] < pair[1]));
		}
	}

	/// Arbitrary printable lines never panic the engine and keep spans inside the text.
	#[test]
	fn prop_arbitrary_lines(text in "[ -~]{0,64}", prior in arb_prior(), excluded in any::<bool>()) {
		let block = engine().highlight(&text, prior, excluded);
		let mut end = 0;
		for span in &block.spans {
			prop_assert!(span.start >= end && span.len > 0);
			prop_assert!(span.slice(&text).is_some());
			end = span.end();
		}
		if excluded {
			prop_assert_eq!(block.state.depth, prior.depth);
		}
	}
}
