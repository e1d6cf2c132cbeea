//! Bracket matching across blocks.
//!
//! Literal brackets pair with their counterpart character; keyword marks
//! (`begin`/`end` and friends) pair with any other keyword mark.

use verilume_primitives::{BlockIndex, BracketKind, BracketMark};

/// Location of a bracket mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracketPos {
	pub block: BlockIndex,
	pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
	Paren,
	Square,
	Curly,
	Keyword,
}

fn family(ch: char) -> Family {
	match ch {
		'(' | ')' => Family::Paren,
		'[' | ']' => Family::Square,
		'{' | '}' => Family::Curly,
		_ => Family::Keyword,
	}
}

/// Finds the mark paired with the one at `at`.
///
/// `marks` returns the bracket marks of a block, in column order. Returns
/// `None` when there is no mark at `at` or it is unbalanced.
pub fn match_bracket<'a, F>(block_count: usize, marks: F, at: BracketPos) -> Option<BracketPos>
where
	F: Fn(BlockIndex) -> &'a [BracketMark],
{
	let line = marks(at.block);
	let here = line.iter().position(|mark| mark.column == at.column)?;
	let origin = line[here];
	let wanted = family(origin.ch);
	let mut depth = 0usize;

	let mut step = |block: BlockIndex, mark: &BracketMark| -> Option<BracketPos> {
		if family(mark.ch) != wanted {
			return None;
		}
		if mark.kind == origin.kind {
			depth += 1;
			return None;
		}
		if depth == 0 {
			return Some(BracketPos { block, column: mark.column });
		}
		depth -= 1;
		None
	};

	match origin.kind {
		BracketKind::Opened => {
			if let Some(found) = line[here + 1..].iter().find_map(|mark| step(at.block, mark)) {
				return Some(found);
			}
			(at.block + 1..block_count).find_map(|block| marks(block).iter().find_map(|mark| step(block, mark)))
		}
		BracketKind::Closed => {
			if let Some(found) = line[..here].iter().rev().find_map(|mark| step(at.block, mark)) {
				return Some(found);
			}
			(0..at.block).rev().find_map(|block| marks(block).iter().rev().find_map(|mark| step(block, mark)))
		}
	}
}

#[cfg(test)]
mod tests {
	use verilume_primitives::BracketMarks;

	use super::*;

	fn pos(block: BlockIndex, column: usize) -> BracketPos {
		BracketPos { block, column }
	}

	fn document() -> Vec<BracketMarks> {
		// begin (a[0]
		// ) begin end
		// end
		vec![
			BracketMarks::from_slice(&[
				BracketMark::opened('b', 0),
				BracketMark::opened('(', 6),
				BracketMark::opened('[', 8),
				BracketMark::closed(']', 10),
			]),
			BracketMarks::from_slice(&[BracketMark::closed(')', 0), BracketMark::opened('b', 2), BracketMark::closed('d', 10)]),
			BracketMarks::from_slice(&[BracketMark::closed('d', 2)]),
		]
	}

	fn find(doc: &[BracketMarks], at: BracketPos) -> Option<BracketPos> {
		match_bracket(doc.len(), |block| doc[block].as_slice(), at)
	}

	#[test]
	fn matches_within_and_across_blocks() {
		let doc = document();
		assert_eq!(find(&doc, pos(0, 8)), Some(pos(0, 10)));
		assert_eq!(find(&doc, pos(0, 6)), Some(pos(1, 0)));
		assert_eq!(find(&doc, pos(1, 0)), Some(pos(0, 6)));
	}

	#[test]
	fn keyword_marks_nest() {
		let doc = document();
		assert_eq!(find(&doc, pos(0, 0)), Some(pos(2, 2)));
		assert_eq!(find(&doc, pos(2, 2)), Some(pos(0, 0)));
		assert_eq!(find(&doc, pos(1, 2)), Some(pos(1, 10)));
	}

	#[test]
	fn no_mark_or_unbalanced() {
		let doc = document();
		assert_eq!(find(&doc, pos(0, 1)), None);
		let open = vec![BracketMarks::from_slice(&[BracketMark::opened('(', 0)])];
		assert_eq!(find(&open, pos(0, 0)), None);
	}
}
