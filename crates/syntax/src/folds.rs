//! Fold regions derived from per-block fold indents.

use verilume_primitives::{BlockIndex, FoldInfo};

/// A collapsible range of blocks.
///
/// `header` stays visible when folded; blocks `header + 1 ..= end` are
/// hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldRegion {
	pub header: BlockIndex,
	pub end: BlockIndex,
}

/// How an open region ends.
#[derive(Debug, Clone, Copy)]
enum Opener {
	/// Header followed by a deeper block; ends before the next block at or
	/// below the header's indent.
	Indent(u32),
	/// Block whose own line opens the construct; ends at the matching
	/// closing line or before the first shallower block.
	Included(u32),
}

impl Opener {
	fn ends_before(self, indent: u32) -> bool {
		match self {
			Self::Indent(level) => level >= indent,
			Self::Included(level) => level > indent,
		}
	}
}

/// Computes fold regions, ordered by header.
///
/// A block whose line opens a construct (`start_included`) heads a region
/// that runs through the block closing it (`end_included` at the same
/// indent). Any other block is a header when the next block is deeper and
/// does not open its own region; that region runs over every following
/// block with a greater indent. Negative indents count as zero.
pub fn fold_regions(folds: &[FoldInfo]) -> Vec<FoldRegion> {
	let mut regions = Vec::new();
	let mut open: Vec<(BlockIndex, Opener)> = Vec::new();

	for (index, fold) in folds.iter().enumerate() {
		let indent = fold.display_indent();
		while let Some(&(header, opener)) = open.last() {
			if !opener.ends_before(indent) {
				break;
			}
			open.pop();
			regions.push(FoldRegion { header, end: index - 1 });
		}
		if fold.end_included
			&& let Some(&(header, Opener::Included(level))) = open.last()
			&& level == indent
		{
			open.pop();
			regions.push(FoldRegion { header, end: index });
		}

		let Some(next) = folds.get(index + 1) else {
			continue;
		};
		if fold.start_included && !fold.end_included && next.display_indent() >= indent {
			open.push((index, Opener::Included(indent)));
		} else if !next.start_included && next.display_indent() > indent {
			open.push((index, Opener::Indent(indent)));
		}
	}

	let last = folds.len().saturating_sub(1);
	regions.extend(open.into_iter().map(|(header, _)| FoldRegion { header, end: last }));
	regions.sort_unstable_by_key(|region| region.header);
	regions
}
