/// Folding information for one block.
///
/// `indent` tracks nesting alongside the brace depth but diverges from it
/// under `else`-style directives and the first/last-token rules of the
/// engine. It may be negative on malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldInfo {
	pub indent: i32,
	/// The block's own line belongs to the region it opens.
	pub start_included: bool,
	/// The block's own line belongs to the region it closes.
	pub end_included: bool,
}

impl FoldInfo {
	pub const fn new(indent: i32) -> Self {
		Self {
			indent,
			start_included: false,
			end_included: false,
		}
	}

	/// Indent used for display, clamped to zero.
	#[inline]
	pub fn display_indent(&self) -> u32 {
		self.indent.max(0) as u32
	}
}
