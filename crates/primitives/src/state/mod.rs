/// Lexer mode at the end of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexMode {
	/// No construct is left open.
	#[default]
	Normal,
	/// A block comment was opened and not yet terminated.
	InBlockComment,
}

/// State computed at the end of a block and fed to the next one.
///
/// `depth` seeds both the running brace depth and the folding indent of the
/// following block. It is allowed to go negative on malformed input; only
/// the folding display clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndState {
	pub mode: LexMode,
	pub depth: i32,
}

impl EndState {
	/// Prior state of the first block in a document.
	pub const INITIAL: EndState = EndState {
		mode: LexMode::Normal,
		depth: 0,
	};

	pub const fn new(mode: LexMode, depth: i32) -> Self {
		Self { mode, depth }
	}

	pub const fn normal(depth: i32) -> Self {
		Self::new(LexMode::Normal, depth)
	}

	pub const fn in_comment(depth: i32) -> Self {
		Self::new(LexMode::InBlockComment, depth)
	}

	/// Returns true if the block ended inside an open block comment.
	#[inline]
	pub fn in_block_comment(self) -> bool {
		self.mode == LexMode::InBlockComment
	}
}
