use smallvec::SmallVec;

/// Whether a bracket mark opens or closes a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketKind {
	Opened,
	Closed,
}

/// A bracket (or block keyword) position within a block.
///
/// For keyword pairs such as `begin`/`end`, `ch` is the character at
/// `column`: the first character of the opening word and the last character
/// of the closing word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BracketMark {
	pub kind: BracketKind,
	pub ch: char,
	/// Byte offset of `ch` within the block.
	pub column: usize,
}

impl BracketMark {
	pub const fn opened(ch: char, column: usize) -> Self {
		Self {
			kind: BracketKind::Opened,
			ch,
			column,
		}
	}

	pub const fn closed(ch: char, column: usize) -> Self {
		Self {
			kind: BracketKind::Closed,
			ch,
			column,
		}
	}
}

/// Bracket marks of one block. Most lines carry only a handful.
pub type BracketMarks = SmallVec<[BracketMark; 8]>;
