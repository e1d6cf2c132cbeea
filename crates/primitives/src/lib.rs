//! Value types exchanged between the highlighting engine and its host:
//! per-block end states, rendered spans, bracket marks and fold info.

/// Bracket marks consumed by the host's bracket matcher.
pub mod bracket;
/// Per-block folding information.
pub mod fold;
/// Rendered spans and their categories.
pub mod span;
/// Lexer end state carried from one block to the next.
pub mod state;

pub use bracket::{BracketKind, BracketMark, BracketMarks};
pub use fold::FoldInfo;
pub use span::{Category, Span};
pub use state::{EndState, LexMode};

/// Index of a block (one editor line) within a document.
pub type BlockIndex = usize;
