//! Incremental line highlighting.
//!
//! A document is a sequence of blocks (lines). [`HighlightEngine`] turns one
//! block plus the end state of the block before it into category spans,
//! bracket marks, fold info and a new end state. [`propagate::run`] pushes
//! an edit forward until end states stop changing, and [`Document`] is a
//! rope-backed host that keeps all of this current across edits.

pub mod brackets;
pub mod document;
pub mod engine;
pub mod folds;
pub mod propagate;
pub mod store;

pub use brackets::{BracketPos, match_bracket};
pub use document::{BlockStates, BlockText, Document};
pub use engine::{BlockHighlight, HighlightEngine};
pub use folds::{FoldRegion, fold_regions};
pub use propagate::{RunOutcome, RunReport};
pub use store::{BlockSource, BlockStateStore, DocumentError};
