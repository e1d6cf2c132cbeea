//! Automatic insertion of closing delimiters.

use verilume_language::{BlockComment, C_BLOCK_COMMENT, LanguageKind};
use verilume_primitives::EndState;

/// What to do with the text after a typed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairAction {
	/// Closer to insert right of the caret.
	pub insert: Option<char>,
	/// Overtype the lookahead character instead of inserting a duplicate.
	pub skip: bool,
}

/// Auto-pairing rules for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPairs {
	line_comment: &'static str,
	block_comment: Option<BlockComment>,
}

impl Default for AutoPairs {
	fn default() -> Self {
		Self::for_language(LanguageKind::Verilog)
	}
}

impl AutoPairs {
	pub fn for_language(kind: LanguageKind) -> Self {
		match kind {
			LanguageKind::Verilog | LanguageKind::Sdf => Self {
				line_comment: "//",
				block_comment: Some(C_BLOCK_COMMENT),
			},
			LanguageKind::Project => Self {
				line_comment: "#",
				block_comment: None,
			},
		}
	}

	/// Whether the caret at byte `column` of `line` sits in a comment.
	///
	/// `prior` is the end state of the block before `line`; comments opened
	/// or closed earlier on the same line are taken into account.
	pub fn in_comment(&self, prior: EndState, line: &str, column: usize) -> bool {
		let mut rest = line.get(..column).unwrap_or(line);
		let mut in_block = prior.in_block_comment();
		loop {
			if in_block {
				let Some(close) = self.block_comment.map(|comment| comment.close) else {
					return true;
				};
				match rest.find(close) {
					Some(at) => {
						rest = &rest[at + close.len()..];
						in_block = false;
					}
					None => return true,
				}
				continue;
			}

			let line_at = rest.find(self.line_comment);
			let open = self.block_comment.and_then(|comment| rest.find(comment.open).map(|at| (at, comment.open.len())));
			match (line_at, open) {
				(Some(line_at), Some((open_at, _))) if line_at < open_at => return true,
				(_, Some((open_at, len))) => {
					rest = &rest[open_at + len..];
					in_block = true;
				}
				(Some(_), None) => return true,
				(None, None) => return false,
			}
		}
	}

	/// Whether typing `inserted` may trigger pairing at all.
	pub fn allows_auto_pair(&self, prior: EndState, line: &str, column: usize, inserted: char) -> bool {
		!self.in_comment(prior, line, column) && matches!(inserted, '"' | '(' | '[' | '{' | ')' | ']' | '}')
	}

	/// Closer or overtype for `inserted` given the character right of the caret.
	pub fn insert_matching(&self, inserted: char, lookahead: Option<char>) -> PairAction {
		match inserted {
			'(' => PairAction {
				insert: Some(')'),
				skip: false,
			},
			'[' => PairAction {
				insert: Some(']'),
				skip: false,
			},
			'{' => PairAction {
				insert: Some('}'),
				skip: false,
			},
			'"' if lookahead == Some('"') => PairAction { insert: None, skip: true },
			'"' => PairAction {
				insert: Some('"'),
				skip: false,
			},
			')' | ']' | '}' | ';' => PairAction {
				insert: None,
				skip: lookahead == Some(inserted),
			},
			_ => PairAction::default(),
		}
	}
}
