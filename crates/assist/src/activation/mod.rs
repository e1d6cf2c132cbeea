//! Completion activation.
//!
//! The matcher looks at the characters left of the caret and decides
//! whether completion should open, which lookup applies and where the
//! replaceable prefix starts.

use verilume_language::CompletionConfig;

/// Lookup a completion request routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
	/// Identifiers in scope at the caret.
	PlainIdent,
	/// Macro names, after the macro introducer.
	Macro,
	/// Members of the expression left of a `.`.
	DotExpansion,
}

/// Result of an activation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
	NoActivation,
	Activate {
		kind: ActivationKind,
		/// Char index into the inspected text where the prefix starts.
		prefix_start: usize,
	},
}

impl Activation {
	pub fn is_active(&self) -> bool {
		matches!(self, Self::Activate { .. })
	}

	/// Single-integer encoding for hosts that expect it: `1` for no
	/// activation, otherwise the non-positive offset of the prefix start
	/// from the end of a text of `len` chars.
	pub fn legacy_offset(&self, len: usize) -> isize {
		match *self {
			Self::NoActivation => 1,
			Self::Activate { prefix_start, .. } => prefix_start as isize - len as isize,
		}
	}
}

/// Decides from trailing keystrokes whether and where completion triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSequenceMatcher {
	window_len: usize,
	min_prefix_len: usize,
	macro_introducer: char,
	extra_ident_char: char,
}

impl Default for ActivationSequenceMatcher {
	fn default() -> Self {
		Self::from_config(&CompletionConfig::default())
	}
}

impl ActivationSequenceMatcher {
	pub fn from_config(config: &CompletionConfig) -> Self {
		Self {
			window_len: config.window_len,
			min_prefix_len: config.min_prefix_len,
			macro_introducer: config.macro_introducer,
			extra_ident_char: config.extra_ident_char,
		}
	}

	/// Identifier constituent: letter, digit, `_` or the extra symbol.
	pub fn is_continuation_char(&self, ch: char) -> bool {
		ch.is_alphanumeric() || ch == '_' || ch == self.extra_ident_char
	}

	pub fn is_ident_start(&self, ch: char) -> bool {
		ch.is_alphabetic() || ch == '_' || ch == self.extra_ident_char
	}

	/// Scans `window` right to left.
	///
	/// A `.` or the macro introducer activates with the prefix right after
	/// it. Otherwise identifier characters are consumed until a boundary; the
	/// match activates when at least `min_len` characters were consumed and
	/// the first of them can start an identifier. Running off the left end
	/// of the window never activates.
	pub fn check(&self, window: &str, min_len: usize) -> Activation {
		let chars: Vec<char> = window.chars().collect();
		let mut consumed = 0;

		for (at, &ch) in chars.iter().enumerate().rev() {
			let kind = if ch == '.' {
				Some(ActivationKind::DotExpansion)
			} else if ch == self.macro_introducer {
				Some(ActivationKind::Macro)
			} else {
				None
			};
			if let Some(kind) = kind {
				return Activation::Activate { kind, prefix_start: at + 1 };
			}
			if self.is_continuation_char(ch) {
				consumed += 1;
				continue;
			}

			if consumed < min_len {
				return Activation::NoActivation;
			}
			return match chars.get(at + 1) {
				Some(&next) if self.is_ident_start(next) => Activation::Activate {
					kind: ActivationKind::PlainIdent,
					prefix_start: at + 1,
				},
				_ => Activation::NoActivation,
			};
		}

		Activation::NoActivation
	}

	/// Checks the text of a line left of the caret. The start of the line
	/// counts as a boundary.
	pub fn check_line(&self, line_before_caret: &str, min_len: usize) -> Activation {
		let padded = format!(" {line_before_caret}");
		let activation = match self.check(&padded, min_len) {
			Activation::Activate { kind, prefix_start } => Activation::Activate {
				kind,
				prefix_start: prefix_start.saturating_sub(1),
			},
			Activation::NoActivation => Activation::NoActivation,
		};
		tracing::trace!(?activation, min_len, "completion activation");
		activation
	}

	/// Per-keystroke check over the last `window_len` chars of `text`.
	pub fn is_activation_sequence(&self, text: &str) -> bool {
		let skip = text.chars().count().saturating_sub(self.window_len);
		let start = text.char_indices().nth(skip).map_or(text.len(), |(at, _)| at);
		self.check(&text[start..], self.min_prefix_len).is_active()
	}
}
