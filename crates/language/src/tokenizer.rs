use thiserror::Error;

use crate::macros::MacroCache;
use crate::token::Token;

bitflags::bitflags! {
	/// Options selecting how much lexical structure a tokenizer exposes.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct TokenizerFlags: u8 {
		/// Emit a block comment as one `Comment` token instead of
		/// opener, text and terminator.
		const PACK_COMMENTS = 1 << 0;
		/// Drop comment tokens entirely.
		const IGNORE_COMMENTS = 1 << 1;
		/// Emit an attribute instance as one `Attribute` token.
		const PACK_ATTRIBUTES = 1 << 2;
		/// Drop attribute instances entirely.
		const IGNORE_ATTRIBUTES = 1 << 3;
		/// Emit a `MacroUsage` token before the expansion of a macro.
		const SEND_MACRO_USAGE = 1 << 4;
	}
}

impl TokenizerFlags {
	/// Flags used for highlighting: every structurally relevant token is
	/// individually observable.
	pub const HIGHLIGHT: TokenizerFlags = TokenizerFlags::SEND_MACRO_USAGE;
}

/// Errors raised by a tokenizer.
///
/// Hosts are expected to degrade gracefully: a block whose tokenization
/// fails is rendered unformatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
	#[error("macro `{name}` exceeds the expansion depth limit of {depth}")]
	MacroRecursion { name: String, depth: usize },
	#[error("block of {len} bytes exceeds the limit of {max} bytes")]
	BlockTooLong { len: usize, max: usize },
}

/// Literal delimiters of a language's block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockComment {
	pub open: &'static str,
	pub close: &'static str,
}

/// C-style `/* */` comments.
pub const C_BLOCK_COMMENT: BlockComment = BlockComment { open: "/*", close: "*/" };

/// The languages with a built-in front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
	Verilog,
	Sdf,
	Project,
}

impl LanguageKind {
	pub const ALL: [LanguageKind; 3] = [LanguageKind::Verilog, LanguageKind::Sdf, LanguageKind::Project];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Verilog => "verilog",
			Self::Sdf => "sdf",
			Self::Project => "project",
		}
	}
}

/// Converts block text into an ordered token stream.
///
/// Implementations must be deterministic for identical `(text, flags,
/// cache)` and must never panic on malformed input.
pub trait Tokenizer: Send + Sync {
	fn language(&self) -> LanguageKind;

	/// Block comment delimiters, if the language has block comments.
	fn block_comment(&self) -> Option<BlockComment>;

	fn tokenize(&self, text: &str, flags: TokenizerFlags, cache: Option<&MacroCache>) -> Result<Vec<Token>, TokenizeError>;
}

/// Limits applied by the built-in tokenizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerLimits {
	pub max_block_len: usize,
	pub max_macro_depth: usize,
}

impl Default for TokenizerLimits {
	fn default() -> Self {
		Self {
			max_block_len: 16 * 1024,
			max_macro_depth: 8,
		}
	}
}

impl TokenizerLimits {
	pub(crate) fn check_len(&self, text: &str) -> Result<(), TokenizeError> {
		if text.len() > self.max_block_len {
			return Err(TokenizeError::BlockTooLong {
				len: text.len(),
				max: self.max_block_len,
			});
		}
		Ok(())
	}
}
