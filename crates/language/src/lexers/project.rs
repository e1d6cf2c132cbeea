use super::cursor::Cursor;
use super::{operator, string};
use crate::macros::MacroCache;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{BlockComment, LanguageKind, TokenizeError, Tokenizer, TokenizerFlags, TokenizerLimits};

const OPERATORS: &[&str] = &["+=", "-=", "*=", "~=", "$$", "=", ":", "|", "!", ",", "$"];

/// Variables understood by the project loader.
pub const VARIABLES: &[&str] = &[
	"BUILD_UNDEFS",
	"CONFIG",
	"DEFINES",
	"INCDIRS",
	"LIBDIRS",
	"LIBEXT",
	"LIBFILES",
	"SRCDIRS",
	"SRCEXT",
	"SRCFILES",
	"TOPMOD",
	"VLTR_ARGS",
	"VLTR_UNDEFS",
	"YOSYS_CMDS",
	"YOSYS_UNDEFS",
];

/// Test and replace functions of the qmake-like project language.
pub const FUNCTIONS: &[&str] = &[
	"CONFIG",
	"basename",
	"break",
	"cat",
	"clear",
	"contains",
	"count",
	"debug",
	"defined",
	"dirname",
	"equals",
	"error",
	"escape_expand",
	"eval",
	"exists",
	"export",
	"files",
	"find",
	"first",
	"fromfile",
	"greaterThan",
	"if",
	"include",
	"infile",
	"isActiveConfig",
	"isEmpty",
	"isEqual",
	"join",
	"last",
	"lessThan",
	"list",
	"load",
	"lower",
	"member",
	"message",
	"next",
	"prompt",
	"quote",
	"re_escape",
	"replace",
	"requires",
	"return",
	"section",
	"split",
	"sprintf",
	"system",
	"unique",
	"unset",
	"upper",
	"warning",
];

fn is_word_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Tokenizer for `.vlpro` project files.
///
/// A function name is only recognized when directly applied (`name(`);
/// `CONFIG` is both a variable and a test function.
#[derive(Debug, Clone, Default)]
pub struct ProjectTokenizer {
	limits: TokenizerLimits,
}

impl ProjectTokenizer {
	pub fn new(limits: TokenizerLimits) -> Self {
		Self { limits }
	}
}

impl Tokenizer for ProjectTokenizer {
	fn language(&self) -> LanguageKind {
		LanguageKind::Project
	}

	fn block_comment(&self) -> Option<BlockComment> {
		None
	}

	fn tokenize(&self, text: &str, flags: TokenizerFlags, _cache: Option<&MacroCache>) -> Result<Vec<Token>, TokenizeError> {
		self.limits.check_len(text)?;
		let mut cur = Cursor::new(text);

		loop {
			cur.skip_whitespace();
			let Some(b) = cur.peek() else { break };
			let start = cur.pos();
			match b {
				b'#' => {
					cur.bump_to_end();
					if !flags.contains(TokenizerFlags::IGNORE_COMMENTS) {
						cur.push(TokenKind::Comment, start);
					}
				}
				b'"' => string(&mut cur),
				b'\\' if cur.rest()[1..].trim().is_empty() => {
					cur.bump(1);
					cur.push(TokenKind::LineCont, start);
					cur.bump_to_end();
				}
				b'(' | b')' | b'[' | b']' | b'{' | b'}' => {
					let kind = match b {
						b'(' => TokenKind::LParen,
						b')' => TokenKind::RParen,
						b'[' => TokenKind::LBrack,
						b']' => TokenKind::RBrack,
						b'{' => TokenKind::LBrace,
						_ => TokenKind::RBrace,
					};
					cur.bump(1);
					cur.push(kind, start);
				}
				b if is_word_byte(b) => {
					cur.eat_while(is_word_byte);
					let word = cur.slice(start);
					let kind = if cur.peek() == Some(b'(') && FUNCTIONS.contains(&word) {
						TokenKind::Function
					} else if VARIABLES.contains(&word) {
						TokenKind::Variable
					} else if word.bytes().all(|b| b.is_ascii_digit()) {
						TokenKind::Number
					} else {
						TokenKind::Ident
					};
					cur.push(kind, start);
				}
				_ => operator(&mut cur, OPERATORS),
			}
		}

		Ok(cur.tokens)
	}
}
