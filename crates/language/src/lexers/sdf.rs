use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::{block_comment, decimal, line_comment, operator, string};
use crate::macros::MacroCache;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{BlockComment, C_BLOCK_COMMENT, LanguageKind, TokenizeError, Tokenizer, TokenizerFlags, TokenizerLimits};

const OPERATORS: &[&str] = &[
	"===", "!==", "==", "!=", "&&", "||", "<=", ">=", "~&", "~|", "~^", "^~", ":", ".", "/", "?", "!", "~", "&", "|", "^", "+",
	"-", "*", "<", ">", "=",
];

/// SDF keywords (IEEE 1497). Matched case-insensitively.
const KEYWORDS: &[&str] = &[
	"ABSOLUTE",
	"ARRIVAL",
	"CCOND",
	"CELL",
	"CELLTYPE",
	"COND",
	"CONDELSE",
	"DATE",
	"DELAY",
	"DELAYFILE",
	"DEPARTURE",
	"DESIGN",
	"DEVICE",
	"DIFF",
	"DIVIDER",
	"EXCEPTION",
	"HOLD",
	"INCREMENT",
	"INSTANCE",
	"INTERCONNECT",
	"IOPATH",
	"NAME",
	"NETDELAY",
	"NOCHANGE",
	"PATHCONSTRAINT",
	"PATHPULSE",
	"PATHPULSEPERCENT",
	"PERIOD",
	"PERIODCONSTRAINT",
	"PORT",
	"PROCESS",
	"PROGRAM",
	"RECOVERY",
	"RECREM",
	"REMOVAL",
	"RETAIN",
	"SCOND",
	"SDFVERSION",
	"SETUP",
	"SETUPHOLD",
	"SKEW",
	"SKEWCONSTRAINT",
	"SLACK",
	"SUM",
	"TEMPERATURE",
	"TIMESCALE",
	"TIMINGCHECK",
	"TIMINGENV",
	"VENDOR",
	"VERSION",
	"VOLTAGE",
	"WAVEFORM",
	"WIDTH",
	"negedge",
	"posedge",
];

fn is_keyword(word: &str) -> bool {
	KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

/// Tokenizer for Standard Delay Format files.
///
/// Parentheses structure the whole file, so they are reported as grouping
/// tokens that the highlighter folds on.
#[derive(Debug, Clone, Default)]
pub struct SdfTokenizer {
	limits: TokenizerLimits,
}

impl SdfTokenizer {
	pub fn new(limits: TokenizerLimits) -> Self {
		Self { limits }
	}
}

impl Tokenizer for SdfTokenizer {
	fn language(&self) -> LanguageKind {
		LanguageKind::Sdf
	}

	fn block_comment(&self) -> Option<BlockComment> {
		Some(C_BLOCK_COMMENT)
	}

	fn tokenize(&self, text: &str, flags: TokenizerFlags, _cache: Option<&MacroCache>) -> Result<Vec<Token>, TokenizeError> {
		self.limits.check_len(text)?;
		let mut cur = Cursor::new(text);

		loop {
			cur.skip_whitespace();
			let Some(b) = cur.peek() else { break };
			let start = cur.pos();
			match b {
				b'/' if cur.peek_at(1) == Some(b'/') => line_comment(&mut cur, flags, false),
				b'/' if cur.peek_at(1) == Some(b'*') => block_comment(&mut cur, flags),
				b'"' => string(&mut cur),
				b'0'..=b'9' => {
					decimal(&mut cur);
					cur.push(TokenKind::Number, start);
				}
				b'(' | b')' | b'[' | b']' => {
					let kind = match b {
						b'(' => TokenKind::GroupOpen,
						b')' => TokenKind::GroupClose,
						b'[' => TokenKind::LBrack,
						_ => TokenKind::RBrack,
					};
					cur.bump(1);
					cur.push(kind, start);
				}
				b'\\' => {
					cur.bump(1);
					cur.bump_char();
					cur.eat_while(|b| is_ident_continue(b) || b == b'\\');
					cur.push(TokenKind::Ident, start);
				}
				b if is_ident_start(b) => {
					// Escaped characters may appear inside hierarchical names.
					while let Some(b) = cur.peek() {
						if b == b'\\' && cur.peek_at(1).is_some_and(|n| !n.is_ascii_whitespace()) {
							cur.bump(1);
							cur.bump_char();
						} else if is_ident_continue(b) {
							cur.bump(1);
						} else {
							break;
						}
					}
					let kind = if is_keyword(cur.slice(start)) { TokenKind::Keyword } else { TokenKind::Ident };
					cur.push(kind, start);
				}
				_ => operator(&mut cur, OPERATORS),
			}
		}

		Ok(cur.tokens)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn lex(text: &str) -> Vec<(TokenKind, &str)> {
		SdfTokenizer::default()
			.tokenize(text, TokenizerFlags::HIGHLIGHT, None)
			.unwrap()
			.into_iter()
			.map(|t| (t.kind, &text[t.start..t.end()]))
			.collect()
	}

	#[test]
	fn header_entry() {
		assert_eq!(
			lex("(DELAYFILE (SDFVERSION \"3.0\")"),
			vec![
				(TokenKind::GroupOpen, "("),
				(TokenKind::Keyword, "DELAYFILE"),
				(TokenKind::GroupOpen, "("),
				(TokenKind::Keyword, "SDFVERSION"),
				(TokenKind::Str, "\"3.0\""),
				(TokenKind::GroupClose, ")"),
			]
		);
	}

	#[test]
	fn iopath_triples() {
		assert_eq!(
			lex("(IOPATH A Y (0.1:0.2:0.3))"),
			vec![
				(TokenKind::GroupOpen, "("),
				(TokenKind::Keyword, "IOPATH"),
				(TokenKind::Ident, "A"),
				(TokenKind::Ident, "Y"),
				(TokenKind::GroupOpen, "("),
				(TokenKind::Number, "0.1"),
				(TokenKind::Operator, ":"),
				(TokenKind::Number, "0.2"),
				(TokenKind::Operator, ":"),
				(TokenKind::Number, "0.3"),
				(TokenKind::GroupClose, ")"),
				(TokenKind::GroupClose, ")"),
			]
		);
	}

	#[test]
	fn keywords_ignore_case_and_names_keep_escapes() {
		assert_eq!(lex("(cell"), vec![(TokenKind::GroupOpen, "("), (TokenKind::Keyword, "cell")]);
		assert_eq!(lex("top.u1\\[3\\].q"), vec![
			(TokenKind::Ident, "top"),
			(TokenKind::Operator, "."),
			(TokenKind::Ident, "u1\\[3\\]"),
			(TokenKind::Operator, "."),
			(TokenKind::Ident, "q"),
		]);
		assert_eq!(lex("a[1]"), vec![(TokenKind::Ident, "a"), (TokenKind::LBrack, "["), (TokenKind::Number, "1"), (TokenKind::RBrack, "]")]);
	}

	#[test]
	fn comments() {
		assert_eq!(lex("// {{{ not a section"), vec![(TokenKind::Comment, "// {{{ not a section")]);
		assert_eq!(lex("(CELL /* open"), vec![
			(TokenKind::GroupOpen, "("),
			(TokenKind::Keyword, "CELL"),
			(TokenKind::CommentOpen, "/*"),
			(TokenKind::Comment, " open"),
		]);
	}
}
