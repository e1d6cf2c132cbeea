use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::{block_comment, decimal, line_comment, operator, string};
use crate::macros::MacroCache;
use crate::token::{Directive, Token, TokenKind};
use crate::tokenizer::{BlockComment, C_BLOCK_COMMENT, LanguageKind, TokenizeError, Tokenizer, TokenizerFlags, TokenizerLimits};

/// Operators ordered longest first.
const OPERATORS: &[&str] = &[
	"<<<", ">>>", "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "**", "<<", ">>", "~&", "~|", "~^", "^~", "->", "+:", "-:", "+",
	"-", "*", "/", "%", "<", ">", "!", "~", "&", "|", "^", "?", ":", "=", ",", ".", "#", "@", "'",
];

/// Classifies a Verilog (IEEE 1364-2005) reserved word.
fn reserved(word: &str) -> Option<TokenKind> {
	let kind = match word {
		"begin" | "fork" | "module" | "macromodule" | "primitive" | "function" | "task" | "case" | "casex" | "casez"
		| "generate" | "specify" | "table" | "config" => TokenKind::BlockBegin,
		"end" | "join" | "endmodule" | "endprimitive" | "endfunction" | "endtask" | "endcase" | "endgenerate"
		| "endspecify" | "endtable" | "endconfig" => TokenKind::BlockEnd,
		"wire" | "reg" | "integer" | "real" | "realtime" | "time" | "tri" | "tri0" | "tri1" | "triand" | "trior"
		| "trireg" | "wand" | "wor" | "uwire" | "supply0" | "supply1" | "genvar" | "event" | "parameter" | "localparam"
		| "specparam" | "defparam" | "signed" | "unsigned" => TokenKind::TypeKeyword,
		"always" | "and" | "assign" | "automatic" | "buf" | "bufif0" | "bufif1" | "cell" | "cmos" | "deassign"
		| "default" | "design" | "disable" | "edge" | "else" | "for" | "force" | "forever" | "highz0" | "highz1" | "if"
		| "ifnone" | "incdir" | "include" | "initial" | "inout" | "input" | "instance" | "large" | "liblist"
		| "library" | "medium" | "nand" | "negedge" | "nmos" | "nor" | "noshowcancelled" | "not" | "notif0"
		| "notif1" | "or" | "output" | "pmos" | "posedge" | "pull0" | "pull1" | "pulldown" | "pullup"
		| "pulsestyle_ondetect" | "pulsestyle_onevent" | "rcmos" | "release" | "repeat" | "rnmos" | "rpmos"
		| "rtran" | "rtranif0" | "rtranif1" | "scalared" | "showcancelled" | "small" | "strong0" | "strong1"
		| "tran" | "tranif0" | "tranif1" | "use" | "vectored" | "wait" | "weak0" | "weak1" | "while" | "xnor"
		| "xor" => TokenKind::Keyword,
		_ => return None,
	};
	Some(kind)
}

/// Tokenizer for Verilog sources.
#[derive(Debug, Clone, Default)]
pub struct VerilogTokenizer {
	limits: TokenizerLimits,
}

impl VerilogTokenizer {
	pub fn new(limits: TokenizerLimits) -> Self {
		Self { limits }
	}

	fn scan(&self, text: &str, flags: TokenizerFlags, cache: Option<&MacroCache>, depth: usize) -> Result<Vec<Token>, TokenizeError> {
		let mut cur = Cursor::new(text);
		let mut open_attrs = 0usize;

		loop {
			cur.skip_whitespace();
			let Some(b) = cur.peek() else { break };
			let start = cur.pos();
			match b {
				b'/' if cur.peek_at(1) == Some(b'/') => line_comment(&mut cur, flags, true),
				b'/' if cur.peek_at(1) == Some(b'*') => block_comment(&mut cur, flags),
				b'(' if cur.peek_at(1) == Some(b'*') && cur.peek_at(2) != Some(b')') => {
					if flags.intersects(TokenizerFlags::PACK_ATTRIBUTES | TokenizerFlags::IGNORE_ATTRIBUTES) {
						match cur.rest().find("*)") {
							Some(offset) => cur.bump(offset + 2),
							None => cur.bump_to_end(),
						}
						if !flags.contains(TokenizerFlags::IGNORE_ATTRIBUTES) {
							cur.push(TokenKind::Attribute, start);
						}
					} else {
						open_attrs += 1;
						cur.bump(2);
						cur.push(TokenKind::AttrOpen, start);
					}
				}
				b'*' if cur.peek_at(1) == Some(b')') && open_attrs > 0 => {
					open_attrs -= 1;
					cur.bump(2);
					cur.push(TokenKind::AttrClose, start);
				}
				b'"' => string(&mut cur),
				b'`' => self.directive(&mut cur, flags, cache, depth)?,
				b'$' if cur.peek_at(1).is_some_and(is_ident_continue) => {
					cur.bump(1);
					cur.eat_while(is_ident_continue);
					cur.push(TokenKind::SystemName, start);
				}
				b'\\' => {
					cur.bump(1);
					if cur.at_blank_tail() {
						cur.push(TokenKind::LineCont, start);
						cur.bump_to_end();
					} else {
						while let Some(c) = cur.rest().chars().next() {
							if c.is_whitespace() {
								break;
							}
							cur.bump_char();
						}
						cur.push(TokenKind::Ident, start);
					}
				}
				b'0'..=b'9' => {
					decimal(&mut cur);
					based_suffix(&mut cur);
					cur.push(TokenKind::Number, start);
				}
				b'\'' if is_base_at(&cur, 1) => {
					based_suffix(&mut cur);
					cur.push(TokenKind::Number, start);
				}
				b if is_ident_start(b) => {
					cur.eat_while(is_ident_continue);
					let kind = reserved(cur.slice(start)).unwrap_or(TokenKind::Ident);
					cur.push(kind, start);
				}
				b'(' => bracket(&mut cur, TokenKind::LParen),
				b')' => bracket(&mut cur, TokenKind::RParen),
				b'[' => bracket(&mut cur, TokenKind::LBrack),
				b']' => bracket(&mut cur, TokenKind::RBrack),
				b'{' => bracket(&mut cur, TokenKind::LBrace),
				b'}' => bracket(&mut cur, TokenKind::RBrace),
				b';' => bracket(&mut cur, TokenKind::Semi),
				_ => operator(&mut cur, OPERATORS),
			}
		}

		Ok(cur.tokens)
	}

	/// Scans a compiler directive or a macro usage at the cursor.
	fn directive(&self, cur: &mut Cursor<'_>, flags: TokenizerFlags, cache: Option<&MacroCache>, depth: usize) -> Result<(), TokenizeError> {
		let start = cur.pos();
		cur.bump(1);
		let name_start = cur.pos();
		cur.eat_while(is_ident_continue);
		let name = cur.slice(name_start);

		if name.is_empty() {
			cur.push(TokenKind::Invalid, start);
			return Ok(());
		}
		if let Some(directive) = Directive::from_name(name) {
			cur.push(TokenKind::Directive(directive), start);
			return Ok(());
		}

		let body = cache.and_then(|cache| cache.get(name));
		if flags.contains(TokenizerFlags::SEND_MACRO_USAGE) || body.is_none() {
			cur.push(TokenKind::MacroUsage, start);
		}
		let Some(body) = body else {
			return Ok(());
		};

		if depth >= self.limits.max_macro_depth {
			return Err(TokenizeError::MacroRecursion {
				name: name.to_owned(),
				depth: self.limits.max_macro_depth,
			});
		}
		let usage_len = cur.pos() - start;
		let expansion = self.scan(body, flags - TokenizerFlags::SEND_MACRO_USAGE, cache, depth + 1)?;
		cur.tokens.extend(expansion.into_iter().map(|token| Token {
			start,
			len: usage_len,
			substituted: true,
			..token
		}));
		Ok(())
	}
}

impl Tokenizer for VerilogTokenizer {
	fn language(&self) -> LanguageKind {
		LanguageKind::Verilog
	}

	fn block_comment(&self) -> Option<BlockComment> {
		Some(C_BLOCK_COMMENT)
	}

	fn tokenize(&self, text: &str, flags: TokenizerFlags, cache: Option<&MacroCache>) -> Result<Vec<Token>, TokenizeError> {
		self.limits.check_len(text)?;
		self.scan(text, flags, cache, 0)
	}
}

fn bracket(cur: &mut Cursor<'_>, kind: TokenKind) {
	let start = cur.pos();
	cur.bump(1);
	cur.push(kind, start);
}

/// Returns true if a base specifier (`'h`, `'sb`, ...) starts `n` bytes after
/// the cursor's `'`.
fn is_base_at(cur: &Cursor<'_>, n: usize) -> bool {
	let n = if matches!(cur.peek_at(n), Some(b's' | b'S')) { n + 1 } else { n };
	matches!(cur.peek_at(n), Some(b'b' | b'B' | b'o' | b'O' | b'd' | b'D' | b'h' | b'H'))
}

/// Consumes the `'<base><digits>` part of a based number, allowing spaces
/// between a size and the base as the standard does.
fn based_suffix(cur: &mut Cursor<'_>) {
	let mut ahead = 0;
	while matches!(cur.peek_at(ahead), Some(b' ' | b'\t')) {
		ahead += 1;
	}
	if cur.peek_at(ahead) != Some(b'\'') || !is_base_at(cur, ahead + 1) {
		return;
	}
	cur.bump(ahead + 1);
	if matches!(cur.peek(), Some(b's' | b'S')) {
		cur.bump(1);
	}
	cur.bump(1);
	cur.eat_while(|b| b == b' ' || b == b'\t');
	cur.eat_while(|b| b.is_ascii_hexdigit() || matches!(b, b'_' | b'x' | b'X' | b'z' | b'Z' | b'?'));
}
