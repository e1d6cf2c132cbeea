use crate::token::{Token, TokenKind};

/// Byte cursor over block text plus the token stream being built.
pub(crate) struct Cursor<'a> {
	text: &'a str,
	pos: usize,
	pub(crate) tokens: Vec<Token>,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(text: &'a str) -> Self {
		Self {
			text,
			pos: 0,
			tokens: Vec::new(),
		}
	}

	#[inline]
	pub(crate) fn pos(&self) -> usize {
		self.pos
	}

	#[inline]
	pub(crate) fn peek(&self) -> Option<u8> {
		self.peek_at(0)
	}

	#[inline]
	pub(crate) fn peek_at(&self, n: usize) -> Option<u8> {
		self.text.as_bytes().get(self.pos + n).copied()
	}

	pub(crate) fn rest(&self) -> &'a str {
		&self.text[self.pos..]
	}

	pub(crate) fn slice(&self, start: usize) -> &'a str {
		&self.text[start..self.pos]
	}

	pub(crate) fn starts_with(&self, pat: &str) -> bool {
		self.rest().starts_with(pat)
	}

	/// Advances by `n` bytes. Callers only skip ASCII they peeked.
	#[inline]
	pub(crate) fn bump(&mut self, n: usize) {
		self.pos = (self.pos + n).min(self.text.len());
	}

	/// Advances past one whole character.
	pub(crate) fn bump_char(&mut self) {
		if let Some(c) = self.rest().chars().next() {
			self.pos += c.len_utf8();
		}
	}

	pub(crate) fn bump_to_end(&mut self) {
		self.pos = self.text.len();
	}

	pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
		while let Some(b) = self.peek() {
			if !pred(b) {
				break;
			}
			self.pos += 1;
		}
	}

	pub(crate) fn skip_whitespace(&mut self) {
		self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0c));
	}

	/// Returns true if only whitespace remains.
	pub(crate) fn at_blank_tail(&self) -> bool {
		self.rest().trim().is_empty()
	}

	pub(crate) fn push(&mut self, kind: TokenKind, start: usize) {
		let len = self.pos - start;
		if len > 0 {
			self.tokens.push(Token::new(kind, start, len));
		}
	}
}

#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
	b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
