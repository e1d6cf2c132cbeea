//! Built-in tokenizers for the Verilog, SDF and project front-ends.

mod cursor;
mod project;
mod sdf;
mod verilog;

use cursor::Cursor;
pub use project::ProjectTokenizer;
pub use sdf::SdfTokenizer;
pub use verilog::VerilogTokenizer;

use crate::token::TokenKind;
use crate::tokenizer::TokenizerFlags;

/// Scans a `/* */` comment starting at the cursor.
///
/// Unpacked, the comment is reported as opener, body and terminator so the
/// highlighter can track comments that stay open at the end of the block.
fn block_comment(cur: &mut Cursor<'_>, flags: TokenizerFlags) {
	let start = cur.pos();
	cur.bump(2);
	let body_start = cur.pos();
	let close = cur.rest().find("*/");

	if flags.intersects(TokenizerFlags::IGNORE_COMMENTS | TokenizerFlags::PACK_COMMENTS) {
		match close {
			Some(offset) => cur.bump(offset + 2),
			None => cur.bump_to_end(),
		}
		if !flags.contains(TokenizerFlags::IGNORE_COMMENTS) {
			cur.push(TokenKind::Comment, start);
		}
		return;
	}

	cur.push(TokenKind::CommentOpen, start);
	match close {
		Some(offset) => {
			cur.bump(offset);
			cur.push(TokenKind::Comment, body_start);
			let close_start = cur.pos();
			cur.bump(2);
			cur.push(TokenKind::CommentClose, close_start);
		}
		None => {
			cur.bump_to_end();
			cur.push(TokenKind::Comment, body_start);
		}
	}
}

/// Scans a `//` comment to the end of the block.
///
/// With `sections`, a comment whose body starts with `{{{` or `}}}` is a
/// user section marker.
fn line_comment(cur: &mut Cursor<'_>, flags: TokenizerFlags, sections: bool) {
	let start = cur.pos();
	cur.bump_to_end();
	let body = cur.slice(start)[2..].trim_start();
	let kind = if sections && body.starts_with("{{{") {
		TokenKind::SectionBegin
	} else if sections && body.starts_with("}}}") {
		TokenKind::SectionEnd
	} else {
		TokenKind::Comment
	};
	if kind == TokenKind::Comment && flags.contains(TokenizerFlags::IGNORE_COMMENTS) {
		return;
	}
	cur.push(kind, start);
}

/// Scans a double-quoted string. An unterminated string runs to the end of
/// the block.
fn string(cur: &mut Cursor<'_>) {
	let start = cur.pos();
	cur.bump(1);
	while let Some(b) = cur.peek() {
		match b {
			b'\\' => {
				cur.bump(1);
				cur.bump_char();
			}
			b'"' => {
				cur.bump(1);
				break;
			}
			_ => cur.bump_char(),
		}
	}
	cur.push(TokenKind::Str, start);
}

/// Scans an unsigned decimal or real number: digits, optional fraction and
/// optional exponent. Underscores are accepted as digit separators.
fn decimal(cur: &mut Cursor<'_>) {
	cur.eat_while(|b| b.is_ascii_digit() || b == b'_');
	if cur.peek() == Some(b'.') && cur.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
		cur.bump(1);
		cur.eat_while(|b| b.is_ascii_digit() || b == b'_');
	}
	if matches!(cur.peek(), Some(b'e' | b'E')) {
		let digit_at = if matches!(cur.peek_at(1), Some(b'+' | b'-')) { 2 } else { 1 };
		if cur.peek_at(digit_at).is_some_and(|b| b.is_ascii_digit()) {
			cur.bump(digit_at);
			cur.eat_while(|b| b.is_ascii_digit() || b == b'_');
		}
	}
}

/// Scans the longest operator from `ops` (ordered longest first), falling
/// back to a single invalid character.
fn operator(cur: &mut Cursor<'_>, ops: &[&str]) {
	let start = cur.pos();
	match ops.iter().find(|op| cur.starts_with(op)) {
		Some(op) => {
			cur.bump(op.len());
			cur.push(TokenKind::Operator, start);
		}
		None => {
			cur.bump_char();
			cur.push(TokenKind::Invalid, start);
		}
	}
}
