//! Per-block highlighting.
//!
//! [`HighlightEngine::highlight`] is a pure function of the block text, the
//! end state carried in from the previous block and the exclusion flag. It
//! resumes an open block comment, classifies the remaining tokens, records
//! bracket marks and derives the block's fold indent while tracking the
//! structural depth that is carried to the next block.

use std::sync::Arc;

use verilume_language::{Directive, LanguageContext, Role, Token, Tokenizer, TokenizerFlags};
use verilume_primitives::{BracketKind, BracketMark, BracketMarks, Category, EndState, FoldInfo, LexMode, Span};

/// Everything the engine produces for one block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockHighlight {
	/// Category spans in ascending start order, in byte columns.
	pub spans: Vec<Span>,
	/// Bracket marks in ascending column order.
	pub brackets: BracketMarks,
	pub fold: FoldInfo,
	/// End state handed to the next block.
	pub state: EndState,
}

/// Running depth and fold indent of one block.
///
/// `depth` is the structural nesting carried to the next block. `indent` is
/// the fold level shown for this block; it starts at the carried-in depth
/// and only moves where a construct opens at the start of the line, closes
/// mid-line or switches a conditional branch.
#[derive(Debug)]
struct FoldTracker {
	carried: i32,
	depth: i32,
	indent: i32,
	start_included: bool,
	end_included: bool,
}

impl FoldTracker {
	fn new(carried: i32) -> Self {
		Self {
			carried,
			depth: carried,
			indent: carried,
			start_included: false,
			end_included: false,
		}
	}

	fn open(&mut self) {
		self.depth += 1;
	}

	fn close(&mut self) {
		self.depth -= 1;
	}

	fn block_begin(&mut self, first_on_line: bool) {
		self.depth += 1;
		if first_on_line {
			self.indent += 1;
			self.start_included = true;
		}
	}

	fn block_end(&mut self, at_line_end: bool) {
		self.depth -= 1;
		if self.depth < self.indent {
			if at_line_end {
				self.end_included = true;
			} else {
				self.indent = self.indent.min(self.depth);
			}
		}
	}

	fn directive(&mut self, directive: Directive) {
		match directive {
			Directive::IfDef | Directive::IfNDef => self.depth += 1,
			Directive::Else | Directive::ElsIf => self.indent -= 1,
			Directive::EndIf => self.depth -= 1,
			Directive::Other => {}
		}
	}

	/// Drops every depth and fold change made by the block.
	fn exclude(&mut self) {
		*self = Self::new(self.carried);
	}

	fn fold(&self) -> FoldInfo {
		FoldInfo {
			indent: self.indent,
			start_included: self.start_included,
			end_included: self.end_included,
		}
	}
}

/// Incremental line highlighter for one document.
///
/// The engine owns no per-block state; hosts persist [`EndState`] values
/// and feed them back on the next call (see [`crate::propagate`]).
pub struct HighlightEngine {
	tokenizer: Arc<dyn Tokenizer>,
	context: Arc<LanguageContext>,
}

impl std::fmt::Debug for HighlightEngine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HighlightEngine").field("language", &self.tokenizer.language()).finish_non_exhaustive()
	}
}

impl HighlightEngine {
	pub fn new(tokenizer: Arc<dyn Tokenizer>, context: Arc<LanguageContext>) -> Self {
		Self { tokenizer, context }
	}

	pub fn tokenizer(&self) -> &dyn Tokenizer {
		self.tokenizer.as_ref()
	}

	pub fn context(&self) -> &Arc<LanguageContext> {
		&self.context
	}

	/// Highlights one block.
	///
	/// `prior` is the end state of the previous block ([`EndState::INITIAL`]
	/// for the first block). An `excluded` block is highlighted normally but
	/// contributes no depth or fold change; its lexer mode still carries over.
	pub fn highlight(&self, text: &str, prior: EndState, excluded: bool) -> BlockHighlight {
		let mut tracker = FoldTracker::new(prior.depth);
		let mut mode = prior.mode;
		let mut spans = Vec::new();
		let mut brackets = BracketMarks::new();
		let mut offset = 0;

		if mode == LexMode::InBlockComment {
			let close = self.tokenizer.block_comment().map(|comment| comment.close);
			match close.and_then(|close| text.find(close).map(|at| at + close.len())) {
				Some(end) => {
					spans.push(Span::new(Category::Comment, 0, end));
					tracker.close();
					mode = LexMode::Normal;
					offset = end;
				}
				None => {
					if !text.is_empty() {
						spans.push(Span::new(Category::Comment, 0, text.len()));
					}
					return BlockHighlight {
						spans,
						brackets,
						fold: FoldInfo::new(prior.depth),
						state: prior,
					};
				}
			}
		}

		let rest = &text[offset..];
		let macros = self.context.macros();
		let tokens = match self.tokenizer.tokenize(rest, TokenizerFlags::HIGHLIGHT, macros.as_deref()) {
			Ok(tokens) => tokens,
			Err(err) => {
				tracing::debug!(language = self.tokenizer.language().name(), error = %err, "block left unformatted");
				Vec::new()
			}
		};
		let visible: Vec<&Token> = tokens.iter().filter(|token| !token.substituted).collect();

		for (i, token) in visible.iter().enumerate() {
			let start = offset + token.start;
			let class = token.kind.class();
			if class.category != Category::Plain {
				spans.push(Span::new(class.category, start, token.len));
			}

			match class.role {
				Role::None | Role::Terminator => {}
				Role::BlockBegin => {
					push_mark(&mut brackets, text, BracketKind::Opened, start);
					tracker.block_begin(i == 0);
				}
				Role::BlockEnd => {
					let last = last_char_start(text, start, offset + token.end());
					push_mark(&mut brackets, text, BracketKind::Closed, last);
					let at_line_end = visible[i + 1..].iter().all(|next| next.kind.role() == Role::Terminator);
					tracker.block_end(at_line_end);
				}
				Role::Bracket(kind) => push_mark(&mut brackets, text, kind, start),
				Role::Group(kind) => {
					push_mark(&mut brackets, text, kind, start);
					match kind {
						BracketKind::Opened => tracker.open(),
						BracketKind::Closed => tracker.close(),
					}
				}
				Role::CommentOpen => {
					mode = LexMode::InBlockComment;
					tracker.open();
				}
				Role::CommentClose => {
					mode = LexMode::Normal;
					tracker.close();
				}
				Role::Directive(directive) => tracker.directive(directive),
				Role::SectionBegin => tracker.open(),
				Role::SectionEnd => tracker.close(),
			}
		}

		if excluded {
			tracker.exclude();
		}

		let state = EndState::new(mode, tracker.depth);
		tracing::trace!(depth = state.depth, mode = ?state.mode, indent = tracker.indent, excluded, "block highlighted");
		BlockHighlight {
			spans,
			brackets,
			fold: tracker.fold(),
			state,
		}
	}
}

fn push_mark(brackets: &mut BracketMarks, text: &str, kind: BracketKind, column: usize) {
	let Some(ch) = text.get(column..).and_then(|tail| tail.chars().next()) else {
		return;
	};
	brackets.push(match kind {
		BracketKind::Opened => BracketMark::opened(ch, column),
		BracketKind::Closed => BracketMark::closed(ch, column),
	});
}

/// Byte column of the last character in `text[start..end]`.
fn last_char_start(text: &str, start: usize, end: usize) -> usize {
	text.get(start..end)
		.and_then(|word| word.char_indices().next_back())
		.map_or(start, |(at, _)| start + at)
}
