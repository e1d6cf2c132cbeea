/// Rendering category of a span.
///
/// The set is closed: every token kind of every front-end maps onto one of
/// these. `Plain` is the "no format" category and never produces a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
	Plain,
	Number,
	String,
	Comment,
	Keyword,
	Type,
	Operator,
	Preprocessor,
	Identifier,
	SystemIdentifier,
	Section,
}

impl Category {
	/// Stable lowercase name, used by hosts to look up theme scopes.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Plain => "plain",
			Self::Number => "number",
			Self::String => "string",
			Self::Comment => "comment",
			Self::Keyword => "keyword",
			Self::Type => "type",
			Self::Operator => "operator",
			Self::Preprocessor => "preprocessor",
			Self::Identifier => "identifier",
			Self::SystemIdentifier => "system-identifier",
			Self::Section => "section",
		}
	}
}

/// A formatted run of block text, in byte offsets relative to the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
	pub category: Category,
	pub start: usize,
	pub len: usize,
}

impl Span {
	pub const fn new(category: Category, start: usize, len: usize) -> Self {
		Self { category, start, len }
	}

	/// Exclusive end offset.
	#[inline]
	pub const fn end(&self) -> usize {
		self.start + self.len
	}

	/// Returns the covered slice of `text`, or `None` if the span is out of
	/// bounds or splits a character.
	pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
		text.get(self.start..self.end())
	}
}
