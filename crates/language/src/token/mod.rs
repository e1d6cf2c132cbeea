//! Token kinds shared by every front-end and the single table that
//! classifies them for rendering and structural bookkeeping.

use verilume_primitives::{BracketKind, Category};

/// A lexical token produced by a [`Tokenizer`](crate::Tokenizer).
///
/// `start` and `len` are byte offsets into the text handed to the tokenizer.
/// Tokens produced by macro expansion carry `substituted = true` and point at
/// the macro usage they came from; they are not literally present in the
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
	pub kind: TokenKind,
	pub start: usize,
	pub len: usize,
	pub substituted: bool,
}

impl Token {
	pub const fn new(kind: TokenKind, start: usize, len: usize) -> Self {
		Self {
			kind,
			start,
			len,
			substituted: false,
		}
	}

	/// Exclusive end offset.
	#[inline]
	pub const fn end(&self) -> usize {
		self.start + self.len
	}
}

/// Compiler directive vocabulary relevant to folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
	IfDef,
	IfNDef,
	Else,
	ElsIf,
	EndIf,
	/// Any other known directive (`define`, `include`, `timescale`, ...).
	Other,
}

impl Directive {
	/// Matches a directive name without its leading introducer.
	///
	/// Returns `None` for names that are not compiler directives, which
	/// front-ends treat as macro usages.
	pub fn from_name(name: &str) -> Option<Self> {
		let directive = match name {
			"ifdef" => Self::IfDef,
			"ifndef" => Self::IfNDef,
			"else" => Self::Else,
			"elsif" => Self::ElsIf,
			"endif" => Self::EndIf,
			"define" | "undef" | "undefineall" | "include" | "timescale" | "resetall" | "celldefine"
			| "endcelldefine" | "default_nettype" | "unconnected_drive" | "nounconnected_drive" | "line"
			| "pragma" | "begin_keywords" | "end_keywords" | "default_decay_time" | "default_trireg_strength"
			| "delay_mode_distributed" | "delay_mode_path" | "delay_mode_unit" | "delay_mode_zero"
			| "__FILE__" | "__LINE__" => Self::Other,
			_ => return None,
		};
		Some(directive)
	}
}

/// Kind of a token, closed over all front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	Number,
	Str,
	/// A complete comment, or comment text inside an unpacked block comment.
	Comment,
	/// Two-character block comment opener.
	CommentOpen,
	/// Two-character block comment terminator.
	CommentClose,
	Ident,
	/// `$`-prefixed system task or function name.
	SystemName,
	Keyword,
	TypeKeyword,
	/// Reserved word opening a foldable block (`begin`, `module`, ...).
	BlockBegin,
	/// Reserved word closing a foldable block (`end`, `endmodule`, ...).
	BlockEnd,
	/// Known project variable (`SRCFILES`, `INCDIRS`, ...).
	Variable,
	/// Known project function, only when directly applied.
	Function,
	LParen,
	RParen,
	LBrack,
	RBrack,
	LBrace,
	RBrace,
	/// Parenthesis that structures the document (SDF groups).
	GroupOpen,
	GroupClose,
	/// Unpacked attribute delimiters `(*` and `*)`.
	AttrOpen,
	AttrClose,
	/// Packed attribute instance.
	Attribute,
	Semi,
	Operator,
	/// Backslash continuing a line.
	LineCont,
	Directive(Directive),
	/// Use of a text macro.
	MacroUsage,
	/// User section opener (`// {{{`).
	SectionBegin,
	/// User section terminator (`// }}}`).
	SectionEnd,
	Invalid,
}

/// Structural role of a token kind for depth and folding bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
	None,
	BlockBegin,
	BlockEnd,
	/// Literal bracket: produces a mark, never moves depth.
	Bracket(BracketKind),
	/// Grouping bracket: produces a mark and moves depth.
	Group(BracketKind),
	CommentOpen,
	CommentClose,
	Directive(Directive),
	SectionBegin,
	SectionEnd,
	/// Statement terminator.
	Terminator,
}

/// Rendering category and structural role of a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenClass {
	pub category: Category,
	pub role: Role,
}

impl TokenClass {
	const fn plain(category: Category) -> Self {
		Self {
			category,
			role: Role::None,
		}
	}

	const fn with(category: Category, role: Role) -> Self {
		Self { category, role }
	}
}

impl TokenKind {
	/// Classification table for every token kind.
	pub const fn class(self) -> TokenClass {
		use BracketKind::{Closed, Opened};
		match self {
			Self::Number => TokenClass::plain(Category::Number),
			Self::Str => TokenClass::plain(Category::String),
			Self::Comment => TokenClass::plain(Category::Comment),
			Self::CommentOpen => TokenClass::with(Category::Comment, Role::CommentOpen),
			Self::CommentClose => TokenClass::with(Category::Comment, Role::CommentClose),
			Self::Ident => TokenClass::plain(Category::Identifier),
			Self::SystemName => TokenClass::plain(Category::SystemIdentifier),
			Self::Keyword | Self::Function => TokenClass::plain(Category::Keyword),
			Self::TypeKeyword | Self::Variable => TokenClass::plain(Category::Type),
			Self::BlockBegin => TokenClass::with(Category::Keyword, Role::BlockBegin),
			Self::BlockEnd => TokenClass::with(Category::Keyword, Role::BlockEnd),
			Self::LParen | Self::LBrack | Self::LBrace => TokenClass::with(Category::Operator, Role::Bracket(Opened)),
			Self::RParen | Self::RBrack | Self::RBrace => TokenClass::with(Category::Operator, Role::Bracket(Closed)),
			Self::GroupOpen => TokenClass::with(Category::Operator, Role::Group(Opened)),
			Self::GroupClose => TokenClass::with(Category::Operator, Role::Group(Closed)),
			Self::AttrOpen | Self::AttrClose | Self::Operator => TokenClass::plain(Category::Operator),
			Self::Semi => TokenClass::with(Category::Operator, Role::Terminator),
			Self::Attribute | Self::LineCont | Self::MacroUsage => TokenClass::plain(Category::Preprocessor),
			Self::Directive(d) => TokenClass::with(Category::Preprocessor, Role::Directive(d)),
			Self::SectionBegin => TokenClass::with(Category::Section, Role::SectionBegin),
			Self::SectionEnd => TokenClass::with(Category::Section, Role::SectionEnd),
			Self::Invalid => TokenClass::plain(Category::Plain),
		}
	}

	#[inline]
	pub const fn category(self) -> Category {
		self.class().category
	}

	#[inline]
	pub const fn role(self) -> Role {
		self.class().role
	}
}
