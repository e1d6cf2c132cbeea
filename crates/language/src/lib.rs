//! Language front-ends for the incremental highlighter.
//!
//! The highlighting engine only depends on the [`Tokenizer`] contract and the
//! [`TokenKind`] classification table defined here. The crate also ships the
//! three built-in front-ends (Verilog, SDF and `.vlpro` project files), the
//! shared macro cache and the configuration they read.
//!
//! # Architecture
//!
//! * [`token`]: token kinds and their single classification table
//! * [`tokenizer`]: the tokenizer contract, flags and errors
//! * [`lexers`]: built-in tokenizers
//! * [`macros`]: macro cache snapshots and the host-owned [`LanguageContext`]
//! * [`registry`]: file associations
//! * [`config`]: TOML configuration

pub mod config;
pub mod lexers;
pub mod macros;
pub mod registry;
pub mod token;
pub mod tokenizer;

pub use config::{CompletionConfig, ConfigError, HighlightConfig};
pub use lexers::{ProjectTokenizer, SdfTokenizer, VerilogTokenizer};
pub use macros::{LanguageContext, MacroCache};
pub use registry::{LanguageConfig, LanguageRegistry, tokenizer_for};
pub use token::{Directive, Role, Token, TokenClass, TokenKind};
pub use tokenizer::{BlockComment, C_BLOCK_COMMENT, LanguageKind, TokenizeError, Tokenizer, TokenizerFlags, TokenizerLimits};
