//! Highlighting and completion configuration.
//!
//! Loaded from TOML; every field has a default so an empty file (or no file
//! at all) yields the built-in behavior.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::tokenizer::TokenizerLimits;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
	/// Blocks longer than this many bytes are rendered unformatted.
	pub max_block_len: usize,
	/// Maximum nesting of macro expansions before tokenization fails.
	pub max_macro_depth: usize,
	pub completion: CompletionConfig,
}

impl Default for HighlightConfig {
	fn default() -> Self {
		let limits = TokenizerLimits::default();
		Self {
			max_block_len: limits.max_block_len,
			max_macro_depth: limits.max_macro_depth,
			completion: CompletionConfig::default(),
		}
	}
}

/// Completion activation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
	/// Number of characters before the caret inspected per keystroke.
	pub window_len: usize,
	/// Minimum identifier prefix before completion activates on its own.
	pub min_prefix_len: usize,
	/// Character introducing a macro name.
	pub macro_introducer: char,
	/// Extra identifier constituent besides letters, digits and `_`.
	pub extra_ident_char: char,
}

impl Default for CompletionConfig {
	fn default() -> Self {
		Self {
			window_len: 4,
			min_prefix_len: 3,
			macro_introducer: '`',
			extra_ident_char: '$',
		}
	}
}

impl HighlightConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), "configuration loaded");
		Ok(config)
	}

	pub fn limits(&self) -> TokenizerLimits {
		TokenizerLimits {
			max_block_len: self.max_block_len,
			max_macro_depth: self.max_macro_depth,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn empty_config_is_default() {
		assert_eq!(HighlightConfig::from_toml_str("").unwrap(), HighlightConfig::default());
	}

	#[test]
	fn partial_override() {
		let config = HighlightConfig::from_toml_str("max_block_len = 80\n[completion]\nmin_prefix_len = 1\n").unwrap();
		assert_eq!(config.max_block_len, 80);
		assert_eq!(config.max_macro_depth, 8);
		assert_eq!(config.completion.min_prefix_len, 1);
		assert_eq!(config.completion.window_len, 4);
		assert_eq!(config.completion.macro_introducer, '`');
		assert_eq!(config.limits().max_block_len, 80);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = HighlightConfig::from_toml_str("colour = true").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[completion]\nextra_ident_char = \"#\"").unwrap();
		let config = HighlightConfig::load(file.path()).unwrap();
		assert_eq!(config.completion.extra_ident_char, '#');
	}

	#[test]
	fn missing_file_reports_path() {
		let err = HighlightConfig::load(Path::new("/nonexistent/verilume.toml")).unwrap_err();
		assert!(err.to_string().contains("/nonexistent/verilume.toml"));
	}
}
