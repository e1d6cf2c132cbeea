//! Maps files to languages and builds their tokenizers.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::HighlightConfig;
use crate::lexers::{ProjectTokenizer, SdfTokenizer, VerilogTokenizer};
use crate::tokenizer::{LanguageKind, Tokenizer};

/// File associations of one language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
	pub kind: LanguageKind,
	/// File extensions without the leading dot.
	pub extensions: Vec<String>,
	/// Exact file names.
	pub filenames: Vec<String>,
}

impl LanguageConfig {
	/// Built-in associations for `kind`.
	pub fn builtin(kind: LanguageKind) -> Self {
		let extensions: &[&str] = match kind {
			LanguageKind::Verilog => &["v", "vh", "vl", "sv", "svh"],
			LanguageKind::Sdf => &["sdf"],
			LanguageKind::Project => &["vlpro"],
		};
		Self {
			kind,
			extensions: extensions.iter().map(|e| (*e).to_owned()).collect(),
			filenames: Vec::new(),
		}
	}
}

/// Registry of languages keyed by file extension, file name and name.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
	languages: Vec<LanguageConfig>,
	by_extension: FxHashMap<String, LanguageKind>,
	by_filename: FxHashMap<String, LanguageKind>,
}

impl LanguageRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with the three built-in front-ends.
	pub fn builtin() -> Self {
		let mut registry = Self::new();
		for kind in LanguageKind::ALL {
			registry.register(LanguageConfig::builtin(kind));
		}
		registry
	}

	/// Registers a language, replacing any earlier registration of the same
	/// kind. Later registrations win for shared extensions.
	pub fn register(&mut self, config: LanguageConfig) {
		self.by_extension.retain(|_, kind| *kind != config.kind);
		self.by_filename.retain(|_, kind| *kind != config.kind);
		for ext in &config.extensions {
			self.by_extension.insert(ext.to_ascii_lowercase(), config.kind);
		}
		for name in &config.filenames {
			self.by_filename.insert(name.clone(), config.kind);
		}
		self.languages.retain(|existing| existing.kind != config.kind);
		self.languages.push(config);
	}

	pub fn get(&self, kind: LanguageKind) -> Option<&LanguageConfig> {
		self.languages.iter().find(|config| config.kind == kind)
	}

	pub fn language_for_name(&self, name: &str) -> Option<LanguageKind> {
		self.languages
			.iter()
			.map(|config| config.kind)
			.find(|kind| kind.name().eq_ignore_ascii_case(name))
	}

	/// Finds a language by exact file name first, then by extension.
	pub fn language_for_path(&self, path: &Path) -> Option<LanguageKind> {
		if let Some(kind) = path.file_name().and_then(|n| n.to_str()).and_then(|name| self.by_filename.get(name)) {
			return Some(*kind);
		}

		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()))
			.copied()
	}
}

/// Builds the tokenizer of `kind` with the limits from `config`.
pub fn tokenizer_for(kind: LanguageKind, config: &HighlightConfig) -> Arc<dyn Tokenizer> {
	let limits = config.limits();
	match kind {
		LanguageKind::Verilog => Arc::new(VerilogTokenizer::new(limits)),
		LanguageKind::Sdf => Arc::new(SdfTokenizer::new(limits)),
		LanguageKind::Project => Arc::new(ProjectTokenizer::new(limits)),
	}
}
