//! Text macro definitions shared read-only with highlight passes.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use rustc_hash::FxHashMap;

/// Immutable snapshot of text macro definitions (`name -> body`).
///
/// Populated by an external pipeline (the project model) and published
/// through a [`LanguageContext`]. Tokenizers only ever read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroCache {
	defines: FxHashMap<String, String>,
}

impl MacroCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_defines<I, K, V>(defines: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			defines: defines.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	/// Collects the `` `define `` lines of a Verilog source.
	///
	/// Only single-line definitions are recognized; a macro argument list
	/// directly following the name is dropped from the body. Later
	/// definitions replace earlier ones, `` `undef `` removes them.
	pub fn scan_defines(source: &str) -> Self {
		let mut cache = Self::new();
		for line in source.lines() {
			let line = line.trim_start();
			if let Some(rest) = directive_args(line, "`define") {
				let rest = rest.trim_start();
				let name_len = rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')).unwrap_or(rest.len());
				if name_len == 0 {
					continue;
				}
				let (name, mut body) = rest.split_at(name_len);
				if body.starts_with('(') {
					body = body.find(')').map_or("", |close| &body[close + 1..]);
				}
				cache.define(name, body.trim());
			} else if let Some(rest) = directive_args(line, "`undef") {
				if let Some(name) = rest.split_whitespace().next() {
					cache.defines.remove(name);
				}
			}
		}
		cache
	}

	pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) {
		self.defines.insert(name.into(), body.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.defines.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.defines.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.defines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.defines.is_empty()
	}

	/// Macro names, sorted. Used by macro-name completion backends.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.defines.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

/// Text after `directive` when the line starts with it as a whole word.
fn directive_args<'a>(line: &'a str, directive: &str) -> Option<&'a str> {
	let rest = line.strip_prefix(directive)?;
	(rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// Host-owned context shared by the highlighting engine and tokenizers.
///
/// Holds the most recently published macro cache. Highlight passes take a
/// snapshot with [`LanguageContext::macros`]; the model pipeline replaces it
/// with [`LanguageContext::publish`]. Readers never observe a partially
/// written cache.
#[derive(Debug, Default)]
pub struct LanguageContext {
	macros: ArcSwapOption<MacroCache>,
}

impl LanguageContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_macros(cache: MacroCache) -> Self {
		Self {
			macros: ArcSwapOption::from_pointee(cache),
		}
	}

	/// Current macro cache snapshot, if one was published.
	pub fn macros(&self) -> Option<Arc<MacroCache>> {
		self.macros.load_full()
	}

	pub fn publish(&self, cache: MacroCache) {
		tracing::debug!(defines = cache.len(), "macro cache published");
		self.macros.store(Some(Arc::new(cache)));
	}

	pub fn clear(&self) {
		self.macros.store(None);
	}
}
