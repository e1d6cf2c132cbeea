//! Subcommand implementations. Output goes to a writer so the commands can
//! be exercised without a terminal.

use std::io::Write;
use std::ops::Range;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;
use verilume_assist::{Activation, ActivationKind, ActivationSequenceMatcher};
use verilume_language::{HighlightConfig, LanguageContext, LanguageKind, LanguageRegistry, MacroCache, tokenizer_for};
use verilume_primitives::{BracketMark, EndState, FoldInfo, LexMode, Span};
use verilume_syntax::{BlockHighlight, Document, HighlightEngine};

use crate::cli::{Command, SourceArgs};

pub fn run(command: Command, config: &HighlightConfig, out: &mut impl Write) -> anyhow::Result<()> {
	match command {
		Command::Highlight { source, exclude, json } => {
			let doc = open_document(&source, config, &exclude)?;
			highlight(&doc, json, out)
		}
		Command::Folds { source, json } => {
			let doc = open_document(&source, config, &[])?;
			folds(&doc, json, out)
		}
		Command::Complete { text, min } => {
			let matcher = ActivationSequenceMatcher::from_config(&config.completion);
			complete(&matcher, &text, min.unwrap_or(config.completion.min_prefix_len), out)
		}
	}
}

fn language_of(source: &SourceArgs) -> anyhow::Result<LanguageKind> {
	let registry = LanguageRegistry::builtin();
	match &source.language {
		Some(name) => registry.language_for_name(name).with_context(|| format!("unknown language `{name}`")),
		None => registry
			.language_for_path(&source.file)
			.with_context(|| format!("cannot detect the language of {}; pass --language", source.file.display())),
	}
}

/// Reads the source, builds its engine and highlights every block.
pub fn open_document(source: &SourceArgs, config: &HighlightConfig, exclude: &[Range<usize>]) -> anyhow::Result<Document> {
	let kind = language_of(source)?;
	let text = std::fs::read_to_string(&source.file).with_context(|| format!("reading {}", source.file.display()))?;

	let context = Arc::new(LanguageContext::new());
	if !source.defines.is_empty() {
		let mut defines = String::new();
		for path in &source.defines {
			defines.push_str(&std::fs::read_to_string(path).with_context(|| format!("reading defines from {}", path.display()))?);
			defines.push('\n');
		}
		context.publish(MacroCache::scan_defines(&defines));
	}

	let engine = HighlightEngine::new(tokenizer_for(kind, config), context);
	let mut doc = Document::new(engine, &text);
	let report = doc.highlight_all();
	tracing::debug!(language = kind.name(), blocks = doc.block_count(), processed = report.processed, "document highlighted");

	for range in exclude {
		if range.end > doc.block_count() {
			bail!("excluded range {}..{} exceeds the {} blocks of {}", range.start, range.end, doc.block_count(), source.file.display());
		}
		doc.set_excluded(range.clone(), true)?;
	}
	Ok(doc)
}

#[derive(Serialize)]
struct BlockReport<'a> {
	block: usize,
	state: EndState,
	fold: FoldInfo,
	excluded: bool,
	spans: &'a [Span],
	brackets: &'a [BracketMark],
}

fn format_state(state: EndState) -> String {
	let mode = match state.mode {
		LexMode::Normal => "N",
		LexMode::InBlockComment => "C",
	};
	format!("{mode}{}", state.depth)
}

fn format_fold(fold: FoldInfo) -> String {
	let mut text = fold.indent.to_string();
	if fold.start_included {
		text.push('<');
	}
	if fold.end_included {
		text.push('>');
	}
	text
}

/// One text line per block: index, end state, fold indent and spans.
pub fn format_block(index: usize, text: &str, block: &BlockHighlight, excluded: bool) -> String {
	let spans: Vec<String> = block
		.spans
		.iter()
		.map(|span| format!("{}={:?}", span.category.name(), span.slice(text).unwrap_or_default()))
		.collect();
	format!(
		"{index:>4} {:<4} {:<4}{} {}",
		format_state(block.state),
		format_fold(block.fold),
		if excluded { " x" } else { "" },
		spans.join(" ")
	)
	.trim_end()
	.to_owned()
}

fn highlight(doc: &Document, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
	for index in 0..doc.block_count() {
		let Some(block) = doc.block(index) else {
			continue;
		};
		let excluded = doc.is_excluded(index);
		if json {
			let report = BlockReport {
				block: index,
				state: block.state,
				fold: block.fold,
				excluded,
				spans: &block.spans,
				brackets: &block.brackets,
			};
			serde_json::to_writer(&mut *out, &report)?;
			writeln!(out)?;
		} else {
			writeln!(out, "{}", format_block(index, &doc.block_text(index), block, excluded))?;
		}
	}
	Ok(())
}

#[derive(Serialize)]
struct RegionReport {
	header: usize,
	end: usize,
}

fn folds(doc: &Document, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
	let regions = doc.fold_regions();
	if json {
		let regions: Vec<RegionReport> = regions.iter().map(|r| RegionReport { header: r.header, end: r.end }).collect();
		serde_json::to_writer_pretty(&mut *out, &regions)?;
		writeln!(out)?;
		return Ok(());
	}
	for region in regions {
		writeln!(out, "{}..={} {}", region.header, region.end, doc.block_text(region.header).trim())?;
	}
	Ok(())
}

fn complete(matcher: &ActivationSequenceMatcher, text: &str, min_len: usize, out: &mut impl Write) -> anyhow::Result<()> {
	let activation = matcher.check_line(text, min_len);
	match activation {
		Activation::NoActivation => writeln!(out, "none")?,
		Activation::Activate { kind, prefix_start } => {
			let kind = match kind {
				ActivationKind::PlainIdent => "identifier",
				ActivationKind::Macro => "macro",
				ActivationKind::DotExpansion => "member",
			};
			let prefix: String = text.chars().skip(prefix_start).collect();
			writeln!(
				out,
				"{kind} at {prefix_start} prefix={prefix:?} offset={}",
				activation.legacy_offset(text.chars().count())
			)?;
		}
	}
	Ok(())
}
