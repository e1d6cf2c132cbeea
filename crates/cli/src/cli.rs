use std::ops::Range;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "verilume")]
#[command(about = "Incremental Verilog, SDF and project file highlighter")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (TOML)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging (overridden by VERILUME_LOG)
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Highlight a file and print one line per block
	Highlight {
		#[command(flatten)]
		source: SourceArgs,

		/// Blocks disabled by conditional compilation, as `start..end` (0-based, end exclusive)
		#[arg(long, value_name = "RANGE", value_parser = parse_block_range)]
		exclude: Vec<Range<usize>>,

		/// Print JSON lines instead of text
		#[arg(long)]
		json: bool,
	},
	/// Print the fold regions of a file
	Folds {
		#[command(flatten)]
		source: SourceArgs,

		/// Print JSON instead of text
		#[arg(long)]
		json: bool,
	},
	/// Check whether completion activates for the text left of the caret
	Complete {
		/// Line content before the caret
		text: String,

		/// Minimum identifier prefix length
		#[arg(long, value_name = "N")]
		min: Option<usize>,
	},
}

/// Input file selection shared by file-based subcommands.
#[derive(Args, Debug)]
pub struct SourceArgs {
	/// File to highlight
	pub file: PathBuf,

	/// Language name (verilog, sdf, project); detected from the path if omitted
	#[arg(long, short = 'l')]
	pub language: Option<String>,

	/// Verilog files whose `define lines populate the macro cache
	#[arg(long, value_name = "PATH")]
	pub defines: Vec<PathBuf>,
}

/// Parses `start..end` into a block range.
pub fn parse_block_range(value: &str) -> Result<Range<usize>, String> {
	let (start, end) = value.split_once("..").ok_or_else(|| format!("expected `start..end`, got `{value}`"))?;
	let start: usize = start.trim().parse().map_err(|err| format!("invalid start `{start}`: {err}"))?;
	let end: usize = end.trim().parse().map_err(|err| format!("invalid end `{end}`: {err}"))?;
	if start > end {
		return Err(format!("range start {start} is after its end {end}"));
	}
	Ok(start..end)
}
