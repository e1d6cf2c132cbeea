//! verilume command line.

mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use verilume_language::HighlightConfig;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => HighlightConfig::load(path).with_context(|| format!("loading configuration from {}", path.display()))?,
		None => HighlightConfig::default(),
	};

	let mut out = std::io::stdout().lock();
	commands::run(cli.command, &config, &mut out)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("VERILUME_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}

#[cfg(test)]
mod tests;
