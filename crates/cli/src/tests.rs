use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use verilume_language::HighlightConfig;

use crate::cli::{Cli, Command, SourceArgs, parse_block_range};
use crate::commands;

fn run(command: Command) -> String {
	let mut out = Vec::new();
	commands::run(command, &HighlightConfig::default(), &mut out).unwrap();
	String::from_utf8(out).unwrap()
}

fn source_file(ext: &str, text: &str) -> tempfile::NamedTempFile {
	let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
	file.write_all(text.as_bytes()).unwrap();
	file
}

fn source(path: PathBuf) -> SourceArgs {
	SourceArgs {
		file: path,
		language: None,
		defines: Vec::new(),
	}
}

#[test]
fn block_ranges() {
	assert_eq!(parse_block_range("2..5"), Ok(2..5));
	assert_eq!(parse_block_range(" 0 .. 0 "), Ok(0..0));
	assert!(parse_block_range("5..2").is_err());
	assert!(parse_block_range("7").is_err());
	assert!(parse_block_range("a..3").is_err());
}

#[test]
fn parses_subcommands() {
	let cli = Cli::try_parse_from(["verilume", "highlight", "top.v", "--exclude", "1..3", "--exclude", "5..6", "-v"]).unwrap();
	assert!(cli.verbose);
	match cli.command {
		Command::Highlight { source, exclude, json } => {
			assert_eq!(source.file, PathBuf::from("top.v"));
			assert_eq!(exclude, vec![1..3, 5..6]);
			assert!(!json);
		}
		other => panic!("unexpected command {other:?}"),
	}

	let cli = Cli::try_parse_from(["verilume", "--config", "v.toml", "complete", "a.b", "--min", "0"]).unwrap();
	assert_eq!(cli.config, Some(PathBuf::from("v.toml")));
	assert!(matches!(cli.command, Command::Complete { min: Some(0), .. }));
}

#[test]
fn highlight_prints_blocks() {
	let file = source_file(".v", "module m;\n/* a\nb */ endmodule");
	let out = run(Command::Highlight {
		source: source(file.path().to_path_buf()),
		exclude: Vec::new(),
		json: false,
	});
	let lines: Vec<&str> = out.lines().collect();
	assert_eq!(
		lines,
		vec![
			"   0 N1   1<   keyword=\"module\" identifier=\"m\" operator=\";\"",
			"   1 C2   1    comment=\"/*\" comment=\" a\"",
			"   2 N0   2>   comment=\"b */\" keyword=\"endmodule\"",
		]
	);
}

#[test]
fn highlight_json_and_exclusion() {
	let file = source_file(".v", "`ifdef X\nbegin\n`endif");
	let out = run(Command::Highlight {
		source: source(file.path().to_path_buf()),
		exclude: vec![1..2],
		json: true,
	});
	let blocks: Vec<serde_json::Value> = out.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
	assert_eq!(blocks.len(), 3);
	assert_eq!(blocks[1]["excluded"], true);
	assert_eq!(blocks[1]["state"]["depth"], 1);
	assert_eq!(blocks[2]["state"]["depth"], 0);
	assert_eq!(blocks[1]["brackets"][0]["ch"], "b");
}

#[test]
fn exclusion_out_of_range_fails() {
	let file = source_file(".v", "x;");
	let err = commands::open_document(&source(file.path().to_path_buf()), &HighlightConfig::default(), &[0..4]).unwrap_err();
	assert!(err.to_string().contains("exceeds"));
}

#[test]
fn folds_with_language_override() {
	let file = source_file(".txt", "(DELAYFILE\n  (CELL\n  )\n)");
	let mut args = source(file.path().to_path_buf());
	assert!(commands::open_document(&args, &HighlightConfig::default(), &[]).is_err());

	args.language = Some("sdf".into());
	let out = run(Command::Folds { source: args, json: false });
	assert_eq!(out, "0..=3 (DELAYFILE\n1..=2 (CELL\n");
}

#[test]
fn defines_feed_the_macro_cache() {
	let defines = source_file(".vh", "`define OPEN begin\n");
	let file = source_file(".v", "`OPEN\nend");
	let mut args = source(file.path().to_path_buf());
	args.defines.push(defines.path().to_path_buf());
	let doc = commands::open_document(&args, &HighlightConfig::default(), &[]).unwrap();
	assert_eq!(doc.state(0).map(|s| s.depth), Some(0));
	assert_eq!(doc.engine().context().macros().map(|m| m.len()), Some(1));
}

#[test]
fn complete_reports_activation() {
	assert_eq!(
		run(Command::Complete {
			text: "x = foo.ba".into(),
			min: None,
		}),
		"member at 8 prefix=\"ba\" offset=-2\n"
	);
	assert_eq!(
		run(Command::Complete {
			text: "wire ab".into(),
			min: None,
		}),
		"none\n"
	);
	assert_eq!(
		run(Command::Complete {
			text: "abc".into(),
			min: Some(3),
		}),
		"identifier at 0 prefix=\"abc\" offset=-3\n"
	);
}
