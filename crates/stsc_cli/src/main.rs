//! stsc: The storytailor compiler CLI.
//!
//! Usage:
//!   stsc <config> [-f file] [--ts tsconfig] [-o source out] [--verbose] [--pretty]
//!
//! Compiles every story under the configured source root, or a single
//! file, and prints the diagnostics grouped by file.

mod report;

use clap::Parser as ClapParser;
use std::io::IsTerminal;
use std::process;
use std::time::Instant;
use stsc_compiler::{CompileOptions, CompileResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "stsc", about = "stsc - the storytailor compiler", version)]
struct Cli {
    /// Path to the configuration file.
    #[arg(value_name = "CONFIG")]
    config: String,

    /// Compile only this source file.
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "output")]
    file: Option<String>,

    /// Run `tsc -p <TSCONFIG>` after a successful emit.
    #[arg(long = "ts", value_name = "TSCONFIG")]
    ts: Option<String>,

    /// Compile SOURCE into the output file OUT.
    #[arg(short = 'o', long = "output", num_args = 2, value_names = ["SOURCE", "OUT"])]
    output: Option<Vec<String>>,

    /// Log what the compiler is doing.
    #[arg(long)]
    verbose: bool,

    /// Show diagnostics with source snippets.
    #[arg(long)]
    pretty: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let exit_code = run_compile(&cli);
    process::exit(exit_code);
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_compile(cli: &Cli) -> i32 {
    let start = Instant::now();
    let options = CompileOptions {
        config_path: cli.config.clone(),
        file: cli.file.clone(),
        output: cli.output.as_deref().and_then(|paths| match paths {
            [source, out] => Some((source.clone(), out.clone())),
            _ => None,
        }),
        ts_config: cli.ts.clone(),
    };
    debug!(?options, "starting compilation");

    let result = stsc_compiler::compile(&options);
    let use_color = std::io::stderr().is_terminal();
    print_diagnostics(&result, cli.pretty, use_color);

    if result.has_errors() {
        let count = result.error_count();
        let summary = format!("Found {} error{}.", count, if count == 1 { "" } else { "s" });
        if use_color {
            eprintln!("\n{}{}{}", RED, summary, RESET);
        } else {
            eprintln!("\n{}", summary);
        }
        // Failures reported against the configuration mean nothing was compiled.
        let config_failed = result.diagnostics.contains_key(&cli.config);
        return if config_failed { 1 } else { 2 };
    }

    if use_color {
        let compiled = result
            .diagnostics
            .keys()
            .filter(|path| Some(*path) != cli.ts.as_ref())
            .count();
        eprintln!(
            "{}Compiled {} file{} in {:.2}s.{}",
            GRAY,
            compiled,
            if compiled == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64(),
            RESET
        );
    }
    0
}

fn print_diagnostics(result: &CompileResult, pretty: bool, use_color: bool) {
    for (path, diagnostics) in &result.diagnostics {
        if diagnostics.is_empty() {
            continue;
        }
        if pretty {
            let source = std::fs::read_to_string(path).ok();
            for diagnostic in diagnostics {
                report::print_pretty(path, source.as_deref(), diagnostic);
            }
        } else {
            for diagnostic in diagnostics {
                report::print_diagnostic(path, diagnostic, use_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["stsc", "stsc.json", "--ts", "tsconfig.json", "--pretty"]).unwrap();
        assert_eq!(cli.config, "stsc.json");
        assert_eq!(cli.ts.as_deref(), Some("tsconfig.json"));
        assert!(cli.pretty && !cli.verbose);

        let cli = Cli::try_parse_from(["stsc", "stsc.json", "-o", "a.st", "out/a.js"]).unwrap();
        assert_eq!(cli.output, Some(vec!["a.st".to_string(), "out/a.js".to_string()]));
    }

    #[test]
    fn test_output_needs_two_paths() {
        assert!(Cli::try_parse_from(["stsc", "stsc.json", "-o", "a.st"]).is_err());
    }

    #[test]
    fn test_file_conflicts_with_output() {
        let args = ["stsc", "stsc.json", "-f", "a.st", "-o", "a.st", "a.js"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
