//! Running external tools after emit.

use crate::error::CompilerError;
use std::process::Command;
use stsc_diagnostics::{messages, Diagnostic};
use tracing::{debug, warn};

/// The TypeScript compiler executable.
pub const TSC: &str = if cfg!(windows) { "tsc.cmd" } else { "tsc" };

/// Run `tsc -p <ts_config_path>`.
pub fn run_tsc(ts_config_path: &str) -> Vec<Diagnostic> {
    run_tool(TSC, &["-p", ts_config_path])
}

/// Run a tool to completion. Failing to start it, a non-zero exit and
/// every line it prints all become diagnostics.
pub fn run_tool(program: &str, args: &[&str]) -> Vec<Diagnostic> {
    debug!(program, ?args, "running external tool");
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(source) => {
            let error = CompilerError::Spawn {
                tool: program.to_string(),
                source,
            };
            warn!("{}", error);
            return vec![error.to_diagnostic()];
        }
    };

    let mut diagnostics: Vec<Diagnostic> = [&output.stdout, &output.stderr]
        .into_iter()
        .flat_map(|stream| {
            String::from_utf8_lossy(stream)
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(|line| {
                    Diagnostic::global(&messages::EXTERNAL_TOOL_OUTPUT_0, &[line]).with_source(program)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    if !output.status.success() {
        warn!(program, status = %output.status, "external tool failed");
        diagnostics.push(
            Diagnostic::global(
                &messages::EXTERNAL_TOOL_0_FAILED_1,
                &[program, output.status.to_string().as_str()],
            )
            .with_source(program),
        );
    }
    diagnostics
}
