//! stsc_compiler: Compiler orchestration.
//!
//! Loads the configuration, discovers story sources, compiles them in
//! parallel, writes the outputs, and optionally hands the result to the
//! TypeScript compiler. Every failure ends up as a diagnostic keyed by
//! the path it concerns.

mod discovery;
mod error;
pub mod external;

pub use discovery::discover_source_files;
pub use error::{CompilerError, Result};

use indexmap::IndexMap;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use stsc_diagnostics::Diagnostic;
use stsc_emitter::{CompileRequest, Emitter, EmitterOptions};
use stsc_options::{Config, FileFilter};
use tracing::{debug, error, info, warn};

/// What the command line asked for.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub config_path: String,
    /// Compile only this file.
    pub file: Option<String>,
    /// Compile one source to an explicit output file.
    pub output: Option<(String, String)>,
    /// Run `tsc -p` with this project after emit.
    pub ts_config: Option<String>,
}

/// Diagnostics and written files of a whole run.
#[derive(Debug, Default)]
pub struct CompileResult {
    /// Diagnostics per path, in compilation order. Every compiled source
    /// has an entry, possibly empty.
    pub diagnostics: IndexMap<String, Vec<Diagnostic>>,
    pub written_files: Vec<PathBuf>,
}

impl CompileResult {
    pub fn add(&mut self, path: &str, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics
            .entry(path.to_string())
            .or_default()
            .extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.all_diagnostics().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.all_diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.values().flatten()
    }

    fn add_file(&mut self, path: &str, output: FileOutput) {
        self.add(path, output.diagnostics);
        self.written_files.extend(output.written_files);
    }
}

/// The outcome of compiling one source file.
#[derive(Debug, Default)]
pub struct FileOutput {
    pub diagnostics: Vec<Diagnostic>,
    pub written_files: Vec<PathBuf>,
}

/// A loaded configuration ready to compile sources.
#[derive(Debug)]
pub struct Program {
    config: Config,
    filter: FileFilter,
    emitter: Emitter,
}

impl Program {
    pub fn new(config: Config) -> Result<Self> {
        let filter = config.file_filter()?;
        let emitter = Emitter::new(EmitterOptions {
            indent_size: config.indent_size,
            ..EmitterOptions::default()
        });
        Ok(Self {
            config,
            filter,
            emitter,
        })
    }

    pub fn from_config_file(path: &str) -> Result<Self> {
        Self::new(stsc_options::load_config(path)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The sources under the configured root that pass the filter.
    pub fn source_files(&self) -> Result<Vec<String>> {
        discover_source_files(&self.config.source_root, &self.filter)
    }

    /// Compile every discovered source, files in parallel.
    pub fn compile_all(&self, result: &mut CompileResult) {
        let files = match self.source_files() {
            Ok(files) => files,
            Err(error) => {
                warn!("{}", error);
                result.add(&self.config.source_root, [error.to_diagnostic()]);
                return;
            }
        };
        info!(count = files.len(), root = %self.config.source_root, "compiling sources");

        let outputs: Vec<(String, FileOutput)> = files
            .into_par_iter()
            .map(|file| {
                let output = self.compile_file(&file, None);
                (file, output)
            })
            .collect();
        for (file, output) in outputs {
            result.add_file(&file, output);
        }
    }

    /// Compile one source. Its JavaScript goes to `target_file` when given,
    /// otherwise to the mirrored location under the output root.
    pub fn compile_file(&self, source_file: &str, target_file: Option<&str>) -> FileOutput {
        let source_file = stsc_path::normalize_path(source_file);
        debug!(source = %source_file, "compiling");
        let source = match std::fs::read_to_string(&source_file) {
            Ok(source) => source,
            Err(source) => {
                let error = CompilerError::Read {
                    path: source_file,
                    source,
                };
                warn!("{}", error);
                return FileOutput {
                    diagnostics: vec![error.to_diagnostic()],
                    written_files: Vec::new(),
                };
            }
        };

        let request = self.request(&source_file, target_file);
        let mut emitted = self.emitter.compile(&source, &request);
        if !self.config.is_emit_javascript {
            let typescript = request.typescript_file_name.as_deref().map(PathBuf::from);
            emitted
                .output_files
                .retain(|file| Some(&file.path) == typescript.as_ref());
        }

        let mut output = FileOutput {
            written_files: emitted.output_files.iter().map(|f| f.path.clone()).collect(),
            diagnostics: Vec::new(),
        };
        if let Err(error) = self.emitter.write_output_files(&emitted) {
            let error = CompilerError::from(error);
            warn!("{}", error);
            emitted.diagnostics.push(error.to_diagnostic());
            output.written_files.clear();
        }
        output.diagnostics = emitted.diagnostics;
        output
    }

    fn request(&self, source_file: &str, target_file: Option<&str>) -> CompileRequest {
        CompileRequest {
            source_file_name: source_file.to_string(),
            target_file_name: target_file.map(str::to_string),
            source_root: self.config.source_root.clone(),
            output_root: self.config.javascript_output_root.clone(),
            environment_path: self.config.environment_path.clone(),
            typescript_file_name: self.config.typescript_path(source_file),
        }
    }
}

/// Run a whole compilation. Never fails: problems are in the result.
///
/// A panic anywhere in the run is caught here and reported against the
/// configuration file.
pub fn compile(options: &CompileOptions) -> CompileResult {
    match panic::catch_unwind(AssertUnwindSafe(|| run(options))) {
        Ok(result) => result,
        Err(payload) => {
            let error = CompilerError::from_panic(payload.as_ref());
            error!("{}", error);
            let mut result = CompileResult::default();
            result.add(&options.config_path, [error.to_diagnostic()]);
            result
        }
    }
}

fn run(options: &CompileOptions) -> CompileResult {
    let mut result = CompileResult::default();
    let program = match Program::from_config_file(&options.config_path) {
        Ok(program) => program,
        Err(error) => {
            warn!("{}", error);
            result.add(&options.config_path, [error.to_diagnostic()]);
            return result;
        }
    };

    match (&options.output, &options.file) {
        (Some((source, target)), _) => {
            let output = program.compile_file(source, Some(target));
            result.add_file(&stsc_path::normalize_path(source), output);
        }
        (None, Some(file)) => {
            let output = program.compile_file(file, None);
            result.add_file(&stsc_path::normalize_path(file), output);
        }
        (None, None) => program.compile_all(&mut result),
    }

    if let Some(ts_config) = &options.ts_config {
        if result.has_errors() {
            info!("skipping {} because compilation failed", external::TSC);
        } else {
            result.add(ts_config, external::run_tsc(ts_config));
        }
    }
    result
}
