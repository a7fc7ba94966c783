//! stsc_emitter: JavaScript and source map output.
//!
//! Coordinates the per-file pipeline and output generation:
//! 1. Parse the source into an arena
//! 2. Generate JavaScript with mappings
//! 3. Build the source map
//! 4. Write output files

mod error;

pub use error::{EmitError, Result};

use bumpalo::Bump;
use std::path::{Path, PathBuf};
use stsc_ast::node::Module;
use stsc_diagnostics::{messages, Diagnostic};
use stsc_parser::{parse_module, ParserConfig};
use stsc_path::Extension;
use stsc_printer::{generate, PrinterOptions, DEFAULT_ENVIRONMENT};
use stsc_sourcemap::SourceMapBuilder;
use tracing::{debug, warn};

/// What to compile and where the output goes. Paths use forward slashes.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    /// The `.st` source file.
    pub source_file_name: String,
    /// The `.js` output file. Derived from the roots when `None`.
    pub target_file_name: Option<String>,
    pub source_root: String,
    pub output_root: String,
    /// Environment module: a path (rooted, `./` or `../`) or a package name.
    pub environment_path: Option<String>,
    /// Where to write a TypeScript copy of the module, if anywhere.
    pub typescript_file_name: Option<String>,
}

impl CompileRequest {
    /// The JavaScript output path.
    pub fn target_path(&self) -> String {
        match &self.target_file_name {
            Some(target) => stsc_path::normalize_path(target),
            None => stsc_path::output_path(
                &self.source_file_name,
                &self.source_root,
                &self.output_root,
                Extension::Js,
            ),
        }
    }
}

/// Options shared by every file of a compilation.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Columns per indentation level in sources.
    pub indent_size: u32,
    /// Whether to write a `.js.map` next to the JavaScript.
    pub emit_source_map: bool,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            emit_source_map: true,
        }
    }
}

/// The result of compiling one source file.
#[derive(Debug)]
pub struct EmitResult {
    /// The emitted JavaScript content.
    pub javascript: String,
    /// The source map JSON.
    pub source_map: String,
    /// The TypeScript copy, if requested.
    pub typescript: Option<String>,
    /// Parser and generator diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// Output file paths and contents.
    pub output_files: Vec<OutputFile>,
}

impl EmitResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// A file produced by the emitter.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// The output file path.
    pub path: PathBuf,
    /// The content of the file.
    pub text: String,
}

/// The emitter produces output files for one source file at a time.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    pub options: EmitterOptions,
}

impl Emitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self { options }
    }

    /// Parse and emit `source`, the text of `request.source_file_name`.
    pub fn compile(&self, source: &str, request: &CompileRequest) -> EmitResult {
        let arena = Bump::new();
        let config = ParserConfig {
            indent_size: self.options.indent_size,
        };
        let parsed = parse_module(&arena, source, &request.source_file_name, config);
        let mut result = self.emit(parsed.module, request);
        let mut diagnostics = parsed.diagnostics;
        diagnostics.append(&mut result.diagnostics);
        result.diagnostics = diagnostics;
        result
    }

    /// Emit a parsed module.
    pub fn emit(&self, module: &Module<'_>, request: &CompileRequest) -> EmitResult {
        let target = request.target_path();
        let target_dir = stsc_path::get_directory_path(&target);
        debug!(source = %request.source_file_name, target = %target, "emit");

        let printer_options = PrinterOptions {
            environment: environment_specifier(&target_dir, request.environment_path.as_deref()),
            indent_size: self.options.indent_size,
            ..PrinterOptions::default()
        };
        let generated = generate(module, &printer_options);

        let map_path = format!("{}.map", target);
        let mut builder = SourceMapBuilder::new(Some(stsc_path::get_base_name(&target)));
        builder.add_source(&stsc_path::get_relative_path(
            &target_dir,
            &request.source_file_name,
        ));
        for mapping in generated.mappings {
            builder.add_mapping(mapping);
        }
        let mut diagnostics = generated.diagnostics;
        let source_map = match builder.to_json() {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, target = %target, "source map encoding failed");
                diagnostics.push(Diagnostic::global(
                    &messages::UNEXPECTED_FAILURE_0,
                    &[error.to_string().as_str()],
                ));
                String::new()
            }
        };

        let mut javascript = generated.javascript.clone();
        if self.options.emit_source_map {
            javascript.push_str("//# sourceMappingURL=");
            javascript.push_str(stsc_path::get_base_name(&map_path));
            javascript.push('\n');
        }

        let mut output_files = vec![OutputFile {
            path: PathBuf::from(&target),
            text: javascript.clone(),
        }];
        if self.options.emit_source_map {
            output_files.push(OutputFile {
                path: PathBuf::from(&map_path),
                text: source_map.clone(),
            });
        }
        let typescript = request.typescript_file_name.as_ref().map(|path| {
            output_files.push(OutputFile {
                path: PathBuf::from(path),
                text: generated.javascript.clone(),
            });
            generated.javascript.clone()
        });

        EmitResult {
            javascript,
            source_map,
            typescript,
            diagnostics,
            output_files,
        }
    }

    /// Write output files to disk, creating directories as needed.
    pub fn write_output_files(&self, result: &EmitResult) -> Result<()> {
        for file in &result.output_files {
            write_file(&file.path, &file.text)?;
        }
        Ok(())
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    let io_error = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, text).map_err(io_error)
}

/// The `require` specifier of the environment module as seen from the
/// output directory. Package names are used unchanged.
pub fn environment_specifier(target_dir: &str, environment_path: Option<&str>) -> String {
    match environment_path {
        None => DEFAULT_ENVIRONMENT.to_string(),
        Some(path) if is_path_like(path) => stsc_path::module_specifier(target_dir, path),
        Some(package) => package.to_string(),
    }
}

fn is_path_like(path: &str) -> bool {
    stsc_path::is_rooted(path) || path.starts_with("./") || path.starts_with("../")
}
