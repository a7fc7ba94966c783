//! stsc_sourcemap: Source map generation.
//!
//! The printer records `Mapping`s while it writes JavaScript; this crate
//! hands them to the `sourcemap` crate, which owns the V3 format. All lines
//! and columns are zero-based.

use thiserror::Error;

pub use sourcemap::SourceMap;

/// A single mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_index: Option<u32>,
    pub original_line: u32,
    pub original_column: u32,
    pub name_index: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("cannot encode source map: {0}")]
    Encode(#[from] sourcemap::Error),
    #[error("source map is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Accumulates the sources, names and mappings of one generated file.
pub struct SourceMapBuilder {
    inner: sourcemap::SourceMapBuilder,
    mappings: Vec<Mapping>,
}

impl SourceMapBuilder {
    pub fn new(file: Option<&str>) -> Self {
        Self {
            inner: sourcemap::SourceMapBuilder::new(file),
            mappings: Vec::new(),
        }
    }

    /// Register a source file, returning its index. Registering the same
    /// path twice returns the first index.
    pub fn add_source(&mut self, source: &str) -> u32 {
        self.inner.add_source(source)
    }

    /// Embed the text of a registered source.
    pub fn set_source_content(&mut self, index: u32, content: &str) {
        self.inner.set_source_contents(index, Some(content));
    }

    pub fn add_name(&mut self, name: &str) -> u32 {
        self.inner.add_name(name)
    }

    pub fn add_mapping(&mut self, mapping: Mapping) {
        self.mappings.push(mapping);
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Finish the map. Mappings are ordered by generated position; of two
    /// mappings at the same position the first one added wins.
    pub fn build(mut self) -> SourceMap {
        self.mappings
            .sort_by_key(|m| (m.generated_line, m.generated_column));
        self.mappings
            .dedup_by_key(|m| (m.generated_line, m.generated_column));
        for m in &self.mappings {
            self.inner.add_raw(
                m.generated_line,
                m.generated_column,
                m.original_line,
                m.original_column,
                m.source_index,
                m.name_index,
                false,
            );
        }
        self.inner.into_sourcemap()
    }

    /// Finish the map and encode it as JSON.
    pub fn to_json(self) -> Result<String, SourceMapError> {
        let mut out = Vec::new();
        self.build().to_writer(&mut out)?;
        Ok(String::from_utf8(out)?)
    }
}
