//! Definition documents.
//!
//! A definition is a JSON or YAML document with camelCase keys:
//!
//! ```json
//! {
//!   "name": "Quadratic Koch",
//!   "axiom": "F",
//!   "rules": { "F": "F+F-F-FF+F+F-F" },
//!   "stepLength": 1.0,
//!   "angleIncrement": 90,
//!   "iterations": 3,
//!   "allLetterForward": true,
//!   "symbolColors": { "F": "orange" }
//! }
//! ```
//!
//! Everything but `axiom` is optional. snake_case keys are accepted too.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use turtle_king::{Definition, DefinitionBuilder, DefinitionError};

/// Document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    /// Also used for unknown extensions and stdin; YAML reads JSON too.
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// A definition document as written on disk, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionFile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub axiom: Option<String>,

    /// Symbol → replacement
    #[serde(default)]
    pub rules: BTreeMap<String, String>,

    #[serde(default, alias = "step_length")]
    pub step_length: Option<f64>,

    /// Degrees
    #[serde(default, alias = "angle_increment")]
    pub angle_increment: Option<f64>,

    #[serde(default)]
    pub iterations: Option<u32>,

    #[serde(default, alias = "all_letter_forward")]
    pub all_letter_forward: Option<bool>,

    /// Symbol → color name or `#hex`
    #[serde(default, alias = "symbol_colors")]
    pub symbol_colors: BTreeMap<String, String>,
}

impl DefinitionFile {
    /// Parse a document.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => serde_json::from_str(content).context("Failed to parse definition JSON"),
            FileFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse definition YAML"),
        }
    }

    /// Load a document from a file, or from stdin when the path is `-`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.as_os_str() == "-" {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read definition from stdin")?;
            return Self::parse(&content, FileFormat::Yaml);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read definition file {}", path.display()))?;
        Self::parse(&content, FileFormat::from_path(path))
            .with_context(|| format!("Invalid definition file {}", path.display()))
    }

    /// Validate into a [`Definition`]. Absent fields take the defaults.
    pub fn into_definition(self) -> Result<Definition, DefinitionError> {
        let mut builder = DefinitionBuilder::new();

        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(axiom) = self.axiom {
            builder = builder.axiom(axiom);
        }
        if let Some(step) = self.step_length {
            builder = builder.step_length(step);
        }
        if let Some(angle) = self.angle_increment {
            builder = builder.angle_increment(angle);
        }
        if let Some(iterations) = self.iterations {
            builder = builder.iterations(iterations);
        }
        if let Some(all) = self.all_letter_forward {
            builder = builder.all_letter_forward(all);
        }
        for (symbol, replacement) in self.rules {
            builder = builder.rule(symbol, replacement);
        }
        for (symbol, spec) in self.symbol_colors {
            builder = builder.symbol_color(symbol, spec);
        }

        builder.build()
    }
}
