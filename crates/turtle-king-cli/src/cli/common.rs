//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use turtle_king::{Color, Definition, Preset};

use super::definition_file::DefinitionFile;

/// Rewritten strings longer than this are refused unless raised with
/// `--max-length`.
pub const DEFAULT_MAX_LENGTH: usize = 10_000_000;

/// Where the definition comes from, shared by every command.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Definition file (.json, .yaml, .yml), or - for stdin
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    pub definition: Option<PathBuf>,

    /// Use a built-in preset instead of a file (see `presets`)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Override the definition's iteration count
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Refuse to expand beyond this many symbols
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,
}

impl SourceArgs {
    /// Load and validate the definition, applying `--iterations`.
    pub fn load(&self) -> Result<Definition> {
        let definition = match (&self.preset, &self.definition) {
            (Some(name), _) => Preset::from_name(name)
                .map(|p| p.definition())
                .ok_or_else(|| anyhow!("Unknown preset '{}' (run `turtle-king presets`)", name))?,
            (None, Some(path)) => DefinitionFile::load(path)?
                .into_definition()
                .with_context(|| format!("Invalid definition in {}", path.display()))?,
            (None, None) => bail!("No definition file or preset specified"),
        };

        tracing::info!(
            name = definition.name(),
            axiom = definition.axiom(),
            rules = definition.rules().len(),
            "definition loaded"
        );

        Ok(match self.iterations {
            Some(n) => definition.with_iterations(n),
            None => definition,
        })
    }

    /// Rewrite the definition, honoring `--max-length`.
    pub fn expand(&self, definition: &Definition) -> Result<String> {
        definition
            .expand_bounded(self.max_length)
            .context("Expansion too long; lower --iterations or raise --max-length")
    }
}

/// Parse a strictly positive number (sizes).
pub fn positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("must be a positive number, got {s}"))
    }
}

/// Parse a number that may be zero but not negative (margins).
pub fn non_negative_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("must be zero or a positive number, got {s}"))
    }
}

/// Background fill; `None` means transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background(pub Option<Color>);

/// Parse a background color: `none`/`transparent`, or any CSS color.
pub fn parse_background(s: &str) -> Result<Background, String> {
    match s.trim().to_lowercase().as_str() {
        "none" | "transparent" => Ok(Background(None)),
        other => Color::from_css(other)
            .map(|c| Background(Some(c)))
            .ok_or_else(|| format!("unknown color '{s}'")),
    }
}
