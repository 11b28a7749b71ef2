//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `render` - Render an L-system to SVG or PNG
//! - `expand` - Print the rewritten command string
//! - `stats` - Report expansion growth, segment counts and bounds
//! - `presets` - List built-in definitions

pub mod common;
pub mod definition_file;
pub mod inspect;
pub mod render;

pub use inspect::{cmd_expand, cmd_presets, cmd_stats, ExpandArgs, StatsArgs};
pub use render::{cmd_render, RenderArgs};
