//! # turtle-king
//!
//! L-system fractals: rewrite an axiom, walk the result with a turtle, and
//! fit the drawn segments into a viewport.
//!
//! ```text
//! Definition -> rewrite -> commands -> interpret -> Scene -> bounds -> fit
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod chain;
pub mod color;
pub mod definition;
pub mod geometry;
pub mod presets;
pub mod rewrite;
pub mod scene;
pub mod svg;
pub mod turtle;
pub mod viewport;

// Re-export common types at crate root for convenience.
pub use chain::{chain_segments, ChainConfig, ChainStats, ColoredChain};
pub use color::{Color, Palette};
pub use definition::{Definition, DefinitionBuilder, DefinitionError};
pub use geometry::{Point, Rect, Segment};
pub use presets::Preset;
pub use rewrite::{expansion_lengths, rewrite, rewrite_bounded, RewriteError};
pub use scene::{Frame, Scene, SceneCache};
pub use svg::{scene_to_svg, write_svg, SvgOptions};
pub use turtle::{interpret, interpret_with_diagnostics, Diagnostics, TurtleParams, TurtleState};
pub use viewport::{fit, ViewportTransform, DEFAULT_MARGIN};
