//! Scenes and scene memoization.
//!
//! A [`Scene`] is the output of one interpretation pass. Scenes are never
//! edited: when the definition changes a new one is built and swapped in.

use std::sync::Arc;

use crate::definition::Definition;
use crate::geometry::{Rect, Segment};
use crate::rewrite::RewriteError;
use crate::turtle;
use crate::viewport::{fit, ViewportTransform};

/// Ordered segments produced by the turtle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    segments: Vec<Segment>,
}

impl Scene {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Segments in draw order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Smallest rectangle containing every segment endpoint.
    ///
    /// An empty scene gives [`Rect::ZERO`].
    pub fn bounds(&self) -> Rect {
        Rect::from_segments(&self.segments)
    }

    /// Rewrite and interpret a definition in one go.
    pub fn generate(definition: &Definition) -> Scene {
        turtle::interpret(&definition.expand(), &definition.turtle_params())
    }

    /// Like [`Scene::generate`], with the rewrite length capped at `limit`.
    pub fn generate_bounded(definition: &Definition, limit: usize) -> Result<Scene, RewriteError> {
        let commands = definition.expand_bounded(limit)?;
        Ok(turtle::interpret(&commands, &definition.turtle_params()))
    }
}

/// Everything a drawing surface needs for one viewport size.
#[derive(Debug, Clone)]
pub struct Frame {
    pub scene: Arc<Scene>,
    pub bounds: Rect,
    pub transform: ViewportTransform,
}

/// Memoized scene for the most recent definition.
///
/// ## Rust Lesson #10: Arc
///
/// `Arc<Scene>` is a shared, reference-counted pointer (like a JS object
/// reference, but thread-safe and immutable). Handing out clones is cheap,
/// and replacing the cached scene just swaps the pointer; anyone still
/// holding the old `Arc` keeps a complete old scene, never a half-built one.
#[derive(Debug, Default)]
pub struct SceneCache {
    entry: Option<CacheEntry>,
    length_limit: Option<usize>,
}

#[derive(Debug)]
struct CacheEntry {
    key: Definition,
    scene: Arc<Scene>,
    bounds: Rect,
}

impl SceneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that rewrites with [`Definition::expand_bounded`].
    pub fn with_length_limit(limit: usize) -> Self {
        Self { entry: None, length_limit: Some(limit) }
    }

    /// Scene for `definition`, rebuilt only if its geometry changed since
    /// the last call.
    pub fn scene_for(&mut self, definition: &Definition) -> Result<Arc<Scene>, RewriteError> {
        self.entry_for(definition).map(|entry| Arc::clone(&entry.scene))
    }

    /// Scene, bounds and a freshly fitted transform for a viewport.
    ///
    /// A resize with an unchanged definition only recomputes the transform.
    pub fn frame(
        &mut self,
        definition: &Definition,
        width: f64,
        height: f64,
        margin: f64,
    ) -> Result<Frame, RewriteError> {
        let entry = self.entry_for(definition)?;
        Ok(Frame {
            scene: Arc::clone(&entry.scene),
            bounds: entry.bounds,
            transform: fit(&entry.bounds, width, height, margin),
        })
    }

    /// Drop the cached scene.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Whether a scene for `definition` is already cached.
    pub fn is_cached(&self, definition: &Definition) -> bool {
        self.entry.as_ref().is_some_and(|e| e.key.same_geometry(definition))
    }

    fn entry_for(&mut self, definition: &Definition) -> Result<&CacheEntry, RewriteError> {
        // A stale entry is dropped even if the rebuild fails.
        let entry = match self.entry.take() {
            Some(entry) if entry.key.same_geometry(definition) => entry,
            _ => self.build(definition)?,
        };
        Ok(&*self.entry.insert(entry))
    }

    fn build(&self, definition: &Definition) -> Result<CacheEntry, RewriteError> {
        let scene = match self.length_limit {
            Some(limit) => Scene::generate_bounded(definition, limit)?,
            None => Scene::generate(definition),
        };
        tracing::info!(
            name = definition.name(),
            iterations = definition.iterations(),
            segments = scene.len(),
            "scene rebuilt"
        );
        let bounds = scene.bounds();
        Ok(CacheEntry {
            key: definition.clone(),
            scene: Arc::new(scene),
            bounds,
        })
    }
}
