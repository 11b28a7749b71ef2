//! Segment chaining - join consecutive turtle segments into polylines.
//!
//! The turtle emits one segment per draw command. Runs of segments where
//! each one starts where the previous one ended (and has the same color)
//! become a single polyline, which keeps SVG output small. Branch restores
//! (`]`) and color changes start a new chain.
//!
//! Unlike a general line chainer this never reorders segments: chains come
//! out in draw order, so the output is as reproducible as the scene.

use crate::color::Color;
use crate::geometry::{Point, Segment};

/// A polyline of one color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredChain {
    pub color: Color,
    pub points: Vec<Point>,
}

/// Configuration for segment chaining.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Maximum distance between an end point and the next start point for
    /// them to count as connected, in turtle units.
    /// Default: 1e-9 (floating-point noise from repeated cos/sin)
    pub tolerance: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl ChainConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

/// Chain `segments` (in draw order) into colored polylines.
pub fn chain_segments(segments: &[Segment], config: &ChainConfig) -> Vec<ColoredChain> {
    let tolerance_sq = config.tolerance * config.tolerance;
    let mut chains: Vec<ColoredChain> = Vec::new();

    for segment in segments {
        if let Some(chain) = chains.last_mut() {
            let joins = chain.color == segment.color
                && chain
                    .points
                    .last()
                    .is_some_and(|end| distance_sq(*end, segment.start()) <= tolerance_sq);
            if joins {
                chain.points.push(segment.end());
                continue;
            }
        }

        chains.push(ColoredChain {
            color: segment.color,
            points: vec![segment.start(), segment.end()],
        });
    }

    chains
}

#[inline]
fn distance_sq(a: Point, b: Point) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

impl ColoredChain {
    /// Number of segments this chain replaces.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// How much chaining shrank a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    pub segments: usize,
    pub chains: usize,
    /// Segments in the longest chain
    pub longest: usize,
}

impl ChainStats {
    /// Every segment lands in exactly one chain, so the segment count is
    /// recovered from the chains themselves.
    pub fn from_chains(chains: &[ColoredChain]) -> Self {
        chains.iter().fold(
            Self { segments: 0, chains: chains.len(), longest: 0 },
            |stats, chain| Self {
                segments: stats.segments + chain.segment_count(),
                longest: stats.longest.max(chain.segment_count()),
                ..stats
            },
        )
    }

    /// Mean segments per chain; 0 for an empty scene.
    pub fn mean_length(&self) -> f64 {
        if self.chains == 0 { 0.0 } else { self.segments as f64 / self.chains as f64 }
    }

    /// Fraction of SVG elements saved compared to one element per segment.
    pub fn reduction(&self) -> f64 {
        if self.segments == 0 { 0.0 } else { 1.0 - self.chains as f64 / self.segments as f64 }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(x1, y1, x2, y2, Color::WHITE)
    }

    #[test]
    fn chain_empty() {
        assert!(chain_segments(&[], &ChainConfig::default()).is_empty());
    }

    #[test]
    fn chain_connected_run() {
        let segments = vec![
            white(0.0, 0.0, 1.0, 0.0),
            white(1.0, 0.0, 1.0, 1.0),
            white(1.0, 1.0, 2.0, 1.0),
        ];
        let chains = chain_segments(&segments, &ChainConfig::default());

        assert_eq!(chains.len(), 1, "Should chain into 1 polyline");
        assert_eq!(chains[0].points.len(), 4);
    }

    #[test]
    fn branch_restore_starts_new_chain() {
        // F[+F]F: the third segment starts back at (1, 0).
        let segments = vec![
            white(0.0, 0.0, 1.0, 0.0),
            white(1.0, 0.0, 1.0, 1.0),
            white(1.0, 0.0, 2.0, 0.0),
        ];
        let chains = chain_segments(&segments, &ChainConfig::default());
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[1].points, vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
    }

    #[test]
    fn color_change_starts_new_chain() {
        let segments = vec![
            white(0.0, 0.0, 1.0, 0.0),
            Segment::new(1.0, 0.0, 2.0, 0.0, Color::rgb(255, 0, 0)),
        ];
        let chains = chain_segments(&segments, &ChainConfig::default());
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[1].color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn chain_respects_tolerance() {
        let segments = vec![white(0.0, 0.0, 10.0, 10.0), white(10.05, 10.05, 20.0, 10.0)];

        let chains = chain_segments(&segments, &ChainConfig::with_tolerance(0.1));
        assert_eq!(chains.len(), 1, "Should chain with tolerance 0.1");

        let chains = chain_segments(&segments, &ChainConfig::with_tolerance(0.01));
        assert_eq!(chains.len(), 2, "Should not chain with tolerance 0.01");
    }

    #[test]
    fn chaining_preserves_segments_and_order() {
        let segments = vec![
            white(0.0, 0.0, 1.0, 0.0),
            white(1.0, 0.0, 1.0, 1.0),
            white(1.0, 0.0, 2.0, 0.0),
            white(2.0, 0.0, 3.0, 0.0),
        ];
        let chains = chain_segments(&segments, &ChainConfig::default());
        let rebuilt: Vec<Segment> = chains
            .iter()
            .flat_map(|c| c.points.windows(2).map(move |w| Segment::new(w[0].x, w[0].y, w[1].x, w[1].y, c.color)))
            .collect();
        assert_eq!(rebuilt, segments);
    }

    #[test]
    fn chain_stats() {
        let segments = vec![
            white(0.0, 0.0, 1.0, 0.0),
            white(1.0, 0.0, 2.0, 0.0),
            white(5.0, 5.0, 6.0, 6.0),
        ];
        let chains = chain_segments(&segments, &ChainConfig::default());
        let stats = ChainStats::from_chains(&chains);

        assert_eq!(stats, ChainStats { segments: 3, chains: 2, longest: 2 });
        assert!((stats.mean_length() - 1.5).abs() < 1e-12);
        assert!((stats.reduction() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = ChainStats::from_chains(&[]);
        assert_eq!(stats.mean_length(), 0.0);
        assert_eq!(stats.reduction(), 0.0);
    }
}
