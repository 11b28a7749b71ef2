//! Fit a scene into an output region.
//!
//! The transform, applied to turtle-space points, is in order:
//!
//! 1. move the bounds center to the origin
//! 2. scale by `(s, -s)` (the flip turns the turtle's y-up into y-down)
//! 3. rotate by -90° so the drawing grows upward instead of along +x
//! 4. move the origin to the viewport center
//!
//! Because of the quarter turn, the bounds' *width* is measured against the
//! viewport's *height* and vice versa.

use lyon_geom::euclid::{default::Transform2D, point2, vec2, Angle};

use crate::geometry::{Point, Rect};

/// Fixed display rotation, in degrees.
pub const ORIENTATION_DEGREES: f64 = -90.0;

/// Margin used when callers don't pick one, in output units.
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Scale used when the bounds have no extent on either axis.
pub const FALLBACK_SCALE: f64 = 1.0;

/// Turtle space → output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    matrix: Transform2D<f64>,
    scale: f64,
}

impl ViewportTransform {
    /// Uniform scale factor (before the y flip).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The underlying affine matrix.
    pub fn matrix(&self) -> Transform2D<f64> {
        self.matrix
    }

    /// Map a turtle-space point into output space.
    pub fn apply(&self, p: Point) -> Point {
        let q = self.matrix.transform_point(point2(p.x, p.y));
        Point::new(q.x, q.y)
    }

    /// Stroke width to use in turtle space so lines come out `base` units
    /// wide after scaling.
    pub fn stroke_width(&self, base: f64) -> f64 {
        base / self.scale
    }

    /// Coefficients `[a, b, c, d, e, f]` as used by SVG `matrix(...)`.
    pub fn svg_matrix(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m.m11, m.m12, m.m21, m.m22, m.m31, m.m32]
    }
}

/// Compute the transform that centers `bounds` in a `width` × `height`
/// viewport, keeping `margin` free on every side.
///
/// Never divides by zero: an axis with no extent is left out of the scale
/// choice, and with no extent at all the scale is [`FALLBACK_SCALE`]. A
/// margin that would leave no room on an axis is ignored for that axis.
pub fn fit(bounds: &Rect, width: f64, height: f64, margin: f64) -> ViewportTransform {
    let scale = fit_scale(bounds, width, height, margin);
    let center = bounds.center();

    let matrix = Transform2D::translation(width / 2.0, height / 2.0)
        .pre_rotate(Angle::radians(ORIENTATION_DEGREES.to_radians()))
        .pre_scale(scale, -scale)
        .pre_translate(vec2(-center.x, -center.y));

    ViewportTransform { matrix, scale }
}

fn fit_scale(bounds: &Rect, width: f64, height: f64, margin: f64) -> f64 {
    // Swapped: turtle x ends up vertical after the quarter turn.
    let scale_x = axis_scale(usable_span(height, margin), bounds.width());
    let scale_y = axis_scale(usable_span(width, margin), bounds.height());

    let scale = match (scale_x, scale_y) {
        (Some(sx), Some(sy)) => sx.min(sy),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => FALLBACK_SCALE,
    };

    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::debug!(width, height, margin, scale, "unusable viewport, using fallback scale");
        FALLBACK_SCALE
    }
}

fn usable_span(side: f64, margin: f64) -> f64 {
    let inner = side - 2.0 * margin.max(0.0);
    if inner > 0.0 { inner } else { side }
}

fn axis_scale(span: f64, extent: f64) -> Option<f64> {
    (extent.is_finite() && extent > 0.0).then(|| span / extent)
}
