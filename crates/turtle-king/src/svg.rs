//! SVG output for scenes.
//!
//! Segments are written in turtle coordinates inside a single group that
//! carries the viewport transform, the same way a drawing surface applies
//! the transform at paint time. The stroke width on that group is divided by
//! the scale so lines keep the same apparent width at every output size.

use quick_xml::escape::escape;

use crate::chain::{chain_segments, ChainConfig};
use crate::color::Color;
use crate::scene::Scene;
use crate::viewport::{fit, ViewportTransform, DEFAULT_MARGIN};

/// Output settings for [`scene_to_svg`].
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Document width in output units
    pub width: f64,
    /// Document height in output units
    pub height: f64,
    /// Free space kept around the drawing
    pub margin: f64,
    /// Apparent line width in output units
    pub stroke_width: f64,
    /// Background fill; `None` leaves the document transparent
    pub background: Option<Color>,
    /// Optional `<title>` text
    pub title: Option<String>,
    /// How segments are joined into polylines
    pub chain: ChainConfig,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            margin: DEFAULT_MARGIN,
            stroke_width: 1.0,
            background: Some(Color::BLACK),
            title: None,
            chain: ChainConfig::default(),
        }
    }
}

/// Fit `scene` to the options' size and write it as an SVG document.
pub fn scene_to_svg(scene: &Scene, options: &SvgOptions) -> String {
    let transform = fit(&scene.bounds(), options.width, options.height, options.margin);
    write_svg(scene, &transform, options)
}

/// Write `scene` as an SVG document using a precomputed transform.
pub fn write_svg(scene: &Scene, transform: &ViewportTransform, options: &SvgOptions) -> String {
    let mut svg = String::new();
    let (w, h) = (fmt_num(options.width), fmt_num(options.height));

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
    ));

    if let Some(title) = &options.title {
        svg.push_str(&format!("  <title>{}</title>\n", escape(title.as_str())));
    }
    if let Some(background) = options.background {
        svg.push_str(&format!("  <rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>\n"));
    }

    let coefficients = transform.svg_matrix();
    let matrix_noise = coefficients.iter().fold(0.0_f64, |m, v| m.max(v.abs())) * NOISE;
    let matrix = coefficients
        .iter()
        .map(|&v| fmt_num(snap(v, matrix_noise)))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        "  <g transform=\"matrix({})\" stroke-width=\"{}\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
        matrix,
        fmt_num(transform.stroke_width(options.stroke_width))
    ));

    let bounds = scene.bounds();
    let extent = [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y]
        .iter()
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    let point_noise = extent * NOISE;

    for chain in chain_segments(scene.segments(), &options.chain) {
        let points = chain
            .points
            .iter()
            .map(|p| format!("{},{}", fmt_num(snap(p.x, point_noise)), fmt_num(snap(p.y, point_noise))))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!("    <polyline stroke=\"{}\" points=\"{}\"/>\n", chain.color, points));
    }

    svg.push_str("  </g>\n</svg>\n");
    svg
}

/// Relative size below which a value is trigonometric noise (`cos 90°`).
const NOISE: f64 = 1e-12;

/// Zero out `v` when it is smaller than `noise`, an absolute threshold
/// taken relative to the largest magnitude in the same group of numbers.
fn snap(v: f64, noise: f64) -> f64 {
    if v.abs() <= noise { 0.0 } else { v }
}

/// Shortest decimal form that reads back as the same `f64`.
fn fmt_num(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { format!("{v}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;
    use crate::geometry::Segment;

    fn koch_scene() -> Scene {
        let def = Definition::builder("F")
            .rule("F", "F+F-F-FF+F+F-F")
            .symbol_color("F", "orange")
            .iterations(1)
            .build()
            .unwrap();
        Scene::generate(&def)
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.125), "0.125");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-2.5), "-2.5");
        assert_eq!(fmt_num(1.5e-7), "0.00000015");
        assert_eq!(fmt_num(6600000.0), "6600000");
    }

    #[test]
    fn noise_is_snapped_relative_to_magnitude() {
        assert_eq!(snap(6.123233995736766e-17, 1e-12), 0.0);
        assert_eq!(snap(-4e-13, 1e-12), 0.0);
        assert_eq!(snap(1e-9, 1e-12), 1e-9);
        // A small scene keeps its small coordinates.
        assert_eq!(snap(1e-6, 1e-4 * NOISE), 1e-6);
    }

    #[test]
    fn document_structure() {
        let svg = scene_to_svg(&koch_scene(), &SvgOptions::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 1000 700""#));
        assert!(svg.contains(r##"fill="#000000""##));
        assert!(svg.contains("transform=\"matrix("));
        assert!(svg.contains(r##"stroke="#ffc800""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn connected_path_is_one_polyline() {
        let svg = scene_to_svg(&koch_scene(), &SvgOptions::default());
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains(r#"points="0,0 1,0 1,1 2,1 2,0 2,-1 3,-1 3,0 4,0""#));
    }

    #[test]
    fn stroke_width_is_divided_by_scale() {
        let scene = Scene::new(vec![
            Segment::new(0.0, 0.0, 2.0, 0.0, Color::WHITE),
            Segment::new(2.0, 0.0, 2.0, 2.0, Color::WHITE),
        ]);
        let options = SvgOptions { width: 100.0, height: 100.0, margin: 0.0, ..SvgOptions::default() };
        let svg = scene_to_svg(&scene, &options);
        assert!(svg.contains(r#"stroke-width="0.02""#), "{svg}");
    }

    #[test]
    fn tiny_step_length_keeps_stroke_and_points() {
        let def = Definition::builder("F+F").step_length(0.0001).build().unwrap();
        let scene = Scene::generate(&def);
        let svg = scene_to_svg(&scene, &SvgOptions::default());

        assert!(!svg.contains(r#"stroke-width="0""#), "{svg}");
        assert!(svg.contains(r#"points="0,0 0.0001,0 0.0001,0.0001""#), "{svg}");
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn sub_micro_step_is_not_rounded_away() {
        let def = Definition::builder("F").step_length(1e-7).build().unwrap();
        let svg = scene_to_svg(&Scene::generate(&def), &SvgOptions::default());
        assert!(svg.contains(r#"points="0,0 0.0000001,0""#), "{svg}");
        assert!(!svg.contains(r#"stroke-width="0""#), "{svg}");
    }

    #[test]
    fn title_is_escaped() {
        let options = SvgOptions { title: Some("Trees & <Ferns>".into()), ..SvgOptions::default() };
        let svg = scene_to_svg(&Scene::default(), &options);
        assert!(svg.contains("<title>Trees &amp; &lt;Ferns&gt;</title>"));
    }

    #[test]
    fn transparent_background_omits_rect() {
        let options = SvgOptions { background: None, ..SvgOptions::default() };
        let svg = scene_to_svg(&koch_scene(), &options);
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn output_parses_as_svg() {
        let svg = scene_to_svg(&koch_scene(), &SvgOptions::default());
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).expect("valid SVG");
        assert_eq!(tree.size().width(), 1000.0);
        assert_eq!(tree.size().height(), 700.0);
    }

    #[test]
    fn empty_scene_still_valid() {
        let svg = scene_to_svg(&Scene::default(), &SvgOptions::default());
        assert!(!svg.contains("<polyline"));
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }
}
