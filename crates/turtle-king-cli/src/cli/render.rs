//! Render command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use image::{ImageFormat, RgbaImage};
use resvg::usvg;
use tiny_skia::Pixmap;
use turtle_king::{fit, interpret_with_diagnostics, write_svg, Diagnostics, SvgOptions, DEFAULT_MARGIN};

use super::common::{non_negative_f64, parse_background, positive_f64, Background, SourceArgs};

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file (.svg or .png); SVG goes to stdout when omitted or -
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output width
    #[arg(long, default_value = "1000", value_parser = positive_f64)]
    pub width: f64,

    /// Output height
    #[arg(long, default_value = "700", value_parser = positive_f64)]
    pub height: f64,

    /// Free space around the drawing
    #[arg(long, default_value_t = DEFAULT_MARGIN, value_parser = non_negative_f64)]
    pub margin: f64,

    /// Apparent line width
    #[arg(long, default_value = "1", value_parser = positive_f64)]
    pub stroke_width: f64,

    /// Background color, or "none" for transparent
    #[arg(long, default_value = "black", value_parser = parse_background)]
    pub background: Background,
}

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq)]
enum Target {
    Stdout,
    Svg(PathBuf),
    Png(PathBuf),
}

impl Target {
    fn from_output(output: Option<&Path>) -> Self {
        match output {
            None => Target::Stdout,
            Some(p) if p.as_os_str() == "-" => Target::Stdout,
            Some(p) => match p.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("png") => Target::Png(p.to_path_buf()),
                _ => Target::Svg(p.to_path_buf()),
            },
        }
    }
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    let definition = args.source.load()?;
    let target = Target::from_output(args.output.as_deref());

    // Raster output needs whole pixels; keep the SVG the same size.
    let (width, height) = match target {
        Target::Png(_) => (args.width.round().max(1.0), args.height.round().max(1.0)),
        _ => (args.width, args.height),
    };

    let start = Instant::now();
    let commands = args.source.expand(&definition)?;
    let (scene, diagnostics) = interpret_with_diagnostics(&commands, &definition.turtle_params());
    report_diagnostics(&diagnostics);

    let bounds = scene.bounds();
    let transform = fit(&bounds, width, height, args.margin);
    tracing::info!(
        symbols = commands.len(),
        segments = scene.len(),
        scale = transform.scale(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "scene generated"
    );

    let options = SvgOptions {
        width,
        height,
        margin: args.margin,
        stroke_width: args.stroke_width,
        background: args.background.0,
        title: Some(definition.name().to_string()),
        ..SvgOptions::default()
    };
    let svg = write_svg(&scene, &transform, &options);

    match target {
        Target::Stdout => {
            io::stdout()
                .write_all(svg.as_bytes())
                .context("Failed to write SVG to stdout")?;
        }
        Target::Svg(path) => {
            fs::write(&path, &svg).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote SVG");
        }
        Target::Png(path) => {
            let image = rasterize(&svg, width as u32, height as u32)?;
            image
                .save_with_format(&path, ImageFormat::Png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote PNG");
        }
    }

    Ok(())
}

/// Log anything the interpreter had to tolerate.
pub fn report_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.unmatched_closes > 0 {
        tracing::warn!(count = diagnostics.unmatched_closes, "']' without matching '[' ignored");
    }
    if diagnostics.unclosed_branches > 0 {
        tracing::warn!(count = diagnostics.unclosed_branches, "'[' never closed");
    }
    if !diagnostics.ignored_symbols.is_empty() {
        let symbols: String = diagnostics.ignored_symbols.keys().collect();
        tracing::debug!(symbols = %symbols, "symbols without drawing effect");
    }
}

/// Rasterize an SVG document with resvg.
fn rasterize(svg: &str, width: u32, height: u32) -> Result<RgbaImage> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).context("Failed to parse generated SVG")?;

    let mut pixmap = Pixmap::new(width, height).context("Failed to create pixmap")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    RgbaImage::from_raw(width, height, pixmap.take()).context("Failed to create image")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_from_extension() {
        assert_eq!(Target::from_output(None), Target::Stdout);
        assert_eq!(Target::from_output(Some(Path::new("-"))), Target::Stdout);
        assert_eq!(
            Target::from_output(Some(Path::new("out/tree.PNG"))),
            Target::Png(PathBuf::from("out/tree.PNG"))
        );
        assert_eq!(
            Target::from_output(Some(Path::new("tree.svg"))),
            Target::Svg(PathBuf::from("tree.svg"))
        );
    }

    #[test]
    fn rasterize_produces_requested_size() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30" viewBox="0 0 40 30">
<rect width="100%" height="100%" fill="#ff0000"/></svg>"##;
        let image = rasterize(svg, 40, 30).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(image.get_pixel(20, 15).0, [255, 0, 0, 255]);
    }
}
