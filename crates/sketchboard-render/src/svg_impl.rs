//! SVG surface backend.

use crate::renderer::{RenderResult, Surface};
use kurbo::{BezPath, Cap, Join, Point, Size, Stroke};
use peniko::Color;
use std::fmt::Write;
use std::path::Path;

/// Font stack used for text elements.
const FONT_FAMILY: &str = "Arial, sans-serif";

/// Builds a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.size.width,
            h = self.size.height,
            body = self.body
        )
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        std::fs::write(path.as_ref(), self.to_svg())?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// `#rrggbb` plus a separate opacity, which SVG 1.1 viewers understand.
fn paint(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        f64::from(rgba.a) / 255.0,
    )
}

fn cap_name(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Square => "square",
        Cap::Round => "round",
    }
}

fn join_name(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Surface for SvgSurface {
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()> {
        self.size = size;
        self.body.clear();
        let (fill, opacity) = paint(background);
        writeln!(
            self.body,
            "  <rect width=\"100%\" height=\"100%\" fill=\"{fill}\" fill-opacity=\"{opacity}\"/>"
        )?;
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> RenderResult<()> {
        if path.elements().is_empty() {
            return Ok(());
        }
        let (hex, opacity) = paint(color);
        writeln!(
            self.body,
            "  <path d=\"{}\" fill=\"none\" stroke=\"{hex}\" stroke-opacity=\"{opacity}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"{}\"/>",
            path.to_svg(),
            stroke.width,
            cap_name(stroke.start_cap),
            join_name(stroke.join),
        )?;
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()> {
        if path.elements().is_empty() {
            return Ok(());
        }
        let (hex, opacity) = paint(color);
        writeln!(
            self.body,
            "  <path d=\"{}\" fill=\"{hex}\" fill-opacity=\"{opacity}\" stroke=\"none\"/>",
            path.to_svg()
        )?;
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        color: Color,
    ) -> RenderResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let (hex, opacity) = paint(color);
        writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{font_size}\" dominant-baseline=\"text-before-edge\" fill=\"{hex}\" fill-opacity=\"{opacity}\" xml:space=\"preserve\">{}</text>",
            origin.x,
            origin.y,
            escape(text)
        )?;
        Ok(())
    }
}
