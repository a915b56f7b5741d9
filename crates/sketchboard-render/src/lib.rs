//! SketchBoard Render Library
//!
//! Draws a frame of shapes onto any [`Surface`]. The bundled backend writes
//! standalone SVG documents.

mod engine;
mod renderer;
mod svg_impl;

pub use engine::DrawingEngine;
pub use renderer::{RenderContext, RenderResult, RendererError, Surface};
pub use svg_impl::SvgSurface;
