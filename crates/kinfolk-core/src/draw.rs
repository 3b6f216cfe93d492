//! Drawing styles shared by the renderer and the drawing surfaces.
//!
//! - [`StrokeDefinition`] describes connector lines and node outlines
//! - [`TextDefinition`] describes node label lines
//! - [`LayeredOutput`] collects SVG nodes in z-order for SVG-backed surfaces

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::{TextAlign, TextDefinition};
