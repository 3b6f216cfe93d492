//! Drawing surfaces.
//!
//! The renderer draws through the [`Surface`] trait, an immediate-mode 2-D
//! API that mirrors the handful of canvas operations a family tree needs.
//! Two implementations ship with the crate:
//!
//! - [`SvgSurface`] builds an SVG document
//! - [`RecordingSurface`] keeps every call as a [`DrawCommand`]

mod recording;
mod svg;

pub use self::recording::{DrawCommand, RecordingSurface};
pub use self::svg::SvgSurface;

use kinfolk_core::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// An immediate-mode drawing target of known pixel size.
///
/// Every call draws at once; a surface keeps no scene graph the renderer
/// could query, so callers clear it before drawing a fresh frame.
pub trait Surface {
    /// Pixel size of the surface.
    fn size(&self) -> Size;

    /// Erases everything drawn inside `region`.
    fn clear(&mut self, region: Bounds);

    /// Draws a rounded rectangle filling `bounds`, optionally filled and/or outlined.
    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeDefinition>,
    );

    /// Draws a filled circle.
    fn dot(&mut self, center: Point, radius: f32, fill: Color);

    /// Draws a straight line.
    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition);

    /// Draws a quadratic Bézier curve from `from` to `to` bending towards `control`.
    fn quadratic_curve(&mut self, from: Point, control: Point, to: Point, stroke: &StrokeDefinition);

    /// Draws one line of text anchored at `position` (vertical middle of the line).
    fn text(&mut self, position: Point, content: &str, style: &TextDefinition);

    /// Erases the whole surface.
    fn clear_all(&mut self) {
        let region = Bounds::new_from_top_left(Point::default(), self.size());
        self.clear(region);
    }
}

/// A surface whose pixel size can change, e.g. when the host window resizes.
pub trait Resizable {
    fn resize(&mut self, size: Size);
}
