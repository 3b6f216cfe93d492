//! SVG-backed drawing surface.

use log::trace;
use svg::{Document, node::Text as SvgText, node::element as svg_element};

use kinfolk_core::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
};

use super::{Resizable, Surface};

/// A [`Surface`] that builds an SVG document.
///
/// Elements are collected in a [`LayeredOutput`] so connectors always end up
/// below junction dots, nodes and labels regardless of drawing order.
/// `clear(region)` removes every element whose bounds intersect the region;
/// `clear_all` also drops elements drawn outside the visible area.
///
/// # Example
///
/// ```
/// # use kinfolk::surface::{Surface, SvgSurface};
/// # use kinfolk_core::{color::Color, geometry::{Point, Size}};
/// let mut surface = SvgSurface::new(Size::new(200.0, 100.0));
/// surface.dot(Point::new(100.0, 50.0), 6.0, Color::default());
///
/// let svg = surface.to_svg_string();
/// assert!(svg.contains("<circle"));
/// assert!(svg.contains("width=\"200\""));
/// ```
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    background: Option<Color>,
    output: LayeredOutput,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            output: LayeredOutput::new(),
        }
    }

    /// Sets a background color painted below everything (builder style).
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Number of elements currently on the surface.
    pub fn element_count(&self) -> usize {
        self.output.len()
    }

    /// Number of elements currently on `layer`.
    pub fn layer_count(&self, layer: RenderLayer) -> usize {
        self.output.count(layer)
    }

    /// Builds the SVG document for the current contents.
    pub fn to_document(&self) -> Document {
        let width = self.size.width();
        let height = self.size.height();

        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height));

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            doc = doc.add(rect);
        }

        for node in self.output.clone().render() {
            doc = doc.add(node);
        }

        doc
    }

    /// Serializes the current contents as an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn push(&mut self, layer: RenderLayer, bounds: Bounds, node: impl svg::Node) {
        self.output.add_to_layer(layer, bounds, Box::new(node));
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, region: Bounds) {
        let removed = self.output.remove_within(&region);
        trace!(removed; "Cleared SVG surface region");
    }

    fn clear_all(&mut self) {
        self.output.clear();
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeDefinition>,
    ) {
        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", radius)
            .set("ry", radius);

        rect = match fill {
            Some(fill) => rect
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };

        let covered = match stroke {
            Some(stroke) => {
                rect = apply_stroke!(rect, stroke);
                bounds.expand(stroke.width() / 2.0)
            }
            None => bounds,
        };

        self.push(RenderLayer::Node, covered, rect);
    }

    fn dot(&mut self, center: Point, radius: f32, fill: Color) {
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius)
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());

        let bounds = center.to_bounds(Size::new(radius * 2.0, radius * 2.0));
        self.push(RenderLayer::Junction, bounds, circle);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y());
        let line = apply_stroke!(line, stroke);

        let bounds = Bounds::from_points(&[from, to]).expand(stroke.width() / 2.0);
        self.push(RenderLayer::Connector, bounds, line);
    }

    fn quadratic_curve(&mut self, from: Point, control: Point, to: Point, stroke: &StrokeDefinition) {
        let data = format!(
            "M {} {} Q {} {} {} {}",
            from.x(),
            from.y(),
            control.x(),
            control.y(),
            to.x(),
            to.y()
        );
        let path = svg_element::Path::new().set("d", data).set("fill", "none");
        let path = apply_stroke!(path, stroke);

        // The curve always lies within the triangle of its three points
        let bounds = Bounds::from_points(&[from, control, to]).expand(stroke.width() / 2.0);
        self.push(RenderLayer::Connector, bounds, path);
    }

    fn text(&mut self, position: Point, content: &str, style: &TextDefinition) {
        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", style.align().to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", style.font_family())
            .set("font-size", style.font_size());

        if let Some(color) = style.color() {
            text = text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }
        let text = text.add(SvgText::new(content));

        let bounds = style.bounds_at(position, content);
        self.push(RenderLayer::Text, bounds, text);
    }
}

impl Resizable for SvgSurface {
    fn resize(&mut self, size: Size) {
        self.size = size;
    }
}
