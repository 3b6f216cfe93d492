//! Layer-based collection of SVG nodes.
//!
//! Drawing calls arrive in traversal order, but connectors must stay beneath
//! junction dots and person nodes. [`LayeredOutput`] records each SVG node
//! together with its [`RenderLayer`] and bounding box, and emits them grouped
//! by layer.
//!
//! # Example
//!
//! ```
//! # use kinfolk_core::draw::{LayeredOutput, RenderLayer};
//! # use kinfolk_core::geometry::{Bounds, Point, Size};
//! # use svg::node::element::{Circle, Line};
//! let mut output = LayeredOutput::new();
//! let bounds = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(12.0, 12.0));
//!
//! output.add_to_layer(RenderLayer::Junction, bounds, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Connector, bounds, Box::new(Line::new()));
//!
//! // Connector group first, junction group on top
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

use crate::geometry::Bounds;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Partner, stem, bar and child connector lines
    Connector,
    /// Junction dots where connectors meet
    Junction,
    /// Person node boxes
    Node,
    /// Node labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connector => "connector",
            Self::Junction => "junction",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer, each with the area it covers.
#[derive(Debug, Default, Clone)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, Bounds, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node covering `bounds` to the specified layer.
    ///
    /// Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, bounds: Bounds, node: SvgNode) {
        self.items.push((layer, bounds, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of recorded nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of nodes recorded on `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _, _)| *l == layer).count()
    }

    /// Drops every node whose bounds intersect `region`.
    ///
    /// Returns the number of nodes removed.
    pub fn remove_within(&mut self, region: &Bounds) -> usize {
        let before = self.items.len();
        self.items
            .retain(|(_, bounds, _)| !bounds.intersects(region));
        before - self.items.len()
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps drawing order within a layer
        self.items.sort_by_key(|(layer, _, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, _, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
