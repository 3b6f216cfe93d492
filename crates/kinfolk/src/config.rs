//! Configuration types for Kinfolk tree rendering.
//!
//! This module provides configuration structures that control how family
//! trees are laid out and styled. All types implement [`serde::Deserialize`]
//! for loading from TOML files; every field is optional and falls back to the
//! defaults of the classic Kinfolk look.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and canvas settings.
//! - [`LayoutConfig`] - Node geometry and spacing between partners and generations.
//! - [`StyleConfig`] - Colors, stroke and font settings.
//! - [`CanvasConfig`] - Default surface size and background.
//!
//! # Example
//!
//! ```
//! # use kinfolk::config::{AppConfig, ConnectorStyle};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     partner_distance = 200.0
//!     connector = "curved"
//!
//!     [style]
//!     node_color = "steelblue"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().partner_distance(), 200.0);
//! assert_eq!(config.layout().connector(), ConnectorStyle::Curved);
//! assert_eq!(config.layout().level_height(), 100.0);
//! assert!(config.style().node_color().is_ok());
//! ```

use serde::Deserialize;

use kinfolk_core::{
    color::Color,
    draw::{StrokeCap, StrokeStyle, TextAlign},
    family::DateFormat,
    geometry::Size,
};

/// Top-level application configuration combining layout, style and canvas settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, canvas: CanvasConfig) -> Self {
        Self {
            layout,
            style,
            canvas,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns a mutable reference to the canvas configuration.
    ///
    /// Hosts use this to apply command-line overrides of the surface size.
    pub fn canvas_mut(&mut self) -> &mut CanvasConfig {
        &mut self.canvas
    }
}

/// How a couple is connected to its children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    /// Vertical stem, horizontal child bar and one vertical drop per child
    #[default]
    Straight,
    /// One quadratic curve from the couple to each child
    Curved,
}

/// Node geometry and spacing, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    node_radius: f32,
    /// Horizontal distance between the centers of two partner nodes.
    partner_distance: f32,
    /// Vertical distance between a couple and its children.
    level_height: f32,
    /// Width of the child bar of a couple whose children are all leaves.
    /// Doubles with every generation below the couple.
    level_width: f32,
    dot_radius: f32,
    connector: ConnectorStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 130.0,
            node_height: 40.0,
            node_radius: 6.0,
            partner_distance: 180.0,
            level_height: 100.0,
            level_width: 140.0,
            dot_radius: 6.0,
            connector: ConnectorStyle::default(),
        }
    }
}

impl LayoutConfig {
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the node size as a [`Size`].
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn partner_distance(&self) -> f32 {
        self.partner_distance
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    pub fn dot_radius(&self) -> f32 {
        self.dot_radius
    }

    pub fn connector(&self) -> ConnectorStyle {
        self.connector
    }

    /// Sets the connector style (builder style).
    pub fn with_connector(mut self, connector: ConnectorStyle) -> Self {
        self.connector = connector;
        self
    }

    /// Checks that every distance is finite and that sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("partner_distance", self.partner_distance),
            ("level_height", self.level_height),
            ("level_width", self.level_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("layout.{name} must be a positive number, got {value}"));
            }
        }

        let non_negative = [
            ("node_radius", self.node_radius),
            ("dot_radius", self.dot_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("layout.{name} must not be negative, got {value}"));
            }
        }

        Ok(())
    }
}

/// Visual styling configuration.
///
/// Colors are kept as strings and parsed on access, so an invalid color is
/// reported when a renderer is built rather than when the file is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    node_color: String,
    text_color: String,
    line_color: String,
    dot_color: String,
    line_width: f32,
    line_style: String,
    line_cap: String,
    font_family: String,
    name_font_size: u16,
    date_font_size: u16,
    /// Horizontal alignment of both label lines inside the node.
    text_align: String,
    /// Distance between a start or end aligned label and the node edge.
    text_inset: f32,
    /// Vertical offset of the name line from the node center.
    name_offset: f32,
    /// Vertical offset of the date line from the node center.
    date_offset: f32,
    date_format: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_color: String::from("#555"),
            text_color: String::from("#fff"),
            line_color: String::from("#555"),
            dot_color: String::from("#999"),
            line_width: 3.0,
            line_style: String::from("solid"),
            line_cap: String::from("butt"),
            font_family: String::from("sans-serif"),
            name_font_size: 16,
            date_font_size: 10,
            text_align: String::from("middle"),
            text_inset: 8.0,
            name_offset: -4.0,
            date_offset: 14.0,
            date_format: String::from("%Y-%m-%d"),
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

impl StyleConfig {
    /// Returns the parsed node fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn node_color(&self) -> Result<Color, String> {
        parse_color("node_color", &self.node_color)
    }

    /// Returns the parsed label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn text_color(&self) -> Result<Color, String> {
        parse_color("text_color", &self.text_color)
    }

    /// Returns the parsed connector line [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn line_color(&self) -> Result<Color, String> {
        parse_color("line_color", &self.line_color)
    }

    /// Returns the parsed junction dot [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn dot_color(&self) -> Result<Color, String> {
        parse_color("dot_color", &self.dot_color)
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Returns the parsed connector [`StrokeStyle`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown style or a malformed dash pattern.
    pub fn line_style(&self) -> Result<StrokeStyle, String> {
        self.line_style
            .parse()
            .map_err(|err| format!("Invalid line_style in config: {err}"))
    }

    /// Returns the parsed connector [`StrokeCap`].
    ///
    /// # Errors
    ///
    /// Returns an error for anything but `butt`, `round` or `square`.
    pub fn line_cap(&self) -> Result<StrokeCap, String> {
        self.line_cap
            .parse()
            .map_err(|err| format!("Invalid line_cap in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn name_font_size(&self) -> u16 {
        self.name_font_size
    }

    pub fn date_font_size(&self) -> u16 {
        self.date_font_size
    }

    /// Returns the parsed label [`TextAlign`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown alignment.
    pub fn text_align(&self) -> Result<TextAlign, String> {
        self.text_align
            .parse()
            .map_err(|err| format!("Invalid text_align in config: {err}"))
    }

    pub fn text_inset(&self) -> f32 {
        self.text_inset
    }

    pub fn name_offset(&self) -> f32 {
        self.name_offset
    }

    pub fn date_offset(&self) -> f32 {
        self.date_offset
    }

    /// Returns the validated [`DateFormat`] for birth and death dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern contains an unknown specifier.
    pub fn date_format(&self) -> Result<DateFormat, String> {
        DateFormat::new(&self.date_format).map_err(|err| format!("Invalid date_format in config: {err}"))
    }
}

/// Default drawing surface settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    background_color: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            background_color: None,
        }
    }
}

impl CanvasConfig {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the surface size as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_look() {
        let config = AppConfig::default();

        let layout = config.layout();
        assert_eq!(layout.node_size(), Size::new(130.0, 40.0));
        assert_eq!(layout.node_radius(), 6.0);
        assert_eq!(layout.partner_distance(), 180.0);
        assert_eq!(layout.level_height(), 100.0);
        assert_eq!(layout.level_width(), 140.0);
        assert_eq!(layout.dot_radius(), 6.0);
        assert_eq!(layout.connector(), ConnectorStyle::Straight);

        let style = config.style();
        assert_eq!(style.line_width(), 3.0);
        assert_eq!(style.name_font_size(), 16);
        assert_eq!(style.date_font_size(), 10);
        assert_eq!(style.date_format().unwrap().pattern(), "%Y-%m-%d");
        assert_eq!(style.line_style().unwrap(), StrokeStyle::Solid);
        assert_eq!(style.line_cap().unwrap(), StrokeCap::Butt);
        assert_eq!(style.text_align().unwrap(), TextAlign::Middle);
        assert_eq!(style.text_inset(), 8.0);

        assert_eq!(config.canvas().size(), Size::new(800.0, 400.0));
        assert_eq!(config.canvas().background_color().unwrap(), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            date_format = "%d.%m.%Y"

            [canvas]
            width = 1024.0
            background_color = "white"
            "#,
        )
        .unwrap();

        assert_eq!(config.style().date_format().unwrap().pattern(), "%d.%m.%Y");
        assert_eq!(config.style().name_font_size(), 16);
        assert_eq!(config.canvas().width(), 1024.0);
        assert_eq!(config.canvas().height(), 400.0);
        assert!(config.canvas().background_color().unwrap().is_some());
    }

    #[test]
    fn test_invalid_values_are_reported_on_access() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            node_color = "not-a-color"
            date_format = "%Q"
            line_style = "wavy"
            line_cap = "pointy"
            text_align = "justify"
            "#,
        )
        .unwrap();

        let err = config.style().node_color().unwrap_err();
        assert!(err.contains("node_color"));
        assert!(config.style().date_format().is_err());
        assert!(config.style().line_style().is_err());
        assert!(config.style().line_cap().unwrap_err().contains("line_cap"));
        assert!(config.style().text_align().unwrap_err().contains("text_align"));
    }

    #[test]
    fn test_layout_validate() {
        assert!(LayoutConfig::default().validate().is_ok());

        let config: AppConfig = toml::from_str("[layout]\nlevel_height = 0.0").unwrap();
        let err = config.layout().validate().unwrap_err();
        assert!(err.contains("level_height"));

        let config: AppConfig = toml::from_str("[layout]\ndot_radius = -1.0").unwrap();
        assert!(config.layout().validate().is_err());
    }

    #[test]
    fn test_connector_style_parsing() {
        let config: AppConfig = toml::from_str("[layout]\nconnector = \"curved\"").unwrap();
        assert_eq!(config.layout().connector(), ConnectorStyle::Curved);

        let result: Result<AppConfig, _> = toml::from_str("[layout]\nconnector = \"zigzag\"");
        assert!(result.is_err());
    }
}
