//! Text style definitions for node labels.
//!
//! Person nodes carry two label lines (name and lifespan), each drawn with
//! its own [`TextDefinition`]. Labels are positioned by anchor point and
//! alignment; [`TextDefinition::bounds_at`] measures the shaped text with
//! cosmic-text to find the area a label covers.
//!
//! ```
//! # use kinfolk_core::draw::{TextAlign, TextDefinition};
//! # use kinfolk_core::color::Color;
//! let mut name = TextDefinition::new();
//! name.set_font_size(16);
//! name.set_color(Some(Color::new("#fff").unwrap()));
//! assert_eq!(name.align(), TextAlign::Middle);
//! assert!(name.measure("John Doe (m)").width() > 0.0);
//! ```

use std::{
    str::FromStr,
    sync::{Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

/// Line height relative to the font size.
const LINE_HEIGHT_RATIO: f32 = 1.15;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the anchor
    Start,
    /// Text is centered on the anchor
    #[default]
    Middle,
    /// Text ends at the anchor
    End,
}

impl TextAlign {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "left" => Ok(Self::Start),
            "middle" | "center" => Ok(Self::Middle),
            "end" | "right" => Ok(Self::End),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: start, middle, end"
            )),
        }
    }
}

/// Font and color settings for one line of text.
///
/// The anchor point is the vertical middle of the line
/// (`dominant-baseline: central` in SVG terms).
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    align: TextAlign,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "sans-serif", "Helvetica").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the surface default (usually black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the horizontal alignment.
    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Measures `content` set in this font, in pixels.
    pub fn measure(&self, content: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(content, self)
    }

    /// The area covered by `content` drawn at `anchor`.
    ///
    /// The anchor is the vertical middle of the line; horizontally it is the
    /// start, middle or end of the text depending on [`Self::align`].
    pub fn bounds_at(&self, anchor: Point, content: &str) -> Bounds {
        let size = self.measure(content);
        let min_x = match self.align {
            TextAlign::Start => anchor.x(),
            TextAlign::Middle => anchor.x() - size.width() / 2.0,
            TextAlign::End => anchor.x() - size.width(),
        };
        Bounds::new_from_top_left(Point::new(min_x, anchor.y() - size.height() / 2.0), size)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            color: None,
            align: TextAlign::default(),
        }
    }
}

/// Shapes text with a shared [`FontSystem`].
///
/// Loading system fonts is expensive, so one instance is built on first use
/// and reused for every measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // SVG font sizes are unitless, i.e. already in pixels
        let font_size = f32::from(text_def.font_size());
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_RATIO);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        // No usable font on this system
        if max_width <= 0.0 {
            max_width = text.chars().count() as f32 * font_size * 0.55;
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
