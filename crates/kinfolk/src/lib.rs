//! Kinfolk - Family tree layout and rendering for small genealogies.
//!
//! A family is a list of persons and a list of couple relations, each with an
//! ordered list of children. Kinfolk draws the descendants of a chosen root
//! person as a tree of couples: partners side by side, children one
//! generation below, connected by lines and junction dots.
//!
//! The main pieces:
//!
//! - [`render::Renderer`] - the recursive layout and drawing algorithm
//! - [`surface::Surface`] - the drawing target, with SVG and recording implementations
//! - [`store::FamilyStore`] - copy-on-write family snapshots with change notification
//! - [`viewer::Viewer`] - redraws a surface whenever the family, root or size changes
//! - [`TreeBuilder`] - one-call import and SVG rendering

pub mod config;
pub mod render;
pub mod store;
pub mod surface;
pub mod viewer;

mod depth;
mod error;

pub use kinfolk_core::{color, draw, family, geometry};

pub use depth::{depth, level_width};
pub use error::KinfolkError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use family::{Family, PersonIndex};
use render::{RenderReport, Renderer};
use surface::{DrawCommand, RecordingSurface, Surface, SvgSurface};

/// Builder for importing and rendering Kinfolk family trees.
///
/// # Examples
///
/// ```rust
/// use kinfolk::{TreeBuilder, config::AppConfig};
///
/// let source = r#"
///     [[persons]]
///     first_name = "Ada"
///     last_name = "Byron"
///     gender = "female"
///     birth_date = "1815-12-10"
///     death_date = "1852-11-27"
/// "#;
///
/// let builder = TreeBuilder::new(AppConfig::default());
///
/// // Import a family snapshot
/// let family = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render it with person 0 as root
/// let svg = builder.render_svg(&family, 0)
///     .expect("Failed to render");
/// assert!(svg.contains("Ada Byron (f)"));
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Create a new tree builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Import a family snapshot from a TOML document.
    ///
    /// The document holds a `persons` array and a `relations` array; dates
    /// are `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`KinfolkError::Import`] for malformed TOML or unknown values,
    /// and [`KinfolkError::Family`] if a relation names a missing person.
    pub fn parse(&self, source: &str) -> Result<Family, KinfolkError> {
        info!("Importing family");

        let family: Family =
            toml::from_str(source).map_err(|err| KinfolkError::new_import_error(err, source))?;
        family.validate()?;

        debug!(
            persons = family.len(),
            relations = family.relations().len();
            "Family imported successfully"
        );
        trace!(family:?; "Imported family");

        Ok(family)
    }

    /// Build a renderer from the layout and style sections of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KinfolkError::Config`] for invalid configuration values.
    pub fn renderer(&self) -> Result<Renderer, KinfolkError> {
        Renderer::new(self.config.layout(), self.config.style())
    }

    /// Render the tree below `root` to an SVG string sized by the canvas
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KinfolkError::Config`] for invalid configuration values and
    /// [`KinfolkError::Family`] for an out-of-range root or corrupt family.
    pub fn render_svg(&self, family: &Family, root: PersonIndex) -> Result<String, KinfolkError> {
        let canvas = self.config.canvas();
        let background = canvas.background_color().map_err(KinfolkError::Config)?;
        let mut surface = SvgSurface::new(canvas.size()).with_background(background);

        info!(root, width = canvas.width(), height = canvas.height(); "Rendering SVG");
        self.draw(family, root, &mut surface)?;

        let svg = surface.to_svg_string();
        info!(elements = surface.element_count(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render the tree below `root` and return the recorded display list.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::render_svg`].
    pub fn render_commands(
        &self,
        family: &Family,
        root: PersonIndex,
    ) -> Result<Vec<DrawCommand>, KinfolkError> {
        let mut surface = RecordingSurface::new(self.config.canvas().size());
        self.draw(family, root, &mut surface)?;
        Ok(surface.take_commands())
    }

    fn draw<S: Surface>(
        &self,
        family: &Family,
        root: PersonIndex,
        surface: &mut S,
    ) -> Result<RenderReport, KinfolkError> {
        let renderer = self.renderer()?;
        let anchor = renderer.root_anchor(surface.size());
        let report = renderer.render(family, root, surface, anchor)?;
        if !report.is_complete() {
            warn!(
                skipped:? = report.unsupported();
                "Some branches were not drawn because a person has multiple relations"
            );
        }
        Ok(report)
    }
}
