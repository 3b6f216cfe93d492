//! Interactive host for a family tree.
//!
//! A [`Viewer`] ties a drawing surface, a [`Renderer`] and the selected root
//! person together. Every event that changes what should be visible (new
//! snapshot, new root, new surface size) clears the whole surface and draws
//! the tree again from scratch.

use std::rc::Rc;

use log::{debug, info};

use kinfolk_core::{
    family::{Family, FamilyError, PersonIndex},
    geometry::Size,
};

use crate::{
    render::{RenderReport, Renderer},
    surface::{Resizable, Surface},
};

/// Draws the current family snapshot onto an owned surface.
///
/// # Example
///
/// ```
/// # use std::rc::Rc;
/// # use kinfolk::{config::AppConfig, render::Renderer, surface::RecordingSurface, viewer::Viewer};
/// # use kinfolk_core::{family::Family, geometry::Size};
/// let config = AppConfig::default();
/// let renderer = Renderer::new(config.layout(), config.style()).unwrap();
/// let surface = RecordingSurface::new(Size::new(800.0, 400.0));
///
/// let mut viewer = Viewer::new(surface, renderer, Rc::new(Family::sample()));
/// viewer.refresh().unwrap();
/// assert_eq!(viewer.surface().nodes().count(), 9);
///
/// // Jill's subtree only
/// let report = viewer.select_root(3).unwrap();
/// assert_eq!(report.nodes_drawn(), 5);
/// ```
#[derive(Debug)]
pub struct Viewer<S: Surface> {
    surface: S,
    renderer: Renderer,
    family: Rc<Family>,
    root: PersonIndex,
}

impl<S: Surface> Viewer<S> {
    /// Creates a viewer showing `family` from person 0. Nothing is drawn
    /// until the first event or [`Viewer::refresh`].
    pub fn new(surface: S, renderer: Renderer, family: Rc<Family>) -> Self {
        Self {
            surface,
            renderer,
            family,
            root: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the viewer and returns its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The selected root person.
    pub fn root(&self) -> PersonIndex {
        self.root
    }

    /// The snapshot currently shown.
    pub fn family(&self) -> &Rc<Family> {
        &self.family
    }

    /// Shows a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`FamilyError`] if the selected root no longer exists or
    /// the snapshot is corrupt.
    pub fn show(&mut self, family: Rc<Family>) -> Result<RenderReport, FamilyError> {
        self.family = family;
        self.refresh()
    }

    /// Selects a new root person and redraws.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::PersonOutOfBounds`] if `root` does not exist.
    /// The selection is kept, so the next redraw fails the same way until
    /// a valid root is selected.
    pub fn select_root(&mut self, root: PersonIndex) -> Result<RenderReport, FamilyError> {
        info!(root; "Selecting root person");
        self.root = root;
        self.refresh()
    }

    /// Clears the whole surface and draws the tree again.
    ///
    /// # Errors
    ///
    /// Returns a [`FamilyError`] for an out-of-range root or a corrupt snapshot.
    /// An empty family has no valid root, so the surface is left cleared and
    /// [`FamilyError::PersonOutOfBounds`] is returned.
    pub fn refresh(&mut self) -> Result<RenderReport, FamilyError> {
        self.surface.clear_all();

        let anchor = self.renderer.root_anchor(self.surface.size());
        self.renderer
            .render(&self.family, self.root, &mut self.surface, anchor)
    }
}

impl<S: Surface + Resizable> Viewer<S> {
    /// Changes the surface size and redraws with the root recentered.
    ///
    /// # Errors
    ///
    /// Returns a [`FamilyError`] for an out-of-range root or a corrupt snapshot.
    pub fn resize(&mut self, size: Size) -> Result<RenderReport, FamilyError> {
        debug!(width = size.width(), height = size.height(); "Resizing surface");
        self.surface.resize(size);
        self.refresh()
    }
}
