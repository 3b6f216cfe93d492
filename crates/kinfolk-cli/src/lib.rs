//! CLI logic for the Kinfolk family tree tool.
//!
//! The CLI plays the interactive host: it owns a [`FamilyStore`], keeps a
//! [`Viewer`] subscribed to it, applies the requested edits and writes the
//! final SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{cell::RefCell, fs, rc::Rc};

use log::{info, warn};

use kinfolk::{
    KinfolkError, TreeBuilder,
    family::{DateFormat, Family},
    store::FamilyStore,
    surface::SvgSurface,
    viewer::Viewer,
};

/// Run the Kinfolk CLI application
///
/// This function imports the input family (or uses the sample family),
/// applies removals through the store, and writes the rendered tree to the
/// output file.
///
/// # Errors
///
/// Returns `KinfolkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Family import errors
/// - Out-of-range root or removal indices
pub fn run(args: &Args) -> Result<(), KinfolkError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing family"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(width) = args.width {
        app_config.canvas_mut().set_width(width);
    }
    if let Some(height) = args.height {
        app_config.canvas_mut().set_height(height);
    }

    let builder = TreeBuilder::new(app_config);
    let family = match &args.input {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            builder.parse(&source)?
        }
        None => {
            info!("No input file given, using the sample family");
            Family::sample()
        }
    };

    let canvas = builder.config().canvas();
    let background = canvas.background_color().map_err(KinfolkError::Config)?;
    let surface = SvgSurface::new(canvas.size()).with_background(background);
    let date_format = builder
        .config()
        .style()
        .date_format()
        .map_err(KinfolkError::Config)?;

    let mut store = FamilyStore::new(family);
    let viewer = Rc::new(RefCell::new(Viewer::new(
        surface,
        builder.renderer()?,
        store.snapshot(),
    )));

    let target = Rc::clone(&viewer);
    store.subscribe(move |family| {
        if let Err(err) = target.borrow_mut().show(Rc::clone(family)) {
            warn!(err:%; "Redraw after family change failed");
        }
    });

    viewer.borrow_mut().select_root(args.root)?;

    for &index in &args.remove {
        info!(index; "Removing person");
        store.remove_person(index)?;
    }

    if args.list {
        list_family(&store.snapshot(), &date_format);
    }

    // Surface any error a subscriber could only log
    let report = viewer.borrow_mut().refresh()?;
    if !report.is_complete() {
        warn!(
            skipped:? = report.unsupported();
            "Persons with multiple relations were drawn without partners or descendants"
        );
    }

    let svg = viewer.borrow().surface().to_svg_string();
    fs::write(&args.output, svg)?;

    info!(output_file = args.output, nodes = report.nodes_drawn(); "SVG exported successfully");

    Ok(())
}

fn list_family(family: &Family, date_format: &DateFormat) {
    for (index, person) in family.persons().iter().enumerate() {
        info!(
            index,
            name = person.summary(),
            lifespan = person.lifespan(date_format);
            "Person"
        );
    }
    for relation in family.relations() {
        info!(
            male = relation.male(),
            female = relation.female(),
            children:? = relation.children();
            "Relation"
        );
    }
}
