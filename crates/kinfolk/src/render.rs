//! Family tree layout and rendering.
//!
//! [`Renderer`] walks a [`Family`] snapshot depth-first from a root person
//! and draws directly onto a [`Surface`]; no scene graph or layout is kept
//! between calls, so every render recomputes all positions from scratch.
//!
//! Layout rules:
//!
//! - An unpartnered person is a single node centered on the anchor.
//! - A couple is drawn as two nodes `partner_distance / 2` left and right of
//!   the anchor, joined by a horizontal line with a junction dot at the
//!   anchor. The root of the subtree always takes the left position.
//! - Children hang from a bar `level_height / 2` below the couple that spans
//!   `level_width * 2^depth`, spread evenly from one end to the other (a
//!   single child is centered), one generation `level_height` further down.
//! - A person with more than one relation is reported in the
//!   [`RenderReport`] and drawn alone, without partners or descendants.

use log::{debug, trace, warn};

use kinfolk_core::{
    color::Color,
    draw::{StrokeDefinition, TextAlign, TextDefinition},
    family::{DateFormat, Family, FamilyError, Person, PersonIndex, Relation},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::{ConnectorStyle, LayoutConfig, StyleConfig},
    depth::{depth, level_width},
    error::KinfolkError,
    surface::Surface,
};

/// Extra height of a curved connector's control point above the child node.
const CURVE_LIFT: f32 = 30.0;

/// Outcome of a successful render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    nodes_drawn: usize,
    unsupported: Vec<PersonIndex>,
}

impl RenderReport {
    /// Number of person nodes drawn.
    pub fn nodes_drawn(&self) -> usize {
        self.nodes_drawn
    }

    /// Persons whose partners and descendants were skipped because they have
    /// more than one relation, in drawing order.
    pub fn unsupported(&self) -> &[PersonIndex] {
        &self.unsupported
    }

    /// Returns true if the whole tree below the root was drawn.
    pub fn is_complete(&self) -> bool {
        self.unsupported.is_empty()
    }
}

/// Resolved drawing styles.
#[derive(Debug, Clone)]
struct Theme {
    node_fill: Color,
    line: StrokeDefinition,
    dot_color: Color,
    name_text: TextDefinition,
    /// Horizontal offset of both label anchors from the node center.
    label_dx: f32,
    name_offset: f32,
    date_text: TextDefinition,
    date_offset: f32,
    date_format: DateFormat,
}

impl Theme {
    fn from_style(style: &StyleConfig, layout: &LayoutConfig) -> Result<Self, KinfolkError> {
        let mut line = StrokeDefinition::new(
            style.line_color().map_err(KinfolkError::Config)?,
            style.line_width(),
        );
        line.set_style(style.line_style().map_err(KinfolkError::Config)?);
        line.set_cap(style.line_cap().map_err(KinfolkError::Config)?);

        let text_color = style.text_color().map_err(KinfolkError::Config)?;
        let align = style.text_align().map_err(KinfolkError::Config)?;
        let label = |font_size| {
            let mut text = TextDefinition::new();
            text.set_font_family(style.font_family());
            text.set_font_size(font_size);
            text.set_color(Some(text_color));
            text.set_align(align);
            text
        };

        let edge = layout.node_width() / 2.0 - style.text_inset();
        let label_dx = match align {
            TextAlign::Start => -edge,
            TextAlign::Middle => 0.0,
            TextAlign::End => edge,
        };

        Ok(Self {
            node_fill: style.node_color().map_err(KinfolkError::Config)?,
            line,
            dot_color: style.dot_color().map_err(KinfolkError::Config)?,
            name_text: label(style.name_font_size()),
            label_dx,
            name_offset: style.name_offset(),
            date_text: label(style.date_font_size()),
            date_offset: style.date_offset(),
            date_format: style.date_format().map_err(KinfolkError::Config)?,
        })
    }
}

/// Horizontal offset of child `index` of `count` from the couple anchor.
///
/// Children are spread linearly from `-level_width / 2` to `+level_width / 2`;
/// a single child is centered.
pub fn child_offset(index: usize, count: usize, level_width: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    index as f32 / (count - 1) as f32 * level_width - level_width / 2.0
}

/// Draws family trees onto a [`Surface`].
///
/// # Example
///
/// ```
/// # use kinfolk::{config::AppConfig, render::Renderer, surface::RecordingSurface};
/// # use kinfolk_core::{family::Family, geometry::{Point, Size}};
/// let config = AppConfig::default();
/// let renderer = Renderer::new(config.layout(), config.style()).unwrap();
/// let mut surface = RecordingSurface::new(Size::new(800.0, 400.0));
///
/// let report = renderer
///     .render(&Family::sample(), 0, &mut surface, Point::new(400.0, 40.0))
///     .unwrap();
/// assert_eq!(report.nodes_drawn(), 9);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    layout: LayoutConfig,
    theme: Theme,
}

impl Renderer {
    /// Creates a renderer, validating the layout and resolving all style values.
    ///
    /// # Errors
    ///
    /// Returns [`KinfolkError::Config`] for a non-positive distance, an
    /// invalid color, line style or date format.
    pub fn new(layout: &LayoutConfig, style: &StyleConfig) -> Result<Self, KinfolkError> {
        layout.validate().map_err(KinfolkError::Config)?;
        let theme = Theme::from_style(style, layout)?;
        Ok(Self {
            layout: layout.clone(),
            theme,
        })
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The anchor of the root couple on a surface of `size`: horizontally
    /// centered, one node height from the top.
    pub fn root_anchor(&self, size: Size) -> Point {
        Point::new(size.width() / 2.0, self.layout.node_height())
    }

    /// Draws the tree rooted at `root` with the root couple centered on `anchor`.
    ///
    /// The surface is not cleared first.
    ///
    /// # Errors
    ///
    /// Returns a [`FamilyError`] if `root`, a partner or a child index does
    /// not exist in `family`. Drawing stops at the first such error, so the
    /// surface may hold a partial tree.
    pub fn render<S: Surface + ?Sized>(
        &self,
        family: &Family,
        root: PersonIndex,
        surface: &mut S,
        anchor: Point,
    ) -> Result<RenderReport, FamilyError> {
        let mut report = RenderReport::default();
        self.draw_subtree(family, root, surface, anchor, &mut report)?;

        debug!(
            root,
            nodes = report.nodes_drawn,
            skipped = report.unsupported.len();
            "Rendered family tree"
        );
        Ok(report)
    }

    fn draw_subtree<S: Surface + ?Sized>(
        &self,
        family: &Family,
        index: PersonIndex,
        surface: &mut S,
        anchor: Point,
        report: &mut RenderReport,
    ) -> Result<(), FamilyError> {
        let person = family.person(index)?;
        let relations = family.relations_of(index);

        match relations.as_slice() {
            [] => {
                trace!(index, x = anchor.x(), y = anchor.y(); "Drawing single person");
                self.draw_person(surface, person, anchor);
                report.nodes_drawn += 1;
            }
            [relation] => {
                self.draw_family(family, index, relation, surface, anchor, report)?;
            }
            _ => {
                warn!(
                    index,
                    relations = relations.len();
                    "Multiple relations are not supported, skipping partners and descendants"
                );
                report.unsupported.push(index);
                self.draw_person(surface, person, anchor);
                report.nodes_drawn += 1;
            }
        }

        Ok(())
    }

    fn draw_family<S: Surface + ?Sized>(
        &self,
        family: &Family,
        index: PersonIndex,
        relation: &Relation,
        surface: &mut S,
        anchor: Point,
        report: &mut RenderReport,
    ) -> Result<(), FamilyError> {
        let person = family.person(index)?;
        let partner = family.person(relation.partner_of(index)?)?;
        let half = self.layout.partner_distance() / 2.0;

        surface.line(anchor.offset(-half, 0.0), anchor.offset(half, 0.0), &self.theme.line);
        surface.dot(anchor, self.layout.dot_radius(), self.theme.dot_color);
        self.draw_person(surface, person, anchor.offset(-half, 0.0));
        self.draw_person(surface, partner, anchor.offset(half, 0.0));
        report.nodes_drawn += 2;

        let children = relation.children();
        if children.is_empty() {
            return Ok(());
        }

        let width = level_width(self.layout.level_width(), depth(family, index)?);
        let bar = anchor.offset(0.0, self.layout.level_height() / 2.0);
        let connector = self.layout.connector();
        trace!(index, children = children.len(), width; "Drawing children");

        if connector == ConnectorStyle::Straight {
            surface.line(anchor, bar, &self.theme.line);
            surface.line(
                bar.offset(-width / 2.0, 0.0),
                bar.offset(width / 2.0, 0.0),
                &self.theme.line,
            );
            surface.dot(bar, self.layout.dot_radius(), self.theme.dot_color);
        }

        for (i, &child) in children.iter().enumerate() {
            let child_anchor = anchor.offset(
                child_offset(i, children.len(), width),
                self.layout.level_height(),
            );

            match connector {
                ConnectorStyle::Straight => {
                    surface.line(child_anchor.with_y(bar.y()), child_anchor, &self.theme.line);
                }
                ConnectorStyle::Curved => {
                    let node_height = self.layout.node_height();
                    surface.quadratic_curve(
                        anchor.offset(0.0, node_height / 2.0),
                        child_anchor.offset(0.0, -node_height - CURVE_LIFT),
                        child_anchor.offset(0.0, -node_height / 2.0),
                        &self.theme.line,
                    );
                }
            }

            self.draw_subtree(family, child, surface, child_anchor, report)?;
        }

        Ok(())
    }

    fn draw_person<S: Surface + ?Sized>(&self, surface: &mut S, person: &Person, center: Point) {
        let bounds = Bounds::new_from_center(center, self.layout.node_size());
        surface.rounded_rect(
            bounds,
            self.layout.node_radius(),
            Some(self.theme.node_fill),
            Some(&self.theme.line),
        );
        surface.text(
            center.offset(self.theme.label_dx, self.theme.name_offset),
            &person.summary(),
            &self.theme.name_text,
        );
        surface.text(
            center.offset(self.theme.label_dx, self.theme.date_offset),
            &person.lifespan(&self.theme.date_format),
            &self.theme.date_text,
        );
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use kinfolk_core::family::{Gender, NaiveDate};
    use proptest::prelude::*;

    use super::*;
    use crate::{
        config::AppConfig,
        surface::{DrawCommand, RecordingSurface, SvgSurface},
    };

    const ANCHOR: Point = Point::new(400.0, 40.0);

    fn person(name: &str) -> Person {
        let born = NaiveDate::from_ymd_opt(1980, 5, 17).unwrap();
        Person::new(name, "Test", Gender::Female, born)
    }

    fn persons(count: usize) -> Vec<Person> {
        (0..count).map(|i| person(&format!("p{i}"))).collect()
    }

    fn renderer() -> Renderer {
        let config = AppConfig::default();
        Renderer::new(config.layout(), config.style()).unwrap()
    }

    fn curved_renderer() -> Renderer {
        let config = AppConfig::default();
        let layout = config.layout().clone().with_connector(ConnectorStyle::Curved);
        Renderer::new(&layout, config.style()).unwrap()
    }

    fn record(renderer: &Renderer, family: &Family, root: PersonIndex) -> (RenderReport, RecordingSurface) {
        let mut surface = RecordingSurface::new(Size::new(800.0, 400.0));
        let report = renderer.render(family, root, &mut surface, ANCHOR).unwrap();
        (report, surface)
    }

    fn assert_point(actual: Point, x: f32, y: f32) {
        assert_approx_eq!(f32, actual.x(), x);
        assert_approx_eq!(f32, actual.y(), y);
    }

    #[test]
    fn test_single_person_is_one_centered_node() {
        let family = Family::new(persons(1), vec![]);
        let (report, surface) = record(&renderer(), &family, 0);

        let nodes: Vec<_> = surface.nodes().collect();
        assert_eq!(nodes.len(), 1);
        assert_point(nodes[0].center(), 400.0, 40.0);
        assert_approx_eq!(f32, nodes[0].width(), 130.0);
        assert_approx_eq!(f32, nodes[0].height(), 40.0);
        assert_eq!(surface.lines().count(), 0);
        assert_eq!(surface.dots().count(), 0);
        assert_eq!(report.nodes_drawn(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn test_node_labels() {
        let died = NaiveDate::from_ymd_opt(2010, 10, 17).unwrap();
        let family = Family::new(vec![person("Ann").with_death_date(died)], vec![]);
        let (_, surface) = record(&renderer(), &family, 0);

        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].1, "Ann Test (f)");
        assert_point(texts[0].0, 400.0, 36.0);
        assert_eq!(texts[1].1, "1980-05-17 - 2010-10-17");
        assert_point(texts[1].0, 400.0, 54.0);
    }

    #[test]
    fn test_start_aligned_labels_sit_inside_left_edge() {
        let config: AppConfig =
            toml::from_str("[style]\ntext_align = \"start\"\ntext_inset = 10.0").unwrap();
        let renderer = Renderer::new(config.layout(), config.style()).unwrap();
        let family = Family::new(vec![person("Ann")], vec![]);
        let (_, surface) = record(&renderer, &family, 0);

        // Node spans 335..465
        let texts: Vec<_> = surface.texts().collect();
        assert_point(texts[0].0, 345.0, 36.0);
        assert_point(texts[1].0, 345.0, 54.0);

        let aligned = surface.commands().iter().all(|command| match command {
            DrawCommand::Text { style, .. } => style.align() == TextAlign::Start,
            _ => true,
        });
        assert!(aligned);
    }

    #[test]
    fn test_line_cap_reaches_connectors() {
        let config: AppConfig = toml::from_str("[style]\nline_cap = \"round\"").unwrap();
        let renderer = Renderer::new(config.layout(), config.style()).unwrap();
        let family = Family::new(persons(2), vec![Relation::new(0, 1, vec![])]);

        let mut surface = SvgSurface::new(Size::new(800.0, 400.0));
        renderer.render(&family, 0, &mut surface, ANCHOR).unwrap();
        assert!(surface.to_svg_string().contains("stroke-linecap=\"round\""));
    }

    #[test]
    fn test_invalid_label_style_is_config_error() {
        let config: AppConfig = toml::from_str("[style]\ntext_align = \"justify\"").unwrap();
        let result = Renderer::new(config.layout(), config.style());
        assert!(matches!(result, Err(KinfolkError::Config(message)) if message.contains("text_align")));
    }

    #[test]
    fn test_childless_couple() {
        let family = Family::new(persons(2), vec![Relation::new(0, 1, vec![])]);
        let (report, surface) = record(&renderer(), &family, 0);

        let nodes: Vec<_> = surface.nodes().collect();
        assert_eq!(nodes.len(), 2);
        assert_point(nodes[0].center(), 310.0, 40.0);
        assert_point(nodes[1].center(), 490.0, 40.0);

        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_point(lines[0].0, 310.0, 40.0);
        assert_point(lines[0].1, 490.0, 40.0);

        let dots: Vec<_> = surface.dots().collect();
        assert_eq!(dots.len(), 1);
        assert_point(dots[0], 400.0, 40.0);
        assert_eq!(report.nodes_drawn(), 2);
    }

    #[test]
    fn test_root_is_drawn_on_the_left_from_either_slot() {
        let family = Family::new(persons(2), vec![Relation::new(0, 1, vec![])]);

        let (_, surface) = record(&renderer(), &family, 1);
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts[0].1, "p1 Test (f)");
        assert_point(texts[0].0, 310.0, 36.0);
        assert_eq!(texts[2].1, "p0 Test (f)");
        assert_point(texts[2].0, 490.0, 36.0);
    }

    #[test]
    fn test_couple_with_two_children() {
        let family = Family::new(persons(4), vec![Relation::new(0, 1, vec![2, 3])]);
        let (report, surface) = record(&renderer(), &family, 0);

        // depth 1 doubles the bar: 140 * 2
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines.len(), 5);
        // partner connector
        assert_point(lines[0].0, 310.0, 40.0);
        assert_point(lines[0].1, 490.0, 40.0);
        // stem
        assert_point(lines[1].0, 400.0, 40.0);
        assert_point(lines[1].1, 400.0, 90.0);
        // bar
        assert_point(lines[2].0, 260.0, 90.0);
        assert_point(lines[2].1, 540.0, 90.0);
        // drops
        assert_point(lines[3].0, 260.0, 90.0);
        assert_point(lines[3].1, 260.0, 140.0);
        assert_point(lines[4].0, 540.0, 90.0);
        assert_point(lines[4].1, 540.0, 140.0);

        let dots: Vec<_> = surface.dots().collect();
        assert_eq!(dots.len(), 2);
        assert_point(dots[1], 400.0, 90.0);

        let nodes: Vec<_> = surface.nodes().collect();
        assert_eq!(nodes.len(), 4);
        assert_point(nodes[2].center(), 260.0, 140.0);
        assert_point(nodes[3].center(), 540.0, 140.0);
        assert_eq!(report.nodes_drawn(), 4);
    }

    #[test]
    fn test_single_child_is_centered() {
        let family = Family::new(persons(3), vec![Relation::new(0, 1, vec![2])]);
        let (_, surface) = record(&renderer(), &family, 0);

        let nodes: Vec<_> = surface.nodes().collect();
        assert_eq!(nodes.len(), 3);
        assert_point(nodes[2].center(), 400.0, 140.0);
    }

    #[test]
    fn test_sample_family_layout() {
        let (report, surface) = record(&renderer(), &Family::sample(), 0);
        assert_eq!(report.nodes_drawn(), 9);
        assert!(report.is_complete());

        let find = |label: &str| {
            surface
                .texts()
                .find(|(_, text)| text.starts_with(label))
                .map(|(position, _)| position)
                .unwrap()
        };

        // John's subtree is two generations deep: bar width 560
        assert_point(find("John"), 310.0, 36.0);
        assert_point(find("Jack"), 120.0 - 90.0, 136.0);
        assert_point(find("Judy"), 120.0 + 90.0, 136.0);
        // Jill sits in the male slot of her relation but is still drawn left
        assert_point(find("Jill"), 680.0 - 90.0, 136.0);
        assert_point(find("James"), 680.0 + 90.0, 136.0);
        // Jill's subtree is one generation deep: bar width 280
        assert_point(find("Jenny"), 540.0, 236.0);
        assert_point(find("Joe"), 680.0, 236.0);
        assert_point(find("Jade"), 820.0, 236.0);
    }

    #[test]
    fn test_multiple_relations_are_reported_and_skipped() {
        let family = Family::new(
            persons(6),
            vec![
                Relation::new(0, 1, vec![2, 3]),
                Relation::new(2, 4, vec![]),
                Relation::new(2, 5, vec![]),
            ],
        );
        let (report, surface) = record(&renderer(), &family, 0);

        assert_eq!(report.unsupported(), &[2]);
        assert!(!report.is_complete());
        // Root couple, the unsupported person alone and its sibling
        assert_eq!(report.nodes_drawn(), 4);
        assert_eq!(surface.nodes().count(), 4);
        assert!(surface.texts().all(|(_, text)| !text.starts_with("p4") && !text.starts_with("p5")));
    }

    #[test]
    fn test_multiple_relations_at_root() {
        let family = Family::new(
            persons(3),
            vec![Relation::new(0, 1, vec![]), Relation::new(0, 2, vec![])],
        );
        let (report, surface) = record(&renderer(), &family, 0);

        assert_eq!(report.unsupported(), &[0]);
        assert_eq!(surface.nodes().count(), 1);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn test_out_of_bounds_indices_fail() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new(Size::new(800.0, 400.0));

        let family = Family::new(persons(1), vec![]);
        assert_eq!(
            renderer.render(&family, 3, &mut surface, ANCHOR),
            Err(FamilyError::PersonOutOfBounds { index: 3, len: 1 })
        );

        let corrupt = Family::new(persons(2), vec![Relation::new(0, 1, vec![9])]);
        assert!(renderer.render(&corrupt, 0, &mut surface, ANCHOR).is_err());

        let missing_partner = Family::new(persons(1), vec![Relation::new(0, 5, vec![])]);
        assert!(renderer.render(&missing_partner, 0, &mut surface, ANCHOR).is_err());
    }

    #[test]
    fn test_curved_connectors() {
        let family = Family::new(persons(4), vec![Relation::new(0, 1, vec![2, 3])]);
        let (_, surface) = record(&curved_renderer(), &family, 0);

        // Only the partner connector remains straight
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(surface.dots().count(), 1);

        let curves: Vec<_> = surface.curves().collect();
        assert_eq!(curves.len(), 2);
        let (from, control, to) = curves[0];
        assert_point(from, 400.0, 60.0);
        assert_point(control, 260.0, 70.0);
        assert_point(to, 260.0, 120.0);
        assert_point(curves[1].2, 540.0, 120.0);
    }

    #[test]
    fn test_invalid_style_is_config_error() {
        let config: AppConfig = toml::from_str("[style]\ndot_color = \"nope\"").unwrap();
        let result = Renderer::new(config.layout(), config.style());
        assert!(matches!(result, Err(KinfolkError::Config(_))));
    }

    #[test]
    fn test_render_is_idempotent_on_cleared_surface() {
        let renderer = renderer();
        let family = Family::sample();
        let mut surface = SvgSurface::new(Size::new(800.0, 400.0));

        renderer.render(&family, 0, &mut surface, ANCHOR).unwrap();
        let first = surface.to_svg_string();

        surface.clear_all();
        renderer.render(&family, 0, &mut surface, ANCHOR).unwrap();
        assert_eq!(surface.to_svg_string(), first);
    }

    #[test]
    fn test_child_offset() {
        assert_approx_eq!(f32, child_offset(0, 1, 280.0), 0.0);
        assert_approx_eq!(f32, child_offset(0, 3, 280.0), -140.0);
        assert_approx_eq!(f32, child_offset(1, 3, 280.0), 0.0);
        assert_approx_eq!(f32, child_offset(2, 3, 280.0), 140.0);
    }

    proptest! {
        #[test]
        fn prop_children_span_the_bar(count in 2usize..12, x in -500.0f32..500.0) {
            let family = Family::new(persons(count + 2), vec![Relation::new(0, 1, (2..count + 2).collect())]);
            let mut surface = RecordingSurface::new(Size::new(800.0, 400.0));
            renderer().render(&family, 0, &mut surface, Point::new(x, 40.0)).unwrap();

            let children: Vec<_> = surface.nodes().skip(2).map(|bounds| bounds.center()).collect();
            prop_assert_eq!(children.len(), count);
            for (i, center) in children.iter().enumerate() {
                let expected = x + i as f32 / (count - 1) as f32 * 280.0 - 140.0;
                prop_assert!((center.x() - expected).abs() < 1e-3);
                prop_assert!((center.y() - 140.0).abs() < 1e-3);
            }
            prop_assert!((children[0].x() - (x - 140.0)).abs() < 1e-3);
            prop_assert!((children[count - 1].x() - (x + 140.0)).abs() < 1e-3);
        }

        #[test]
        fn prop_render_is_deterministic(root in 0usize..9) {
            let family = Family::sample();
            let (first, a) = record(&renderer(), &family, root);
            let (second, b) = record(&renderer(), &family, root);
            prop_assert_eq!(first, second);
            prop_assert_eq!(a.commands(), b.commands());
        }
    }
}
