//! Integration tests for the TreeBuilder API
//!
//! These tests verify that the public API works and is usable.

use kinfolk::{
    KinfolkError, TreeBuilder,
    config::AppConfig,
    family::{Family, FamilyError},
    surface::DrawCommand,
};

const DOE_FAMILY: &str = r#"
[[persons]]
first_name = "John"
last_name = "Doe"
gender = "male"
birth_date = "1940-09-27"
death_date = "2010-10-17"

[[persons]]
first_name = "Jane"
last_name = "Brennan"
gender = "female"
birth_date = "1945-06-14"

[[persons]]
first_name = "Jack"
last_name = "Doe"
gender = "male"
birth_date = "1965-11-23"

[[persons]]
first_name = "Jo"
last_name = "Doe"
gender = "non-binary"
birth_date = "1968-02-01"

[[relations]]
male = 0
female = 1
children = [2, 3]
"#;

#[test]
fn test_parse_family_document() {
    let builder = TreeBuilder::default();
    let family = builder.parse(DOE_FAMILY).expect("Failed to parse family");

    assert_eq!(family.len(), 4);
    assert_eq!(family.relations().len(), 1);
    assert_eq!(family.person(3).unwrap().summary(), "Jo Doe (nb)");
    assert!(family.person(0).unwrap().death_date().is_some());
}

#[test]
fn test_render_svg() {
    let builder = TreeBuilder::default();
    let family = builder.parse(DOE_FAMILY).expect("Failed to parse family");
    let svg = builder.render_svg(&family, 0).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("John Doe (m)"));
    assert!(svg.contains("1940-09-27 - 2010-10-17"));
    assert!(svg.contains("data-layer=\"connector\""));
}

#[test]
fn test_render_commands_match_layout() {
    let builder = TreeBuilder::default();
    let family = builder.parse(DOE_FAMILY).unwrap();
    let commands = builder.render_commands(&family, 0).unwrap();

    let nodes = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::RoundedRect { .. }))
        .count();
    let lines = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::Line { .. }))
        .count();
    assert_eq!(nodes, 4);
    // partner connector, stem, bar and two drops
    assert_eq!(lines, 5);
}

#[test]
fn test_render_is_deterministic() {
    let builder = TreeBuilder::default();
    let family = Family::sample();

    let first = builder.render_svg(&family, 0).unwrap();
    let second = builder.render_svg(&family, 0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_family_has_no_root() {
    let builder = TreeBuilder::default();
    let family = builder.parse("").unwrap();
    assert!(family.is_empty());

    for root in [0, 5] {
        let result = builder.render_svg(&family, root);
        assert!(matches!(
            result,
            Err(KinfolkError::Family(FamilyError::PersonOutOfBounds { .. }))
        ));
        assert!(builder.render_commands(&family, root).is_err());
    }
}

#[test]
fn test_parse_invalid_documents() {
    let builder = TreeBuilder::default();

    let bad_gender = r#"
        [[persons]]
        first_name = "A"
        last_name = "B"
        gender = "robot"
        birth_date = "2000-01-01"
    "#;
    match builder.parse(bad_gender) {
        Err(KinfolkError::Import { src, .. }) => assert!(src.contains("robot")),
        other => panic!("expected import error, got {other:?}"),
    }

    let dangling_child = format!("{DOE_FAMILY}\n[[relations]]\nmale = 2\nfemale = 3\nchildren = [7]\n");
    match builder.parse(&dangling_child) {
        Err(KinfolkError::Family(FamilyError::RelationOutOfBounds {
            relation, index, ..
        })) => {
            assert_eq!(relation, 1);
            assert_eq!(index, 7);
        }
        other => panic!("expected family error, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_root() {
    let builder = TreeBuilder::default();
    let result = builder.render_svg(&Family::sample(), 42);
    assert!(matches!(
        result,
        Err(KinfolkError::Family(FamilyError::PersonOutOfBounds { index: 42, .. }))
    ));
}

#[test]
fn test_builder_with_config() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        connector = "curved"

        [canvas]
        width = 1000.0
        background_color = "ivory"
        "#,
    )
    .unwrap();
    let builder = TreeBuilder::new(config);
    let family = Family::sample();

    let svg = builder.render_svg(&family, 0).unwrap();
    assert!(svg.contains("width=\"1000\""));
    assert!(svg.contains("<path"));

    let commands = builder.render_commands(&family, 0).unwrap();
    assert!(
        commands
            .iter()
            .any(|command| matches!(command, DrawCommand::QuadraticCurve { .. }))
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let config: AppConfig = toml::from_str("[style]\nline_color = \"#zzz\"").unwrap();
    let builder = TreeBuilder::new(config);
    let result = builder.render_svg(&Family::sample(), 0);
    assert!(matches!(result, Err(KinfolkError::Config(_))));
}
