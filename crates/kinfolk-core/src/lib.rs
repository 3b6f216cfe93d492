//! Kinfolk Core Types and Definitions
//!
//! This crate provides the foundational types for Kinfolk family trees:
//!
//! - **Family**: Persons, couple relations and immutable family snapshots ([`family`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke/text styles and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod family;
pub mod geometry;
