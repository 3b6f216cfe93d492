//! Generational depth of a subtree.
//!
//! The renderer sizes the child bar of a couple from the number of
//! generations below it: `level_width * 2^depth`. Doubling per generation is
//! not space-optimal, but sibling subtrees never overlap.

use kinfolk_core::family::{Family, FamilyError, PersonIndex};

/// Returns the maximum number of generations below `person`.
///
/// A person without relations, or whose relations have no children, has
/// depth 0. Otherwise the depth is one more than the deepest child of any of
/// the person's relations.
///
/// # Errors
///
/// Returns [`FamilyError::PersonOutOfBounds`] if `person` or any child index
/// reached during the walk does not exist.
///
/// # Example
///
/// ```
/// # use kinfolk::depth;
/// # use kinfolk_core::family::Family;
/// let family = Family::sample();
/// assert_eq!(depth(&family, 0).unwrap(), 2); // John: children, grandchildren
/// assert_eq!(depth(&family, 2).unwrap(), 0); // Jack: childless couple
/// assert_eq!(depth(&family, 5).unwrap(), 0); // Jenny: leaf
/// ```
pub fn depth(family: &Family, person: PersonIndex) -> Result<u32, FamilyError> {
    family.person(person)?;

    let mut deepest: Option<u32> = None;
    for relation in family.relations_of(person) {
        for &child in relation.children() {
            let child_depth = depth(family, child)?;
            deepest = Some(deepest.map_or(child_depth, |d| d.max(child_depth)));
        }
    }

    Ok(deepest.map_or(0, |d| d + 1))
}

/// Width of the child bar below a couple rooted at a subtree of `depth`.
pub fn level_width(base: f32, depth: u32) -> f32 {
    base * 2f32.powi(depth as i32)
}
