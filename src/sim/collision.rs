//! Collision queries against the current world
//!
//! Both queries use the character's top-left position and the box size from
//! [`Tuning`]. Neither mutates anything; "no hit" is simply `None`.

use super::world::{Ladder, Platform, World};
use crate::tuning::Tuning;

/// Whether a character at `x` overlaps the half-open span [x1, x2)
#[inline]
pub fn overlaps_span(x: f32, char_width: f32, x1: f32, x2: f32) -> bool {
    x + char_width > x1 && x < x2
}

/// First platform (in build order) whose surface the character's bottom edge
/// crossed this frame
///
/// Callers only ask while falling; a rising character never lands.
pub fn find_landing_platform<'w>(
    world: &'w World,
    tuning: &Tuning,
    x: f32,
    prev_bottom: f32,
    next_bottom: f32,
) -> Option<&'w Platform> {
    world.platforms.iter().find(|p| {
        overlaps_span(x, tuning.char_width, p.x1, p.x2)
            && prev_bottom <= p.y
            && next_bottom >= p.y
    })
}

/// The ladder, if the character at (x, y) is close enough to grab it
pub fn ladder_at<'w>(world: &'w World, tuning: &Tuning, x: f32, y: f32) -> Option<&'w Ladder> {
    world.ladder.as_ref().filter(|l| {
        overlaps_span(x, tuning.char_width, l.x1, l.x2)
            && y >= l.y_top - tuning.ladder_grab_tolerance
            && y <= l.y_bot + tuning.ladder_grab_tolerance
    })
}
