//! Per-frame simulation step
//!
//! One call per animation frame. The mode decides which branch runs; only the
//! focused branch integrates physics.

use glam::Vec2;

use super::camera::{Viewport, follow, ride_y, to_screen};
use super::collision::{find_landing_platform, ladder_at};
use super::state::{RenderFrame, SimState};

/// Held keys sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb up (on a ladder)
    pub climb_up: bool,
    /// Climb down (on a ladder)
    pub climb_down: bool,
    /// Jump (off a ladder, when grounded)
    pub jump: bool,
}

/// Advance the simulation by one frame
///
/// `now_ms` is the frame clock, used to expire the scroll-stop debounce before
/// the mode branch is chosen.
pub fn tick<V: Viewport + ?Sized>(
    state: &mut SimState,
    input: &TickInput,
    viewport: &mut V,
    now_ms: f64,
) -> RenderFrame {
    state.controls.poll(now_ms);

    let pos = if state.controls.is_focused() {
        step_focused(state, input, viewport)
    } else {
        step_browse(state, viewport)
    };

    RenderFrame {
        pos,
        mode: state.controls.mode(),
    }
}

fn step_browse<V: Viewport + ?Sized>(state: &mut SimState, viewport: &V) -> Vec2 {
    let scroll_y = viewport.scroll_y();

    // Riding needs a ladder; without one the character just stays put
    if state.controls.auto_ride() && state.world.ladder.is_some() {
        let tuning = &state.tuning;
        let c = &mut state.character;
        c.pos = Vec2::new(
            tuning.ladder_center_x(viewport.width()),
            ride_y(scroll_y, viewport.height(), tuning),
        );
        c.vy = 0.0;
        c.on_ground = false;
    }

    to_screen(state.character.pos, scroll_y)
}

fn step_focused<V: Viewport + ?Sized>(
    state: &mut SimState,
    input: &TickInput,
    viewport: &mut V,
) -> Vec2 {
    let SimState {
        character,
        world,
        tuning,
        ..
    } = state;

    let mut x = character.pos.x;
    let mut y = character.pos.y;
    let mut vy = character.vy;

    // Horizontal movement, clamped between the tower walls
    if input.left {
        x -= tuning.speed_x;
    }
    if input.right {
        x += tuning.speed_x;
    }
    let (min_x, max_x) = tuning.wall_bounds(viewport.width());
    x = x.min(max_x).max(min_x);

    if let Some(ladder) = ladder_at(world, tuning, x, y) {
        // No gravity anywhere on the ladder
        vy = 0.0;
        character.on_ground = false;

        if input.climb_up || input.climb_down {
            x = x.min(ladder.x2 - tuning.char_width).max(ladder.x1);
            if input.climb_up {
                y -= tuning.climb_speed;
            }
            if input.climb_down {
                y += tuning.climb_speed;
            }
            y = y.min(ladder.y_bot).max(ladder.y_top);
        }
        // Not climbing: y frozen, x free so the character can step off
    } else {
        if input.jump && character.on_ground {
            vy = -tuning.jump_velocity;
            character.on_ground = false;
        }

        vy += tuning.gravity;

        let prev_bottom = y + tuning.char_height;
        let next_y = y + vy;
        let next_bottom = next_y + tuning.char_height;

        let landing = if vy > 0.0 {
            find_landing_platform(world, tuning, x, prev_bottom, next_bottom)
        } else {
            None
        };

        match landing {
            Some(platform) => {
                y = platform.y - tuning.char_height;
                vy = 0.0;
                character.on_ground = true;
            }
            None => {
                y = next_y;
                character.on_ground = false;
            }
        }
    }

    character.pos = Vec2::new(x, y);
    character.vy = vy;

    follow(viewport, y, tuning);
    to_screen(character.pos, viewport.scroll_y())
}
