//! Data-driven physics and layout tuning
//!
//! Every threshold the simulation uses lives here so a page can ship its own
//! JSON without recompiling. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics, geometry and camera constants for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Character bounding box width (px)
    pub char_width: f32,
    /// Character bounding box height (px)
    pub char_height: f32,

    /// Horizontal speed per held direction key (px/frame)
    pub speed_x: f32,
    /// Jump impulse magnitude (applied as negative vy)
    pub jump_velocity: f32,
    /// Gravity added to vy every airborne frame
    pub gravity: f32,
    /// Ladder climb speed (px/frame)
    pub climb_speed: f32,

    /// Left wall margin for the focused-mode x clamp
    pub wall_left: f32,
    /// Right wall margin for the focused-mode x clamp
    pub wall_right: f32,

    /// Ladder column width
    pub ladder_width: f32,
    /// Gap between the ladder column and the right viewport edge
    pub ladder_margin_right: f32,
    /// Extra vertical reach when grabbing the ladder near its ends
    pub ladder_grab_tolerance: f32,

    /// Fallback platform left edge
    pub fallback_left: f32,
    /// Gap between the fallback platform and the ladder
    pub fallback_ladder_gap: f32,
    /// Standing line offset used for floors without authored platforms
    pub default_platform_y_offset: f32,

    /// Fraction of viewport height the camera keeps the character at
    pub camera_target_y: f32,
    /// Quiet period after the last scroll event before auto-ride stops (ms)
    pub scroll_stop_delay_ms: f64,
    /// Delay of the extra rebuild after mount, for late layout shifts (ms)
    pub settle_rebuild_delay_ms: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            char_width: CHAR_W,
            char_height: CHAR_H,

            speed_x: SPEED_X,
            jump_velocity: JUMP_V,
            gravity: GRAVITY,
            climb_speed: CLIMB_SPEED,

            wall_left: TOWER_LEFT,
            wall_right: TOWER_RIGHT,

            ladder_width: LADDER_W,
            ladder_margin_right: LADDER_MARGIN_RIGHT,
            ladder_grab_tolerance: LADDER_GRAB_TOLERANCE,

            fallback_left: FALLBACK_LEFT,
            fallback_ladder_gap: FALLBACK_LADDER_GAP,
            default_platform_y_offset: DEFAULT_PLATFORM_Y_OFFSET,

            camera_target_y: CAMERA_TARGET_Y,
            scroll_stop_delay_ms: SCROLL_STOP_DELAY_MS,
            settle_rebuild_delay_ms: SETTLE_REBUILD_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Left edge of the ladder column for a viewport width, never negative
    pub fn ladder_x1(&self, viewport_width: f32) -> f32 {
        (viewport_width - self.ladder_margin_right - self.ladder_width).max(0.0)
    }

    /// Right edge of the ladder column
    pub fn ladder_x2(&self, viewport_width: f32) -> f32 {
        self.ladder_x1(viewport_width) + self.ladder_width
    }

    /// Character x that centers it on the ladder column
    pub fn ladder_center_x(&self, viewport_width: f32) -> f32 {
        self.ladder_x1(viewport_width) + self.ladder_width / 2.0 - self.char_width / 2.0
    }

    /// Focused-mode horizontal bounds `(min_x, max_x)`
    pub fn wall_bounds(&self, viewport_width: f32) -> (f32, f32) {
        (
            self.wall_left,
            viewport_width - self.wall_right - self.char_width,
        )
    }

    /// Screen y the camera keeps the character at
    pub fn camera_target_screen_y(&self, viewport_height: f32) -> f32 {
        viewport_height * self.camera_target_y
    }
}
