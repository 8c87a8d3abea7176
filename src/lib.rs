//! Scroll Climber - a platformer character that lives on a single-page site
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (world building, collisions, modes, physics, camera)
//! - `level`: Per-floor platform layout
//! - `tuning`: Data-driven physics constants
//! - `settings`: Visitor preferences (debug overlays, key bindings)
//! - `platform`: Browser/native platform abstraction

pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::LevelConfig;
pub use settings::Settings;
pub use tuning::Tuning;

/// Default simulation constants (one step per animation frame)
pub mod consts {
    /// Character bounding box
    pub const CHAR_W: f32 = 32.0;
    pub const CHAR_H: f32 = 48.0;

    /// Horizontal speed (px/frame)
    pub const SPEED_X: f32 = 4.0;
    /// Jump impulse (px/frame, upward)
    pub const JUMP_V: f32 = 16.0;
    /// Gravity (px/frame²)
    pub const GRAVITY: f32 = 0.9;
    /// Ladder climb speed (px/frame)
    pub const CLIMB_SPEED: f32 = 4.0;

    /// Tower walls the character can't walk past
    pub const TOWER_LEFT: f32 = 60.0;
    pub const TOWER_RIGHT: f32 = 60.0;

    /// Right-side ladder column
    pub const LADDER_W: f32 = 54.0;
    pub const LADDER_MARGIN_RIGHT: f32 = 70.0;
    /// Vertical slack when grabbing the ladder near its ends
    pub const LADDER_GRAB_TOLERANCE: f32 = 40.0;

    /// Guaranteed base ledge per floor
    pub const FALLBACK_LEFT: f32 = 80.0;
    pub const FALLBACK_LADDER_GAP: f32 = 10.0;
    /// Standing line for floors with no authored platforms
    pub const DEFAULT_PLATFORM_Y_OFFSET: f32 = 260.0;

    /// Keep the character around 60% down the screen
    pub const CAMERA_TARGET_Y: f32 = 0.6;

    /// Scroll quiet period before auto-ride stops
    pub const SCROLL_STOP_DELAY_MS: f64 = 180.0;
    /// Extra rebuild after mount to absorb late layout shifts
    pub const SETTLE_REBUILD_DELAY_MS: i32 = 250;
}
