//! Frame-stepped simulation module
//!
//! All character logic lives here. It must stay free of DOM access:
//! - One fixed step per animation frame
//! - Page geometry comes in as plain floor positions
//! - The viewport is reached only through the [`Viewport`] trait

pub mod camera;
pub mod collision;
pub mod mode;
pub mod state;
pub mod tick;
pub mod world;

pub use camera::{Viewport, camera_scroll_for, follow, ride_y, to_screen};
pub use collision::{find_landing_platform, ladder_at};
pub use mode::{Controls, Mode, ModeCommand, ScrollStopTimer};
pub use state::{Character, RenderFrame, SimState};
pub use tick::{TickInput, tick};
pub use world::{
    DebugKind, DebugRect, FloorMeta, FloorPosition, Ladder, Platform, World, WorldObject,
    wall_rects,
};
