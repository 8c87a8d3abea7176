//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Viewport metrics and scrolling
//! - Keyboard input
//! - Frame scheduling
//! - Debug overlay styling
//! - DOM mounting (wasm only)

pub mod frame_loop;
pub mod input;
pub mod overlay;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame_loop::FrameSlot;
pub use input::{KeyBindings, KeyboardState, handle_key_down};
pub use overlay::OverlayStyle;
pub use viewport::HeadlessViewport;
