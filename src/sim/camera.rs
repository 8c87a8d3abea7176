//! Camera and scroll synchronization
//!
//! Focused: physics drives the page scroll. Browse: the scroll drives where
//! the riding character is placed. Never both in one frame.

use glam::Vec2;

use crate::tuning::Tuning;

/// The page viewport as the simulation sees it
pub trait Viewport {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Current vertical scroll offset
    fn scroll_y(&self) -> f32;
    /// Request a vertical scroll offset; the page may clamp it
    fn scroll_to(&mut self, y: f32);
}

#[inline]
pub fn to_screen_y(world_y: f32, scroll_y: f32) -> f32 {
    world_y - scroll_y
}

/// World position -> screen position
#[inline]
pub fn to_screen(world: Vec2, scroll_y: f32) -> Vec2 {
    Vec2::new(world.x, to_screen_y(world.y, scroll_y))
}

/// Scroll offset that keeps a character at `y` on the camera target line
pub fn camera_scroll_for(y: f32, viewport_height: f32, tuning: &Tuning) -> f32 {
    (y - tuning.camera_target_screen_y(viewport_height)).max(0.0)
}

/// Scroll the page to follow a character at `y`; returns the requested offset
pub fn follow<V: Viewport + ?Sized>(viewport: &mut V, y: f32, tuning: &Tuning) -> f32 {
    let target = camera_scroll_for(y, viewport.height(), tuning);
    viewport.scroll_to(target);
    target
}

/// World y a scroll-riding character sits at
pub fn ride_y(scroll_y: f32, viewport_height: f32, tuning: &Tuning) -> f32 {
    scroll_y + tuning.camera_target_screen_y(viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_scroll_never_negative() {
        let t = Tuning::default();
        assert_eq!(camera_scroll_for(100.0, 1000.0, &t), 0.0);
        assert_eq!(camera_scroll_for(1000.0, 1000.0, &t), 400.0);
    }

    #[test]
    fn test_ride_and_follow_agree() {
        // A character placed by riding is exactly where the camera would put it
        let t = Tuning::default();
        let y = ride_y(1500.0, 1000.0, &t);
        assert_eq!(y, 2100.0);
        assert_eq!(camera_scroll_for(y, 1000.0, &t), 1500.0);
        assert_eq!(to_screen(Vec2::new(5.0, y), 1500.0), Vec2::new(5.0, 600.0));
    }
}
