//! Simulation state and core types
//!
//! Everything the frame stepper owns lives in [`SimState`]; the presentation
//! layer only reads it between steps.

use glam::Vec2;

use super::mode::{Controls, Mode};
use super::world::{FloorPosition, World};
use crate::level::LevelConfig;
use crate::tuning::Tuning;

/// The player character, in world (document) space
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Vertical velocity (px/frame, positive = falling)
    pub vy: f32,
    pub on_ground: bool,
    /// Set once by the first successful world build
    placed: bool,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// An unplaced character at the origin
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vy: 0.0,
            on_ground: false,
            placed: false,
        }
    }

    /// Whether the spawn logic has run
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Put the character at rest at `pos`
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vy = 0.0;
        self.on_ground = true;
        self.placed = true;
    }
}

/// What the presentation layer needs after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Screen-space position of the character's top-left corner
    pub pos: Vec2,
    pub mode: Mode,
}

/// Complete simulation state, threaded through every step
#[derive(Debug, Clone)]
pub struct SimState {
    pub character: Character,
    pub world: World,
    pub controls: Controls,
    pub tuning: Tuning,
}

impl SimState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            character: Character::new(),
            world: World::default(),
            controls: Controls::new(tuning.scroll_stop_delay_ms),
            tuning,
        }
    }

    /// Replace the world from freshly measured section positions
    ///
    /// Places the character on the first platform the first time a platform
    /// exists. Returns true if this call spawned the character.
    pub fn rebuild_world(
        &mut self,
        floors: &[FloorPosition],
        level: &LevelConfig,
        viewport_width: f32,
    ) -> bool {
        let generation = self.world.generation + 1;
        let mut world = World::build(floors, level, viewport_width, &self.tuning);
        world.generation = generation;
        self.world = world;
        self.spawn_if_unplaced(viewport_width)
    }

    fn spawn_if_unplaced(&mut self, viewport_width: f32) -> bool {
        if self.character.is_placed() {
            return false;
        }
        let Some(first) = self.world.platforms.first() else {
            return false;
        };
        let pos = Vec2::new(
            self.tuning.ladder_center_x(viewport_width),
            first.y - self.tuning.char_height,
        );
        self.character.place(pos);
        log::info!("Character spawned at ({:.0}, {:.0}) on {}", pos.x, pos.y, first.floor);
        true
    }

    pub fn mode(&self) -> Mode {
        self.controls.mode()
    }
}
