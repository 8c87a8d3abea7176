//! World geometry derived from page layout
//!
//! The world is rebuilt wholesale whenever section positions may have moved
//! (resize, late layout). Nothing in it is mutated after a build.

use super::camera::to_screen_y;
use crate::level::LevelConfig;
use crate::tuning::Tuning;

/// Debug-view thickness of a platform rectangle
pub const PLATFORM_DEBUG_HEIGHT: f32 = 10.0;
/// Width of the tower wall strips
pub const WALL_STRIP_WIDTH: f32 = 10.0;

/// A measured page section
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPosition {
    pub name: String,
    /// Top offset in document space; `None` if the section can't be measured
    pub top: Option<f32>,
}

impl FloorPosition {
    pub fn new(name: &str, top: Option<f32>) -> Self {
        Self {
            name: name.to_string(),
            top,
        }
    }

    pub fn measured(name: &str, top: f32) -> Self {
        Self::new(name, Some(top))
    }
}

/// A horizontal ledge, in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub floor: String,
    /// Half-open span [x1, x2)
    pub x1: f32,
    pub x2: f32,
    /// Top surface
    pub y: f32,
}

/// The single climbable column on the right of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ladder {
    pub x1: f32,
    pub x2: f32,
    /// Highest standing line
    pub y_top: f32,
    /// Lowest standing line
    pub y_bot: f32,
}

/// Per-floor metadata kept from the last build
#[derive(Debug, Clone, PartialEq)]
pub struct FloorMeta {
    pub name: String,
    pub top: f32,
    /// World y at which the character rests on the floor's primary platform
    pub stand_y: f32,
}

/// Borrowed view of any world object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldObject<'a> {
    Platform(&'a Platform),
    Ladder(&'a Ladder),
}

impl WorldObject<'_> {
    /// Topmost y of the object
    pub fn top(&self) -> f32 {
        match self {
            WorldObject::Platform(p) => p.y,
            WorldObject::Ladder(l) => l.y_top,
        }
    }
}

/// Kind of rectangle in the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugKind {
    Platform,
    Ladder,
    FloorLine,
    /// Full-height strip at a tower wall margin
    Wall,
}

/// Screen-space rectangle for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugRect {
    pub kind: DebugKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Platforms and ladder for one layout measurement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    /// Sorted by surface y (stable)
    pub platforms: Vec<Platform>,
    pub ladder: Option<Ladder>,
    /// Measured floors sorted by top
    pub floors: Vec<FloorMeta>,
    /// Incremented on every rebuild; 0 = never built
    pub generation: u64,
}

impl World {
    /// Derive the world from section positions and the level layout
    pub fn build(
        floors: &[FloorPosition],
        level: &LevelConfig,
        viewport_width: f32,
        tuning: &Tuning,
    ) -> Self {
        let ladder_x1 = tuning.ladder_x1(viewport_width);
        let fallback_x1 = tuning.fallback_left;
        let fallback_x2 = ladder_x1 - tuning.fallback_ladder_gap;

        let mut platforms = Vec::new();
        let mut metas = Vec::new();

        for floor in floors {
            let Some(top) = floor.top else {
                log::debug!("Floor {} not measurable, skipped", floor.name);
                continue;
            };

            // Guaranteed base ledge so every floor stays reachable
            if fallback_x2 > fallback_x1 {
                platforms.push(Platform {
                    floor: floor.name.clone(),
                    x1: fallback_x1,
                    x2: fallback_x2,
                    y: top + tuning.default_platform_y_offset,
                });
            }

            for authored in level.platforms(&floor.name) {
                platforms.push(Platform {
                    floor: floor.name.clone(),
                    x1: authored.x,
                    x2: authored.x + authored.w,
                    y: top + authored.y_offset,
                });
            }

            let offset = level
                .primary_offset(&floor.name)
                .unwrap_or(tuning.default_platform_y_offset);
            metas.push(FloorMeta {
                name: floor.name.clone(),
                top,
                stand_y: top + offset - tuning.char_height,
            });
        }

        metas.sort_by(|a, b| a.top.total_cmp(&b.top));

        // One continuous segment spanning every standing line
        let ladder = if metas.len() >= 2 {
            let y_top = metas
                .iter()
                .map(|f| f.stand_y)
                .fold(f32::INFINITY, f32::min);
            let y_bot = metas
                .iter()
                .map(|f| f.stand_y)
                .fold(f32::NEG_INFINITY, f32::max);
            Some(Ladder {
                x1: ladder_x1,
                x2: tuning.ladder_x2(viewport_width),
                y_top,
                y_bot,
            })
        } else {
            None
        };

        platforms.sort_by(|a, b| a.y.total_cmp(&b.y));

        log::debug!(
            "World built: {} platforms over {} floors, ladder {:?}",
            platforms.len(),
            metas.len(),
            ladder.map(|l| (l.y_top, l.y_bot))
        );

        Self {
            platforms,
            ladder,
            floors: metas,
            generation: 0,
        }
    }

    /// Every object, ordered by topmost y
    pub fn objects(&self) -> Vec<WorldObject<'_>> {
        let mut objects: Vec<WorldObject<'_>> =
            self.platforms.iter().map(WorldObject::Platform).collect();
        if let Some(ladder) = &self.ladder {
            objects.push(WorldObject::Ladder(ladder));
        }
        objects.sort_by(|a, b| a.top().total_cmp(&b.top()));
        objects
    }

    /// Screen-space rectangles for the debug overlay
    pub fn debug_rects(
        &self,
        scroll_y: f32,
        viewport_width: f32,
        tuning: &Tuning,
    ) -> Vec<DebugRect> {
        let mut rects: Vec<DebugRect> = self
            .floors
            .iter()
            .map(|f| DebugRect {
                kind: DebugKind::FloorLine,
                x: tuning.wall_left,
                y: to_screen_y(f.top, scroll_y),
                w: (viewport_width - tuning.wall_left - tuning.wall_right).max(0.0),
                h: 2.0,
            })
            .collect();

        for object in self.objects() {
            rects.push(match object {
                WorldObject::Platform(p) => DebugRect {
                    kind: DebugKind::Platform,
                    x: p.x1,
                    y: to_screen_y(p.y, scroll_y),
                    w: p.x2 - p.x1,
                    h: PLATFORM_DEBUG_HEIGHT,
                },
                WorldObject::Ladder(l) => DebugRect {
                    kind: DebugKind::Ladder,
                    x: l.x1,
                    y: to_screen_y(l.y_top, scroll_y),
                    w: l.x2 - l.x1,
                    h: l.y_bot - l.y_top,
                },
            });
        }
        rects
    }
}

/// The two tower wall strips, in screen space
///
/// They don't scroll: the right strip ends at the right wall margin.
pub fn wall_rects(viewport_width: f32, viewport_height: f32, tuning: &Tuning) -> [DebugRect; 2] {
    let strip = |x: f32| DebugRect {
        kind: DebugKind::Wall,
        x,
        y: 0.0,
        w: WALL_STRIP_WIDTH,
        h: viewport_height,
    };
    [
        strip(tuning.wall_left),
        strip(viewport_width - tuning.wall_right - WALL_STRIP_WIDTH),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{PlatformSpec, default_level};
    use crate::sim::state::SimState;
    use proptest::prelude::*;

    const WIDTH: f32 = 1200.0;

    fn hero_about() -> (Vec<FloorPosition>, LevelConfig) {
        let floors = vec![
            FloorPosition::measured("hero", 0.0),
            FloorPosition::measured("about", 1000.0),
        ];
        let level =
            LevelConfig::new().with_floor("hero", vec![PlatformSpec::new(60.0, 220.0, 260.0)]);
        (floors, level)
    }

    #[test]
    fn test_two_floor_world() {
        let (floors, level) = hero_about();
        let tuning = Tuning::default();
        let world = World::build(&floors, &level, WIDTH, &tuning);
        let ladder_x1 = tuning.ladder_x1(WIDTH);

        // hero: fallback + authored at 260; about: fallback only at 1260
        assert_eq!(world.platforms.len(), 3);
        assert_eq!(world.platforms[0].x1, 80.0);
        assert_eq!(world.platforms[0].x2, ladder_x1 - 10.0);
        assert_eq!(world.platforms[0].y, 260.0);
        assert_eq!(world.platforms[1].x1, 60.0);
        assert_eq!(world.platforms[1].x2, 280.0);
        assert_eq!(world.platforms[1].y, 260.0);
        assert_eq!(world.platforms[2].floor, "about");
        assert_eq!(world.platforms[2].y, 1260.0);

        let ladder = world.ladder.unwrap();
        assert_eq!(ladder.x1, ladder_x1);
        assert_eq!(ladder.x2, ladder_x1 + 54.0);
        assert_eq!(ladder.y_top, 260.0 - 48.0);
        assert_eq!(ladder.y_bot, 1000.0 + 260.0 - 48.0);
    }

    #[test]
    fn test_single_floor_has_no_ladder() {
        let floors = vec![
            FloorPosition::measured("hero", 0.0),
            FloorPosition::new("about", None),
        ];
        let world = World::build(&floors, &default_level(), WIDTH, &Tuning::default());
        assert!(world.ladder.is_none());
        assert_eq!(world.floors.len(), 1);
        // Fallback plus the two authored hero platforms
        assert_eq!(world.platforms.len(), 3);
        assert!(world.platforms.iter().all(|p| p.floor == "hero"));
    }

    #[test]
    fn test_narrow_viewport_drops_fallback_only() {
        let (floors, level) = hero_about();
        let world = World::build(&floors, &level, 200.0, &Tuning::default());
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].x1, 60.0);
        // Ladder clamped to the left edge but still present
        let ladder = world.ladder.unwrap();
        assert_eq!(ladder.x1, 76.0);
        let world = World::build(&floors, &level, 50.0, &Tuning::default());
        assert_eq!(world.ladder.unwrap().x1, 0.0);
    }

    #[test]
    fn test_standing_line_above_section_top() {
        // A first platform closer to the top than the character is tall puts the
        // standing line above the section itself; kept as-is.
        let floors = vec![
            FloorPosition::measured("hero", 0.0),
            FloorPosition::measured("about", 1000.0),
        ];
        let level =
            LevelConfig::new().with_floor("about", vec![PlatformSpec::new(80.0, 200.0, 20.0)]);
        let world = World::build(&floors, &level, WIDTH, &Tuning::default());
        let about = world.floors.iter().find(|f| f.name == "about").unwrap();
        assert_eq!(about.stand_y, 1000.0 + 20.0 - 48.0);
        assert!(about.stand_y < about.top);
    }

    #[test]
    fn test_objects_sorted_and_debug_rects() {
        let (floors, level) = hero_about();
        let tuning = Tuning::default();
        let world = World::build(&floors, &level, WIDTH, &tuning);
        let objects = world.objects();
        assert_eq!(objects.len(), 4);
        assert!(objects.windows(2).all(|w| w[0].top() <= w[1].top()));
        // Ladder top (212) sorts before the hero platforms (260)
        assert!(matches!(objects[0], WorldObject::Ladder(_)));

        let rects = world.debug_rects(100.0, WIDTH, &tuning);
        assert_eq!(rects.len(), 2 + 4);
        let lines: Vec<_> = rects
            .iter()
            .filter(|r| r.kind == DebugKind::FloorLine)
            .collect();
        assert_eq!(lines[0].y, -100.0);
        assert_eq!(lines[1].y, 900.0);
        let ladder = rects.iter().find(|r| r.kind == DebugKind::Ladder).unwrap();
        assert_eq!(ladder.y, 212.0 - 100.0);
        assert_eq!(ladder.h, 1000.0);
    }

    #[test]
    fn test_rebuild_is_idempotent_and_spawns_once() {
        let (floors, level) = hero_about();
        let mut state = SimState::new(Tuning::default());
        assert!(state.rebuild_world(&floors, &level, WIDTH));
        let first = state.world.clone();

        let spawn = state.character.clone();
        assert_eq!(spawn.pos.y, 260.0 - 48.0);
        assert_eq!(spawn.pos.x, state.tuning.ladder_center_x(WIDTH));
        assert!(spawn.on_ground);
        assert_eq!(spawn.vy, 0.0);

        state.character.pos.x += 100.0;
        assert!(!state.rebuild_world(&floors, &level, WIDTH));
        assert_eq!(state.world.platforms, first.platforms);
        assert_eq!(state.world.ladder, first.ladder);
        assert_eq!(state.world.generation, first.generation + 1);
        assert_eq!(state.character.pos.x, spawn.pos.x + 100.0);
    }

    #[test]
    fn test_wall_strips_mark_the_clamp_bounds() {
        let tuning = Tuning::default();
        let [left, right] = wall_rects(WIDTH, 800.0, &tuning);
        assert_eq!((left.x, left.y, left.w, left.h), (60.0, 0.0, 10.0, 800.0));
        assert_eq!(right.x + right.w, WIDTH - 60.0);
        assert!(left.kind == DebugKind::Wall && right.kind == DebugKind::Wall);
    }

    #[test]
    fn test_resize_rebuild_moves_geometry_not_character() {
        let (floors, level) = hero_about();
        let mut state = SimState::new(Tuning::default());
        state.rebuild_world(&floors, &level, WIDTH);
        let before = state.world.clone();
        let placed = state.character.clone();

        // Narrower window reflows the page: sections move down
        let reflowed = vec![
            FloorPosition::measured("hero", 0.0),
            FloorPosition::measured("about", 1400.0),
        ];
        assert!(!state.rebuild_world(&reflowed, &level, 800.0));

        let ladder = state.world.ladder.unwrap();
        assert_eq!(ladder.x1, 800.0 - 70.0 - 54.0);
        assert_ne!(ladder.x1, before.ladder.unwrap().x1);
        assert_eq!(ladder.y_bot, 1400.0 + 260.0 - 48.0);

        let fallbacks: Vec<_> = state
            .world
            .platforms
            .iter()
            .filter(|p| p.x1 == 80.0)
            .collect();
        assert_eq!(fallbacks.len(), 2);
        assert!(fallbacks.iter().all(|p| p.x2 == ladder.x1 - 10.0));
        assert_eq!(fallbacks[1].y, 1660.0);

        assert_eq!(state.world.generation, before.generation + 1);
        assert_eq!(state.character, placed);
    }

    #[test]
    fn test_no_spawn_without_platforms() {
        let floors = vec![FloorPosition::new("hero", None)];
        let mut state = SimState::new(Tuning::default());
        assert!(!state.rebuild_world(&floors, &default_level(), WIDTH));
        assert!(!state.character.is_placed());
    }

    proptest! {
        #[test]
        fn prop_fallback_left_of_ladder(
            width in 300.0f32..3000.0,
            tops in proptest::collection::vec(0.0f32..20000.0, 1..6),
        ) {
            let floors: Vec<FloorPosition> = tops
                .iter()
                .enumerate()
                .map(|(i, t)| FloorPosition::measured(&format!("f{i}"), *t))
                .collect();
            let tuning = Tuning::default();
            let world = World::build(&floors, &LevelConfig::new(), width, &tuning);
            let ladder_x1 = tuning.ladder_x1(width);

            // Every measured floor gets exactly one non-empty fallback
            prop_assert_eq!(world.platforms.len(), floors.len());
            for p in &world.platforms {
                prop_assert!(p.x1 < p.x2);
                prop_assert!(p.x2 < ladder_x1);
            }
            if let Some(ladder) = world.ladder {
                prop_assert!(ladder.y_top <= ladder.y_bot);
            } else {
                prop_assert_eq!(floors.len(), 1);
            }
        }

        #[test]
        fn prop_build_is_deterministic(
            width in 300.0f32..3000.0,
            tops in proptest::collection::vec(0.0f32..20000.0, 0..6),
        ) {
            let floors: Vec<FloorPosition> = tops
                .iter()
                .zip(crate::level::DEFAULT_FLOORS)
                .map(|(t, name)| FloorPosition::measured(name, *t))
                .collect();
            let tuning = Tuning::default();
            let a = World::build(&floors, &default_level(), width, &tuning);
            let b = World::build(&floors, &default_level(), width, &tuning);
            prop_assert_eq!(a, b);
        }
    }
}
