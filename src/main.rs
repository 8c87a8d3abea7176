//! Scroll Climber entry point
//!
//! On the web this mounts the character onto the default site sections. The
//! native build runs a short headless session over a synthetic page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already set if the host page mounted a layer itself
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Scroll Climber starting...");

    let layer = scroll_climber::platform::web::GameLayer::mount_default()?;
    // Lives for the whole page session
    std::mem::forget(layer);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Scroll Climber (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to use it on a page");

    demo::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use scroll_climber::level::{DEFAULT_FLOORS, default_level};
    use scroll_climber::platform::HeadlessViewport;
    use scroll_climber::sim::{
        FloorPosition, ModeCommand, RenderFrame, SimState, TickInput, Viewport, tick,
    };
    use scroll_climber::{Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const SECTION_HEIGHT: f32 = 900.0;

    fn frame(
        state: &mut SimState,
        viewport: &mut HeadlessViewport,
        now: &mut f64,
        input: TickInput,
    ) -> RenderFrame {
        *now += FRAME_MS;
        tick(state, &input, viewport, *now)
    }

    pub fn run() {
        let level = default_level();
        level.report_overlaps();
        let settings = Settings::load();
        let floors: Vec<FloorPosition> = DEFAULT_FLOORS
            .iter()
            .enumerate()
            .map(|(i, name)| FloorPosition::measured(name, i as f32 * SECTION_HEIGHT))
            .collect();

        let mut viewport =
            HeadlessViewport::new(1280.0, 800.0, SECTION_HEIGHT * floors.len() as f32);
        let mut state = SimState::new(Tuning::default());
        state.rebuild_world(&floors, &level, viewport.width());

        let mut now = 0.0;

        // Browse: the visitor scrolls, the character rides the ladder
        for step in 0..30 {
            viewport.set_scroll(step as f32 * 40.0);
            state.controls.on_scroll(now);
            frame(&mut state, &mut viewport, &mut now, TickInput::default());
        }
        log::info!(
            "After scrolling: character at ({:.0}, {:.0}), riding={}",
            state.character.pos.x,
            state.character.pos.y,
            state.controls.auto_ride()
        );

        // Let the debounce expire
        for _ in 0..15 {
            frame(&mut state, &mut viewport, &mut now, TickInput::default());
        }
        log::info!("Scrolling stopped, riding={}", state.controls.auto_ride());

        // Focused: climb down, step off, drop to a ledge
        state.controls.apply(ModeCommand::Activate);
        let climb = TickInput {
            climb_down: true,
            ..Default::default()
        };
        for _ in 0..60 {
            frame(&mut state, &mut viewport, &mut now, climb);
        }
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let mut last = None;
        for _ in 0..120 {
            last = Some(frame(&mut state, &mut viewport, &mut now, left));
        }

        if let Some(render) = last {
            log::info!(
                "Focused run ended at world ({:.0}, {:.0}), screen ({:.0}, {:.0}), scroll {:.0}, grounded={}",
                state.character.pos.x,
                state.character.pos.y,
                render.pos.x,
                render.pos.y,
                viewport.scroll_y(),
                state.character.on_ground
            );
        }

        if settings.debug_overlay() {
            for rect in state
                .world
                .debug_rects(viewport.scroll_y(), viewport.width(), &state.tuning)
            {
                log::debug!("{:?}", rect);
            }
        }

        println!(
            "{} platforms, ladder {:?}, mode {:?}",
            state.world.platforms.len(),
            state.world.ladder.map(|l| (l.y_top, l.y_bot)),
            state.mode()
        );
    }
}
