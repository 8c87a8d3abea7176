//! Browser mounting
//!
//! Wires the simulation to the live page: section geometry, window scroll,
//! keyboard, the character element, the hint panel and the debug overlay.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, KeyboardEvent, Window,
};

use super::frame_loop::{FrameSlot, RafLoop};
use super::input::{KeyboardState, handle_key_down};
use super::overlay::OverlayStyle;
use crate::level::{DEFAULT_FLOORS, LevelConfig, default_level};
use crate::settings::Settings;
use crate::sim::{
    DebugKind, DebugRect, FloorPosition, ModeCommand, RenderFrame, SimState, Viewport, tick,
    wall_rects,
};
use crate::tuning::Tuning;

/// Id of the character element
pub const CHARACTER_ID: &str = "character";
/// Id of the optional hint panel
pub const HINT_ID: &str = "game-hint";

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// `window`-backed viewport
pub struct DomViewport {
    window: Window,
}

impl DomViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for DomViewport {
    fn width(&self) -> f32 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn scroll_to(&mut self, y: f32) {
        let x = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(x, y as f64);
    }
}

/// Measure section tops; sections missing from the page are unmeasurable
pub fn measure_floors(document: &Document, ids: &[String]) -> Vec<FloorPosition> {
    ids.iter()
        .map(|id| {
            let top = html_element(document, id).map(|el| el.offset_top() as f32);
            FloorPosition::new(id, top)
        })
        .collect()
}

/// Everything the frame logic and event handlers share
struct Layer {
    sim: SimState,
    level: LevelConfig,
    settings: Settings,
    keyboard: KeyboardState,
    viewport: DomViewport,
    document: Document,
    floor_ids: Vec<String>,
    character_el: HtmlElement,
    hint_el: Option<HtmlElement>,
    debug_el: HtmlElement,
    debug_nodes: Vec<(DebugKind, HtmlElement)>,
    drawn_generation: u64,
}

impl Layer {
    fn rebuild(&mut self) {
        let floors = measure_floors(&self.document, &self.floor_ids);
        let width = self.viewport.width();
        self.sim.rebuild_world(&floors, &self.level, width);
    }

    fn frame(&mut self, now: f64) -> Result<(), JsValue> {
        let input = self.settings.keys.tick_input(&self.keyboard);
        let frame = tick(&mut self.sim, &input, &mut self.viewport, now);
        self.render(frame)
    }

    fn render(&mut self, frame: RenderFrame) -> Result<(), JsValue> {
        let focused = self.sim.controls.is_focused();
        let style = self.character_el.style();
        style.set_property(
            "transform",
            &format!("translate({}px, {}px)", frame.pos.x, frame.pos.y),
        )?;
        style.set_property("cursor", if focused { "default" } else { "pointer" })?;
        self.character_el
            .class_list()
            .toggle_with_force("focused", focused)?;
        self.character_el
            .set_attribute("title", frame.mode.tooltip())?;

        if let Some(hint) = &self.hint_el {
            hint.set_hidden(!self.settings.show_hints);
            hint.set_text_content(Some(frame.mode.hint()));
        }

        self.render_debug()
    }

    fn render_debug(&mut self) -> Result<(), JsValue> {
        let width = self.viewport.width();
        let walls = wall_rects(width, self.viewport.height(), &self.sim.tuning);
        let rects: Vec<DebugRect> = self
            .sim
            .world
            .debug_rects(self.viewport.scroll_y(), width, &self.sim.tuning)
            .into_iter()
            .chain(walls)
            .filter(|r| match r.kind {
                DebugKind::Platform => self.settings.show_debug_platforms,
                DebugKind::Ladder => self.settings.show_debug_ladders,
                DebugKind::FloorLine | DebugKind::Wall => self.settings.show_floor_lines,
            })
            .collect();

        if self.drawn_generation != self.sim.world.generation
            || self
                .debug_nodes
                .iter()
                .map(|(kind, _)| *kind)
                .ne(rects.iter().map(|r| r.kind))
        {
            self.debug_el.set_inner_html("");
            self.debug_nodes.clear();
            for rect in &rects {
                let node: HtmlElement = self.document.create_element("div")?.dyn_into()?;
                let look = OverlayStyle::for_kind(rect.kind);
                node.set_class_name(look.class);
                let style = node.style();
                for (property, value) in look.properties() {
                    style.set_property(property, value)?;
                }
                self.debug_el.append_child(&node)?;
                self.debug_nodes.push((rect.kind, node));
            }
            self.drawn_generation = self.sim.world.generation;
        }

        for ((_, node), rect) in self.debug_nodes.iter().zip(&rects) {
            let style = node.style();
            style.set_property("left", &format!("{}px", rect.x))?;
            style.set_property("top", &format!("{}px", rect.y))?;
            style.set_property("width", &format!("{}px", rect.w))?;
            style.set_property("height", &format!("{}px", rect.h))?;
        }
        Ok(())
    }
}

/// A registered DOM listener, removed on teardown
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target,
            kind,
            closure,
        })
    }

    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// The mounted character layer
#[wasm_bindgen]
pub struct GameLayer {
    layer: Rc<RefCell<Layer>>,
    raf: Option<RafLoop>,
    listeners: Vec<Listener>,
    settle_timeout: Option<i32>,
    _settle: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl GameLayer {
    /// Mount onto the given section ids with the built-in level layout
    pub fn mount(section_ids: Vec<String>) -> Result<GameLayer, JsValue> {
        Self::mount_with(section_ids, default_level(), Settings::load(), Tuning::default())
    }

    /// Mount with a JSON level layout and optional JSON tuning
    pub fn mount_json(
        section_ids: Vec<String>,
        level_json: &str,
        tuning_json: Option<String>,
    ) -> Result<GameLayer, JsValue> {
        let level =
            LevelConfig::from_json(level_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let tuning = match tuning_json {
            Some(json) => {
                Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Tuning::default(),
        };
        Self::mount_with(section_ids, level, Settings::load(), tuning)
    }

    /// Enter focused mode (same as clicking the character)
    pub fn activate(&self) {
        self.layer.borrow_mut().sim.controls.apply(ModeCommand::Activate);
    }

    /// Back to browsing
    pub fn exit(&self) {
        self.layer.borrow_mut().sim.controls.apply(ModeCommand::Exit);
    }

    pub fn is_focused(&self) -> bool {
        self.layer.borrow().sim.controls.is_focused()
    }

    /// Flip the platform/ladder overlay and persist the choice
    pub fn toggle_debug(&self) {
        let mut layer = self.layer.borrow_mut();
        layer.settings.toggle_debug();
        layer.settings.save();
    }

    /// Remeasure sections now (e.g. after content finished loading)
    pub fn rebuild(&self) {
        self.layer.borrow_mut().rebuild();
    }

    /// Tear everything down; the layer stops responding afterwards
    pub fn destroy(mut self) {
        self.teardown();
    }
}

impl GameLayer {
    pub fn mount_with(
        section_ids: Vec<String>,
        level: LevelConfig,
        settings: Settings,
        tuning: Tuning,
    ) -> Result<GameLayer, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let character_el = html_element(&document, CHARACTER_ID)
            .ok_or_else(|| JsValue::from_str("missing #character element"))?;
        let hint_el = html_element(&document, HINT_ID);

        level.report_overlaps();

        let debug_el: HtmlElement = document.create_element("div")?.dyn_into()?;
        debug_el.set_class_name("debug-overlay");
        let debug_style = debug_el.style();
        debug_style.set_property("position", "fixed")?;
        debug_style.set_property("inset", "0")?;
        debug_style.set_property("pointer-events", "none")?;
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&debug_el)?;

        let layer = Rc::new(RefCell::new(Layer {
            sim: SimState::new(tuning),
            level,
            settings,
            keyboard: KeyboardState::new(),
            viewport: DomViewport::new(window.clone()),
            document,
            floor_ids: section_ids,
            character_el: character_el.clone(),
            hint_el,
            debug_el,
            debug_nodes: Vec::new(),
            drawn_generation: 0,
        }));
        layer.borrow_mut().rebuild();

        let mut listeners = Vec::new();
        let win_target: EventTarget = window.clone().into();

        {
            let layer = layer.clone();
            listeners.push(Listener::add(win_target.clone(), "keydown", false, move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                let mut l = layer.borrow_mut();
                l.keyboard.key_down(&key);
                let Layer { sim, settings, .. } = &mut *l;
                if handle_key_down(&mut sim.controls, &settings.keys, &key) {
                    event.prevent_default();
                }
            })?);
        }

        {
            let layer = layer.clone();
            listeners.push(Listener::add(win_target.clone(), "keyup", true, move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    layer.borrow_mut().keyboard.key_up(&event.key());
                }
            })?);
        }

        // Keyups never arrive for keys released outside the window
        {
            let layer = layer.clone();
            listeners.push(Listener::add(win_target.clone(), "blur", true, move |_| {
                layer.borrow_mut().keyboard.clear();
            })?);
        }

        {
            let layer = layer.clone();
            let window = window.clone();
            listeners.push(Listener::add(win_target.clone(), "scroll", true, move |_| {
                layer.borrow_mut().sim.controls.on_scroll(now_ms(&window));
            })?);
        }

        {
            let layer = layer.clone();
            listeners.push(Listener::add(win_target.clone(), "resize", true, move |_| {
                layer.borrow_mut().rebuild();
            })?);
        }

        {
            let layer = layer.clone();
            listeners.push(Listener::add(character_el.into(), "click", true, move |_| {
                layer.borrow_mut().sim.controls.apply(ModeCommand::Activate);
            })?);
        }

        // One more rebuild once late layout (fonts, images) has settled
        let settle = {
            let layer = layer.clone();
            Closure::<dyn FnMut()>::new(move || {
                log::debug!("Settle rebuild");
                layer.borrow_mut().rebuild();
            })
        };
        let delay = layer.borrow().sim.tuning.settle_rebuild_delay_ms;
        let settle_timeout = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                settle.as_ref().unchecked_ref(),
                delay,
            )
            .ok();

        let slot = FrameSlot::new();
        {
            let layer = layer.clone();
            slot.set(move |time| {
                if let Err(e) = layer.borrow_mut().frame(time) {
                    log::warn!("Frame render failed: {:?}", e);
                }
            });
        }
        let raf = RafLoop::start(slot)?;

        log::info!(
            "Game layer mounted on {} sections",
            layer.borrow().floor_ids.len()
        );

        Ok(GameLayer {
            layer,
            raf: Some(raf),
            listeners,
            settle_timeout,
            _settle: Some(settle),
        })
    }

    /// Mount onto the default site sections
    pub fn mount_default() -> Result<GameLayer, JsValue> {
        Self::mount(DEFAULT_FLOORS.iter().map(|s| s.to_string()).collect())
    }

    fn teardown(&mut self) {
        if let Some(raf) = self.raf.take() {
            raf.cancel();
        }
        if let (Some(handle), Some(window)) = (self.settle_timeout.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
        self._settle.take();
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        let mut layer = self.layer.borrow_mut();
        layer.sim.controls.teardown();
        layer.keyboard.clear();
        layer.debug_el.remove();
        log::info!("Game layer torn down");
    }
}

impl Drop for GameLayer {
    fn drop(&mut self) {
        if self.raf.is_some() {
            self.teardown();
        }
    }
}
