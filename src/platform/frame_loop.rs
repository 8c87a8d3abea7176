//! Animation frame loop
//!
//! Scheduling is registered once; what runs each frame lives in a
//! [`FrameSlot`] that can be swapped at any time without restarting the loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Per-frame logic; receives the frame timestamp in ms
pub type FrameLogic = Box<dyn FnMut(f64)>;

/// Reassignable indirection cell the scheduler dereferences every frame
#[derive(Clone, Default)]
pub struct FrameSlot {
    logic: Rc<RefCell<Option<FrameLogic>>>,
    /// Bumped on every set/clear so a swap during `run` isn't undone
    version: Rc<Cell<u64>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the latest frame logic
    pub fn set<F: FnMut(f64) + 'static>(&self, logic: F) {
        self.version.set(self.version.get() + 1);
        *self.logic.borrow_mut() = Some(Box::new(logic));
    }

    pub fn clear(&self) {
        self.version.set(self.version.get() + 1);
        *self.logic.borrow_mut() = None;
    }

    pub fn is_set(&self) -> bool {
        self.logic.borrow().is_some()
    }

    /// Run whatever logic is current; false if the slot is empty
    ///
    /// The logic may replace or clear the slot while it runs.
    pub fn run(&self, time: f64) -> bool {
        let taken = self.logic.borrow_mut().take();
        let Some(mut logic) = taken else {
            return false;
        };
        let version = self.version.get();
        logic(time);
        if self.version.get() == version {
            *self.logic.borrow_mut() = Some(logic);
        }
        true
    }
}

#[cfg(target_arch = "wasm32")]
pub use raf::RafLoop;

#[cfg(target_arch = "wasm32")]
mod raf {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::FrameSlot;

    type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` loop driving a [`FrameSlot`]
    pub struct RafLoop {
        tick: Tick,
        handle: Rc<Cell<Option<i32>>>,
        running: Rc<Cell<bool>>,
    }

    fn request_frame(tick: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window.request_animation_frame(tick.as_ref().unchecked_ref())
    }

    impl RafLoop {
        /// Start requesting frames; each one runs the slot's current logic
        pub fn start(slot: FrameSlot) -> Result<Self, JsValue> {
            let tick: Tick = Rc::new(RefCell::new(None));
            let handle = Rc::new(Cell::new(None));
            let running = Rc::new(Cell::new(true));

            let next = tick.clone();
            let next_handle = handle.clone();
            let still_running = running.clone();
            *tick.borrow_mut() = Some(Closure::new(move |time: f64| {
                if !still_running.get() {
                    return;
                }
                slot.run(time);
                if let Some(cb) = next.borrow().as_ref() {
                    match request_frame(cb) {
                        Ok(h) => next_handle.set(Some(h)),
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }));

            if let Some(cb) = tick.borrow().as_ref() {
                handle.set(Some(request_frame(cb)?));
            }

            Ok(Self {
                tick,
                handle,
                running,
            })
        }

        /// Cancel the pending frame and release the loop closure
        ///
        /// Call from outside the frame logic (teardown, event handlers).
        pub fn cancel(&self) {
            self.running.set(false);
            if let (Some(h), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(h);
            }
            self.tick.borrow_mut().take();
        }
    }

    impl Drop for RafLoop {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_logic_runs_next_frame() {
        let slot = FrameSlot::new();
        assert!(!slot.run(0.0));

        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        slot.set(move |t| l.borrow_mut().push(("a", t)));
        slot.run(1.0);
        slot.run(2.0);

        let l = log.clone();
        slot.set(move |t| l.borrow_mut().push(("b", t)));
        slot.run(3.0);

        assert_eq!(*log.borrow(), vec![("a", 1.0), ("a", 2.0), ("b", 3.0)]);
    }

    #[test]
    fn test_logic_can_replace_itself() {
        let slot = FrameSlot::new();
        let hits = Rc::new(Cell::new(0));

        let inner = slot.clone();
        let h = hits.clone();
        slot.set(move |_| {
            let h2 = h.clone();
            inner.set(move |_| h2.set(h2.get() + 10));
        });
        slot.run(0.0);
        slot.run(0.0);
        assert_eq!(hits.get(), 10);

        let inner = slot.clone();
        slot.set(move |_| inner.clear());
        slot.run(0.0);
        assert!(!slot.is_set());
    }
}
