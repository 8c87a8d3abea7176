//! Control modes
//!
//! Browse: the page scrolls natively and the character rides the ladder while
//! the visitor scrolls. Focused: the keyboard drives the character and the
//! page follows it.

/// Top-level control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Focused,
}

impl Mode {
    /// Hint panel text for this mode
    pub fn hint(&self) -> &'static str {
        match self {
            Mode::Focused => {
                "Game focus: ON • Arrows move • Space/Up jump • Hold Up/Down on ladder to climb • Let go = stick • Esc exit"
            }
            Mode::Browse => {
                "Browse normally • When you scroll, character teleports to right ladder and rides the scroll • Click character or press G to play"
            }
        }
    }

    /// Tooltip on the character itself
    pub fn tooltip(&self) -> &'static str {
        match self {
            Mode::Focused => "Game controls active (Esc to exit)",
            Mode::Browse => "Click to play (or press G)",
        }
    }
}

/// Explicit visitor intent that changes mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCommand {
    /// Character clicked or enter key pressed
    Activate,
    /// Exit key pressed
    Exit,
}

/// Single-shot deadline timer; restarting replaces the pending deadline
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStopTimer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl ScrollStopTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and start a new one from `now`
    pub fn restart(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, the first poll at or after the deadline
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Mode state machine plus the browse-mode auto-ride sub-state
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    mode: Mode,
    auto_ride: bool,
    scroll_stop: ScrollStopTimer,
}

impl Controls {
    pub fn new(scroll_stop_delay_ms: f64) -> Self {
        Self {
            mode: Mode::Browse,
            auto_ride: false,
            scroll_stop: ScrollStopTimer::new(scroll_stop_delay_ms),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_focused(&self) -> bool {
        self.mode == Mode::Focused
    }

    /// True only in Browse while the visitor is actively scrolling
    pub fn auto_ride(&self) -> bool {
        self.auto_ride
    }

    pub fn scroll_stop_pending(&self) -> bool {
        self.scroll_stop.is_pending()
    }

    /// Apply a mode command; returns true if the mode changed
    pub fn apply(&mut self, command: ModeCommand) -> bool {
        let next = match command {
            ModeCommand::Activate => Mode::Focused,
            ModeCommand::Exit => Mode::Browse,
        };
        if next == self.mode {
            return false;
        }
        self.mode = next;
        if next == Mode::Focused {
            self.auto_ride = false;
            self.scroll_stop.cancel();
        }
        log::info!("Mode: {:?}", next);
        true
    }

    /// A native scroll event happened at `now`
    ///
    /// Ignored while focused: the camera's own scrolling must not look like
    /// the visitor scrolling.
    pub fn on_scroll(&mut self, now_ms: f64) {
        if self.is_focused() {
            return;
        }
        self.auto_ride = true;
        self.scroll_stop.restart(now_ms);
    }

    /// Advance the debounce clock
    pub fn poll(&mut self, now_ms: f64) {
        if self.scroll_stop.poll(now_ms) {
            self.auto_ride = false;
        }
    }

    /// Release the debounce timer
    pub fn teardown(&mut self) {
        self.scroll_stop.cancel();
        self.auto_ride = false;
    }
}
