//! Keyboard state and key bindings
//!
//! Keys are identified by their DOM `KeyboardEvent.key` names ("ArrowLeft",
//! " ", "Escape", ...).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{Controls, ModeCommand, TickInput};

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Any of `keys` held
    pub fn any_held(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }

    /// Drop everything (window lost focus, keyups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Key name lists for every action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub climb_up: Vec<String>,
    pub climb_down: Vec<String>,
    pub jump: Vec<String>,
    /// Enter focused mode
    pub activate: Vec<String>,
    /// Back to browsing
    pub exit: Vec<String>,
    /// Keys whose page default (scrolling, activation) is blocked while focused
    pub captured: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: keys(&["ArrowLeft"]),
            right: keys(&["ArrowRight"]),
            climb_up: keys(&["ArrowUp"]),
            climb_down: keys(&["ArrowDown"]),
            jump: keys(&[" ", "ArrowUp"]),
            activate: keys(&["g", "G"]),
            exit: keys(&["Escape"]),
            captured: keys(&["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", " ", "Enter"]),
        }
    }
}

impl KeyBindings {
    /// Mode command bound to a key, if any
    pub fn command(&self, key: &str) -> Option<ModeCommand> {
        if self.activate.iter().any(|k| k == key) {
            Some(ModeCommand::Activate)
        } else if self.exit.iter().any(|k| k == key) {
            Some(ModeCommand::Exit)
        } else {
            None
        }
    }

    pub fn is_captured(&self, key: &str) -> bool {
        self.captured.iter().any(|k| k == key)
    }

    /// Sample held keys into a frame input
    pub fn tick_input(&self, keyboard: &KeyboardState) -> TickInput {
        TickInput {
            left: keyboard.any_held(&self.left),
            right: keyboard.any_held(&self.right),
            climb_up: keyboard.any_held(&self.climb_up),
            climb_down: keyboard.any_held(&self.climb_down),
            jump: keyboard.any_held(&self.jump),
        }
    }
}

/// Route a keydown to the mode machine
///
/// Returns true if the page's default action for the key must be prevented.
pub fn handle_key_down(controls: &mut Controls, bindings: &KeyBindings, key: &str) -> bool {
    if let Some(command) = bindings.command(key) {
        controls.apply(command);
    }
    controls.is_focused() && bindings.is_captured(key)
}
