//! Visitor preferences
//!
//! Persisted in LocalStorage. Only presentation and key bindings live here;
//! character state is never saved.

use serde::{Deserialize, Serialize};

use crate::platform::input::KeyBindings;

/// Overlay and control preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug overlay ===
    /// Draw platform rectangles
    pub show_debug_platforms: bool,
    /// Draw the ladder column
    pub show_debug_ladders: bool,
    /// Draw a line at each section top, plus the tower wall strips
    pub show_floor_lines: bool,

    // === HUD ===
    /// Show the mode hint panel
    pub show_hints: bool,

    // === Controls ===
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_debug_platforms: true,
            show_debug_ladders: true,
            show_floor_lines: true,

            show_hints: true,

            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Whether any debug rectangle is drawn
    pub fn debug_overlay(&self) -> bool {
        self.show_debug_platforms || self.show_debug_ladders || self.show_floor_lines
    }

    /// Flip both world-object overlays together
    pub fn toggle_debug(&mut self) {
        let on = !(self.show_debug_platforms || self.show_debug_ladders);
        self.show_debug_platforms = on;
        self.show_debug_ladders = on;
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "scroll_climber_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_debug() {
        let mut s = Settings::default();
        assert!(s.debug_overlay());
        s.toggle_debug();
        assert!(!s.show_debug_platforms && !s.show_debug_ladders);
        // Floor lines are independent
        assert!(s.debug_overlay());
        s.toggle_debug();
        assert!(s.show_debug_platforms && s.show_debug_ladders);
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{ "show_hints": false }"#).unwrap();
        assert!(!s.show_hints);
        assert!(s.show_debug_ladders);
        assert_eq!(s.keys, KeyBindings::default());
        assert!(Settings::from_json("not json").is_err());
    }
}
