//! Per-floor level layout
//!
//! A floor is a named page section. Each floor lists the platforms drawn on it,
//! with `x`/`w` in screen px and `y_offset` measured down from the section top.
//! Floors missing from the layout still get a fallback ledge from the builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One authored platform, relative to its floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Left edge (px)
    pub x: f32,
    /// Width (px)
    pub w: f32,
    /// Surface offset below the section top (px)
    #[serde(rename = "yOffset", alias = "y_offset")]
    pub y_offset: f32,
}

impl PlatformSpec {
    pub const fn new(x: f32, w: f32, y_offset: f32) -> Self {
        Self { x, w, y_offset }
    }
}

/// Platforms authored for a single floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,
}

/// Two authored platforms on one floor that a falling character could hit at once
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOverlap {
    pub floor: String,
    pub first: usize,
    pub second: usize,
}

/// Floor name -> authored platforms. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelConfig {
    floors: BTreeMap<String, FloorLayout>,
}

impl LevelConfig {
    /// Empty layout (every floor gets only its fallback ledge)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style floor insertion
    pub fn with_floor(mut self, name: &str, platforms: Vec<PlatformSpec>) -> Self {
        self.floors
            .insert(name.to_string(), FloorLayout { platforms });
        self
    }

    /// Parse a layout such as `{ "hero": { "platforms": [ { "x": 60, "w": 220, "yOffset": 260 } ] } }`
    ///
    /// Unknown keys (e.g. per-floor `ladders`) are ignored: the ladder is derived.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Authored platforms for a floor, empty if the floor isn't described
    pub fn platforms(&self, floor: &str) -> &[PlatformSpec] {
        self.floors
            .get(floor)
            .map(|f| f.platforms.as_slice())
            .unwrap_or(&[])
    }

    /// Surface offset of the floor's primary (first) platform
    pub fn primary_offset(&self, floor: &str) -> Option<f32> {
        self.platforms(floor).first().map(|p| p.y_offset)
    }

    /// Floor names in the layout
    pub fn floor_names(&self) -> impl Iterator<Item = &str> {
        self.floors.keys().map(String::as_str)
    }

    /// Same-height platform pairs whose spans overlap
    ///
    /// Landing takes the first match in build order, so these make the result
    /// depend on ordering rather than on the layout.
    pub fn overlaps(&self) -> Vec<PlatformOverlap> {
        let mut out = Vec::new();
        for (floor, layout) in &self.floors {
            let ps = &layout.platforms;
            for i in 0..ps.len() {
                for j in (i + 1)..ps.len() {
                    let (a, b) = (ps[i], ps[j]);
                    let same_y = (a.y_offset - b.y_offset).abs() < f32::EPSILON;
                    let spans_overlap = a.x < b.x + b.w && b.x < a.x + a.w;
                    if same_y && spans_overlap {
                        out.push(PlatformOverlap {
                            floor: floor.clone(),
                            first: i,
                            second: j,
                        });
                    }
                }
            }
        }
        out
    }

    /// Warn once about each overlapping pair; returns how many there were
    pub fn report_overlaps(&self) -> usize {
        let overlaps = self.overlaps();
        for overlap in &overlaps {
            log::warn!(
                "Floor {}: platforms {} and {} overlap at the same height",
                overlap.floor,
                overlap.first,
                overlap.second
            );
        }
        overlaps.len()
    }
}

/// The site's section ids, top to bottom
pub const DEFAULT_FLOORS: [&str; 5] = ["hero", "about", "projects", "skills", "contact"];

/// Built-in layout for the default five-section site
pub fn default_level() -> LevelConfig {
    LevelConfig::new()
        .with_floor(
            "hero",
            vec![
                PlatformSpec::new(60.0, 220.0, 260.0),
                PlatformSpec::new(360.0, 180.0, 340.0),
            ],
        )
        .with_floor(
            "about",
            vec![
                PlatformSpec::new(80.0, 200.0, 240.0),
                PlatformSpec::new(320.0, 160.0, 320.0),
                PlatformSpec::new(560.0, 200.0, 260.0),
            ],
        )
        .with_floor(
            "projects",
            vec![
                PlatformSpec::new(70.0, 160.0, 260.0),
                PlatformSpec::new(280.0, 220.0, 360.0),
                PlatformSpec::new(560.0, 180.0, 300.0),
            ],
        )
        .with_floor(
            "skills",
            vec![
                PlatformSpec::new(90.0, 240.0, 260.0),
                PlatformSpec::new(390.0, 160.0, 330.0),
                PlatformSpec::new(600.0, 160.0, 250.0),
            ],
        )
        .with_floor(
            "contact",
            vec![
                PlatformSpec::new(120.0, 260.0, 280.0),
                PlatformSpec::new(460.0, 240.0, 340.0),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_authored_ladders() {
        let json = r#"{
            "hero": {
                "platforms": [ { "x": 60, "w": 220, "yOffset": 260 } ],
                "ladders": [ { "x": 140, "w": 50, "from": "hero", "to": "about" } ]
            },
            "contact": { "platforms": [] }
        }"#;
        let level = LevelConfig::from_json(json).unwrap();
        assert_eq!(level.platforms("hero"), &[PlatformSpec::new(60.0, 220.0, 260.0)]);
        assert!(level.platforms("contact").is_empty());
        assert!(level.platforms("missing").is_empty());
        assert_eq!(level.primary_offset("hero"), Some(260.0));
        assert_eq!(level.primary_offset("contact"), None);
    }

    #[test]
    fn test_default_level_has_no_overlaps() {
        let level = default_level();
        assert!(level.overlaps().is_empty());
        assert_eq!(level.report_overlaps(), 0);
        let names: Vec<&str> = level.floor_names().collect();
        for floor in DEFAULT_FLOORS {
            assert!(names.contains(&floor));
        }
    }

    #[test]
    fn test_overlap_detection() {
        let level = LevelConfig::new().with_floor(
            "about",
            vec![
                PlatformSpec::new(80.0, 200.0, 240.0),
                PlatformSpec::new(200.0, 100.0, 240.0),
                PlatformSpec::new(300.0, 100.0, 240.0),
            ],
        );
        let overlaps = level.overlaps();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].floor, "about");
        assert_eq!((overlaps[0].first, overlaps[0].second), (0, 1));
        assert_eq!(level.report_overlaps(), 1);
    }
}
