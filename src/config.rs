use crate::error::MapError;
use macroquad::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Distance kept between the bag label and the bottom edge of the stage.
pub const BAG_EDGE_BUFFER: f32 = 32.0;

/// Game-wide settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the numbered level files (`1.json`, `2.json`, ...).
    pub maps_dir: PathBuf,
    /// Full window size.
    pub stage: [f32; 2],
    /// Size of the area the level is scaled into.
    pub display_size: [f32; 2],
    /// Where that area starts inside the window.
    pub display_offset: [f32; 2],
    /// Player speed in map pixels per frame.
    pub move_speed: f32,
    /// Player bounding box as a fraction of one tile.
    pub player_box_scale: f32,
    /// Seconds between winning a level and loading the next one.
    pub transition_delay: f32,
    /// Height of one HUD text line.
    pub label_line_spacing: f32,
    /// Display-space bag label position; computed from the stage when absent.
    pub bag_anchor: Option<[f32; 2]>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("assets/maps"),
            stage: [1280.0, 720.0],
            display_size: [720.0, 720.0],
            display_offset: [280.0, 0.0],
            move_speed: 1.5,
            player_box_scale: 0.75,
            transition_delay: 1.0,
            label_line_spacing: 24.0,
            bag_anchor: None,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Screen layout for maps and the renderer.
    pub fn display(&self) -> DisplayContext {
        DisplayContext {
            stage: Vec2::from(self.stage),
            display_size: Vec2::from(self.display_size),
            offset: Vec2::from(self.display_offset),
            line_spacing: self.label_line_spacing,
            bag_anchor: self.bag_anchor.map(Vec2::from),
        }
    }

    /// Player tuning for every level.
    pub fn player(&self) -> PlayerSettings {
        PlayerSettings {
            move_speed: self.move_speed,
            box_scale: self.player_box_scale,
        }
    }
}

/// Screen layout handed to every map and to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayContext {
    /// Full window size.
    pub stage: Vec2,
    /// Area the map is scaled into.
    pub display_size: Vec2,
    /// Top-left of that area inside the window.
    pub offset: Vec2,
    /// Height of one HUD text line.
    pub line_spacing: f32,
    /// Bag label position override.
    pub bag_anchor: Option<Vec2>,
}

impl DisplayContext {
    /// Scale that fits a map `map_px_width` pixels wide into the display area.
    pub fn scale_for(&self, map_px_width: f32) -> f32 {
        self.display_size.x / map_px_width
    }

    /// Bag label position for a map with tiles `tile_w` wide.
    pub fn bag_anchor_for(&self, tile_w: f32) -> Vec2 {
        self.bag_anchor.unwrap_or_else(|| {
            vec2(
                tile_w,
                self.stage.y - BAG_EDGE_BUFFER - self.line_spacing,
            )
        })
    }
}

impl Default for DisplayContext {
    fn default() -> Self {
        GameConfig::default().display()
    }
}

/// Player tuning shared by every level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    /// Map pixels moved per frame.
    pub move_speed: f32,
    /// Bounding box size as a fraction of a tile.
    pub box_scale: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        GameConfig::default().player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "move_speed": 2.0, "bag_anchor": [10, 20] }"#).unwrap();
        assert_eq!(cfg.move_speed, 2.0);
        assert_eq!(cfg.transition_delay, 1.0);
        assert_eq!(cfg.display().bag_anchor_for(16.0), vec2(10.0, 20.0));
    }

    #[test]
    fn default_bag_anchor_sits_above_bottom_edge() {
        let display = GameConfig::default().display();
        assert_eq!(display.bag_anchor_for(16.0), vec2(16.0, 720.0 - 32.0 - 24.0));
        assert_eq!(display.scale_for(360.0), 2.0);
    }
}
