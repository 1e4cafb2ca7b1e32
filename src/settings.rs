//! Game settings and preferences
//!
//! Read-only: the page may embed a JSON block
//! (`<script id="snake-settings" type="application/json">`). Nothing is saved.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;
use crate::tuning::GameConfig;

/// Background colors cycled on every food pickup
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#bfcc00", "#ffcc00", "#00ccbf", "#cc00bf", "#ccbf00", "#bf00cc",
];

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixel size of one grid cell
    pub tile_size: f32,
    /// Fixed run seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Hex colors (`#rrggbb`) for the background cycle; the first is the start color
    pub palette: Vec<String>,

    /// Simulation tuning
    pub game: GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),

            game: GameConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parsed palette as linear RGBA, invalid entries skipped
    pub fn palette_rgba(&self) -> Vec<[f32; 4]> {
        self.palette.iter().filter_map(|c| parse_hex_color(c)).collect()
    }

    /// Settings with invalid tuning replaced by defaults
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.game.validate() {
            log::warn!("Invalid game tuning ({}), using defaults", e);
            self.game = GameConfig::default();
        }
        if !(self.tile_size > 0.0) {
            self.tile_size = TILE_SIZE;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// DOM id of the embedded settings block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "snake-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Bad settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Native: defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// `#rrggbb` to sRGB-encoded RGBA
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_parses() {
        let settings = Settings::default();
        let palette = settings.palette_rgba();
        assert_eq!(palette.len(), 6);
        assert!((palette[0][0] - 0xbf as f32 / 255.0).abs() < 1e-6);
        assert!((palette[0][1] - 0.8).abs() < 1e-6);
        assert_eq!(palette[0][2], 0.0);
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        assert_eq!(parse_hex_color("bfcc00"), None);
        assert_eq!(parse_hex_color("#bfcc0"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{"seed": 5, "muted": true, "game": {"grid_width": 50}}"#)
                .unwrap();
        assert_eq!(settings.seed, Some(5));
        assert!(settings.muted);
        assert_eq!(settings.game.grid_width, 50);
        assert_eq!(settings.game.grid_height, 30);
        assert_eq!(settings.tile_size, 16.0);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut settings = Settings::default();
        settings.music_volume = 0.25;
        settings.seed = Some(77);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_sanitized_replaces_bad_tuning() {
        let mut settings = Settings::default();
        settings.game.grid_width = 0;
        settings.master_volume = 3.0;
        settings.tile_size = -1.0;
        let settings = settings.sanitized();
        assert_eq!(settings.game, GameConfig::default());
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.tile_size, 16.0);
    }

    #[test]
    fn test_oversized_grid_from_page_falls_back() {
        let settings = Settings::from_json(r#"{"game": {"grid_width": 4294967295}}"#)
            .unwrap()
            .sanitized();
        assert_eq!(settings.game.grid_width, 40);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{not json").is_err());
    }
}
