//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS};
use crate::error::Result;
use crate::sim::SessionContext;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "SOBAKA_SETTINGS";
/// Settings file looked up in the working directory otherwise
pub const DEFAULT_SETTINGS_FILE: &str = "sobaka-run.json";
/// Largest accepted logical screen side
pub const MAX_SCREEN_SIDE: f32 = 16_384.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Logical screen width in pixels
    pub screen_width: f32,
    /// Logical screen height in pixels
    pub screen_height: f32,
    /// Simulation and frame rate
    pub target_fps: u32,

    // === Run ===
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Ring the terminal bell for death and checkpoints
    pub terminal_bell: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,

            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            terminal_bell: true,
        }
    }
}

impl Settings {
    /// Settings file location: `$SOBAKA_SETTINGS`, else the working directory
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse a settings file; unknown keys are ignored, missing keys default
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values that would stall or break the loop
    fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(1, 240);
        self.screen_width = screen_side(self.screen_width, SCREEN_WIDTH);
        self.screen_height = screen_side(self.screen_height, SCREEN_HEIGHT);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Screen and physics context for the session
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.screen_width, self.screen_height)
    }

    /// Configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Nonsense sizes fall back to the default; huge ones are capped
fn screen_side(value: f32, default: f32) -> f32 {
    if value.is_nan() || value < 1.0 {
        default
    } else {
        value.min(MAX_SCREEN_SIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.screen_width, 1920.0);
        assert_eq!(settings.screen_height, 1080.0);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.seed, None);
        assert!(settings.terminal_bell);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.muted);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, EngineError::Settings(_)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "target_fps": 0, "master_volume": 3.0, "screen_width": -5 }"#)
                .unwrap();
        assert_eq!(settings.target_fps, 1);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.screen_width, 1920.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from(Path::new("/nonexistent/sobaka-run.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn test_huge_screen_is_capped() {
        let settings = Settings::from_json(r#"{ "screen_height": 2e10, "screen_width": 5e6 }"#)
            .unwrap();
        assert_eq!(settings.screen_height, MAX_SCREEN_SIDE);
        assert_eq!(settings.screen_width, MAX_SCREEN_SIDE);
        let ground_line = (MAX_SCREEN_SIDE * crate::consts::GROUND_LINE_RATIO).floor();
        assert_eq!(settings.context().ground_line, ground_line);
    }

    #[test]
    fn test_default_context() {
        let ctx = Settings::default().context();
        assert_eq!(ctx.ground_line, 1058.0);
    }

    #[test]
    fn test_fixed_seed_is_used() {
        let settings = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        assert_eq!(settings.resolve_seed(), 7);
    }
}
