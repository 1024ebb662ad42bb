//! Sprite frames and the provider interface the simulation reads them through
//!
//! The core never decodes images. It asks an `AssetProvider` for already-sized
//! frames, each carrying the opaque-pixel mask used for collision.

pub mod procedural;

pub use procedural::ProceduralAssets;

use glam::Vec2;

use crate::error::{EngineError, Result};
use crate::sim::Mask;

/// Frames in the standing/running sheet: 0-1 blink, 2-3 run, 4 dead
pub const RUNNER_FRAMES: usize = 5;
/// Frames in the ducking sheet
pub const RUNNER_DUCKING_FRAMES: usize = 2;
/// Static ground obstacle looks, one picked at spawn
pub const GROUND_OBSTACLE_VARIANTS: usize = 2;
/// Wing-flap frames shared by both flyer variants
pub const FLYER_FRAMES: usize = 2;
/// Digits 0-9 followed by `H` and `I`
pub const GLYPH_COUNT: usize = 12;
pub const GLYPH_H: usize = 10;
pub const GLYPH_I: usize = 11;

/// Identifies one sprite frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Runner(usize),
    RunnerDucking(usize),
    GroundObstacle(usize),
    Flyer(usize),
    Cloud,
    Ground,
    Glyph(usize),
    GameOver,
    Replay,
}

/// An already-sized image frame plus its collision silhouette
#[derive(Debug, Clone)]
pub struct Sprite {
    pub key: SpriteKey,
    pub mask: Mask,
}

impl Sprite {
    pub fn new(key: SpriteKey, mask: Mask) -> Self {
        Self { key, mask }
    }

    pub fn size(&self) -> Vec2 {
        self.mask.size().as_vec2()
    }
}

/// Supplies pre-loaded sprite frames
pub trait AssetProvider {
    fn sprite(&self, key: SpriteKey) -> Option<&Sprite>;

    /// Like `sprite`, but a missing frame is a `ResourceUnavailable` error
    fn require(&self, key: SpriteKey) -> Result<&Sprite> {
        self.sprite(key)
            .ok_or_else(|| EngineError::unavailable("sprite", format!("{key:?} not loaded")))
    }
}
