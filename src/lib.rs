//! Sobaka Run - a side-scrolling reflex runner
//!
//! Core modules:
//! - `sim`: Simulation (player, obstacles, spawning, collisions, game session)
//! - `assets`: Sprite frames and collision masks
//! - `renderer`: Scene composition and the terminal renderer
//! - `platform`: Frame pacing and input events
//! - `audio`: Sound cues
//! - `settings`: User configuration
//! - `game`: The frame loop tying the above together

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{EngineError, Result};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TARGET_FPS: u32 = 60;

    /// Default logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Downward acceleration applied each tick while jumping
    pub const GRAVITY: f32 = 0.6;
    /// Launch speed of a normal jump
    pub const JUMP_IMPULSE: f32 = 23.5;
    /// Launch speed of a jump started while ducking
    pub const MIGHTY_JUMP_IMPULSE: f32 = 25.5;

    /// Ground line as a fraction of screen height (floored to whole pixels)
    pub const GROUND_LINE_RATIO: f32 = 0.98;
    /// Invisible ceiling as a fraction of screen height
    pub const CEILING_RATIO: f32 = 0.01;
    /// Ground tiles sit this many pixels above the bottom edge
    pub const GROUND_TILE_MARGIN: f32 = 10.0;

    /// Base obstacle speed at the start of a run
    pub const INITIAL_GAME_SPEED: i32 = 4;
    /// Ticks between difficulty steps
    pub const RAMP_INTERVAL: u64 = 700;

    /// Score increments once per this many ticks
    pub const SCORE_INTERVAL: u64 = 7;
    /// A checkpoint cue plays at every multiple of this score
    pub const CHECKPOINT_SCORE: u32 = 100;

    /// Animation periods (ticks)
    pub const RUN_ANIM_PERIOD: u64 = 5;
    pub const BLINK_OPEN_TICKS: u64 = 400;
    pub const BLINK_CLOSED_TICKS: u64 = 20;
    pub const FLYER_ANIM_PERIOD: u64 = 10;

    /// Clouds drift at a fixed speed regardless of difficulty
    pub const CLOUD_SPEED: f32 = 1.0;
}
