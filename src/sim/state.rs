//! Session state and core simulation types
//!
//! Everything a run needs lives in `GameSession`; screen geometry and
//! physics constants travel in `SessionContext` instead of globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyRamp;
use super::ground::ScrollingGround;
use super::obstacle::{Cloud, Obstacle, ObstacleKind};
use super::player::Player;
use super::spawn::SpawnDirector;
use crate::assets::procedural::{
    CLOUD_SIZE, FLYER_SIZE, GROUND_OBSTACLE_SIZE, GROUND_TILE_SIZE, RUNNER_SIZE,
};
use crate::assets::{AssetProvider, SpriteKey};
use crate::consts::*;
use crate::error::Result;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, runner blinking, waiting for the first jump
    Intro,
    /// Active run
    Playing,
    /// Run ended, waiting for restart or quit
    GameOver,
}

/// Screen geometry and physics shared by every component of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionContext {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration per tick while airborne
    pub gravity: f32,
    /// Bottom edge for the runner and ground obstacles
    pub ground_line: f32,
    /// Runner's top edge may not cross above this
    pub ceiling: f32,
}

impl SessionContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gravity: GRAVITY,
            ground_line: (height * GROUND_LINE_RATIO).floor(),
            ceiling: (height * CEILING_RATIO).floor(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Frame dimensions the simulation places entities with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSizes {
    pub runner: Vec2,
    pub duck_width: f32,
    pub ground_obstacle: Vec2,
    pub flyer: Vec2,
    pub cloud: Vec2,
    pub ground_tile: Vec2,
}

impl SpriteSizes {
    /// Read every size from loaded assets
    pub fn from_assets(assets: &dyn AssetProvider) -> Result<Self> {
        Ok(Self {
            runner: assets.require(SpriteKey::Runner(0))?.size(),
            duck_width: assets.require(SpriteKey::RunnerDucking(0))?.size().x,
            ground_obstacle: assets.require(SpriteKey::GroundObstacle(0))?.size(),
            flyer: assets.require(SpriteKey::Flyer(0))?.size(),
            cloud: assets.require(SpriteKey::Cloud)?.size(),
            ground_tile: assets.require(SpriteKey::Ground)?.size(),
        })
    }
}

impl Default for SpriteSizes {
    fn default() -> Self {
        let v = |(w, h): (u32, u32)| Vec2::new(w as f32, h as f32);
        Self {
            runner: v(RUNNER_SIZE),
            duck_width: RUNNER_SIZE.0 as f32,
            ground_obstacle: v(GROUND_OBSTACLE_SIZE),
            flyer: v(FLYER_SIZE),
            cloud: v(CLOUD_SIZE),
            ground_tile: v(GROUND_TILE_SIZE),
        }
    }
}

/// Live obstacles and decorations, in spawn order
#[derive(Debug, Clone)]
pub struct Entities {
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    next_id: u32,
}

impl Default for Entities {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            clouds: Vec::new(),
            next_id: 1,
        }
    }
}

impl Entities {
    /// Allocate a new obstacle ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Live obstacles whose kind matches
    pub fn count(&self, pred: impl Fn(ObstacleKind) -> bool) -> usize {
        self.obstacles.iter().filter(|o| pred(o.kind)).count()
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped,
    MightyJumped,
    Ducked,
    CeilingHit,
    /// Score reached a multiple of 100
    Checkpoint(u32),
    Died,
    SpeedUp { game_speed: i32, ground_speed: i32 },
    PhaseChanged(GamePhase),
    NewHighScore(u32),
    RunEnded { score: u32, ticks: u64, speed: i32 },
}

/// One process-lifetime session: intro, any number of runs, the high score
#[derive(Debug, Clone)]
pub struct GameSession {
    pub ctx: SessionContext,
    pub sizes: SpriteSizes,
    pub phase: GamePhase,
    pub player: Player,
    pub ground: ScrollingGround,
    pub entities: Entities,
    pub spawner: SpawnDirector,
    pub ramp: DifficultyRamp,
    /// Ticks since the current run started
    pub tick_count: u64,
    /// Best score this process has seen
    pub high_score: u32,
    /// Runs started so far
    pub runs: u32,
    pub seed: u64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// A session sitting on the title screen
    pub fn new(ctx: SessionContext, sizes: SpriteSizes, seed: u64) -> Self {
        Self {
            ctx,
            sizes,
            phase: GamePhase::Intro,
            player: Player::blinking(&ctx, sizes.runner, sizes.duck_width),
            ground: ScrollingGround::new(&ctx, sizes.ground_tile, -INITIAL_GAME_SPEED),
            entities: Entities::default(),
            spawner: SpawnDirector::new(),
            ramp: DifficultyRamp::new(INITIAL_GAME_SPEED),
            tick_count: 0,
            high_score: 0,
            runs: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start a fresh run; the high score and RNG carry over
    pub fn begin_playing(&mut self) {
        let ctx = self.ctx;
        self.player = Player::new(&ctx, self.sizes.runner, self.sizes.duck_width);
        self.ground = ScrollingGround::new(&ctx, self.sizes.ground_tile, -INITIAL_GAME_SPEED);
        self.entities = Entities::default();
        self.spawner = SpawnDirector::new();
        self.ramp = DifficultyRamp::new(INITIAL_GAME_SPEED);
        self.tick_count = 0;
        self.runs += 1;
        self.set_phase(GamePhase::Playing);
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
