//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod ground;
pub mod mask;
pub mod obstacle;
pub mod player;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, find_collisions, mask_collision};
pub use difficulty::DifficultyRamp;
pub use ground::ScrollingGround;
pub use mask::Mask;
pub use obstacle::{Cloud, Obstacle, ObstacleKind, Scroller};
pub use player::{Player, PlayerState};
pub use rect::Rect;
pub use spawn::SpawnDirector;
pub use state::{Entities, GameEvent, GamePhase, GameSession, SessionContext, SpriteSizes};
pub use tick::{Action, TickInput, TickOutcome, tick};
