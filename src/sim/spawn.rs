//! Obstacle and cloud spawning policy
//!
//! Every rule is an independent per-tick roll against a fixed denominator.
//! One "pending obstacle" marker is shared by all obstacle variants: the
//! most recent spawn of any variant replaces it, and the gated rules wait
//! for that obstacle to scroll far enough left.

use glam::Vec2;
use rand::Rng;

use super::obstacle::{Cloud, HIGH_FLYER_BANDS, LOW_FLYER_BANDS, Obstacle, ObstacleKind};
use super::state::{Entities, SessionContext, SpriteSizes};
use crate::assets::GROUND_OBSTACLE_VARIANTS;
use crate::error::EngineError;

/// Ground obstacles: at most this many live at once
pub const GROUND_OBSTACLE_LIMIT: usize = 2;
pub const GROUND_OBSTACLE_ODDS: u32 = 50;
/// Marker's right edge must be left of this fraction of the screen width
pub const GROUND_OBSTACLE_GATE: f32 = 0.7;

pub const LOW_FLYER_MIN_TICK: u64 = 500;
pub const LOW_FLYER_ODDS: u32 = 200;

pub const HIGH_FLYER_MIN_TICK: u64 = 50;
pub const HIGH_FLYER_LIMIT: usize = 10;
pub const HIGH_FLYER_ODDS: u32 = 20;

pub const FLYER_GATE: f32 = 0.8;

pub const CLOUD_LIMIT: usize = 5;
pub const CLOUD_ODDS: u32 = 300;

/// One-in-`odds` uniform draw
fn roll<R: Rng + ?Sized>(rng: &mut R, odds: u32) -> bool {
    rng.random_range(0..odds) == 0
}

/// Decides each tick whether new obstacles or clouds appear
#[derive(Debug, Clone, Default)]
pub struct SpawnDirector {
    pending: Option<u32>,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the most recently spawned obstacle, if still tracked
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Run every spawn rule once. Returns how many entities were created.
    pub fn evaluate<R: Rng + ?Sized>(
        &mut self,
        entities: &mut Entities,
        ctx: &SessionContext,
        sizes: &SpriteSizes,
        tick: u64,
        speed: i32,
        rng: &mut R,
    ) -> usize {
        let mut spawned = 0;

        let ground_count = entities.count(|k| matches!(k, ObstacleKind::Ground { .. }));
        if ground_count < GROUND_OBSTACLE_LIMIT {
            let due = ground_count == 0
                || (self.marker_passed(entities, ctx.width * GROUND_OBSTACLE_GATE)
                    && roll(rng, GROUND_OBSTACLE_ODDS));
            if due {
                let variant = rng.random_range(0..GROUND_OBSTACLE_VARIANTS);
                let id = entities.next_id();
                self.spawn(
                    entities,
                    Obstacle::ground(id, variant, sizes.ground_obstacle, ctx, speed),
                );
                spawned += 1;
            }
        }

        let low_count = entities.count(|k| k == ObstacleKind::LowFlyer);
        if low_count == 0
            && roll(rng, LOW_FLYER_ODDS)
            && tick > LOW_FLYER_MIN_TICK
            && self.marker_passed(entities, ctx.width * FLYER_GATE)
        {
            let band = rng.random_range(0..LOW_FLYER_BANDS.len());
            let id = entities.next_id();
            self.spawn(
                entities,
                Obstacle::flyer(id, ObstacleKind::LowFlyer, band, sizes.flyer, ctx, speed),
            );
            spawned += 1;
        }

        let high_count = entities.count(|k| k == ObstacleKind::HighFlyer);
        if high_count < HIGH_FLYER_LIMIT
            && roll(rng, HIGH_FLYER_ODDS)
            && tick > HIGH_FLYER_MIN_TICK
            && self.marker_passed(entities, ctx.width * FLYER_GATE)
        {
            let band = rng.random_range(0..HIGH_FLYER_BANDS.len());
            let id = entities.next_id();
            self.spawn(
                entities,
                Obstacle::flyer(id, ObstacleKind::HighFlyer, band, sizes.flyer, ctx, speed),
            );
            spawned += 1;
        }

        if entities.clouds.len() < CLOUD_LIMIT && roll(rng, CLOUD_ODDS) {
            let top = (ctx.height / 5.0) as i32;
            let bottom = (ctx.height / 2.0) as i32;
            let y = if bottom > top {
                rng.random_range(top..bottom)
            } else {
                top
            };
            entities
                .clouds
                .push(Cloud::new(Vec2::new(ctx.width, y as f32), sizes.cloud));
            spawned += 1;
        }

        spawned
    }

    fn spawn(&mut self, entities: &mut Entities, obstacle: Obstacle) {
        log::debug!("Spawned {:?} #{}", obstacle.kind, obstacle.id);
        self.pending = Some(obstacle.id);
        entities.obstacles.push(obstacle);
    }

    /// True when the pending obstacle's right edge is left of `threshold`.
    ///
    /// A marker pointing at a removed obstacle is dropped and the gate stays shut.
    fn marker_passed(&mut self, entities: &Entities, threshold: f32) -> bool {
        let Some(id) = self.pending else {
            return false;
        };
        match entities.obstacles.iter().find(|o| o.id == id) {
            Some(marker) => marker.rect.right() < threshold,
            None => {
                log::debug!("{}; clearing marker", EngineError::InvalidSpawnState(id));
                self.pending = None;
                false
            }
        }
    }
}
