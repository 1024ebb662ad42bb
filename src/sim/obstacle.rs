//! Scrolling hazards and background decorations

use glam::Vec2;

use super::rect::Rect;
use super::state::SessionContext;
use crate::assets::SpriteKey;
use crate::consts::{CLOUD_SPEED, FLYER_ANIM_PERIOD};

/// Centre heights (fraction of screen height) a low flyer may pick from
pub const LOW_FLYER_BANDS: [f32; 3] = [0.82, 0.75, 0.60];
/// Centre heights a high flyer may pick from
pub const HIGH_FLYER_BANDS: [f32; 3] = [0.42, 0.35, 0.20];

/// Shared protocol for everything that scrolls leftward across the screen
pub trait Scroller {
    /// Advance one tick at the given base game speed
    fn update(&mut self, base_speed: i32);
    fn rect(&self) -> Rect;
    fn sprite_key(&self) -> SpriteKey;

    /// Fully past the left edge
    fn is_offscreen(&self) -> bool {
        self.rect().right() < 0.0
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Sits on the ground line with a fixed look
    Ground { variant: usize },
    /// Flies at head height
    LowFlyer,
    /// Flies high above the runner
    HighFlyer,
}

impl ObstacleKind {
    /// Extra speed on top of the base game speed
    pub fn speed_offset(&self) -> i32 {
        match self {
            ObstacleKind::Ground { .. } => 0,
            ObstacleKind::LowFlyer => 1,
            ObstacleKind::HighFlyer => 2,
        }
    }

    pub fn is_flyer(&self) -> bool {
        !matches!(self, ObstacleKind::Ground { .. })
    }

    /// Draw order group: ground obstacles, then low flyers, then high flyers
    pub fn draw_layer(&self) -> u8 {
        self.speed_offset() as u8
    }
}

/// A live hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Horizontal velocity (negative = leftward)
    pub vel_x: f32,
    /// Wing frame for flyers
    pub frame: usize,
    counter: u64,
}

impl Obstacle {
    /// A ground obstacle entering from the right edge
    pub fn ground(id: u32, variant: usize, size: Vec2, ctx: &SessionContext, base_speed: i32) -> Self {
        let mut rect = Rect::new(Vec2::new(ctx.width + size.x, 0.0), size);
        rect.set_bottom(ctx.ground_line);
        Self::spawned(id, ObstacleKind::Ground { variant }, rect, base_speed)
    }

    /// A flyer entering from the right edge in the given height band
    pub fn flyer(
        id: u32,
        kind: ObstacleKind,
        band: usize,
        size: Vec2,
        ctx: &SessionContext,
        base_speed: i32,
    ) -> Self {
        let bands = match kind {
            ObstacleKind::HighFlyer => &HIGH_FLYER_BANDS,
            _ => &LOW_FLYER_BANDS,
        };
        let mut rect = Rect::new(Vec2::new(ctx.width + size.x, 0.0), size);
        rect.set_center_y(ctx.height * bands[band % bands.len()]);
        Self::spawned(id, kind, rect, base_speed)
    }

    fn spawned(id: u32, kind: ObstacleKind, rect: Rect, base_speed: i32) -> Self {
        let mut obstacle = Self {
            id,
            kind,
            rect,
            vel_x: 0.0,
            frame: 0,
            counter: 0,
        };
        obstacle.set_speed(base_speed);
        obstacle
    }

    pub fn set_speed(&mut self, base_speed: i32) {
        self.vel_x = -((base_speed + self.kind.speed_offset()) as f32);
    }
}

impl Scroller for Obstacle {
    fn update(&mut self, base_speed: i32) {
        self.set_speed(base_speed);
        if self.kind.is_flyer() {
            if self.counter % FLYER_ANIM_PERIOD == 0 {
                self.frame = (self.frame + 1) % 2;
            }
            self.counter += 1;
        }
        self.rect.translate(Vec2::new(self.vel_x, 0.0));
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn sprite_key(&self) -> SpriteKey {
        match self.kind {
            ObstacleKind::Ground { variant } => SpriteKey::GroundObstacle(variant),
            ObstacleKind::LowFlyer | ObstacleKind::HighFlyer => SpriteKey::Flyer(self.frame),
        }
    }
}

/// Background decoration; never collides
#[derive(Debug, Clone)]
pub struct Cloud {
    pub rect: Rect,
    pub speed: f32,
}

impl Cloud {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::new(pos, size),
            speed: CLOUD_SPEED,
        }
    }
}

impl Scroller for Cloud {
    fn update(&mut self, _base_speed: i32) {
        self.rect.translate(Vec2::new(-self.speed, 0.0));
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn sprite_key(&self) -> SpriteKey {
        SpriteKey::Cloud
    }
}
