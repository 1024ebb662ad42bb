//! The runner: one primary state plus a ducking overlay
//!
//! Animation priority: Dead > Jumping > Blinking > Ducking > Running.

use glam::Vec2;

use super::rect::Rect;
use super::state::{GameEvent, SessionContext};
use crate::assets::SpriteKey;
use crate::consts::*;

/// Frame shown once the runner is dead
pub const DEAD_FRAME: usize = 4;

/// Primary runner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Idle on the title screen
    Blinking,
    /// On the ground
    Running,
    /// Airborne under gravity
    Jumping,
    /// Hit an obstacle; animation frozen
    Dead,
}

/// The player-controlled runner
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub state: PlayerState,
    /// Ducking overlay; may combine with Running or Jumping
    pub ducking: bool,
    /// Index into the standing or ducking sheet
    pub frame: usize,
    /// Ticks this runner has been updated
    pub counter: u64,
    pub score: u32,
    pub jump_impulse: f32,
    pub mighty_jump_impulse: f32,
    stand_width: f32,
    duck_width: f32,
}

impl Player {
    /// A runner standing on the ground line, ready to run
    pub fn new(ctx: &SessionContext, size: Vec2, duck_width: f32) -> Self {
        let mut rect = Rect::new(Vec2::new(ctx.width / 15.0, 0.0), size);
        rect.set_bottom(ctx.ground_line);
        Self {
            rect,
            vel: Vec2::ZERO,
            state: PlayerState::Running,
            ducking: false,
            frame: 0,
            counter: 0,
            score: 0,
            jump_impulse: JUMP_IMPULSE,
            mighty_jump_impulse: MIGHTY_JUMP_IMPULSE,
            stand_width: size.x,
            duck_width,
        }
    }

    /// A runner idling on the title screen
    pub fn blinking(ctx: &SessionContext, size: Vec2, duck_width: f32) -> Self {
        Self {
            state: PlayerState::Blinking,
            ..Self::new(ctx, size, duck_width)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != PlayerState::Dead
    }

    pub fn is_grounded(&self, ctx: &SessionContext) -> bool {
        self.state != PlayerState::Jumping && self.rect.bottom() >= ctx.ground_line
    }

    /// Jump input. Returns the event to report, if the jump happened.
    ///
    /// A blinking runner always launches (leaving the title screen); a running
    /// one only from the ground, with the stronger launch when ducking.
    pub fn jump(&mut self, ctx: &SessionContext) -> Option<GameEvent> {
        match self.state {
            PlayerState::Dead | PlayerState::Jumping => None,
            PlayerState::Blinking => {
                self.state = PlayerState::Jumping;
                self.vel.y = -self.jump_impulse;
                None
            }
            PlayerState::Running if !self.is_grounded(ctx) => None,
            PlayerState::Running => {
                self.state = PlayerState::Jumping;
                if self.ducking {
                    self.vel.y = -self.mighty_jump_impulse;
                    Some(GameEvent::MightyJumped)
                } else {
                    self.vel.y = -self.jump_impulse;
                    Some(GameEvent::Jumped)
                }
            }
        }
    }

    /// Start ducking; returns false when the runner can't duck
    pub fn start_duck(&mut self) -> bool {
        if !self.is_alive() || self.ducking {
            return false;
        }
        self.ducking = true;
        true
    }

    pub fn stop_duck(&mut self) {
        self.ducking = false;
    }

    /// Kill the runner. Returns true only on the first call.
    pub fn die(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state = PlayerState::Dead;
        self.ducking = false;
        self.frame = DEAD_FRAME;
        self.rect.set_width(self.stand_width);
        true
    }

    /// Advance one tick: gravity, animation, motion, bounds, score
    pub fn update(&mut self, ctx: &SessionContext, events: &mut Vec<GameEvent>) {
        if self.state == PlayerState::Dead {
            self.frame = DEAD_FRAME;
            return;
        }

        if self.state == PlayerState::Jumping {
            self.vel.y += ctx.gravity;
        }

        self.animate();
        let width = if self.ducking {
            self.duck_width
        } else {
            self.stand_width
        };
        self.rect.set_width(width);

        self.rect.translate(self.vel);
        self.clamp_to_ground(ctx);
        if self.rect.top() < ctx.ceiling {
            // Invisible ceiling: bounce back down, keeping one tick of gravity
            self.vel.y = -self.vel.y + ctx.gravity;
            events.push(GameEvent::CeilingHit);
        }

        if self.state != PlayerState::Blinking && self.counter % SCORE_INTERVAL == SCORE_INTERVAL - 1 {
            self.score += 1;
            if self.score % CHECKPOINT_SCORE == 0 {
                events.push(GameEvent::Checkpoint(self.score));
            }
        }

        self.counter += 1;
    }

    fn animate(&mut self) {
        let counter = self.counter;
        match self.state {
            PlayerState::Dead => self.frame = DEAD_FRAME,
            PlayerState::Jumping => self.frame = 0,
            PlayerState::Blinking => {
                if self.frame == 0 {
                    if counter % BLINK_OPEN_TICKS == BLINK_OPEN_TICKS - 1 {
                        self.frame = 1;
                    }
                } else if counter % BLINK_CLOSED_TICKS == BLINK_CLOSED_TICKS - 1 {
                    self.frame = 0;
                }
            }
            PlayerState::Running if self.ducking => {
                if counter % RUN_ANIM_PERIOD == 0 {
                    self.frame = (self.frame + 1) % 2;
                }
            }
            PlayerState::Running => {
                if counter % RUN_ANIM_PERIOD == 0 {
                    self.frame = (self.frame + 1) % 2 + 2;
                }
            }
        }
    }

    fn clamp_to_ground(&mut self, ctx: &SessionContext) {
        if self.rect.bottom() > ctx.ground_line {
            self.rect.set_bottom(ctx.ground_line);
            self.vel.y = 0.0;
            if self.state == PlayerState::Jumping {
                self.state = PlayerState::Running;
            }
        }
    }

    /// Sprite frame for the current state
    pub fn sprite_key(&self) -> SpriteKey {
        if self.ducking && self.is_alive() {
            SpriteKey::RunnerDucking(self.frame % 2)
        } else {
            SpriteKey::Runner(self.frame)
        }
    }
}
