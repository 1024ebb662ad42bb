//! The outer run loop
//!
//! One thread, one frame at a time: drain input, tick the session, react to
//! its events, draw, then sleep out the frame. Quitting ends the loop after
//! the current tick; any error ends it immediately and is handed back to the
//! caller for teardown.

use crate::assets::AssetProvider;
use crate::audio::{AudioService, SoundCue};
use crate::error::Result;
use crate::platform::{FrameClock, InputSource, to_tick_input};
use crate::renderer::{Renderer, render_session};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, SpriteSizes, TickOutcome, tick};

/// Owns the session and every collaborator it talks to
pub struct Game {
    session: GameSession,
    assets: Box<dyn AssetProvider>,
    renderer: Box<dyn Renderer>,
    input: Box<dyn InputSource>,
    audio: Box<dyn AudioService>,
    clock: Option<FrameClock>,
}

impl Game {
    pub fn new(
        settings: &Settings,
        assets: Box<dyn AssetProvider>,
        renderer: Box<dyn Renderer>,
        input: Box<dyn InputSource>,
        audio: Box<dyn AudioService>,
    ) -> Result<Self> {
        let ctx = settings.context();
        let sizes = SpriteSizes::from_assets(assets.as_ref())?;
        let seed = settings.resolve_seed();
        log::info!(
            "Game initialized with seed: {} ({}x{} @ {} fps)",
            seed,
            ctx.width,
            ctx.height,
            settings.target_fps
        );
        Ok(Self {
            session: GameSession::new(ctx, sizes, seed),
            assets,
            renderer,
            input,
            audio,
            clock: Some(FrameClock::from_fps(settings.target_fps)),
        })
    }

    /// Run frames back to back without sleeping
    pub fn unpaced(mut self) -> Self {
        self.clock = None;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// One frame: input, tick, events, render. Nothing is drawn on quit.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let events = self.input.poll()?;
        let input = to_tick_input(&events);
        let outcome = tick(&mut self.session, &input, self.assets.as_ref())?;

        for event in self.session.drain_events() {
            self.handle_event(&event);
        }
        if outcome == TickOutcome::Quit {
            return Ok(outcome);
        }

        render_session(self.renderer.as_mut(), &self.session, self.assets.as_ref())?;
        Ok(outcome)
    }

    /// Loop until quit or a fatal error
    pub fn run(&mut self) -> Result<()> {
        log::info!("Sobaka Run running!");
        loop {
            match self.step() {
                Ok(TickOutcome::Continue) => {}
                Ok(TickOutcome::Quit) => break,
                Err(e) => {
                    log::error!("Stopping: {e}");
                    return Err(e);
                }
            }
            if let Some(clock) = self.clock.as_mut() {
                clock.wait();
            }
        }
        log::info!(
            "Session over after {} runs, high score {}",
            self.session.runs,
            self.session.high_score
        );
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) {
        if let Some(cue) = SoundCue::for_event(event) {
            self.audio.play(cue);
        }
        match event {
            GameEvent::PhaseChanged(phase) => log::info!("Phase: {phase:?}"),
            GameEvent::Checkpoint(score) => log::debug!("Checkpoint {score}"),
            GameEvent::CeilingHit => log::debug!("Ceiling bounce"),
            GameEvent::NewHighScore(score) => log::info!("New high score: {score}"),
            GameEvent::RunEnded {
                score,
                ticks,
                speed,
            } => {
                log::info!(
                    "Run {} over: score {}, high score {}, {} ticks, speed {}",
                    self.session.runs,
                    score,
                    self.session.high_score,
                    ticks,
                    speed
                );
            }
            _ => {}
        }
    }
}
