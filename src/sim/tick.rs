//! Fixed timestep simulation tick
//!
//! Advances the session by one frame. Input for the frame is fully drained
//! into a `TickInput` before this runs.

use super::collision::find_collisions;
use super::obstacle::Scroller;
use super::player::PlayerState;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::assets::AssetProvider;
use crate::error::Result;

/// A discrete command derived from raw input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    /// Duck key pressed (`true`) or released (`false`)
    Duck(bool),
    /// Restart from the game-over screen
    Confirm,
    /// Leave from the game-over screen
    Cancel,
    Quit,
}

/// Input commands for a single tick, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Whether the outer loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the session by one fixed timestep
pub fn tick(
    session: &mut GameSession,
    input: &TickInput,
    assets: &dyn AssetProvider,
) -> Result<TickOutcome> {
    if input.has(Action::Quit) {
        log::info!("Quit requested");
        return Ok(TickOutcome::Quit);
    }

    match session.phase {
        GamePhase::Intro => tick_intro(session, input),
        GamePhase::Playing => tick_playing(session, input, assets)?,
        GamePhase::GameOver => return Ok(tick_game_over(session, input)),
    }
    Ok(TickOutcome::Continue)
}

fn tick_intro(session: &mut GameSession, input: &TickInput) {
    let ctx = session.ctx;
    if input.has(Action::Jump) && session.player.state == PlayerState::Blinking {
        session.player.jump(&ctx);
        log::debug!("Leaving title screen");
    }

    // Title-screen jumps are silent and score nothing
    let mut discarded = Vec::new();
    session.player.update(&ctx, &mut discarded);

    if session.player.state == PlayerState::Running {
        session.begin_playing();
    }
}

fn tick_playing(
    session: &mut GameSession,
    input: &TickInput,
    assets: &dyn AssetProvider,
) -> Result<()> {
    let ctx = session.ctx;
    let mut events = Vec::new();

    // Input
    for action in &input.actions {
        match action {
            Action::Jump => events.extend(session.player.jump(&ctx)),
            Action::Duck(true) => {
                if session.player.start_duck() {
                    events.push(GameEvent::Ducked);
                }
            }
            Action::Duck(false) => session.player.stop_duck(),
            Action::Confirm | Action::Cancel | Action::Quit => {}
        }
    }

    // Movement
    session.player.update(&ctx, &mut events);
    session.ground.update();
    let speed = session.ramp.game_speed;
    for obstacle in &mut session.entities.obstacles {
        obstacle.update(speed);
    }
    for cloud in &mut session.entities.clouds {
        cloud.update(speed);
    }
    session.entities.obstacles.retain(|o| !o.is_offscreen());
    session.entities.clouds.retain(|c| !c.is_offscreen());

    // Spawning
    session.spawner.evaluate(
        &mut session.entities,
        &ctx,
        &session.sizes,
        session.tick_count,
        speed,
        &mut session.rng,
    );

    // Collision
    if session.player.is_alive() {
        let hits = find_collisions(&session.player, &session.entities.obstacles, assets)?;
        if let Some(hit) = hits.first() {
            if session.player.die() {
                log::info!(
                    "Runner hit obstacle #{} at {} (tick {})",
                    hit.obstacle_id,
                    hit.point,
                    session.tick_count
                );
                events.push(GameEvent::Died);
            }
        }
    }

    for event in events {
        session.push_event(event);
    }

    // Score / high score
    if !session.player.is_alive() {
        end_run(session);
    }

    // Difficulty
    if session.ramp.apply(session.tick_count, &mut session.ground) {
        let event = GameEvent::SpeedUp {
            game_speed: session.ramp.game_speed,
            ground_speed: session.ground.speed,
        };
        session.push_event(event);
    }

    session.tick_count += 1;
    Ok(())
}

fn end_run(session: &mut GameSession) {
    let score = session.score();
    if score > session.high_score {
        session.high_score = score;
        session.push_event(GameEvent::NewHighScore(score));
    }
    session.push_event(GameEvent::RunEnded {
        score,
        ticks: session.tick_count + 1,
        speed: session.ramp.game_speed,
    });
    session.set_phase(GamePhase::GameOver);
}

fn tick_game_over(session: &mut GameSession, input: &TickInput) -> TickOutcome {
    for action in &input.actions {
        match action {
            Action::Jump | Action::Confirm => {
                log::info!("Restarting (run {})", session.runs + 1);
                session.begin_playing();
                return TickOutcome::Continue;
            }
            Action::Cancel => {
                log::info!("Leaving from game over screen");
                return TickOutcome::Quit;
            }
            Action::Duck(_) | Action::Quit => {}
        }
    }
    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ProceduralAssets;
    use crate::consts::MIGHTY_JUMP_IMPULSE;
    use crate::sim::obstacle::{Obstacle, ObstacleKind};
    use crate::sim::state::{SessionContext, SpriteSizes};

    fn playing(seed: u64) -> GameSession {
        let mut session = GameSession::new(SessionContext::default(), SpriteSizes::default(), seed);
        session.begin_playing();
        session.drain_events();
        session
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Drop a ground obstacle right on top of the runner and tick once
    fn crash(session: &mut GameSession, assets: &ProceduralAssets) {
        let id = session.entities.next_id();
        let mut cactus = Obstacle::ground(
            id,
            0,
            session.sizes.ground_obstacle,
            &session.ctx,
            session.ramp.game_speed,
        );
        cactus.rect.set_left(session.player.rect.left() + 40.0);
        session.entities.obstacles.push(cactus);
        tick(session, &idle(), assets).unwrap();
    }

    #[test]
    fn test_intro_waits_then_starts_after_landing() {
        let assets = ProceduralAssets::new();
        let mut session = GameSession::new(SessionContext::default(), SpriteSizes::default(), 5);
        for _ in 0..10 {
            tick(&mut session, &idle(), &assets).unwrap();
        }
        assert_eq!(session.phase, GamePhase::Intro);
        assert_eq!(session.player.state, PlayerState::Blinking);

        tick(&mut session, &TickInput::new(vec![Action::Jump]), &assets).unwrap();
        assert_eq!(session.phase, GamePhase::Intro);
        assert_eq!(session.player.state, PlayerState::Jumping);

        let mut ticks = 0;
        while session.phase == GamePhase::Intro {
            tick(&mut session, &idle(), &assets).unwrap();
            ticks += 1;
            assert!(ticks < 200, "intro never ended");
        }
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.tick_count, 0);
        assert_eq!(session.score(), 0);
        assert!(session.entities.obstacles.is_empty());
    }

    #[test]
    fn test_quit_from_any_phase() {
        let assets = ProceduralAssets::new();
        let quit = TickInput::new(vec![Action::Quit]);
        let mut session = GameSession::new(SessionContext::default(), SpriteSizes::default(), 1);
        assert_eq!(tick(&mut session, &quit, &assets).unwrap(), TickOutcome::Quit);
        let mut session = playing(1);
        assert_eq!(tick(&mut session, &quit, &assets).unwrap(), TickOutcome::Quit);
        assert_eq!(session.tick_count, 0);
    }

    #[test]
    fn test_first_tick_spawns_one_ground_obstacle() {
        let assets = ProceduralAssets::new();
        let mut session = playing(3);
        tick(&mut session, &idle(), &assets).unwrap();
        let ground = session
            .entities
            .count(|k| matches!(k, ObstacleKind::Ground { .. }));
        assert_eq!(ground, 1);
    }

    #[test]
    fn test_speed_ramps_on_tick_699() {
        let assets = ProceduralAssets::new();
        let mut session = playing(11);
        for _ in 0..699 {
            session.entities.obstacles.clear();
            tick(&mut session, &idle(), &assets).unwrap();
        }
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.tick_count, 699);
        assert_eq!(session.ramp.game_speed, 4);

        session.entities.obstacles.clear();
        tick(&mut session, &idle(), &assets).unwrap();
        assert_eq!(session.ramp.game_speed, 5);
        assert_eq!(session.ground.speed, -5);
        assert!(session.drain_events().contains(&GameEvent::SpeedUp {
            game_speed: 5,
            ground_speed: -5
        }));
        // 700 ticks at one point per 7
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn test_ducking_jump_is_mighty() {
        let assets = ProceduralAssets::new();
        let mut session = playing(2);
        let input = TickInput::new(vec![Action::Duck(true), Action::Jump]);
        tick(&mut session, &input, &assets).unwrap();

        assert_eq!(session.player.state, PlayerState::Jumping);
        let expected = -MIGHTY_JUMP_IMPULSE + session.ctx.gravity;
        assert!((session.player.vel.y - expected).abs() < 1e-4);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::Ducked));
        assert!(events.contains(&GameEvent::MightyJumped));
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_collision_kills_in_same_tick() {
        let assets = ProceduralAssets::new();
        let mut session = playing(4);
        crash(&mut session, &assets);

        assert_eq!(session.player.state, PlayerState::Dead);
        assert_eq!(session.phase, GamePhase::GameOver);
        let events = session.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Died).count(), 1);
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
        // Zero never beats a zero high score
        assert_eq!(session.high_score, 0);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let assets = ProceduralAssets::new();
        let mut session = playing(4);
        crash(&mut session, &assets);
        let frozen = session.tick_count;
        for _ in 0..20 {
            assert_eq!(tick(&mut session, &idle(), &assets).unwrap(), TickOutcome::Continue);
        }
        assert_eq!(session.tick_count, frozen);

        tick(&mut session, &TickInput::new(vec![Action::Confirm]), &assets).unwrap();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.state, PlayerState::Running);
        assert_eq!(session.runs, 2);
    }

    #[test]
    fn test_cancel_on_game_over_quits() {
        let assets = ProceduralAssets::new();
        let mut session = playing(4);
        crash(&mut session, &assets);
        let outcome = tick(&mut session, &TickInput::new(vec![Action::Cancel]), &assets).unwrap();
        assert_eq!(outcome, TickOutcome::Quit);
    }

    #[test]
    fn test_high_score_only_when_strictly_greater() {
        let assets = ProceduralAssets::new();
        let mut session = playing(8);
        session.high_score = 10;
        session.player.score = 10;
        crash(&mut session, &assets);
        assert_eq!(session.high_score, 10);
        assert!(!session.drain_events().iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));

        tick(&mut session, &TickInput::new(vec![Action::Jump]), &assets).unwrap();
        session.player.score = 11;
        crash(&mut session, &assets);
        assert_eq!(session.high_score, 11);
        assert!(session.drain_events().contains(&GameEvent::NewHighScore(11)));
    }

    #[test]
    fn test_determinism() {
        let assets = ProceduralAssets::new();
        let mut a = playing(99_999);
        let mut b = playing(99_999);
        for i in 0..3000u32 {
            let input = if i % 90 == 0 {
                TickInput::new(vec![Action::Jump])
            } else {
                idle()
            };
            tick(&mut a, &input, &assets).unwrap();
            tick(&mut b, &input, &assets).unwrap();
        }
        assert_eq!(a.tick_count, b.tick_count);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.phase, b.phase);
        let ids = |s: &GameSession| s.entities.obstacles.iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}
