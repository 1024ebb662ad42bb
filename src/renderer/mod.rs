//! Rendering module
//!
//! The simulation never draws. `render_session` walks a session in a fixed
//! order and hands every visible sprite to a `Renderer`; later draws land on
//! top of earlier ones.

pub mod scoreboard;
pub mod terminal;

pub use terminal::TerminalRenderer;

use glam::Vec2;

use crate::assets::{AssetProvider, Sprite, SpriteKey};
use crate::error::Result;
use crate::sim::{GamePhase, GameSession, Obstacle, Scroller, SessionContext};

/// A drawing surface
pub trait Renderer {
    /// Start a new frame on a blank surface
    fn begin_frame(&mut self) -> Result<()>;
    /// Blit a sprite with its top-left corner at `pos` (screen pixels)
    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2) -> Result<()>;
    /// Present the frame
    fn end_frame(&mut self) -> Result<()>;
}

/// Draw one complete frame of the session
pub fn render_session(
    renderer: &mut dyn Renderer,
    session: &GameSession,
    assets: &dyn AssetProvider,
) -> Result<()> {
    renderer.begin_frame()?;
    match session.phase {
        GamePhase::Intro => {
            draw_ground(renderer, session, assets)?;
            draw_player(renderer, session, assets)?;
        }
        GamePhase::Playing => draw_scene(renderer, session, assets)?,
        GamePhase::GameOver => {
            // Frozen last frame under the overlay
            draw_scene(renderer, session, assets)?;
            draw_game_over(renderer, &session.ctx, assets)?;
        }
    }
    renderer.end_frame()
}

/// Ground, clouds, scoreboard, obstacles, player
fn draw_scene(
    renderer: &mut dyn Renderer,
    session: &GameSession,
    assets: &dyn AssetProvider,
) -> Result<()> {
    draw_ground(renderer, session, assets)?;

    for cloud in &session.entities.clouds {
        draw_scroller(renderer, cloud, assets)?;
    }

    scoreboard::draw_scoreboard(
        renderer,
        assets,
        &session.ctx,
        session.score(),
        session.high_score,
    )?;

    // Ground obstacles, then low flyers, then high flyers
    let mut obstacles: Vec<&Obstacle> = session.entities.obstacles.iter().collect();
    obstacles.sort_by_key(|o| o.kind.draw_layer());
    for obstacle in obstacles {
        draw_scroller(renderer, obstacle, assets)?;
    }

    draw_player(renderer, session, assets)
}

fn draw_ground(
    renderer: &mut dyn Renderer,
    session: &GameSession,
    assets: &dyn AssetProvider,
) -> Result<()> {
    let sprite = assets.require(SpriteKey::Ground)?;
    for tile in &session.ground.tiles {
        renderer.draw_sprite(sprite, tile.pos)?;
    }
    Ok(())
}

fn draw_scroller(
    renderer: &mut dyn Renderer,
    entity: &dyn Scroller,
    assets: &dyn AssetProvider,
) -> Result<()> {
    let sprite = assets.require(entity.sprite_key())?;
    renderer.draw_sprite(sprite, entity.rect().pos)
}

fn draw_player(
    renderer: &mut dyn Renderer,
    session: &GameSession,
    assets: &dyn AssetProvider,
) -> Result<()> {
    let sprite = assets.require(session.player.sprite_key())?;
    renderer.draw_sprite(sprite, session.player.rect.pos)
}

/// Banner centred at 35% height, replay button below it
fn draw_game_over(
    renderer: &mut dyn Renderer,
    ctx: &SessionContext,
    assets: &dyn AssetProvider,
) -> Result<()> {
    let banner = assets.require(SpriteKey::GameOver)?;
    let size = banner.size();
    let pos = Vec2::new(
        (ctx.width / 2.0 - size.x / 2.0).floor(),
        (ctx.height * 0.35 - size.y / 2.0).floor(),
    );
    renderer.draw_sprite(banner, pos)?;

    let replay = assets.require(SpriteKey::Replay)?;
    let pos = Vec2::new(
        (ctx.width / 2.0 - replay.size().x / 2.0).floor(),
        (ctx.height * 0.52).floor(),
    );
    renderer.draw_sprite(replay, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ProceduralAssets;
    use crate::sim::{ObstacleKind, SpriteSizes};

    /// Records every call instead of drawing
    #[derive(Default)]
    struct Recorder {
        frames: usize,
        presented: usize,
        draws: Vec<(SpriteKey, Vec2)>,
    }

    impl Renderer for Recorder {
        fn begin_frame(&mut self) -> Result<()> {
            self.frames += 1;
            self.draws.clear();
            Ok(())
        }

        fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2) -> Result<()> {
            self.draws.push((sprite.key, pos));
            Ok(())
        }

        fn end_frame(&mut self) -> Result<()> {
            self.presented += 1;
            Ok(())
        }
    }

    /// Coarse draw layer of each call, in call order
    fn layer(key: SpriteKey) -> u8 {
        match key {
            SpriteKey::Ground => 0,
            SpriteKey::Cloud => 1,
            SpriteKey::Glyph(_) => 2,
            SpriteKey::GroundObstacle(_) | SpriteKey::Flyer(_) => 3,
            SpriteKey::Runner(_) | SpriteKey::RunnerDucking(_) => 4,
            SpriteKey::GameOver | SpriteKey::Replay => 5,
        }
    }

    fn busy_session() -> GameSession {
        let ctx = SessionContext::default();
        let sizes = SpriteSizes::default();
        let mut session = GameSession::new(ctx, sizes, 1);
        session.begin_playing();
        // High flyer first in spawn order, still drawn last among obstacles
        let id = session.entities.next_id();
        session.entities.obstacles.push(Obstacle::flyer(
            id,
            ObstacleKind::HighFlyer,
            0,
            sizes.flyer,
            &ctx,
            4,
        ));
        let id = session.entities.next_id();
        session
            .entities
            .obstacles
            .push(Obstacle::ground(id, 0, sizes.ground_obstacle, &ctx, 4));
        session
            .entities
            .clouds
            .push(crate::sim::Cloud::new(Vec2::new(500.0, 300.0), sizes.cloud));
        session
    }

    #[test]
    fn test_playing_draw_order() {
        let assets = ProceduralAssets::new();
        let session = busy_session();
        let mut recorder = Recorder::default();
        render_session(&mut recorder, &session, &assets).unwrap();

        let layers: Vec<u8> = recorder.draws.iter().map(|(k, _)| layer(*k)).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);

        let obstacles: Vec<SpriteKey> = recorder
            .draws
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| layer(*k) == 3)
            .collect();
        assert_eq!(obstacles, vec![SpriteKey::GroundObstacle(0), SpriteKey::Flyer(0)]);
        assert_eq!(recorder.presented, 1);
    }

    #[test]
    fn test_high_score_hidden_until_set() {
        let assets = ProceduralAssets::new();
        let mut session = busy_session();
        let mut recorder = Recorder::default();

        render_session(&mut recorder, &session, &assets).unwrap();
        let glyphs = |r: &Recorder| r.draws.iter().filter(|(k, _)| layer(*k) == 2).count();
        assert_eq!(glyphs(&recorder), 5);

        session.high_score = 250;
        render_session(&mut recorder, &session, &assets).unwrap();
        // Score, high score and the two-letter label
        assert_eq!(glyphs(&recorder), 12);
    }

    #[test]
    fn test_intro_draws_ground_and_runner_only() {
        let assets = ProceduralAssets::new();
        let session = GameSession::new(SessionContext::default(), SpriteSizes::default(), 1);
        let mut recorder = Recorder::default();
        render_session(&mut recorder, &session, &assets).unwrap();
        let keys: Vec<SpriteKey> = recorder.draws.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![SpriteKey::Ground, SpriteKey::Ground, SpriteKey::Runner(0)]);
    }

    #[test]
    fn test_game_over_overlay_on_top() {
        let assets = ProceduralAssets::new();
        let mut session = busy_session();
        session.player.die();
        session.set_phase(GamePhase::GameOver);
        let mut recorder = Recorder::default();
        render_session(&mut recorder, &session, &assets).unwrap();

        let n = recorder.draws.len();
        let (banner, banner_pos) = recorder.draws[n - 2];
        let (replay, replay_pos) = recorder.draws[n - 1];
        assert_eq!(banner, SpriteKey::GameOver);
        assert_eq!(replay, SpriteKey::Replay);
        assert_eq!(banner_pos.x, 865.0);
        assert_eq!(replay_pos.y, 561.0);
    }
}
