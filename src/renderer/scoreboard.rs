//! Scoreboard digit layout

use glam::Vec2;

use super::Renderer;
use crate::assets::{AssetProvider, GLYPH_H, GLYPH_I, SpriteKey};
use crate::error::Result;
use crate::sim::SessionContext;

/// Scores are zero-padded to at least this many digits
pub const SCORE_DIGITS: usize = 5;

/// Decimal digits of `value`, most significant first, zero-padded
pub fn score_digits(value: u32) -> Vec<usize> {
    let mut digits = Vec::with_capacity(SCORE_DIGITS);
    let mut n = value;
    loop {
        digits.push((n % 10) as usize);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    while digits.len() < SCORE_DIGITS {
        digits.push(0);
    }
    digits.reverse();
    digits
}

/// Where the scoreboard pieces sit on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreboardLayout {
    pub score: Vec2,
    pub high_score: Vec2,
    pub high_label: Vec2,
}

impl ScoreboardLayout {
    pub fn new(ctx: &SessionContext) -> Self {
        let top = (ctx.height * 0.1).floor();
        Self {
            score: Vec2::new((ctx.width * 0.89).floor(), top),
            high_score: Vec2::new((ctx.width * 0.78).floor(), top),
            high_label: Vec2::new((ctx.width * 0.73).floor(), top),
        }
    }
}

/// Draw glyphs left to right starting at `origin`
fn draw_glyphs(
    renderer: &mut dyn Renderer,
    assets: &dyn AssetProvider,
    glyphs: impl IntoIterator<Item = usize>,
    origin: Vec2,
) -> Result<()> {
    let mut pos = origin;
    for glyph in glyphs {
        let sprite = assets.require(SpriteKey::Glyph(glyph))?;
        renderer.draw_sprite(sprite, pos)?;
        pos.x += sprite.size().x;
    }
    Ok(())
}

pub fn draw_number(
    renderer: &mut dyn Renderer,
    assets: &dyn AssetProvider,
    value: u32,
    origin: Vec2,
) -> Result<()> {
    draw_glyphs(renderer, assets, score_digits(value), origin)
}

/// Current score, plus the high score and its label once one exists
pub fn draw_scoreboard(
    renderer: &mut dyn Renderer,
    assets: &dyn AssetProvider,
    ctx: &SessionContext,
    score: u32,
    high_score: u32,
) -> Result<()> {
    let layout = ScoreboardLayout::new(ctx);
    draw_number(renderer, assets, score, layout.score)?;
    draw_high_score(renderer, assets, ctx, high_score)
}

/// High score with its `HI` label; nothing while it is still zero
pub fn draw_high_score(
    renderer: &mut dyn Renderer,
    assets: &dyn AssetProvider,
    ctx: &SessionContext,
    high_score: u32,
) -> Result<()> {
    if high_score == 0 {
        return Ok(());
    }
    let layout = ScoreboardLayout::new(ctx);
    draw_number(renderer, assets, high_score, layout.high_score)?;
    draw_glyphs(renderer, assets, [GLYPH_H, GLYPH_I], layout.high_label)
}
