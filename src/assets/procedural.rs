//! Procedurally built sprites - no image files needed!
//!
//! Every frame is drawn as a small ASCII silhouette and scaled up to the
//! on-screen size the game expects.

use std::collections::HashMap;

use super::{
    AssetProvider, FLYER_FRAMES, GLYPH_COUNT, GROUND_OBSTACLE_VARIANTS, RUNNER_DUCKING_FRAMES,
    RUNNER_FRAMES, Sprite, SpriteKey,
};
use crate::sim::Mask;

/// On-screen frame sizes in pixels
pub const RUNNER_SIZE: (u32, u32) = (154, 109);
pub const GROUND_OBSTACLE_SIZE: (u32, u32) = (88, 93);
pub const FLYER_SIZE: (u32, u32) = (128, 110);
pub const CLOUD_SIZE: (u32, u32) = (64, 30);
pub const GROUND_TILE_SIZE: (u32, u32) = (2400, 24);
pub const GLYPH_SIZE: (u32, u32) = (11, 13);
pub const GAME_OVER_SIZE: (u32, u32) = (190, 11);
pub const REPLAY_SIZE: (u32, u32) = (35, 31);

const RUNNER: [[&str; 11]; RUNNER_FRAMES] = [
    // 0: eyes open
    [
        "..........#####.",
        ".........#######",
        ".........##.####",
        ".........#######",
        "##.......####...",
        ".##....######...",
        "..###########...",
        "..##########....",
        "..##########....",
        "..##......##....",
        "..##......##....",
    ],
    // 1: blink
    [
        "..........#####.",
        ".........#######",
        ".........#######",
        ".........#######",
        "##.......####...",
        ".##....######...",
        "..###########...",
        "..##########....",
        "..##########....",
        "..##......##....",
        "..##......##....",
    ],
    // 2: stride
    [
        "..........#####.",
        ".........#######",
        ".........##.####",
        ".........#######",
        "##.......####...",
        ".##....######...",
        "..###########...",
        "..##########....",
        "..##########....",
        ".##........##...",
        "##..........##..",
    ],
    // 3: gather
    [
        "..........#####.",
        ".........#######",
        ".........##.####",
        ".........#######",
        "##.......####...",
        ".##....######...",
        "..###########...",
        "..##########....",
        "..##########....",
        "...##.....##....",
        "...##.....##....",
    ],
    // 4: dead
    [
        "..........#####.",
        ".........#######",
        ".........#.#.###",
        ".........##.####",
        "##.......#.#.#..",
        ".##....######...",
        "..###########...",
        "..##########....",
        "..##########....",
        "..##......##....",
        "..##......##....",
    ],
];

const RUNNER_DUCKING: [[&str; 11]; RUNNER_DUCKING_FRAMES] = [
    [
        "................",
        "................",
        "................",
        "................",
        "................",
        "............####",
        "#...........##.#",
        ".###############",
        "..#############.",
        "..##.......##...",
        "..##.......##...",
    ],
    [
        "................",
        "................",
        "................",
        "................",
        "................",
        "............####",
        "#...........##.#",
        ".###############",
        "..#############.",
        ".##.........##..",
        "##...........##.",
    ],
];

const GROUND_OBSTACLE: [[&str; 9]; GROUND_OBSTACLE_VARIANTS] = [
    [
        "...##...",
        "...##...",
        "#..##..#",
        "#..##..#",
        "########",
        "...##...",
        "...##...",
        "...##...",
        "...##...",
    ],
    [
        "..##....",
        "..##..#.",
        "#.##..#.",
        "#.######",
        "####.##.",
        "..##.##.",
        "..##....",
        "..##....",
        "..##....",
    ],
];

const FLYER: [[&str; 10]; FLYER_FRAMES] = [
    // wings up
    [
        "....##......",
        "....###.....",
        "....####....",
        "..######....",
        "###########.",
        "..#########.",
        "......####..",
        "............",
        "............",
        "............",
    ],
    // wings down
    [
        "............",
        "............",
        "............",
        "..######....",
        "###########.",
        "..#########.",
        "....####....",
        "....###.....",
        "....##......",
        "............",
    ],
];

const CLOUD: [&str; 5] = [
    "...####...",
    "..######..",
    ".########.",
    "##########",
    "..........",
];

/// 3x5 bitmap font rows for the glyphs the HUD and banners use
fn font_rows(c: char) -> [&'static str; 5] {
    match c {
        '0' | 'O' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", "###", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", "..#", "..#", "..#"],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        'H' => ["#.#", "#.#", "###", "#.#", "#.#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'G' => ["###", "#..", "#.#", "#.#", "###"],
        'A' => ["###", "#.#", "###", "#.#", "#.#"],
        'M' => ["#.#", "###", "###", "#.#", "#.#"],
        'E' => ["###", "#..", "##.", "#..", "###"],
        'V' => ["#.#", "#.#", "#.#", "#.#", ".#."],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        _ => ["...", "...", "...", "...", "..."],
    }
}

/// Lay text out in the 3x5 font with one blank column after each glyph
fn text_pattern(text: &str) -> Vec<String> {
    (0..5)
        .map(|row| {
            text.chars()
                .map(|c| format!("{}.", font_rows(c)[row]))
                .collect::<String>()
        })
        .collect()
}

fn scaled(rows: &[&str], size: (u32, u32)) -> Mask {
    Mask::from_pattern(rows).scaled(size.0, size.1)
}

fn ground_tile() -> Mask {
    let (w, h) = GROUND_TILE_SIZE;
    Mask::from_fn(w, h, |x, y| {
        if y < 2 {
            return true;
        }
        // Sparse pebbles under the horizon line
        let hash = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 97;
        y > 5 && hash == 0
    })
}

fn replay_button() -> Mask {
    let (w, h) = REPLAY_SIZE;
    let center = glam::Vec2::new(w as f32 / 2.0, h as f32 / 2.0);
    Mask::from_fn(w, h, |x, y| {
        let p = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
        let r = p.length();
        // Ring with a notch at the top-right where the arrow head sits
        let ring = (9.0..14.0).contains(&r) && !(p.x > 0.0 && p.y < 0.0 && p.x < 6.0);
        let arrow_head = p.y < 0.0 && p.y > -14.0 && p.x >= 0.0 && p.x < 6.0 && (-p.y - 9.0).abs() < 6.0 - p.x;
        ring || arrow_head
    })
}

/// In-memory sprite set built at startup
pub struct ProceduralAssets {
    sprites: HashMap<SpriteKey, Sprite>,
}

impl Default for ProceduralAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl ProceduralAssets {
    pub fn new() -> Self {
        let mut sprites = HashMap::new();
        let mut insert = |key: SpriteKey, mask: Mask| {
            sprites.insert(key, Sprite::new(key, mask));
        };

        for (i, rows) in RUNNER.iter().enumerate() {
            insert(SpriteKey::Runner(i), scaled(rows, RUNNER_SIZE));
        }
        for (i, rows) in RUNNER_DUCKING.iter().enumerate() {
            insert(SpriteKey::RunnerDucking(i), scaled(rows, RUNNER_SIZE));
        }
        for (i, rows) in GROUND_OBSTACLE.iter().enumerate() {
            insert(SpriteKey::GroundObstacle(i), scaled(rows, GROUND_OBSTACLE_SIZE));
        }
        for (i, rows) in FLYER.iter().enumerate() {
            insert(SpriteKey::Flyer(i), scaled(rows, FLYER_SIZE));
        }
        insert(SpriteKey::Cloud, scaled(&CLOUD, CLOUD_SIZE));
        insert(SpriteKey::Ground, ground_tile());

        let glyphs = "0123456789HI";
        for (i, c) in glyphs.chars().enumerate().take(GLYPH_COUNT) {
            let rows = text_pattern(&c.to_string());
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            insert(SpriteKey::Glyph(i), scaled(&rows, GLYPH_SIZE));
        }

        let banner = text_pattern("GAME OVER");
        let banner: Vec<&str> = banner.iter().map(String::as_str).collect();
        insert(SpriteKey::GameOver, scaled(&banner, GAME_OVER_SIZE));
        insert(SpriteKey::Replay, replay_button());

        log::debug!("Built {} procedural sprites", sprites.len());
        Self { sprites }
    }
}

impl AssetProvider for ProceduralAssets {
    fn sprite(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(&key)
    }
}
