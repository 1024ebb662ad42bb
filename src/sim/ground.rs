//! Two ground tiles leapfrogging each other for endless scroll

use glam::Vec2;

use super::rect::Rect;
use super::state::SessionContext;
use crate::consts::GROUND_TILE_MARGIN;

#[derive(Debug, Clone)]
pub struct ScrollingGround {
    pub tiles: [Rect; 2],
    /// Horizontal step per tick (negative = leftward)
    pub speed: i32,
}

impl ScrollingGround {
    pub fn new(ctx: &SessionContext, tile_size: Vec2, speed: i32) -> Self {
        let mut first = Rect::new(Vec2::ZERO, tile_size);
        first.set_bottom(ctx.height - GROUND_TILE_MARGIN);
        let mut second = first;
        second.set_left(first.right());
        Self {
            tiles: [first, second],
            speed,
        }
    }

    pub fn update(&mut self) {
        let step = Vec2::new(self.speed as f32, 0.0);
        self.tiles[0].translate(step);
        self.tiles[1].translate(step);

        if self.tiles[0].right() < 0.0 {
            let left = self.tiles[1].right();
            self.tiles[0].set_left(left);
        }
        if self.tiles[1].right() < 0.0 {
            let left = self.tiles[0].right();
            self.tiles[1].set_left(left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_start_adjacent() {
        let ctx = SessionContext::default();
        let ground = ScrollingGround::new(&ctx, Vec2::new(2400.0, 24.0), -4);
        assert_eq!(ground.tiles[1].left(), ground.tiles[0].right());
        assert_eq!(ground.tiles[0].bottom(), ctx.height - 10.0);
    }

    #[test]
    fn test_tiles_recycle_and_stay_adjacent() {
        let ctx = SessionContext::default();
        let mut ground = ScrollingGround::new(&ctx, Vec2::new(100.0, 24.0), -7);
        for _ in 0..1000 {
            ground.update();
            let [a, b] = ground.tiles;
            let adjacent = a.left() == b.right() || b.left() == a.right();
            assert!(adjacent, "tiles drifted apart: {a:?} {b:?}");
            // One tile always covers the left edge region
            assert!(a.left().min(b.left()) <= 0.0);
            assert!(a.right().max(b.right()) >= 100.0);
        }
    }
}
