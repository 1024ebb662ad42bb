//! Screen-space rectangles
//!
//! Positions are stored as floats so sub-pixel motion accumulates; collision
//! snaps the top-left corner to whole pixels.

use glam::{IVec2, Vec2};

/// Axis-aligned rectangle, `pos` is the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom - self.size.y;
    }

    pub fn set_center_y(&mut self, center_y: f32) {
        self.pos.y = center_y - self.size.y / 2.0;
    }

    /// Change the width, keeping the left edge
    pub fn set_width(&mut self, width: f32) {
        self.size.x = width;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Top-left corner snapped to the pixel grid
    pub fn pixel_origin(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }
}
