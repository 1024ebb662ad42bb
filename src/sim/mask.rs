//! Opaque-pixel silhouettes for collision
//!
//! A mask marks which pixels of a sprite frame are solid. Two sprites
//! collide only when at least one solid pixel of each lands on the same
//! screen pixel.

use glam::{IVec2, UVec2};

/// Row-major bit mask of a sprite frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Build from ASCII rows: `#` is opaque, anything else is transparent.
    /// Short rows are padded with transparent pixels.
    pub fn from_pattern(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        Self::from_fn(width, height, |x, y| {
            rows[y as usize].chars().nth(x as usize) == Some('#')
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Opaque test; out-of-bounds pixels are transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = opaque;
        }
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Nearest-neighbour resample to a new size
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        if self.width == 0 || self.height == 0 {
            return Self::new(width, height);
        }
        Self::from_fn(width, height, |x, y| {
            let sx = (x as u64 * self.width as u64 / width as u64) as i32;
            let sy = (y as u64 * self.height as u64 / height as u64) as i32;
            self.get(sx, sy)
        })
    }

    /// First pixel (in this mask's coordinates) where both masks are opaque.
    ///
    /// `offset` is the other mask's top-left corner relative to this one.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern() {
        let mask = Mask::from_pattern(&["#.", ".#", "#"]);
        assert_eq!(mask.size(), UVec2::new(2, 3));
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(1, 1));
        assert!(!mask.get(1, 2));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_overlap_single_pixel() {
        let a = Mask::from_pattern(&["...", "...", "..#"]);
        let b = Mask::from_pattern(&["#..", "...", "..."]);
        assert_eq!(a.overlap(&b, IVec2::new(2, 2)), Some(IVec2::new(2, 2)));
        assert_eq!(a.overlap(&b, IVec2::new(1, 2)), None);
    }

    #[test]
    fn test_bounding_boxes_touch_but_silhouettes_miss() {
        // Diagonal silhouettes whose boxes overlap in one corner region
        let a = Mask::from_pattern(&["#...", ".#..", "..#.", "...."]);
        let b = Mask::from_pattern(&["....", "....", "....", "...#"]);
        assert_eq!(a.overlap(&b, IVec2::new(1, 1)), None);
    }

    #[test]
    fn test_no_overlap_when_disjoint() {
        let a = Mask::filled(4, 4);
        let b = Mask::filled(4, 4);
        assert_eq!(a.overlap(&b, IVec2::new(4, 0)), None);
        assert_eq!(a.overlap(&b, IVec2::new(-4, 0)), None);
        assert!(a.overlap(&b, IVec2::new(-3, -3)).is_some());
    }

    #[test]
    fn test_scaled_preserves_shape() {
        let mask = Mask::from_pattern(&["#.", ".#"]);
        let big = mask.scaled(4, 4);
        assert!(big.get(0, 0) && big.get(1, 1));
        assert!(!big.get(2, 0) && !big.get(3, 1));
        assert!(big.get(3, 3));
        assert_eq!(big.count(), 8);
    }
}
