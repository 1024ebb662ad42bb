//! Mask-accurate collision between the runner and obstacles
//!
//! Bounding boxes are only a broad phase; a hit needs at least one opaque
//! pixel of each silhouette on the same screen pixel.

use glam::IVec2;

use super::mask::Mask;
use super::obstacle::{Obstacle, Scroller};
use super::player::Player;
use super::rect::Rect;
use crate::assets::AssetProvider;
use crate::error::Result;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionResult {
    /// Obstacle that was hit
    pub obstacle_id: u32,
    /// First overlapping pixel in screen space
    pub point: IVec2,
}

/// Overlap test between two placed masks. Returns the first shared opaque
/// pixel in screen space.
pub fn mask_collision(a: &Mask, a_rect: &Rect, b: &Mask, b_rect: &Rect) -> Option<IVec2> {
    let a_origin = a_rect.pixel_origin();
    let b_origin = b_rect.pixel_origin();

    // Broad phase on the mask extents
    let a_max = a_origin + a.size().as_ivec2();
    let b_max = b_origin + b.size().as_ivec2();
    if a_origin.x >= b_max.x || b_origin.x >= a_max.x || a_origin.y >= b_max.y || b_origin.y >= a_max.y {
        return None;
    }

    a.overlap(b, b_origin - a_origin).map(|p| p + a_origin)
}

/// Test the runner's current frame against every live obstacle
pub fn find_collisions(
    player: &Player,
    obstacles: &[Obstacle],
    assets: &dyn AssetProvider,
) -> Result<Vec<CollisionResult>> {
    let player_mask = &assets.require(player.sprite_key())?.mask;
    let mut hits = Vec::new();
    for obstacle in obstacles {
        let mask = &assets.require(obstacle.sprite_key())?.mask;
        if let Some(point) = mask_collision(player_mask, &player.rect, mask, &obstacle.rect) {
            hits.push(CollisionResult {
                obstacle_id: obstacle.id,
                point,
            });
        }
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ProceduralAssets;
    use crate::sim::obstacle::ObstacleKind;
    use crate::sim::state::{SessionContext, SpriteSizes};
    use glam::Vec2;

    fn scene() -> (SessionContext, SpriteSizes, ProceduralAssets) {
        (SessionContext::default(), SpriteSizes::default(), ProceduralAssets::new())
    }

    #[test]
    fn test_mask_collision_offsets() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(5, 5);
        let a_rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::splat(10.0));
        let touching = Rect::new(Vec2::new(109.0, 109.0), Vec2::splat(5.0));
        let apart = Rect::new(Vec2::new(110.0, 100.0), Vec2::splat(5.0));
        assert_eq!(mask_collision(&a, &a_rect, &b, &touching), Some(IVec2::new(109, 109)));
        assert_eq!(mask_collision(&a, &a_rect, &b, &apart), None);
    }

    #[test]
    fn test_ground_obstacle_hits_running_player() {
        let (ctx, sizes, assets) = scene();
        let player = Player::new(&ctx, sizes.runner, sizes.duck_width);
        let mut cactus = Obstacle::ground(1, 0, sizes.ground_obstacle, &ctx, 4);
        cactus.rect.set_left(player.rect.left() + 40.0);

        let hits = find_collisions(&player, &[cactus], &assets).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].obstacle_id, 1);
    }

    #[test]
    fn test_jump_clears_ground_obstacle() {
        let (ctx, sizes, assets) = scene();
        let mut player = Player::new(&ctx, sizes.runner, sizes.duck_width);
        player.rect.pos.y -= 200.0;
        let mut cactus = Obstacle::ground(1, 0, sizes.ground_obstacle, &ctx, 4);
        cactus.rect.set_left(player.rect.left() + 40.0);

        assert!(find_collisions(&player, &[cactus], &assets).unwrap().is_empty());
    }

    #[test]
    fn test_box_overlap_without_pixel_overlap_is_a_miss() {
        let (ctx, sizes, assets) = scene();
        let player = Player::new(&ctx, sizes.runner, sizes.duck_width);
        // Flyer box overlaps the top-left corner of the runner box, where the
        // runner frame is transparent and the flyer's bottom rows are empty.
        let mut flyer = Obstacle::flyer(1, ObstacleKind::LowFlyer, 0, sizes.flyer, &ctx, 4);
        flyer.rect.pos = player.rect.pos - Vec2::new(sizes.flyer.x - 20.0, sizes.flyer.y - 20.0);

        let player_box = player.rect;
        let flyer_box = flyer.rect;
        assert!(flyer_box.right() > player_box.left() && flyer_box.bottom() > player_box.top());
        assert!(find_collisions(&player, &[flyer], &assets).unwrap().is_empty());
    }

    #[test]
    fn test_ducking_passes_under_low_flyer() {
        let (ctx, sizes, assets) = scene();
        let mut player = Player::new(&ctx, sizes.runner, sizes.duck_width);
        let mut flyer = Obstacle::flyer(1, ObstacleKind::LowFlyer, 0, sizes.flyer, &ctx, 4);
        // Head height: flyer's lowest opaque rows level with the runner's head
        flyer.rect.pos = Vec2::new(player.rect.left() + 60.0, player.rect.top() - 40.0);

        assert!(!find_collisions(&player, &[flyer.clone()], &assets).unwrap().is_empty());
        player.start_duck();
        assert!(find_collisions(&player, &[flyer], &assets).unwrap().is_empty());
    }
}
