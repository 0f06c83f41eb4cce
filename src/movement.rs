//! Movement resolution against the world
//!
//! The resolver is axis-separated: X is attempted and committed (or
//! rejected) before Y is considered against the committed X. Rejecting
//! one axis leaves the other free, which is what makes an entity slide
//! along a wall while holding a diagonal. The ordering admits a slight
//! asymmetry at inside corners; that behavior is deliberate and must
//! not be "fixed" into a swept test.

use crate::collision::clamp_to_world;
use crate::world::WorldQuery;

/// Result of one resolution step: the committed position and the
/// velocity with blocked components zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moved {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Moves a circle by `(vx, vy) * dt`, resolving collisions per axis and
/// hard-clamping the result into the world rectangle.
///
/// Velocity components that hit a wall come back zeroed so callers
/// (knockback decay, drift) don't keep pushing into geometry.
pub fn move_circle(
    world: &impl WorldQuery,
    x: f32,
    y: f32,
    r: f32,
    vx: f32,
    vy: f32,
    dt: f32,
) -> Moved {
    let mut out = Moved { x, y, vx, vy };

    let candidate_x = x + vx * dt;
    if world.is_blocked_circle(candidate_x, out.y, r) {
        out.vx = 0.0;
    } else {
        out.x = candidate_x;
    }

    let candidate_y = y + vy * dt;
    if world.is_blocked_circle(out.x, candidate_y, r) {
        out.vy = 0.0;
    } else {
        out.y = candidate_y;
    }

    // Safety net independent of tile collision
    let (cx, cy) = clamp_to_world(out.x, out.y, r, world.world_w(), world.world_h());
    out.x = cx;
    out.y = cy;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, TileMap};

    /// 10x10 tile arena (320x320 units) with a vertical wall at tile x=5.
    fn walled_map() -> TileMap {
        let mut map = TileMap::bordered(10, 10, 32.0);
        for ty in 1..9 {
            map.set_tile(5, ty, Tile::Solid);
        }
        map
    }

    #[test]
    fn test_free_movement_integrates_velocity() {
        let map = TileMap::bordered(10, 10, 32.0);
        let m = move_circle(&map, 100.0, 100.0, 8.0, 60.0, -30.0, 0.5);
        assert_eq!(m.x, 130.0);
        assert_eq!(m.y, 85.0);
        assert_eq!((m.vx, m.vy), (60.0, -30.0));
    }

    #[test]
    fn test_diagonal_into_wall_slides_on_free_axis() {
        let map = walled_map();
        // Just left of the wall (wall starts at x=160), moving down-right
        let m = move_circle(&map, 150.0, 100.0, 8.0, 100.0, 50.0, 0.1);
        // X candidate (160) penetrates the wall: X stays, vx zeroed
        assert_eq!(m.x, 150.0);
        assert_eq!(m.vx, 0.0);
        // Y moves by the full unclamped amount
        assert_eq!(m.y, 105.0);
        assert_eq!(m.vy, 50.0);
    }

    #[test]
    fn test_blocked_both_axes_stays_put() {
        // Bottom-right inside corner of the border: both candidates hit
        let map = TileMap::bordered(10, 10, 32.0);
        let m = move_circle(&map, 275.0, 275.0, 8.0, 80.0, 80.0, 0.2);
        assert_eq!((m.x, m.y), (275.0, 275.0));
        assert_eq!((m.vx, m.vy), (0.0, 0.0));
    }

    #[test]
    fn test_world_clamp_catches_open_edges() {
        // Bordered map, but clamp must hold even with a huge step that
        // would tunnel past the one-tile border test
        let map = TileMap::bordered(10, 10, 32.0);
        let m = move_circle(&map, 160.0, 160.0, 8.0, 100000.0, 0.0, 1.0);
        assert!(m.x <= map.world_w() - 8.0);
        assert!(m.y >= 8.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let map = walled_map();
        let m = move_circle(&map, 100.0, 100.0, 8.0, 500.0, 500.0, 0.0);
        assert_eq!((m.x, m.y), (100.0, 100.0));
    }
}
