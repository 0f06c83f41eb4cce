//! Collision geometry for Clawboi
//!
//! Every overlap test in the game reduces to one of two shapes:
//!
//! - `circle vs circle`: entity-vs-entity proximity (attack hitboxes,
//!   contact damage, loot collection)
//! - `circle vs AABB`: entity-vs-tile blocking, via the standard
//!   closest-point clamp test
//!
//! All functions here are pure and stateless; the movement resolver and
//! the combat resolver build on them.

/// Checks whether two circles overlap.
///
/// Uses squared distances to avoid the square root, and a strict
/// inequality so circles exactly touching do not count as overlapping.
pub fn circles_overlap(ax: f32, ay: f32, ar: f32, bx: f32, by: f32, br: f32) -> bool {
    let dx = bx - ax;
    let dy = by - ay;
    let rr = ar + br;
    dx * dx + dy * dy < rr * rr
}

/// Checks whether a circle intersects an axis-aligned rectangle.
///
/// # Algorithm
///
/// Clamp the circle center onto the rectangle to find the closest point,
/// then compare that point's distance to the circle radius. This handles
/// all cases (center inside, edge overlap, corner graze) with one test.
pub fn circle_intersects_rect(
    cx: f32,
    cy: f32,
    r: f32,
    rect_x: f32,
    rect_y: f32,
    rect_w: f32,
    rect_h: f32,
) -> bool {
    let nearest_x = cx.clamp(rect_x, rect_x + rect_w);
    let nearest_y = cy.clamp(rect_y, rect_y + rect_h);
    let dx = cx - nearest_x;
    let dy = cy - nearest_y;
    dx * dx + dy * dy < r * r
}

/// Clamps a circle center into `[r, world_w - r] x [r, world_h - r]`.
///
/// This is the final safety net after tile collision: even if generation
/// leaves a world edge open, entities cannot escape the world rectangle.
/// `min` is applied before `max` so the floor wins in degenerate worlds
/// smaller than the circle diameter.
pub fn clamp_to_world(x: f32, y: f32, r: f32, world_w: f32, world_h: f32) -> (f32, f32) {
    (x.min(world_w - r).max(r), y.min(world_h - r).max(r))
}

/// Squared distance between two points.
pub fn dist_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap_basic() {
        assert!(circles_overlap(0.0, 0.0, 10.0, 5.0, 0.0, 10.0));
        assert!(circles_overlap(5.0, 0.0, 10.0, 0.0, 0.0, 10.0)); // symmetric
    }

    #[test]
    fn test_circles_touching_do_not_overlap() {
        // Exactly touching: distance == sum of radii, strict inequality
        assert!(!circles_overlap(0.0, 0.0, 5.0, 10.0, 0.0, 5.0));
    }

    #[test]
    fn test_circles_separated() {
        assert!(!circles_overlap(0.0, 0.0, 3.0, 100.0, 100.0, 3.0));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        assert!(circle_intersects_rect(16.0, 16.0, 4.0, 0.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn test_circle_rect_edge_overlap() {
        // Circle center left of the rect, radius reaching past its edge
        assert!(circle_intersects_rect(-3.0, 16.0, 4.0, 0.0, 0.0, 32.0, 32.0));
        // Radius stopping short of the edge
        assert!(!circle_intersects_rect(-5.0, 16.0, 4.0, 0.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn test_circle_rect_corner_graze() {
        // Diagonal distance to the corner is sqrt(2)*3 ~ 4.24, so a radius
        // of 4 misses but 5 reaches
        assert!(!circle_intersects_rect(-3.0, -3.0, 4.0, 0.0, 0.0, 32.0, 32.0));
        assert!(circle_intersects_rect(-3.0, -3.0, 5.0, 0.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn test_clamp_to_world_in_range_is_noop() {
        let (x, y) = clamp_to_world(50.0, 60.0, 8.0, 640.0, 360.0);
        assert_eq!((x, y), (50.0, 60.0));
        // Idempotence: clamping a clamped value changes nothing
        let (x2, y2) = clamp_to_world(x, y, 8.0, 640.0, 360.0);
        assert_eq!((x2, y2), (x, y));
    }

    #[test]
    fn test_clamp_to_world_edges() {
        let (x, y) = clamp_to_world(-20.0, 1000.0, 8.0, 640.0, 360.0);
        assert_eq!((x, y), (8.0, 352.0));
    }

    #[test]
    fn test_clamp_to_world_degenerate_floor_wins() {
        // World narrower than the circle diameter: min first, then max,
        // so the result sits at the floor
        let (x, _) = clamp_to_world(5.0, 5.0, 8.0, 10.0, 360.0);
        assert_eq!(x, 8.0);
    }
}
