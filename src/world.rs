//! World query surface and the tile-grid world behind it
//!
//! The simulation core never walks tiles directly; it consumes the
//! `WorldQuery` trait, which answers exactly four questions: is this
//! circle blocked, how big is the world, where does the player start,
//! and is this circle inside the room portal. `TileMap` is the concrete
//! world the binary and the tests use.
//!
//! # Design Pattern: Trait at the Seam
//!
//! Keeping the core behind `WorldQuery` means the movement resolver can
//! be tested against tiny hand-built worlds (one wall, one corridor)
//! instead of a full generated arena.

use crate::collision::circle_intersects_rect;
use rand::Rng;

/// Read-only world contract consumed by the simulation core.
pub trait WorldQuery {
    /// True if a circle at `(x, y)` with radius `r` overlaps any solid
    /// geometry. Callers must not pass non-finite coordinates.
    fn is_blocked_circle(&self, x: f32, y: f32, r: f32) -> bool;

    /// World extent in world units (pixels).
    fn world_w(&self) -> f32;
    fn world_h(&self) -> f32;

    /// Where the player starts (and respawns after a room transition).
    fn spawn_point(&self) -> (f32, f32);

    /// True if the circle overlaps the room-transition portal.
    /// Worlds without a portal keep the default.
    fn in_portal(&self, _x: f32, _y: f32, _r: f32) -> bool {
        false
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Solid,
}

/// Grid-of-tiles world: solid border, scattered pillars, a spawn point,
/// and an optional portal rectangle.
pub struct TileMap {
    /// Grid dimensions in tiles.
    pub width: usize,
    pub height: usize,
    /// Edge length of a tile in world units.
    pub tile_size: f32,
    tiles: Vec<Tile>,
    spawn: (f32, f32),
    /// Portal rectangle `(x, y, w, h)` in world units, if the room has one.
    pub portal: Option<(f32, f32, f32, f32)>,
}

impl TileMap {
    /// Creates an open arena of `width x height` tiles with a solid
    /// one-tile border and the spawn at the center.
    pub fn bordered(width: usize, height: usize, tile_size: f32) -> Self {
        let mut tiles = vec![Tile::Open; width * height];
        for x in 0..width {
            tiles[x] = Tile::Solid;
            tiles[(height - 1) * width + x] = Tile::Solid;
        }
        for y in 0..height {
            tiles[y * width] = Tile::Solid;
            tiles[y * width + width - 1] = Tile::Solid;
        }
        let spawn = (
            width as f32 * tile_size / 2.0,
            height as f32 * tile_size / 2.0,
        );
        TileMap {
            width,
            height,
            tile_size,
            tiles,
            spawn,
            portal: None,
        }
    }

    /// Builds a playable arena: bordered map, a handful of randomly
    /// placed pillars, and a portal against the top wall. The pillar
    /// layout is incidental content; only the query surface matters.
    pub fn arena(width: usize, height: usize, tile_size: f32, rng: &mut impl Rng) -> Self {
        let mut map = TileMap::bordered(width, height, tile_size);
        let pillar_count = (width * height) / 48;
        for _ in 0..pillar_count {
            let tx = rng.gen_range(2..width - 2);
            let ty = rng.gen_range(2..height - 2);
            // Keep the spawn area open
            let (sx, sy) = map.spawn;
            let cx = (tx as f32 + 0.5) * tile_size;
            let cy = (ty as f32 + 0.5) * tile_size;
            if (cx - sx).abs() < tile_size * 3.0 && (cy - sy).abs() < tile_size * 3.0 {
                continue;
            }
            map.set_tile(tx, ty, Tile::Solid);
        }
        let portal_w = tile_size * 2.0;
        map.portal = Some((
            (width as f32 * tile_size - portal_w) / 2.0,
            tile_size,
            portal_w,
            tile_size,
        ));
        map
    }

    pub fn set_tile(&mut self, tx: usize, ty: usize, tile: Tile) {
        if tx < self.width && ty < self.height {
            self.tiles[ty * self.width + tx] = tile;
        }
    }

    /// Returns the tile at grid coordinates, or `Solid` outside the grid.
    /// Out-of-bounds reads as solid so the world edge always blocks.
    pub fn tile_at(&self, tx: i32, ty: i32) -> Tile {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return Tile::Solid;
        }
        self.tiles[ty as usize * self.width + tx as usize]
    }

    pub fn set_spawn(&mut self, x: f32, y: f32) {
        self.spawn = (x, y);
    }
}

impl WorldQuery for TileMap {
    fn is_blocked_circle(&self, x: f32, y: f32, r: f32) -> bool {
        // Only tiles under the circle's AABB can intersect it
        let min_tx = ((x - r) / self.tile_size).floor() as i32;
        let max_tx = ((x + r) / self.tile_size).floor() as i32;
        let min_ty = ((y - r) / self.tile_size).floor() as i32;
        let max_ty = ((y + r) / self.tile_size).floor() as i32;

        for ty in min_ty..=max_ty {
            for tx in min_tx..=max_tx {
                if self.tile_at(tx, ty) != Tile::Solid {
                    continue;
                }
                let rect_x = tx as f32 * self.tile_size;
                let rect_y = ty as f32 * self.tile_size;
                if circle_intersects_rect(x, y, r, rect_x, rect_y, self.tile_size, self.tile_size)
                {
                    return true;
                }
            }
        }
        false
    }

    fn world_w(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    fn world_h(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    fn spawn_point(&self) -> (f32, f32) {
        self.spawn
    }

    fn in_portal(&self, x: f32, y: f32, r: f32) -> bool {
        match self.portal {
            Some((px, py, pw, ph)) => circle_intersects_rect(x, y, r, px, py, pw, ph),
            None => false,
        }
    }
}
