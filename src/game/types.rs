// Shared enums and session tuning constants

/// Coarse session state.
///
/// `Dead` and `Won` are terminal except for an explicit restart press;
/// `Start` accepts only the begin input and runs no simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Start,
    Playing,
    Dead,
    Won,
}

/// View size in world units (the window scales this up).
pub const VIEW_W: f32 = 640.0;
pub const VIEW_H: f32 = 360.0;

/// Arena dimensions in tiles.
pub const ARENA_TILES_W: usize = 40;
pub const ARENA_TILES_H: usize = 30;
pub const TILE_SIZE: f32 = 32.0;

/// Shards placed per room and the total needed to win.
pub const SHARDS_PER_ROOM: u32 = 3;
pub const SHARD_GOAL: u32 = 9;

/// Drops per regular kill; bosses drop more.
pub const DROPS_PER_KILL: u32 = 2;
pub const DROPS_PER_BOSS_KILL: u32 = 8;

/// Score values.
pub const SCORE_PER_KILL: u32 = 10;
pub const SCORE_PER_BOSS_KILL: u32 = 100;
pub const SCORE_PER_SHARD: u32 = 50;

/// Camera kick tuning.
pub const KICK_ON_HIT: (f32, f32) = (2.0, 0.12);
pub const KICK_ON_KILL: (f32, f32) = (4.0, 0.2);
pub const KICK_ON_HURT: (f32, f32) = (6.0, 0.25);
pub const KICK_ON_DEATH: (f32, f32) = (12.0, 0.6);
