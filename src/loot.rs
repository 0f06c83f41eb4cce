//! Drops and pickups: spawn, age out, collect by proximity
//!
//! Two entity-lite kinds share this module. Drops fall from kills,
//! carry XP value, and expire after a lifetime. Pickups (shards) are
//! placed by the world at room start and never expire; collecting the
//! shard goal wins the run. Both are purged by filter at the end of an
//! update, never spliced mid-iteration.

use crate::collision::dist_sq;
use crate::player::Player;
use rand::Rng;

pub const DROP_RADIUS: f32 = 5.0;
/// Seconds before an uncollected drop expires.
pub const DROP_LIFETIME: f32 = 7.0;
pub const DROP_XP_VALUE: u32 = 2;
pub const SHARD_RADIUS: f32 = 7.0;
/// Extra reach added to the radii sum for collection.
const COLLECT_PAD: f32 = 8.0;
/// Kills scatter their drops within this distance of the corpse.
const DROP_SCATTER: f32 = 14.0;

/// An expiring kill reward.
pub struct Drop {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub value: u32,
    pub lifetime: f32,
}

/// A persistent objective shard. No lifetime.
pub struct Pickup {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

/// What one collection pass gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectReport {
    pub drops: u32,
    pub drop_value: u32,
    pub shards: u32,
}

/// Owns every drop and pickup alive in the current room.
#[derive(Default)]
pub struct LootField {
    pub drops: Vec<Drop>,
    pub pickups: Vec<Pickup>,
}

impl LootField {
    pub fn new() -> Self {
        LootField {
            drops: Vec::new(),
            pickups: Vec::new(),
        }
    }

    /// Scatters `count` drops around a kill position.
    pub fn spawn_drops(&mut self, x: f32, y: f32, count: u32, rng: &mut impl Rng) {
        for _ in 0..count {
            self.drops.push(Drop {
                x: x + rng.gen_range(-DROP_SCATTER..DROP_SCATTER),
                y: y + rng.gen_range(-DROP_SCATTER..DROP_SCATTER),
                r: DROP_RADIUS,
                value: DROP_XP_VALUE,
                lifetime: DROP_LIFETIME,
            });
        }
    }

    pub fn place_shard(&mut self, x: f32, y: f32) {
        self.pickups.push(Pickup {
            x,
            y,
            r: SHARD_RADIUS,
        });
    }

    /// Ages drops and purges the expired ones (filter, not splice).
    pub fn update(&mut self, dt: f32) {
        for drop in self.drops.iter_mut() {
            drop.lifetime -= dt;
        }
        self.drops.retain(|drop| drop.lifetime > 0.0);
    }

    /// Collects everything within reach of the player in one pass.
    /// Multiple same-frame collections all count.
    pub fn try_collect(&mut self, player: &Player) -> CollectReport {
        let mut report = CollectReport::default();

        self.drops.retain(|drop| {
            let reach = player.r + drop.r + COLLECT_PAD;
            if dist_sq(player.x, player.y, drop.x, drop.y) <= reach * reach {
                report.drops += 1;
                report.drop_value += drop.value;
                false
            } else {
                true
            }
        });

        self.pickups.retain(|pickup| {
            let reach = player.r + pickup.r + COLLECT_PAD;
            if dist_sq(player.x, player.y, pickup.x, pickup.y) <= reach * reach {
                report.shards += 1;
                false
            } else {
                true
            }
        });

        report
    }

    /// Drops everything, keeping allocations. Room transitions clear
    /// drops but re-place shards explicitly.
    pub fn clear(&mut self) {
        self.drops.clear();
        self.pickups.clear();
    }
}
