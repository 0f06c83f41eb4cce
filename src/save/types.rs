//! Save data structures and error types
//!
//! Serde-backed, JSON on disk. `PlayerRecord` is the only gameplay
//! payload; everything else is bookkeeping around it.

use crate::player::Player;
use crate::stats::Health;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Current save file version. Files from a newer version are refused.
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root save file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
    pub player: PlayerRecord,
}

/// Metadata about the save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub game_version: String,
    pub playtime_seconds: u64,
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
    QuickSave,
}

/// The player's persistable state: position and progression.
///
/// Cooldowns, velocity, and facing are transient and intentionally
/// absent; a restored player starts settled at the spawn point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
    pub hp: f32,
    pub hp_max: f32,
}

impl PlayerRecord {
    pub fn from_player(player: &Player) -> Self {
        PlayerRecord {
            x: player.x,
            y: player.y,
            level: player.level,
            xp: player.xp,
            xp_next: player.xp_next,
            hp: player.health.current(),
            hp_max: player.health.max(),
        }
    }

    /// Writes this record onto an existing player. Health is rebuilt
    /// so the current/max invariant cannot be violated by a hand-edited
    /// file (current is capped to max, floored at 1).
    pub fn apply_to(&self, player: &mut Player) {
        player.x = self.x;
        player.y = self.y;
        player.level = self.level.max(1);
        player.xp = self.xp;
        player.xp_next = self.xp_next.max(1);
        let mut health = Health::new(self.hp_max.max(1.0));
        let missing = health.max() - self.hp.clamp(1.0, health.max());
        health.take_damage(missing);
        player.health = health;
    }
}

/// Error types for save/load operations.
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    InvalidVersion(u32),
    CorruptedData(String),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
            SaveError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            SaveError::InvalidVersion(v) => write!(f, "Invalid save version: {}", v),
            SaveError::CorruptedData(msg) => write!(f, "Corrupted save data: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::IoError(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::SerializationError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trips_through_player() {
        let mut player = Player::new(100.0, 200.0);
        player.grant_xp(25); // level 2, some progression
        player.health.take_damage(3.0);

        let record = PlayerRecord::from_player(&player);
        let mut restored = Player::new(0.0, 0.0);
        record.apply_to(&mut restored);

        assert_eq!(restored.x, player.x);
        assert_eq!(restored.level, player.level);
        assert_eq!(restored.xp, player.xp);
        assert_eq!(restored.xp_next, player.xp_next);
        assert_eq!(restored.health.current(), player.health.current());
        assert_eq!(restored.health.max(), player.health.max());
    }

    #[test]
    fn test_apply_clamps_hand_edited_values() {
        let record = PlayerRecord {
            x: 0.0,
            y: 0.0,
            level: 0,
            xp: 0,
            xp_next: 0,
            hp: 9999.0,
            hp_max: 50.0,
        };
        let mut player = Player::new(0.0, 0.0);
        record.apply_to(&mut player);
        assert_eq!(player.level, 1);
        assert!(player.xp_next >= 1);
        assert_eq!(player.health.max(), 50.0);
        assert_eq!(player.health.current(), 50.0);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = PlayerRecord {
            x: 1.5,
            y: 2.5,
            level: 3,
            xp: 12,
            xp_next: 47,
            hp: 20.0,
            hp_max: 26.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: PlayerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, 3);
        assert_eq!(back.hp_max, 26.0);
    }
}
