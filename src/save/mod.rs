//! Save/Load system for Clawboi
//!
//! Persists the player record (position + progression) as versioned,
//! human-readable JSON in numbered slots. World and enemy state are
//! deliberately not saved: a restored session starts a fresh room with
//! the restored player, which is the whole contract the simulation
//! core exposes.
//!
//! - `types`: save data structures and error types
//! - `manager`: SaveManager for file operations

pub mod manager;
pub mod types;

pub use manager::SaveManager;
pub use types::*;
