// Game module - session state machine and per-frame orchestration
//
// - types.rs: shared enums and tuning constants
// - session.rs: GameSession, the owner of all live game state

pub mod session;
pub mod types;

pub use session::GameSession;
pub use types::*;
