//! Frame clock with delta-time clamping
//!
//! The simulation advances by wall-clock time, but a raw delta is dangerous:
//! after a window drag or an OS stall the elapsed time can be hundreds of
//! milliseconds, and integrating that in one step sends entities through
//! walls. The clock therefore clamps every delta into `[0, MAX_DT]`.

use std::time::Instant;

/// Upper bound on a single frame's delta time (seconds).
///
/// 1/20 s means a stall longer than 50ms plays back as slow motion instead
/// of a physics explosion.
pub const MAX_DT: f32 = 1.0 / 20.0;

/// Delta returned by the very first tick, before any history exists.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Clamps a raw elapsed-time value into the valid delta range.
///
/// Kept as a standalone function so the edge cases (stalls, clock
/// regression) are testable without real time passing.
pub fn clamp_dt(raw: f32) -> f32 {
    raw.clamp(0.0, MAX_DT)
}

/// Produces one clamped delta-time value per frame.
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last_tick: None }
    }

    /// Returns seconds elapsed since the previous `tick()`, clamped.
    ///
    /// The first call returns `DEFAULT_DT` rather than an undefined or
    /// huge value.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.last_tick {
            Some(last) => clamp_dt(now.duration_since(last).as_secs_f32()),
            None => DEFAULT_DT,
        };
        self.last_tick = Some(now);
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
