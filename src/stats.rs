//! Health tracking shared by the player and enemies
//!
//! Health is a newtype over current/max so the invariants live in one
//! place: damage floors at zero, healing caps at max, and max can only
//! grow through explicit calls (level-ups, boss scaling). Nothing else
//! in the game mutates hit points directly.

/// A character's hit points.
#[derive(Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Creates a new `Health` at full.
    pub fn new(max: f32) -> Self {
        Health { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Health as a 0.0-1.0 fraction, for HUD bars.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Applies damage, floored at zero.
    ///
    /// Returns a `DamageResult` so callers can distinguish a fatal hit
    /// from an already-dead target without re-reading state.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        DamageResult {
            damage_dealt: before - self.current,
            is_fatal: before > 0.0 && self.current <= 0.0,
        }
    }

    /// Heals up to max; returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - before
    }

    /// Raises (or lowers) max health. Current health is capped to the
    /// new max but never raised by this call.
    pub fn set_max(&mut self, new_max: f32) {
        self.max = new_max;
        if self.current > self.max {
            self.current = self.max;
        }
    }
}

/// Outcome of a single `take_damage` call.
#[derive(Debug, Clone)]
pub struct DamageResult {
    /// Damage actually applied (less than requested if the target had
    /// fewer hit points remaining).
    pub damage_dealt: f32,
    /// True only for the hit that crossed from alive to dead.
    pub is_fatal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_reduces_current() {
        let mut hp = Health::new(100.0);
        let result = hp.take_damage(30.0);
        assert_eq!(hp.current(), 70.0);
        assert_eq!(result.damage_dealt, 30.0);
        assert!(!result.is_fatal);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut hp = Health::new(50.0);
        let result = hp.take_damage(80.0);
        assert_eq!(hp.current(), 0.0);
        assert_eq!(result.damage_dealt, 50.0);
        assert!(result.is_fatal);
    }

    #[test]
    fn test_fatal_only_on_the_crossing_hit() {
        let mut hp = Health::new(10.0);
        assert!(hp.take_damage(10.0).is_fatal);
        // Already dead: further damage is not fatal again
        assert!(!hp.take_damage(10.0).is_fatal);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut hp = Health::new(100.0);
        hp.take_damage(40.0);
        assert_eq!(hp.heal(100.0), 40.0);
        assert_eq!(hp.current(), 100.0);
    }

    #[test]
    fn test_set_max_grows_without_healing() {
        let mut hp = Health::new(100.0);
        hp.take_damage(50.0);
        hp.set_max(120.0);
        assert_eq!(hp.max(), 120.0);
        assert_eq!(hp.current(), 50.0);
    }

    #[test]
    fn test_set_max_caps_current() {
        let mut hp = Health::new(100.0);
        hp.set_max(30.0);
        assert_eq!(hp.current(), 30.0);
    }

    #[test]
    fn test_fraction() {
        let mut hp = Health::new(100.0);
        hp.take_damage(25.0);
        assert_eq!(hp.fraction(), 0.75);
    }
}
