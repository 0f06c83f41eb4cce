//! Enemy entity: chase AI, contact-damage re-arm, kill accounting
//!
//! Enemies are circles that seek the player through the same movement
//! resolver the player uses, so they slide around pillars instead of
//! sticking to them. Two timers live here: the per-enemy contact
//! cooldown (gameplay: one damage tick per window) and the hit flash
//! (cosmetic only, read by the renderer).

use crate::movement::move_circle;
use crate::stats::Health;
use crate::world::WorldQuery;

pub const ENEMY_RADIUS: f32 = 9.0;
pub const BASE_ENEMY_HP: f32 = 8.0;
pub const BASE_ENEMY_SPEED: f32 = 55.0;
pub const BASE_CONTACT_DAMAGE: f32 = 2.0;
/// Seconds between contact-damage ticks from one enemy.
pub const CONTACT_COOLDOWN: f32 = 0.65;
/// Cosmetic flash duration after taking a hit.
pub const HIT_FLASH_TIME: f32 = 0.12;
pub const BASE_XP_VALUE: u32 = 5;

/// Boss stat multipliers relative to a same-difficulty regular enemy.
const BOSS_HP_MULT: f32 = 6.0;
const BOSS_RADIUS_MULT: f32 = 2.0;
const BOSS_DAMAGE_MULT: f32 = 2.0;
const BOSS_XP_MULT: u32 = 8;

pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub vx: f32,
    pub vy: f32,
    pub health: Health,
    pub speed: f32,
    pub contact_damage: f32,
    pub xp_value: u32,
    pub is_boss: bool,
    /// Re-arm timer for contact damage; the combat resolver resets it.
    pub attack_cooldown: f32,
    /// Cosmetic, does not affect gameplay.
    pub hit_flash: f32,
    /// Latch: set when this enemy's death has been credited, so
    /// overlapping hits across frames can never double-count a kill.
    pub kill_processed: bool,
}

impl Enemy {
    /// A regular enemy scaled by difficulty level (1-based).
    pub fn basic(x: f32, y: f32, difficulty: u32) -> Self {
        let scale = 1.0 + 0.15 * (difficulty.saturating_sub(1)) as f32;
        Enemy {
            x,
            y,
            r: ENEMY_RADIUS,
            vx: 0.0,
            vy: 0.0,
            health: Health::new(BASE_ENEMY_HP * scale),
            speed: BASE_ENEMY_SPEED * (1.0 + 0.05 * (difficulty.saturating_sub(1)) as f32),
            contact_damage: BASE_CONTACT_DAMAGE * scale,
            xp_value: BASE_XP_VALUE + difficulty,
            is_boss: false,
            attack_cooldown: 0.0,
            hit_flash: 0.0,
            kill_processed: false,
        }
    }

    /// A boss: same scaling curve, multiplied up, larger radius.
    pub fn boss(x: f32, y: f32, difficulty: u32) -> Self {
        let mut enemy = Enemy::basic(x, y, difficulty);
        enemy.r = ENEMY_RADIUS * BOSS_RADIUS_MULT;
        enemy.health = Health::new(enemy.health.max() * BOSS_HP_MULT);
        enemy.contact_damage *= BOSS_DAMAGE_MULT;
        enemy.xp_value *= BOSS_XP_MULT;
        enemy.is_boss = true;
        enemy
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Chase step toward `(target_x, target_y)` plus timer ticks.
    ///
    /// Dead enemies stop moving but are not removed here; removal is
    /// the session's end-of-frame pass.
    pub fn update(&mut self, target_x: f32, target_y: f32, world: &impl WorldQuery, dt: f32) {
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
        if !self.is_alive() {
            self.vx = 0.0;
            self.vy = 0.0;
            return;
        }

        let dx = target_x - self.x;
        let dy = target_y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > f32::EPSILON {
            self.vx = dx / dist * self.speed;
            self.vy = dy / dist * self.speed;
        }

        let moved = move_circle(world, self.x, self.y, self.r, self.vx, self.vy, dt);
        self.x = moved.x;
        self.y = moved.y;
        self.vx = moved.vx;
        self.vy = moved.vy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileMap;

    #[test]
    fn test_chase_moves_toward_target() {
        let map = TileMap::bordered(20, 20, 32.0);
        let mut enemy = Enemy::basic(100.0, 100.0, 1);
        enemy.update(300.0, 100.0, &map, 0.1);
        assert!(enemy.x > 100.0);
        assert_eq!(enemy.y, 100.0);
    }

    #[test]
    fn test_dead_enemy_stops() {
        let map = TileMap::bordered(20, 20, 32.0);
        let mut enemy = Enemy::basic(100.0, 100.0, 1);
        enemy.health.take_damage(1000.0);
        enemy.update(300.0, 100.0, &map, 0.1);
        assert_eq!((enemy.x, enemy.y), (100.0, 100.0));
    }

    #[test]
    fn test_difficulty_scales_stats() {
        let low = Enemy::basic(0.0, 0.0, 1);
        let high = Enemy::basic(0.0, 0.0, 5);
        assert!(high.health.max() > low.health.max());
        assert!(high.speed > low.speed);
        assert!(high.contact_damage > low.contact_damage);
        assert!(high.xp_value > low.xp_value);
    }

    #[test]
    fn test_boss_outclasses_basic() {
        let basic = Enemy::basic(0.0, 0.0, 3);
        let boss = Enemy::boss(0.0, 0.0, 3);
        assert!(boss.is_boss);
        assert!(boss.r > basic.r);
        assert!(boss.health.max() > basic.health.max());
        assert!(boss.xp_value > basic.xp_value);
    }

    #[test]
    fn test_timers_tick_down() {
        let map = TileMap::bordered(20, 20, 32.0);
        let mut enemy = Enemy::basic(100.0, 100.0, 1);
        enemy.attack_cooldown = 0.5;
        enemy.hit_flash = 0.1;
        enemy.update(100.0, 100.0, &map, 0.2);
        assert!((enemy.attack_cooldown - 0.3).abs() < 1e-5);
        assert_eq!(enemy.hit_flash, 0.0);
    }
}
