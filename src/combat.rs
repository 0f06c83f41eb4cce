//! Combat resolution: player swings and enemy contact damage
//!
//! Two passes per frame, both free of side effects on anything but the
//! entities they are handed:
//!
//! 1. `resolve_player_attack`: the ephemeral swing hitbox against every
//!    live enemy. Enemies that die stay in the list until the caller's
//!    end-of-frame purge, so a mid-pass death never changes which other
//!    enemies the same swing reaches.
//! 2. `resolve_enemy_contact`: per-enemy cooldown-gated touch damage
//!    with knockback, at most one tick per enemy per window.
//!
//! Kill rewards (XP, drops, camera kick) belong to the caller, driven
//! by the returned report. That keeps the resolver testable against a
//! bare enemy list.

use crate::collision::circles_overlap;
use crate::enemy::{Enemy, CONTACT_COOLDOWN, HIT_FLASH_TIME};
use crate::player::Player;

/// Extra reach added to the player/enemy radii for contact damage.
const CONTACT_PAD: f32 = 2.0;
/// Knockback speed applied to the player on a contact tick.
const CONTACT_KNOCKBACK: f32 = 220.0;

/// One swing, produced by the player on attack input and consumed by a
/// single resolver pass. Never stored.
#[derive(Debug, Clone, Copy)]
pub struct AttackHitbox {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub damage: f32,
}

/// What a swing accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackReport {
    pub hits: u32,
    pub kills: u32,
}

/// Applies one swing to every live enemy it overlaps.
///
/// Each enemy in range takes `hitbox.damage` exactly once. The hit that
/// crosses an enemy to `hp <= 0` counts one kill and latches
/// `kill_processed`; a latched enemy can never be credited again, no
/// matter how many later hitboxes land before the purge.
pub fn resolve_player_attack(hitbox: &AttackHitbox, enemies: &mut [Enemy]) -> AttackReport {
    let mut report = AttackReport::default();
    for enemy in enemies.iter_mut() {
        if !enemy.is_alive() {
            continue;
        }
        if !circles_overlap(hitbox.x, hitbox.y, hitbox.r, enemy.x, enemy.y, enemy.r) {
            continue;
        }
        let result = enemy.health.take_damage(hitbox.damage);
        enemy.hit_flash = HIT_FLASH_TIME;
        report.hits += 1;
        if result.is_fatal && !enemy.kill_processed {
            enemy.kill_processed = true;
            report.kills += 1;
        }
    }
    report
}

/// Applies contact damage from every armed enemy touching the player.
///
/// Returns true if the player took any damage this pass. An enemy that
/// just ticked re-arms its cooldown, so standing inside one enemy deals
/// damage per `CONTACT_COOLDOWN` window, never per frame.
pub fn resolve_enemy_contact(enemies: &mut [Enemy], player: &mut Player) -> bool {
    let mut took_damage = false;
    for enemy in enemies.iter_mut() {
        if !enemy.is_alive() || enemy.attack_cooldown > 0.0 {
            continue;
        }
        if !circles_overlap(
            enemy.x,
            enemy.y,
            enemy.r + CONTACT_PAD,
            player.x,
            player.y,
            player.r,
        ) {
            continue;
        }
        let dx = player.x - enemy.x;
        let dy = player.y - enemy.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = if dist > f32::EPSILON {
            (dx / dist, dy / dist)
        } else {
            // Perfectly stacked: shove somewhere deterministic
            (0.0, -1.0)
        };
        player.take_contact_damage(enemy.contact_damage, nx, ny, CONTACT_KNOCKBACK);
        enemy.attack_cooldown = CONTACT_COOLDOWN;
        took_damage = true;
    }
    took_damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::BASE_MAX_HP;

    fn swing_at(x: f32, y: f32, damage: f32) -> AttackHitbox {
        AttackHitbox {
            x,
            y,
            r: 16.0,
            damage,
        }
    }

    #[test]
    fn test_attack_hits_every_enemy_in_range_once() {
        let mut enemies = vec![
            Enemy::basic(100.0, 100.0, 1),
            Enemy::basic(110.0, 100.0, 1),
            Enemy::basic(400.0, 400.0, 1), // out of range
        ];
        let report = resolve_player_attack(&swing_at(105.0, 100.0, 3.0), &mut enemies);
        assert_eq!(report.hits, 2);
        assert_eq!(report.kills, 0);
        assert_eq!(enemies[0].health.current(), enemies[0].health.max() - 3.0);
        assert_eq!(enemies[2].health.current(), enemies[2].health.max());
        assert!(enemies[0].hit_flash > 0.0);
        assert_eq!(enemies[2].hit_flash, 0.0);
    }

    #[test]
    fn test_kill_credited_once_within_a_pass() {
        // hp 5, two overlapping hitboxes of 10 damage in the same frame:
        // the second pass sees a dead enemy and skips it entirely
        let mut enemies = vec![Enemy::basic(100.0, 100.0, 1)];
        enemies[0].health = crate::stats::Health::new(5.0);

        let first = resolve_player_attack(&swing_at(100.0, 100.0, 10.0), &mut enemies);
        let second = resolve_player_attack(&swing_at(100.0, 100.0, 10.0), &mut enemies);
        assert_eq!(first.kills, 1);
        assert_eq!(second.kills, 0);
        assert_eq!(second.hits, 0);
    }

    #[test]
    fn test_kill_latch_survives_adjacent_frames() {
        // Even if a dead enemy somehow re-entered a damage path before
        // the purge, the latch keeps the credit at one
        let mut enemies = vec![Enemy::basic(100.0, 100.0, 1)];
        enemies[0].health = crate::stats::Health::new(5.0);
        resolve_player_attack(&swing_at(100.0, 100.0, 10.0), &mut enemies);
        assert!(enemies[0].kill_processed);

        let result = enemies[0].health.take_damage(10.0);
        assert!(!result.is_fatal); // already at zero, no second crossing
    }

    #[test]
    fn test_no_removal_mid_pass() {
        // An enemy dying mid-loop must not shift later enemies out of
        // the swing: all three in range get hit in one pass
        let mut enemies = vec![
            Enemy::basic(95.0, 100.0, 1),
            Enemy::basic(100.0, 100.0, 1),
            Enemy::basic(105.0, 100.0, 1),
        ];
        for enemy in enemies.iter_mut() {
            enemy.health = crate::stats::Health::new(1.0);
        }
        let report = resolve_player_attack(&swing_at(100.0, 100.0, 10.0), &mut enemies);
        assert_eq!(report.hits, 3);
        assert_eq!(report.kills, 3);
        assert_eq!(enemies.len(), 3); // purge is the caller's job
    }

    #[test]
    fn test_contact_damage_respects_cooldown() {
        let mut player = Player::new(100.0, 100.0);
        let mut enemies = vec![Enemy::basic(105.0, 100.0, 1)];

        assert!(resolve_enemy_contact(&mut enemies, &mut player));
        let hp_after_first = player.health.current();
        assert!(hp_after_first < BASE_MAX_HP);

        // Same frame cluster: the enemy is re-armed, no further ticks
        for _ in 0..10 {
            assert!(!resolve_enemy_contact(&mut enemies, &mut player));
        }
        assert_eq!(player.health.current(), hp_after_first);
    }

    #[test]
    fn test_contact_ticks_bounded_over_time() {
        // 3 seconds adjacent to one enemy with a 0.65s cooldown:
        // at most floor(3 / 0.65) + 1 = 5 damage ticks
        let mut player = Player::new(640.0, 640.0);
        let mut enemies = vec![Enemy::basic(645.0, 640.0, 1)];
        let dt = 1.0 / 60.0;
        let mut ticks = 0;
        let mut elapsed = 0.0;
        while elapsed < 3.0 {
            // Pin positions so they stay adjacent the whole time
            enemies[0].x = player.x + 5.0;
            enemies[0].y = player.y;
            enemies[0].attack_cooldown = (enemies[0].attack_cooldown - dt).max(0.0);
            enemies[0].hit_flash = 0.0;
            if resolve_enemy_contact(&mut enemies, &mut player) {
                ticks += 1;
            }
            elapsed += dt;
        }
        assert!(ticks <= 5, "took {} ticks (expected <= 5)", ticks);
        assert!(ticks >= 4);
    }

    #[test]
    fn test_dead_enemy_deals_no_contact_damage() {
        let mut player = Player::new(100.0, 100.0);
        let mut enemies = vec![Enemy::basic(105.0, 100.0, 1)];
        enemies[0].health.take_damage(1000.0);
        assert!(!resolve_enemy_contact(&mut enemies, &mut player));
        assert_eq!(player.health.current(), BASE_MAX_HP);
    }
}
