//! Player entity: movement, facing, abilities, and progression
//!
//! The player is a circle with a facing vector, two cooldown-gated
//! abilities (melee swing, dash), and a level/XP track. All per-frame
//! mutation happens through `update`; combat and loot systems only
//! touch the player through explicit methods (`take_contact_damage`,
//! `grant_xp`).

use crate::input_system::InputSnapshot;
use crate::movement::move_circle;
use crate::stats::Health;
use crate::world::WorldQuery;

pub const PLAYER_RADIUS: f32 = 10.0;
pub const BASE_SPEED: f32 = 150.0;
pub const BASE_MAX_HP: f32 = 20.0;

/// Seconds between melee swings.
pub const ATTACK_COOLDOWN: f32 = 0.35;
/// Reach of the swing center from the player center.
pub const ATTACK_REACH: f32 = 18.0;
/// Radius of the swing hitbox.
pub const ATTACK_RADIUS: f32 = 16.0;
pub const BASE_ATTACK_DAMAGE: f32 = 4.0;
/// Extra swing damage per level above 1.
pub const DAMAGE_PER_LEVEL: f32 = 0.5;

/// Dash multiplier applied to base speed while the dash is active.
pub const DASH_MULT: f32 = 2.5;
/// How long a dash lasts. Much shorter than the cooldown so dashes
/// can't be chained back to back.
pub const DASH_DURATION: f32 = 0.18;
pub const DASH_COOLDOWN: f32 = 0.9;

/// Input magnitude below which the facing vector is left alone.
/// Prevents facing flicker when the stick/keys settle back to zero.
const FACING_DEADZONE: f32 = 0.2;

/// First level-up threshold.
pub const XP_BASE: u32 = 20;
/// Each level-up raises max HP by this much.
pub const HP_PER_LEVEL: f32 = 3.0;
/// Each level-up heals this much.
pub const HEAL_PER_LEVEL: f32 = 5.0;

/// Knockback velocity decays to this fraction per second.
const KNOCKBACK_DAMPING: f32 = 0.0001;

pub struct Player {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub vx: f32,
    pub vy: f32,
    /// Unit vector, last non-trivial movement direction.
    pub facing: (f32, f32),
    pub health: Health,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
    pub base_speed: f32,
    attack_cooldown: f32,
    dash_cooldown: f32,
    dash_time: f32,
    /// Residual impulse from enemy contact, decays exponentially.
    knock_x: f32,
    knock_y: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            r: PLAYER_RADIUS,
            vx: 0.0,
            vy: 0.0,
            facing: (0.0, 1.0),
            health: Health::new(BASE_MAX_HP),
            level: 1,
            xp: 0,
            xp_next: XP_BASE,
            base_speed: BASE_SPEED,
            attack_cooldown: 0.0,
            dash_cooldown: 0.0,
            dash_time: 0.0,
            knock_x: 0.0,
            knock_y: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time > 0.0
    }

    /// Current movement speed: dash overrides the base while active.
    pub fn current_speed(&self) -> f32 {
        if self.is_dashing() {
            self.base_speed * DASH_MULT
        } else {
            self.base_speed
        }
    }

    /// Swing damage grows slowly with level.
    pub fn attack_damage(&self) -> f32 {
        BASE_ATTACK_DAMAGE + DAMAGE_PER_LEVEL * (self.level - 1) as f32
    }

    /// Per-frame movement and ability-timer update.
    ///
    /// Order: tick cooldowns, trigger dash, derive the velocity target
    /// (dash direction beats input while dashing), resolve against the
    /// world, decay knockback.
    pub fn update(&mut self, input: &InputSnapshot, world: &impl WorldQuery, dt: f32) {
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.dash_time = (self.dash_time - dt).max(0.0);

        let (mx, my) = input.move_vec;
        let mag = (mx * mx + my * my).sqrt();
        if mag > FACING_DEADZONE {
            self.facing = (mx / mag, my / mag);
        }

        if input.dash_pressed && self.dash_cooldown <= 0.0 {
            self.dash_time = DASH_DURATION;
            self.dash_cooldown = DASH_COOLDOWN;
        }

        let speed = self.current_speed();
        let (dir_x, dir_y) = if self.is_dashing() {
            self.facing
        } else {
            (mx, my)
        };
        self.vx = dir_x * speed + self.knock_x;
        self.vy = dir_y * speed + self.knock_y;

        let moved = move_circle(world, self.x, self.y, self.r, self.vx, self.vy, dt);
        self.x = moved.x;
        self.y = moved.y;
        self.vx = moved.vx;
        self.vy = moved.vy;

        let damping = KNOCKBACK_DAMPING.powf(dt);
        self.knock_x *= damping;
        self.knock_y *= damping;
    }

    /// Attempts to start a swing. Returns the ephemeral hitbox if the
    /// cooldown had elapsed, or `None` (attack is discrete, not
    /// continuous damage).
    pub fn try_attack(&mut self, attack_pressed: bool) -> Option<crate::combat::AttackHitbox> {
        if !attack_pressed || self.attack_cooldown > 0.0 {
            return None;
        }
        self.attack_cooldown = ATTACK_COOLDOWN;
        Some(crate::combat::AttackHitbox {
            x: self.x + self.facing.0 * ATTACK_REACH,
            y: self.y + self.facing.1 * ATTACK_REACH,
            r: ATTACK_RADIUS,
            damage: self.attack_damage(),
        })
    }

    /// Applies contact damage plus a knockback impulse along `(nx, ny)`
    /// (enemy-to-player direction, expected to be unit length).
    pub fn take_contact_damage(&mut self, amount: f32, nx: f32, ny: f32, impulse: f32) {
        self.health.take_damage(amount);
        self.knock_x += nx * impulse;
        self.knock_y += ny * impulse;
    }

    /// Grants XP, applying every level-up it pays for in one call.
    ///
    /// The `while` loop matters: a big kill streak resolved in a single
    /// frame can cross several thresholds, and each one must raise max
    /// HP, heal, and grow the next threshold before the remainder is
    /// checked again. Returns how many levels were gained.
    pub fn grant_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut levels = 0;
        while self.xp >= self.xp_next {
            self.xp -= self.xp_next;
            self.level += 1;
            levels += 1;
            self.health.set_max(self.health.max() + HP_PER_LEVEL);
            self.health.heal(HEAL_PER_LEVEL);
            self.xp_next = (self.xp_next as f32 * 1.22 + 8.0).floor() as u32;
        }
        levels
    }
}
