// GameSession: owns all live game state and runs one frame at a time
//
// Ownership is deliberately flat: the session owns the world, player,
// enemy list, loot, particles, camera, and wave director, and passes
// them by reference into the resolver functions. No singletons, so
// tests spin up as many sessions as they like.

use crate::camera::Camera;
use crate::combat::{resolve_enemy_contact, resolve_player_attack};
use crate::effects::{ParticleField, ParticleKind};
use crate::enemy::Enemy;
use crate::input_system::InputSnapshot;
use crate::loot::LootField;
use crate::player::Player;
use crate::save::PlayerRecord;
use crate::spawner::WaveDirector;
use crate::world::{TileMap, WorldQuery};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::*;

pub struct GameSession {
    pub state: GameState,
    pub world: TileMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub loot: LootField,
    pub particles: ParticleField,
    pub camera: Camera,
    director: WaveDirector,
    rng: StdRng,
    /// 1-based room counter; feeds spawn difficulty.
    pub room: u32,
    pub score: u32,
    pub shards_collected: u32,
    pub kills: u32,
    pub elapsed: f32,
    /// Restored player progression applied on every (re)start.
    initial_record: Option<PlayerRecord>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic session for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let world = TileMap::arena(ARENA_TILES_W, ARENA_TILES_H, TILE_SIZE, &mut rng);
        let (sx, sy) = world.spawn_point();
        let mut camera = Camera::new(VIEW_W, VIEW_H, world.world_w(), world.world_h());
        camera.snap_to(sx, sy);
        let mut session = GameSession {
            state: GameState::Start,
            world,
            player: Player::new(sx, sy),
            enemies: Vec::new(),
            loot: LootField::new(),
            particles: ParticleField::new(),
            camera,
            director: WaveDirector::new(),
            rng,
            room: 1,
            score: 0,
            shards_collected: 0,
            kills: 0,
            elapsed: 0.0,
            initial_record: None,
        };
        session.place_shards();
        session
    }

    /// Seeds the session with a restored player record. Applied now and
    /// again on every restart.
    ///
    /// Saved coordinates come from a different arena layout, so they are
    /// kept only when they land on open ground here; otherwise the
    /// player goes to this arena's spawn point.
    pub fn restore_player(&mut self, record: PlayerRecord) {
        record.apply_to(&mut self.player);
        if self
            .world
            .is_blocked_circle(self.player.x, self.player.y, self.player.r)
        {
            let (sx, sy) = self.world.spawn_point();
            self.player.x = sx;
            self.player.y = sy;
        }
        self.initial_record = Some(record);
    }

    /// Snapshot of the current player for saving.
    pub fn player_record(&self) -> PlayerRecord {
        PlayerRecord::from_player(&self.player)
    }

    /// One frame of the coarse state machine.
    ///
    /// `Start` waits for the begin press; terminal states wait for the
    /// restart press; `Playing` simulates. The caller clears input
    /// edges after this returns.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        match self.state {
            GameState::Start => {
                if input.restart_pressed {
                    self.state = GameState::Playing;
                }
            }
            GameState::Dead | GameState::Won => {
                if input.restart_pressed {
                    self.reset();
                    self.state = GameState::Playing;
                }
            }
            GameState::Playing => self.step(dt, input),
        }
    }

    /// The per-frame pipeline, in fixed order: player movement, enemy
    /// AI, attack pass, contact pass, loot, rewards + purge, spawning,
    /// effects, camera, terminal checks.
    fn step(&mut self, dt: f32, input: &InputSnapshot) {
        self.elapsed += dt;

        self.player.update(input, &self.world, dt);

        let (px, py) = (self.player.x, self.player.y);
        for enemy in self.enemies.iter_mut() {
            enemy.update(px, py, &self.world, dt);
        }

        if let Some(hitbox) = self.player.try_attack(input.attack_pressed) {
            let report = resolve_player_attack(&hitbox, &mut self.enemies);
            if report.hits > 0 {
                let (power, duration) = if report.kills > 0 {
                    KICK_ON_KILL
                } else {
                    KICK_ON_HIT
                };
                self.camera.kick(power, duration);
            }
        }

        if resolve_enemy_contact(&mut self.enemies, &mut self.player) {
            let (power, duration) = KICK_ON_HURT;
            self.camera.kick(power, duration);
            self.particles.burst(
                self.player.x,
                self.player.y,
                6,
                ParticleKind::Spark,
                &mut self.rng,
            );
        }

        let collected = self.loot.try_collect(&self.player);
        if collected.drops > 0 {
            self.player.grant_xp(collected.drop_value);
        }
        if collected.shards > 0 {
            self.shards_collected += collected.shards;
            self.score += SCORE_PER_SHARD * collected.shards;
            self.particles.burst(
                self.player.x,
                self.player.y,
                10,
                ParticleKind::Pickup,
                &mut self.rng,
            );
        }

        self.reward_and_purge_kills();

        if self
            .director
            .update(dt, self.player.level, self.enemies.len())
        {
            let difficulty = self.difficulty();
            let mut wave = self.director.spawn_wave(
                &self.world,
                self.player.x,
                self.player.y,
                difficulty,
                self.enemies.len(),
                &mut self.rng,
            );
            self.enemies.append(&mut wave);
        }

        self.loot.update(dt);
        self.particles.update(dt);

        self.camera.update(dt, self.player.x, self.player.y);

        if input.interact_pressed
            && self
                .world
                .in_portal(self.player.x, self.player.y, self.player.r)
        {
            self.next_room();
            return;
        }

        if !self.player.is_alive() {
            let (power, duration) = KICK_ON_DEATH;
            self.camera.kick(power, duration);
            self.state = GameState::Dead;
        } else if self.shards_collected >= SHARD_GOAL {
            self.state = GameState::Won;
        }
    }

    /// Credits every enemy that died this frame (XP, drops, score,
    /// particles), then purges them. Runs after both combat passes so
    /// removal never happens mid-iteration.
    fn reward_and_purge_kills(&mut self) {
        let mut xp = 0u32;
        let mut dead: Vec<(f32, f32, u32)> = Vec::new();
        for enemy in self.enemies.iter() {
            if enemy.is_alive() {
                continue;
            }
            xp += enemy.xp_value;
            self.kills += 1;
            if enemy.is_boss {
                self.score += SCORE_PER_BOSS_KILL;
                dead.push((enemy.x, enemy.y, DROPS_PER_BOSS_KILL));
            } else {
                self.score += SCORE_PER_KILL;
                dead.push((enemy.x, enemy.y, DROPS_PER_KILL));
            }
        }
        for (x, y, drops) in dead {
            self.loot.spawn_drops(x, y, drops, &mut self.rng);
            self.particles
                .burst(x, y, 8, ParticleKind::Blood, &mut self.rng);
        }
        if xp > 0 {
            self.player.grant_xp(xp);
        }
        self.enemies.retain(|enemy| enemy.is_alive());
    }

    /// Spawn difficulty grows with rooms cleared and, slowly, level.
    fn difficulty(&self) -> u32 {
        self.room + self.player.level / 3
    }

    /// Advances to the next room: fresh arena, cleared entity lists,
    /// player back at spawn, camera snapped, new shards placed.
    fn next_room(&mut self) {
        self.room += 1;
        self.world = TileMap::arena(ARENA_TILES_W, ARENA_TILES_H, TILE_SIZE, &mut self.rng);
        let (sx, sy) = self.world.spawn_point();
        self.player.x = sx;
        self.player.y = sy;
        self.enemies.clear();
        self.loot.clear();
        self.particles.clear();
        self.director = WaveDirector::new();
        self.camera = Camera::new(VIEW_W, VIEW_H, self.world.world_w(), self.world.world_h());
        self.camera.snap_to(sx, sy);
        self.place_shards();
        println!("Entered room {}", self.room);
    }

    /// Full re-initialization for restart from a terminal state.
    fn reset(&mut self) {
        self.world = TileMap::arena(ARENA_TILES_W, ARENA_TILES_H, TILE_SIZE, &mut self.rng);
        let (sx, sy) = self.world.spawn_point();
        self.player = Player::new(sx, sy);
        if let Some(record) = &self.initial_record {
            record.apply_to(&mut self.player);
            self.player.x = sx;
            self.player.y = sy;
        }
        self.enemies.clear();
        self.loot.clear();
        self.particles.clear();
        self.director = WaveDirector::new();
        self.camera = Camera::new(VIEW_W, VIEW_H, self.world.world_w(), self.world.world_h());
        self.camera.snap_to(sx, sy);
        self.room = 1;
        self.score = 0;
        self.shards_collected = 0;
        self.kills = 0;
        self.elapsed = 0.0;
        self.place_shards();
    }

    /// Scatters this room's shards over open ground, away from spawn.
    fn place_shards(&mut self) {
        let (sx, sy) = self.world.spawn_point();
        let max_x = self.world.world_w() - TILE_SIZE * 2.0;
        let max_y = self.world.world_h() - TILE_SIZE * 2.0;
        for _ in 0..SHARDS_PER_ROOM {
            let mut x = sx;
            let mut y = sy;
            // Bounded search for an open spot a decent distance out
            for _ in 0..24 {
                let cx = self.rng.gen_range(TILE_SIZE * 2.0..max_x);
                let cy = self.rng.gen_range(TILE_SIZE * 2.0..max_y);
                let far_enough = crate::collision::dist_sq(cx, cy, sx, sy)
                    > (TILE_SIZE * 4.0) * (TILE_SIZE * 4.0);
                if far_enough && !self.world.is_blocked_circle(cx, cy, crate::loot::SHARD_RADIUS) {
                    x = cx;
                    y = cy;
                    break;
                }
            }
            self.loot.place_shard(x, y);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
