//! Shape-based rendering for the arena, entities, and HUD
//!
//! Everything is drawn with SDL2 rects and filled-circle spans, no
//! textures. World-space positions are translated by the camera's
//! render offset (which includes shake jitter) before drawing.
//!
//! # Architecture
//!
//! The renderer owns no game state. Each frame `render_frame` reads the
//! session and issues draw calls, so a render bug can never corrupt the
//! simulation. All functions return `Result<(), String>` because that
//! is what SDL2's canvas operations surface.

use crate::camera::Camera;
use crate::effects::{Particle, ParticleKind};
use crate::game::{GameSession, GameState};
use crate::world::{Tile, TileMap};
use rand::Rng;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const BACKGROUND: Color = Color::RGB(24, 20, 37);
const FLOOR: Color = Color::RGB(38, 43, 68);
const WALL: Color = Color::RGB(90, 105, 136);
const PORTAL: Color = Color::RGB(139, 109, 245);
const PLAYER_BODY: Color = Color::RGB(99, 199, 77);
const PLAYER_DASHING: Color = Color::RGB(192, 255, 140);
const ENEMY_BODY: Color = Color::RGB(228, 59, 68);
const BOSS_BODY: Color = Color::RGB(158, 40, 53);
const HIT_FLASH: Color = Color::RGB(255, 255, 255);
const DROP_COLOR: Color = Color::RGB(254, 231, 97);
const SHARD_COLOR: Color = Color::RGB(44, 232, 245);
const HUD_BACKGROUND: Color = Color::RGB(10, 10, 16);
const HUD_HEALTH: Color = Color::RGB(99, 199, 77);
const HUD_HEALTH_LOW: Color = Color::RGB(228, 59, 68);
const HUD_XP: Color = Color::RGB(44, 232, 245);

const HUD_BAR_WIDTH: u32 = 160;
const HUD_BAR_HEIGHT: u32 = 8;
const HUD_MARGIN: i32 = 8;
const LOW_HEALTH_FRACTION: f32 = 0.3;

/// Draws one complete frame: world, entities, particles, then HUD.
pub fn render_frame(
    canvas: &mut Canvas<Window>,
    session: &GameSession,
    rng: &mut impl Rng,
) -> Result<(), String> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    let (offset_x, offset_y) = session.camera.render_offset(rng);

    render_tiles(canvas, &session.world, &session.camera, offset_x, offset_y)?;
    render_loot(canvas, session, offset_x, offset_y)?;
    render_enemies(canvas, session, offset_x, offset_y)?;
    render_player(canvas, session, offset_x, offset_y)?;
    render_particles(canvas, &session.particles.particles, offset_x, offset_y)?;
    render_hud(canvas, session)?;

    if session.state != GameState::Playing {
        render_overlay(canvas, session.state)?;
    }
    Ok(())
}

/// Draws the visible slice of the tile map.
///
/// Only tiles overlapping the camera view are considered, so arena size
/// does not affect draw cost.
fn render_tiles(
    canvas: &mut Canvas<Window>,
    world: &TileMap,
    camera: &Camera,
    offset_x: f32,
    offset_y: f32,
) -> Result<(), String> {
    let tile = world.tile_size;
    let first_col = (camera.x / tile).floor().max(0.0) as i32;
    let first_row = (camera.y / tile).floor().max(0.0) as i32;
    let last_col = ((camera.x + camera.view_w) / tile).ceil() as i32;
    let last_row = ((camera.y + camera.view_h) / tile).ceil() as i32;

    for row in first_row..=last_row {
        for col in first_col..=last_col {
            let color = match world.tile_at(col, row) {
                Tile::Open => FLOOR,
                Tile::Solid => WALL,
            };
            canvas.set_draw_color(color);
            canvas.fill_rect(Rect::new(
                (col as f32 * tile - offset_x) as i32,
                (row as f32 * tile - offset_y) as i32,
                tile as u32,
                tile as u32,
            ))?;
        }
    }

    if let Some((px, py, pw, ph)) = world.portal {
        canvas.set_draw_color(PORTAL);
        canvas.fill_rect(Rect::new(
            (px - offset_x) as i32,
            (py - offset_y) as i32,
            pw as u32,
            ph as u32,
        ))?;
    }
    Ok(())
}

fn render_player(
    canvas: &mut Canvas<Window>,
    session: &GameSession,
    offset_x: f32,
    offset_y: f32,
) -> Result<(), String> {
    let player = &session.player;
    if !player.is_alive() {
        return Ok(());
    }
    let body = if player.is_dashing() {
        PLAYER_DASHING
    } else {
        PLAYER_BODY
    };
    fill_circle(
        canvas,
        player.x - offset_x,
        player.y - offset_y,
        player.r,
        body,
    )?;

    // Facing tick so the attack direction is readable
    let (fx, fy) = player.facing;
    fill_circle(
        canvas,
        player.x + fx * player.r - offset_x,
        player.y + fy * player.r - offset_y,
        3.0,
        Color::RGB(255, 255, 255),
    )
}

fn render_enemies(
    canvas: &mut Canvas<Window>,
    session: &GameSession,
    offset_x: f32,
    offset_y: f32,
) -> Result<(), String> {
    for enemy in &session.enemies {
        if !enemy.is_alive() {
            continue;
        }
        let color = if enemy.hit_flash > 0.0 {
            HIT_FLASH
        } else if enemy.is_boss {
            BOSS_BODY
        } else {
            ENEMY_BODY
        };
        fill_circle(
            canvas,
            enemy.x - offset_x,
            enemy.y - offset_y,
            enemy.r,
            color,
        )?;

        // Bosses get an over-head bar; regular enemies flash instead
        if enemy.is_boss {
            render_bar(
                canvas,
                (enemy.x - enemy.r - offset_x) as i32,
                (enemy.y - enemy.r - offset_y) as i32 - 8,
                (enemy.r * 2.0) as u32,
                4,
                enemy.health.fraction(),
                HUD_HEALTH_LOW,
            )?;
        }
    }
    Ok(())
}

fn render_loot(
    canvas: &mut Canvas<Window>,
    session: &GameSession,
    offset_x: f32,
    offset_y: f32,
) -> Result<(), String> {
    for drop in &session.loot.drops {
        fill_circle(
            canvas,
            drop.x - offset_x,
            drop.y - offset_y,
            drop.r,
            DROP_COLOR,
        )?;
    }
    for pickup in &session.loot.pickups {
        fill_circle(
            canvas,
            pickup.x - offset_x,
            pickup.y - offset_y,
            pickup.r,
            SHARD_COLOR,
        )?;
    }
    Ok(())
}

fn render_particles(
    canvas: &mut Canvas<Window>,
    particles: &[Particle],
    offset_x: f32,
    offset_y: f32,
) -> Result<(), String> {
    for particle in particles {
        let color = match particle.kind {
            ParticleKind::Blood => ENEMY_BODY,
            ParticleKind::Spark => Color::RGB(255, 200, 120),
            ParticleKind::Pickup => DROP_COLOR,
        };
        canvas.set_draw_color(color);
        // Particles shrink as they die
        let size = (3.0 * particle.lifetime / particle.max_lifetime).ceil().max(1.0) as u32;
        canvas.fill_rect(Rect::new(
            (particle.x - offset_x) as i32,
            (particle.y - offset_y) as i32,
            size,
            size,
        ))?;
    }
    Ok(())
}

/// Screen-space HUD: health bar, XP bar, and shard pips.
fn render_hud(canvas: &mut Canvas<Window>, session: &GameSession) -> Result<(), String> {
    let health_fraction = session.player.health.fraction();
    let health_color = if health_fraction < LOW_HEALTH_FRACTION {
        HUD_HEALTH_LOW
    } else {
        HUD_HEALTH
    };
    render_bar(
        canvas,
        HUD_MARGIN,
        HUD_MARGIN,
        HUD_BAR_WIDTH,
        HUD_BAR_HEIGHT,
        health_fraction,
        health_color,
    )?;

    let xp_fraction = if session.player.xp_next > 0 {
        session.player.xp as f32 / session.player.xp_next as f32
    } else {
        0.0
    };
    render_bar(
        canvas,
        HUD_MARGIN,
        HUD_MARGIN + HUD_BAR_HEIGHT as i32 + 4,
        HUD_BAR_WIDTH,
        HUD_BAR_HEIGHT / 2,
        xp_fraction,
        HUD_XP,
    )?;

    // One pip per shard toward the goal, top-right corner
    for i in 0..crate::game::SHARD_GOAL {
        let filled = i < session.shards_collected;
        let x = session.camera.view_w as i32
            - HUD_MARGIN
            - (crate::game::SHARD_GOAL - i) as i32 * 12;
        let rect = Rect::new(x, HUD_MARGIN, 8, 8);
        canvas.set_draw_color(if filled {
            SHARD_COLOR
        } else {
            HUD_BACKGROUND
        });
        canvas.fill_rect(rect)?;
        canvas.set_draw_color(SHARD_COLOR);
        canvas.draw_rect(rect)?;
    }
    Ok(())
}

fn render_bar(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    fraction: f32,
    fill: Color,
) -> Result<(), String> {
    canvas.set_draw_color(HUD_BACKGROUND);
    canvas.fill_rect(Rect::new(x, y, width, height))?;

    let fill_width = (width as f32 * fraction.clamp(0.0, 1.0)) as u32;
    if fill_width > 0 {
        canvas.set_draw_color(fill);
        canvas.fill_rect(Rect::new(x, y, fill_width, height))?;
    }
    Ok(())
}

/// Dimmed overlay for the non-playing states.
///
/// Without a font stack the overlays are color-coded: grey for the
/// start screen, red for death, gold for the win screen. The controls
/// printout in main covers the actual instructions.
fn render_overlay(canvas: &mut Canvas<Window>, state: GameState) -> Result<(), String> {
    let (view_w, view_h) = canvas.logical_size();
    let tint = match state {
        GameState::Start => Color::RGBA(20, 20, 30, 160),
        GameState::Dead => Color::RGBA(120, 10, 10, 160),
        GameState::Won => Color::RGBA(160, 130, 20, 160),
        GameState::Playing => return Ok(()),
    };
    canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
    canvas.set_draw_color(tint);
    canvas.fill_rect(Rect::new(0, 0, view_w, view_h))?;
    canvas.set_blend_mode(sdl2::render::BlendMode::None);
    Ok(())
}

/// Fills a circle using horizontal spans.
///
/// SDL2 has no circle primitive; one rect per scanline is cheap enough
/// at this entity count.
fn fill_circle(
    canvas: &mut Canvas<Window>,
    cx: f32,
    cy: f32,
    r: f32,
    color: Color,
) -> Result<(), String> {
    canvas.set_draw_color(color);
    let radius = r.ceil() as i32;
    for dy in -radius..=radius {
        let half_width_sq = r * r - (dy * dy) as f32;
        if half_width_sq <= 0.0 {
            continue;
        }
        let half_width = half_width_sq.sqrt();
        canvas.fill_rect(Rect::new(
            (cx - half_width) as i32,
            cy as i32 + dy,
            (half_width * 2.0).max(1.0) as u32,
            1,
        ))?;
    }
    Ok(())
}
