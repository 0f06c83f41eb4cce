//! Clawboi: top-down arena action game
//!
//! Fight off waves of chasers, collect the shards scattered around each
//! room, and reach the shard goal to win. Player progression (level,
//! XP, health) persists across runs through the save system.
//!
//! # Architecture
//!
//! The main loop is a thin driver. Each frame it:
//! 1. Drains SDL events into the input system
//! 2. Ticks the frame clock for a capped delta time
//! 3. Hands the input snapshot and dt to the game session
//! 4. Renders the session
//! 5. Clears the input edge flags
//!
//! All game logic lives in `GameSession::update`; nothing in this file
//! mutates game state directly.

mod camera;
mod clock;
mod collision;
mod combat;
mod effects;
mod enemy;
mod game;
mod input_system;
mod loot;
mod movement;
mod player;
mod render;
mod save;
mod spawner;
mod stats;
mod world;

use clock::FrameClock;
use game::{GameSession, GameState, VIEW_H, VIEW_W};
use input_system::InputSystem;
use rand::rngs::StdRng;
use rand::SeedableRng;
use save::{PlayerRecord, SaveFile, SaveManager, SaveMetadata, SaveType, CURRENT_SAVE_VERSION};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

const GAME_WIDTH: u32 = VIEW_W as u32;
const GAME_HEIGHT: u32 = VIEW_H as u32;

/// Calculate the best window scale based on monitor size
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let max_scale_w = usable_w / GAME_WIDTH as i32;
            let max_scale_h = usable_h / GAME_HEIGHT as i32;

            let scale = max_scale_w.min(max_scale_h);
            scale.clamp(1, 4) as u32
        }
        Err(_) => {
            println!("Warning: Could not detect monitor size, using 2x scale");
            2
        }
    }
}

fn build_save_file(session: &GameSession, save_type: SaveType, slot: u8) -> SaveFile {
    SaveFile {
        version: CURRENT_SAVE_VERSION,
        timestamp: std::time::SystemTime::now(),
        metadata: SaveMetadata {
            game_version: env!("CARGO_PKG_VERSION").to_string(),
            playtime_seconds: session.elapsed as u64,
            save_type,
            save_slot: slot,
        },
        player: session.player_record(),
    }
}

fn save_progress(
    save_manager: &mut SaveManager,
    session: &GameSession,
    save_type: SaveType,
) -> Result<(), String> {
    let slot = save_manager.save_slot();
    let save_file = build_save_file(session, save_type, slot);
    save_manager
        .save_game(&save_file)
        .map(|_| ())
        .map_err(|e| format!("Failed to save: {}", e))
}

fn load_progress(save_manager: &SaveManager, session: &mut GameSession) -> Result<PlayerRecord, String> {
    let save_file = save_manager
        .load_game(save_manager.save_slot())
        .map_err(|e| format!("Failed to load save: {}", e))?;
    println!("Loading save...");
    println!("  - Save version: {}", save_file.version);
    println!("  - Player level: {}", save_file.player.level);
    let record = save_file.player;
    session.restore_player(record.clone());
    Ok(record)
}

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window_scale = calculate_window_scale(&video_subsystem);
    let window_width = GAME_WIDTH * window_scale;
    let window_height = GAME_HEIGHT * window_scale;

    println!(
        "Monitor scale: {}x (window: {}x{})",
        window_scale, window_width, window_height
    );

    let window = video_subsystem
        .window("Clawboi", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Logical size keeps the simulation in view-space pixels regardless
    // of window scale
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;

    // Save system
    let save_dir = dirs::home_dir()
        .map(|p| p.join(".clawboi/saves"))
        .unwrap_or_else(|| std::path::PathBuf::from("./saves"));
    let mut save_manager = SaveManager::new(&save_dir)
        .map_err(|e| format!("Failed to create save manager: {}", e))?;

    let mut session = GameSession::new();
    if save_manager.save_exists(save_manager.save_slot()) {
        match load_progress(&save_manager, &mut session) {
            Ok(record) => println!("Resumed at level {}", record.level),
            Err(e) => eprintln!("{}", e),
        }
    } else {
        println!("No save found, starting fresh");
    }

    let mut input = InputSystem::new();
    let mut clock = FrameClock::new();
    // Render-only rng for camera shake jitter
    let mut render_rng = StdRng::from_entropy();

    println!("\n=== Controls ===");
    println!("- WASD / arrows: move");
    println!("- Space / J: attack");
    println!("- LShift / K: dash");
    println!("- E: enter portal");
    println!("- R / Enter: start / restart");
    println!("- F5: save progress, F9: load");
    println!("- Escape: quit (progress is saved)");

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::KeyDown {
                    keycode: Some(Keycode::F5),
                    repeat: false,
                    ..
                } => {
                    if let Err(e) = save_progress(&mut save_manager, &session, SaveType::QuickSave)
                    {
                        eprintln!("{}", e);
                    }
                }
                Event::KeyDown {
                    keycode: Some(Keycode::F9),
                    repeat: false,
                    ..
                } => match load_progress(&save_manager, &mut session) {
                    Ok(record) => println!("Loaded level {} save", record.level),
                    Err(e) => eprintln!("{}", e),
                },
                _ => input.handle_event(&event),
            }
        }

        let dt = clock.tick();
        let snapshot = input.snapshot();
        session.update(dt, &snapshot);

        if snapshot.quit {
            break 'running;
        }

        // Periodic autosave while a run is active
        if session.state == GameState::Playing && save_manager.should_autosave() {
            if let Err(e) = save_progress(&mut save_manager, &session, SaveType::Auto) {
                eprintln!("{}", e);
            }
        }

        render::render_frame(&mut canvas, &session, &mut render_rng)?;
        canvas.present();

        input.end_frame();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    if let Err(e) = save_progress(&mut save_manager, &session, SaveType::Manual) {
        eprintln!("{}", e);
    } else {
        println!("Progress saved. Bye!");
    }

    Ok(())
}
