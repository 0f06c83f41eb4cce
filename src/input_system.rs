//! Input system: SDL2 events buffered into a per-frame snapshot
//!
//! Game logic never sees raw events. Key events mutate held/edge state
//! here, and once per frame the loop driver takes an immutable
//! `InputSnapshot` that the whole frame consumes. Edge flags (attack,
//! dash, interact, restart) are cleared exactly once, by `end_frame`,
//! after every consumer has run, so each discrete press is observed by
//! exactly one frame of logic.
//!
//! Window focus loss resets all held keys. Without that, a key released
//! while the window is unfocused stays "down" forever and the player
//! walks into a wall until the user mashes the key again.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

/// Immutable per-frame input view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Movement vector, magnitude <= 1, diagonals normalized.
    pub move_vec: (f32, f32),
    pub attack_pressed: bool,
    pub dash_pressed: bool,
    pub interact_pressed: bool,
    pub restart_pressed: bool,
    pub quit: bool,
}

/// Accumulates key state between frames and mints snapshots.
pub struct InputSystem {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    attack_edge: bool,
    dash_edge: bool,
    interact_edge: bool,
    restart_edge: bool,
    quit: bool,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            up: false,
            down: false,
            left: false,
            right: false,
            attack_edge: false,
            dash_edge: false,
            interact_edge: false,
            restart_edge: false,
            quit: false,
        }
    }

    /// Routes one SDL2 event into held/edge state.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.quit = true,
            Event::KeyDown {
                keycode: Some(key),
                repeat,
                ..
            } => self.key_down(*key, *repeat),
            Event::KeyUp {
                keycode: Some(key), ..
            } => self.key_up(*key),
            Event::Window {
                win_event: WindowEvent::FocusLost,
                ..
            } => self.reset_held(),
            _ => {}
        }
    }

    /// Key press. OS key-repeat events keep the held state but never
    /// re-fire edges.
    pub fn key_down(&mut self, key: Keycode, repeat: bool) {
        match key {
            Keycode::W | Keycode::Up => self.up = true,
            Keycode::S | Keycode::Down => self.down = true,
            Keycode::A | Keycode::Left => self.left = true,
            Keycode::D | Keycode::Right => self.right = true,
            _ => {}
        }
        if repeat {
            return;
        }
        match key {
            Keycode::Space | Keycode::J => self.attack_edge = true,
            Keycode::LShift | Keycode::K => self.dash_edge = true,
            Keycode::E => self.interact_edge = true,
            Keycode::R | Keycode::Return => self.restart_edge = true,
            Keycode::Escape => self.quit = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Keycode) {
        match key {
            Keycode::W | Keycode::Up => self.up = false,
            Keycode::S | Keycode::Down => self.down = false,
            Keycode::A | Keycode::Left => self.left = false,
            Keycode::D | Keycode::Right => self.right = false,
            _ => {}
        }
    }

    /// Clears held movement keys (focus loss, session teardown).
    /// Edge flags are left alone; they clear at frame end anyway.
    pub fn reset_held(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }

    /// Builds the frame's snapshot from current state.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut mx = 0.0f32;
        let mut my = 0.0f32;
        if self.left {
            mx -= 1.0;
        }
        if self.right {
            mx += 1.0;
        }
        if self.up {
            my -= 1.0;
        }
        if self.down {
            my += 1.0;
        }
        let mag = (mx * mx + my * my).sqrt();
        if mag > 1.0 {
            mx /= mag;
            my /= mag;
        }
        InputSnapshot {
            move_vec: (mx, my),
            attack_pressed: self.attack_edge,
            dash_pressed: self.dash_edge,
            interact_pressed: self.interact_edge,
            restart_pressed: self.restart_edge,
            quit: self.quit,
        }
    }

    /// Clears edge-triggered flags. The loop driver calls this exactly
    /// once per frame, after the session update.
    pub fn end_frame(&mut self) {
        self.attack_edge = false;
        self.dash_edge = false;
        self.interact_edge = false;
        self.restart_edge = false;
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
