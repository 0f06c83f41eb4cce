//! Save manager for handling save/load operations
//!
//! Manual/quick saves overwrite their slot file; autosaves get a
//! timestamped filename so a bad autosave never clobbers the slot.

use super::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub struct SaveManager {
    save_directory: PathBuf,
    current_save_slot: u8,
    autosave_interval: std::time::Duration,
    last_autosave: Option<SystemTime>,
}

impl SaveManager {
    /// Creates a SaveManager, creating the directory if needed.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();
        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }
        Ok(SaveManager {
            save_directory: save_dir,
            current_save_slot: 1,
            autosave_interval: std::time::Duration::from_secs(120),
            last_autosave: None,
        })
    }

    pub fn set_save_slot(&mut self, slot: u8) {
        self.current_save_slot = slot.clamp(1, 5);
    }

    pub fn save_slot(&self) -> u8 {
        self.current_save_slot
    }

    /// Writes a save file; returns the path written.
    pub fn save_game(&mut self, save_file: &SaveFile) -> Result<PathBuf, SaveError> {
        let filename =
            generate_filename(&save_file.metadata.save_type, save_file.metadata.save_slot);
        let filepath = self.save_directory.join(&filename);

        // Pretty JSON: save files double as debugging artifacts
        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&filepath, json)?;

        if matches!(save_file.metadata.save_type, SaveType::Auto) {
            self.last_autosave = Some(SystemTime::now());
        }
        println!("Game saved to: {}", filepath.display());
        Ok(filepath)
    }

    /// Loads the slot's save file.
    pub fn load_game(&self, slot: u8) -> Result<SaveFile, SaveError> {
        let filename = format!("slot_{}.json", slot);
        self.load_game_by_filename(&filename)
    }

    pub fn load_game_by_filename(&self, filename: &str) -> Result<SaveFile, SaveError> {
        let filepath = self.save_directory.join(filename);
        if !filepath.exists() {
            return Err(SaveError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Save file not found: {}", filename),
            )));
        }

        let json = fs::read_to_string(&filepath)?;
        if json.trim().is_empty() {
            return Err(SaveError::CorruptedData(format!(
                "Save file is empty: {}",
                filename
            )));
        }
        let save_file: SaveFile = serde_json::from_str(&json)?;
        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }
        Ok(save_file)
    }

    pub fn save_exists(&self, slot: u8) -> bool {
        self.save_directory
            .join(format!("slot_{}.json", slot))
            .exists()
    }

    /// True when the autosave interval has elapsed (or no autosave has
    /// happened yet).
    pub fn should_autosave(&self) -> bool {
        match self.last_autosave {
            Some(last) => SystemTime::now()
                .duration_since(last)
                .map(|elapsed| elapsed >= self.autosave_interval)
                .unwrap_or(true),
            None => true,
        }
    }
}

fn generate_filename(save_type: &SaveType, slot: u8) -> String {
    match save_type {
        SaveType::Manual | SaveType::QuickSave => format!("slot_{}.json", slot),
        SaveType::Auto => {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            format!("autosave_slot{}_{}.json", slot, timestamp)
        }
    }
}
