use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::Palette;

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 20;

/// Snake head, apple, stone and at least one free cell to move into.
const MIN_CELLS: i32 = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    pub initial_speed: u32,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_width: 640,
            board_height: 480,
            cell_size: 20,
            initial_speed: 4,
            palette: Palette::default(),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err("board dimensions must be greater than 0".to_string());
        }
        if self.cell_size <= 0 {
            return Err("cell_size must be greater than 0".to_string());
        }
        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err("cell_size must divide board_width and board_height".to_string());
        }
        let cells = (self.board_width / self.cell_size) * (self.board_height / self.cell_size);
        if cells < MIN_CELLS {
            return Err(format!("board must have at least {} cells", MIN_CELLS));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.initial_speed) {
            return Err(format!(
                "initial_speed must be between {} and {}",
                MIN_SPEED, MAX_SPEED
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_cell_size_must_divide_board() {
        let settings = GameSettings {
            cell_size: 30,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_speed_out_of_range() {
        for speed in [0, 21] {
            let settings = GameSettings {
                initial_speed: speed,
                ..GameSettings::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn test_tiny_board_is_rejected() {
        let settings = GameSettings {
            board_width: 20,
            board_height: 40,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
