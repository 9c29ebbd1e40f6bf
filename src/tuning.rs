//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it. Missing
//! fields fall back to the classic values in `crate::consts`.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning from disk
#[derive(Debug, Error)]
pub enum TuningError {
    /// File could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid tuning JSON
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its legal range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for tuning operations
pub type Result<T> = std::result::Result<T, TuningError>;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub half_width: f32,
    pub half_height: f32,

    // === Session ===
    pub starting_lives: i32,
    /// Cooldown counter must exceed this before a volley fires
    pub fire_cooldown_frames: u32,

    // === Asteroids ===
    pub asteroid_max_size: u8,
    pub asteroid_radius_unit: f32,
    pub asteroid_max_speed: f32,
    /// Offset of the second child from the parent when an asteroid splits
    pub split_offset: Vec2,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_rotation_rate: f32,
    pub ship_max_speed: f32,
    pub ship_velocity_tween: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    /// Frames before an unconsumed bullet is dropped. `None` keeps bullets forever.
    pub bullet_lifetime_frames: Option<u32>,

    // === Explosions ===
    pub explosion_frames: u32,

    // === Collision ===
    /// Measure overlap across the playfield edges (minimum image distance)
    pub toroidal_collisions: bool,

    // === Levels ===
    pub first_level_asteroids: u32,
    pub level_asteroid_increment: u32,
    /// Frames the "Level N" banner shows before asteroids spawn
    pub level_banner_frames: u32,
    /// Frames the "Game Over" screen holds before returning to the title
    pub game_over_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            half_width: HALF_WIDTH,
            half_height: HALF_HEIGHT,

            starting_lives: STARTING_LIVES,
            fire_cooldown_frames: FIRE_COOLDOWN_FRAMES,

            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_radius_unit: ASTEROID_RADIUS_UNIT,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            split_offset: ASTEROID_SPLIT_OFFSET,

            ship_radius: SHIP_RADIUS,
            ship_rotation_rate: SHIP_ROTATION_RATE,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_velocity_tween: SHIP_VELOCITY_TWEEN,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime_frames: None,

            explosion_frames: EXPLOSION_FRAMES,

            toroidal_collisions: false,

            first_level_asteroids: FIRST_LEVEL_ASTEROIDS,
            level_asteroid_increment: LEVEL_ASTEROID_INCREMENT,
            level_banner_frames: LEVEL_BANNER_FRAMES,
            game_over_frames: GAME_OVER_FRAMES,
        }
    }
}

impl Tuning {
    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is in a range the simulation can use
    pub fn validate(&self) -> Result<()> {
        positive("half_width", self.half_width)?;
        positive("half_height", self.half_height)?;
        positive("asteroid_radius_unit", self.asteroid_radius_unit)?;
        positive("ship_radius", self.ship_radius)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("ship_velocity_tween", self.ship_velocity_tween)?;
        non_negative("asteroid_max_speed", self.asteroid_max_speed)?;
        non_negative("bullet_speed", self.bullet_speed)?;
        non_negative("ship_max_speed", self.ship_max_speed)?;

        if self.ship_velocity_tween > 1.0 {
            return Err(invalid("ship_velocity_tween", "must be at most 1"));
        }
        if self.asteroid_max_size == 0 {
            return Err(invalid("asteroid_max_size", "must be at least 1"));
        }
        if self.starting_lives <= 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.bullet_lifetime_frames == Some(0) {
            return Err(invalid("bullet_lifetime_frames", "use null to disable expiry"));
        }
        Ok(())
    }

    /// Playfield half extents as a vector
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Collision radius for an asteroid of the given size tier
    #[inline]
    pub fn asteroid_radius(&self, size: u8) -> f32 {
        f32::from(size) * self.asteroid_radius_unit
    }

    /// Asteroid count for a 0-based level index
    pub fn asteroids_for_level(&self, level: u32) -> u32 {
        self.first_level_asteroids + level * self.level_asteroid_increment
    }
}

fn invalid(field: &'static str, reason: &str) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.asteroid_radius(3), 15.0);
        assert_eq!(tuning.fire_cooldown_frames, 40);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "toroidal_collisions": true }"#)
            .expect("valid tuning");
        assert_eq!(tuning.starting_lives, 5);
        assert!(tuning.toroidal_collisions);
        assert_eq!(tuning.half_width, HALF_WIDTH);
    }

    #[test]
    fn test_split_offset_from_json_array() {
        let tuning = Tuning::from_json(r#"{ "split_offset": [8.0, -4.0] }"#).expect("valid tuning");
        assert_eq!(tuning.split_offset, Vec2::new(8.0, -4.0));
    }

    #[test]
    fn test_rejects_zero_radius() {
        let err = Tuning::from_json(r#"{ "bullet_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "bullet_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_level_asteroid_progression() {
        let tuning = Tuning::default();
        assert_eq!(tuning.asteroids_for_level(0), FIRST_LEVEL_ASTEROIDS);
        assert_eq!(
            tuning.asteroids_for_level(2),
            FIRST_LEVEL_ASTEROIDS + 2 * LEVEL_ASTEROID_INCREMENT
        );
    }
}
