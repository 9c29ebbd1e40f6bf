//! Roid Rush - gameplay core for a wrapping-playfield asteroid shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, session, phases)
//! - `renderer`: Draw-command surface consumed by whatever backend draws
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (classic defaults; see `Tuning`)
pub mod consts {
    use glam::Vec2;

    /// Playfield half extents, world spans [-400,400] x [-300,300]
    pub const HALF_WIDTH: f32 = 400.0;
    pub const HALF_HEIGHT: f32 = 300.0;

    pub const STARTING_LIVES: i32 = 3;

    /// Volley may fire once the cooldown counter exceeds this many frames
    pub const FIRE_COOLDOWN_FRAMES: u32 = 40;

    /// Asteroid defaults
    pub const ASTEROID_MAX_SIZE: u8 = 3;
    pub const ASTEROID_RADIUS_UNIT: f32 = 5.0;
    pub const ASTEROID_MAX_SPEED: f32 = 1.0;
    /// Second split child is placed at parent + this offset
    pub const ASTEROID_SPLIT_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 10.0;
    pub const SHIP_ROTATION_RATE: f32 = 0.1; // radians per frame
    pub const SHIP_MAX_SPEED: f32 = 2.0;
    pub const SHIP_VELOCITY_TWEEN: f32 = 0.05;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 4.0;

    /// Explosion lifetime in frames
    pub const EXPLOSION_FRAMES: u32 = 30;

    /// Levels
    pub const FIRST_LEVEL_ASTEROIDS: u32 = 4;
    pub const LEVEL_ASTEROID_INCREMENT: u32 = 1;
    pub const LEVEL_BANNER_FRAMES: u32 = 90;
    pub const GAME_OVER_FRAMES: u32 = 180;
}

/// Wrap `value` into `[min, max)` with modulo arithmetic
#[inline]
pub fn wrap_modulo(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    let wrapped = min + (value - min).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for values just below `min`
    if wrapped >= max { min } else { wrapped }
}

/// Wrap a position onto the torus spanned by `half_extents`
#[inline]
pub fn wrap_position(pos: Vec2, half_extents: Vec2) -> Vec2 {
    Vec2::new(
        wrap_modulo(pos.x, -half_extents.x, half_extents.x),
        wrap_modulo(pos.y, -half_extents.y, half_extents.y),
    )
}

/// Unit vector for a heading. Heading 0 points up (+y), positive turns counter-clockwise.
#[inline]
pub fn heading_to_forward(heading: f32) -> Vec2 {
    Vec2::new(-heading.sin(), heading.cos())
}

/// Vector of length `speed` pointing along `angle` (0 = up)
#[inline]
pub fn polar_velocity(angle: f32, speed: f32) -> Vec2 {
    heading_to_forward(angle) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_past_positive_edge() {
        assert!((wrap_modulo(401.0, -400.0, 400.0) - (-399.0)).abs() < 1e-4);
        assert!((wrap_modulo(301.0, -300.0, 300.0) - (-299.0)).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_past_negative_edge() {
        assert!((wrap_modulo(-401.0, -400.0, 400.0) - 399.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_inside_is_identity() {
        assert_eq!(wrap_modulo(123.5, -400.0, 400.0), 123.5);
        let p = wrap_position(Vec2::new(-10.0, 20.0), Vec2::new(400.0, 300.0));
        assert_eq!(p, Vec2::new(-10.0, 20.0));
    }

    #[test]
    fn test_wrap_just_below_min_stays_below_max() {
        let w = wrap_modulo(-400.00003, -400.0, 400.0);
        assert!((-400.0..400.0).contains(&w), "wrapped to {w}");
    }

    #[test]
    fn test_heading_zero_points_up() {
        let f = heading_to_forward(0.0);
        assert!(f.x.abs() < 1e-6);
        assert!((f.y - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn wrapped_value_stays_in_range(v in -100_000.0f32..100_000.0) {
            let w = wrap_modulo(v, -400.0, 400.0);
            prop_assert!((-400.0..400.0).contains(&w));
        }

        #[test]
        fn wrap_preserves_offset_modulo_span(v in -5_000.0f32..5_000.0) {
            let w = wrap_modulo(v, -300.0, 300.0);
            let k = ((v - w) / 600.0).round();
            prop_assert!((v - w - k * 600.0).abs() < 0.01);
        }
    }
}
