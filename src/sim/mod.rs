//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One `tick` per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod input;
pub mod phase;
pub mod random;
pub mod state;
pub mod tick;

pub use collision::{CollisionHandler, CollisionPair, CollisionResolver, Metric};
pub use entity::{AsteroidId, Body, BulletId, EntityKind, EntityRef};
pub use input::{Control, ControlState, InputSource, TickInput};
pub use phase::{FrameDriver, GamePhase};
pub use random::RandomSource;
pub use state::{Asteroid, Bullet, Explosion, GameSession, Ship, VOLLEY_DIRECTIONS};
pub use tick::tick;
