//! Game session state and entity variants
//!
//! The session owns every entity. Asteroids and bullets live in slot maps,
//! explosions in a plain list (they never collide), and the ship in a single
//! optional slot.

use glam::Vec2;
use rand_pcg::Pcg32;
use slotmap::SlotMap;

use super::collision::{CollisionResolver, Metric};
use super::entity::{AsteroidId, Body, BulletId, EntityRef};
use super::random::{self, RandomSource};
use crate::tuning::Tuning;
use crate::{heading_to_forward, polar_velocity};

/// The player ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub body: Body,
    /// Radians, 0 = facing up
    pub heading: f32,
    /// Thrust input in [-1, 1]
    pub acceleration: f32,
    /// Turn input in [-1, 1], positive = counter-clockwise
    pub rotation: f32,
}

impl Ship {
    pub fn new(radius: f32) -> Self {
        Self {
            body: Body::new(Vec2::ZERO, Vec2::ZERO, radius),
            heading: 0.0,
            acceleration: 0.0,
            rotation: 0.0,
        }
    }

    pub fn set_control_input(&mut self, acceleration: f32, rotation: f32) {
        self.acceleration = acceleration;
        self.rotation = rotation;
    }

    /// Unit vector along the heading
    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_to_forward(self.heading)
    }

    /// Rotate, ease velocity toward the thrust target, then move
    pub fn update(&mut self, tuning: &Tuning) {
        self.heading += self.rotation * tuning.ship_rotation_rate;

        let ideal = self.forward() * (self.acceleration * tuning.ship_max_speed);
        self.body.vel = self
            .body
            .vel
            .lerp(ideal, tuning.ship_velocity_tween)
            .clamp_length_max(tuning.ship_max_speed);

        self.body.integrate();
    }

    /// Back to the spawn point, stationary, facing up
    pub fn reset(&mut self) {
        self.body.pos = Vec2::ZERO;
        self.body.vel = Vec2::ZERO;
        self.heading = 0.0;
        self.acceleration = 0.0;
        self.rotation = 0.0;
    }
}

/// A drifting rock
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: Body,
    size: u8,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: u8, radius: f32) -> Self {
        Self {
            body: Body::new(pos, vel, radius),
            size,
        }
    }

    /// Size tier, 1 = smallest. Fixed at construction.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    pub fn update(&mut self) {
        self.body.integrate();
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    /// Frames since spawn
    pub age: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, direction: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            body: Body::new(pos, direction.normalize_or_zero() * speed, radius),
            age: 0,
        }
    }

    #[inline]
    pub fn update(&mut self) {
        self.body.integrate();
        self.age = self.age.saturating_add(1);
    }
}

/// Destruction visual. Never collides; only its presence matters to the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    /// Visual scale, the destroyed entity's radius
    pub scale: f32,
    pub frames_left: u32,
}

impl Explosion {
    /// Count down one frame; false once finished
    pub fn advance(&mut self) -> bool {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.frames_left > 0
    }
}

/// Fan of bullet directions fired per volley (world space)
pub const VOLLEY_DIRECTIONS: [Vec2; 3] = [
    Vec2::new(-0.5, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.5, 1.0),
];

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    /// Seed the session was created with
    pub seed: u64,
    /// Player lives
    pub lives: i32,
    /// Score
    pub score: u32,
    /// Simulation frame counter
    pub frame: u64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: R,
    pub(crate) ship: Option<Ship>,
    pub(crate) asteroids: SlotMap<AsteroidId, Asteroid>,
    pub(crate) bullets: SlotMap<BulletId, Bullet>,
    pub(crate) explosions: Vec<Explosion>,
    /// Frames since the last volley
    pub(crate) fire_cooldown: u32,
    pub(crate) collision: CollisionResolver,
}

impl GameSession<Pcg32> {
    /// Create an empty session with a seeded generator
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut session = Self::with_rng(tuning, random::seeded(seed));
        session.seed = seed;
        session
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create an empty session drawing randomness from `rng`
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        let metric = if tuning.toroidal_collisions {
            Metric::Toroidal {
                half_extents: tuning.half_extents(),
            }
        } else {
            Metric::Planar
        };

        Self {
            seed: 0,
            lives: tuning.starting_lives,
            score: 0,
            frame: 0,
            rng,
            ship: None,
            asteroids: SlotMap::with_key(),
            bullets: SlotMap::with_key(),
            explosions: Vec::new(),
            fire_cooldown: 0,
            collision: CollisionResolver::new(metric),
            tuning,
        }
    }

    // --- Queries ---

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[inline]
    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn asteroid(&self, id: AsteroidId) -> Option<&Asteroid> {
        self.asteroids.get(id)
    }

    pub fn asteroids(&self) -> impl Iterator<Item = (AsteroidId, &Asteroid)> {
        self.asteroids.iter()
    }

    pub fn bullet(&self, id: BulletId) -> Option<&Bullet> {
        self.bullets.get(id)
    }

    pub fn bullets(&self) -> impl Iterator<Item = (BulletId, &Bullet)> {
        self.bullets.iter()
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    #[inline]
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    #[inline]
    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    #[inline]
    pub fn fire_cooldown(&self) -> u32 {
        self.fire_cooldown
    }

    /// Number of asteroids of a given size tier
    pub fn count_asteroids_of_size(&self, size: u8) -> usize {
        self.asteroids.values().filter(|a| a.size() == size).count()
    }

    /// True iff no asteroids and no explosions remain
    pub fn is_level_complete(&self) -> bool {
        self.asteroids.is_empty() && self.explosions.is_empty()
    }

    /// True iff the ship is gone and every explosion has finished
    pub fn is_game_over(&self) -> bool {
        self.ship.is_none() && self.explosions.is_empty()
    }

    /// Whether a handle still refers to a live entity
    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Ship => self.ship.is_some(),
            EntityRef::Asteroid(id) => self.asteroids.contains_key(id),
            EntityRef::Bullet(id) => self.bullets.contains_key(id),
        }
    }

    // --- Level setup ---

    /// Clear asteroids and explosions, spawn a fresh ship and `asteroid_count`
    /// full-size asteroids. Bullets in flight are left alone.
    pub fn initialise_level(&mut self, asteroid_count: u32) {
        self.delete_all_asteroids();
        self.delete_all_explosions();

        self.spawn_player();
        self.spawn_asteroids(asteroid_count);
        log::debug!(
            "Level initialised with {} asteroids ({} bullets carried over)",
            asteroid_count,
            self.bullets.len()
        );
    }

    /// Replace any existing ship with a new one at the spawn point
    pub fn spawn_player(&mut self) {
        self.ship = Some(Ship::new(self.tuning.ship_radius));
    }

    pub(crate) fn delete_player(&mut self) {
        debug_assert!(self.ship.is_some(), "deleting a ship that does not exist");
        self.ship = None;
    }

    fn spawn_asteroids(&mut self, count: u32) {
        let half = self.tuning.half_extents();
        let size = self.tuning.asteroid_max_size;
        for _ in 0..count {
            let x = self.rng.float_range(-half.x, half.x);
            let y = self.rng.float_range(-half.y, half.y);
            self.spawn_asteroid_at(Vec2::new(x, y), size);
        }
    }

    /// Spawn an asteroid with a random direction and speed in `[0, max_speed)`
    pub fn spawn_asteroid_at(&mut self, pos: Vec2, size: u8) -> AsteroidId {
        let angle = self.rng.float_below(std::f32::consts::TAU);
        let speed = self.rng.float_below(self.tuning.asteroid_max_speed);
        let radius = self.tuning.asteroid_radius(size);
        self.asteroids
            .insert(Asteroid::new(pos, polar_velocity(angle, speed), size, radius))
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, direction: Vec2) -> BulletId {
        self.bullets.insert(Bullet::new(
            pos,
            direction,
            self.tuning.bullet_speed,
            self.tuning.bullet_radius,
        ))
    }

    pub(crate) fn spawn_explosion(&mut self, pos: Vec2, scale: f32) {
        if self.tuning.explosion_frames == 0 {
            return;
        }
        self.explosions.push(Explosion {
            pos,
            scale,
            frames_left: self.tuning.explosion_frames,
        });
    }

    // --- Removal ---

    /// Destroy an asteroid, splitting it in two if it is larger than size 1
    pub(crate) fn asteroid_hit(&mut self, id: AsteroidId) {
        let removed = self.asteroids.remove(id);
        debug_assert!(removed.is_some(), "asteroid {id:?} already removed");
        let Some(asteroid) = removed else {
            return;
        };

        let pos = asteroid.body.pos;
        let size = asteroid.size();
        if size > 1 {
            let offset = self.tuning.split_offset;
            self.spawn_asteroid_at(pos, size - 1);
            self.spawn_asteroid_at(pos + offset, size - 1);
        }
        self.spawn_explosion(pos, asteroid.body.radius);
    }

    pub(crate) fn delete_bullet(&mut self, id: BulletId) {
        let removed = self.bullets.remove(id);
        debug_assert!(removed.is_some(), "bullet {id:?} already removed");
    }

    fn delete_all_asteroids(&mut self) {
        self.asteroids.clear();
    }

    fn delete_all_explosions(&mut self) {
        self.explosions.clear();
    }

    /// Drop every bullet in flight. Level changes keep them; a new run does not.
    pub(crate) fn delete_all_bullets(&mut self) {
        self.bullets.clear();
    }

    /// Register every collision-enabled body for the coming pass
    pub(crate) fn register_colliders(&self, resolver: &mut CollisionResolver) {
        resolver.clear();
        if let Some(ship) = self.ship.as_ref().filter(|s| s.body.collides()) {
            resolver.register(EntityRef::Ship, ship.body.pos, ship.body.radius);
        }
        for (id, asteroid) in self.asteroids.iter().filter(|(_, a)| a.body.collides()) {
            resolver.register(EntityRef::Asteroid(id), asteroid.body.pos, asteroid.body.radius);
        }
        for (id, bullet) in self.bullets.iter().filter(|(_, b)| b.body.collides()) {
            resolver.register(EntityRef::Bullet(id), bullet.body.pos, bullet.body.radius);
        }
    }
}
