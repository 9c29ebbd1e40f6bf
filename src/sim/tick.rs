//! Frame-stepped simulation tick
//!
//! One call advances the session by exactly one frame. The order of the
//! steps is fixed: later steps read positions committed by earlier ones.

use super::collision::CollisionHandler;
use super::entity::{AsteroidId, EntityRef};
use super::input::TickInput;
use super::random::RandomSource;
use super::state::{GameSession, VOLLEY_DIRECTIONS};

/// Advance the session by one frame
pub fn tick<R: RandomSource>(session: &mut GameSession<R>, input: &TickInput) {
    session.frame += 1;
    let half = session.tuning.half_extents();

    // Ship: input, kinematics, wrap, then fire from the wrapped position
    if let Some(ship) = session.ship.as_mut() {
        ship.set_control_input(input.acceleration(), input.rotation());
        ship.update(&session.tuning);
        ship.body.wrap(half);

        if input.fire {
            session.request_fire();
        }
    }

    for asteroid in session.asteroids.values_mut() {
        asteroid.update();
        asteroid.body.wrap(half);
    }

    // Bullets travel off the playfield rather than wrapping
    for bullet in session.bullets.values_mut() {
        bullet.update();
    }
    if let Some(lifetime) = session.tuning.bullet_lifetime_frames {
        session.bullets.retain(|_, bullet| bullet.age < lifetime);
    }

    update_collisions(session);

    session.fire_cooldown = session.fire_cooldown.saturating_add(1);

    session.explosions.retain_mut(|explosion| explosion.advance());
}

/// Run one collision pass and adjudicate every reported pair
fn update_collisions<R: RandomSource>(session: &mut GameSession<R>) {
    let mut resolver = std::mem::take(&mut session.collision);
    session.register_colliders(&mut resolver);
    let pairs = resolver.resolve(session);
    if pairs > 0 {
        log::trace!("frame {}: {} collision pairs", session.frame, pairs);
    }
    session.collision = resolver;
}

impl<R: RandomSource> GameSession<R> {
    /// Advance one frame; see [`tick`]
    pub fn update(&mut self, input: &TickInput) {
        tick(self, input);
    }

    /// Fire a three-bullet volley if the ship exists and the cooldown has run
    /// out. Returns whether a volley was fired.
    pub fn request_fire(&mut self) -> bool {
        let Some(origin) = self.ship.as_ref().map(|ship| ship.body.pos) else {
            return false;
        };
        if self.fire_cooldown <= self.tuning.fire_cooldown_frames {
            return false;
        }

        for direction in VOLLEY_DIRECTIONS {
            self.spawn_bullet(origin + direction, direction);
        }
        self.fire_cooldown = 0;
        true
    }

    /// Apply the outcome of two entities overlapping.
    ///
    /// Handles whose entity has already been removed this pass are ignored.
    pub fn do_collision(&mut self, a: EntityRef, b: EntityRef) {
        log::trace!("Collision {:?} x {:?}", a.kind(), b.kind());
        let pair = [a, b];
        let ship_hit = self.live_entities(pair).any(EntityRef::is_ship);
        let bullet = self.live_entities(pair).find_map(EntityRef::as_bullet);

        if ship_hit {
            let asteroid = self.live_entities(pair).find_map(EntityRef::as_asteroid);
            if let Some(asteroid) = asteroid {
                self.ship_struck(asteroid);
            }
        }

        let asteroid = self.live_entities(pair).find_map(EntityRef::as_asteroid);
        if let (Some(bullet), Some(asteroid)) = (bullet, asteroid) {
            self.score += 1;
            self.asteroid_hit(asteroid);
            self.delete_bullet(bullet);
        }
    }

    /// Members of `pair` still present in the session
    fn live_entities(&self, pair: [EntityRef; 2]) -> impl Iterator<Item = EntityRef> + '_ {
        pair.into_iter().filter(move |e| self.contains(*e))
    }

    fn ship_struck(&mut self, asteroid: AsteroidId) {
        self.lives -= 1;
        let wreck = self.ship.as_mut().map(|ship| {
            let at = (ship.body.pos, ship.body.radius);
            ship.reset();
            at
        });
        self.asteroid_hit(asteroid);
        log::debug!("Ship hit, {} lives left", self.lives);

        if self.lives <= 0 {
            self.delete_player();
            if let Some((pos, radius)) = wreck {
                self.spawn_explosion(pos, radius);
            }
            log::info!("Out of lives at score {}, session reset", self.score);
            self.lives = self.tuning.starting_lives;
            self.score = 0;
        }
    }
}

impl<R: RandomSource> CollisionHandler for GameSession<R> {
    fn handle_collision(&mut self, a: EntityRef, b: EntityRef) {
        self.do_collision(a, b);
    }
}
