//! Drifting asteroids
//!
//! Asteroids drift in a straight line and wrap at the screen edges, picking a
//! new random heading each time they wrap. The sprite spins independently of
//! the travel direction. One hit destroys an asteroid.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::sprites::{ASTEROID_VARIANTS, Sprite, SpriteSheet};
use super::tick::Frame;
use crate::consts::*;
use crate::wrap_degrees;

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    velocity: f32,
    /// Degrees of render rotation per scaled tick
    spin: f32,
    alive: bool,
    active: bool,
}

impl Asteroid {
    pub fn new(sheet: &SpriteSheet, sprite: Sprite, position: Vec2, direction: f32, velocity: f32, spin: f32) -> Self {
        let mut body = Body::new(sheet, sprite, position, direction);
        body.sync_draw();
        Self {
            body,
            velocity,
            spin,
            alive: true,
            active: true,
        }
    }

    /// Random variant, placement inside `width` x `height`, heading, speed and spin
    pub fn random<R: Rng>(sheet: &SpriteSheet, width: f32, height: f32, rng: &mut R) -> Self {
        let variant = rng.random_range(0..ASTEROID_VARIANTS);
        let position = Vec2::new(
            rng.random_range(0.0..width.max(1.0)),
            rng.random_range(0.0..height.max(1.0)),
        );
        let direction = rng.random_range(0.0..360.0);
        let velocity = rng.random_range(ASTEROID_MIN_VELOCITY..=ASTEROID_MAX_VELOCITY);
        let spin = rng.random_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN);
        Self::new(sheet, Sprite::Asteroid(variant), position, direction, velocity, spin)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Remove from play. Calling again has no effect.
    pub fn destroy(&mut self) {
        if !self.alive {
            return;
        }
        log::debug!("asteroid destroyed at {:?}", self.body.center());
        self.alive = false;
        self.active = false;
        self.body.visible = false;
    }

    pub fn update<R: Rng>(&mut self, frame: &Frame, rng: &mut R) {
        if !self.active {
            return;
        }
        self.body.advance(self.velocity, frame.scaled_dt);
        if self.body.wrap(frame.bounds) {
            self.body.direction = rng.random_range(0.0..360.0);
        }
        self.body.draw_position = self.body.center();
        self.body.draw_direction = wrap_degrees(self.body.draw_direction + self.spin * frame.scaled_dt);
    }
}
