//! Projectiles
//!
//! A laser is either idle (hidden, parked at the origin, ready to fire) or in
//! flight along the facing it was fired with. Leaving the screen or hitting
//! something returns it to idle. Lasers are only ever owned by a pool.

use glam::Vec2;

use super::body::{Body, Bounds};
use super::pool::Reusable;
use super::sprites::{Sprite, SpriteSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaserState {
    Idle,
    InFlight,
}

#[derive(Debug, Clone)]
pub struct Laser {
    pub body: Body,
    pub velocity: f32,
    state: LaserState,
}

impl Laser {
    pub fn new(sheet: &SpriteSheet, sprite: Sprite, velocity: f32) -> Self {
        let mut body = Body::new(sheet, sprite, Vec2::ZERO, 0.0);
        body.visible = false;
        Self {
            body,
            velocity,
            state: LaserState::Idle,
        }
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        self.state == LaserState::InFlight
    }

    /// Launch with the sprite centered on `muzzle`, travelling along `direction`
    pub fn fire(&mut self, muzzle: Vec2, direction: f32) {
        self.body.place(muzzle - self.body.offset(), direction);
        self.body.sync_draw();
        self.body.visible = true;
        self.state = LaserState::InFlight;
    }

    /// Consume the shot
    pub fn hit(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = LaserState::Idle;
        self.body.visible = false;
        self.body.place(Vec2::ZERO, 0.0);
    }

    pub fn update(&mut self, scaled_dt: f32, bounds: Bounds) {
        if self.state != LaserState::InFlight {
            return;
        }
        self.body.advance(self.velocity, scaled_dt);
        self.body.sync_draw();
        if self.body.is_off_screen(bounds) {
            log::trace!("laser left the screen at {:?}", self.body.position);
            self.reset();
        }
    }
}

impl Reusable for Laser {
    fn is_idle(&self) -> bool {
        self.state == LaserState::Idle
    }
}
