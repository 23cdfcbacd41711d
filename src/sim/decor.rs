//! Background stars and HUD indicator actors
//!
//! None of these collide with anything.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Bounds};
use super::player::FireMode;
use super::sprites::{STAR_VARIANTS, Sprite, SpriteSheet};
use super::tick::Frame;
use crate::consts::*;

/// A background star drifting slowly down the screen
#[derive(Debug, Clone)]
pub struct Star {
    pub body: Body,
}

impl Star {
    pub fn new(sheet: &SpriteSheet, sprite: Sprite, position: Vec2) -> Self {
        let mut body = Body::new(sheet, sprite, position, 0.0);
        body.draw_position = body.center();
        Self { body }
    }

    pub fn random<R: Rng>(sheet: &SpriteSheet, bounds: Bounds, rng: &mut R) -> Self {
        let sprite = Sprite::Star(rng.random_range(0..STAR_VARIANTS));
        let position = Vec2::new(
            rng.random_range(0.0..bounds.width.max(1.0)),
            rng.random_range(0.0..bounds.height.max(1.0)),
        );
        Self::new(sheet, sprite, position)
    }

    /// Flip visibility (twinkle)
    pub fn twinkle(&mut self) {
        self.body.visible = !self.body.visible;
    }

    pub fn update(&mut self, frame: &Frame) {
        self.body.position.y += STAR_DRIFT * frame.scaled_dt;
        if self.body.position.y - self.body.offset().y > frame.bounds.height {
            self.body.position.y = -self.body.offset().y;
        }
        self.body.draw_position = self.body.center();
    }
}

/// Small ship icon, lit while the player's health exceeds its index
#[derive(Debug, Clone)]
pub struct HealthPip {
    pub body: Body,
    pub id: usize,
}

impl HealthPip {
    pub fn new(sheet: &SpriteSheet, id: usize) -> Self {
        Self {
            body: Body::new(sheet, Sprite::SmallShip, Vec2::ZERO, 0.0),
            id,
        }
    }

    /// Right to left from the bottom-right corner
    pub fn layout(&mut self, bounds: Bounds) {
        let size = self.body.size();
        let x = bounds.width - (self.id + 1) as f32 * HEALTH_PIP_SPACING;
        self.body.place(Vec2::new(x, bounds.height - size.y), 0.0);
        self.body.draw_position = self.body.center();
    }

    pub fn update(&mut self, health: u32) {
        self.body.visible = health as usize > self.id;
    }
}

/// Half-scale laser tick, lit up to the current fire mode's pip count
#[derive(Debug, Clone)]
pub struct FireModePip {
    pub body: Body,
    pub id: usize,
}

impl FireModePip {
    pub fn new(sheet: &SpriteSheet, id: usize) -> Self {
        let mut body = Body::new(sheet, Sprite::LaserGreen, Vec2::ZERO, 0.0);
        body.scale = FIRE_MODE_PIP_SCALE;
        Self { body, id }
    }

    /// One row above the health pips
    pub fn layout(&mut self, sheet: &SpriteSheet, bounds: Bounds) {
        let row = sheet.get(Sprite::SmallShip).source.height;
        let x = bounds.width - self.id as f32 * FIRE_MODE_PIP_SPACING - FIRE_MODE_PIP_SPACING;
        self.body.place(Vec2::new(x, bounds.height - row - HUD_ROW_GAP), 0.0);
        self.body.draw_position = self.body.center();
    }

    pub fn update(&mut self, mode: FireMode) {
        self.body.visible = self.id < mode.pip_count();
    }
}
