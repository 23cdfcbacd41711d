//! Explosion animations
//!
//! `explode` starts playback at frame 0. Each frame lasts `duration / frames`;
//! once the last frame has had its time the slot goes back to available.

use glam::Vec2;

use super::body::Body;
use super::pool::Reusable;
use super::sprites::{Sprite, SpriteSheet};
use crate::consts::EXPLOSION_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExplosionState {
    Available,
    Playing,
}

#[derive(Debug, Clone)]
pub struct Explosion {
    pub body: Body,
    frames: Vec<Sprite>,
    frame: usize,
    duration: f32,
    frame_duration: f32,
    elapsed: f32,
    state: ExplosionState,
}

impl Explosion {
    pub fn new(sheet: &SpriteSheet, frames: Vec<Sprite>, duration: f32) -> Self {
        let first = frames.first().copied().unwrap_or(Sprite::Explosion(0));
        let mut body = Body::new(sheet, first, Vec2::ZERO, 0.0);
        body.visible = false;
        Self {
            body,
            frames,
            frame: 0,
            duration,
            frame_duration: 0.0,
            elapsed: 0.0,
            state: ExplosionState::Available,
        }
    }

    /// The standard 64-frame explosion
    pub fn standard(sheet: &SpriteSheet) -> Self {
        Self::new(sheet, Sprite::explosion_sequence(), EXPLOSION_DURATION)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == ExplosionState::Playing
    }

    /// Index of the frame currently shown
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Start playback centered on `center`
    pub fn explode(&mut self, sheet: &SpriteSheet, center: Vec2, scale: f32) {
        if self.frames.is_empty() {
            return;
        }
        self.state = ExplosionState::Playing;
        self.frame = 0;
        self.elapsed = 0.0;
        self.frame_duration = self.duration / self.frames.len() as f32;
        self.body.set_sprite(sheet, self.frames[0]);
        self.body.scale = scale;
        self.body.visible = true;
        self.body.center_on(center);
    }

    /// Keep the animation anchored on its owner
    pub fn track(&mut self, center: Vec2) {
        if self.is_playing() {
            self.body.center_on(center);
        }
    }

    /// Advance playback by `dt` seconds
    pub fn update(&mut self, sheet: &SpriteSheet, dt: f32) {
        if self.state != ExplosionState::Playing {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.frame_duration {
            self.elapsed -= self.frame_duration;
            self.frame += 1;
            if self.frame >= self.frames.len() {
                self.finish();
                return;
            }
            // Frames may differ in size; keep the same center across the swap
            let center = self.body.center();
            self.body.set_sprite(sheet, self.frames[self.frame]);
            self.body.center_on(center);
        }
    }

    fn finish(&mut self) {
        self.state = ExplosionState::Available;
        self.frame = 0;
        self.elapsed = 0.0;
        self.body.visible = false;
        self.body.scale = 1.0;
    }
}

impl Reusable for Explosion {
    fn is_idle(&self) -> bool {
        self.state == ExplosionState::Available
    }
}
