//! The player's ship
//!
//! Per tick, in order: integrate motion and wrap, read input (thrust, turn,
//! fire-mode edge, trigger), fire from the laser pool, then consume any
//! pending hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::explosion::Explosion;
use super::hull::{Hull, HullEvent};
use super::laser::Laser;
use super::pool::Pool;
use super::sprites::{Sprite, SpriteSheet};
use super::tick::{Frame, TickInput};
use crate::consts::*;
use crate::heading;

/// Trigger behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    /// One shot per trigger press
    #[default]
    SemiAutomatic,
    /// A fixed burst per press, then locked until release
    BurstFire,
    /// Repeats at a fixed interval while held
    Automatic,
}

impl FireMode {
    pub fn next(self) -> Self {
        match self {
            FireMode::SemiAutomatic => FireMode::BurstFire,
            FireMode::BurstFire => FireMode::Automatic,
            FireMode::Automatic => FireMode::SemiAutomatic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FireMode::SemiAutomatic => "Semi-Automatic",
            FireMode::BurstFire => "Burst Fire",
            FireMode::Automatic => "Automatic",
        }
    }

    /// How many HUD pips light up for this mode
    pub fn pip_count(&self) -> usize {
        match self {
            FireMode::SemiAutomatic => 1,
            FireMode::BurstFire => 5,
            FireMode::Automatic => 10,
        }
    }
}

/// Shot timing state; reset on every fire-mode change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    /// Trigger may fire (cleared by a semi-auto shot or a finished burst)
    pub armed: bool,
    /// Seconds accumulated toward the next burst/automatic shot
    pub shot_timer: f32,
    /// Shots fired in the current burst
    pub shot_count: u32,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            armed: true,
            shot_timer: 0.0,
            shot_count: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub lasers: Pool<Laser>,
    pub explosions: Pool<Explosion>,
    hull: Hull,
    alive: bool,
    active: bool,
    fire_mode: FireMode,
    trigger: Trigger,
    mode_switch_armed: bool,
    velocity: f32,
}

impl Player {
    pub fn new(sheet: &SpriteSheet, position: Vec2, health: u32, laser_count: usize) -> Self {
        Self {
            body: Body::new(sheet, Sprite::Ship, position, 0.0),
            lasers: Pool::new(laser_count, || Laser::new(sheet, Sprite::LaserGreen, LASER_VELOCITY)),
            explosions: Pool::new(PLAYER_EXPLOSION_COUNT, || Explosion::standard(sheet)),
            hull: Hull::new(health, true),
            alive: true,
            active: true,
            fire_mode: FireMode::default(),
            trigger: Trigger::default(),
            mode_switch_armed: true,
            velocity: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health(&self) -> u32 {
        self.hull.health()
    }

    pub fn fire_mode(&self) -> FireMode {
        self.fire_mode
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity.clamp(PLAYER_MIN_VELOCITY, PLAYER_MAX_VELOCITY);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hull.is_invulnerable()
    }

    /// Request a hit, applied on the next update
    pub fn hit(&mut self) {
        if self.alive {
            self.hull.register_hit();
        }
    }

    /// Remove from play for good
    pub fn destroy(&mut self) {
        self.alive = false;
        self.active = false;
        self.body.visible = false;
    }

    /// Where lasers leave the ship
    pub fn muzzle(&self) -> Vec2 {
        self.body.center() + heading(self.body.direction) * (self.body.size().y / 2.0)
    }

    pub fn update(&mut self, frame: &Frame, input: &TickInput) {
        if !(self.active && self.alive) {
            return;
        }
        self.update_movement(frame);
        let fire = self.update_input(frame, input);
        if fire {
            self.fire();
        }
        self.update_health(frame);
    }

    fn update_movement(&mut self, frame: &Frame) {
        self.velocity = self.velocity.clamp(PLAYER_MIN_VELOCITY, PLAYER_MAX_VELOCITY);
        self.body.advance(self.velocity, frame.scaled_dt);
        self.body.wrap(frame.bounds);
        self.body.sync_draw();
    }

    /// Apply thrust/turn and run the trigger. Returns true on a firing tick.
    fn update_input(&mut self, frame: &Frame, input: &TickInput) -> bool {
        let step = frame.scaled_dt;
        if input.thrust_forward {
            self.velocity += PLAYER_ACCELERATION * step;
        }
        if input.thrust_backward {
            self.velocity -= PLAYER_ACCELERATION * step;
        }
        self.velocity = self.velocity.clamp(PLAYER_MIN_VELOCITY, PLAYER_MAX_VELOCITY);
        if input.turn_left {
            self.body.turn(-PLAYER_TURN_RATE * step);
        }
        if input.turn_right {
            self.body.turn(PLAYER_TURN_RATE * step);
        }

        if input.change_fire_mode {
            if self.mode_switch_armed {
                self.cycle_fire_mode();
            }
        } else {
            self.mode_switch_armed = true;
        }

        if !input.fire {
            self.trigger.shot_count = 0;
            self.trigger.armed = true;
            return false;
        }

        let trigger = &mut self.trigger;
        match self.fire_mode {
            FireMode::SemiAutomatic => {
                if trigger.armed {
                    trigger.armed = false;
                    return true;
                }
            }
            FireMode::BurstFire => {
                trigger.shot_timer += frame.dt;
                if trigger.shot_timer >= BURST_INTERVAL && trigger.armed {
                    trigger.shot_count += 1;
                    if trigger.shot_count >= BURST_SHOT_COUNT {
                        trigger.armed = false;
                    }
                    trigger.shot_timer = 0.0;
                    return true;
                }
            }
            FireMode::Automatic => {
                trigger.shot_timer += frame.dt;
                if trigger.shot_timer >= AUTOMATIC_INTERVAL {
                    trigger.shot_timer = 0.0;
                    return true;
                }
            }
        }
        false
    }

    /// Advance to the next fire mode and reset shot timing
    pub fn cycle_fire_mode(&mut self) {
        self.fire_mode = self.fire_mode.next();
        self.trigger = Trigger::default();
        self.mode_switch_armed = false;
        log::debug!("fire mode -> {}", self.fire_mode.as_str());
    }

    /// Launch the first idle laser. Dropped silently if the pool is exhausted.
    pub fn fire(&mut self) -> bool {
        let muzzle = self.muzzle();
        let direction = self.body.direction;
        match self.lasers.acquire() {
            Some((_, laser)) => {
                laser.fire(muzzle, direction);
                true
            }
            None => {
                log::trace!("player fire dropped: no idle laser");
                false
            }
        }
    }

    fn update_health(&mut self, frame: &Frame) {
        let event = self.hull.update(frame.dt, &mut self.body.visible);
        if event != HullEvent::Unchanged {
            let scale = if event == HullEvent::Destroyed {
                TERMINAL_EXPLOSION_SCALE
            } else {
                1.0
            };
            let center = self.body.center();
            match self.explosions.acquire() {
                Some((_, explosion)) => explosion.explode(frame.sheet, center, scale),
                None => log::debug!("player hit without a free explosion slot"),
            }
            log::debug!("player hit, health {}", self.hull.health());
        }

        let center = self.body.center();
        for explosion in self.explosions.iter_mut() {
            explosion.track(center);
        }

        if event == HullEvent::Destroyed {
            log::info!("player destroyed");
            self.destroy();
        }
    }
}
