//! Damage and invulnerability for ships
//!
//! Hits are requested from collision detection and consumed once per tick by
//! the owner's update. A hit that lands opens an invulnerability window; hits
//! requested inside the window are dropped.

use crate::consts::{FLICKER_INTERVAL, INVULNERABILITY_DURATION};

/// What the consumed hit did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullEvent {
    Unchanged,
    Damaged,
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct Hull {
    health: u32,
    pending_hit: bool,
    invulnerable: bool,
    hit_timer: f32,
    /// Blink while invulnerable
    flicker: bool,
    flicker_timer: f32,
}

impl Hull {
    pub fn new(health: u32, flicker: bool) -> Self {
        Self {
            health,
            pending_hit: false,
            invulnerable: false,
            hit_timer: 0.0,
            flicker,
            flicker_timer: 0.0,
        }
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Request a hit; applied on the next update at most once
    pub fn register_hit(&mut self) {
        self.pending_hit = true;
    }

    pub fn has_pending_hit(&self) -> bool {
        self.pending_hit
    }

    /// Consume the pending hit and run the invulnerability window.
    /// `visible` is the owner's draw flag, toggled while blinking.
    pub fn update(&mut self, dt: f32, visible: &mut bool) -> HullEvent {
        let mut event = HullEvent::Unchanged;

        if self.pending_hit && !self.invulnerable {
            self.health = self.health.saturating_sub(1);
            self.invulnerable = true;
            self.hit_timer = 0.0;
            self.flicker_timer = 0.0;
            event = if self.health == 0 {
                HullEvent::Destroyed
            } else {
                HullEvent::Damaged
            };
        }
        self.pending_hit = false;

        if self.invulnerable {
            if self.flicker {
                self.flicker_timer -= dt;
                if self.flicker_timer <= 0.0 {
                    *visible = !*visible;
                    self.flicker_timer += FLICKER_INTERVAL;
                }
            }
            self.hit_timer += dt;
            if self.hit_timer > INVULNERABILITY_DURATION {
                *visible = true;
                self.invulnerable = false;
                self.hit_timer = 0.0;
            }
        }

        event
    }
}
