//! Enemy ships
//!
//! Enemies fly at a constant speed and alternate between pursuing the player
//! and breaking off. While pursuing they steer toward the player's bearing;
//! inside the disengage distance they pick a random turn direction, hold it
//! briefly, coast, and re-engage after a random cooldown.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::explosion::Explosion;
use super::geometry::RotatedRect;
use super::hull::{Hull, HullEvent};
use super::laser::Laser;
use super::pool::Pool;
use super::sprites::{Sprite, SpriteSheet};
use super::tick::Frame;
use crate::consts::*;
use crate::{delta_degrees, heading, wrap_degrees};

/// Bearing in degrees from an offset vector, using the arctangent of y/x
/// shifted by 180° when x is negative. The result lies in (-90, 270).
///
/// A vertical offset has no slope; it maps to 90° (below) or 270° (above).
/// A zero offset maps to 0°.
pub fn bearing(offset: Vec2) -> f32 {
    if offset.x == 0.0 {
        return if offset.y > 0.0 {
            90.0
        } else if offset.y < 0.0 {
            270.0
        } else {
            0.0
        };
    }
    let slope = (offset.y / offset.x).atan().to_degrees();
    if offset.x < 0.0 { slope + 180.0 } else { slope }
}

/// Pursuit sub-state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pursuit {
    /// Steering toward the player
    Pursuing,
    /// Broke off: turning for a short window, then coasting until `cooldown` elapses
    Disengaging {
        /// +1 or -1
        turn: f32,
        /// Seconds since breaking off
        elapsed: f32,
        /// Seconds until pursuit resumes
        cooldown: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub lasers: Pool<Laser>,
    pub explosions: Pool<Explosion>,
    hull: Hull,
    alive: bool,
    active: bool,
    velocity: f32,
    /// Whether this enemy chases the player at all
    pub follows_player: bool,
    pursuit: Pursuit,
    player_bearing: f32,
    fire_timer: f32,
}

impl Enemy {
    pub fn new(sheet: &SpriteSheet, position: Vec2, health: u32, velocity: f32) -> Self {
        Self {
            body: Body::new(sheet, Sprite::Enemy, position, 0.0),
            lasers: Pool::new(ENEMY_LASER_COUNT, || Laser::new(sheet, Sprite::LaserRed, LASER_VELOCITY)),
            explosions: Pool::new(ENEMY_EXPLOSION_COUNT, || Explosion::standard(sheet)),
            hull: Hull::new(health, false),
            alive: true,
            active: true,
            velocity,
            follows_player: true,
            pursuit: Pursuit::Pursuing,
            player_bearing: 0.0,
            fire_timer: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn health(&self) -> u32 {
        self.hull.health()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn pursuit(&self) -> Pursuit {
        self.pursuit
    }

    /// Last computed bearing to the player (see [`bearing`])
    pub fn player_bearing(&self) -> f32 {
        self.player_bearing
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hull.is_invulnerable()
    }

    /// Hit box rotated to the render angle, for debug display
    pub fn rotated_hit_rect(&self) -> RotatedRect {
        RotatedRect::new(&self.body.hit_rect(), self.body.draw_direction.to_radians())
    }

    /// Request a hit, applied on the next update
    pub fn hit(&mut self) {
        if self.alive {
            self.hull.register_hit();
        }
    }

    pub fn destroy(&mut self) {
        self.alive = false;
        self.active = false;
        self.body.visible = false;
    }

    /// Where lasers leave the ship
    pub fn muzzle(&self) -> Vec2 {
        self.body.center() + heading(self.body.direction) * ENEMY_MUZZLE_OFFSET
    }

    /// `target` is the player's center; bearing and range are measured from
    /// this enemy's anchor.
    pub fn update<R: Rng>(&mut self, frame: &Frame, target: Vec2, rng: &mut R) {
        if !self.active {
            return;
        }
        self.update_movement(frame, target, rng);
        self.update_hit(frame);
        self.update_lasers(frame);
        if self.hull.health() == 0 {
            log::debug!("enemy destroyed at {:?}", self.body.center());
            self.destroy();
        }
    }

    fn update_movement<R: Rng>(&mut self, frame: &Frame, target: Vec2, rng: &mut R) {
        let offset = target - self.body.position;
        let distance = offset.length();
        self.player_bearing = bearing(offset);
        let step = frame.scaled_dt;

        if self.follows_player {
            self.pursuit = match self.pursuit {
                Pursuit::Pursuing => {
                    let diff = delta_degrees(self.body.direction, wrap_degrees(self.player_bearing));
                    let turn = (ENEMY_TURN_RATE * step).min(diff.abs());
                    self.body.turn(turn.copysign(diff));
                    if distance < ENEMY_DISENGAGE_DISTANCE {
                        let extra = rng.random_range(ENEMY_REENGAGE_EXTRA_MIN..=ENEMY_REENGAGE_EXTRA_MAX);
                        Pursuit::Disengaging {
                            turn: if rng.random_bool(0.5) { -1.0 } else { 1.0 },
                            elapsed: 0.0,
                            cooldown: ENEMY_REENGAGE_BASE + extra as f32,
                        }
                    } else {
                        Pursuit::Pursuing
                    }
                }
                Pursuit::Disengaging {
                    turn,
                    elapsed,
                    cooldown,
                } => {
                    if elapsed < ENEMY_DISENGAGE_TURN_WINDOW {
                        self.body.turn(turn * ENEMY_TURN_RATE * step);
                    }
                    if elapsed > cooldown {
                        Pursuit::Pursuing
                    } else {
                        Pursuit::Disengaging {
                            turn,
                            elapsed: elapsed + frame.dt,
                            cooldown,
                        }
                    }
                }
            };
        }

        self.body.advance(self.velocity, step);
        self.body.sync_draw();
    }

    fn update_hit(&mut self, frame: &Frame) {
        let event = self.hull.update(frame.dt, &mut self.body.visible);
        if event != HullEvent::Unchanged {
            let scale = if event == HullEvent::Destroyed {
                TERMINAL_EXPLOSION_SCALE
            } else {
                1.0
            };
            let center = self.body.center();
            if let Some((_, explosion)) = self.explosions.acquire() {
                explosion.explode(frame.sheet, center, scale);
            }
        }
        let center = self.body.center();
        for explosion in self.explosions.iter_mut() {
            explosion.track(center);
        }
    }

    fn update_lasers(&mut self, frame: &Frame) {
        self.fire_timer += frame.dt;
        if self.fire_timer > ENEMY_FIRE_INTERVAL {
            // Compares magnitudes of the two angles, not their difference
            if self.player_bearing.abs() - self.body.direction.abs() < ENEMY_FIRE_BEARING {
                self.fire();
            }
            self.fire_timer = 0.0;
        }
    }

    /// Launch the first idle laser along the current facing
    pub fn fire(&mut self) -> bool {
        let muzzle = self.muzzle();
        let direction = self.body.direction;
        match self.lasers.acquire() {
            Some((_, laser)) => {
                laser.fire(muzzle, direction);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn frame(sheet: &SpriteSheet, dt: f32) -> Frame<'_> {
        Frame::new(sheet, Bounds::new(800.0, 600.0), dt)
    }

    #[test]
    fn test_bearing_quadrants() {
        assert!((bearing(Vec2::new(1.0, 0.0)) - 0.0).abs() < 1e-4);
        assert!((bearing(Vec2::new(1.0, 1.0)) - 45.0).abs() < 1e-4);
        assert!((bearing(Vec2::new(-1.0, 1.0)) - 135.0).abs() < 1e-4);
        assert!((bearing(Vec2::new(-1.0, -1.0)) - 225.0).abs() < 1e-4);
        assert!((bearing(Vec2::new(1.0, -1.0)) + 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_bearing_degenerate_offsets() {
        assert_eq!(bearing(Vec2::new(0.0, 5.0)), 90.0);
        assert_eq!(bearing(Vec2::new(0.0, -5.0)), 270.0);
        assert_eq!(bearing(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_pursuit_steers_toward_player() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 3, 0.0);
        // Player straight below: bearing 90
        let player = Vec2::new(100.0, 400.0);
        for _ in 0..200 {
            enemy.update(&frame(&sheet, DT), player, &mut rng);
        }
        assert!((enemy.body.direction - 90.0).abs() < 1e-3);
        assert_eq!(enemy.pursuit(), Pursuit::Pursuing);
    }

    #[test]
    fn test_close_range_disengages_then_reengages() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 3, 0.0);
        let player = Vec2::new(130.0, 100.0);

        enemy.update(&frame(&sheet, DT), player, &mut rng);
        let Pursuit::Disengaging { turn, cooldown, .. } = enemy.pursuit() else {
            panic!("expected disengage inside {ENEMY_DISENGAGE_DISTANCE}");
        };
        assert!(turn == 1.0 || turn == -1.0);
        let min = ENEMY_REENGAGE_BASE + ENEMY_REENGAGE_EXTRA_MIN as f32;
        let max = ENEMY_REENGAGE_BASE + ENEMY_REENGAGE_EXTRA_MAX as f32;
        assert!((min..=max).contains(&cooldown));

        // Turning stops after the turn window
        let far = Vec2::new(700.0, 500.0);
        for _ in 0..((ENEMY_DISENGAGE_TURN_WINDOW / DT) as usize + 5) {
            enemy.update(&frame(&sheet, DT), far, &mut rng);
        }
        let coasting = enemy.body.direction;
        enemy.update(&frame(&sheet, DT), far, &mut rng);
        assert_eq!(enemy.body.direction, coasting);

        for _ in 0..((max / DT) as usize + 5) {
            enemy.update(&frame(&sheet, DT), far, &mut rng);
        }
        assert_eq!(enemy.pursuit(), Pursuit::Pursuing);
    }

    #[test]
    fn test_fires_on_interval_when_bearing_check_passes() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 3, 0.0);
        let player = Vec2::new(500.0, 120.0);

        enemy.update(&frame(&sheet, 0.5), player, &mut rng);
        assert_eq!(enemy.lasers.active_count(), 0);
        enemy.update(&frame(&sheet, 0.6), player, &mut rng);
        assert_eq!(enemy.lasers.active_count(), 1);
    }

    #[test]
    fn test_single_hit_kills_one_health_enemy() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 1, 3.0);
        enemy.hit();
        enemy.update(&frame(&sheet, DT), Vec2::new(600.0, 500.0), &mut rng);
        assert!(!enemy.is_alive());
        assert!(!enemy.is_active());
        assert!(!enemy.body.visible);
        assert_eq!(enemy.explosions.active_count(), 1);
    }

    #[test]
    fn test_hits_inside_window_ignored() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 3, 0.0);
        for _ in 0..30 {
            enemy.hit();
            enemy.update(&frame(&sheet, DT), Vec2::new(600.0, 500.0), &mut rng);
        }
        assert_eq!(enemy.health(), 2);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_every_playing_explosion_follows_enemy() {
        let sheet = SpriteSheet::standard();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(&sheet, Vec2::new(100.0, 100.0), 3, 3.0);
        for _ in 0..ENEMY_EXPLOSION_COUNT {
            if let Some((_, explosion)) = enemy.explosions.acquire() {
                explosion.explode(&sheet, enemy.body.center(), 1.0);
            }
        }
        let start = enemy.body.center();
        enemy.update(&frame(&sheet, DT), Vec2::new(600.0, 500.0), &mut rng);
        let center = enemy.body.center();
        assert_ne!(center, start);
        for explosion in enemy.explosions.iter() {
            assert!(explosion.is_playing());
            assert!((explosion.body.center() - center).length() < 1e-3);
        }
    }
}
