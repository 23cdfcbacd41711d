//! The per-tick update pass
//!
//! The host samples its input devices into a [`TickInput`] once per frame and
//! hands it to [`tick`] along with the elapsed seconds. One pass: twinkle,
//! update every listed actor in order, rebuild hit geometry, refresh debug
//! markers, then resolve collisions against the post-move positions.

use std::sync::Arc;

use rand::Rng;

use super::body::Bounds;
use super::collision;
use super::sprites::SpriteSheet;
use super::world::{ActorId, World};
use crate::consts::{STAR_TWINKLE_PERIOD, TIME_SCALE};

/// Input commands for a single tick (held state, not edges)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Trigger held
    pub fire: bool,
    /// Cycles the fire mode on the press edge
    pub change_fire_mode: bool,
    /// Toggles debug markers on the press edge
    pub toggle_debug: bool,
}

/// Shared, read-only context for actor updates
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub sheet: &'a SpriteSheet,
    pub bounds: Bounds,
    /// Wall-clock seconds since the previous tick
    pub dt: f32,
    /// `dt * TIME_SCALE`, the multiplier for per-tick motion constants
    pub scaled_dt: f32,
}

impl<'a> Frame<'a> {
    pub fn new(sheet: &'a SpriteSheet, bounds: Bounds, dt: f32) -> Self {
        Self {
            sheet,
            bounds,
            dt,
            scaled_dt: dt * TIME_SCALE,
        }
    }
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    let sheet = Arc::clone(&world.sheet);
    let frame = Frame::new(&sheet, world.bounds, dt);

    if input.toggle_debug {
        if world.debug_switch_armed {
            world.debug_positions = !world.debug_positions;
            world.debug_switch_armed = false;
            log::debug!("debug positions {}", world.debug_positions);
        }
    } else {
        world.debug_switch_armed = true;
    }

    if world.ticks % STAR_TWINKLE_PERIOD as u64 == 0 && !world.stars.is_empty() {
        let index = world.rng.random_range(0..world.stars.len());
        world.stars[index].twinkle();
    }
    world.ticks += 1;

    for i in 0..world.actors.len() {
        let id = world.actors[i];
        update_actor(world, id, &frame, input);
    }

    world.refresh_geometry();
    if world.debug_positions {
        world.update_debug_markers();
    }
    collision::detect(world);
}

fn update_actor(world: &mut World, id: ActorId, frame: &Frame, input: &TickInput) {
    match id {
        ActorId::Star(i) => {
            if let Some(star) = world.stars.get_mut(i) {
                star.update(frame);
            }
        }
        ActorId::Player => world.player.update(frame, input),
        ActorId::PlayerLaser(i) => {
            if let Some(laser) = world.player.lasers.get_mut(i) {
                laser.update(frame.scaled_dt, frame.bounds);
            }
        }
        ActorId::PlayerExplosion(i) => {
            if let Some(explosion) = world.player.explosions.get_mut(i) {
                explosion.update(frame.sheet, frame.dt);
            }
        }
        ActorId::Enemy(i) => {
            let target = world.player.body.center();
            if let Some(enemy) = world.enemies.get_mut(i) {
                enemy.update(frame, target, &mut world.rng);
            }
        }
        ActorId::EnemyLaser { enemy, slot } => {
            if let Some(laser) = world.enemies.get_mut(enemy).and_then(|e| e.lasers.get_mut(slot)) {
                laser.update(frame.scaled_dt, frame.bounds);
            }
        }
        ActorId::EnemyExplosion { enemy, slot } => {
            if let Some(explosion) = world.enemies.get_mut(enemy).and_then(|e| e.explosions.get_mut(slot)) {
                explosion.update(frame.sheet, frame.dt);
            }
        }
        ActorId::HealthPip(i) => {
            let health = world.player.health();
            if let Some(pip) = world.health_pips.get_mut(i) {
                pip.update(health);
            }
        }
        ActorId::FireModePip(i) => {
            let mode = world.player.fire_mode();
            if let Some(pip) = world.fire_mode_pips.get_mut(i) {
                pip.update(mode);
            }
        }
        ActorId::Asteroid(i) => {
            if let Some(asteroid) = world.asteroids.get_mut(i) {
                asteroid.update(frame, &mut world.rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn world(seed: u64) -> World {
        let settings = Settings {
            width: 800.0,
            height: 600.0,
            star_count: 30,
            asteroid_count: 0,
            enemy_count_min: 1,
            enemy_count_max: 1,
            ..Settings::default()
        };
        World::new(Arc::new(SpriteSheet::standard()), settings, seed).expect("valid world")
    }

    #[test]
    fn test_scaled_dt() {
        let sheet = SpriteSheet::standard();
        let frame = Frame::new(&sheet, Bounds::new(10.0, 10.0), 0.02);
        assert!((frame.scaled_dt - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_default_input_is_idle() {
        let input = TickInput::default();
        assert!(!input.fire && !input.thrust_forward && !input.toggle_debug);
    }

    #[test]
    fn test_tick_moves_player_along_facing() {
        let mut world = world(1);
        world.player_mut().set_velocity(5.0);
        let start = world.player().body.position;
        world.tick(&TickInput::default(), 1.0 / TIME_SCALE);
        let moved = world.player().body.position - start;
        assert!((moved.x - 5.0).abs() < 1e-3);
        assert_eq!(moved.y, 0.0);
        assert_eq!(world.ticks(), 1);
    }

    #[test]
    fn test_first_tick_twinkles_one_star() {
        let mut world = world(2);
        world.tick(&TickInput::default(), DT);
        assert_eq!(world.stars().iter().filter(|s| !s.body.visible).count(), 1);
        for _ in 0..STAR_TWINKLE_PERIOD {
            world.tick(&TickInput::default(), DT);
        }
        let hidden = world.stars().iter().filter(|s| !s.body.visible).count();
        assert!(hidden == 0 || hidden == 2);
    }

    #[test]
    fn test_toggle_debug_on_press_edge() {
        let mut world = world(3);
        let press = TickInput {
            toggle_debug: true,
            ..TickInput::default()
        };
        world.tick(&press, DT);
        world.tick(&press, DT);
        assert!(world.debug_positions());
        assert!(!world.debug_markers().is_empty());

        world.tick(&TickInput::default(), DT);
        world.tick(&press, DT);
        assert!(!world.debug_positions());
    }

    #[test]
    fn test_fired_laser_flies_in_later_ticks() {
        let mut world = world(4);
        world.enemies_mut()[0].body.place(Vec2::new(10.0, 10.0), 0.0);
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        world.tick(&fire, DT);
        let laser = world.player().lasers.iter().find(|l| l.in_flight()).map(|l| l.body.center());
        let Some(start) = laser else {
            panic!("no laser in flight");
        };
        world.tick(&TickInput::default(), DT);
        let now = world
            .player()
            .lasers
            .iter()
            .find(|l| l.in_flight())
            .map(|l| l.body.center())
            .unwrap_or(Vec2::ZERO);
        assert!(now.x > start.x);
    }

    #[test]
    fn test_enemy_bearing_measured_to_player_center() {
        let mut world = world(5);
        world.enemies_mut()[0].body.place(Vec2::new(100.0, 100.0), 0.0);
        world.player_mut().body.center_on(Vec2::new(100.0, 400.0));
        world.tick(&TickInput::default(), 1e-6);
        assert_eq!(world.enemies()[0].player_bearing(), 90.0);
    }
}
