//! Collision detection
//!
//! Runs once per tick after every actor has moved and hit geometry has been
//! rebuilt. Tests are point-in-rectangle: an actor's rotated collision points
//! against the target's axis-aligned hit box. The first point inside is
//! enough; responses only request hits, which owners consume on their next
//! update.

use super::geometry::Rect;
use super::world::World;
use glam::Vec2;

/// True if any point lies strictly inside `rect`
#[inline]
pub fn any_point_inside(points: &[Vec2], rect: &Rect) -> bool {
    points.iter().any(|&p| rect.contains(p))
}

/// Resolve every collision for this tick. Returns the score gained.
pub fn detect(world: &mut World) -> u32 {
    let World {
        player,
        enemies,
        asteroids,
        settings,
        score,
        ..
    } = world;
    let before = *score;

    for asteroid in asteroids.iter_mut().filter(|a| a.is_alive()) {
        let rect = asteroid.body.hit_rect();
        if player.is_alive() && any_point_inside(player.body.collision_points(), &rect) {
            log::debug!("player struck asteroid");
            player.hit();
        }
        for laser in player.lasers.iter_mut().filter(|l| l.in_flight()) {
            if any_point_inside(laser.body.collision_points(), &rect) {
                laser.hit();
                asteroid.destroy();
                *score += 1;
                break;
            }
        }
    }

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        let rect = enemy.body.hit_rect();
        if player.is_alive() && any_point_inside(player.body.collision_points(), &rect) {
            log::debug!("player rammed enemy");
            player.hit();
            enemy.hit();
        }
        for laser in player.lasers.iter_mut().filter(|l| l.in_flight()) {
            if any_point_inside(laser.body.collision_points(), &rect) {
                laser.hit();
                enemy.hit();
                *score += 1;
            }
        }
    }

    if settings.hostile_fire && player.is_alive() {
        let rect = player.body.hit_rect();
        for enemy in enemies.iter_mut() {
            for laser in enemy.lasers.iter_mut().filter(|l| l.in_flight()) {
                if any_point_inside(laser.body.collision_points(), &rect) {
                    log::debug!("player hit by enemy fire");
                    laser.hit();
                    player.hit();
                }
            }
        }
    }

    *score - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::sprites::SpriteSheet;
    use crate::sim::tick::TickInput;
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    fn world(asteroids: usize, enemy_health: u32) -> World {
        let settings = Settings {
            width: 800.0,
            height: 600.0,
            star_count: 0,
            asteroid_count: asteroids,
            enemy_count_min: 1,
            enemy_count_max: 1,
            enemy_health_min: enemy_health,
            enemy_health_max: enemy_health,
            ..Settings::default()
        };
        let mut world = World::new(Arc::new(SpriteSheet::standard()), settings, 17).expect("valid world");
        // Park everything away from the player
        for enemy in world.enemies_mut() {
            enemy.body.place(Vec2::new(20.0, 20.0), 0.0);
        }
        for asteroid in world.asteroids_mut() {
            asteroid.body.place(Vec2::new(700.0, 50.0), 0.0);
        }
        world
    }

    fn fire_player_laser_at(world: &mut World, slot: usize, target: Vec2) {
        if let Some(laser) = world.player_mut().lasers.get_mut(slot) {
            laser.fire(target, 0.0);
        }
    }

    #[test]
    fn test_any_point_inside_is_strict() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(any_point_inside(&[Vec2::new(20.0, 20.0), Vec2::new(5.0, 5.0)], &rect));
        assert!(!any_point_inside(&[Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0)], &rect));
        assert!(!any_point_inside(&[], &rect));
    }

    #[test]
    fn test_one_projectile_kills_one_health_enemy() {
        let mut world = world(0, 1);
        let center = world.enemies()[0].body.center();
        fire_player_laser_at(&mut world, 0, center);

        assert_eq!(detect(&mut world), 1);
        assert_eq!(world.score(), 1);
        assert!(world.player().lasers.iter().all(|l| !l.in_flight()));

        world.tick(&TickInput::default(), DT);
        let enemy = &world.enemies()[0];
        assert!(!enemy.is_alive());
        assert!(!enemy.is_active());
        assert!(!enemy.body.visible);
        assert_eq!(world.score(), 1);
    }

    #[test]
    fn test_projectile_destroys_asteroid_once() {
        let mut world = world(1, 3);
        let center = world.asteroids()[0].body.center();
        fire_player_laser_at(&mut world, 0, center);
        fire_player_laser_at(&mut world, 1, center);

        assert_eq!(detect(&mut world), 1);
        assert!(!world.asteroids()[0].is_alive());
        assert!(!world.asteroids()[0].body.visible);
        // The second shot passes through the wreck untouched
        assert_eq!(world.player().lasers.active_count(), 1);
    }

    #[test]
    fn test_dead_asteroid_ignores_projectiles() {
        let mut world = world(1, 3);
        world.asteroids_mut()[0].destroy();
        let center = world.asteroids()[0].body.center();
        fire_player_laser_at(&mut world, 0, center);

        assert_eq!(detect(&mut world), 0);
        assert_eq!(world.score(), 0);
        assert_eq!(world.player().lasers.active_count(), 1);
    }

    #[test]
    fn test_asteroid_contact_damages_player() {
        let mut world = world(1, 3);
        let center = world.player().body.center();
        world.asteroids_mut()[0].body.center_on(center);

        detect(&mut world);
        world.tick(&TickInput::default(), DT);
        assert_eq!(world.player().health(), crate::consts::PLAYER_MAX_HEALTH - 1);
        assert!(world.asteroids()[0].is_alive());
    }

    #[test]
    fn test_ramming_damages_both() {
        let mut world = world(0, 3);
        let center = world.player().body.center();
        world.enemies_mut()[0].body.center_on(center);

        detect(&mut world);
        world.tick(&TickInput::default(), DT);
        assert_eq!(world.player().health(), crate::consts::PLAYER_MAX_HEALTH - 1);
        assert_eq!(world.enemies()[0].health(), 2);
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn test_hostile_fire() {
        let mut world = world(0, 3);
        world.settings.hostile_fire = true;
        let center = world.player().body.center();
        if let Some(laser) = world.enemies_mut()[0].lasers.get_mut(0) {
            laser.fire(center, 90.0);
        }
        detect(&mut world);
        assert_eq!(world.enemies()[0].lasers.active_count(), 0);
        world.tick(&TickInput::default(), DT);
        assert_eq!(world.player().health(), crate::consts::PLAYER_MAX_HEALTH - 1);
    }

    #[test]
    fn test_hostile_fire_off_by_default() {
        let mut world = world(0, 3);
        assert!(!world.settings().hostile_fire);
        let center = world.player().body.center();
        if let Some(laser) = world.enemies_mut()[0].lasers.get_mut(0) {
            laser.fire(center, 90.0);
        }
        detect(&mut world);
        assert_eq!(world.enemies()[0].lasers.active_count(), 1);
    }

    #[test]
    fn test_dead_player_not_hit() {
        let mut world = world(1, 3);
        world.kill_player();
        let center = world.player().body.center();
        world.asteroids_mut()[0].body.center_on(center);
        detect(&mut world);
        assert_eq!(world.player().health(), crate::consts::PLAYER_MAX_HEALTH);
    }
}
