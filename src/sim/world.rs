//! World construction and the flat actor list
//!
//! The world owns every actor. Pooled lasers and explosions stay inside their
//! owning ship; the flat list holds [`ActorId`]s that index into the owners, so
//! each actor is updated and drawn exactly once per tick, in list order.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::body::{Body, Bounds};
use super::decor::{FireModePip, HealthPip, Star};
use super::enemy::Enemy;
use super::player::{FireMode, Player};
use super::sprites::SpriteSheet;
use super::tick::{TickInput, tick};
use crate::consts::*;
use crate::error::SimError;
use crate::render::SpriteInstance;
use crate::settings::Settings;

/// Handle into the world's actor collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorId {
    Star(usize),
    Player,
    PlayerLaser(usize),
    PlayerExplosion(usize),
    Enemy(usize),
    EnemyLaser { enemy: usize, slot: usize },
    EnemyExplosion { enemy: usize, slot: usize },
    HealthPip(usize),
    FireModePip(usize),
    Asteroid(usize),
}

/// HUD readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub fire_mode: FireMode,
    pub score: u32,
    pub alive: bool,
}

pub struct World {
    pub(crate) sheet: Arc<SpriteSheet>,
    pub(crate) settings: Settings,
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) bounds: Bounds,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) asteroids: Vec<Asteroid>,
    pub(crate) stars: Vec<Star>,
    pub(crate) health_pips: Vec<HealthPip>,
    pub(crate) fire_mode_pips: Vec<FireModePip>,
    /// Update/draw order
    pub(crate) actors: Vec<ActorId>,
    pub(crate) score: u32,
    /// Ticks run since construction
    pub(crate) ticks: u64,
    pub(crate) debug_positions: bool,
    pub(crate) debug_switch_armed: bool,
    pub(crate) debug_markers: Vec<Vec2>,
}

impl World {
    /// Validate inputs and spawn the initial population
    pub fn new(sheet: Arc<SpriteSheet>, settings: Settings, seed: u64) -> Result<Self, SimError> {
        sheet.validate()?;
        settings.validate()?;
        Ok(Self::spawn(sheet, settings, seed))
    }

    fn spawn(sheet: Arc<SpriteSheet>, settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Bounds::new(settings.width, settings.height);

        let player = Player::new(
            &sheet,
            Vec2::new(bounds.width / 2.0, bounds.height / 2.0),
            PLAYER_MAX_HEALTH,
            settings.max_laser_count,
        );

        let enemy_count = rng.random_range(settings.enemy_count_min..=settings.enemy_count_max);
        let enemies: Vec<Enemy> = (0..enemy_count)
            .map(|_| {
                let position = Vec2::new(
                    rng.random_range(0.0..bounds.width.max(1.0)),
                    rng.random_range(0.0..bounds.height.max(1.0)),
                );
                let health = rng.random_range(settings.enemy_health_min..=settings.enemy_health_max);
                let velocity = rng.random_range(settings.enemy_velocity_min..=settings.enemy_velocity_max);
                Enemy::new(&sheet, position, health, velocity)
            })
            .collect();

        let health_pips = (0..PLAYER_MAX_HEALTH as usize)
            .map(|i| HealthPip::new(&sheet, i))
            .collect();
        let fire_mode_pips = (0..FIRE_MODE_PIP_COUNT)
            .map(|i| FireModePip::new(&sheet, i))
            .collect();

        let asteroids = (0..settings.asteroid_count)
            .map(|_| Asteroid::random(&sheet, bounds.width, bounds.height, &mut rng))
            .collect();

        let mut world = Self {
            sheet,
            debug_positions: settings.debug_positions,
            settings,
            seed,
            rng,
            bounds,
            player,
            enemies,
            asteroids,
            stars: Vec::new(),
            health_pips,
            fire_mode_pips,
            actors: Vec::new(),
            score: 0,
            ticks: 0,
            debug_switch_armed: true,
            debug_markers: Vec::new(),
        };
        world.rebuild_actor_list();
        world.regenerate_stars(world.settings.star_count);
        world.layout_hud();
        world.refresh_geometry();
        if world.debug_positions {
            world.update_debug_markers();
        }

        log::info!(
            "world spawned: seed={} enemies={} asteroids={} stars={}",
            seed,
            world.enemies.len(),
            world.asteroids.len(),
            world.stars.len()
        );
        world
    }

    /// Everything except stars, in draw order
    fn rebuild_actor_list(&mut self) {
        let actors = &mut self.actors;
        actors.clear();
        actors.extend((0..self.player.lasers.capacity()).map(ActorId::PlayerLaser));
        actors.push(ActorId::Player);
        actors.extend((0..self.player.explosions.capacity()).map(ActorId::PlayerExplosion));
        actors.extend((0..self.enemies.len()).map(ActorId::Enemy));
        for (enemy, ship) in self.enemies.iter().enumerate() {
            actors.extend((0..ship.explosions.capacity()).map(|slot| ActorId::EnemyExplosion { enemy, slot }));
            actors.extend((0..ship.lasers.capacity()).map(|slot| ActorId::EnemyLaser { enemy, slot }));
        }
        actors.extend((0..self.health_pips.len()).map(ActorId::HealthPip));
        actors.extend((0..self.fire_mode_pips.len()).map(ActorId::FireModePip));
        actors.extend((0..self.asteroids.len()).map(ActorId::Asteroid));
    }

    /// Replace the star field with `count` fresh stars at the back of the draw order
    pub fn regenerate_stars(&mut self, count: usize) {
        self.actors.retain(|id| !matches!(id, ActorId::Star(_)));
        let bounds = self.bounds;
        let sheet = Arc::clone(&self.sheet);
        self.stars = (0..count).map(|_| Star::random(&sheet, bounds, &mut self.rng)).collect();
        self.actors.splice(0..0, (0..count).map(ActorId::Star));
        self.settings.star_count = count;
        log::info!("star field regenerated: {count} stars");
    }

    /// Resize the play area; HUD indicators follow the bottom-right corner.
    /// Extents below 1 or non-finite are held at 1.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        let width = playable_extent(width);
        let height = playable_extent(height);
        if (width, height) != (self.bounds.width, self.bounds.height) {
            log::debug!("play area resized to {width}x{height}");
        }
        self.bounds = Bounds::new(width, height);
        self.settings.width = width;
        self.settings.height = height;
        self.layout_hud();
    }

    fn layout_hud(&mut self) {
        let bounds = self.bounds;
        for pip in &mut self.health_pips {
            pip.layout(bounds);
            pip.update(self.player.health());
        }
        for pip in &mut self.fire_mode_pips {
            pip.layout(&self.sheet, bounds);
            pip.update(self.player.fire_mode());
        }
    }

    /// Advance one tick of `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }

    /// Rebuild from the original seed and settings
    pub fn restart(&mut self) {
        self.restart_with_seed(self.seed);
    }

    pub fn restart_with_seed(&mut self, seed: u64) {
        log::info!("world restart: seed={seed}");
        let sheet = Arc::clone(&self.sheet);
        let settings = self.settings.clone();
        *self = Self::spawn(sheet, settings, seed);
    }

    pub fn kill_player(&mut self) {
        log::debug!("player killed");
        self.player.destroy();
    }

    /// Rebuild world-space hit geometry for every actor
    pub(crate) fn refresh_geometry(&mut self) {
        for body in self.bodies_mut() {
            body.refresh_geometry();
        }
    }

    fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        let player = &mut self.player;
        std::iter::once(&mut player.body)
            .chain(player.lasers.iter_mut().map(|l| &mut l.body))
            .chain(player.explosions.iter_mut().map(|e| &mut e.body))
            .chain(self.enemies.iter_mut().flat_map(|enemy| {
                std::iter::once(&mut enemy.body)
                    .chain(enemy.lasers.iter_mut().map(|l| &mut l.body))
                    .chain(enemy.explosions.iter_mut().map(|e| &mut e.body))
            }))
            .chain(self.asteroids.iter_mut().map(|a| &mut a.body))
            .chain(self.stars.iter_mut().map(|s| &mut s.body))
            .chain(self.health_pips.iter_mut().map(|p| &mut p.body))
            .chain(self.fire_mode_pips.iter_mut().map(|p| &mut p.body))
    }

    /// Player collision points, the player anchor, then the four rotated
    /// hit-box corners of every enemy
    pub(crate) fn update_debug_markers(&mut self) {
        self.debug_markers.clear();
        self.debug_markers.extend_from_slice(self.player.body.collision_points());
        self.debug_markers.push(self.player.body.position);
        for enemy in &self.enemies {
            self.debug_markers.extend(enemy.rotated_hit_rect().corners());
        }
    }

    /// Body behind an id, if the id is live
    pub fn body(&self, id: ActorId) -> Option<&Body> {
        match id {
            ActorId::Star(i) => self.stars.get(i).map(|s| &s.body),
            ActorId::Player => Some(&self.player.body),
            ActorId::PlayerLaser(i) => self.player.lasers.get(i).map(|l| &l.body),
            ActorId::PlayerExplosion(i) => self.player.explosions.get(i).map(|e| &e.body),
            ActorId::Enemy(i) => self.enemies.get(i).map(|e| &e.body),
            ActorId::EnemyLaser { enemy, slot } => self
                .enemies
                .get(enemy)
                .and_then(|e| e.lasers.get(slot))
                .map(|l| &l.body),
            ActorId::EnemyExplosion { enemy, slot } => self
                .enemies
                .get(enemy)
                .and_then(|e| e.explosions.get(slot))
                .map(|x| &x.body),
            ActorId::HealthPip(i) => self.health_pips.get(i).map(|p| &p.body),
            ActorId::FireModePip(i) => self.fire_mode_pips.get(i).map(|p| &p.body),
            ActorId::Asteroid(i) => self.asteroids.get(i).map(|a| &a.body),
        }
    }

    /// One instance per visible actor, in draw order
    pub fn sprite_instances(&self) -> Vec<SpriteInstance> {
        self.actors
            .iter()
            .filter_map(|&id| self.body(id))
            .filter(|body| body.visible)
            .map(|body| SpriteInstance::from_body(&self.sheet, body))
            .collect()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            health: self.player.health(),
            max_health: PLAYER_MAX_HEALTH,
            fire_mode: self.player.fire_mode(),
            score: self.score,
            alive: self.player.is_alive(),
        }
    }

    #[inline]
    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn asteroids_mut(&mut self) -> &mut [Asteroid] {
        &mut self.asteroids
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn health_pips(&self) -> &[HealthPip] {
        &self.health_pips
    }

    pub fn fire_mode_pips(&self) -> &[FireModePip] {
        &self.fire_mode_pips
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn debug_positions(&self) -> bool {
        self.debug_positions
    }

    pub fn set_debug_positions(&mut self, enabled: bool) {
        self.debug_positions = enabled;
        if enabled {
            self.update_debug_markers();
        }
    }

    /// Markers from the last tick with debug positions enabled
    pub fn debug_markers(&self) -> &[Vec2] {
        &self.debug_markers
    }
}

fn playable_extent(extent: f32) -> f32 {
    if extent.is_finite() { extent.max(1.0) } else { 1.0 }
}
