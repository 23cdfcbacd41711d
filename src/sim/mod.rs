//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Elapsed time is supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (flat actor list)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collision;
pub mod decor;
pub mod enemy;
pub mod explosion;
pub mod geometry;
pub mod hull;
pub mod laser;
pub mod player;
pub mod pool;
pub mod sprites;
pub mod tick;
pub mod world;

pub use asteroid::Asteroid;
pub use body::{Body, Bounds};
pub use decor::{FireModePip, HealthPip, Star};
pub use enemy::{Enemy, Pursuit, bearing};
pub use explosion::Explosion;
pub use geometry::{Rect, RotatedRect, rotate, rotation, sprite_to_world};
pub use hull::{Hull, HullEvent};
pub use laser::Laser;
pub use player::{FireMode, Player, Trigger};
pub use pool::{Pool, Reusable};
pub use sprites::{Sprite, SpriteInfo, SpriteSheet};
pub use tick::{Frame, TickInput, tick};
pub use world::{ActorId, Hud, World};
