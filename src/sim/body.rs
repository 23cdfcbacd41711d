//! Transform and hit geometry shared by every actor
//!
//! `position` is the top-left anchor of the sprite; the visual and rotational
//! center sits at `position + offset`. World-space hit geometry is derived from
//! the current sprite and transform by [`Body::refresh_geometry`], which the
//! world calls once per tick after all updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, sprite_to_world};
use super::sprites::{Sprite, SpriteSheet};
use crate::{heading, wrap_degrees};

/// Screen extent used for wrapping, culling and HUD layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    /// Top-left anchor in world space
    pub position: Vec2,
    /// Facing in degrees, measured from +x, kept in [0, 360)
    pub direction: f32,
    /// Where the renderer places the sprite origin
    pub draw_position: Vec2,
    /// Render rotation in degrees
    pub draw_direction: f32,
    pub visible: bool,
    pub scale: f32,
    sprite: Sprite,
    size: Vec2,
    offset: Vec2,
    local_rect: Rect,
    local_points: Vec<Vec2>,
    world_rect: Rect,
    world_points: Vec<Vec2>,
}

impl Body {
    pub fn new(sheet: &SpriteSheet, sprite: Sprite, position: Vec2, direction: f32) -> Self {
        let mut body = Self {
            position,
            direction: wrap_degrees(direction),
            draw_position: position,
            draw_direction: 0.0,
            visible: true,
            scale: 1.0,
            sprite,
            size: Vec2::ZERO,
            offset: Vec2::ZERO,
            local_rect: Rect::default(),
            local_points: Vec::new(),
            world_rect: Rect::default(),
            world_points: Vec::new(),
        };
        body.set_sprite(sheet, sprite);
        body
    }

    /// Switch sprite kind. Size, centering offset, hit box and polygon all
    /// change together, and the world-space geometry is rebuilt immediately.
    pub fn set_sprite(&mut self, sheet: &SpriteSheet, sprite: Sprite) {
        let info = sheet.get(sprite);
        self.sprite = sprite;
        self.size = info.source.size();
        self.offset = self.size / 2.0;
        self.local_rect = info.hit_rect;
        self.local_points.clear();
        self.local_points.extend_from_slice(&info.points);
        self.refresh_geometry();
    }

    #[inline]
    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Half size; also the render origin
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Local hit box as authored
    pub fn local_hit_rect(&self) -> Rect {
        self.local_rect
    }

    /// Hit box translated to the current position (not rotated)
    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.world_rect
    }

    /// Collision polygon rotated by `direction + 90°` about the center
    #[inline]
    pub fn collision_points(&self) -> &[Vec2] {
        &self.world_points
    }

    /// Rebuild world-space hit geometry from the current transform
    pub fn refresh_geometry(&mut self) {
        self.world_rect = self.local_rect.translated(self.position);
        let center = self.center();
        let half = self.size / 2.0;
        let direction = self.direction;
        self.world_points.clear();
        self.world_points.extend(
            self.local_points
                .iter()
                .map(|&p| sprite_to_world(center, direction, p - half)),
        );
    }

    /// Move the anchor and facing outside the normal update path
    pub fn place(&mut self, position: Vec2, direction: f32) {
        self.position = position;
        self.direction = wrap_degrees(direction);
        self.refresh_geometry();
    }

    /// Center the body on a point
    pub fn center_on(&mut self, center: Vec2) {
        self.position = center - self.offset;
        self.draw_position = center;
        self.refresh_geometry();
    }

    pub fn turn(&mut self, degrees: f32) {
        self.direction = wrap_degrees(self.direction + degrees);
    }

    /// Advance along the current facing: `velocity * (cos, sin)(direction) * scaled_dt`
    #[inline]
    pub fn advance(&mut self, velocity: f32, scaled_dt: f32) {
        self.position += heading(self.direction) * velocity * scaled_dt;
    }

    /// Point the renderer at the current center, rotated for a nose-up sprite
    pub fn sync_draw(&mut self) {
        self.draw_position = self.center();
        self.draw_direction = wrap_degrees(self.direction + 90.0);
    }

    /// Toroidal wrap. An edge is crossed only once the whole sprite is off
    /// screen, and re-entry happens the same half-size beyond the opposite edge.
    /// Returns true if any axis wrapped.
    pub fn wrap(&mut self, bounds: Bounds) -> bool {
        let mut wrapped = false;
        if self.position.x + self.offset.x < 0.0 {
            self.position.x = bounds.width + self.offset.x;
            wrapped = true;
        }
        if self.position.x - self.offset.x > bounds.width {
            self.position.x = -self.offset.x;
            wrapped = true;
        }
        if self.position.y + self.offset.y < 0.0 {
            self.position.y = bounds.height + self.offset.y;
            wrapped = true;
        }
        if self.position.y - self.offset.y > bounds.height {
            self.position.y = -self.offset.y;
            wrapped = true;
        }
        wrapped
    }

    /// Same edge test as [`Body::wrap`] without moving anything
    pub fn is_off_screen(&self, bounds: Bounds) -> bool {
        self.position.x + self.offset.x < 0.0
            || self.position.x - self.offset.x > bounds.width
            || self.position.y + self.offset.y < 0.0
            || self.position.y - self.offset.y > bounds.height
    }
}
