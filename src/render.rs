//! Render export for an external sprite batcher
//!
//! The simulation draws nothing itself. Each visible actor becomes one
//! [`SpriteInstance`], laid out so a slice can be uploaded as an instance
//! buffer without conversion.

use bytemuck::{Pod, Zeroable};

use crate::sim::body::Body;
use crate::sim::sprites::SpriteSheet;

/// One sprite draw: source texels, destination and transform
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Source rectangle on the sheet: x, y, width, height
    pub source: [f32; 4],
    /// Render position of the sprite origin
    pub position: [f32; 2],
    /// Rotation and scale pivot, relative to the source rectangle
    pub origin: [f32; 2],
    /// Radians, clockwise in screen space
    pub rotation: f32,
    pub scale: f32,
}

impl SpriteInstance {
    pub fn from_body(sheet: &SpriteSheet, body: &Body) -> Self {
        let source = sheet.get(body.sprite()).source;
        let origin = body.offset();
        Self {
            source: [source.x, source.y, source.width, source.height],
            position: body.draw_position.to_array(),
            origin: origin.to_array(),
            rotation: body.draw_direction.to_radians(),
            scale: body.scale,
        }
    }

    /// Raw bytes of a batch, ready for upload
    pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
