//! Sprite kinds and their collision metadata
//!
//! The sheet maps every sprite kind to its source rectangle on the texture, an
//! optional axis-aligned hit box and an optional collision polygon. Both are in
//! sprite-local pixels with the origin at the source rectangle's top-left.
//! A sheet is validated once when built and never changes afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::EXPLOSION_FRAME_COUNT;
use crate::error::SheetError;

pub const ASTEROID_VARIANTS: u8 = 6;
pub const STAR_VARIANTS: u8 = 5;

/// Every drawable kind. Variant numbers wrap, so `Asteroid(7)` looks up `Asteroid(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Ship,
    Enemy,
    Asteroid(u8),
    LaserGreen,
    LaserRed,
    LaserBlue,
    Star(u8),
    /// Health indicator
    SmallShip,
    /// One frame of the explosion animation
    Explosion(u8),
}

/// Number of distinct table slots
pub const SPRITE_COUNT: usize = 17 + EXPLOSION_FRAME_COUNT;

impl Sprite {
    /// Slot in the metadata table
    pub fn index(self) -> usize {
        match self {
            Sprite::Ship => 0,
            Sprite::Enemy => 1,
            Sprite::Asteroid(n) => 2 + (n % ASTEROID_VARIANTS) as usize,
            Sprite::LaserGreen => 8,
            Sprite::LaserRed => 9,
            Sprite::LaserBlue => 10,
            Sprite::Star(n) => 11 + (n % STAR_VARIANTS) as usize,
            Sprite::SmallShip => 16,
            Sprite::Explosion(n) => 17 + n as usize % EXPLOSION_FRAME_COUNT,
        }
    }

    /// Inverse of [`Sprite::index`]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        Some(match index {
            0 => Sprite::Ship,
            1 => Sprite::Enemy,
            2..=7 => Sprite::Asteroid((index - 2) as u8),
            8 => Sprite::LaserGreen,
            9 => Sprite::LaserRed,
            10 => Sprite::LaserBlue,
            11..=15 => Sprite::Star((index - 11) as u8),
            16 => Sprite::SmallShip,
            i if i < SPRITE_COUNT => Sprite::Explosion((i - 17) as u8),
            _ => return None,
        })
    }

    /// The explosion animation in playback order
    pub fn explosion_sequence() -> Vec<Sprite> {
        (0..EXPLOSION_FRAME_COUNT).map(|i| Sprite::Explosion(i as u8)).collect()
    }
}

/// Metadata for one sprite kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteInfo {
    /// Rectangle on the texture; its size is the actor's size
    pub source: Rect,
    /// Local hit box (empty when the sprite has none)
    pub hit_rect: Rect,
    /// Local collision polygon (empty when the sprite has none)
    pub points: Vec<Vec2>,
}

impl SpriteInfo {
    pub fn new(source: Rect) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    pub fn with_hit_rect(mut self, hit_rect: Rect) -> Self {
        self.hit_rect = hit_rect;
        self
    }

    pub fn with_points(mut self, points: &[(f32, f32)]) -> Self {
        self.points = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        self
    }
}

/// Immutable lookup table from sprite kind to metadata
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    entries: Vec<SpriteInfo>,
}

impl SpriteSheet {
    /// Build a sheet from explicit entries. Kinds without an entry are rejected.
    pub fn new(entries: impl IntoIterator<Item = (Sprite, SpriteInfo)>) -> Result<Self, SheetError> {
        let mut table = vec![SpriteInfo::default(); SPRITE_COUNT];
        for (sprite, info) in entries {
            table[sprite.index()] = info;
        }
        let sheet = Self { entries: table };
        sheet.validate()?;
        Ok(sheet)
    }

    /// The game's own sprite sheet layout
    pub fn standard() -> Self {
        let mut entries = vec![
            (
                Sprite::Ship,
                SpriteInfo::new(Rect::new(72.0, 50.0, 41.0, 31.0))
                    .with_hit_rect(Rect::new(6.0, 4.0, 29.0, 23.0))
                    .with_points(&[
                        (20.0, 0.0),
                        (2.0, 12.0),
                        (38.0, 12.0),
                        (20.0, 30.0),
                        (2.0, 25.0),
                        (38.0, 25.0),
                        (20.0, 12.0),
                    ]),
            ),
            (
                Sprite::Enemy,
                SpriteInfo::new(Rect::new(169.0, 50.0, 40.0, 32.0))
                    .with_hit_rect(Rect::new(11.0, 11.0, 18.0, 16.0))
                    .with_points(&[
                        (18.0, 0.0),
                        (21.0, 0.0),
                        (0.0, 24.0),
                        (15.0, 30.0),
                        (24.0, 30.0),
                        (39.0, 23.0),
                        (10.0, 13.0),
                        (29.0, 13.0),
                    ]),
            ),
            (
                Sprite::Asteroid(0),
                SpriteInfo::new(Rect::new(380.0, 50.0, 41.0, 34.0)).with_hit_rect(Rect::new(4.0, 4.0, 31.0, 27.0)),
            ),
            (
                Sprite::Asteroid(1),
                SpriteInfo::new(Rect::new(424.0, 45.0, 48.0, 39.0)).with_hit_rect(Rect::new(8.0, 3.0, 31.0, 30.0)),
            ),
            (
                Sprite::Asteroid(2),
                SpriteInfo::new(Rect::new(380.0, 91.0, 36.0, 32.0)).with_hit_rect(Rect::new(2.0, 4.0, 30.0, 26.0)),
            ),
            (
                Sprite::Asteroid(3),
                SpriteInfo::new(Rect::new(433.0, 87.0, 40.0, 38.0)).with_hit_rect(Rect::new(5.0, 4.0, 31.0, 33.0)),
            ),
            (
                Sprite::Asteroid(4),
                SpriteInfo::new(Rect::new(477.0, 52.0, 18.0, 18.0)).with_hit_rect(Rect::new(2.0, 2.0, 15.0, 15.0)),
            ),
            (
                Sprite::Asteroid(5),
                SpriteInfo::new(Rect::new(503.0, 53.0, 18.0, 16.0)).with_hit_rect(Rect::new(2.0, 2.0, 14.0, 12.0)),
            ),
            (
                Sprite::LaserGreen,
                SpriteInfo::new(Rect::new(73.0, 202.0, 5.0, 24.0)).with_points(&[(2.0, 11.0)]),
            ),
            (
                Sprite::LaserRed,
                SpriteInfo::new(Rect::new(73.0, 230.0, 5.0, 23.0)).with_points(&[(2.0, 11.0)]),
            ),
            (
                Sprite::LaserBlue,
                SpriteInfo::new(Rect::new(73.0, 258.0, 5.0, 23.0)).with_points(&[(2.0, 11.0)]),
            ),
            (Sprite::SmallShip, SpriteInfo::new(Rect::new(220.0, 49.0, 15.0, 12.0))),
        ];

        for n in 0..STAR_VARIANTS {
            let x = 279.0 + 3.0 * n as f32;
            entries.push((Sprite::Star(n), SpriteInfo::new(Rect::new(x, 72.0, 2.0, 2.0))));
        }

        // 8x8 grid of 32px tiles
        for (i, sprite) in Sprite::explosion_sequence().into_iter().enumerate() {
            let (col, row) = ((i % 8) as f32, (i / 8) as f32);
            entries.push((sprite, SpriteInfo::new(Rect::new(64.0 + col * 32.0, 576.0 + row * 32.0, 32.0, 32.0))));
        }

        let mut table = vec![SpriteInfo::default(); SPRITE_COUNT];
        for (sprite, info) in entries {
            table[sprite.index()] = info;
        }
        Self { entries: table }
    }

    /// Metadata for a sprite kind
    #[inline]
    pub fn get(&self, sprite: Sprite) -> &SpriteInfo {
        &self.entries[sprite.index()]
    }

    /// Check every entry: non-empty source, hit box and polygon inside the sprite
    pub fn validate(&self) -> Result<(), SheetError> {
        for (index, info) in self.entries.iter().enumerate() {
            // Table length is SPRITE_COUNT so every slot maps back to a kind
            let Some(sprite) = Sprite::from_index(index) else {
                continue;
            };
            if info.source.is_empty() {
                return Err(SheetError::EmptySource(sprite));
            }
            let local = Rect::new(0.0, 0.0, info.source.width, info.source.height);
            if !info.hit_rect.is_empty() && !local.encloses(&info.hit_rect) {
                return Err(SheetError::HitRectOutOfBounds(sprite));
            }
            for (i, p) in info.points.iter().enumerate() {
                if p.x < 0.0 || p.y < 0.0 || p.x > local.width || p.y > local.height {
                    return Err(SheetError::PointOutOfBounds { sprite, index: i });
                }
            }
        }
        Ok(())
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sheet_is_valid() {
        assert_eq!(SpriteSheet::standard().validate(), Ok(()));
    }

    #[test]
    fn test_index_roundtrip_covers_table() {
        for i in 0..SPRITE_COUNT {
            let sprite = Sprite::from_index(i).unwrap();
            assert_eq!(sprite.index(), i);
        }
        assert_eq!(Sprite::from_index(SPRITE_COUNT), None);
    }

    #[test]
    fn test_variant_numbers_wrap() {
        assert_eq!(Sprite::Asteroid(7).index(), Sprite::Asteroid(1).index());
        assert_eq!(Sprite::Star(5).index(), Sprite::Star(0).index());
    }

    #[test]
    fn test_explosion_grid_layout() {
        let sheet = SpriteSheet::standard();
        assert_eq!(sheet.get(Sprite::Explosion(0)).source, Rect::new(64.0, 576.0, 32.0, 32.0));
        assert_eq!(sheet.get(Sprite::Explosion(9)).source, Rect::new(96.0, 608.0, 32.0, 32.0));
        assert_eq!(sheet.get(Sprite::Explosion(63)).source, Rect::new(288.0, 800.0, 32.0, 32.0));
    }

    #[test]
    fn test_new_rejects_missing_entries() {
        let err = SpriteSheet::new([(Sprite::Ship, SpriteInfo::new(Rect::new(0.0, 0.0, 4.0, 4.0)))]).unwrap_err();
        assert_eq!(err, SheetError::EmptySource(Sprite::Enemy));
    }

    #[test]
    fn test_new_rejects_out_of_bounds_geometry() {
        let mut sheet = SpriteSheet::standard();
        sheet.entries[Sprite::Enemy.index()].hit_rect = Rect::new(30.0, 0.0, 20.0, 5.0);
        assert_eq!(sheet.validate(), Err(SheetError::HitRectOutOfBounds(Sprite::Enemy)));

        let mut sheet = SpriteSheet::standard();
        sheet.entries[Sprite::LaserRed.index()].points.push(Vec2::new(9.0, 1.0));
        assert_eq!(
            sheet.validate(),
            Err(SheetError::PointOutOfBounds { sprite: Sprite::LaserRed, index: 1 })
        );
    }
}
