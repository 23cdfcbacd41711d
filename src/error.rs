//! Construction-time errors
//!
//! Nothing on the per-tick path returns an error. Anything that could make the
//! simulation misbehave is rejected here, before a world exists.

use thiserror::Error;

use crate::sim::sprites::Sprite;

/// The sprite metadata table violates a precondition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SheetError {
    #[error("sprite {0:?} has an empty source rectangle")]
    EmptySource(Sprite),
    #[error("sprite {0:?} has a hit rectangle outside its source bounds")]
    HitRectOutOfBounds(Sprite),
    #[error("sprite {sprite:?} collision point {index} lies outside its source bounds")]
    PointOutOfBounds { sprite: Sprite, index: usize },
}

/// Settings could not be parsed or hold an unusable value
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Anything that prevents a world from being built
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
