//! Error types shared across the comb grid.

use thiserror::Error;

use crate::color::DetectionColor;

/// Failures reported by a [`RenderSurface`](crate::surface::RenderSurface).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("detection layer cannot be {width}x{height}")]
    EmptyLayer { width: u32, height: u32 },
    #[error("polygon has no fillable area")]
    DegeneratePath,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    #[error("cell radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("cells {first} and {second} share detection color {color}")]
    DuplicateDetectionColor {
        first: usize,
        second: usize,
        color: DetectionColor,
    },
    #[error("render surface: {0}")]
    Surface(#[from] SurfaceError),
}

pub type Result<T> = std::result::Result<T, CombError>;
