//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use dem_grid::GridError;
use thiserror::Error;

/// Errors surfaced by the tile generation pipeline.
///
/// `BadCoordinates` maps to a client error at the HTTP boundary, everything
/// else to a server error.
#[derive(Debug, Error)]
pub enum TileError {
    /// Tile coordinate validation failed
    #[error("bad tile coordinates: {0}")]
    BadCoordinates(String),

    /// Center tile fetch failed or decoded to zero pixels
    #[error("upstream tile source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Image decoder rejected the response body
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Sun angles or grid dimensions out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<GridError> for TileError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidTile { z, x, y } => {
                TileError::BadCoordinates(format!("{}/{}/{}", z, x, y))
            }
            e @ GridError::InvalidDimensions { .. } => TileError::InvalidInput(e.to_string()),
        }
    }
}
