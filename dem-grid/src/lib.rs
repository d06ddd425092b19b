//! Elevation grids and map tile coordinate calculations
//!
//! ## Grids
//!
//! ```rust
//! use dem_grid::Grid;
//!
//! let grid = Grid::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(grid.get(1, 1), 3.0);
//! // out-of-bounds reads clamp to the nearest cell
//! assert_eq!(grid.get(-5, 7), 2.0);
//! ```
//!
//! ## Tile coordinates
//!
//! ```rust
//! use dem_grid::{resolution, TileCoord};
//!
//! let tile = TileCoord::new(10, 486, 332).unwrap();
//! assert_eq!(tile.z, 10);
//! // ground resolution in meters per pixel for 256px tiles
//! assert!((resolution(0, 256) - 156543.03392804097).abs() < 1e-6);
//! ```

mod grid;
mod tile;
#[cfg(test)]
mod tile_test;

pub use grid::{BufferedGrid, Grid, GridError};
pub use tile::{resolution, TileCoord};
