//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Row-major elevation grids

use std::fmt;

#[derive(PartialEq, Clone, Debug)]
pub enum GridError {
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    InvalidTile {
        z: u8,
        x: u32,
        y: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { width, height, len } => write!(
                f,
                "grid dimensions {}x{} do not match data length {}",
                width, height, len
            ),
            GridError::InvalidTile { z, x, y } => {
                write!(f, "tile coordinates {}/{}/{} out of range", z, x, y)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// 2D grid of `f64` values in row-major order.
///
/// Immutable after construction. Reads outside the grid clamp to the
/// nearest edge cell.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Grid, GridError> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Grid {
            width,
            height,
            data,
        })
    }

    /// Grid filled with a single value
    pub fn constant(width: usize, height: usize, value: f64) -> Result<Grid, GridError> {
        Grid::new(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(x, y)` with coordinates clamped into the grid
    pub fn get(&self, x: isize, y: isize) -> f64 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.data[y * self.width + x]
    }

    /// Value at `(x, y)`, which must be in bounds
    pub fn at(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// New grid with `f` applied to every cell
    pub fn map<F>(&self, f: F) -> Grid
    where
        F: Fn(f64) -> f64,
    {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// A grid with a halo of `buffer_px` rows/columns around the tile region.
///
/// The halo only gives convolution and tracing kernels context at the tile
/// edge; the usable tile is the `(width - 2*buffer_px) x (height - 2*buffer_px)`
/// center.
#[derive(Clone, Debug)]
pub struct BufferedGrid {
    pub grid: Grid,
    pub buffer_px: usize,
}

impl BufferedGrid {
    pub fn new(grid: Grid, buffer_px: usize) -> BufferedGrid {
        debug_assert!(grid.width() > 2 * buffer_px && grid.height() > 2 * buffer_px);
        BufferedGrid { grid, buffer_px }
    }

    /// Width of the usable tile region
    pub fn tile_width(&self) -> usize {
        self.grid.width() - 2 * self.buffer_px
    }

    /// Height of the usable tile region
    pub fn tile_height(&self) -> usize {
        self.grid.height() - 2 * self.buffer_px
    }
}
