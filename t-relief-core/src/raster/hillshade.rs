//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Lambertian hillshading from Sobel gradients

use crate::core::error::TileError;
use dem_grid::Grid;

const FLAT_THRESHOLD: f64 = 1e-10;

/// Luminance of flat terrain, `round(255 * cos(zenith))`
pub fn shade_baseline(altitude: f64) -> f64 {
    (255.0 * (90.0 - altitude).to_radians().cos()).round()
}

/// Illumination grid with values in `[0, 255]`.
///
/// `cell_size` is the ground distance per pixel in meters, `altitude` the sun
/// elevation in `[0, 90]` degrees and `azimuth` the sun direction in
/// `[0, 360]` degrees (geographic convention, 315 = NW).
pub fn hillshade(
    grid: &Grid,
    cell_size: f64,
    altitude: f64,
    azimuth: f64,
) -> Result<Grid, TileError> {
    if !(0.0..=90.0).contains(&altitude) {
        return Err(TileError::InvalidInput(format!(
            "sun altitude {} out of range [0, 90]",
            altitude
        )));
    }
    if !(0.0..=360.0).contains(&azimuth) {
        return Err(TileError::InvalidInput(format!(
            "sun azimuth {} out of range [0, 360]",
            azimuth
        )));
    }
    if cell_size <= 0.0 {
        return Err(TileError::InvalidInput(format!(
            "cell size {} must be positive",
            cell_size
        )));
    }

    // geographic to math angle convention
    let azimuth_rad = (360.0 - azimuth + 90.0).to_radians();
    let zenith_rad = (90.0 - altitude).to_radians();
    let (sin_z, cos_z) = zenith_rad.sin_cos();
    let (sin_a, cos_a) = azimuth_rad.sin_cos();
    let sun = (sin_z * cos_a, sin_z * sin_a, cos_z);
    let gradient_scale = 1.0 / (8.0 * cell_size);
    let flat = (255.0 * cos_z).round();

    let width = grid.width();
    let height = grid.height();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height as isize {
        for x in 0..width as isize {
            // 3x3 neighborhood, clamped at the grid edge:
            //   a b c
            //   d . f
            //   g h i
            let a = grid.get(x - 1, y - 1);
            let b = grid.get(x, y - 1);
            let c = grid.get(x + 1, y - 1);
            let d = grid.get(x - 1, y);
            let f = grid.get(x + 1, y);
            let g = grid.get(x - 1, y + 1);
            let h = grid.get(x, y + 1);
            let i = grid.get(x + 1, y + 1);

            let dzdx = (c + 2.0 * f + i - (a + 2.0 * d + g)) * gradient_scale;
            let dzdy = (g + 2.0 * h + i - (a + 2.0 * b + c)) * gradient_scale;

            if dzdx * dzdx + dzdy * dzdy < FLAT_THRESHOLD {
                data.push(flat);
                continue;
            }
            let norm = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
            let illumination = 255.0 * (-sun.0 * dzdx - sun.1 * dzdy + sun.2) / norm;
            data.push(illumination.clamp(0.0, 255.0).round());
        }
    }
    Ok(Grid::new(width, height, data)?)
}
