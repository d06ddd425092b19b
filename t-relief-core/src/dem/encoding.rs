//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Terrain-RGB elevation codecs

use dem_grid::Grid;
use serde::Deserialize;

/// RGB elevation encoding scheme of the source tiles
#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TerrainEncoding {
    Mapbox,
    Terrarium,
}

impl TerrainEncoding {
    /// Decode an RGB(A) pixel to elevation in meters. Alpha is ignored.
    pub fn decode(&self, r: u8, g: u8, b: u8) -> f64 {
        match self {
            TerrainEncoding::Mapbox => {
                (r as f64 * 65536.0 + g as f64 * 256.0 + b as f64) / 10.0 - 10000.0
            }
            TerrainEncoding::Terrarium => r as f64 * 256.0 + g as f64 + b as f64 / 256.0 - 32768.0,
        }
    }

    /// Encode elevation in meters to an RGBA pixel with alpha 255.
    pub fn encode(&self, h: f64) -> [u8; 4] {
        match self {
            TerrainEncoding::Mapbox => {
                let v = ((h + 10000.0) * 10.0).round() as i64;
                [(v >> 16) as u8, (v >> 8) as u8, v as u8, 255]
            }
            TerrainEncoding::Terrarium => {
                let a = h + 32768.0;
                let r = (a / 256.0).floor();
                let g = (a % 256.0).floor();
                let b = ((a - 256.0 * r - g) * 256.0).floor();
                [r as u8, g as u8, b as u8, 255]
            }
        }
    }
}

/// Luminance inversion, `v -> 255 - v`
pub fn invert(grid: &Grid) -> Grid {
    grid.map(|v| 255.0 - v)
}

/// Clamp every cell into `[min, max]`
pub fn clamp(grid: &Grid, min: f64, max: f64) -> Grid {
    grid.map(move |v| v.clamp(min, max))
}
