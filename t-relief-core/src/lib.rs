//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod cache;
pub mod core;
pub mod dem;
pub mod mvt;
pub mod raster;
pub mod render;
pub mod service;
pub mod trace;

/// Edge length of an output tile in pixels
pub const TILE_SIZE: u32 = 256;
/// Edge length of a source DEM tile in pixels
pub const SOURCE_TILE_SIZE: u32 = 512;
/// Halo width in pixels fetched around the tile for kernel context
pub const BUFFER_PX: usize = 8;
/// MVT coordinate extent
pub const MVT_EXTENT: u32 = 4096;
/// Lowest contoured elevation in meters
pub const MIN_ELEVATION: f64 = -500.0;
/// Highest contoured elevation in meters
pub const MAX_ELEVATION: f64 = 9000.0;
/// Luminance range bounds for hillshade bands
pub const MIN_LUMINANCE: f64 = 0.0;
pub const MAX_LUMINANCE: f64 = 256.0;
/// Default sun position for hillshading
pub const DEFAULT_SUN_ALTITUDE: f64 = 45.0;
pub const DEFAULT_SUN_AZIMUTH: f64 = 315.0;
