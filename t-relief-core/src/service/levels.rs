//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Trace levels and shade normalization per zoom

/// Levels from `min` (inclusive) to `max` (exclusive) in `interval` steps
pub fn generate_levels(min: f64, max: f64, interval: f64) -> Vec<f64> {
    let mut levels = Vec::new();
    if interval <= 0.0 {
        return levels;
    }
    let mut level = min;
    while level < max {
        levels.push(level);
        level += interval;
    }
    levels
}

/// Contour interval in meters for a zoom level
pub fn contour_interval(z: u8) -> f64 {
    match z {
        0..=2 => 2000.0,
        3..=7 => 1000.0,
        8..=9 => 500.0,
        10..=11 => 250.0,
        12..=13 => 100.0,
        14 => 50.0,
        _ => 10.0,
    }
}

/// Hillshade luminance interval for a zoom level
pub fn hillshade_interval(z: u8) -> f64 {
    match z {
        0..=7 => 32.0,
        8..=11 => 21.0,
        _ => 16.0,
    }
}

/// Shade for a highlight band, mapping `[baseline, 255]` onto `[0.5, 1]`
pub fn highlight_shade(level: f64, baseline: f64) -> f64 {
    (0.5 + 0.5 * (level - baseline) / (255.0 - baseline)).clamp(0.0, 1.0)
}

/// Shade for a shadow band traced on the inverted grid, mapping luminance
/// `[0, baseline]` onto `[0, 0.5]`
pub fn shadow_shade(level: f64, baseline: f64) -> f64 {
    (0.5 * (255.0 - level) / baseline).clamp(0.0, 1.0)
}
