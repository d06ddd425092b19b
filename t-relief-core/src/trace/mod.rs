//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Marching Squares tracing of isolines and filled isobands

pub mod cases;
pub mod merge;
pub mod polygon;
pub mod smooth;

pub use self::cases::{collect_segments, Segment, TraceMode, EPSILON};
pub use self::merge::merge_segments;
pub use self::polygon::assemble_polygons;
pub use self::smooth::{smooth_line, smooth_ring};

use crate::core::geom::{LineString, Polygon};
use dem_grid::Grid;

/// Isolines of `grid` at `level` as merged polylines
pub fn trace_lines(grid: &Grid, level: f64) -> Vec<LineString> {
    let segments = collect_segments(grid, level, TraceMode::Lines);
    merge_segments(segments)
        .into_iter()
        .filter(|points| points.len() >= 2)
        .map(|points| LineString { points })
        .collect()
}

/// Filled isobands of `grid` at `level` as polygons with holes
pub fn trace_polygons(grid: &Grid, level: f64) -> Vec<Polygon> {
    let segments = collect_segments(grid, level, TraceMode::Polygons);
    assemble_polygons(merge_segments(segments))
}
