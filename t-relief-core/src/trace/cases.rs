//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Per-cell segment emission for the 16 Marching Squares cases

use crate::core::geom::Point;
use dem_grid::Grid;

/// Coordinate comparison tolerance used throughout the tracer
pub const EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    fn new(a: Point, b: Point) -> Segment {
        Segment { a, b }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TraceMode {
    /// Interior segments only
    Lines,
    /// Interior segments plus band closure along the grid boundary
    Polygons,
}

/// Crossing position between two corner values, clamped away from the corners
fn interpolate(v1: f64, v2: f64, level: f64) -> f64 {
    if (v2 - v1).abs() < EPSILON {
        return 0.5;
    }
    ((level - v1) / (v2 - v1)).clamp(EPSILON, 1.0 - EPSILON)
}

/// Walk every cell and emit the contour segments for `level`.
///
/// Corner bits: 1 for `(x,y)`, 2 for `(x+1,y)`, 4 for `(x+1,y+1)`,
/// 8 for `(x,y+1)`, set when the corner value is >= `level`. The cell edge
/// on row `y` is named the bottom edge, the one on row `y+1` the top edge.
/// Saddle cases 5 and 10 always emit two disjoint segments.
pub fn collect_segments(grid: &Grid, level: f64, mode: TraceMode) -> Vec<Segment> {
    let width = grid.width();
    let height = grid.height();
    let mut segments = Vec::new();
    if width < 2 || height < 2 {
        return segments;
    }

    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let v00 = grid.at(x, y);
            let v10 = grid.at(x + 1, y);
            let v11 = grid.at(x + 1, y + 1);
            let v01 = grid.at(x, y + 1);

            let mut index = 0u8;
            if v00 >= level {
                index |= 1;
            }
            if v10 >= level {
                index |= 2;
            }
            if v11 >= level {
                index |= 4;
            }
            if v01 >= level {
                index |= 8;
            }
            if index == 0 {
                continue;
            }

            let xf = x as f64;
            let yf = y as f64;
            // edge crossings
            let bm = Point::new(xf + interpolate(v00, v10, level), yf);
            let rm = Point::new(xf + 1.0, yf + interpolate(v10, v11, level));
            let tm = Point::new(xf + interpolate(v01, v11, level), yf + 1.0);
            let lm = Point::new(xf, yf + interpolate(v00, v01, level));

            match index {
                1 => segments.push(Segment::new(lm, bm)),
                2 => segments.push(Segment::new(bm, rm)),
                3 => segments.push(Segment::new(lm, rm)),
                4 => segments.push(Segment::new(rm, tm)),
                5 => {
                    segments.push(Segment::new(lm, tm));
                    segments.push(Segment::new(rm, bm));
                }
                6 => segments.push(Segment::new(bm, tm)),
                7 => segments.push(Segment::new(lm, tm)),
                8 => segments.push(Segment::new(tm, lm)),
                9 => segments.push(Segment::new(tm, bm)),
                10 => {
                    segments.push(Segment::new(bm, lm));
                    segments.push(Segment::new(tm, rm));
                }
                11 => segments.push(Segment::new(tm, rm)),
                12 => segments.push(Segment::new(rm, lm)),
                13 => segments.push(Segment::new(rm, bm)),
                14 => segments.push(Segment::new(bm, lm)),
                _ => {}
            }

            if mode == TraceMode::Polygons {
                // corner points
                let bl = Point::new(xf, yf);
                let br = Point::new(xf + 1.0, yf);
                let tr = Point::new(xf + 1.0, yf + 1.0);
                let tl = Point::new(xf, yf + 1.0);
                let (above_bl, above_br) = (index & 1 != 0, index & 2 != 0);
                let (above_tr, above_tl) = (index & 4 != 0, index & 8 != 0);

                // close the band along the tile perimeter
                if y == 0 {
                    match (above_bl, above_br) {
                        (true, false) => segments.push(Segment::new(bm, bl)),
                        (false, true) => segments.push(Segment::new(br, bm)),
                        (true, true) => segments.push(Segment::new(br, bl)),
                        (false, false) => {}
                    }
                }
                if x == 0 {
                    match (above_bl, above_tl) {
                        (true, false) => segments.push(Segment::new(bl, lm)),
                        (false, true) => segments.push(Segment::new(lm, tl)),
                        (true, true) => segments.push(Segment::new(bl, tl)),
                        (false, false) => {}
                    }
                }
                if y == height - 2 {
                    match (above_tl, above_tr) {
                        (false, true) => segments.push(Segment::new(tm, tr)),
                        (true, false) => segments.push(Segment::new(tl, tm)),
                        (true, true) => segments.push(Segment::new(tl, tr)),
                        (false, false) => {}
                    }
                }
                if x == width - 2 {
                    match (above_br, above_tr) {
                        (false, true) => segments.push(Segment::new(tr, rm)),
                        (true, false) => segments.push(Segment::new(rm, br)),
                        (true, true) => segments.push(Segment::new(tr, br)),
                        (false, false) => {}
                    }
                }
            }
        }
    }
    segments
}
