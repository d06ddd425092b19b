//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometry types in grid and tile coordinates

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct LineString {
    pub points: Vec<Point>,
}

/// Polygon with `rings[0]` as the outer shell, `rings[1..]` as holes.
/// Every ring is closed (first point equals last point).
#[derive(PartialEq, Clone, Debug)]
pub struct Polygon {
    pub rings: Vec<LineString>,
}

/// Generic Geometry Data Type
#[derive(PartialEq, Clone, Debug)]
pub enum GeometryType {
    LineString(LineString),
    Polygon(Polygon),
}

impl GeometryType {
    pub fn is_empty(&self) -> bool {
        match self {
            GeometryType::LineString(ref l) => l.points.len() < 2,
            GeometryType::Polygon(ref p) => p.rings.is_empty(),
        }
    }
}
