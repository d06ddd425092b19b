//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Clipping of lines and polygon rings to the tile extent

use crate::core::geom::Point;
use crate::trace::polygon::points_eq;

#[derive(Clone, Copy)]
enum ClipEdge {
    Left,
    Right,
    Top,
    Bottom,
}

const EDGE_ORDER: [ClipEdge; 4] = [
    ClipEdge::Left,
    ClipEdge::Right,
    ClipEdge::Top,
    ClipEdge::Bottom,
];

impl ClipEdge {
    fn inside(&self, p: &Point, extent: f64) -> bool {
        match self {
            ClipEdge::Left => p.x >= 0.0,
            ClipEdge::Right => p.x <= extent,
            ClipEdge::Top => p.y >= 0.0,
            ClipEdge::Bottom => p.y <= extent,
        }
    }

    fn intersect(&self, a: &Point, b: &Point, extent: f64) -> Point {
        match self {
            ClipEdge::Left => Point::new(0.0, a.y + (b.y - a.y) * (0.0 - a.x) / (b.x - a.x)),
            ClipEdge::Right => Point::new(extent, a.y + (b.y - a.y) * (extent - a.x) / (b.x - a.x)),
            ClipEdge::Top => Point::new(a.x + (b.x - a.x) * (0.0 - a.y) / (b.y - a.y), 0.0),
            ClipEdge::Bottom => {
                Point::new(a.x + (b.x - a.x) * (extent - a.y) / (b.y - a.y), extent)
            }
        }
    }
}

fn inside_box(p: &Point, extent: f64) -> bool {
    p.x >= 0.0 && p.x <= extent && p.y >= 0.0 && p.y <= extent
}

/// Intersection of the segment `from`-`to` with the first box edge violated
/// by `to`, in left/right/top/bottom order
fn boundary_intersection(from: &Point, to: &Point, extent: f64) -> Point {
    for edge in EDGE_ORDER {
        if !edge.inside(to, extent) {
            return edge.intersect(from, to, extent);
        }
    }
    *to
}

/// Clip a polyline to the box `[0, extent]^2`.
///
/// The walk is pointwise; a segment with both endpoints outside is skipped
/// without reconstructing a potential through-crossing. Output polylines
/// shorter than two vertices are dropped.
pub fn clip_line(points: &[Point], extent: f64) -> Vec<Vec<Point>> {
    let mut clipped = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for w in points.windows(2) {
        let (p, q) = (&w[0], &w[1]);
        match (inside_box(p, extent), inside_box(q, extent)) {
            (true, true) => {
                if current.is_empty() {
                    current.push(*p);
                }
                current.push(*q);
            }
            (true, false) => {
                if current.is_empty() {
                    current.push(*p);
                }
                current.push(boundary_intersection(p, q, extent));
                clipped.push(std::mem::take(&mut current));
            }
            (false, true) => {
                // segment re-enters the box; start a new polyline
                current.push(boundary_intersection(q, p, extent));
                current.push(*q);
            }
            (false, false) => {}
        }
    }
    if current.len() >= 2 {
        clipped.push(current);
    }
    clipped
}

/// Sutherland-Hodgman clipping of a closed ring against `[0, extent]^2`.
///
/// Returns `None` when fewer than four vertices survive. The result is
/// re-closed.
pub fn clip_ring(ring: &[Point], extent: f64) -> Option<Vec<Point>> {
    if ring.len() < 4 {
        return None;
    }
    // drop the closing duplicate while clipping
    let mut points: Vec<Point> = if points_eq(&ring[0], ring.last().unwrap()) {
        ring[..ring.len() - 1].to_vec()
    } else {
        ring.to_vec()
    };

    for edge in EDGE_ORDER {
        let mut output = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let current = &points[i];
            let previous = &points[(i + points.len() - 1) % points.len()];
            match (edge.inside(previous, extent), edge.inside(current, extent)) {
                (true, true) => output.push(*current),
                (true, false) => output.push(edge.intersect(previous, current, extent)),
                (false, true) => {
                    output.push(edge.intersect(previous, current, extent));
                    output.push(*current);
                }
                (false, false) => {}
            }
        }
        points = output;
        if points.is_empty() {
            return None;
        }
    }

    points.push(points[0]);
    if points.len() < 4 {
        return None;
    }
    Some(points)
}
