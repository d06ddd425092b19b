//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Chaikin corner-cutting of polylines and rings

use crate::core::geom::Point;

pub const DEFAULT_ITERATIONS: u32 = 2;
pub const DEFAULT_FACTOR: f64 = 0.25;

fn lerp(p: &Point, q: &Point, t: f64) -> Point {
    Point::new(p.x + (q.x - p.x) * t, p.y + (q.y - p.y) * t)
}

/// Smooth an open polyline, preserving the original endpoints exactly.
pub fn smooth_line(points: &[Point], iterations: u32, factor: f64) -> Vec<Point> {
    if iterations == 0 || points.len() < 3 {
        return points.to_vec();
    }
    let last = *points.last().unwrap();
    let mut cur = points.to_vec();
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(cur.len() * 2);
        next.push(cur[0]);
        for w in cur.windows(2) {
            next.push(lerp(&w[0], &w[1], factor));
            next.push(lerp(&w[0], &w[1], 1.0 - factor));
        }
        cur = next;
    }
    // drop the cut points drifting toward the old endpoint, then restore it
    let trim = (iterations * (iterations + 1) * (2 * iterations + 1) / 6) as usize;
    let keep = cur.len().saturating_sub(trim).max(1);
    cur.truncate(keep);
    cur.push(last);
    cur
}

/// Smooth a closed ring with modular wrap-around; the result is re-closed.
pub fn smooth_ring(ring: &[Point], iterations: u32, factor: f64) -> Vec<Point> {
    if iterations == 0 || ring.len() < 4 {
        return ring.to_vec();
    }
    // operate on unique vertices, excluding the closing duplicate
    let mut cur: Vec<Point> = ring[..ring.len() - 1].to_vec();
    for _ in 0..iterations {
        let m = cur.len();
        let mut next = Vec::with_capacity(m * 2);
        for i in 0..m {
            let p = &cur[i];
            let q = &cur[(i + 1) % m];
            next.push(lerp(p, q, factor));
            next.push(lerp(p, q, 1.0 - factor));
        }
        cur = next;
    }
    cur.push(cur[0]);
    cur
}
