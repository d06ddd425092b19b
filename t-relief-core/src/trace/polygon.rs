//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Assembly of traced rings into polygons with holes

use crate::core::geom::{LineString, Point, Polygon};
use crate::trace::cases::EPSILON;
use std::cmp::Ordering;

pub fn points_eq(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// Append the first point if the ring is not already closed
pub fn close_ring(points: &mut Vec<Point>) {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if !points_eq(&first, &last) {
            points.push(first);
        }
    }
}

/// Absolute shoelace area of a closed ring
pub fn ring_area(points: &[Point]) -> f64 {
    let mut sum = 0.0;
    for w in points.windows(2) {
        sum += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    (sum / 2.0).abs()
}

/// Ray-casting point-in-ring test
pub fn point_in_ring(p: &Point, ring: &[Point]) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Group closed rings into polygons, nesting smaller rings inside larger
/// ones as holes.
///
/// Rings are sorted by decreasing area; each unused ring becomes a shell and
/// claims every subsequent ring whose first vertex lies inside it but inside
/// none of its holes.
pub fn assemble_polygons(polylines: Vec<Vec<Point>>) -> Vec<Polygon> {
    let mut rings: Vec<Vec<Point>> = Vec::new();
    for mut points in polylines {
        close_ring(&mut points);
        if points.len() >= 4 {
            rings.push(points);
        }
    }

    let areas: Vec<f64> = rings.iter().map(|r| ring_area(r)).collect();
    let mut order: Vec<usize> = (0..rings.len()).collect();
    order.sort_by(|&a, &b| areas[b].partial_cmp(&areas[a]).unwrap_or(Ordering::Equal));

    let mut used = vec![false; rings.len()];
    let mut polygons = Vec::new();
    for (pos, &shell) in order.iter().enumerate() {
        if used[shell] {
            continue;
        }
        used[shell] = true;
        let mut members = vec![shell];
        for &candidate in &order[pos + 1..] {
            if used[candidate] {
                continue;
            }
            let first = rings[candidate][0];
            let in_shell = point_in_ring(&first, &rings[shell]);
            let in_hole = members[1..]
                .iter()
                .any(|&hole| point_in_ring(&first, &rings[hole]));
            if in_shell && !in_hole {
                used[candidate] = true;
                members.push(candidate);
            }
        }
        polygons.push(Polygon {
            rings: members
                .iter()
                .map(|&i| LineString {
                    points: rings[i].clone(),
                })
                .collect(),
        });
    }
    polygons
}
