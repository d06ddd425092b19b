//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Merging of cell segments into maximal polylines

use crate::core::geom::Point;
use crate::trace::cases::Segment;
use std::collections::HashMap;

/// Endpoint hash key at 1e-6 resolution
fn quantize(p: &Point) -> (i64, i64) {
    ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64)
}

/// Merge segments sharing endpoints into maximal chains.
///
/// Every segment is indexed by both quantized endpoints. A chain is extended
/// at its tail, matching neighbor segments in either orientation, until it
/// closes on itself or runs dry; it is then flipped once and extended at the
/// other end the same way.
pub fn merge_segments(segments: Vec<Segment>) -> Vec<Vec<Point>> {
    let chains: Vec<[Point; 2]> = segments.iter().map(|s| [s.a, s.b]).collect();
    let mut endpoints: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, chain) in chains.iter().enumerate() {
        endpoints.entry(quantize(&chain[0])).or_default().push(i);
        endpoints.entry(quantize(&chain[1])).or_default().push(i);
    }

    let mut used = vec![false; chains.len()];
    let mut merged = Vec::new();
    for start in 0..chains.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut points: Vec<Point> = chains[start].to_vec();
        for _ in 0..2 {
            loop {
                let tail = quantize(points.last().unwrap());
                if points.len() > 2 && tail == quantize(&points[0]) {
                    break;
                }
                let next = endpoints
                    .get(&tail)
                    .and_then(|ids| ids.iter().copied().find(|&j| !used[j]));
                let Some(j) = next else {
                    break;
                };
                used[j] = true;
                let seg = &chains[j];
                if quantize(&seg[0]) == tail {
                    points.push(seg[1]);
                } else {
                    points.push(seg[0]);
                }
            }
            points.reverse();
        }
        merged.push(points);
    }
    merged
}
