//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Buffered-grid to MVT coordinate transform

use crate::core::feature::Feature;
use crate::core::geom::{GeometryType, LineString, Point, Polygon};
use crate::render::clip::{clip_line, clip_ring};

/// Map a point from buffered-grid pixels into MVT coordinates.
///
/// The usable tile region lands in `[0, extent]^2`; halo coordinates map
/// outside of it.
fn grid_to_mvt(p: &Point, buffer_px: f64, tile_size: f64, extent: f64) -> Point {
    Point::new(
        (p.x - buffer_px) * extent / tile_size,
        (p.y - buffer_px) * extent / tile_size,
    )
}

/// Transform features into MVT coordinates and clip them to the extent.
///
/// Lines may split into several output features; polygons lose rings that
/// clip away entirely and are dropped when their shell does.
pub fn transform_and_clip(
    features: Vec<Feature>,
    buffer_px: usize,
    tile_size: u32,
    mvt_extent: u32,
) -> Vec<Feature> {
    let b = buffer_px as f64;
    let t = tile_size as f64;
    let e = mvt_extent as f64;

    let mut output = Vec::new();
    for feature in features {
        match feature.geometry {
            GeometryType::LineString(ref line) => {
                let transformed: Vec<Point> = line
                    .points
                    .iter()
                    .map(|p| grid_to_mvt(p, b, t, e))
                    .collect();
                for part in clip_line(&transformed, e) {
                    output.push(Feature::new(
                        GeometryType::LineString(LineString { points: part }),
                        feature.attributes.clone(),
                    ));
                }
            }
            GeometryType::Polygon(ref polygon) => {
                let mut rings = polygon.rings.iter().map(|ring| {
                    let transformed: Vec<Point> = ring
                        .points
                        .iter()
                        .map(|p| grid_to_mvt(p, b, t, e))
                        .collect();
                    clip_ring(&transformed, e)
                });
                // a clipped-away shell drops the whole polygon
                let Some(Some(shell)) = rings.next() else {
                    continue;
                };
                let mut clipped = vec![LineString { points: shell }];
                clipped.extend(rings.flatten().map(|points| LineString { points }));
                output.push(Feature::new(
                    GeometryType::Polygon(Polygon { rings: clipped }),
                    feature.attributes,
                ));
            }
        }
    }
    output
}
