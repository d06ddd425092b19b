//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::{Feature, FeatureAttr, FeatureAttrValType};
use crate::core::geom::{GeometryType, LineString, Point, Polygon};
use crate::render::clip::{clip_line, clip_ring};
use crate::render::transform::transform_and_clip;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn line_feature(points: Vec<Point>) -> Feature {
    Feature::new(
        GeometryType::LineString(LineString { points }),
        vec![FeatureAttr::new("level", FeatureAttrValType::Int(200))],
    )
}

#[test]
fn test_clip_line_inside_is_identity() {
    let points = vec![p(0.0, 0.0), p(100.0, 200.0), p(4096.0, 4096.0)];
    let clipped = clip_line(&points, 4096.0);
    assert_eq!(clipped, vec![points]);
}

#[test]
fn test_clip_line_exit_and_reentry() {
    let points = vec![p(100.0, 100.0), p(5000.0, 100.0), p(5000.0, 200.0), p(100.0, 200.0)];
    let clipped = clip_line(&points, 4096.0);
    assert_eq!(clipped.len(), 2);
    // exits through the right edge
    assert_eq!(clipped[0][0], p(100.0, 100.0));
    assert_eq!(clipped[0][1], p(4096.0, 100.0));
    // re-enters through the right edge
    assert_eq!(clipped[1][0], p(4096.0, 200.0));
    assert_eq!(clipped[1][1], p(100.0, 200.0));
}

#[test]
fn test_clip_line_outside_skipped() {
    let points = vec![p(-100.0, 0.0), p(-100.0, 4096.0), p(-50.0, 4096.0)];
    assert!(clip_line(&points, 4096.0).is_empty());
}

#[test]
fn test_clip_line_edge_priority() {
    // endpoint violating both left and top clips against left first
    let points = vec![p(100.0, 100.0), p(-50.0, -100.0)];
    let clipped = clip_line(&points, 4096.0);
    assert_eq!(clipped.len(), 1);
    assert_eq!(clipped[0][1].x, 0.0);
}

#[test]
fn test_clip_ring_inside_is_identity() {
    let ring = vec![p(10.0, 10.0), p(90.0, 10.0), p(90.0, 90.0), p(10.0, 90.0), p(10.0, 10.0)];
    assert_eq!(clip_ring(&ring, 4096.0), Some(ring));
}

#[test]
fn test_clip_ring_cut_at_extent() {
    // square straddling the right edge
    let ring = vec![
        p(4000.0, 100.0),
        p(4200.0, 100.0),
        p(4200.0, 200.0),
        p(4000.0, 200.0),
        p(4000.0, 100.0),
    ];
    let clipped = clip_ring(&ring, 4096.0).unwrap();
    assert_eq!(clipped[0], *clipped.last().unwrap());
    for pt in &clipped {
        assert!(pt.x <= 4096.0);
    }
    assert!(clipped.iter().any(|pt| pt.x == 4096.0));
    assert!(clipped.iter().any(|pt| pt.x == 4000.0));
}

#[test]
fn test_clip_ring_outside_dropped() {
    let ring = vec![
        p(5000.0, 100.0),
        p(5200.0, 100.0),
        p(5200.0, 200.0),
        p(5000.0, 100.0),
    ];
    assert_eq!(clip_ring(&ring, 4096.0), None);
}

#[test]
fn test_transform_and_clip_buffered_line() {
    // halo coordinates map to negative MVT values and clip at the extent box
    let features = vec![line_feature(vec![p(0.0, 132.0), p(132.0, 132.0)])];
    let clipped = transform_and_clip(features, 4, 256, 4096);
    assert_eq!(clipped.len(), 1);
    let GeometryType::LineString(ref line) = clipped[0].geometry else {
        panic!("expected line");
    };
    assert_eq!(line.points.first().unwrap().x, 0.0);
    assert_eq!(*line.points.last().unwrap(), p(2048.0, 2048.0));
    // properties are carried through
    assert_eq!(
        clipped[0].attributes[0].value,
        FeatureAttrValType::Int(200)
    );
}

#[test]
fn test_transform_and_clip_identity_region() {
    // unbuffered, extent-sized coordinates stay put
    let features = vec![line_feature(vec![p(0.0, 0.0), p(128.0, 64.0)])];
    let clipped = transform_and_clip(features, 0, 256, 4096);
    assert_eq!(clipped.len(), 1);
    let GeometryType::LineString(ref line) = clipped[0].geometry else {
        panic!("expected line");
    };
    assert_eq!(line.points, vec![p(0.0, 0.0), p(2048.0, 1024.0)]);
}

#[test]
fn test_transform_and_clip_polygon_keeps_holes() {
    let shell = LineString {
        points: vec![p(8.0, 8.0), p(136.0, 8.0), p(136.0, 136.0), p(8.0, 136.0), p(8.0, 8.0)],
    };
    let hole = LineString {
        points: vec![p(40.0, 40.0), p(40.0, 72.0), p(72.0, 72.0), p(72.0, 40.0), p(40.0, 40.0)],
    };
    let features = vec![Feature::new(
        GeometryType::Polygon(Polygon {
            rings: vec![shell, hole],
        }),
        vec![FeatureAttr::new("level", FeatureAttrValType::Int(100))],
    )];
    let clipped = transform_and_clip(features, 8, 256, 4096);
    assert_eq!(clipped.len(), 1);
    let GeometryType::Polygon(ref poly) = clipped[0].geometry else {
        panic!("expected polygon");
    };
    assert_eq!(poly.rings.len(), 2);
    assert_eq!(poly.rings[0].points[0], p(0.0, 0.0));
    assert_eq!(poly.rings[1].points[0], p(512.0, 512.0));
}

#[test]
fn test_transform_and_clip_drops_clipped_away_hole() {
    // shell straddles the tile edge, hole sits entirely in the halo
    let shell = LineString {
        points: vec![p(0.0, 8.0), p(264.0, 8.0), p(264.0, 136.0), p(0.0, 136.0), p(0.0, 8.0)],
    };
    let hole = LineString {
        points: vec![p(2.0, 40.0), p(2.0, 60.0), p(6.0, 60.0), p(6.0, 40.0), p(2.0, 40.0)],
    };
    let features = vec![Feature::new(
        GeometryType::Polygon(Polygon {
            rings: vec![shell, hole],
        }),
        vec![],
    )];
    let clipped = transform_and_clip(features, 8, 256, 4096);
    assert_eq!(clipped.len(), 1);
    let GeometryType::Polygon(ref poly) = clipped[0].geometry else {
        panic!("expected polygon");
    };
    assert_eq!(poly.rings.len(), 1);
}

#[test]
fn test_transform_and_clip_drops_empty_shell() {
    // shell entirely in the halo clips away, hole or not
    let shell = LineString {
        points: vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0), p(0.0, 0.0)],
    };
    let features = vec![Feature::new(
        GeometryType::Polygon(Polygon { rings: vec![shell] }),
        vec![],
    )];
    let clipped = transform_and_clip(features, 8, 256, 4096);
    assert!(clipped.is_empty());
}
