//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile::{resolution, TileCoord};

#[test]
fn test_tile_validation() {
    assert!(TileCoord::new(0, 0, 0).is_ok());
    assert!(TileCoord::new(22, (1 << 22) - 1, 0).is_ok());
    assert!(TileCoord::new(23, 0, 0).is_err());
    assert!(TileCoord::new(0, 1, 0).is_err());
    assert!(TileCoord::new(10, 1024, 0).is_err());
    assert!(TileCoord::new(10, 0, 1024).is_err());
}

#[test]
fn test_neighbors() {
    let tile = TileCoord::new(2, 0, 3).unwrap();
    assert_eq!(tile.neighbor(1, 0), Some(TileCoord { z: 2, x: 1, y: 3 }));
    assert_eq!(tile.neighbor(-1, 0), None);
    assert_eq!(tile.neighbor(0, 1), None);
    assert_eq!(tile.neighbor(0, -1), Some(TileCoord { z: 2, x: 0, y: 2 }));

    // single tile world has no neighbors
    let root = TileCoord::new(0, 0, 0).unwrap();
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx != 0 || dy != 0 {
                assert_eq!(root.neighbor(dx, dy), None);
            }
        }
    }
}

#[test]
fn test_resolution() {
    // for calculation see Grid::web_mercator resolutions in tile grids
    assert!((resolution(0, 256) - 156543.0339280410).abs() < 1e-7);
    assert!((resolution(10, 256) - 152.87405657035254).abs() < 1e-10);

    // halving law holds exactly
    for z in 0..22 {
        assert_eq!(resolution(z, 256) / 2.0, resolution(z + 1, 256));
    }

    // source tiles are 512px
    assert_eq!(resolution(10, 512), resolution(11, 256));
}
