//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::{Nocache, Tilecache};
use crate::core::config::{parse_config, ApplicationCfg};
use crate::core::error::TileError;
use crate::core::feature::FeatureAttrValType;
use crate::core::geom::GeometryType;
use crate::dem::source::mock::{tile_bytes, MockDecoder, MockHttp};
use crate::mvt::tile::Tile;
use crate::mvt::vector_tile;
use crate::render::transform::transform_and_clip;
use crate::service::tile_service::{TileKind, TileService};
use dem_grid::{Grid, TileCoord};
use std::fs;
use std::str::FromStr;

fn test_config(cache_base: Option<&str>) -> ApplicationCfg {
    let cache = match cache_base {
        Some(base) => format!("[cache.file]\nbase = \"{}\"\n", base),
        None => String::new(),
    };
    let toml = format!(
        r#"
[dem]
url = "https://dem.test/{{z}}/{{x}}/{{y}}.png"
source_tile_size = 4

{}
"#,
        cache
    );
    parse_config(toml, "").unwrap()
}

fn mock_service(
    config: ApplicationCfg,
    cache: Tilecache,
    tiles: Vec<(&str, Vec<u8>)>,
) -> TileService<MockHttp, MockDecoder> {
    TileService::new(config, cache, MockHttp::serving(tiles), MockDecoder)
}

/// All 9 source tiles around z10 512/512 with a constant elevation
fn constant_world(elevation: f64) -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("https://dem.test/10/512/512.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/511/512.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/513/512.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/512/511.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/512/513.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/511/511.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/513/511.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/511/513.png", tile_bytes(elevation, 4)),
        ("https://dem.test/10/513/513.png", tile_bytes(elevation, 4)),
    ]
}

#[test]
fn test_parse_coords() {
    type Svc = TileService<MockHttp, MockDecoder>;

    let tile = Svc::parse_coords("10", "512", "512.mvt").unwrap();
    assert_eq!(tile, TileCoord::new(10, 512, 512).unwrap());
    // suffix is optional
    assert_eq!(Svc::parse_coords("10", "512", "512").unwrap(), tile);

    assert!(matches!(
        Svc::parse_coords("23", "0", "0"),
        Err(TileError::BadCoordinates(_))
    ));
    assert!(matches!(
        Svc::parse_coords("10", "1024", "2048"),
        Err(TileError::BadCoordinates(_))
    ));
    assert!(matches!(
        Svc::parse_coords("ten", "0", "0"),
        Err(TileError::BadCoordinates(_))
    ));
    assert!(matches!(
        Svc::parse_coords("10", "0", "-1"),
        Err(TileError::BadCoordinates(_))
    ));
}

#[test]
fn test_kind_from_str() {
    assert_eq!(TileKind::from_str("contour").unwrap(), TileKind::Contour);
    assert_eq!(TileKind::from_str("hillshade").unwrap(), TileKind::Hillshade);
    assert_eq!(TileKind::from_str("terrain").unwrap(), TileKind::Terrain);
    assert!(TileKind::from_str("relief").is_err());
    assert_eq!(TileKind::Terrain.as_str(), "terrain");
}

#[tokio::test]
async fn test_tile_cached_roundtrip() {
    let mut dir = std::env::temp_dir();
    dir.push("t_relief_service_test");
    let basepath = format!("{}", dir.display());
    let _ = fs::remove_dir_all(&basepath);

    let config = test_config(Some(&basepath));
    let cache = Tilecache::from_config(&config);
    let service = mock_service(config, cache, constant_world(1000.2));
    let tile = TileCoord::new(10, 512, 512).unwrap();

    let tilegz = service
        .tile_cached(TileKind::Terrain, tile, true)
        .await
        .unwrap();
    let decoded = Tile::read_gz_from(&tilegz).unwrap();
    assert_eq!(decoded.layers.len(), 2);
    assert_eq!(decoded.layers[0].name, "contour");
    assert_eq!(decoded.layers[1].name, "hillshade");
    assert_eq!(decoded.layers[0].extent, Some(4096));
    // flat terrain: no contours, one baseline hillshade band
    assert!(decoded.layers[0].features.is_empty());
    assert_eq!(decoded.layers[1].features.len(), 1);

    // response was stored under the versioned key
    assert!(fs::metadata(format!("{}/v1/terrain/10/512/512.mvt", basepath)).is_ok());

    // second request is served from the cache
    let again = service
        .tile_cached(TileKind::Terrain, tile, true)
        .await
        .unwrap();
    assert_eq!(again, tilegz);

    // uncompressed variant decodes directly
    let raw = service
        .tile_cached(TileKind::Terrain, tile, false)
        .await
        .unwrap();
    let decoded_raw = Tile::read_from(&raw).unwrap();
    assert_eq!(decoded_raw, decoded);

    let _ = fs::remove_dir_all(&basepath);
}

#[tokio::test]
async fn test_tile_cached_center_failure() {
    let config = test_config(None);
    let service = mock_service(config, Tilecache::Nocache(Nocache), vec![]);
    let tile = TileCoord::new(10, 512, 512).unwrap();
    let result = service.tile_cached(TileKind::Contour, tile, true).await;
    assert!(matches!(result, Err(TileError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_missing_neighbors_tolerated() {
    let config = test_config(None);
    let service = mock_service(
        config,
        Tilecache::Nocache(Nocache),
        vec![("https://dem.test/10/512/512.png", tile_bytes(1000.2, 4))],
    );
    let tile = TileCoord::new(10, 512, 512).unwrap();
    let tilegz = service
        .tile_cached(TileKind::Hillshade, tile, true)
        .await
        .unwrap();
    let decoded = Tile::read_gz_from(&tilegz).unwrap();
    assert_eq!(decoded.layers.len(), 1);
}

#[test]
fn test_hillshade_features_flat() {
    let config = test_config(None);
    let service = mock_service(config, Tilecache::Nocache(Nocache), vec![]);
    // flat terrain shades to the baseline everywhere: exactly one band at
    // shade 0.5
    let grid = Grid::constant(272, 272, 500.0).unwrap();
    let features = service.hillshade_features(&grid, 12).unwrap();
    assert_eq!(features.len(), 1);
    assert!(matches!(features[0].geometry, GeometryType::Polygon(_)));
    assert_eq!(features[0].attributes[0].value, FeatureAttrValType::Int(180));
    assert_eq!(
        features[0].attributes[1].value,
        FeatureAttrValType::Double(0.5)
    );
}

#[test]
fn test_hillshade_features_slope() {
    let config = test_config(None);
    let service = mock_service(config, Tilecache::Nocache(Nocache), vec![]);
    // uniform slope facing away from the sun: shadow bands only
    let size = 64usize;
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            data.push((x + y) as f64 * 50.0);
        }
    }
    let grid = Grid::new(size, size, data).unwrap();
    let features = service.hillshade_features(&grid, 12).unwrap();
    assert!(!features.is_empty());
    for feature in &features {
        assert!(matches!(feature.geometry, GeometryType::Polygon(_)));
        let FeatureAttrValType::Double(shade) = feature.attributes[1].value else {
            panic!("expected shade");
        };
        assert!(shade > 0.0 && shade < 0.5, "shadow shade {}", shade);
    }
}

#[test]
fn test_hillshade_rejects_bad_sun_angles() {
    let mut config = test_config(None);
    config.service.sun_altitude = 120.0;
    let service = mock_service(config, Tilecache::Nocache(Nocache), vec![]);
    let grid = Grid::constant(16, 16, 0.0).unwrap();
    assert!(matches!(
        service.hillshade_features(&grid, 10),
        Err(TileError::InvalidInput(_))
    ));
}

#[test]
fn test_cone_contours_end_to_end() {
    let config = test_config(None);
    let service = mock_service(config, Tilecache::Nocache(Nocache), vec![]);

    // 264x264 buffered cone grid, 4px halo
    let size = 264usize;
    let center = size as f64 / 2.0;
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            data.push(1000.5 - 10.0 * (dx * dx + dy * dy).sqrt());
        }
    }
    let grid = Grid::new(size, size, data).unwrap();

    // contour interval at z12 is 100m
    let features = service.contour_features(&grid, 12);
    assert!(!features.is_empty());
    let levels: Vec<i64> = features
        .iter()
        .map(|f| match f.attributes[0].value {
            FeatureAttrValType::Int(level) => level,
            _ => panic!("expected int level"),
        })
        .collect();
    assert!(levels.iter().all(|level| level % 100 == 0));
    assert!(levels.contains(&500));

    let clipped = transform_and_clip(features, 4, 256, 4096);
    let mut mvt = Tile::new(4096);
    let mut layer = mvt.new_layer("contour");
    for feature in &clipped {
        mvt.add_feature(&mut layer, feature);
    }
    mvt.add_layer(layer);

    let bytes = Tile::tile_bytevec(&mvt.mvt_tile);
    let decoded = Tile::read_from(&bytes).unwrap();
    let layer = &decoded.layers[0];
    assert_eq!(layer.name, "contour");
    assert_eq!(layer.extent, Some(4096));
    assert!(!layer.features.is_empty());
    assert!(layer
        .features
        .iter()
        .all(|f| f.r#type == Some(vector_tile::tile::GeomType::Linestring as i32)));
}
