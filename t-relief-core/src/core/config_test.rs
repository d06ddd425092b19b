//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{apply_env_overrides, parse_config, ApplicationCfg, DEFAULT_CONFIG};
use crate::dem::encoding::TerrainEncoding;

#[test]
fn test_default_config() {
    let config = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    assert!(config.service.compression);
    assert_eq!(config.service.cache_ttl, 86400);
    assert_eq!(config.service.sun_altitude, 45.0);
    assert_eq!(config.service.sun_azimuth, 315.0);
    assert_eq!(config.dem.encoding, TerrainEncoding::Terrarium);
    assert_eq!(config.dem.source_tile_size, 512);
    assert!(config.dem.url.contains("{z}"));
    assert!(config.cache.is_none());
    assert_eq!(config.webserver.port, Some(6767));
}

#[test]
fn test_minimal_config() {
    // all sections have defaults
    let config = parse_config("".to_string(), "").unwrap();
    assert!(config.service.compression);
    assert_eq!(config.service.smooth_iterations, 2);
    assert_eq!(config.service.smooth_factor, 0.25);
    assert_eq!(config.dem.encoding, TerrainEncoding::Terrarium);
    assert_eq!(config.webserver.bind, None);
}

#[test]
fn test_cache_config() {
    let toml = r#"
        [cache.file]
        base = "/tmp/mvtcache"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    let cache = config.cache.unwrap();
    assert_eq!(cache.file.unwrap().base, "/tmp/mvtcache");
}

#[test]
fn test_parse_error() {
    let toml = r#"
        [dem]
        encoding = "lidar"
        "#;
    let config = parse_config(toml.to_string(), "raster.toml");
    assert!(config.is_err());
    assert!(config.err().unwrap().starts_with("raster.toml - "));
}

#[test]
fn test_env_overrides() {
    let mut config = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    std::env::set_var("DEM_TILE_URL", "https://dem.test/{z}/{x}/{y}.webp");
    std::env::set_var("CACHE_ENABLED", "false");
    std::env::set_var("CACHE_TTL", "60");
    std::env::set_var("COMPRESSION_ENABLED", "false");
    apply_env_overrides(&mut config);
    std::env::remove_var("DEM_TILE_URL");
    std::env::remove_var("CACHE_ENABLED");
    std::env::remove_var("CACHE_TTL");
    std::env::remove_var("COMPRESSION_ENABLED");

    assert_eq!(config.dem.url, "https://dem.test/{z}/{x}/{y}.webp");
    assert!(config.cache.is_none());
    assert_eq!(config.service.cache_ttl, 60);
    assert!(!config.service.compression);
}
