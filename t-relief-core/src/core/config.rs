//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::dem::encoding::TerrainEncoding;
use crate::{DEFAULT_SUN_ALTITUDE, DEFAULT_SUN_AZIMUTH, SOURCE_TILE_SIZE};
use log::warn;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::prelude::*;

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub service: ServiceCfg,
    #[serde(default)]
    pub dem: DemCfg,
    pub cache: Option<CacheCfg>,
    #[serde(default)]
    pub webserver: WebserverCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServiceCfg {
    /// Gzip tile payloads
    #[serde(default = "default_true")]
    pub compression: bool,
    /// Cache-Control max-age in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u32,
    /// Sun altitude above the horizon in degrees
    #[serde(default = "default_sun_altitude")]
    pub sun_altitude: f64,
    /// Sun azimuth in degrees, geographic convention
    #[serde(default = "default_sun_azimuth")]
    pub sun_azimuth: f64,
    /// Chaikin smoothing passes (0 disables smoothing)
    #[serde(default = "default_smooth_iterations")]
    pub smooth_iterations: u32,
    #[serde(default = "default_smooth_factor")]
    pub smooth_factor: f64,
}

impl Default for ServiceCfg {
    fn default() -> Self {
        ServiceCfg {
            compression: true,
            cache_ttl: default_cache_ttl(),
            sun_altitude: default_sun_altitude(),
            sun_azimuth: default_sun_azimuth(),
            smooth_iterations: default_smooth_iterations(),
            smooth_factor: default_smooth_factor(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DemCfg {
    /// Source tile URL template with `{z}`, `{x}`, `{y}` placeholders
    #[serde(default = "default_dem_url")]
    pub url: String,
    #[serde(default = "default_encoding")]
    pub encoding: TerrainEncoding,
    /// Edge length of source tiles in pixels
    #[serde(default = "default_source_tile_size")]
    pub source_tile_size: u32,
}

impl Default for DemCfg {
    fn default() -> Self {
        DemCfg {
            url: default_dem_url(),
            encoding: default_encoding(),
            source_tile_size: default_source_tile_size(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheCfg {
    pub file: Option<CacheFileCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheFileCfg {
    pub base: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebserverCfg {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl Default for WebserverCfg {
    fn default() -> Self {
        WebserverCfg {
            bind: None,
            port: None,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_cache_ttl() -> u32 {
    86400
}
fn default_sun_altitude() -> f64 {
    DEFAULT_SUN_ALTITUDE
}
fn default_sun_azimuth() -> f64 {
    DEFAULT_SUN_AZIMUTH
}
fn default_smooth_iterations() -> u32 {
    2
}
fn default_smooth_factor() -> f64 {
    0.25
}
fn default_dem_url() -> String {
    "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png".to_string()
}
fn default_encoding() -> TerrainEncoding {
    TerrainEncoding::Terrarium
}
fn default_source_tile_size() -> u32 {
    SOURCE_TILE_SIZE
}

pub const DEFAULT_CONFIG: &str = r#"
[service]
compression = true
cache_ttl = 86400
sun_altitude = 45.0
sun_azimuth = 315.0
smooth_iterations = 2
smooth_factor = 0.25

[dem]
url = "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png"
encoding = "terrarium"
source_tile_size = 512

[webserver]
bind = "127.0.0.1"
port = 6767
"#;

/// Load and parse the config file into a config struct.
pub fn read_config(path: &str) -> Result<ApplicationCfg, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    let mut cfg = parse_config(config_toml, path)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Parse the configuration into a config struct.
pub fn parse_config(config_toml: String, path: &str) -> Result<ApplicationCfg, String> {
    toml::from_str(&config_toml).map_err(|err| format!("{} - {}", path, err))
}

/// Environment variables override the config file.
pub fn apply_env_overrides(cfg: &mut ApplicationCfg) {
    if let Ok(url) = env::var("DEM_TILE_URL") {
        cfg.dem.url = url;
    }
    if let Ok(enabled) = env::var("CACHE_ENABLED") {
        if enabled == "false" {
            cfg.cache = None;
        }
    }
    if let Ok(ttl) = env::var("CACHE_TTL") {
        match ttl.parse() {
            Ok(secs) => cfg.service.cache_ttl = secs,
            Err(_) => warn!("Ignoring non-numeric CACHE_TTL '{}'", ttl),
        }
    }
    if let Ok(enabled) = env::var("COMPRESSION_ENABLED") {
        cfg.service.compression = enabled != "false";
    }
}
