//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Per-request orchestration of the tile generation pipeline

use crate::cache::{Cache, Tilecache};
use crate::core::config::ApplicationCfg;
use crate::core::error::TileError;
use crate::core::feature::{Feature, FeatureAttr, FeatureAttrValType};
use crate::core::geom::{GeometryType, LineString, Polygon};
use crate::dem::encoding::invert;
use crate::dem::fetcher::DemFetcher;
use crate::dem::source::{HttpGet, ImageDecode, PixelDecoder, ReqwestClient};
use crate::mvt::tile::Tile;
use crate::raster::hillshade::{hillshade, shade_baseline};
use crate::render::transform::transform_and_clip;
use crate::service::levels::{
    contour_interval, generate_levels, highlight_shade, hillshade_interval, shadow_shade,
};
use crate::trace::smooth::{smooth_line, smooth_ring};
use crate::trace::{trace_lines, trace_polygons};
use crate::{BUFFER_PX, MAX_ELEVATION, MAX_LUMINANCE, MIN_ELEVATION, MVT_EXTENT, TILE_SIZE};
use dem_grid::{resolution, Grid, TileCoord};
use log::{debug, error, info};
use std::io::Read;
use std::sync::{Arc, RwLock};

/// Bumped to invalidate cached tiles after algorithmic changes
pub const TILE_VERSION: &str = "1";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    Contour,
    Hillshade,
    Terrain,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Contour => "contour",
            TileKind::Hillshade => "hillshade",
            TileKind::Terrain => "terrain",
        }
    }
}

impl std::str::FromStr for TileKind {
    type Err = TileError;

    fn from_str(s: &str) -> Result<TileKind, TileError> {
        match s {
            "contour" => Ok(TileKind::Contour),
            "hillshade" => Ok(TileKind::Hillshade),
            "terrain" => Ok(TileKind::Terrain),
            _ => Err(TileError::BadCoordinates(format!(
                "unknown tile kind '{}'",
                s
            ))),
        }
    }
}

/// Produces encoded tiles for requests, consulting the cache.
///
/// The fetcher is the only process-wide mutable state; it is created lazily
/// and replaced atomically when the source URL template changes.
pub struct TileService<H: HttpGet + Clone, D: ImageDecode + Clone> {
    config: ApplicationCfg,
    cache: Tilecache,
    http: H,
    decoder: D,
    fetcher: RwLock<Option<Arc<DemFetcher<H, D>>>>,
}

pub type HttpTileService = TileService<ReqwestClient, PixelDecoder>;

impl HttpTileService {
    pub fn from_config(config: ApplicationCfg) -> Result<HttpTileService, TileError> {
        let cache = Tilecache::from_config(&config);
        info!("{}", cache.info());
        Ok(TileService::new(config, cache, ReqwestClient::new()?, PixelDecoder))
    }
}

impl<H: HttpGet + Clone, D: ImageDecode + Clone> TileService<H, D> {
    pub fn new(config: ApplicationCfg, cache: Tilecache, http: H, decoder: D) -> TileService<H, D> {
        TileService {
            config,
            cache,
            http,
            decoder,
            fetcher: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ApplicationCfg {
        &self.config
    }

    /// Parse request path parts, stripping a trailing `.mvt` from `y`
    pub fn parse_coords(z: &str, x: &str, y: &str) -> Result<TileCoord, TileError> {
        let y = y.strip_suffix(".mvt").unwrap_or(y);
        let z = z
            .parse::<u8>()
            .map_err(|_| TileError::BadCoordinates(format!("invalid zoom '{}'", z)))?;
        let x = x
            .parse::<u32>()
            .map_err(|_| TileError::BadCoordinates(format!("invalid column '{}'", x)))?;
        let y = y
            .parse::<u32>()
            .map_err(|_| TileError::BadCoordinates(format!("invalid row '{}'", y)))?;
        Ok(TileCoord::new(z, x, y)?)
    }

    /// Shared fetcher, rebuilt when the configured URL template changes
    fn fetcher(&self) -> Arc<DemFetcher<H, D>> {
        let url = &self.config.dem.url;
        {
            let slot = self.fetcher.read().unwrap();
            if let Some(fetcher) = slot.as_ref() {
                if fetcher.url_template() == url {
                    return fetcher.clone();
                }
            }
        }
        let mut slot = self.fetcher.write().unwrap();
        if let Some(fetcher) = slot.as_ref() {
            if fetcher.url_template() == url {
                return fetcher.clone();
            }
        }
        let fetcher = Arc::new(DemFetcher::new(
            url,
            self.config.dem.encoding,
            self.config.dem.source_tile_size,
            self.http.clone(),
            self.decoder.clone(),
        ));
        *slot = Some(fetcher.clone());
        fetcher
    }

    fn cache_path(kind: TileKind, tile: &TileCoord) -> String {
        format!(
            "v{}/{}/{}/{}/{}.mvt",
            TILE_VERSION,
            kind.as_str(),
            tile.z,
            tile.x,
            tile.y
        )
    }

    /// Encoded tile for a request, from the cache when possible.
    ///
    /// Cached entries are stored gzipped; `gzip` selects the returned
    /// representation.
    pub async fn tile_cached(
        &self,
        kind: TileKind,
        tile: TileCoord,
        gzip: bool,
    ) -> Result<Vec<u8>, TileError> {
        let path = Self::cache_path(kind, &tile);

        let mut cached: Option<Vec<u8>> = None;
        self.cache.read(&path, |f| {
            let mut data = Vec::new();
            let _ = f.read_to_end(&mut data);
            cached = Some(data);
        });
        if let Some(tilegz) = cached {
            debug!("{} - serving from cache", path);
            return Ok(Tile::tile_content(tilegz, gzip));
        }

        let tilegz = self.generate_tile(kind, tile).await?;
        // write is fire-and-forget; a racing request just recomputes
        if let Err(ioerr) = self.cache.write(&path, &tilegz) {
            error!("Error writing {}: {}", path, ioerr);
        }
        Ok(Tile::tile_content(tilegz, gzip))
    }

    /// Run the pipeline for one tile and return the gzipped MVT
    async fn generate_tile(&self, kind: TileKind, tile: TileCoord) -> Result<Vec<u8>, TileError> {
        let buffered = self.fetcher().fetch_grid(tile, BUFFER_PX).await?;

        let mut mvt = Tile::new(MVT_EXTENT);
        if kind == TileKind::Contour || kind == TileKind::Terrain {
            let features = self.contour_features(&buffered.grid, tile.z);
            let features =
                transform_and_clip(features, buffered.buffer_px, TILE_SIZE, MVT_EXTENT);
            let mut layer = mvt.new_layer("contour");
            for feature in &features {
                mvt.add_feature(&mut layer, feature);
            }
            debug!(
                "{}/{}/{} - {} contour features",
                tile.z,
                tile.x,
                tile.y,
                layer.features.len()
            );
            mvt.add_layer(layer);
        }
        if kind == TileKind::Hillshade || kind == TileKind::Terrain {
            let features = self.hillshade_features(&buffered.grid, tile.z)?;
            let features =
                transform_and_clip(features, buffered.buffer_px, TILE_SIZE, MVT_EXTENT);
            let mut layer = mvt.new_layer("hillshade");
            for feature in &features {
                mvt.add_feature(&mut layer, feature);
            }
            debug!(
                "{}/{}/{} - {} hillshade features",
                tile.z,
                tile.x,
                tile.y,
                layer.features.len()
            );
            mvt.add_layer(layer);
        }
        Ok(Tile::tile_bytevec_gz(&mvt.mvt_tile))
    }

    /// Contour lines at the zoom-dependent elevation intervals
    pub fn contour_features(&self, grid: &Grid, z: u8) -> Vec<Feature> {
        let interval = contour_interval(z);
        let iterations = self.config.service.smooth_iterations;
        let factor = self.config.service.smooth_factor;
        let mut features = Vec::new();
        for level in generate_levels(MIN_ELEVATION, MAX_ELEVATION, interval) {
            for line in trace_lines(grid, level) {
                let points = smooth_line(&line.points, iterations, factor);
                let index = level % (5.0 * interval) == 0.0;
                features.push(Feature::new(
                    GeometryType::LineString(LineString { points }),
                    vec![
                        FeatureAttr::new("level", FeatureAttrValType::Int(level as i64)),
                        FeatureAttr::new("index", FeatureAttrValType::Bool(index)),
                    ],
                ));
            }
        }
        features
    }

    /// Hillshade bands: highlights above the flat-terrain baseline, shadows
    /// below it traced on the inverted grid
    pub fn hillshade_features(&self, grid: &Grid, z: u8) -> Result<Vec<Feature>, TileError> {
        let cfg = &self.config.service;
        let cell_size = resolution(z, TILE_SIZE);
        let shaded = hillshade(grid, cell_size, cfg.sun_altitude, cfg.sun_azimuth)?;
        let baseline = shade_baseline(cfg.sun_altitude);
        let interval = hillshade_interval(z);

        let mut features = Vec::new();
        for level in generate_levels(baseline, MAX_LUMINANCE, interval) {
            self.band_features(&shaded, level, highlight_shade(level, baseline), &mut features);
        }
        let inverted = invert(&shaded);
        for level in generate_levels(MAX_LUMINANCE - baseline, MAX_LUMINANCE, interval) {
            self.band_features(&inverted, level, shadow_shade(level, baseline), &mut features);
        }
        Ok(features)
    }

    fn band_features(&self, grid: &Grid, level: f64, shade: f64, features: &mut Vec<Feature>) {
        let iterations = self.config.service.smooth_iterations;
        let factor = self.config.service.smooth_factor;
        for polygon in trace_polygons(grid, level) {
            let rings = polygon
                .rings
                .iter()
                .map(|ring| LineString {
                    points: smooth_ring(&ring.points, iterations, factor),
                })
                .collect();
            features.push(Feature::new(
                GeometryType::Polygon(Polygon { rings }),
                vec![
                    FeatureAttr::new("level", FeatureAttrValType::Int(level as i64)),
                    FeatureAttr::new("shade", FeatureAttrValType::Double(shade)),
                ],
            ));
        }
    }
}
