//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::{Feature, FeatureAttrValType};
use crate::core::geom::{self, GeometryType};
use crate::mvt::geom_encoder::{CommandSequence, EncodableGeom};
use crate::mvt::screen;
use crate::mvt::vector_tile;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use prost::Message;
use std::io::{Read, Write};

/// Multi-layer MVT builder for features in tile coordinates
pub struct Tile {
    pub mvt_tile: vector_tile::Tile,
    extent: u32,
}

impl GeometryType {
    /// GeometryType to MVT geom type
    pub fn mvt_field_type(&self) -> vector_tile::tile::GeomType {
        match self {
            GeometryType::LineString(_) => vector_tile::tile::GeomType::Linestring,
            GeometryType::Polygon(_) => vector_tile::tile::GeomType::Polygon,
        }
    }
}

pub trait ScreenGeom<T> {
    /// Convert geometry into rounded screen coordinates
    fn from_geom(geom: &T) -> Self;
}

impl ScreenGeom<geom::Point> for screen::Point {
    fn from_geom(point: &geom::Point) -> Self {
        screen::Point {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
        }
    }
}

impl ScreenGeom<geom::LineString> for screen::LineString {
    fn from_geom(line: &geom::LineString) -> Self {
        let mut screen_geom = screen::LineString { points: Vec::new() };
        for point in &line.points {
            screen_geom.points.push(screen::Point::from_geom(point));
        }
        screen_geom.points.dedup();
        screen_geom
    }
}

impl ScreenGeom<geom::Polygon> for screen::Polygon {
    fn from_geom(polygon: &geom::Polygon) -> Self {
        let mut screen_geom = screen::Polygon { rings: Vec::new() };
        for line in &polygon.rings {
            screen_geom.rings.push(screen::LineString::from_geom(line));
        }
        screen_geom
    }
}

// --- Tile creation functions

impl Tile {
    pub fn new(extent: u32) -> Tile {
        Tile {
            mvt_tile: vector_tile::Tile::default(),
            extent,
        }
    }

    pub fn new_layer(&mut self, name: &str) -> vector_tile::tile::Layer {
        vector_tile::tile::Layer {
            version: 2,
            name: name.to_string(),
            extent: Some(self.extent),
            ..Default::default()
        }
    }

    pub fn encode_geom(&self, geom: &geom::GeometryType) -> CommandSequence {
        match geom {
            GeometryType::LineString(ref g) => screen::LineString::from_geom(g).encode(),
            GeometryType::Polygon(ref g) => screen::Polygon::from_geom(g).encode(),
        }
    }

    pub fn add_feature_attribute(
        mvt_layer: &mut vector_tile::tile::Layer,
        mvt_feature: &mut vector_tile::tile::Feature,
        key: &str,
        mvt_value: vector_tile::tile::Value,
    ) {
        let keyentry = mvt_layer.keys.iter().position(|k| *k == key);
        // Optimization: maintain a hash table with key/index pairs
        let keyidx = match keyentry {
            None => {
                mvt_layer.keys.push(key.to_string());
                mvt_layer.keys.len() - 1
            }
            Some(idx) => idx,
        };
        mvt_feature.tags.push(keyidx as u32);

        let valentry = mvt_layer.values.iter().position(|v| *v == mvt_value);
        // Optimization: maintain a hash table with value/index pairs
        let validx = match valentry {
            None => {
                mvt_layer.values.push(mvt_value);
                mvt_layer.values.len() - 1
            }
            Some(idx) => idx,
        };
        mvt_feature.tags.push(validx as u32);
    }

    pub fn add_feature(&self, mvt_layer: &mut vector_tile::tile::Layer, feature: &Feature) {
        let mut mvt_feature = vector_tile::tile::Feature::default();
        for attr in &feature.attributes {
            let mut mvt_value = vector_tile::tile::Value::default();
            match attr.value {
                FeatureAttrValType::String(ref v) => {
                    mvt_value.string_value = Some(v.clone());
                }
                FeatureAttrValType::Double(v) => {
                    mvt_value.double_value = Some(v);
                }
                FeatureAttrValType::Int(v) => {
                    mvt_value.int_value = Some(v);
                }
                FeatureAttrValType::Bool(v) => {
                    mvt_value.bool_value = Some(v);
                }
            }
            Tile::add_feature_attribute(mvt_layer, &mut mvt_feature, &attr.key, mvt_value);
        }
        let enc_geom = self.encode_geom(&feature.geometry).vec();
        if !enc_geom.is_empty() {
            mvt_feature.r#type = Some(feature.geometry.mvt_field_type() as i32);
            mvt_feature.geometry = enc_geom;
            mvt_layer.features.push(mvt_feature);
        }
    }

    pub fn add_layer(&mut self, mvt_layer: vector_tile::tile::Layer) {
        self.mvt_tile.layers.push(mvt_layer);
    }

    pub fn tile_bytevec(mvt_tile: &vector_tile::Tile) -> Vec<u8> {
        mvt_tile.encode_to_vec()
    }

    pub fn tile_bytevec_gz(mvt_tile: &vector_tile::Tile) -> Vec<u8> {
        let encoded = mvt_tile.encode_to_vec();
        let mut gz = GzEncoder::new(Vec::with_capacity(encoded.len()), Compression::default());
        let _ = gz.write_all(&encoded);
        gz.finish().unwrap_or_default()
    }

    /// Cached tiles are stored gzipped; unpack unless the client accepts gzip
    pub fn tile_content(tilegz: Vec<u8>, gzip: bool) -> Vec<u8> {
        if gzip {
            tilegz
        } else {
            let mut gz = GzDecoder::new(&tilegz[..]);
            let mut unc_tile = Vec::with_capacity(tilegz.len());
            let _ = gz.read_to_end(&mut unc_tile);
            unc_tile
        }
    }

    pub fn read_from(data: &[u8]) -> Result<vector_tile::Tile, prost::DecodeError> {
        vector_tile::Tile::decode(data)
    }

    pub fn read_gz_from(data: &[u8]) -> Result<vector_tile::Tile, prost::DecodeError> {
        let mut gz = GzDecoder::new(data);
        let mut unc = Vec::new();
        if gz.read_to_end(&mut unc).is_err() {
            return Err(prost::DecodeError::new("invalid gzip stream"));
        }
        vector_tile::Tile::decode(&unc[..])
    }

    pub fn size(mvt_tile: &vector_tile::Tile) -> usize {
        mvt_tile.encoded_len()
    }
}

/// HTTP response headers for a tile payload
pub fn tile_headers(cache_ttl: u32, gzip: bool) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        (
            "Content-Type",
            "application/vnd.mapbox-vector-tile".to_string(),
        ),
        ("Cache-Control", format!("public, max-age={}", cache_ttl)),
    ];
    if gzip {
        headers.push(("Content-Encoding", "gzip".to_string()));
    }
    headers
}
