//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Injectable fetch and decode capabilities of the DEM fetcher.
//!
//! The two seams let the stitcher and tracer be tested without network
//! access or image files.

use crate::core::error::TileError;
use std::future::Future;

/// HTTP GET capability for source tiles.
pub trait HttpGet: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TileError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, TileError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                TileError::UpstreamUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl HttpGet for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TileError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TileError::UpstreamUnavailable(format!("Request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(TileError::UpstreamUnavailable(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| TileError::UpstreamUnavailable(format!("Failed to read response: {}", e)))
    }
}

/// Decoded RGBA pixels
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    /// 4 bytes per pixel, row-major
    pub rgba: Vec<u8>,
}

impl RawImage {
    /// RGB at pixel `(x, y)`, which must be in bounds
    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * self.width + x) * 4) as usize;
        (self.rgba[i], self.rgba[i + 1], self.rgba[i + 2])
    }
}

/// Image decode capability for source tile response bodies.
pub trait ImageDecode: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<RawImage, TileError>;
}

/// Decoder backed by the `image` crate (PNG and WebP sources).
#[derive(Clone, Copy, Default)]
pub struct PixelDecoder;

impl ImageDecode for PixelDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawImage, TileError> {
        let img = image::load_from_memory(bytes).map_err(|e| TileError::Decode(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RawImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}
