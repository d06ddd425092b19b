//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Fetch and stitch source DEM tiles into a buffered elevation grid

use crate::core::error::TileError;
use crate::dem::encoding::TerrainEncoding;
use crate::dem::source::{HttpGet, ImageDecode, RawImage};
use dem_grid::{BufferedGrid, Grid, TileCoord};
use futures::future::join_all;
use log::{debug, warn};

const CARDINAL: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const CORNER: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Assembles buffered elevation grids from a tiled DEM source.
///
/// Neighbor tiles are fetched in two batches after the center tile to bound
/// in-flight connections. Missing edge tiles are zero-filled; a failing
/// center tile is fatal.
pub struct DemFetcher<C: HttpGet, D: ImageDecode> {
    url_template: String,
    encoding: TerrainEncoding,
    source_tile_size: usize,
    http: C,
    decoder: D,
}

impl<C: HttpGet, D: ImageDecode> DemFetcher<C, D> {
    pub fn new(
        url_template: &str,
        encoding: TerrainEncoding,
        source_tile_size: u32,
        http: C,
        decoder: D,
    ) -> DemFetcher<C, D> {
        DemFetcher {
            url_template: url_template.to_string(),
            encoding,
            source_tile_size: source_tile_size as usize,
            http,
            decoder,
        }
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    fn tile_url(&self, tile: &TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    /// Elevation grid of `(256 + 2*buffer_px)^2` for the requested tile
    pub async fn fetch_grid(
        &self,
        tile: TileCoord,
        buffer_px: usize,
    ) -> Result<BufferedGrid, TileError> {
        let grid = if buffer_px == 0 {
            self.fetch_single(tile).await?
        } else {
            self.fetch_stitched(tile, buffer_px).await?
        };
        Ok(BufferedGrid::new(grid, buffer_px))
    }

    async fn fetch_center(&self, tile: TileCoord) -> Result<RawImage, TileError> {
        let bytes = self.http.get(&self.tile_url(&tile)).await?;
        let img = self.decoder.decode(&bytes)?;
        if img.width == 0 || img.height == 0 {
            return Err(TileError::UpstreamUnavailable(format!(
                "center tile {}/{}/{} decoded to zero pixels",
                tile.z, tile.x, tile.y
            )));
        }
        Ok(img)
    }

    async fn fetch_neighbor(&self, tile: Option<TileCoord>) -> Option<RawImage> {
        let tile = tile?;
        let result = match self.http.get(&self.tile_url(&tile)).await {
            Ok(bytes) => self.decoder.decode(&bytes),
            Err(e) => Err(e),
        };
        match result {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(
                    "Zero-filling missing neighbor tile {}/{}/{}: {}",
                    tile.z, tile.x, tile.y, e
                );
                None
            }
        }
    }

    /// Unbuffered grid from the center tile alone
    async fn fetch_single(&self, tile: TileCoord) -> Result<Grid, TileError> {
        let img = self.fetch_center(tile).await?;
        let size = crate::TILE_SIZE as usize;
        let scale = self.source_tile_size as f64 / size as f64;
        let mut data = Vec::with_capacity(size * size);
        for y in 0..size {
            let sy = (((y as f64 + 0.5) * scale) as u32).min(img.height - 1);
            for x in 0..size {
                let sx = (((x as f64 + 0.5) * scale) as u32).min(img.width - 1);
                let (r, g, b) = img.rgb(sx, sy);
                data.push(self.encoding.decode(r, g, b));
            }
        }
        Ok(Grid::new(size, size, data)?)
    }

    /// Buffered grid stitched from the center tile and its 8 neighbors
    async fn fetch_stitched(&self, tile: TileCoord, buffer_px: usize) -> Result<Grid, TileError> {
        let s = self.source_tile_size;
        let mut canvas = vec![0u8; 3 * s * 3 * s * 4];

        let center = self.fetch_center(tile).await?;
        blit(&mut canvas, s, &center, 1, 1);
        drop(center);

        // neighbors in two bounded batches, any order within a batch
        for batch in [CARDINAL, CORNER] {
            let fetched = join_all(
                batch
                    .iter()
                    .map(|&(dx, dy)| self.fetch_neighbor(tile.neighbor(dx, dy))),
            )
            .await;
            for (&(dx, dy), img) in batch.iter().zip(&fetched) {
                if let Some(img) = img {
                    blit(&mut canvas, s, img, (dx + 1) as usize, (dy + 1) as usize);
                }
            }
        }

        let size = crate::TILE_SIZE as usize + 2 * buffer_px;
        let scale = s as f64 / crate::TILE_SIZE as f64;
        let max = (3 * s - 1) as i64;
        let mut data = Vec::with_capacity(size * size);
        for oy in 0..size {
            let ty = oy as f64 - buffer_px as f64;
            let sy = (s as i64 + ((ty + 0.5) * scale).floor() as i64).clamp(0, max) as usize;
            for ox in 0..size {
                let tx = ox as f64 - buffer_px as f64;
                let sx = (s as i64 + ((tx + 0.5) * scale).floor() as i64).clamp(0, max) as usize;
                let i = (sy * 3 * s + sx) * 4;
                data.push(self.encoding.decode(canvas[i], canvas[i + 1], canvas[i + 2]));
            }
        }
        debug!(
            "Stitched {}x{} elevation grid for tile {}/{}/{}",
            size, size, tile.z, tile.x, tile.y
        );
        Ok(Grid::new(size, size, data)?)
    }
}

/// Copy an image into the 3x3 stitch canvas at tile offset `(cx, cy)`
fn blit(canvas: &mut [u8], s: usize, img: &RawImage, cx: usize, cy: usize) {
    let w = (img.width as usize).min(s);
    let h = (img.height as usize).min(s);
    let stride = 3 * s * 4;
    for row in 0..h {
        let src = row * img.width as usize * 4;
        let dst = (cy * s + row) * stride + cx * s * 4;
        canvas[dst..dst + w * 4].copy_from_slice(&img.rgba[src..src + w * 4]);
    }
}
