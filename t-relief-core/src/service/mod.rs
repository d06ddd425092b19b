//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod levels;
pub mod tile_service;

pub use self::levels::generate_levels;
pub use self::tile_service::{HttpTileService, TileKind, TileService, TILE_VERSION};

#[cfg(test)]
mod tile_service_test;
