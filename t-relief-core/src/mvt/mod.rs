//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod geom_encoder;
pub mod screen;
pub mod tile;
pub mod vector_tile;

pub use self::tile::{tile_headers, Tile};
