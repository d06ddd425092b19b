//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod encoding;
pub mod fetcher;
pub mod source;

pub use self::encoding::TerrainEncoding;
pub use self::fetcher::DemFetcher;
pub use self::source::{HttpGet, ImageDecode, PixelDecoder, RawImage, ReqwestClient};
