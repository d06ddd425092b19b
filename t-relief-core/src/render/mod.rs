//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod clip;
pub mod transform;

pub use self::clip::{clip_line, clip_ring};
pub use self::transform::transform_and_clip;

#[cfg(test)]
mod clip_test;
