//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod hillshade;

pub use self::hillshade::{hillshade, shade_baseline};
