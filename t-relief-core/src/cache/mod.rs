//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod cache;
pub mod filecache;


pub use self::cache::Cache;
pub use self::cache::Nocache;
pub use self::filecache::Filecache;
use crate::core::config::ApplicationCfg;
use std::io;
use std::io::Read;

pub enum Tilecache {
    Nocache(Nocache),
    Filecache(Filecache),
}

impl Tilecache {
    pub fn from_config(config: &ApplicationCfg) -> Tilecache {
        config
            .cache
            .as_ref()
            .and_then(|cache| cache.file.as_ref())
            .map(|file| {
                Tilecache::Filecache(Filecache {
                    basepath: file.base.clone(),
                })
            })
            .unwrap_or(Tilecache::Nocache(Nocache))
    }
}

impl Cache for Tilecache {
    fn info(&self) -> String {
        match self {
            Tilecache::Nocache(cache) => cache.info(),
            Tilecache::Filecache(cache) => cache.info(),
        }
    }
    fn read<F>(&self, path: &str, read: F) -> bool
    where
        F: FnMut(&mut dyn Read),
    {
        match self {
            Tilecache::Nocache(cache) => cache.read(path, read),
            Tilecache::Filecache(cache) => cache.read(path, read),
        }
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        match self {
            Tilecache::Nocache(cache) => cache.write(path, obj),
            Tilecache::Filecache(cache) => cache.write(path, obj),
        }
    }
    fn exists(&self, path: &str) -> bool {
        match self {
            Tilecache::Nocache(cache) => cache.exists(path),
            Tilecache::Filecache(cache) => cache.exists(path),
        }
    }
}
