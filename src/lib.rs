// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

pub mod catalog;
pub mod config;
pub mod likes;
pub mod media;
pub mod reconcile;
pub mod setup;
pub mod storage;

pub use catalog::{Catalog, CatalogResult};
pub use config::Config;
pub use likes::{LikeStore, LikedCollection};
pub use media::{Anime, Category, Likeable, MediaItem, MediaList, Movie, Show};
pub use reconcile::Reconciler;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
