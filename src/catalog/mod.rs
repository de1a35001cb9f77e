// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

//! Remote catalogs: TMDB for movies and TV, Kitsu for anime.
//!
//! The [`Catalog`] facade never fails. Every error is logged and turned
//! into an empty list (or `None` for details) so screens can always render.

pub mod kitsu;
pub mod request;
pub mod tmdb;

use anyhow::Result;
use tracing::warn;

use crate::config::CatalogConfig;
use crate::media::{Category, MediaItem, MediaList};
pub use kitsu::KitsuClient;
pub use request::JsonClient;
pub use tmdb::TmdbClient;

/// One page of items from a remote catalog, before reconciliation
pub type CatalogResult = MediaList;

fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to fetch {}: {:#}", what, e);
        Vec::new()
    })
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub tmdb: TmdbClient,
    pub kitsu: KitsuClient,
}

impl Catalog {
    pub fn new(config: &CatalogConfig, show_progress: bool) -> Result<Self> {
        let http = JsonClient::new(config.timeout_secs, show_progress)?;
        Ok(Self {
            tmdb: TmdbClient::new(config, http.clone()),
            kitsu: KitsuClient::new(config, http),
        })
    }

    pub async fn popular(&self, category: Category, page: u32) -> CatalogResult {
        let page = page.max(1);
        match category {
            Category::Movie => {
                MediaList::Movies(or_empty(self.tmdb.popular_movies(page).await, "popular movies"))
            }
            Category::Show => {
                MediaList::Shows(or_empty(self.tmdb.popular_shows(page).await, "popular shows"))
            }
            Category::Anime => {
                MediaList::Anime(or_empty(self.kitsu.popular(page).await, "popular anime"))
            }
        }
    }

    pub async fn search(&self, category: Category, query: &str, page: u32) -> CatalogResult {
        let page = page.max(1);
        let query = query.trim();
        if query.is_empty() {
            return MediaList::empty(category);
        }

        match category {
            Category::Movie => MediaList::Movies(or_empty(
                self.tmdb.search_movies(query, page).await,
                "movie search results",
            )),
            Category::Show => MediaList::Shows(or_empty(
                self.tmdb.search_shows(query, page).await,
                "show search results",
            )),
            Category::Anime => MediaList::Anime(or_empty(
                self.kitsu.search(query, page).await,
                "anime search results",
            )),
        }
    }

    /// Search all three categories at once, in `Category::ALL` order
    pub async fn search_everywhere(&self, query: &str, page: u32) -> Vec<CatalogResult> {
        let (movies, shows, anime) = tokio::join!(
            self.search(Category::Movie, query, page),
            self.search(Category::Show, query, page),
            self.search(Category::Anime, query, page),
        );
        vec![movies, shows, anime]
    }

    pub async fn details(&self, category: Category, id: u64) -> Option<MediaItem> {
        let result = match category {
            Category::Movie => self.tmdb.movie(id).await.map(MediaItem::from),
            Category::Show => self.tmdb.show(id).await.map(MediaItem::from),
            Category::Anime => self.kitsu.anime(id).await.map(MediaItem::from),
        };

        result
            .map_err(|e| warn!("Failed to fetch {} {}: {:#}", category.as_str(), id, e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_catalog() -> Catalog {
        // No key and an unroutable base so nothing leaves the machine
        let config = CatalogConfig {
            tmdb_api_key: String::new(),
            kitsu_base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..CatalogConfig::default()
        };
        Catalog::new(&config, false).unwrap()
    }

    #[tokio::test]
    async fn missing_key_yields_empty_movies() {
        let result = offline_catalog().popular(Category::Movie, 1).await;
        assert_eq!(result.category(), Category::Movie);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn unreachable_provider_yields_empty_anime() {
        let result = offline_catalog().search(Category::Anime, "frieren", 1).await;
        assert_eq!(result.category(), Category::Anime);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn blank_query_is_empty_without_fetching() {
        let result = offline_catalog().search(Category::Show, "   ", 1).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn search_everywhere_keeps_category_order() {
        let results = offline_catalog().search_everywhere("dune", 1).await;
        let categories: Vec<_> = results.iter().map(|r| r.category()).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[tokio::test]
    async fn failed_details_are_none() {
        assert!(offline_catalog().details(Category::Show, 95396).await.is_none());
    }
}
