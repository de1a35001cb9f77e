// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

//! Kitsu client for anime (JSON:API).

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::request::JsonClient;
use crate::config::CatalogConfig;
use crate::media::Anime;

const JSON_API: &str = "application/vnd.api+json";

#[derive(Debug, Deserialize)]
pub struct KitsuListResponse {
    #[serde(default)]
    pub data: Vec<KitsuResource>,
}

#[derive(Debug, Deserialize)]
pub struct KitsuSingleResponse {
    pub data: KitsuResource,
}

#[derive(Debug, Deserialize)]
pub struct KitsuResource {
    pub id: String,
    pub attributes: KitsuAnimeAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitsuAnimeAttributes {
    #[serde(default)]
    pub canonical_title: Option<String>,
    #[serde(default)]
    pub titles: Option<KitsuTitles>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub poster_image: Option<KitsuImage>,
    #[serde(default)]
    pub average_rating: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KitsuTitles {
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub en_jp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KitsuImage {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

impl KitsuResource {
    pub fn into_anime(self) -> Result<Anime> {
        let id: u64 = self
            .id
            .parse()
            .with_context(|| format!("Invalid Kitsu anime id: {}", self.id))?;
        let attrs = self.attributes;

        let titles = attrs.titles.unwrap_or_default();
        let canonical_title = [attrs.canonical_title, titles.en_jp, titles.en]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default();

        Ok(Anime {
            id,
            canonical_title,
            synopsis: attrs.synopsis.filter(|s| !s.trim().is_empty()),
            poster_image: attrs
                .poster_image
                .and_then(|p| p.medium.or(p.large).or(p.small)),
            average_rating: attrs.average_rating.and_then(|r| r.parse().ok()),
            start_date: attrs.start_date,
            episode_count: attrs.episode_count,
            is_liked: false,
        })
    }
}

fn into_anime_list(response: KitsuListResponse) -> Vec<Anime> {
    response
        .data
        .into_iter()
        .filter_map(|resource| match resource.into_anime() {
            Ok(anime) => Some(anime),
            Err(e) => {
                warn!("Skipping Kitsu entry: {:#}", e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct KitsuClient {
    http: JsonClient,
    base_url: String,
    page_size: u32,
}

impl KitsuClient {
    pub fn new(config: &CatalogConfig, http: JsonClient) -> Self {
        Self {
            http,
            base_url: config.kitsu_base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.clamp(1, 20),
        }
    }

    /// `page` is 1-based and turned into a Kitsu offset
    pub fn endpoint(&self, path: &str, page: u32, params: &[(&str, String)]) -> Result<Url> {
        let offset = page.saturating_sub(1).saturating_mul(self.page_size);
        let mut query = vec![
            ("page[limit]", self.page_size.to_string()),
            ("page[offset]", offset.to_string()),
        ];
        query.extend(params.iter().cloned());

        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse_with_params(&raw, &query).with_context(|| format!("Invalid Kitsu URL: {}", raw))
    }

    pub async fn popular(&self, page: u32) -> Result<Vec<Anime>> {
        debug!(page, "Fetching popular anime");
        let url = self.endpoint("anime", page, &[("sort", "popularityRank".to_string())])?;
        let response: KitsuListResponse = self.http.get_json(url, Some(JSON_API)).await?;
        Ok(into_anime_list(response))
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<Anime>> {
        debug!(query, page, "Searching Kitsu anime");
        let url = self.endpoint("anime", page, &[("filter[text]", query.to_string())])?;
        let response: KitsuListResponse = self.http.get_json(url, Some(JSON_API)).await?;
        Ok(into_anime_list(response))
    }

    pub async fn anime(&self, id: u64) -> Result<Anime> {
        debug!(id, "Fetching anime details");
        let raw = format!("{}/anime/{}", self.base_url, id);
        let url = Url::parse(&raw).with_context(|| format!("Invalid Kitsu URL: {}", raw))?;
        let response: KitsuSingleResponse = self.http.get_json(url, Some(JSON_API)).await?;
        response.data.into_anime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::request::decode_json;

    const SEARCH_BODY: &str = r#"{
        "data": [
            {
                "id": "7442",
                "type": "anime",
                "attributes": {
                    "canonicalTitle": "Attack on Titan",
                    "titles": {"en": "Attack on Titan", "en_jp": "Shingeki no Kyojin"},
                    "synopsis": "Centuries ago...",
                    "averageRating": "84.8",
                    "startDate": "2013-04-07",
                    "episodeCount": 25,
                    "posterImage": {"small": "s.jpg", "medium": "m.jpg", "large": "l.jpg"}
                }
            },
            {
                "id": "46474",
                "type": "anime",
                "attributes": {
                    "canonicalTitle": null,
                    "titles": {"en_jp": "Sousou no Frieren"},
                    "averageRating": null
                }
            },
            {
                "id": "not-a-number",
                "type": "anime",
                "attributes": {"canonicalTitle": "Broken"}
            }
        ],
        "links": {"next": "https://kitsu.io/api/edge/anime?page%5Boffset%5D=20"}
    }"#;

    #[test]
    fn maps_search_results() {
        let response: KitsuListResponse = decode_json(SEARCH_BODY).unwrap();
        let anime = into_anime_list(response);

        assert_eq!(anime.len(), 2);
        assert_eq!(anime[0].id, 7442);
        assert_eq!(anime[0].canonical_title, "Attack on Titan");
        assert_eq!(anime[0].average_rating, Some(84.8));
        assert_eq!(anime[0].poster_image.as_deref(), Some("m.jpg"));
        assert_eq!(anime[0].release_year(), Some(2013));

        assert_eq!(anime[1].canonical_title, "Sousou no Frieren");
        assert_eq!(anime[1].average_rating, None);
    }

    #[test]
    fn maps_single_resource() {
        let body = r#"{"data": {"id": "1", "type": "anime",
            "attributes": {"canonicalTitle": "Cowboy Bebop", "episodeCount": 26}}}"#;
        let anime = decode_json::<KitsuSingleResponse>(body)
            .unwrap()
            .data
            .into_anime()
            .unwrap();

        assert_eq!(anime.canonical_title, "Cowboy Bebop");
        assert_eq!(anime.episode_count, Some(26));
    }

    #[test]
    fn blank_titles_fall_through_to_next_choice() {
        let body = r#"{"data": {"id": "11", "type": "anime",
            "attributes": {"canonicalTitle": " ", "titles": {"en_jp": "", "en": "Naruto"}}}}"#;
        let anime = decode_json::<KitsuSingleResponse>(body)
            .unwrap()
            .data
            .into_anime()
            .unwrap();

        assert_eq!(anime.canonical_title, "Naruto");
    }

    #[test]
    fn endpoint_pages_by_offset() {
        let config = CatalogConfig::default();
        let client = KitsuClient::new(&config, JsonClient::new(5, false).unwrap());
        let url = client
            .endpoint("anime", 3, &[("sort", "popularityRank".to_string())])
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("page[limit]".to_string(), "20".to_string())));
        assert!(pairs.contains(&("page[offset]".to_string(), "40".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "popularityRank".to_string())));
    }
}
