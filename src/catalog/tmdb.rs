// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

//! TMDB client for movies and TV shows.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::request::JsonClient;
use crate::config::CatalogConfig;
use crate::media::{Movie, Show};

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbShow {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

// TMDB sends "" for unknown dates and overviews
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbMovie> for Movie {
    fn from(m: TmdbMovie) -> Self {
        Movie {
            id: m.id,
            title: m.title,
            overview: non_empty(m.overview),
            poster_path: non_empty(m.poster_path),
            vote_average: m.vote_average,
            release_date: non_empty(m.release_date),
            is_liked: false,
        }
    }
}

impl From<TmdbShow> for Show {
    fn from(s: TmdbShow) -> Self {
        Show {
            id: s.id,
            name: s.name,
            overview: non_empty(s.overview),
            poster_path: non_empty(s.poster_path),
            vote_average: s.vote_average,
            first_air_date: non_empty(s.first_air_date),
            is_liked: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: JsonClient,
    base_url: String,
    image_base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig, http: JsonClient) -> Self {
        Self {
            http,
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
            image_base_url: config.tmdb_image_base_url.trim_end_matches('/').to_string(),
            api_key: config.tmdb_api_key.clone(),
            language: config.language.clone(),
        }
    }

    /// Full URL for `path` with the key and language attached
    pub fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("No TMDB API key configured. Run 'likedex setup' or set TMDB_API_KEY.");
        }

        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(params.iter().cloned());

        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse_with_params(&raw, &query).with_context(|| format!("Invalid TMDB URL: {}", raw))
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }

    pub async fn popular_movies(&self, page: u32) -> Result<Vec<Movie>> {
        debug!(page, "Fetching popular movies");
        let url = self.endpoint("movie/popular", &[("page", page.to_string())])?;
        let response: TmdbPage<TmdbMovie> = self.http.get_json(url, None).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }

    pub async fn popular_shows(&self, page: u32) -> Result<Vec<Show>> {
        debug!(page, "Fetching popular TV shows");
        let url = self.endpoint("tv/popular", &[("page", page.to_string())])?;
        let response: TmdbPage<TmdbShow> = self.http.get_json(url, None).await?;
        Ok(response.results.into_iter().map(Show::from).collect())
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>> {
        debug!(query, page, "Searching TMDB movies");
        let url = self.endpoint(
            "search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )?;
        let response: TmdbPage<TmdbMovie> = self.http.get_json(url, None).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }

    pub async fn search_shows(&self, query: &str, page: u32) -> Result<Vec<Show>> {
        debug!(query, page, "Searching TMDB TV shows");
        let url = self.endpoint(
            "search/tv",
            &[("query", query.to_string()), ("page", page.to_string())],
        )?;
        let response: TmdbPage<TmdbShow> = self.http.get_json(url, None).await?;
        Ok(response.results.into_iter().map(Show::from).collect())
    }

    pub async fn movie(&self, id: u64) -> Result<Movie> {
        debug!(id, "Fetching movie details");
        let url = self.endpoint(&format!("movie/{}", id), &[])?;
        let movie: TmdbMovie = self.http.get_json(url, None).await?;
        Ok(movie.into())
    }

    pub async fn show(&self, id: u64) -> Result<Show> {
        debug!(id, "Fetching TV show details");
        let url = self.endpoint(&format!("tv/{}", id), &[])?;
        let show: TmdbShow = self.http.get_json(url, None).await?;
        Ok(show.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::request::decode_json;

    fn client(api_key: &str) -> TmdbClient {
        let config = CatalogConfig {
            tmdb_api_key: api_key.to_string(),
            ..CatalogConfig::default()
        };
        TmdbClient::new(&config, JsonClient::new(5, false).unwrap())
    }

    #[test]
    fn maps_movie_page() {
        let body = r#"{
            "page": 1,
            "results": [
                {
                    "adult": false,
                    "id": 438631,
                    "title": "Dune",
                    "overview": "Paul Atreides...",
                    "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                    "vote_average": 7.8,
                    "release_date": "2021-09-15",
                    "genre_ids": [878, 12]
                },
                {
                    "id": 1,
                    "title": "Untitled Project",
                    "overview": "",
                    "poster_path": null,
                    "release_date": ""
                }
            ],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let page: TmdbPage<TmdbMovie> = decode_json(body).unwrap();
        assert_eq!(page.total_pages, 500);

        let movies: Vec<Movie> = page.results.into_iter().map(Movie::from).collect();
        assert_eq!(movies[0].title, "Dune");
        assert_eq!(movies[0].release_year(), Some(2021));
        assert!(!movies[0].is_liked);
        assert_eq!(movies[1].overview, None);
        assert_eq!(movies[1].release_date, None);
        assert_eq!(movies[1].vote_average, None);
    }

    #[test]
    fn maps_show_details() {
        let body = r#"{
            "id": 95396,
            "name": "Severance",
            "overview": "Mark leads a team of office workers...",
            "first_air_date": "2022-02-17",
            "vote_average": 8.4,
            "number_of_seasons": 2
        }"#;

        let show: Show = decode_json::<TmdbShow>(body).unwrap().into();
        assert_eq!(show.name, "Severance");
        assert_eq!(show.release_year(), Some(2022));
    }

    #[test]
    fn endpoint_requires_api_key() {
        assert!(client("").endpoint("movie/popular", &[]).is_err());
    }

    #[test]
    fn endpoint_encodes_query() {
        let url = client("k3y")
            .endpoint("/search/movie", &[("query", "Blade Runner".to_string())])
            .unwrap();

        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("api_key".to_string(), "k3y".to_string())));
        assert!(pairs.contains(&("query".to_string(), "Blade Runner".to_string())));
    }

    #[test]
    fn poster_url_joins_image_base() {
        assert_eq!(
            client("k").poster_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }
}
