// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Media category. Partitions both catalog results and liked storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Movie,
    Show,
    Anime,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Movie, Category::Show, Category::Anime];

    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "show" | "shows" | "tv" | "series" => Ok(Self::Show),
            "anime" => Ok(Self::Anime),
            _ => anyhow::bail!("Invalid category: {}. Use 'movie', 'show', or 'anime'", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Show => "show",
            Category::Anime => "anime",
        }
    }

    /// Name of the persisted slot holding this category's liked items
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Movie => "liked_movies",
            Category::Show => "liked_shows",
            Category::Anime => "liked_anime",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Movie => write!(f, "Movies"),
            Category::Show => write!(f, "TV Shows"),
            Category::Anime => write!(f, "Anime"),
        }
    }
}

/// Behaviour shared by every category's display model.
///
/// Identity is the title string, not the numeric id: two items with the
/// same title in the same category are the same item as far as likes go.
pub trait Likeable: Clone + Serialize + DeserializeOwned + Send + Sync {
    const CATEGORY: Category;

    fn id(&self) -> u64;
    fn title(&self) -> &str;
    fn is_liked(&self) -> bool;
    fn set_liked(&mut self, liked: bool);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: u64,
    pub canonical_title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub poster_image: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub is_liked: bool,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        parse_year(self.release_date.as_deref())
    }
}

impl Show {
    pub fn release_year(&self) -> Option<i32> {
        parse_year(self.first_air_date.as_deref())
    }
}

impl Anime {
    pub fn release_year(&self) -> Option<i32> {
        parse_year(self.start_date.as_deref())
    }
}

fn parse_year(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

impl Likeable for Movie {
    const CATEGORY: Category = Category::Movie;

    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn is_liked(&self) -> bool {
        self.is_liked
    }
    fn set_liked(&mut self, liked: bool) {
        self.is_liked = liked;
    }
}

impl Likeable for Show {
    const CATEGORY: Category = Category::Show;

    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn is_liked(&self) -> bool {
        self.is_liked
    }
    fn set_liked(&mut self, liked: bool) {
        self.is_liked = liked;
    }
}

impl Likeable for Anime {
    const CATEGORY: Category = Category::Anime;

    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.canonical_title
    }
    fn is_liked(&self) -> bool {
        self.is_liked
    }
    fn set_liked(&mut self, liked: bool) {
        self.is_liked = liked;
    }
}

/// A single item of any category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum MediaItem {
    Movie(Movie),
    Show(Show),
    Anime(Anime),
}

impl MediaItem {
    /// Item carrying only an id and a title, as when a user names it directly
    pub fn new(category: Category, id: u64, title: impl Into<String>) -> Self {
        let title = title.into();
        match category {
            Category::Movie => MediaItem::Movie(Movie {
                id,
                title,
                overview: None,
                poster_path: None,
                vote_average: None,
                release_date: None,
                is_liked: false,
            }),
            Category::Show => MediaItem::Show(Show {
                id,
                name: title,
                overview: None,
                poster_path: None,
                vote_average: None,
                first_air_date: None,
                is_liked: false,
            }),
            Category::Anime => MediaItem::Anime(Anime {
                id,
                canonical_title: title,
                synopsis: None,
                poster_image: None,
                average_rating: None,
                start_date: None,
                episode_count: None,
                is_liked: false,
            }),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            MediaItem::Movie(_) => Category::Movie,
            MediaItem::Show(_) => Category::Show,
            MediaItem::Anime(_) => Category::Anime,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            MediaItem::Movie(m) => m.id(),
            MediaItem::Show(s) => s.id(),
            MediaItem::Anime(a) => a.id(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie(m) => m.title(),
            MediaItem::Show(s) => s.title(),
            MediaItem::Anime(a) => a.title(),
        }
    }

    pub fn is_liked(&self) -> bool {
        match self {
            MediaItem::Movie(m) => m.is_liked(),
            MediaItem::Show(s) => s.is_liked(),
            MediaItem::Anime(a) => a.is_liked(),
        }
    }

    pub fn set_liked(&mut self, liked: bool) {
        match self {
            MediaItem::Movie(m) => m.set_liked(liked),
            MediaItem::Show(s) => s.set_liked(liked),
            MediaItem::Anime(a) => a.set_liked(liked),
        }
    }

    pub fn overview(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.overview.as_deref(),
            MediaItem::Show(s) => s.overview.as_deref(),
            MediaItem::Anime(a) => a.synopsis.as_deref(),
        }
    }

    pub fn rating(&self) -> Option<f64> {
        match self {
            MediaItem::Movie(m) => m.vote_average,
            MediaItem::Show(s) => s.vote_average,
            MediaItem::Anime(a) => a.average_rating,
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        match self {
            MediaItem::Movie(m) => m.release_year(),
            MediaItem::Show(s) => s.release_year(),
            MediaItem::Anime(a) => a.release_year(),
        }
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl From<Show> for MediaItem {
    fn from(show: Show) -> Self {
        MediaItem::Show(show)
    }
}

impl From<Anime> for MediaItem {
    fn from(anime: Anime) -> Self {
        MediaItem::Anime(anime)
    }
}

/// An ordered list of items from one category.
///
/// Used both for freshly fetched catalog pages and for liked collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "items", rename_all = "lowercase")]
pub enum MediaList {
    #[serde(rename = "movie")]
    Movies(Vec<Movie>),
    #[serde(rename = "show")]
    Shows(Vec<Show>),
    Anime(Vec<Anime>),
}

impl MediaList {
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Movie => MediaList::Movies(Vec::new()),
            Category::Show => MediaList::Shows(Vec::new()),
            Category::Anime => MediaList::Anime(Vec::new()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            MediaList::Movies(_) => Category::Movie,
            MediaList::Shows(_) => Category::Show,
            MediaList::Anime(_) => Category::Anime,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MediaList::Movies(items) => items.len(),
            MediaList::Shows(items) => items.len(),
            MediaList::Anime(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn titles(&self) -> Vec<&str> {
        match self {
            MediaList::Movies(items) => items.iter().map(|i| i.title()).collect(),
            MediaList::Shows(items) => items.iter().map(|i| i.title()).collect(),
            MediaList::Anime(items) => items.iter().map(|i| i.title()).collect(),
        }
    }

    pub fn into_items(self) -> Vec<MediaItem> {
        match self {
            MediaList::Movies(items) => items.into_iter().map(MediaItem::from).collect(),
            MediaList::Shows(items) => items.into_iter().map(MediaItem::from).collect(),
            MediaList::Anime(items) => items.into_iter().map(MediaItem::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: None,
            poster_path: None,
            vote_average: Some(7.9),
            release_date: Some("2021-09-15".to_string()),
            is_liked: false,
        }
    }

    #[test]
    fn category_parses_aliases() {
        assert_eq!(Category::from_str("Movies").unwrap(), Category::Movie);
        assert_eq!(Category::from_str("tv").unwrap(), Category::Show);
        assert_eq!(Category::from_str("series").unwrap(), Category::Show);
        assert_eq!(Category::from_str("ANIME").unwrap(), Category::Anime);
        assert!(Category::from_str("podcast").is_err());
    }

    #[test]
    fn storage_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| c.storage_key()).collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn media_item_exposes_title_per_category() {
        let show = MediaItem::from(Show {
            id: 95396,
            name: "Severance".to_string(),
            overview: None,
            poster_path: None,
            vote_average: None,
            first_air_date: Some("2022-02-17".to_string()),
            is_liked: false,
        });
        assert_eq!(show.title(), "Severance");
        assert_eq!(show.category(), Category::Show);
        assert_eq!(show.release_year(), Some(2022));
    }

    #[test]
    fn set_liked_only_touches_flag() {
        let original = movie(1, "Dune");
        let mut item = MediaItem::from(original.clone());
        item.set_liked(true);

        let MediaItem::Movie(updated) = item else {
            panic!("expected a movie");
        };
        assert!(updated.is_liked);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.release_date, original.release_date);
    }

    #[test]
    fn release_year_ignores_malformed_dates() {
        let mut m = movie(2, "Arrival");
        m.release_date = Some("soon".to_string());
        assert_eq!(m.release_year(), None);
        m.release_date = None;
        assert_eq!(m.release_year(), None);
    }

    #[test]
    fn media_list_reports_category_and_titles() {
        let list = MediaList::Movies(vec![movie(1, "Dune"), movie(2, "Arrival")]);
        assert_eq!(list.category(), Category::Movie);
        assert_eq!(list.titles(), vec!["Dune", "Arrival"]);
        assert_eq!(list.len(), 2);
        assert!(MediaList::empty(Category::Anime).is_empty());
    }
}
