// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

//! Persisted per-category liked items.
//!
//! Every category lives in its own storage slot as a JSON array. Items are
//! identified by title, so liking a second item with an already liked title
//! is the same as un-liking the first one. Reads never fail: a missing or
//! unreadable slot is an empty collection and gets overwritten by the next
//! toggle.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::media::{Anime, Category, Likeable, MediaItem, MediaList, Movie, Show};
use crate::storage::KeyValueStore;

pub type LikedCollection = MediaList;

/// Outcome of reading one category slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotRead<T> {
    Stored(Vec<T>),
    Missing,
    Unreadable,
}

impl<T> SlotRead<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            SlotRead::Stored(items) => items,
            SlotRead::Missing | SlotRead::Unreadable => Vec::new(),
        }
    }
}

fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}

#[derive(Debug)]
pub struct LikeStore<S> {
    store: S,
    // One writer per category; indexed by `slot_index`
    write_locks: [Mutex<()>; 3],
}

fn slot_index(category: Category) -> usize {
    match category {
        Category::Movie => 0,
        Category::Show => 1,
        Category::Anime => 2,
    }
}

impl<S: KeyValueStore> LikeStore<S> {
    /// Create a like store on top of a key-value backend
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    /// Get the underlying storage backend
    pub fn backend(&self) -> &S {
        &self.store
    }

    fn lock(&self, category: Category) -> MutexGuard<'_, ()> {
        self.write_locks[slot_index(category)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Read and decode a category slot, collapsing duplicate titles.
    pub fn read_slot<T: Likeable>(&self) -> SlotRead<T> {
        let key = T::CATEGORY.storage_key();

        let blob = match self.store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return SlotRead::Missing,
            Err(e) => {
                warn!("Failed to read liked {} slot: {:#}", T::CATEGORY.as_str(), e);
                return SlotRead::Unreadable;
            }
        };

        match serde_json::from_str::<Vec<T>>(&blob) {
            Ok(items) => {
                let mut seen = HashSet::new();
                let items = items
                    .into_iter()
                    .filter(|item| seen.insert(item.title().to_string()))
                    .collect();
                SlotRead::Stored(items)
            }
            Err(e) => {
                warn!(
                    "Liked {} slot is corrupt, treating as empty: {}",
                    T::CATEGORY.as_str(),
                    e
                );
                SlotRead::Unreadable
            }
        }
    }

    fn write_slot<T: Likeable>(&self, items: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)
            .with_context(|| format!("Failed to serialize liked {}", T::CATEGORY.as_str()))?;
        self.store.set(T::CATEGORY.storage_key(), &content)
    }

    /// Flip the liked state of `item` and persist its category.
    ///
    /// Returns whether the item is liked afterwards. A failed write is
    /// logged and otherwise ignored.
    pub fn toggle(&self, item: MediaItem) -> bool {
        match item {
            MediaItem::Movie(movie) => self.toggle_entry(movie),
            MediaItem::Show(show) => self.toggle_entry(show),
            MediaItem::Anime(anime) => self.toggle_entry(anime),
        }
    }

    /// Toggle a single typed item; see [`LikeStore::toggle`]
    pub fn toggle_entry<T: Likeable>(&self, mut item: T) -> bool {
        if is_blank(item.title()) {
            debug!(
                "Ignoring like toggle for untitled {} {}",
                T::CATEGORY.as_str(),
                item.id()
            );
            return false;
        }

        let _guard = self.lock(T::CATEGORY);
        let mut items = self.read_slot::<T>().into_items();

        let liked = match items.iter().position(|entry| entry.title() == item.title()) {
            Some(index) => {
                let mut removed = items.remove(index);
                removed.set_liked(false);
                false
            }
            None => {
                item.set_liked(true);
                items.push(item.clone());
                true
            }
        };

        debug!(
            category = T::CATEGORY.as_str(),
            title = item.title(),
            liked,
            "Toggled like"
        );

        if let Err(e) = self.write_slot(&items) {
            warn!(
                "Failed to persist liked {}: {:#}",
                T::CATEGORY.as_str(),
                e
            );
        }

        liked
    }

    /// Check if an item is liked
    pub fn is_liked(&self, item: &MediaItem) -> bool {
        match item {
            MediaItem::Movie(movie) => self.contains(movie),
            MediaItem::Show(show) => self.contains(show),
            MediaItem::Anime(anime) => self.contains(anime),
        }
    }

    /// Check if a typed item's title is in its category slot
    pub fn contains<T: Likeable>(&self, item: &T) -> bool {
        if is_blank(item.title()) {
            return false;
        }
        self.read_slot::<T>()
            .into_items()
            .iter()
            .any(|entry| entry.title() == item.title())
    }

    /// All liked items of one type, each flagged as liked
    pub fn liked<T: Likeable>(&self) -> Vec<T> {
        let mut items = self.read_slot::<T>().into_items();
        for item in &mut items {
            item.set_liked(true);
        }
        items
    }

    /// Get all liked items for a category
    pub fn get_liked(&self, category: Category) -> LikedCollection {
        match category {
            Category::Movie => MediaList::Movies(self.liked::<Movie>()),
            Category::Show => MediaList::Shows(self.liked::<Show>()),
            Category::Anime => MediaList::Anime(self.liked::<Anime>()),
        }
    }

    /// Titles currently liked in `category`, read in one pass.
    pub fn liked_titles(&self, category: Category) -> HashSet<String> {
        self.get_liked(category)
            .titles()
            .into_iter()
            .filter(|title| !is_blank(title))
            .map(str::to_string)
            .collect()
    }

    /// Remove all liked items for a category
    pub fn clear(&self, category: Category) {
        let _guard = self.lock(category);
        if let Err(e) = self.store.remove(category.storage_key()) {
            warn!("Failed to clear liked {}: {:#}", category.as_str(), e);
        }
    }
}
