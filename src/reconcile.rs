// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogResult;
use crate::likes::LikeStore;
use crate::media::{Likeable, MediaList};
use crate::storage::KeyValueStore;

/// Stamps persisted like status onto freshly fetched catalog items
#[derive(Debug)]
pub struct Reconciler<S> {
    likes: Arc<LikeStore<S>>,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            likes: Arc::clone(&self.likes),
        }
    }
}

impl<S: KeyValueStore> Reconciler<S> {
    pub fn new(likes: Arc<LikeStore<S>>) -> Self {
        Self { likes }
    }

    /// Overwrite `is_liked` on every item of `result`.
    ///
    /// The category comes from the result itself. Length and order are
    /// preserved and nothing besides the flag is touched.
    pub fn reconcile(&self, result: CatalogResult) -> CatalogResult {
        let liked = self.likes.liked_titles(result.category());
        debug!(
            category = result.category().as_str(),
            items = result.len(),
            liked = liked.len(),
            "Reconciling catalog result"
        );

        match result {
            MediaList::Movies(items) => MediaList::Movies(stamp(items, &liked)),
            MediaList::Shows(items) => MediaList::Shows(stamp(items, &liked)),
            MediaList::Anime(items) => MediaList::Anime(stamp(items, &liked)),
        }
    }

    pub fn reconcile_items<T: Likeable>(&self, items: Vec<T>) -> Vec<T> {
        let liked = self.likes.liked_titles(T::CATEGORY);
        stamp(items, &liked)
    }
}

/// Set each item's flag from membership of its title in `liked`.
/// Untitled items never match.
pub fn stamp<T: Likeable>(mut items: Vec<T>, liked: &HashSet<String>) -> Vec<T> {
    for item in &mut items {
        let is_liked = !item.title().trim().is_empty() && liked.contains(item.title());
        item.set_liked(is_liked);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{Category, Show};
    use crate::storage::MemoryStore;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            overview: Some(format!("{} overview", name)),
            poster_path: None,
            vote_average: Some(8.4),
            first_air_date: Some("2022-02-17".to_string()),
            is_liked: false,
        }
    }

    fn reconciler_with(liked: &[Show]) -> Reconciler<MemoryStore> {
        let likes = Arc::new(LikeStore::new(MemoryStore::new()));
        for s in liked {
            likes.toggle(s.clone().into());
        }
        Reconciler::new(likes)
    }

    #[test]
    fn stamps_liked_shows_in_order() {
        let reconciler = reconciler_with(&[show(95396, "Severance")]);
        let page = MediaList::Shows(vec![
            show(1, "The Bear"),
            show(95396, "Severance"),
            show(3, "Andor"),
        ]);

        let MediaList::Shows(result) = reconciler.reconcile(page) else {
            panic!("expected shows");
        };

        let flags: Vec<_> = result.iter().map(|s| (s.name.as_str(), s.is_liked)).collect();
        assert_eq!(
            flags,
            vec![("The Bear", false), ("Severance", true), ("Andor", false)]
        );
    }

    #[test]
    fn clears_stale_liked_flags() {
        let reconciler = reconciler_with(&[]);
        let mut stale = show(1, "Andor");
        stale.is_liked = true;

        let result = reconciler.reconcile_items(vec![stale]);
        assert!(!result[0].is_liked);
    }

    #[test]
    fn reconcile_is_deterministic() {
        let reconciler = reconciler_with(&[show(2, "Severance")]);
        let page = MediaList::Shows(vec![show(1, "Severance"), show(2, "Dark")]);

        let first = reconciler.reconcile(page.clone());
        let second = reconciler.reconcile(page);
        assert_eq!(first, second);
        assert_eq!(reconciler.reconcile(first.clone()), first);
    }

    #[test]
    fn only_the_flag_changes() {
        let reconciler = reconciler_with(&[show(5, "Dark")]);
        let input = vec![show(5, "Dark"), show(6, "Lost")];

        let output = reconciler.reconcile_items(input.clone());
        assert_eq!(output.len(), input.len());
        for (before, after) in input.iter().zip(&output) {
            let mut expected = before.clone();
            expected.is_liked = after.is_liked;
            assert_eq!(&expected, after);
        }
    }

    #[test]
    fn untitled_items_never_match() {
        let liked: HashSet<String> = ["".to_string()].into_iter().collect();
        let result = stamp(vec![show(1, ""), show(2, " ")], &liked);
        assert!(result.iter().all(|s| !s.is_liked));
    }

    #[test]
    fn empty_result_stays_empty() {
        let reconciler = reconciler_with(&[show(1, "Severance")]);
        let result = reconciler.reconcile(MediaList::empty(Category::Show));
        assert!(result.is_empty());
        assert_eq!(result.category(), Category::Show);
    }
}
