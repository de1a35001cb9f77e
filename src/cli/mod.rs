// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use std::sync::Arc;

use likedex::{Catalog, Config, FileStore, LikeStore, MediaItem, MediaList, Reconciler};

pub mod browse;
pub mod details;
pub mod likes;
pub mod search;

pub use browse::PopularCommand;
pub use details::DetailsCommand;
pub use likes::LikesCommand;
pub use search::SearchCommand;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Invalid format: {}. Use 'text' or 'json'", s),
        }
    }
}

/// Shared state for command execution
pub struct CommandContext {
    pub likes: Arc<LikeStore<FileStore>>,
    pub reconciler: Reconciler<FileStore>,
    pub catalog: Catalog,
}

impl CommandContext {
    pub fn new(config: &Config, show_progress: bool) -> Result<Self> {
        let data_dir = config.data_dir()?;
        tracing::debug!("Using data directory {}", data_dir.display());

        let likes = Arc::new(LikeStore::new(FileStore::new(&data_dir)?));
        let reconciler = Reconciler::new(Arc::clone(&likes));
        let catalog = Catalog::new(&config.catalog, show_progress)?;

        Ok(Self {
            likes,
            reconciler,
            catalog,
        })
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_item(item: &MediaItem) -> String {
    let marker = if item.is_liked() { "♥" } else { " " };
    let year = item
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    let rating = item
        .rating()
        .map(|r| format!("  ★ {:.1}", r))
        .unwrap_or_default();
    let title = if item.title().trim().is_empty() {
        "<untitled>"
    } else {
        item.title()
    };

    format!("{} [{:6}] {}{}{}", marker, item.id(), title, year, rating)
}

pub fn print_text_list(list: &MediaList) {
    println!("\n{}:", list.category());
    if list.is_empty() {
        println!("  (nothing found)");
        return;
    }
    for item in list.clone().into_items() {
        println!("  {}", format_item(&item));
    }
}

pub fn print_lists(lists: &[MediaList], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&lists),
        OutputFormat::Text => {
            for list in lists {
                print_text_list(list);
            }
            Ok(())
        }
    }
}
