// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use super::{CommandContext, OutputFormat, format_item, print_json};
use anyhow::Result;
use likedex::{Category, MediaItem};

pub struct DetailsCommand {
    pub category: Category,
    pub id: u64,
    pub format: OutputFormat,
}

impl DetailsCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        let mut item = context
            .catalog
            .details(self.category, self.id)
            .await
            .ok_or_else(|| anyhow::anyhow!("{} {} not found", self.category.as_str(), self.id))?;

        let liked = context.likes.is_liked(&item);
        item.set_liked(liked);

        match self.format {
            OutputFormat::Json => print_json(&item),
            OutputFormat::Text => {
                println!("{}", format_item(&item));
                if let MediaItem::Anime(anime) = &item {
                    if let Some(episodes) = anime.episode_count {
                        println!("  Episodes: {}", episodes);
                    }
                }
                if let Some(poster) = poster_url(&context, &item) {
                    println!("  Poster: {}", poster);
                }
                if let Some(overview) = item.overview() {
                    println!("\n{}", overview);
                }
                Ok(())
            }
        }
    }
}

fn poster_url(context: &CommandContext, item: &MediaItem) -> Option<String> {
    match item {
        MediaItem::Movie(movie) => movie
            .poster_path
            .as_deref()
            .map(|p| context.catalog.tmdb.poster_url(p)),
        MediaItem::Show(show) => show
            .poster_path
            .as_deref()
            .map(|p| context.catalog.tmdb.poster_url(p)),
        MediaItem::Anime(anime) => anime.poster_image.clone(),
    }
}
