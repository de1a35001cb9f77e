// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use super::{CommandContext, OutputFormat, print_lists};
use anyhow::Result;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use inquire::Confirm;
use likedex::{Category, Likeable, MediaItem, MediaList};

pub enum LikesCommand {
    List {
        category: Option<Category>,
        filter: Option<String>,
        format: OutputFormat,
    },
    Toggle {
        category: Category,
        id: u64,
        title: Option<String>,
    },
    Clear {
        category: Category,
        yes: bool,
    },
}

impl LikesCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        match self {
            Self::List {
                category,
                filter,
                format,
            } => list_likes(&context, category, filter.as_deref(), format),
            Self::Toggle {
                category,
                id,
                title,
            } => toggle_like(&context, category, id, title).await,
            Self::Clear { category, yes } => clear_likes(&context, category, yes),
        }
    }
}

fn list_likes(
    context: &CommandContext,
    category: Option<Category>,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let lists: Vec<MediaList> = categories
        .into_iter()
        .map(|category| {
            let liked = context.likes.get_liked(category);
            match filter {
                Some(query) => fuzzy_filter(liked, query),
                None => liked,
            }
        })
        .collect();

    if format == OutputFormat::Text && lists.iter().all(|l| l.is_empty()) {
        println!("No liked items found");
        return Ok(());
    }

    print_lists(&lists, format)
}

async fn toggle_like(
    context: &CommandContext,
    category: Category,
    id: u64,
    title: Option<String>,
) -> Result<()> {
    // Likes are keyed by title, so look it up when not given
    let item = match title {
        Some(title) => MediaItem::new(category, id, title),
        None => context
            .catalog
            .details(category, id)
            .await
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Could not look up {} {}. Pass --title to like it anyway.",
                    category.as_str(),
                    id
                )
            })?,
    };

    let title = item.title().to_string();
    if title.trim().is_empty() {
        anyhow::bail!("{} {} has no title and cannot be liked", category.as_str(), id);
    }

    if context.likes.toggle(item) {
        println!("Liked '{}'", title);
    } else {
        println!("Removed '{}' from liked {}", title, category);
    }
    Ok(())
}

fn clear_likes(context: &CommandContext, category: Category, yes: bool) -> Result<()> {
    let count = context.likes.get_liked(category).len();
    if count == 0 {
        println!("No liked {} to clear", category);
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new(&format!("Remove all {} liked {}?", count, category))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            return Ok(());
        }
    }

    context.likes.clear(category);
    println!("Cleared {} liked {}", count, category);
    Ok(())
}

fn fuzzy_filter(list: MediaList, query: &str) -> MediaList {
    let matcher = SkimMatcherV2::default();
    match list {
        MediaList::Movies(items) => MediaList::Movies(keep_matching(items, &matcher, query)),
        MediaList::Shows(items) => MediaList::Shows(keep_matching(items, &matcher, query)),
        MediaList::Anime(items) => MediaList::Anime(keep_matching(items, &matcher, query)),
    }
}

fn keep_matching<T: Likeable>(items: Vec<T>, matcher: &SkimMatcherV2, query: &str) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| matcher.fuzzy_match(item.title(), query).is_some())
        .collect()
}
