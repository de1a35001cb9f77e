// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use super::{CommandContext, OutputFormat, print_lists};
use anyhow::Result;
use likedex::Category;

pub struct PopularCommand {
    pub category: Option<Category>,
    pub page: u32,
    pub format: OutputFormat,
}

impl PopularCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        let results = match self.category {
            Some(category) => vec![context.catalog.popular(category, self.page).await],
            None => {
                let (movies, shows, anime) = tokio::join!(
                    context.catalog.popular(Category::Movie, self.page),
                    context.catalog.popular(Category::Show, self.page),
                    context.catalog.popular(Category::Anime, self.page),
                );
                vec![movies, shows, anime]
            }
        };

        let results: Vec<_> = results
            .into_iter()
            .map(|result| context.reconciler.reconcile(result))
            .collect();

        print_lists(&results, self.format)
    }
}
