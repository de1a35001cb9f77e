// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use super::{CommandContext, OutputFormat, print_lists};
use anyhow::Result;
use likedex::Category;

pub struct SearchCommand {
    pub query: String,
    pub category: Option<Category>,
    pub page: u32,
    pub format: OutputFormat,
}

impl SearchCommand {
    pub async fn execute(self, context: CommandContext) -> Result<()> {
        if self.query.trim().is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        if self.format == OutputFormat::Text {
            match self.category {
                Some(category) => eprintln!("Searching {} for '{}'...", category, self.query),
                None => eprintln!("Searching movies, TV shows and anime for '{}'...", self.query),
            }
        }

        let results = match self.category {
            Some(category) => vec![
                context
                    .catalog
                    .search(category, &self.query, self.page)
                    .await,
            ],
            None => {
                context
                    .catalog
                    .search_everywhere(&self.query, self.page)
                    .await
            }
        };

        let results: Vec<_> = results
            .into_iter()
            .map(|result| context.reconciler.reconcile(result))
            .collect();

        if self.format == OutputFormat::Text && results.iter().all(|r| r.is_empty()) {
            println!("No results found for '{}'", self.query);
            return Ok(());
        }

        print_lists(&results, self.format)
    }
}
