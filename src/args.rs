// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use doxsearch::{
    search::{MatchMode, SearchQuery},
    shard::Category,
};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Symbol to search for, as typed in the search box.
    #[arg()]
    pub query: Option<String>,

    /// The doxygen html/search directory holding the shard files.
    #[arg(long, env = "DOXSEARCH_DIR", default_value = "doc/html/search")]
    pub dir: PathBuf,

    /// Read queries line by line from stdin.
    #[arg(short, long)]
    pub interactive: bool,

    /// How the query is matched against symbol names.
    #[arg(long, env = "DOXSEARCH_MODE", default_value = "prefix")]
    pub mode: MatchMode,

    /// Only search these index categories. Repeat for more than one.
    #[arg(short, long, value_enum)]
    pub category: Vec<Category>,

    /// Maximum number of results per query.
    #[arg(short, long, env = "DOXSEARCH_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Check the index and print every issue found.
    #[arg(long)]
    pub validate: bool,

    /// Print shard, entry and location counts.
    #[arg(long)]
    pub stats: bool,

    /// Application log level
    #[arg(long, env, default_value = "warn")]
    pub rust_log: LevelFilter,

    /// Enable Tracy profiler broadcast
    #[arg(long, env)]
    pub tracy: bool,
}

impl Args {
    /// Builds the search query for one input line.
    pub fn query(&self, text: &str) -> SearchQuery {
        let query = SearchQuery::text(text)
            .with_mode(self.mode)
            .with_limit(self.limit);
        match self.category.is_empty() {
            true => query,
            false => query.with_categories(self.category.clone()),
        }
    }
}
