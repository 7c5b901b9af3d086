// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Symbol search over a loaded [`SearchIndex`].
//!
//! Queries are normalized the way the doxygen search box does it: spaces are
//! dropped and the text is lower-cased before it is compared with entry keys.

use crate::{
    common::{decode_entities, decode_page_name, split_title, PageRef},
    index::SearchIndex,
    shard::{Category, EntryKey, Location, SearchEntry},
};
use clap::ValueEnum;
use serde::Serialize;
use std::{cmp::Ordering, collections::HashMap, fmt};
use tracing::{debug, instrument};

/// How a query is compared against symbol names.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Name starts with the query, what the search box does.
    #[default]
    Prefix,
    /// Name contains the query anywhere.
    Substring,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchMode::Prefix => write!(f, "prefix"),
            MatchMode::Substring => write!(f, "substring"),
        }
    }
}

/// Structured search query
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Text as typed by the user
    pub text: String,
    /// Prefix or substring matching
    pub mode: MatchMode,
    /// Restrict to these categories, all when `None`
    pub categories: Option<Vec<Category>>,
    /// Maximum results to return
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Create a prefix query with the default limit
    pub fn text(query: &str) -> Self {
        Self {
            text: query.to_string(),
            limit: Some(50),
            ..Default::default()
        }
    }

    /// Set the match mode
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a limit to the query
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add category filter
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// The query text as it is compared: spaces removed, lower-cased.
    pub fn normalized(&self) -> String {
        normalize_query(&self.text)
    }
}

/// Drops spaces and lower-cases the input.
pub fn normalize_query(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// A location of a matched symbol with its title decoded.
#[derive(Debug, Clone, Serialize)]
pub struct ResultLocation {
    /// Page url with anchor
    pub url: String,
    /// Title with HTML entities decoded
    pub title: String,
    /// Scoped signature, for titles that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Defining file or scope
    pub source: String,
    /// Decoded page name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageRef>,
}

impl From<&Location> for ResultLocation {
    fn from(location: &Location) -> Self {
        let (signature, source) = split_title(&location.title);
        ResultLocation {
            url: location.url.clone(),
            title: decode_entities(&location.title),
            signature,
            source,
            page: decode_page_name(&location.url),
        }
    }
}

/// Search result with relevance score
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Display name of the symbol
    pub name: String,
    /// Key of the entry in its shard
    pub key: EntryKey,
    /// Section the entry was found in
    pub category: Category,
    /// Relevance score (0.0 to 1.0)
    pub score: f32,
    /// Where the symbol is documented
    pub locations: Vec<ResultLocation>,
}

impl SearchResult {
    fn new(entry: &SearchEntry, category: Category, score: f32) -> Self {
        SearchResult {
            name: entry.name.clone(),
            key: entry.key.clone(),
            category,
            score,
            locations: entry.locations.iter().map(ResultLocation::from).collect(),
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)?;
        for location in &self.locations {
            write!(f, "\n    {} ({})", location.title, location.url)?;
        }
        Ok(())
    }
}

/// Execute a search query against the index.
///
/// Results are ranked exact match first, then prefix, then substring with
/// earlier positions ranked higher. A symbol listed both in the `all`
/// section and in its own category is returned once, with the specific
/// category.
#[instrument(skip_all, fields(query = %query.text))]
pub fn execute_search(index: &SearchIndex, query: &SearchQuery) -> Vec<SearchResult> {
    let needle = query.normalized();
    if needle.is_empty() {
        return vec![];
    }
    let first = needle.chars().next();

    let mut results: Vec<SearchResult> = Vec::new();
    let mut seen: HashMap<(String, Vec<String>), usize> = HashMap::new();

    for (id, shard) in index.shards() {
        if let Some(ref categories) = query.categories {
            if !categories.contains(&id.category) {
                continue;
            }
        }

        // a prefix can only match the shard holding its first letter
        if query.mode == MatchMode::Prefix && shard.letter().is_some() && shard.letter() != first
        {
            continue;
        }

        for entry in shard.entries() {
            let name = entry
                .key
                .name()
                .unwrap_or_else(|| entry.name.to_lowercase());
            let score = match calculate_relevance(&name, &needle, query.mode) {
                Some(score) => score,
                None => continue,
            };

            let identity = (
                entry.name.clone(),
                entry.locations.iter().map(|l| l.url.clone()).collect(),
            );
            match seen.get(&identity) {
                Some(&i) => {
                    if results[i].category == Category::All {
                        results[i].category = id.category;
                        results[i].key = entry.key.clone();
                    }
                }
                None => {
                    seen.insert(identity, results.len());
                    results.push(SearchResult::new(entry, id.category, score));
                }
            }
        }
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.key.index.cmp(&b.key.index))
    });
    if let Some(limit) = query.limit {
        results.truncate(limit);
    }

    debug!("{} results for {:?}", results.len(), needle);
    results
}

/// Relevance of `name` for the normalized query, `None` when it does not
/// match in the given mode. Both sides are already lower-case.
fn calculate_relevance(name: &str, query: &str, mode: MatchMode) -> Option<f32> {
    if name == query {
        return Some(1.0);
    }

    if name.starts_with(query) {
        return Some(0.9);
    }

    if mode == MatchMode::Substring {
        if let Some(pos) = name.find(query) {
            let pos = pos as f32;
            let len = name.len() as f32;
            return Some(0.7 - (pos / len) * 0.3);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::{Shard, ShardId};

    fn index() -> SearchIndex {
        let mut index = SearchIndex::new();
        for name in ["all_9.js", "functions_4.js", "variables_3.js"] {
            let text = std::fs::read_to_string(format!("testdata/search/{}", name)).unwrap();
            index.insert(
                ShardId::from_file_name(name).unwrap(),
                Shard::parse(&text).unwrap(),
            );
        }
        index
    }

    fn small_index() -> SearchIndex {
        let mut index = SearchIndex::new();
        index.insert(
            ShardId::from_file_name("all_0.js").unwrap(),
            Shard::parse(
                "var searchData=[\
                 ['detector_5factivate_1',['detector_activate',['../i2c__presence__detector_8c.html#a63',1,'i2c_presence_detector.c']]],\
                 ['detector_5fget_5fnext_2',['detector_get_next',['../i2c__distance__detector_8c.html#ad2',1,'i2c_distance_detector.c']]]];",
            )
            .unwrap(),
        );
        index.insert(
            ShardId::from_file_name("functions_0.js").unwrap(),
            Shard::parse(
                "var searchData=[\
                 ['detector_5factivate_10',['detector_activate',['../i2c__presence__detector_8c.html#a63',1,'i2c_presence_detector.c']]]];",
            )
            .unwrap(),
        );
        index.insert(
            ShardId::from_file_name("variables_0.js").unwrap(),
            Shard::parse(
                "var searchData=[\
                 ['current_5fdetector_20',['current_detector',['../example_8c.html#a1',1,'example.c']]]];",
            )
            .unwrap(),
        );
        index
    }

    #[test]
    fn test_relevance_exact_match() {
        assert_eq!(
            calculate_relevance("detector_activate", "detector_activate", MatchMode::Prefix),
            Some(1.0)
        );
    }

    #[test]
    fn test_relevance_prefix_match() {
        let score = calculate_relevance("detector_activate", "det", MatchMode::Prefix).unwrap();
        assert!(score > 0.8 && score <= 0.9);
    }

    #[test]
    fn test_relevance_contains_match() {
        assert_eq!(
            calculate_relevance("current_detector", "detector", MatchMode::Prefix),
            None
        );
        let score =
            calculate_relevance("current_detector", "detector", MatchMode::Substring).unwrap();
        assert!(score > 0.4 && score < 0.7);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_query("  I2C Address "), "i2caddress");
        assert_eq!(normalize_query("cal_temps"), "cal_temps");
    }

    #[test]
    fn test_prefix_search() {
        let index = index();
        let results = execute_search(&index, &SearchQuery::text("I2C_ADDRESS"));

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.name.to_lowercase().starts_with("i2c_address")));
        assert!(results.iter().any(|r| r.name == "I2C_ADDRESS_HIGH"));
    }

    #[test]
    fn test_exact_ranks_first() {
        let index = index();
        let results = execute_search(&index, &SearchQuery::text("cal_result"));

        assert_eq!(results[0].name, "cal_result");
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].locations.len(), 2);
        assert_eq!(results[1].name, "cal_results");
    }

    #[test]
    fn test_locations_decoded() {
        let index = index();
        let results = execute_search(&index, &SearchQuery::text("debugmon_handler"));

        assert_eq!(results.len(), 1);
        let location = &results[0].locations[0];
        assert_eq!(location.signature.as_deref(), Some("DebugMon_Handler(void)"));
        assert_eq!(location.source, "stm32l4xx_it.c");
        assert_eq!(location.page.as_ref().unwrap().name, "stm32l4xx_it.h");
    }

    #[test]
    fn test_duplicates_collapse_to_category() {
        let index = small_index();
        let results = execute_search(&index, &SearchQuery::text("detector_a"));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "detector_activate");
        assert_eq!(results[0].category, Category::Functions);
        assert_eq!(results[0].key.to_string(), "detector_5factivate_10");
    }

    #[test]
    fn test_substring_and_filters() {
        let index = small_index();

        let query = SearchQuery::text("detector").with_mode(MatchMode::Substring);
        let results = execute_search(&index, &query);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].name, "current_detector");

        let query = query.with_categories(vec![Category::Variables]);
        let results = execute_search(&index, &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, Category::Variables);

        let query = SearchQuery::text("detector").with_limit(1);
        assert_eq!(execute_search(&index, &query).len(), 1);
    }

    #[test]
    fn test_empty_query() {
        let index = small_index();
        assert!(execute_search(&index, &SearchQuery::text("   ")).is_empty());
    }
}
