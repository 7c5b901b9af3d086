// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! DoxSearch Library
//!
//! This library reads the search index doxygen generates for the XM125 SDK
//! documentation (`html/search/*.js`) and answers the queries the browser
//! search box would.
//!
//! # Features
//!
//! - **Shard Codec** - Parse and re-serialize `var searchData=[...]` shards
//! - **Validation** - Unique keys, non-empty locations, index ordering
//! - **Aggregate Index** - Load a whole `search/` directory concurrently
//! - **Search** - Prefix and substring symbol lookup with ranking

#![warn(missing_docs)]

/// Key, page name and entity decoding helpers
pub mod common;

/// Aggregate index over the shards of one documentation build
pub mod index;

/// Symbol search
pub mod search;

/// Shard file codec and structural checks
pub mod shard;
