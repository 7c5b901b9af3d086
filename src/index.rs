// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::shard::{Category, Issue, ParseError, Shard, ShardId};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    fmt, io,
    path::{Path, PathBuf},
};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// Errors from loading a search directory.
#[derive(Debug)]
pub enum IndexError {
    /// Reading the directory or a shard failed.
    Io(io::Error),
    /// A shard file did not parse.
    Parse {
        /// The shard file.
        path: PathBuf,
        /// Why it did not parse.
        err: ParseError,
    },
    /// A loader task panicked or was cancelled.
    Join(tokio::task::JoinError),
}

impl std::error::Error for IndexError {}

impl From<io::Error> for IndexError {
    fn from(err: io::Error) -> IndexError {
        IndexError::Io(err)
    }
}

impl From<tokio::task::JoinError> for IndexError {
    fn from(err: tokio::task::JoinError) -> IndexError {
        IndexError::Join(err)
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            IndexError::Io(err) => write!(f, "io error: {}", err),
            IndexError::Parse { path, err } => write!(f, "{}: {}", path.display(), err),
            IndexError::Join(err) => write!(f, "loader task failed: {}", err),
        }
    }
}

/// An issue together with the shard it was found in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Finding {
    /// Shard holding the entry.
    pub shard: ShardId,
    /// What is wrong.
    #[serde(flatten)]
    pub issue: Issue,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.shard, self.issue)
    }
}

/// Counts over the whole index.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Stats {
    /// Shard files.
    pub shards: usize,
    /// Entries over all shards.
    pub entries: usize,
    /// Locations over all entries.
    pub locations: usize,
    /// Entries per category.
    pub categories: BTreeMap<Category, usize>,
}

/// The full search index, every shard of one documentation build.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    shards: BTreeMap<ShardId, Shard>,
}

impl SearchIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shard. A shard with the same identity is replaced as a whole,
    /// entries are never merged.
    pub fn insert(&mut self, id: ShardId, shard: Shard) -> Option<Shard> {
        let shard = shard.with_id(id);
        let previous = self.shards.insert(id, shard);
        if previous.is_some() {
            debug!("replaced shard {}", id);
        }
        previous
    }

    /// Shard by identity.
    pub fn get(&self, id: &ShardId) -> Option<&Shard> {
        self.shards.get(id)
    }

    /// Shards ordered by category, then letter slot.
    pub fn shards(&self) -> impl Iterator<Item = (&ShardId, &Shard)> {
        self.shards.iter()
    }

    /// Number of shards.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// True when no shard is loaded.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Loads every shard file of a doxygen `search/` directory. Files whose
    /// names are not shard names (`search.js`, `searchdata.js`, css) are
    /// skipped.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<SearchIndex, IndexError> {
        let mut tasks = JoinSet::new();
        let mut read_dir = tokio::fs::read_dir(dir.as_ref()).await?;

        while let Some(dirent) = read_dir.next_entry().await? {
            let path = dirent.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !name.ends_with(".js") {
                continue;
            }

            let id = match ShardId::from_file_name(&name) {
                Ok(id) => id,
                Err(err) => {
                    warn!("skipping {}: {}", name, err);
                    continue;
                }
            };

            tasks.spawn(async move {
                let text = tokio::fs::read_to_string(&path).await?;
                let shard =
                    Shard::parse(&text).map_err(|err| IndexError::Parse { path, err })?;
                Ok::<_, IndexError>((id, shard))
            });
        }

        let mut index = SearchIndex::new();
        while let Some(res) = tasks.join_next().await {
            let (id, shard) = res??;
            debug!("loaded {} with {} entries", id, shard.len());
            index.insert(id, shard);
        }

        info!("loaded {} shards", index.len());
        Ok(index)
    }

    /// Checks every shard and the index as a whole. Key indices come from
    /// one counter over the whole build, so no index may appear in two
    /// shards.
    pub fn validate(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (id, shard) in &self.shards {
            findings.extend(shard.check().into_iter().map(|issue| Finding {
                shard: *id,
                issue,
            }));
        }

        let mut owners: HashMap<u32, ShardId> = HashMap::new();
        for (id, shard) in &self.shards {
            for entry in shard.entries() {
                match owners.get(&entry.key.index) {
                    Some(first) if first != id => findings.push(Finding {
                        shard: *id,
                        issue: Issue::ReusedIndex {
                            index: entry.key.index,
                            first: *first,
                            second: *id,
                        },
                    }),
                    Some(_) => (),
                    None => {
                        owners.insert(entry.key.index, *id);
                    }
                }
            }
        }

        findings
    }

    /// Shard, entry and location counts.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            shards: self.shards.len(),
            ..Default::default()
        };
        for (id, shard) in &self.shards {
            stats.entries += shard.len();
            stats.locations += shard
                .entries()
                .iter()
                .map(|e| e.locations.len())
                .sum::<usize>();
            *stats.categories.entry(id.category).or_default() += shard.len();
        }
        stats
    }
}
