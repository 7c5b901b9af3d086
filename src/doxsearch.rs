// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::Args;
use clap::Parser;
use doxsearch::{
    index::SearchIndex,
    search::{execute_search, SearchResult},
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{info, info_span, warn};
use tracing_subscriber::{layer::SubscriberExt as _, Layer as _, Registry};

#[cfg(feature = "profiling")]
#[global_allocator]
static GLOBAL: tracy_client::ProfiledAllocator<std::alloc::System> =
    tracy_client::ProfiledAllocator::new(std::alloc::System, 100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.tracy.then(tracy_client::Client::start);

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(args.rust_log);

    let tracy = match args.tracy {
        true => Some(tracing_tracy::TracyLayer::default().with_filter(args.rust_log)),
        false => None,
    };

    let subscriber = Registry::default().with(stderr_log).with(tracy);
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    tracing_log::LogTracer::init()?;

    let index = SearchIndex::load_dir(&args.dir).await?;
    if index.is_empty() {
        warn!("no shard files found in {}", args.dir.display());
    }

    if args.stats {
        let stats = index.stats();
        match args.json {
            true => println!("{}", serde_json::to_string_pretty(&stats)?),
            false => {
                println!("shards:    {}", stats.shards);
                println!("entries:   {}", stats.entries);
                println!("locations: {}", stats.locations);
                for (category, count) in &stats.categories {
                    println!("  {:<12} {}", category, count);
                }
            }
        }
    }

    if args.validate {
        let findings = info_span!("validate").in_scope(|| index.validate());
        match args.json {
            true => println!("{}", serde_json::to_string_pretty(&findings)?),
            false => findings.iter().for_each(|finding| println!("{}", finding)),
        }
        if !findings.is_empty() {
            info!("{} issues found", findings.len());
            std::process::exit(1);
        }
    }

    if let Some(query) = &args.query {
        print_results(&args, &execute_search(&index, &args.query(query)))?;
    }

    if args.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            print_results(&args, &execute_search(&index, &args.query(&line)))?;
        }
    }

    Ok(())
}

fn print_results(args: &Args, results: &[SearchResult]) -> Result<(), serde_json::Error> {
    if args.json {
        println!("{}", serde_json::to_string(results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No Matches");
    }
    for result in results {
        println!("{}", result);
    }
    Ok(())
}
