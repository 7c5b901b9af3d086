// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use doxsearch::{
    common::{decode_entities, escape_symbol},
    shard::{Shard, ShardId},
};
use log::{debug, warn};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shard file to inspect, e.g. html/search/functions_4.js
    #[arg(required_unless_present = "escape")]
    file: Option<PathBuf>,

    /// Check the shard and print every issue found.
    #[arg(short, long)]
    check: bool,

    /// Re-serialize the shard and compare with the file.
    #[arg(short, long)]
    roundtrip: bool,

    /// Print the entries with keys and titles decoded.
    #[arg(short, long)]
    dump: bool,

    /// Print the escaped key doxygen would use for a symbol name and exit.
    #[arg(short, long)]
    escape: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if let Some(name) = &args.escape {
        println!("{}", escape_symbol(name));
        return Ok(());
    }

    let file = args.file.ok_or("missing shard file")?;
    debug!("reading shard {}", file.display());
    let text = std::fs::read_to_string(&file)?;
    let mut shard = Shard::parse(&text)?;

    match file.file_name().and_then(|n| n.to_str()) {
        Some(name) => match ShardId::from_file_name(name) {
            Ok(id) => shard = shard.with_id(id),
            Err(err) => warn!("{}", err),
        },
        None => warn!("no file name in {}", file.display()),
    }

    let label = shard
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| file.display().to_string());
    println!(
        "{}: {} entries, letter {:?}",
        label,
        shard.len(),
        shard.letter()
    );

    let mut failed = false;

    if args.check {
        let issues = shard.check();
        for issue in &issues {
            println!("{}", issue);
        }
        println!("Issues: {}", issues.len());
        failed |= !issues.is_empty();
    }

    if args.roundtrip {
        let out = shard.to_js();
        match out == text {
            true => println!("Roundtrip: identical"),
            false => {
                let offset = out
                    .bytes()
                    .zip(text.bytes())
                    .position(|(a, b)| a != b)
                    .unwrap_or(out.len().min(text.len()));
                println!("Roundtrip: differs at byte {}", offset);
                failed = true;
            }
        }
    }

    if args.dump {
        for entry in shard.entries() {
            println!("{} {}", entry.key, entry.name);
            for location in &entry.locations {
                println!("    {} {}", location.url, decode_entities(&location.title));
            }
        }
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
