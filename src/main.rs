//! Dagger-Hashimoto Harness CLI
//!
//! A command-line tool around the core construction.
//!
//! # Commands
//!
//! - `cache` - Build the memory-hard cache and print a fingerprint
//! - `item` - Derive one 64-byte dataset item
//! - `hashimoto` - Fold a candidate hash with dataset reads
//! - `verify` - Cross-check every implementation pair
//! - `benchmark` - Measure dataset item throughput

use clap::{Parser, Subcommand};
use std::time::Instant;

use dagger::algorithm::{self, verify, wide, Cache, Dataset};

#[derive(Parser)]
#[command(name = "dagger")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Dagger-Hashimoto memory-hard proof-of-work harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed the cache is derived from
    #[arg(long, global = true, default_value = "123")]
    seed: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the memory-hard cache and print a fingerprint
    Cache {
        /// Cache size in bytes (positive multiple of 64)
        #[arg(short, long, default_value = "1048576")]
        size: usize,
    },

    /// Derive one 64-byte dataset item
    Item {
        /// Cache size in bytes
        #[arg(long, default_value = "1048576")]
        cache_size: usize,

        /// Item index (wraps modulo the cache row count)
        #[arg(short, long)]
        index: u64,

        /// Use the 64-bit-lane protocol variant
        #[arg(long)]
        wide: bool,
    },

    /// Fold a candidate hash with dataset reads
    Hashimoto {
        /// Cache size in bytes
        #[arg(long, default_value = "1048576")]
        cache_size: usize,

        /// Dataset size in bytes (positive multiple of 128)
        #[arg(long, default_value = "1048576")]
        dataset_size: usize,

        /// Candidate hash as 128 hex chars (default: digest of the seed)
        #[arg(long)]
        hash: Option<String>,

        /// Answer from the cache alone instead of materializing
        #[arg(long)]
        light: bool,
    },

    /// Cross-check every implementation pair
    Verify {
        /// Cache size in bytes
        #[arg(long, default_value = "262144")]
        cache_size: usize,

        /// Dataset size in bytes
        #[arg(long, default_value = "262144")]
        dataset_size: usize,
    },

    /// Measure dataset item throughput
    Benchmark {
        /// Cache size in bytes (default 80 MB)
        #[arg(long, default_value = "83886080")]
        cache_size: usize,

        /// Number of dataset items to derive
        #[arg(short, long, default_value = "100000")]
        items: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    let seed = cli.seed.into_bytes();

    let result = match cli.command {
        Commands::Cache { size } => cmd_cache(&seed, size),
        Commands::Item {
            cache_size,
            index,
            wide,
        } => cmd_item(&seed, cache_size, index, wide),
        Commands::Hashimoto {
            cache_size,
            dataset_size,
            hash,
            light,
        } => cmd_hashimoto(&seed, cache_size, dataset_size, hash, light),
        Commands::Verify {
            cache_size,
            dataset_size,
        } => cmd_verify(&seed, cache_size, dataset_size),
        Commands::Benchmark { cache_size, items } => cmd_benchmark(&seed, cache_size, items),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_cache(seed: &[u8], size: usize) -> anyhow::Result<()> {
    println!(
        "Building cache: {} bytes ({} rows)",
        size,
        size / algorithm::HASH_BYTES
    );

    let start = Instant::now();
    let cache = Cache::generate(size, seed)?;
    println!("Done in {:.2}s", start.elapsed().as_secs_f64());

    println!("Row 0: {}", hex::encode(cache.row(0)));
    Ok(())
}

fn cmd_item(seed: &[u8], cache_size: usize, index: u64, wide_lanes: bool) -> anyhow::Result<()> {
    let cache = Cache::generate(cache_size, seed)?;

    let item = if wide_lanes {
        wide::dataset_item_wide(&cache, index)
    } else {
        algorithm::dataset_item_opt(&cache, index)
    };

    println!("{}", hex::encode(item));
    Ok(())
}

fn cmd_hashimoto(
    seed: &[u8],
    cache_size: usize,
    dataset_size: usize,
    hash: Option<String>,
    light: bool,
) -> anyhow::Result<()> {
    let candidate = match hash {
        Some(h) => {
            let bytes = hex::decode(h)?;
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| anyhow::anyhow!("candidate hash must be exactly 64 bytes"))?
        }
        None => algorithm::digest512(seed),
    };

    let cache = Cache::generate(cache_size, seed)?;

    let digest = if light {
        algorithm::hashimoto_light(&candidate, &cache, dataset_size)?
    } else {
        println!(
            "Materializing dataset: {} bytes ({} rows)",
            dataset_size,
            dataset_size / algorithm::MIX_BYTES
        );
        let dataset = Dataset::materialize(&cache, dataset_size)?;
        algorithm::hashimoto_full(&candidate, &dataset)
    };

    println!("Candidate: {}", hex::encode(candidate));
    println!("Mix:       {}", hex::encode(digest));
    Ok(())
}

fn cmd_verify(seed: &[u8], cache_size: usize, dataset_size: usize) -> anyhow::Result<()> {
    println!(
        "Cross-checking implementations (cache {} bytes, dataset {} bytes)...",
        cache_size, dataset_size
    );

    verify::self_verify(seed, cache_size, dataset_size)?;

    println!("self-verify passed");
    Ok(())
}

fn cmd_benchmark(seed: &[u8], cache_size: usize, items: u64) -> anyhow::Result<()> {
    println!("Generating cache with size {}", cache_size);
    let start = Instant::now();
    let cache = Cache::generate(cache_size, seed)?;
    println!("Done! Took {:.2}s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let mut window = Instant::now();
    let mut item = [0u8; algorithm::HASH_BYTES];

    for index in 0..items {
        item = algorithm::dataset_item_opt(&cache, index);

        if index % 10_000 != 0 || index == 0 {
            continue;
        }

        let used = window.elapsed().as_secs_f64();
        window = Instant::now();
        println!(
            "rate {:.2} H/s, item {}, {}",
            10_000.0 / used,
            index,
            hex::encode(item)
        );
    }

    let used = start.elapsed().as_secs_f64();
    println!(
        "Hash done! Took {:.2}s, rate {:.2} H/s, last {}",
        used,
        items as f64 / used,
        hex::encode(item)
    );
    Ok(())
}
