use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use wikisearch_core::verify::compare;
use wikisearch_core::{
    build_from_path, ChainIndex, DedupPolicy, GrowableHashIndex, IndexConfig, SearchIndex, StreamingIndexBuilder,
};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory word index over a delimited corpus and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Corpus file: whitespace separated tokens, documents split by the delimiter
    #[arg(long)]
    input: PathBuf,
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Starting bucket count of the hash table
    #[arg(long)]
    capacity: Option<usize>,
    /// Document delimiter token
    #[arg(long)]
    delimiter: Option<String>,
    /// Occurrence dedup policy: adjacent or full-list
    #[arg(long)]
    dedup: Option<DedupPolicy>,
    /// Do not index title tokens as words
    #[arg(long, default_value_t = false)]
    skip_titles: bool,
    /// Do not index the delimiter token as a word
    #[arg(long, default_value_t = false)]
    skip_delimiter: bool,
}

impl IndexArgs {
    fn config(&self) -> Result<IndexConfig> {
        let mut cfg = match &self.config {
            Some(path) => IndexConfig::load(path)?,
            None => IndexConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            cfg.initial_capacity = capacity;
        }
        if let Some(delimiter) = &self.delimiter {
            cfg.delimiter = delimiter.clone();
        }
        if let Some(dedup) = self.dedup {
            cfg.dedup = dedup;
        }
        if self.skip_titles {
            cfg.index_titles = false;
        }
        if self.skip_delimiter {
            cfg.index_delimiter = false;
        }
        Ok(cfg)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more words
    Search {
        #[command(flatten)]
        index: IndexArgs,
        /// Words to look up, matched exactly
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print table statistics: capacity, collisions, chain lengths
    Stats {
        #[command(flatten)]
        index: IndexArgs,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build the hash index and the linear baseline, then compare them word by word
    Verify {
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Read words from stdin and print where they occur; "exit" stops
    Repl {
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { index, words } => {
            let idx = build_from_path(&index.input, &index.config()?)?;
            let mut out = io::stdout().lock();
            for word in &words {
                print_titles(&mut out, &idx, word)?;
            }
            Ok(())
        }
        Commands::Stats { index, json } => {
            let idx = build_from_path(&index.input, &index.config()?)?;
            let stats = idx.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("capacity:          {}", stats.capacity);
                println!("distinct words:    {}", stats.distinct_words);
                println!("occupied buckets:  {}", stats.occupied_buckets);
                println!("collisions:        {}", stats.collisions);
                println!("longest chain:     {}", stats.longest_chain);
                println!("total occurrences: {}", stats.total_occurrences);
                println!("rehashes:          {}", stats.rehashes);
                println!("load factor:       {:.3}", stats.load_factor);
            }
            Ok(())
        }
        Commands::Verify { index } => verify(&index),
        Commands::Repl { index } => repl(&index),
    }
}

fn verify(args: &IndexArgs) -> Result<()> {
    let cfg = args.config()?;
    let hashed = StreamingIndexBuilder::new(GrowableHashIndex::with_config(&cfg), &cfg).build_path(&args.input)?;
    let chained = StreamingIndexBuilder::new(ChainIndex::with_config(&cfg), &cfg).build_path(&args.input)?;

    let cmp = compare(&hashed, &chained);
    for m in &cmp.mismatches {
        println!("{m}");
    }
    if !cmp.is_match() {
        bail!("{} mismatches between hash index and baseline", cmp.mismatches.len());
    }
    println!("{} distinct words, backends agree", cmp.distinct_words);
    Ok(())
}

fn repl(args: &IndexArgs) -> Result<()> {
    let cfg = args.config()?;
    tracing::info!(input = %args.input.display(), "preprocessing");
    let idx = match build_from_path(&args.input, &cfg) {
        Ok(idx) => idx,
        Err(e) if e.is_source_unavailable() => {
            tracing::warn!(error = %e, "continuing with an empty index");
            GrowableHashIndex::with_config(&cfg)
        }
        Err(e) => return Err(e.into()),
    };

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    loop {
        writeln!(out, "\nInput search string or type exit to stop:")?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let word = line.trim();
        if word == "exit" {
            break;
        }
        print_titles(&mut out, &idx, word)?;
    }
    Ok(())
}

fn print_titles<W: Write>(out: &mut W, idx: &dyn SearchIndex, word: &str) -> Result<()> {
    match idx.search(word) {
        None => writeln!(out, "{word} does not exist")?,
        Some(titles) => {
            writeln!(out, "\"{word}\" exists in the following articles:")?;
            for title in titles {
                writeln!(out, "   {title}")?;
            }
        }
    }
    Ok(())
}
