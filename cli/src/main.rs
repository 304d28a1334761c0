use anyhow::Result;
use clap::Parser;
use docrank_core::tokenizer::to_terms;
use docrank_core::{top_k, CorpusIndex, IndexCache};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(about = "Rank the documents under a directory by TF-IDF relevance to a query", long_about = None)]
struct Cli {
    /// Search query, possibly containing multiple terms
    query: String,
    /// Corpus directory to search recursively
    corpus: PathBuf,
    /// Number of documents to return (must be positive)
    #[arg(allow_negative_numbers = true)]
    k: i64,
    /// Always rescan the corpus; neither read nor write the cache file
    #[arg(long)]
    no_cache: bool,
    /// Index cache file location
    #[arg(long, default_value = IndexCache::DEFAULT_FILE)]
    cache: PathBuf,
    /// Print results as a JSON array instead of "doc: score" lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Bad usage reports to stdout and exits 0, preserving the
            // original tool's (non-standard) contract.
            println!("{err}");
            std::process::exit(0);
        }
    };
    assert!(cli.k > 0, "the number of documents to return must be positive, got {}", cli.k);

    let terms = to_terms(&cli.query);
    let index = if cli.no_cache {
        CorpusIndex::scan(&cli.corpus)
    } else {
        IndexCache::new(&cli.cache).load_or_build(&cli.corpus)?
    };
    tracing::info!(docs = index.len(), terms = terms.len(), "index ready");

    if index.is_empty() {
        tracing::warn!(corpus = %cli.corpus.display(), "no documents found");
        if cli.json {
            println!("[]");
        }
        return Ok(());
    }

    let results = top_k(&index, &terms, cli.k as usize);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for r in &results {
            println!("{}: {:.4}", r.doc, r.score);
        }
    }
    Ok(())
}
