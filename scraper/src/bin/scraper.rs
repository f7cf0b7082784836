use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wayback_scraper::{scrape_snapshots, RunConfig};

/// Scrape all Wayback Machine snapshots for a URL
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to scrape snapshots for
    url: String,

    /// Output directory
    #[arg(short, long, default_value = "snapshots")]
    output: PathBuf,

    /// Limit number of snapshots to download
    #[arg(short, long)]
    limit: Option<usize>,

    /// Delay between requests in seconds
    #[arg(short, long, default_value_t = 1.0)]
    delay: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RunConfig {
        url: cli.url,
        output_dir: cli.output,
        limit: cli.limit,
        delay: cli.delay,
    };

    scrape_snapshots(&config)
}
