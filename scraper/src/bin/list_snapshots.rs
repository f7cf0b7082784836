use anyhow::{Context, Result};
use clap::Parser;
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;
use std::time::Duration;
use wayback_scraper::fetch_snapshots;

/// List Wayback Machine snapshots for a URL without downloading them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to list snapshots for
    url: String,

    /// Limit number of snapshots to list
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = Url::parse(&cli.url).with_context(|| format!("Invalid URL: {}", cli.url))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let snapshots = fetch_snapshots(&client, &cli.url, cli.limit)?;

    if snapshots.is_empty() {
        println!("No snapshots found for {}", cli.url);
        return Ok(());
    }

    println!("\nSnapshot listing:");
    for (index, snapshot) in snapshots.iter().enumerate() {
        println!(
            "{}. {} ({})",
            index + 1,
            snapshot.timestamp,
            snapshot.mimetype
        );
        println!("   URL: {}", snapshot.original);
        println!("{}", "-".repeat(50));
    }

    // Create output filename based on the target host
    let host = target.host_str().unwrap_or("listing").replace('.', "_");
    let output_file_name = format!("listing_{}.json", host);

    let json = serde_json::to_string_pretty(&snapshots)
        .context("Failed to serialize snapshot listing")?;

    fs::write(&output_file_name, json).context("Failed to write JSON file")?;

    println!("\nListings saved to {}", output_file_name);

    Ok(())
}
