use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use wayback_scraper::cdx::{parse_snapshot_listing, CDX_API};

fn main() -> Result<()> {
    // Get URL from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a URL and a test name");
        eprintln!("Usage: cargo run --bin save_listing_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching CDX listing for {}...", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    // Fetch the raw listing body
    let response = client
        .get(CDX_API)
        .query(&[("url", url.as_str()), ("output", "json")])
        .send()
        .context("Failed to send request")?;
    let body = response.text().context("Failed to get response text")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the listing for testing
    let file_path = failures_dir.join(format!("{}.json", test_name));
    fs::write(&file_path, &body).context("Failed to write listing file")?;

    println!(
        "Saved listing to {} for regression testing",
        file_path.display()
    );

    // Attempt to parse with the listing parser to validate the failure
    println!("\nAttempting to parse with the listing parser to confirm failure:");

    match parse_snapshot_listing(&body, None) {
        Ok(snapshots) => {
            println!(
                "⚠️ Parse succeeded with {} snapshots! This may not be a failure case.",
                snapshots.len()
            );
        }
        Err(e) => {
            println!("✅ Parse failed with error: {}", e);
            println!("\nThis test case has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
