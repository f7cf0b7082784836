use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::cdx::{fetch_snapshots, Snapshot};

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub output_dir: PathBuf,
    pub limit: Option<usize>,
    pub delay: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FetchOutcome {
    Success,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SnapshotRecord {
    pub timestamp: String,
    pub original: String,
    pub statuscode: String,
    pub mimetype: String,
    pub outcome: FetchOutcome,
    pub file: Option<String>,
    pub error: Option<String>,
}

impl SnapshotRecord {
    pub fn success(snapshot: &Snapshot, file: &Path) -> Self {
        SnapshotRecord {
            timestamp: snapshot.timestamp.clone(),
            original: snapshot.original.clone(),
            statuscode: snapshot.statuscode.clone(),
            mimetype: snapshot.mimetype.clone(),
            outcome: FetchOutcome::Success,
            file: Some(file.display().to_string()),
            error: None,
        }
    }

    pub fn failed(snapshot: &Snapshot, error: &anyhow::Error) -> Self {
        SnapshotRecord {
            timestamp: snapshot.timestamp.clone(),
            original: snapshot.original.clone(),
            statuscode: snapshot.statuscode.clone(),
            mimetype: snapshot.mimetype.clone(),
            outcome: FetchOutcome::Failed,
            file: None,
            error: Some(format!("{:#}", error)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunMetadata {
    pub url: String,
    pub total_attempted: usize,
    pub total_succeeded: usize,
    pub total_failed: usize,
    pub scraped_at: String,
    pub snapshots: Vec<SnapshotRecord>,
}

impl RunMetadata {
    pub fn new(url: &str, snapshots: Vec<SnapshotRecord>) -> Self {
        let total_succeeded = snapshots
            .iter()
            .filter(|record| record.outcome == FetchOutcome::Success)
            .count();

        RunMetadata {
            url: url.to_string(),
            total_attempted: snapshots.len(),
            total_succeeded,
            total_failed: snapshots.len() - total_succeeded,
            scraped_at: Utc::now().to_rfc3339(),
            snapshots,
        }
    }
}

/// Retrieval location for the archived content of a capture
pub fn wayback_url(timestamp: &str, original: &str) -> String {
    format!("https://web.archive.org/web/{}/{}", timestamp, original)
}

/// Map an archived mime type to a conventional file extension
pub fn extension_for_mime(mimetype: &str) -> &'static str {
    match mimetype {
        "text/html" | "application/xhtml+xml" => "html",
        "text/plain" => "txt",
        "text/css" => "css",
        "text/javascript" | "application/javascript" => "js",
        "application/json" => "json",
        "application/pdf" => "pdf",
        "application/xml" | "text/xml" => "xml",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        _ => "html",
    }
}

/// Output filename for a capture, `YYYY-MM-DD_HH-MM-SS.<ext>`
pub fn snapshot_filename(snapshot: &Snapshot) -> Result<String> {
    let captured = snapshot.capture_time()?;

    Ok(format!(
        "{}.{}",
        captured.format("%Y-%m-%d_%H-%M-%S"),
        extension_for_mime(&snapshot.mimetype)
    ))
}

/// Write the raw content of a capture to its timestamp-named file
pub fn save_snapshot_content(
    snapshot: &Snapshot,
    content: &[u8],
    output_dir: &Path,
) -> Result<PathBuf> {
    let filename = snapshot_filename(snapshot)?;
    let filepath = output_dir.join(filename);

    fs::write(&filepath, content)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;

    Ok(filepath)
}

/// Download a single capture and save it under the output directory
pub fn download_snapshot(
    client: &Client,
    snapshot: &Snapshot,
    output_dir: &Path,
) -> Result<PathBuf> {
    let url = wayback_url(&snapshot.timestamp, &snapshot.original);

    let response = client
        .get(&url)
        .send()
        .context("Failed to send request")?
        .error_for_status()
        .context("Snapshot request returned an error status")?;

    let content = response.bytes().context("Failed to read snapshot content")?;

    save_snapshot_content(snapshot, &content, output_dir)
}

/// Serialize the run summary and every attempted snapshot to metadata.json
pub fn save_run_metadata(config: &RunConfig, records: Vec<SnapshotRecord>) -> Result<PathBuf> {
    let metadata = RunMetadata::new(&config.url, records);
    let metadata_path = config.output_dir.join("metadata.json");

    let json =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize run metadata")?;

    fs::write(&metadata_path, json)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

    Ok(metadata_path)
}

/// Download every listed snapshot of the configured URL, one at a time
pub fn scrape_snapshots(config: &RunConfig) -> Result<()> {
    let target = Url::parse(&config.url)
        .with_context(|| format!("Invalid URL: {}", config.url))?;

    if target.scheme() != "http" && target.scheme() != "https" {
        return Err(anyhow::anyhow!(
            "URL must use http or https: {}",
            config.url
        ));
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let snapshots = fetch_snapshots(&client, &config.url, config.limit)?;

    if snapshots.is_empty() {
        println!("No snapshots to download.");
        return Ok(());
    }

    let total = snapshots.len();
    let mut records = Vec::new();

    for (i, snapshot) in snapshots.iter().enumerate() {
        println!(
            "[{}/{}] Downloading snapshot from {}...",
            i + 1,
            total,
            snapshot.timestamp
        );

        match download_snapshot(&client, snapshot, &config.output_dir) {
            Ok(filepath) => {
                println!("  ✓ Saved to {}", filepath.display());
                records.push(SnapshotRecord::success(snapshot, &filepath));
            }
            Err(error) => {
                println!("  ✗ Failed: {:#}", error);
                records.push(SnapshotRecord::failed(snapshot, &error));
            }
        }

        // Be respectful of the archive, pause between requests
        if i + 1 < total {
            thread::sleep(Duration::from_secs_f64(config.delay));
        }
    }

    let successful = records
        .iter()
        .filter(|record| record.outcome == FetchOutcome::Success)
        .count();
    let failed = records.len() - successful;

    let metadata_path = save_run_metadata(config, records)?;
    println!("Metadata saved to {}", metadata_path.display());

    let output_dir = fs::canonicalize(&config.output_dir)
        .unwrap_or_else(|_| config.output_dir.clone());

    println!("\n{}", "=".repeat(60));
    println!("Scraping complete!");
    println!("Successful: {}", successful);
    println!("Failed: {}", failed);
    println!("Snapshots saved to: {}", output_dir.display());
    println!("{}", "=".repeat(60));

    Ok(())
}
