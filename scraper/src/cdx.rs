use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CDX_API: &str = "https://web.archive.org/cdx/search/cdx";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Snapshot {
    pub timestamp: String,
    pub original: String,
    pub statuscode: String,
    pub mimetype: String,
}

impl Snapshot {
    /// Parse the 14-digit Wayback timestamp into a capture time
    pub fn capture_time(&self) -> Result<NaiveDateTime> {
        let compact = self.timestamp.get(..14).unwrap_or(&self.timestamp);
        NaiveDateTime::parse_from_str(compact, "%Y%m%d%H%M%S")
            .with_context(|| format!("Invalid capture timestamp: {}", self.timestamp))
    }
}

/// Query the CDX index for all captures of a URL
pub fn fetch_snapshots(client: &Client, url: &str, limit: Option<usize>) -> Result<Vec<Snapshot>> {
    println!("Fetching snapshot list for: {}", url);

    let mut params: Vec<(&str, String)> = vec![
        ("url", url.to_string()),
        ("output", "json".to_string()),
        ("collapse", "timestamp:8".to_string()),
        ("filter", "statuscode:200".to_string()),
    ];

    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }

    let response = client
        .get(CDX_API)
        .query(&params)
        .send()
        .context("Failed to query the CDX index")?
        .error_for_status()
        .context("CDX index returned an error status")?;

    let body = response.text().context("Failed to read the CDX response")?;

    let snapshots = parse_snapshot_listing(&body, limit)?;
    println!("Found {} snapshots", snapshots.len());

    Ok(snapshots)
}

/// Parse a CDX JSON response body into snapshots.
///
/// The index may already filter and collapse on the server side, but the
/// guarantees are enforced again here: only status 200 captures are kept, at
/// most one capture per calendar day survives (first in index order), and the
/// listing stops once `limit` snapshots have been produced.
pub fn parse_snapshot_listing(body: &str, limit: Option<usize>) -> Result<Vec<Snapshot>> {
    let rows: Vec<Vec<String>> =
        serde_json::from_str(body).context("Failed to parse the CDX response as JSON")?;

    // First row is headers
    if rows.len() < 2 {
        return Ok(Vec::new());
    }

    let headers = &rows[0];
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("CDX response is missing the {} column", name))
    };

    let timestamp_col = column("timestamp")?;
    let original_col = column("original")?;
    let statuscode_col = column("statuscode")?;
    let mimetype_col = column("mimetype")?;

    let mut snapshots = Vec::new();
    let mut seen_dates = HashSet::new();

    for row in &rows[1..] {
        if let Some(limit) = limit {
            if snapshots.len() >= limit {
                break;
            }
        }

        let field = |col: usize| -> Result<&str> {
            row.get(col).map(String::as_str).ok_or_else(|| {
                anyhow::anyhow!(
                    "CDX row has {} fields, expected at least {}",
                    row.len(),
                    headers.len()
                )
            })
        };

        let snapshot = Snapshot {
            timestamp: field(timestamp_col)?.to_string(),
            original: field(original_col)?.to_string(),
            statuscode: field(statuscode_col)?.to_string(),
            mimetype: field(mimetype_col)?.to_string(),
        };

        // Only successful captures are listed
        if snapshot.statuscode != "200" {
            continue;
        }

        // One capture per day, first in index order wins
        let capture_date = snapshot.capture_time()?.date();
        if !seen_dates.insert(capture_date) {
            continue;
        }

        snapshots.push(snapshot);
    }

    Ok(snapshots)
}
