// Export the scraper modules
pub mod cdx;
pub mod snapshot;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::cdx::{fetch_snapshots, parse_snapshot_listing, Snapshot};
pub use crate::snapshot::{
    download_snapshot, save_run_metadata, save_snapshot_content, scrape_snapshots,
    snapshot_filename, wayback_url, FetchOutcome, RunConfig, RunMetadata, SnapshotRecord,
};
