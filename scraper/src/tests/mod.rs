use anyhow::Result;
use std::fs;
use std::path::Path;

pub mod fixtures;

/// Helper function to log and save a failed CDX listing for future regression testing
pub fn save_failed_listing(body: &str, test_name: &str) -> Result<()> {
    // Create tests/fixtures/failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir)?;

    // Save the listing for further analysis
    let file_path = failures_dir.join(format!("{}.json", test_name));
    fs::write(&file_path, body)?;

    println!("Saved failed listing to {}", file_path.display());
    Ok(())
}
