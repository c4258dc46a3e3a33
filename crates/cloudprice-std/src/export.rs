// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Cost estimate export.
//!
//! Both writers replace the target atomically: the content goes to
//! `<path>.tmp` first and is then renamed over `path`, so a crash during
//! the write never leaves a partial export behind.

use std::io;
use std::path::{Path, PathBuf};

use cloudprice_core::calculator::CostEstimate;

/// Write the CSV rendering of `estimate` to `path`.
///
/// An empty estimate still produces a valid document: the header, no item
/// rows and a zero total row.
///
/// # Errors
///
/// Returns an [`io::Error`] if the file cannot be written or renamed.
pub fn write_csv<P: AsRef<Path>>(path: P, estimate: &CostEstimate) -> io::Result<()> {
    let path = path.as_ref();
    write_atomic(path, estimate.to_csv().as_bytes())?;
    tracing::info!(path = %path.display(), items = estimate.len(), "estimate exported as CSV");
    Ok(())
}

/// Write `estimate` as pretty-printed JSON to `path`.
///
/// # Errors
///
/// Returns an [`io::Error`] if serialisation fails or the file cannot be
/// written or renamed.
pub fn write_estimate_json<P: AsRef<Path>>(path: P, estimate: &CostEstimate) -> io::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(estimate).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("estimate serialisation error: {}", error),
        )
    })?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), items = estimate.len(), "estimate exported as JSON");
    Ok(())
}

/// `<path>.tmp`, keeping the original extension so sibling files with the
/// same stem are never touched.
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let tmp_path = staging_path(path);
    std::fs::write(&tmp_path, content)?;
    if let Err(error) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudprice_core::catalog::Catalog;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cloudprice-{}-{name}", std::process::id()))
    }

    #[test]
    fn csv_export_matches_in_memory_rendering() {
        let catalog = Catalog::builtin().unwrap();
        let mut estimate = CostEstimate::new();
        estimate.add(catalog.get("aws-ec2-t3-micro").unwrap(), 2, 720).unwrap();
        estimate.add(catalog.get("azure-blob-hot").unwrap(), 100, 1).unwrap();

        let path = scratch_path("estimate.csv");
        write_csv(&path, &estimate).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, estimate.to_csv());
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn staging_path_appends_to_the_full_name() {
        assert_eq!(staging_path(Path::new("/out/report.csv")), PathBuf::from("/out/report.csv.tmp"));
        assert_eq!(staging_path(Path::new("estimate")), PathBuf::from("estimate.tmp"));
    }

    #[test]
    fn sibling_tmp_file_survives_export() {
        let dir = scratch_path("sibling");
        std::fs::create_dir_all(&dir).unwrap();
        let sibling = dir.join("report.tmp");
        std::fs::write(&sibling, "user data").unwrap();

        write_csv(dir.join("report.csv"), &CostEstimate::new()).unwrap();
        let kept = std::fs::read_to_string(&sibling).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(kept, "user data");
    }

    #[test]
    fn csv_and_json_exports_stage_separately() {
        let csv = scratch_path("shared.csv");
        let json = scratch_path("shared.json");
        assert_ne!(staging_path(&csv), staging_path(&json));

        write_csv(&csv, &CostEstimate::new()).unwrap();
        write_estimate_json(&json, &CostEstimate::new()).unwrap();
        let csv_text = std::fs::read_to_string(&csv).unwrap();
        let json_text = std::fs::read_to_string(&json).unwrap();
        std::fs::remove_file(&csv).unwrap();
        std::fs::remove_file(&json).unwrap();

        assert!(csv_text.starts_with("Service,"));
        assert!(json_text.trim_start().starts_with('{'));
    }

    #[test]
    fn failed_rename_leaves_no_staging_file() {
        let target = scratch_path("target-is-a-dir");
        std::fs::create_dir_all(target.join("occupied")).unwrap();

        let result = write_csv(&target, &CostEstimate::new());
        let staged_left = staging_path(&target).exists();
        std::fs::remove_dir_all(&target).unwrap();

        assert!(result.is_err());
        assert!(!staged_left);
    }

    #[test]
    fn empty_estimate_exports_header_and_total() {
        let path = scratch_path("empty.csv");
        write_csv(&path, &CostEstimate::new()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.first().copied(), Some(cloudprice_core::calculator::CSV_HEADER));
        assert_eq!(lines.last().copied(), Some(",,,,,Total:,0.00"));
    }

    #[test]
    fn export_overwrites_previous_file() {
        let path = scratch_path("overwrite.csv");
        std::fs::write(&path, "stale").unwrap();
        write_csv(&path, &CostEstimate::new()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(written.starts_with("Service,"));
    }

    #[test]
    fn json_export_reads_back() {
        let catalog = Catalog::builtin().unwrap();
        let mut estimate = CostEstimate::new();
        estimate.add(catalog.get("gcp-e2-micro").unwrap(), 1, 24).unwrap();

        let path = scratch_path("readback.json");
        write_estimate_json(&path, &estimate).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let restored: CostEstimate = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.items()[0].service.id, "gcp-e2-micro");
        assert_eq!(restored.items()[0].duration, 24);
        assert!((restored.total().usd - estimate.total().usd).abs() < 1e-12);
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let result = write_csv("/nonexistent/dir/estimate.csv", &CostEstimate::new());
        assert!(result.is_err());
    }
}
