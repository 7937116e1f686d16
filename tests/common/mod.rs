//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_catalog`: the 18-product catalog in `data/sample_catalog.json`
//! - `config`: the default [`RankingConfig`]
//!
//! Ranking depends on product age, so every test ranks against the fixed
//! reference time returned by [`now`] rather than the wall clock.
//!
//! [`TempWorkspace`] provides a temp directory for tests that write catalog
//! or config files.

use catalog_rank::{Catalog, RankingConfig};
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Path of the bundled sample catalog.
pub fn sample_catalog_path() -> PathBuf {
    project_root().join("data").join("sample_catalog.json")
}

/// Reference time for every ranking in the integration tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
}

#[fixture]
pub fn sample_catalog() -> Catalog {
    Catalog::load(sample_catalog_path()).expect("sample catalog should load")
}

#[fixture]
pub fn config() -> RankingConfig {
    RankingConfig::default()
}

/// A temporary directory for files a test writes, removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `relative_path`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}
