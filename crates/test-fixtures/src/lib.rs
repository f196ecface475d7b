//! Test fixtures for the cart reconciliation workspace.
//!
//! - Golden reconciliation scenarios (JSON) and a loader for them
//! - [`ScriptedTransport`], an in-memory cell transport with per-call replies
//! - Label-based builders for carts, cells, and clone rows

pub mod builders;
pub mod scenario;
pub mod transport;

pub use scenario::{CartSpec, CellScript, ExpectedOutcome, ExpectedView, ReconcileScenario, RegistryEntry};
pub use transport::{Call, Reply, ScriptedTransport};

use serde::de::DeserializeOwned;
use std::path::PathBuf;

const FIXTURE_DIR: &str = "test-fixtures";

/// The `test-fixtures` directory, found from the manifest dir of the crate
/// under test or any of its ancestors.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&manifest_dir)
        .ancestors()
        .map(|dir| dir.join(FIXTURE_DIR))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| panic!("no {FIXTURE_DIR} directory above {manifest_dir}"))
}

/// Deserialize the JSON scenario at `relative_path` under the fixture root.
/// A missing or malformed file fails the calling test.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("parse {}: {e}", path.display()))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}
