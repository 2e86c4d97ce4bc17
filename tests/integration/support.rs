use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use autoref::prune::Confirmation;
use autoref::CatalogueError;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with `XDG_CONFIG_HOME` pointing into the temp dir and no `AUTOREF__*` overrides.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    let config_home = temp_dir.path().join("config");
    fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    let stale: Vec<String> = std::env::vars()
        .map(|(k, _)| k)
        .filter(|k| k.starts_with("AUTOREF__"))
        .collect();
    for key in &stale {
        std::env::remove_var(key);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

/// Create `root` with the given files (relative paths) and empty directories (trailing `/`).
pub fn build_tree(parent: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let root = parent.join(name);
    fs::create_dir_all(&root).unwrap();
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, entry.as_bytes()).unwrap();
        }
    }
    root
}

/// The archive used by most suites.
///
/// ```text
/// root/
///   Accounts/2020/budget.txt
///   Accounts/ledger.csv
///   Letters/a.txt
///   readme.txt
/// ```
pub fn sample_archive(temp_dir: &TempDir) -> PathBuf {
    build_tree(
        temp_dir.path(),
        "root",
        &[
            "Accounts/2020/budget.txt",
            "Accounts/ledger.csv",
            "Letters/a.txt",
            "readme.txt",
        ],
    )
}

/// Rows of a CSV file as header -> value maps, in file order.
pub fn read_csv_rows(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    reader
        .records()
        .map(|row| {
            let row = row.unwrap();
            headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

/// `(basename, reference)` pairs of a catalogue CSV, in row order.
pub fn references_by_name(path: &Path) -> Vec<(String, String)> {
    read_csv_rows(path)
        .into_iter()
        .map(|row| (row["Basename"].clone(), row["Archive_Reference"].clone()))
        .collect()
}

/// Fixed confirmation answer for prune runs.
pub struct Answer(pub bool);

impl Confirmation for Answer {
    fn confirm(&self, _prompt: &str) -> Result<bool, CatalogueError> {
        Ok(self.0)
    }
}
