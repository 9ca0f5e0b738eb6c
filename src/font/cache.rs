//! Font discovery by scanning asset directories
//!
//! Maps a bare font file name (e.g. `OpenSans-Regular.ttf`) to the absolute path
//! where it was found. The map is rebuilt wholesale by `rebuild`; entries are
//! never added or removed one at a time.
//!
//! Name collisions: when the same file name exists in several places, the one
//! scanned last wins. Search paths are scanned in order and each directory's
//! entries in sorted order, so the winner is deterministic for a given tree, but
//! callers should not treat it as a stable policy.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::fonts;

/// File name → absolute path map over a fixed list of base directories
#[derive(Debug, Clone)]
pub struct FontDirectoryCache {
    search_paths: Vec<PathBuf>,
    entries: HashMap<String, PathBuf>,
    scans: usize,
}

/// Candidate base directories relative to a working directory:
/// `assets`, `src/assets`, `../assets`, `../src/assets`
pub fn default_search_paths(working_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![
        working_dir.join(fonts::ASSETS_DIR),
        working_dir.join(fonts::SOURCE_DIR).join(fonts::ASSETS_DIR),
    ];
    if let Some(parent) = working_dir.parent() {
        paths.push(parent.join(fonts::ASSETS_DIR));
        paths.push(parent.join(fonts::SOURCE_DIR).join(fonts::ASSETS_DIR));
    }
    paths
}

/// Check the extension against the known font extensions, ignoring case
fn is_font_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| fonts::EXTENSIONS.contains(&ext.as_str()))
}

impl FontDirectoryCache {
    /// Empty cache over explicit base directories. Nothing is scanned yet.
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        let search_paths = search_paths
            .into_iter()
            .map(|path| std::path::absolute(&path).unwrap_or(path))
            .collect();
        Self {
            search_paths,
            entries: HashMap::new(),
            scans: 0,
        }
    }

    /// Empty cache over the default candidates of the process working directory
    pub fn from_working_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Ok(Self::with_search_paths(default_search_paths(&cwd)))
    }

    /// Clear the map and rescan every base directory that exists.
    ///
    /// Returns the number of fonts now cached.
    pub fn rebuild(&mut self) -> usize {
        self.entries.clear();
        self.scans += 1;

        for base in &self.search_paths {
            if !base.is_dir() {
                debug!(path = %base.display(), "Font search path does not exist, skipping");
                continue;
            }
            Self::scan_directory(base, &mut self.entries);
        }

        info!(
            count = self.entries.len(),
            scan = self.scans,
            "Rebuilt font directory cache"
        );
        self.entries.len()
    }

    fn scan_directory(dir: &Path, entries: &mut HashMap<String, PathBuf>) {
        let listing = match fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Error searching font directory");
                return;
            }
        };

        let mut children: Vec<_> = listing
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "Error reading directory entry");
                    None
                }
            })
            .collect();
        children.sort_by_key(|entry| entry.file_name());

        for entry in children {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                Self::scan_directory(&path, entries);
                continue;
            }

            // Follows symlinks to files; symlinked directories are not descended
            let is_regular = fs::metadata(&path).is_ok_and(|meta| meta.is_file());
            if !is_regular || !is_font_file(&path) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(previous) = entries.insert(name.clone(), path.clone()) {
                debug!(
                    font = %name,
                    previous = %previous.display(),
                    path = %path.display(),
                    "Font name collision, later path wins"
                );
            }
        }
    }

    /// Cached path for `name`. Never rescans.
    pub fn lookup(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Sorted names of every cached font
    pub fn available_fonts(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// How many times `rebuild` has run
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
