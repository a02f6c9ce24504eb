//! Local cache of the extracted catalogue.
//!
//! The cache is a single pretty-printed JSON file. It is always replaced
//! wholesale, never patched.

use std::fs;
use std::path::Path;

use villager_trades_catalogue::Catalogue;

use crate::config::DataPaths;
use crate::error::{HarvesterError, Result};
use crate::harvester::{harvest_catalogue, PageSource};
use crate::settings::Settings;

/// Read the cached catalogue.
///
/// # Returns
/// * `Ok(None)` if the file is missing or blank
/// * `Ok(Some(catalogue))` otherwise
pub fn load_catalogue(path: &Path) -> Result<Option<Catalogue>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let catalogue = Catalogue::from_json(&content)?;
    tracing::debug!(path = %path.display(), professions = catalogue.len(), "Loaded cache");
    Ok(Some(catalogue))
}

/// Write the catalogue to `path`, creating the parent directory if needed.
pub fn save_catalogue(path: &Path, catalogue: &Catalogue) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, catalogue.to_json_pretty()?)?;
    tracing::info!(path = %path.display(), professions = catalogue.len(), "Wrote cache");
    Ok(())
}

/// Return the cached catalogue, harvesting and caching it first if absent.
pub fn obtain_catalogue(
    paths: &DataPaths,
    source: &PageSource,
    settings: &Settings,
) -> Result<Catalogue> {
    let cache = paths.cache_file();
    if let Some(catalogue) = load_catalogue(&cache)? {
        return Ok(catalogue);
    }

    let catalogue = harvest_catalogue(source, settings)?;
    save_catalogue(&cache, &catalogue)?;
    Ok(catalogue)
}

/// Outcome of comparing the cache with the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    UpToDate,

    /// The source differs; `fresh` holds what it currently says.
    OutOfSync { fresh: Catalogue },
}

/// Compare the cached catalogue with a freshly harvested one.
///
/// Fails with [`HarvesterError::MissingCache`] when there is nothing cached
/// to compare against. The cache itself is left untouched.
pub fn check_for_updates(
    paths: &DataPaths,
    source: &PageSource,
    settings: &Settings,
) -> Result<SyncStatus> {
    let cache = paths.cache_file();
    let cached = load_catalogue(&cache)?.ok_or(HarvesterError::MissingCache(cache))?;
    let fresh = harvest_catalogue(source, settings)?;

    if fresh == cached {
        Ok(SyncStatus::UpToDate)
    } else {
        tracing::info!("Cached catalogue is out of sync with the source");
        Ok(SyncStatus::OutOfSync { fresh })
    }
}
