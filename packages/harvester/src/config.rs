//! Configuration constants, page layout and data-directory resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarvesterError, Result};

/// Wiki page holding the villager trade tables.
pub const SOURCE_URL: &str = "https://minecraft.fandom.com/wiki/Trading";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VILLAGER_TRADES_DATA_DIR";

/// Data directory used when neither the CLI nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Cached catalogue, stored as pretty-printed JSON.
pub const CACHE_FILE_NAME: &str = "villager-data.json";

/// User settings, stored as YAML.
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

/// Default target for rendered output written to disk.
pub const OUTPUT_FILE_NAME: &str = "data-output.txt";

/// Width that display lines are centred in.
pub const DISPLAY_WIDTH: usize = 80;

/// Number of Java-edition job sites listed on the trading page.
pub const JOB_SITE_LIMIT: usize = 13;

/// Half-open range of table indices on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRange {
    pub start: usize,
    pub end: usize,
}

impl TableRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which parts of the trading page hold Java-edition trade data.
///
/// The page lists job sites in one block and trade tables in another. Tables
/// outside `table_ranges` (the wandering trader, Bedrock-only variants) are
/// skipped; the remaining tables line up index by index with the first
/// `job_site_limit` job sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PageLayout {
    pub source_url: String,
    pub job_site_limit: usize,
    pub table_ranges: Vec<TableRange>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            job_site_limit: JOB_SITE_LIMIT,
            table_ranges: vec![TableRange::new(1, 10), TableRange::new(12, 16)],
        }
    }
}

impl PageLayout {
    /// Page table indices selected by the layout, in page order.
    pub fn table_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.table_ranges.iter().flat_map(|r| r.start..r.end)
    }

    /// Number of tables the layout selects.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.table_ranges.iter().map(TableRange::len).sum()
    }

    /// Check that the layout is usable before touching the page.
    pub fn validate(&self) -> Result<()> {
        if self.table_count() == 0 {
            return Err(HarvesterError::InvalidSetting {
                key: "page-layout.table-ranges".to_string(),
                message: "no trade tables selected".to_string(),
            });
        }
        if let Some(range) = self.table_ranges.iter().find(|r| r.end < r.start) {
            return Err(HarvesterError::InvalidSetting {
                key: "page-layout.table-ranges".to_string(),
                message: format!("range {}..{} ends before it starts", range.start, range.end),
            });
        }
        Ok(())
    }
}

/// Locations of the files the harvester reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the data directory: explicit argument, then
    /// `VILLAGER_TRADES_DATA_DIR`, then `./data`.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let dir = explicit.map(Path::to_path_buf).unwrap_or_else(|| {
            std::env::var(DATA_DIR_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_DIR.into())
                .into()
        });
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn cache_file(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    pub fn output_file(&self) -> PathBuf {
        self.dir.join(OUTPUT_FILE_NAME)
    }
}
