//! Main harvester service that ties page retrieval, DOM adapting and
//! catalogue extraction together.

use std::fs;
use std::path::PathBuf;

use villager_trades_catalogue::{extract_catalogue, Catalogue};

use crate::error::Result;
use crate::html::parse_page;
use crate::http::fetch_page;
use crate::settings::Settings;

/// Where the trading page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Download from the configured source URL.
    Remote,

    /// Read a previously saved copy of the page.
    File(PathBuf),
}

impl PageSource {
    /// Load the page HTML.
    pub fn read(&self, settings: &Settings) -> Result<String> {
        match self {
            Self::Remote => fetch_page(&settings.page_layout().source_url),
            Self::File(path) => {
                tracing::debug!(path = %path.display(), "Reading saved page");
                Ok(fs::read_to_string(path)?)
            }
        }
    }
}

/// Fetch the trading page and extract a fresh catalogue.
///
/// # Arguments
/// * `source` - Where to read the page from
/// * `settings` - Page layout, table layout and joining rules to apply
///
/// # Returns
/// A `Catalogue` with one record per selected trade table
pub fn harvest_catalogue(source: &PageSource, settings: &Settings) -> Result<Catalogue> {
    let html = source.read(settings)?;
    extract_from_html(&html, settings)
}

/// Extract a catalogue from page HTML already in memory.
pub fn extract_from_html(html: &str, settings: &Settings) -> Result<Catalogue> {
    let page = parse_page(html, &settings.page_layout())?;
    let catalogue = extract_catalogue(
        &page.job_sites,
        &page.tables,
        &settings.table_layout(),
        &settings.grouping_rules(),
    )?;

    tracing::info!(professions = catalogue.len(), "Extracted trade catalogue");
    Ok(catalogue)
}
