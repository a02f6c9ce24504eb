//! Villager Trades Harvester - Fetch Minecraft villager trades and browse them offline.
//!
//! This crate downloads the Minecraft wiki trading page, hands its trade
//! tables to [`villager_trades_catalogue`] for extraction, caches the result
//! as JSON and renders it as text.
//!
//! # Example
//!
//! ```
//! use villager_trades_harvester::config::PageLayout;
//!
//! // Nine villager tables, a gap, then four more
//! assert_eq!(PageLayout::default().table_count(), 13);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, page layout and data-directory resolution
//! - [`settings`]: User settings stored in `config.yaml`
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading the trading page
//! - [`html`]: DOM adapter producing raw tables
//! - [`harvester`]: Page source plus extraction
//! - [`store`]: JSON cache and drift check
//! - [`display`]: Text rendering
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod harvester;
pub mod html;
pub mod http;
pub mod settings;
pub mod store;

// Re-export main functions
pub use harvester::{extract_from_html, harvest_catalogue, PageSource};
pub use store::{check_for_updates, load_catalogue, obtain_catalogue, save_catalogue, SyncStatus};

// Re-export commonly used items
pub use config::{DataPaths, PageLayout};
pub use error::{HarvesterError, Result};
pub use settings::{DisplayMode, Settings};
