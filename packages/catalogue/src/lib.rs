//! Villager trade catalogue - extraction and query engine.
//!
//! Turns the irregular trade tables of the Minecraft wiki (row spans,
//! footnote markers, line-break separated lists) into strict profession
//! records, and filters those records by wanted item, given item or
//! profession.
//!
//! # Example
//!
//! ```
//! use villager_trades_catalogue::query::{search, Criterion};
//! use villager_trades_catalogue::Catalogue;
//!
//! let catalogue = Catalogue::default();
//! assert!(search(&catalogue, Criterion::Wanted, &["emerald"]).is_empty());
//! ```
//!
//! # Architecture
//!
//! Leaf modules first:
//!
//! - [`normalize`]: footnote and whitespace stripping for cell text
//! - [`grouping`]: splitting multi-valued cells, with per-profession rules
//! - [`rowspan`]: partitioning rows into trade-level groups
//! - [`builder`]: assembling profession records and whole catalogues
//! - [`query`]: filtering catalogues
//! - [`layout`]: table layout descriptor
//! - [`raw`]: raw table input model
//! - [`types`]: catalogue data model
//! - [`error`]: error types and Result alias

pub mod builder;
pub mod error;
pub mod grouping;
pub mod layout;
pub mod normalize;
pub mod query;
pub mod raw;
pub mod rowspan;
pub mod types;

pub use builder::{extract_catalogue, profession_from_caption, RecordBuilder};
pub use error::{CatalogueError, Result};
pub use grouping::{default_grouping_rules, CellGrouper, GroupingRules, JoiningRule, JoiningStrategy};
pub use layout::{ColumnRoles, TableLayout};
pub use query::{search, Criterion};
pub use raw::{RawCell, RawRow, RawTable};
pub use rowspan::{RowGroup, RowSpanDecoder};
pub use types::{Catalogue, Exchange, GivenSide, ItemRef, ProfessionRecord, TradeLevel, WantedSide};
