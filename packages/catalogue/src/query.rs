//! Filtering a catalogue by wanted item, given item or profession.

use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogueError, Result};
use crate::types::{Catalogue, Exchange, ProfessionRecord, TradeLevel};

/// What a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Substring match on any wanted item.
    Wanted,

    /// Substring match on the given item.
    Given,

    /// Exact match on the profession label.
    Profession,
}

impl Criterion {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wanted => "wanted",
            Self::Given => "given",
            Self::Profession => "profession",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "wanted" | "w" => Ok(Self::Wanted),
            "given" | "g" => Ok(Self::Given),
            "profession" | "p" => Ok(Self::Profession),
            _ => Err(CatalogueError::UnknownCriterion(s.to_string())),
        }
    }
}

/// Normalize a query string the way catalogue fields are stored.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Turn free-form user input into normalized queries.
///
/// Professions are single words separated by whitespace; item names may
/// contain spaces and are separated by commas. Blank entries are dropped.
#[must_use]
pub fn parse_queries(criterion: Criterion, input: &str) -> Vec<String> {
    let parts: Vec<&str> = match criterion {
        Criterion::Profession => input.split_whitespace().collect(),
        Criterion::Wanted | Criterion::Given => input.split(',').collect(),
    };

    parts
        .into_iter()
        .map(normalize_query)
        .filter(|q| !q.is_empty())
        .collect()
}

/// Filter `catalogue` by `criterion`.
///
/// Queries must already be normalized (see [`normalize_query`]). An empty
/// query list yields an empty catalogue. Output keeps catalogue order.
#[must_use]
pub fn search<Q: AsRef<str>>(
    catalogue: &Catalogue,
    criterion: Criterion,
    queries: &[Q],
) -> Catalogue {
    if queries.is_empty() {
        return Catalogue::default();
    }

    let results: Catalogue = match criterion {
        Criterion::Profession => catalogue
            .iter()
            .filter(|p| queries.iter().any(|q| q.as_ref() == p.profession))
            .cloned()
            .collect(),
        Criterion::Wanted | Criterion::Given => catalogue
            .iter()
            .filter_map(|p| filter_profession(p, |e| exchange_matches(e, criterion, queries)))
            .collect(),
    };

    tracing::debug!(
        criterion = %criterion,
        queries = queries.len(),
        matches = results.len(),
        "Search finished"
    );
    results
}

/// Check whether a single exchange matches an item criterion.
///
/// Only `Wanted` and `Given` look at exchanges; profession queries are
/// resolved per record in [`search`] and never match here.
/// Wanted items are checked outer, queries inner; the first hit wins.
fn exchange_matches<Q: AsRef<str>>(
    exchange: &Exchange,
    criterion: Criterion,
    queries: &[Q],
) -> bool {
    match criterion {
        Criterion::Wanted => exchange
            .wanted
            .items
            .iter()
            .any(|item| queries.iter().any(|q| item.contains(q.as_ref()))),
        Criterion::Given => queries
            .iter()
            .any(|q| exchange.given.item.contains(q.as_ref())),
        Criterion::Profession => false,
    }
}

/// Rebuild a profession keeping only matching exchanges and non-empty levels.
fn filter_profession(
    profession: &ProfessionRecord,
    matches: impl Fn(&Exchange) -> bool,
) -> Option<ProfessionRecord> {
    let trades: Vec<TradeLevel> = profession
        .trades
        .iter()
        .filter_map(|level| {
            let exchanges: Vec<Exchange> = level
                .exchanges
                .iter()
                .filter(|e| matches(e))
                .cloned()
                .collect();
            (!exchanges.is_empty()).then(|| TradeLevel {
                level_name: level.level_name.clone(),
                exchanges,
            })
        })
        .collect();

    (!trades.is_empty()).then(|| ProfessionRecord {
        profession: profession.profession.clone(),
        job_site_block: profession.job_site_block.clone(),
        trades,
    })
}
