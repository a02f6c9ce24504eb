//! Error types for catalogue extraction and queries.

use thiserror::Error;

/// Main error type for the catalogue library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// A trade table does not match the level/column contract.
    ///
    /// Location fields are filled in as the error propagates outwards:
    /// the decoder knows the row, the builder knows the level and
    /// profession, the extraction driver knows the table index.
    #[error("Malformed trade table{}: {reason}", format_location(.table, .profession, .level, .row))]
    MalformedTable {
        table: Option<usize>,
        profession: Option<String>,
        level: Option<usize>,
        row: Option<usize>,
        reason: String,
    },

    /// Job-site list and table list lengths disagree.
    #[error("Job-site list has {job_sites} entries but {tables} trade tables were supplied")]
    IndexMismatch { job_sites: usize, tables: usize },

    /// Query criterion selector that is not one of wanted/given/profession.
    #[error("Unknown search criterion: '{0}'. Expected wanted, given or profession")]
    UnknownCriterion(String),

    /// Table layout descriptor that cannot describe a valid table.
    #[error("Invalid table layout: {0}")]
    InvalidLayout(String),
}

impl CatalogueError {
    /// Create a malformed-table error with no location attached yet.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            table: None,
            profession: None,
            level: None,
            row: None,
            reason: reason.into(),
        }
    }

    /// Attach the physical row index (absolute, within the table).
    #[must_use]
    pub fn at_row(mut self, index: usize) -> Self {
        if let Self::MalformedTable { row, .. } = &mut self {
            row.get_or_insert(index);
        }
        self
    }

    /// Attach the zero-based trade level (row group) index.
    #[must_use]
    pub fn at_level(mut self, index: usize) -> Self {
        if let Self::MalformedTable { level, .. } = &mut self {
            level.get_or_insert(index);
        }
        self
    }

    /// Attach the profession label.
    #[must_use]
    pub fn for_profession(mut self, label: &str) -> Self {
        if let Self::MalformedTable { profession, .. } = &mut self {
            if profession.is_none() && !label.is_empty() {
                *profession = Some(label.to_string());
            }
        }
        self
    }

    /// Attach the table index within the extraction input.
    #[must_use]
    pub fn in_table(mut self, index: usize) -> Self {
        if let Self::MalformedTable { table, .. } = &mut self {
            table.get_or_insert(index);
        }
        self
    }
}

fn format_location(
    table: &Option<usize>,
    profession: &Option<String>,
    level: &Option<usize>,
    row: &Option<usize>,
) -> String {
    let mut parts = Vec::new();
    if let Some(t) = table {
        parts.push(format!("table {t}"));
    }
    if let Some(p) = profession {
        parts.push(format!("profession '{p}'"));
    }
    if let Some(l) = level {
        parts.push(format!("level {l}"));
    }
    if let Some(r) = row {
        parts.push(format!("row {r}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Result type alias for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;
