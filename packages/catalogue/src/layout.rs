//! Table layout descriptor.
//!
//! Describes where data starts in a trade table and which column holds
//! which value, so that drift in the source page is absorbed here instead
//! of in the decoder and builder.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogueError, Result};

/// Number of trade levels per profession (novice .. master).
pub const DEFAULT_LEVEL_COUNT: usize = 5;

/// Column index of each semantic value, counted after the level-label cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ColumnRoles {
    pub wanted_item: usize,
    pub wanted_quantity: usize,
    pub price_multiplier: usize,
    pub given_item: usize,
    pub given_quantity: usize,
    pub trades_until_disabled: usize,
    pub xp_to_villager: usize,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            wanted_item: 0,
            wanted_quantity: 1,
            price_multiplier: 2,
            given_item: 3,
            given_quantity: 4,
            trades_until_disabled: 5,
            xp_to_villager: 6,
        }
    }
}

impl ColumnRoles {
    /// All role indices with their names, in schema order.
    #[must_use]
    pub fn indices(&self) -> [(&'static str, usize); 7] {
        [
            ("wanted-item", self.wanted_item),
            ("wanted-quantity", self.wanted_quantity),
            ("price-multiplier", self.price_multiplier),
            ("given-item", self.given_item),
            ("given-quantity", self.given_quantity),
            ("trades-until-disabled", self.trades_until_disabled),
            ("xp-to-villager", self.xp_to_villager),
        ]
    }

    /// Number of cells a row must have to cover every role.
    #[must_use]
    pub fn width(&self) -> usize {
        self.indices().iter().map(|(_, i)| i + 1).max().unwrap_or(0)
    }
}

/// Layout of a profession trade table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TableLayout {
    /// Rows holding the "<Profession> Economic Trade" header.
    pub header_rows: usize,

    /// Column-title rows between the header and the data.
    pub decorative_rows: usize,

    /// Trade levels per table.
    pub level_count: usize,

    /// Leading cells carried only by the first row of each level group.
    pub level_label_columns: usize,

    pub columns: ColumnRoles,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            header_rows: 1,
            decorative_rows: 1,
            level_count: DEFAULT_LEVEL_COUNT,
            level_label_columns: 1,
            columns: ColumnRoles::default(),
        }
    }
}

impl TableLayout {
    /// Index of the first data row.
    #[must_use]
    pub fn first_data_row(&self) -> usize {
        self.header_rows + self.decorative_rows
    }

    /// Column offset applied to a row, depending on whether it leads its group.
    #[must_use]
    pub fn column_offset(&self, leads_group: bool) -> usize {
        if leads_group {
            self.level_label_columns
        } else {
            0
        }
    }

    /// Minimum number of cells a data row must carry.
    #[must_use]
    pub fn required_cells(&self, leads_group: bool) -> usize {
        self.columns.width() + self.column_offset(leads_group)
    }

    /// Check that the layout can describe a table at all.
    pub fn validate(&self) -> Result<()> {
        if self.level_count == 0 {
            return Err(CatalogueError::InvalidLayout(
                "level-count must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (role, index) in self.columns.indices() {
            if !seen.insert(index) {
                return Err(CatalogueError::InvalidLayout(format!(
                    "column {index} is assigned to more than one role (second: {role})"
                )));
            }
        }

        Ok(())
    }
}
