//! Partitioning table rows into trade-level groups.
//!
//! The first row of every level carries a label cell (`Novice`, ...) whose
//! `rowspan` tells how many physical rows belong to that level. Rows that
//! follow within the same level lack the label cell.

use crate::error::{CatalogueError, Result};
use crate::layout::TableLayout;
use crate::normalize::normalize;
use crate::raw::RawRow;

/// A physical row inside a level group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRow<'t> {
    /// Absolute row index within the table.
    pub index: usize,

    /// Whether this row carries the level-label cell.
    pub leads_group: bool,

    pub row: &'t RawRow,
}

/// Rows belonging to one trade level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup<'t> {
    /// Level label as written in the label cell, normalized to lower case.
    pub level_label: String,
    pub rows: Vec<GroupRow<'t>>,
}

/// Decodes row spans into level groups according to a [`TableLayout`].
#[derive(Debug, Clone, Copy)]
pub struct RowSpanDecoder<'l> {
    layout: &'l TableLayout,
}

impl<'l> RowSpanDecoder<'l> {
    #[must_use]
    pub fn new(layout: &'l TableLayout) -> Self {
        Self { layout }
    }

    /// Partition `rows` (the whole table, header included) into level groups.
    ///
    /// Exactly `layout.level_count` groups are produced. Rows after the last
    /// group are ignored.
    pub fn decode<'t>(&self, rows: &'t [RawRow]) -> Result<Vec<RowGroup<'t>>> {
        let mut cursor = self.layout.first_data_row();
        let mut groups = Vec::with_capacity(self.layout.level_count);

        for level in 0..self.layout.level_count {
            let Some(first) = rows.get(cursor) else {
                return Err(CatalogueError::malformed(format!(
                    "rows exhausted after {level} of {} trade levels",
                    self.layout.level_count
                ))
                .at_level(level)
                .at_row(cursor));
            };

            let label_cell = first.cell(0).ok_or_else(|| {
                CatalogueError::malformed("level row has no cells")
                    .at_level(level)
                    .at_row(cursor)
            })?;

            let span = match label_cell.row_span.as_deref() {
                Some(raw) => parse_span(raw).map_err(|e| e.at_level(level).at_row(cursor))?,
                None => 1,
            };

            let end = cursor
                .checked_add(span)
                .filter(|&end| end <= rows.len())
                .ok_or_else(|| {
                    CatalogueError::malformed(format!(
                        "row span {span} reads past the end of the table ({} rows)",
                        rows.len()
                    ))
                    .at_level(level)
                    .at_row(cursor)
                })?;

            let level_label = normalize(&label_cell.text).to_lowercase();
            tracing::trace!(level = %level_label, start = cursor, span, "Decoded level group");

            groups.push(RowGroup {
                level_label,
                rows: rows[cursor..end]
                    .iter()
                    .enumerate()
                    .map(|(offset, row)| GroupRow {
                        index: cursor + offset,
                        leads_group: offset == 0,
                        row,
                    })
                    .collect(),
            });

            cursor = end;
        }

        Ok(groups)
    }
}

/// Parse a `rowspan` attribute value into a positive row count.
fn parse_span(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(CatalogueError::malformed("row span of 0 is not supported")),
        Ok(span) => Ok(span),
        Err(_) => Err(CatalogueError::malformed(format!(
            "row span '{raw}' is not a number"
        ))),
    }
}
