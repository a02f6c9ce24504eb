//! Assembling profession records from raw trade tables.

use crate::error::{CatalogueError, Result};
use crate::grouping::{CellGrouper, GroupingRules};
use crate::layout::TableLayout;
use crate::normalize::normalize;
use crate::raw::{RawCell, RawRow, RawTable};
use crate::rowspan::{GroupRow, RowSpanDecoder};
use crate::types::{
    Catalogue, Exchange, GivenSide, ItemRef, ProfessionRecord, TradeLevel, WantedSide,
};

/// Builds [`ProfessionRecord`]s from raw table rows.
///
/// Composes [`RowSpanDecoder`] for level boundaries and [`CellGrouper`]
/// for multi-valued cells. Building is all-or-nothing: any structural
/// mismatch yields a [`CatalogueError::MalformedTable`].
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder<'a> {
    layout: &'a TableLayout,
    rules: &'a GroupingRules,
}

impl<'a> RecordBuilder<'a> {
    #[must_use]
    pub fn new(layout: &'a TableLayout, rules: &'a GroupingRules) -> Self {
        Self { layout, rules }
    }

    /// Build one profession record from a table's rows (header included).
    pub fn build(
        &self,
        profession_label: &str,
        site_block: &str,
        rows: &[RawRow],
    ) -> Result<ProfessionRecord> {
        let profession = profession_label.trim().to_lowercase();
        let groups = RowSpanDecoder::new(self.layout)
            .decode(rows)
            .map_err(|e| e.for_profession(&profession))?;

        let grouper = CellGrouper::new(self.rules);
        let mut trades = Vec::with_capacity(groups.len());

        for (level_index, group) in groups.iter().enumerate() {
            let exchanges = group
                .rows
                .iter()
                .map(|row| self.build_exchange(&grouper, &profession, &group.level_label, row))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| e.at_level(level_index).for_profession(&profession))?;

            tracing::debug!(
                profession = %profession,
                level = %group.level_label,
                exchanges = exchanges.len(),
                "Built trade level"
            );

            trades.push(TradeLevel {
                level_name: group.level_label.clone(),
                exchanges,
            });
        }

        Ok(ProfessionRecord {
            profession,
            job_site_block: site_block.trim().to_lowercase(),
            trades,
        })
    }

    fn build_exchange(
        &self,
        grouper: &CellGrouper<'_>,
        profession: &str,
        level: &str,
        group_row: &GroupRow<'_>,
    ) -> Result<Exchange> {
        let required = self.layout.required_cells(group_row.leads_group);
        if group_row.row.len() < required {
            return Err(CatalogueError::malformed(format!(
                "expected at least {required} cells, found {}",
                group_row.row.len()
            ))
            .at_row(group_row.index));
        }

        let offset = self.layout.column_offset(group_row.leads_group);
        let columns = &self.layout.columns;
        let cell = |index: usize| column(group_row, offset + index);
        let scalar = |index: usize| cell(index).map(CellGrouper::join);

        let items = grouper.split(cell(columns.wanted_item)?, profession, level);
        let quantities = grouper.split(cell(columns.wanted_quantity)?, profession, level);

        if items.is_empty() || items.iter().all(String::is_empty) {
            return Err(
                CatalogueError::malformed("wanted-item cell is empty").at_row(group_row.index)
            );
        }
        if items.len() != quantities.len() {
            return Err(CatalogueError::malformed(format!(
                "{} wanted items but {} default quantities",
                items.len(),
                quantities.len()
            ))
            .at_row(group_row.index));
        }

        let given_item = scalar(columns.given_item)?;
        if given_item.is_empty() {
            return Err(
                CatalogueError::malformed("given-item cell is empty").at_row(group_row.index)
            );
        }

        Ok(Exchange {
            wanted: WantedSide {
                items: items.iter().map(ItemRef::new).collect(),
                default_quantities: quantities,
                price_multiplier: scalar(columns.price_multiplier)?,
            },
            given: GivenSide {
                item: ItemRef::new(given_item),
                quantity: scalar(columns.given_quantity)?,
            },
            trades_until_disabled: scalar(columns.trades_until_disabled)?,
            xp_to_villager: scalar(columns.xp_to_villager)?,
        })
    }
}

fn column<'t>(group_row: &GroupRow<'t>, position: usize) -> Result<&'t RawCell> {
    group_row.row.cell(position).ok_or_else(|| {
        CatalogueError::malformed(format!("missing column {position}")).at_row(group_row.index)
    })
}

/// Derive the profession label from a table caption.
///
/// # Examples
/// ```
/// use villager_trades_catalogue::builder::profession_from_caption;
///
/// assert_eq!(profession_from_caption("Farmer Economic Trade"), "farmer");
/// ```
#[must_use]
pub fn profession_from_caption(caption: &str) -> String {
    normalize(caption)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Extract a whole catalogue from index-aligned job sites and tables.
///
/// Tables are processed in order; the first malformed table aborts the
/// extraction, since a partial catalogue is worse than none.
pub fn extract_catalogue(
    job_sites: &[String],
    tables: &[RawTable],
    layout: &TableLayout,
    rules: &GroupingRules,
) -> Result<Catalogue> {
    if job_sites.len() != tables.len() {
        return Err(CatalogueError::IndexMismatch {
            job_sites: job_sites.len(),
            tables: tables.len(),
        });
    }
    layout.validate()?;

    let builder = RecordBuilder::new(layout, rules);
    let mut professions = Vec::with_capacity(tables.len());

    for (index, (site, table)) in job_sites.iter().zip(tables).enumerate() {
        let caption = table.caption().ok_or_else(|| {
            CatalogueError::malformed("table has no caption row").in_table(index)
        })?;
        let profession = profession_from_caption(caption);
        tracing::debug!(table = index, profession = %profession, "Extracting trade table");

        let record = builder
            .build(&profession, site, &table.rows)
            .map_err(|e| e.in_table(index))?;
        professions.push(record);
    }

    Ok(Catalogue::new(professions))
}
