//! DOM adapter: turns the trading page into raw job-site labels and tables.
//!
//! Everything HTML-specific stays here. The catalogue only ever sees
//! [`RawTable`]s whose cell text uses `'\n'` where the page had `<br>`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use villager_trades_catalogue::raw::LINE_BREAK;
use villager_trades_catalogue::{RawCell, RawRow, RawTable};

use crate::config::PageLayout;
use crate::error::{HarvesterError, Result};

/// Job-site labels: the sprite captions in paragraphs following a heading.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static JOB_SITE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"h3 ~ p > a[href^="/wiki/"] > span > span.sprite-text"#)
        .expect("valid selector")
});

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid selector"));

/// Job sites and trade tables lifted from the page, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradePage {
    pub job_sites: Vec<String>,
    pub tables: Vec<RawTable>,
}

/// Parse the trading page according to `layout`.
///
/// # Arguments
/// * `html` - Full page source
/// * `layout` - Which job sites and tables to keep
///
/// # Returns
/// The first `layout.job_site_limit` job-site labels and the tables at the
/// indices selected by `layout.table_ranges`
pub fn parse_page(html: &str, layout: &PageLayout) -> Result<TradePage> {
    layout.validate()?;
    let document = Html::parse_document(html);

    let job_sites: Vec<String> = document
        .select(&JOB_SITE_SELECTOR)
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .filter(|s| !s.is_empty())
        .take(layout.job_site_limit)
        .collect();

    let all_tables: Vec<ElementRef<'_>> = document.select(&TABLE_SELECTOR).collect();
    tracing::debug!(
        job_sites = job_sites.len(),
        tables = all_tables.len(),
        "Parsed trading page"
    );

    let tables = layout
        .table_indices()
        .map(|index| {
            all_tables.get(index).map(|t| raw_table(*t)).ok_or_else(|| {
                HarvesterError::PageStructure(format!(
                    "expected a trade table at index {index}, but the page has only {} tables",
                    all_tables.len()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TradePage { job_sites, tables })
}

/// Convert a `<table>` element into rows of `<th>`/`<td>` cells.
pub fn raw_table(table: ElementRef<'_>) -> RawTable {
    RawTable::new(table.select(&ROW_SELECTOR).map(raw_row).collect())
}

fn raw_row(row: ElementRef<'_>) -> RawRow {
    RawRow::new(
        row.children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "th" | "td"))
            .map(raw_cell)
            .collect(),
    )
}

fn raw_cell(cell: ElementRef<'_>) -> RawCell {
    let text = cell_text(cell);
    match cell.value().attr("rowspan") {
        Some(span) => RawCell::new(text).with_row_span(span),
        None => RawCell::new(text),
    }
}

/// Text of an element with `<br>` rendered as a line break and runs of
/// whitespace within each line collapsed.
fn cell_text(element: ElementRef<'_>) -> String {
    let mut buf = String::new();
    for node in element.descendants() {
        match node.value() {
            // source newlines are layout, not content
            Node::Text(text) => {
                buf.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }))
            }
            Node::Element(e) if e.name() == "br" => buf.push(LINE_BREAK),
            _ => {}
        }
    }

    buf.split(LINE_BREAK)
        .map(collapse_whitespace)
        .collect::<Vec<_>>()
        .join(&LINE_BREAK.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableRange;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
        <h3>Job site blocks</h3>
        <p><a href="/wiki/Composter"><span><span class="sprite-text">Composter</span></span></a></p>
        <p><a href="/wiki/Barrel"><span><span class="sprite-text">Barrel</span></span></a></p>
        <p><a href="/wiki/Lectern"><span><span class="sprite-text">Lectern</span></span></a></p>
        <p><a href="https://elsewhere.example/x"><span><span class="sprite-text">Ignored</span></span></a></p>
        <table class="wikitable"><tr><td>Skipped</td></tr></table>
        <table class="wikitable">
          <tr><th colspan="8">Farmer  Economic
              Trade</th></tr>
          <tr><td rowspan="2">Novice</td><td>Oak Log<br>Spruce   Log</td><td>6<br/>6</td></tr>
          <tr><td>Wheat<sup>[note 1]</sup></td></tr>
        </table>
        <table class="wikitable"><tr><th>Fisherman Economic Trade</th></tr></table>
        <table class="other"><tr><td>Not a trade table</td></tr></table>
        </body></html>
    "#;

    fn layout() -> PageLayout {
        PageLayout {
            job_site_limit: 2,
            table_ranges: vec![TableRange::new(1, 3)],
            ..PageLayout::default()
        }
    }

    #[test]
    fn test_job_sites_are_limited_and_ordered() {
        let page = parse_page(PAGE, &layout()).unwrap();
        assert_eq!(page.job_sites, vec!["Composter", "Barrel"]);
    }

    #[test]
    fn test_selected_tables() {
        let page = parse_page(PAGE, &layout()).unwrap();
        assert_eq!(page.tables.len(), 2);
        assert_eq!(page.tables[0].caption(), Some("Farmer Economic Trade"));
        assert_eq!(page.tables[1].caption(), Some("Fisherman Economic Trade"));
    }

    #[test]
    fn test_cells_keep_breaks_and_spans() {
        let page = parse_page(PAGE, &layout()).unwrap();
        let farmer = &page.tables[0];

        let first = &farmer.rows[1];
        assert_eq!(first.cell(0).unwrap().row_span.as_deref(), Some("2"));
        assert_eq!(first.cell(1).unwrap().text, "Oak Log\nSpruce Log");
        assert_eq!(first.cell(2).unwrap().text, "6\n6");
        assert_eq!(first.cell(1).unwrap().row_span, None);

        let second = &farmer.rows[2];
        assert_eq!(second.len(), 1);
        assert_eq!(second.cell(0).unwrap().text, "Wheat[note 1]");
    }

    #[test]
    fn test_missing_table_is_page_structure_error() {
        let layout = PageLayout {
            table_ranges: vec![TableRange::new(1, 5)],
            ..layout()
        };
        let err = parse_page(PAGE, &layout).unwrap_err();
        assert!(matches!(err, HarvesterError::PageStructure(_)));
        assert!(err.to_string().contains("index 3"));
    }
}
