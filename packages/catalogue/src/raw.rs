//! Raw table grid handed over by the DOM collaborator.
//!
//! Cells carry rendered text only: every explicit line-break element is
//! rendered as `'\n'`, all other whitespace already collapsed.

/// Marker used for an explicit line break inside a cell.
pub const LINE_BREAK: char = '\n';

/// A single `<th>`/`<td>` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Rendered text, with line breaks as [`LINE_BREAK`].
    pub text: String,

    /// Raw `rowspan` attribute value, if the cell declares one.
    pub row_span: Option<String>,
}

impl RawCell {
    /// Create a cell without a row span.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            row_span: None,
        }
    }

    /// Attach a `rowspan` attribute value.
    #[must_use]
    pub fn with_row_span(mut self, span: impl Into<String>) -> Self {
        self.row_span = Some(span.into());
        self
    }

    /// Check whether the cell content contains an explicit line break.
    #[must_use]
    pub fn has_line_break(&self) -> bool {
        self.text.contains(LINE_BREAK)
    }

    /// Iterate over the physical lines of the cell.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(LINE_BREAK)
    }
}

/// A table row: its cells in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
}

impl RawRow {
    #[must_use]
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }

    /// Build a row of plain cells from their texts.
    #[must_use]
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| RawCell::new(t.as_ref())).collect())
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&RawCell> {
        self.cells.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A whole trade table, header rows included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    #[must_use]
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Text of the first cell of the first row (the table caption header).
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.cell(0))
            .map(|cell| cell.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_line_breaks() {
        let cell = RawCell::new("Oak Log\nSpruce Log");
        assert!(cell.has_line_break());
        assert_eq!(cell.lines().collect::<Vec<_>>(), vec!["Oak Log", "Spruce Log"]);

        let single = RawCell::new("Emerald");
        assert!(!single.has_line_break());
        assert_eq!(single.lines().count(), 1);
    }

    #[test]
    fn test_cell_row_span() {
        let cell = RawCell::new("Novice").with_row_span("2");
        assert_eq!(cell.row_span.as_deref(), Some("2"));
        assert_eq!(RawCell::new("x").row_span, None);
    }

    #[test]
    fn test_table_caption() {
        let table = RawTable::new(vec![RawRow::from_texts(&["Farmer Economic Trade"])]);
        assert_eq!(table.caption(), Some("Farmer Economic Trade"));
        assert_eq!(RawTable::default().caption(), None);
    }
}
