//! In-memory tabular representation shared by the loaders and the parsers.

use crate::error::{KpiError, KpiResult};
use crate::transformations::column_key;

/// A parsed table: one header row and rows of optional text cells.
///
/// Cells are stored trimmed; blank cells are `None`. Every row has exactly
/// as many cells as there are headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table, rejecting rows whose width differs from the header row.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> KpiResult<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(KpiError::MalformedTable(format!(
                "row {} has {} cells, expected {}",
                idx,
                row.len(),
                headers.len()
            )));
        }

        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(clean_cell).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    /// Build a table from string cells, treating blank strings as missing.
    pub fn from_strings<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> KpiResult<Self> {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| Some(c.as_ref().to_string())).collect())
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of a cell, or `None` when blank or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Index of the first column whose normalized header matches one of `aliases`.
    ///
    /// Aliases are tried in order, so earlier aliases take precedence.
    pub fn find_column<S: AsRef<str>>(&self, aliases: &[S]) -> Option<usize> {
        let keys: Vec<String> = self.headers.iter().map(|h| column_key(h)).collect();
        aliases
            .iter()
            .find_map(|alias| keys.iter().position(|k| k == alias.as_ref()))
    }
}

fn clean_cell(cell: Option<String>) -> Option<String> {
    cell.and_then(|c| {
        let trimmed = c.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == c.len() {
            Some(c)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_become_none() {
        let table = RawTable::from_strings(&["Lundi", "Mardi"], &[vec![" A ", "  "]]).unwrap();
        assert_eq!(table.cell(0, 0), Some("A"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = RawTable::from_strings(&["a", "b"], &[vec!["1"]]);
        assert!(matches!(result, Err(KpiError::MalformedTable(_))));
    }

    #[test]
    fn test_find_column_by_normalized_header() {
        let table =
            RawTable::from_strings(&["Début", "Durée [mn]", "Parcours"], &[]).unwrap();
        assert_eq!(table.find_column(&["debut"]), Some(0));
        assert_eq!(table.find_column(&["missing", "duree"]), Some(1));
        assert_eq!(table.find_column(&["route"]), None);
        assert!(table.is_empty());
        assert_eq!(table.width(), 3);
    }
}
