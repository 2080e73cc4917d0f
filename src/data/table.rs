//! Raw CSV tables
//!
//! Every CSV dataset is first read into a [`Table`] of string cells, then the
//! typed loaders pull the columns they need out of it by name.

use super::error::{DataError, DataResult};
use std::io::Read;
use std::path::Path;

/// A CSV file held as string cells with its header row
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Dataset name used in error messages (usually the file name)
    pub name: String,
    /// Header row, trimmed of the UTF-8 BOM but otherwise verbatim
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` wide
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a CSV file from disk
    pub fn read(path: &Path) -> DataResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| DataError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file)
    }

    /// Read a CSV table from any reader (useful for testing)
    pub fn from_reader(name: impl Into<String>, reader: impl Read) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column, erroring if absent
    pub fn column(&self, name: &str) -> DataResult<usize> {
        self.find_column(name).ok_or_else(|| DataError::MissingColumn {
            dataset: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Index of a column, ignoring surrounding whitespace in the header
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.trim() == name.trim()))
    }

    /// Drop a column if present (e.g. a pandas index column)
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Rename a column if present
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.find_column(from) {
            self.columns[idx] = to.to_string();
        }
    }

    /// Keep only rows where every cell is non-empty
    pub fn drop_incomplete_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.iter().all(|cell| !is_missing(cell)));
        before - self.rows.len()
    }

    /// Parse a numeric cell
    pub fn f64_at(&self, row: usize, col: usize) -> DataResult<f64> {
        let raw = self.rows[row][col].trim();
        raw.parse::<f64>().map_err(|_| self.invalid(row, col))
    }

    /// Parse an integer cell, accepting pandas-style floats such as `2022.0`
    pub fn i32_at(&self, row: usize, col: usize) -> DataResult<i32> {
        let raw = self.rows[row][col].trim();
        raw.parse::<i32>()
            .ok()
            .or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.fract() == 0.0)
                    .map(|v| v as i32)
            })
            .ok_or_else(|| self.invalid(row, col))
    }

    /// Borrow a string cell
    pub fn str_at(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    fn invalid(&self, row: usize, col: usize) -> DataError {
        DataError::InvalidValue {
            dataset: self.name.clone(),
            column: self.columns[col].clone(),
            row: row + 2,
            value: self.rows[row][col].clone(),
        }
    }
}

/// Whether a cell counts as missing (empty or a pandas NaN spelling)
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell.eq_ignore_ascii_case("nan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_bom_and_ragged_rows() {
        let csv = "\u{feff}Name,Value\nalpha,1\nbeta\n";
        let table = Table::from_reader("t.csv", csv.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Name", "Value"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["beta".to_string(), String::new()]);
    }

    #[test]
    fn test_drop_incomplete_rows() {
        let csv = "a,b\n1,2\n,3\n4,nan\n5,6\n";
        let mut table = Table::from_reader("t.csv", csv.as_bytes()).unwrap();

        assert_eq!(table.drop_incomplete_rows(), 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_trailing_space_column_lookup() {
        let csv = "Primary sector ,Scale\nNGO,Local\n";
        let table = Table::from_reader("t.csv", csv.as_bytes()).unwrap();

        assert_eq!(table.column("Primary sector").unwrap(), 0);
        assert!(matches!(
            table.column("Website"),
            Err(DataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_numeric_parsing() {
        let csv = "Year,Value\n2022.0,1.5\nabc,x\n";
        let table = Table::from_reader("t.csv", csv.as_bytes()).unwrap();

        assert_eq!(table.i32_at(0, 0).unwrap(), 2022);
        assert_eq!(table.f64_at(0, 1).unwrap(), 1.5);
        let err = table.i32_at(1, 0).unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_drop_and_rename_column() {
        let csv = "Unnamed: 0,Policy\n0,Food Act\n";
        let mut table = Table::from_reader("t.csv", csv.as_bytes()).unwrap();
        table.drop_column("Unnamed: 0");
        table.rename_column("Policy", "Policy Name");

        assert_eq!(table.columns, vec!["Policy Name"]);
        assert_eq!(table.rows[0], vec!["Food Act".to_string()]);
    }
}
