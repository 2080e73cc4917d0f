//! Food-system stakeholder directories
//!
//! One row per organisation. Rows with any empty cell are dropped at load and
//! the website column is rewritten as a markdown link for the table view.

use super::error::DataResult;
use super::table::Table;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Header used in the raw Addis Ababa export
pub const RAW_AREA_COLUMN: &str = "Area of Activity (Food Systems Value Chain)";
/// Column name after cleaning
pub const AREA_COLUMN: &str = "Area of Activity";
pub const SECTOR_COLUMN: &str = "Primary sector";
pub const SCALE_COLUMN: &str = "Scale of Activity";
pub const WEBSITE_COLUMN: &str = "Website";

/// Categorical columns the pie chart can group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingKey {
    Sector,
    Area,
    Scale,
}

impl GroupingKey {
    /// All keys, in dropdown order
    pub fn all() -> &'static [GroupingKey] {
        &[GroupingKey::Sector, GroupingKey::Area, GroupingKey::Scale]
    }

    /// Column this key groups by
    pub fn column(&self) -> &'static str {
        match self {
            GroupingKey::Sector => SECTOR_COLUMN,
            GroupingKey::Area => AREA_COLUMN,
            GroupingKey::Scale => SCALE_COLUMN,
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            GroupingKey::Sector => "Primary Sector",
            GroupingKey::Area => "Area of Activity",
            GroupingKey::Scale => "Scale of Activity",
        }
    }

    /// Dropdown value
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingKey::Sector => "Sector",
            GroupingKey::Area => "Area",
            GroupingKey::Scale => "Scale",
        }
    }
}

impl std::str::FromStr for GroupingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sector" => Ok(GroupingKey::Sector),
            "Area" => Ok(GroupingKey::Area),
            "Scale" => Ok(GroupingKey::Scale),
            other => Err(format!("unknown grouping key '{}'", other)),
        }
    }
}

/// One organisation in the directory; cells are aligned with
/// [`StakeholderDirectory::columns`]
#[derive(Debug, Clone, PartialEq)]
pub struct StakeholderRecord {
    pub cells: Vec<String>,
}

/// A cleaned stakeholder directory
#[derive(Debug, Clone, Default)]
pub struct StakeholderDirectory {
    pub columns: Vec<String>,
    pub records: Vec<StakeholderRecord>,
}

impl StakeholderDirectory {
    /// Load and clean a directory CSV
    pub fn load(path: &Path) -> DataResult<Self> {
        let table = Table::read(path)?;
        let directory = Self::from_table(table);
        tracing::info!(
            file = %path.display(),
            rows = directory.len(),
            "Loaded stakeholder directory"
        );
        Ok(directory)
    }

    /// Clean a raw table: drop incomplete rows, normalise headers, link websites
    pub fn from_table(mut table: Table) -> Self {
        let dropped = table.drop_incomplete_rows();
        if dropped > 0 {
            tracing::debug!(dataset = %table.name, dropped, "Dropped incomplete stakeholder rows");
        }
        table.rename_column(RAW_AREA_COLUMN, AREA_COLUMN);
        for column in table.columns.iter_mut() {
            *column = column.trim().to_string();
        }

        if let Some(idx) = table.find_column(WEBSITE_COLUMN) {
            for row in &mut table.rows {
                row[idx] = website_link(&row[idx]);
            }
        }

        Self {
            columns: table.columns,
            records: table
                .rows
                .into_iter()
                .map(|cells| StakeholderRecord { cells })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column index for a grouping key, if this directory carries it
    pub fn key_index(&self, key: GroupingKey) -> Option<usize> {
        self.columns.iter().position(|c| c == key.column())
    }

    /// Occurrence count per category, most frequent first
    ///
    /// Ties keep the order in which categories first appear, matching a
    /// stable value_counts.
    pub fn value_counts(&self, key: GroupingKey) -> Vec<(String, usize)> {
        let Some(idx) = self.key_index(key) else {
            return Vec::new();
        };

        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            let value = &record.cells[idx];
            match counts.iter_mut().find(|(name, _)| name == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Records whose `key` column equals `value` exactly
    pub fn filter(&self, key: GroupingKey, value: &str) -> Vec<&StakeholderRecord> {
        match self.key_index(key) {
            Some(idx) => self
                .records
                .iter()
                .filter(|r| r.cells[idx] == value)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Table records as JSON objects keyed by column name
    pub fn to_records<'a>(
        &self,
        records: impl IntoIterator<Item = &'a StakeholderRecord>,
    ) -> Vec<Value> {
        records
            .into_iter()
            .map(|record| {
                let row: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(&record.cells)
                    .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                    .collect();
                Value::Object(row)
            })
            .collect()
    }

    /// Fixed pixel width per column: 6px per character, clamped to [80, 200]
    pub fn column_widths(&self) -> Vec<(String, u32)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let longest = self
                    .records
                    .iter()
                    .map(|r| r.cells[idx].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(column.chars().count());
                let width = (longest as u32 * 6).clamp(80, 200);
                (column.clone(), width)
            })
            .collect()
    }
}

/// `[Link Available](url)` for http(s) urls, `--` otherwise
pub fn website_link(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http") {
        format!("[Link Available]({})", raw)
    } else {
        "--".to_string()
    }
}
