//! Long-format yearly series for Hà Nội affordability and nutrition

use super::error::DataResult;
use super::table::{is_missing, Table};
use std::path::Path;

/// Affordability categories offered by the trend dropdown: `(value, label, chart title)`
pub const AFFORDABILITY_CATEGORIES: [(&str, &str, &str); 4] = [
    (
        "foodExp_totalExp",
        "Food Expenditure from Total Expenses",
        "Food Expenditure from Total Expenses (%)",
    ),
    (
        "foodExp_totalInc",
        "Food Expenditure from Household Income",
        "Food Expenditure from Household Income (%)",
    ),
    (
        "riceExp_House",
        "Rice Expenditure from Household Income",
        "Rice Expenditure from Household Income (%)",
    ),
    ("riceAfford", "Rice Affordability", "Rice Affordability"),
];

pub const DEFAULT_AFFORDABILITY_CATEGORY: &str = "riceAfford";

/// End year of the dumbbell comparison
pub const DUMBBELL_END_YEAR: i32 = 2023;
pub const DUMBBELL_FIRST_YEAR: i32 = 2010;
pub const DUMBBELL_DEFAULT_START: i32 = 2013;

/// One observation
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRecord {
    pub category: String,
    /// Absent in files that are not split by region
    pub region: Option<String>,
    pub year: i32,
    pub value: Option<f64>,
}

/// A region's points for one category, in year order
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    pub region: String,
    pub points: Vec<(i32, f64)>,
}

/// One row of the dumbbell chart
#[derive(Debug, Clone, PartialEq)]
pub struct DumbbellRow {
    pub category: String,
    pub start: f64,
    pub end: f64,
}

/// A long-format series table
#[derive(Debug, Clone, Default)]
pub struct TrendSeries {
    pub records: Vec<TrendRecord>,
}

impl TrendSeries {
    pub fn load(path: &Path) -> DataResult<Self> {
        let series = Self::from_table(&Table::read(path)?)?;
        tracing::info!(file = %path.display(), rows = series.records.len(), "Loaded trend series");
        Ok(series)
    }

    pub fn from_table(table: &Table) -> DataResult<Self> {
        let category = table.column("Cat")?;
        let region = table.find_column("Reg");
        let year = table.column("Year")?;
        let value = table.column("value")?;

        let records = (0..table.len())
            .map(|row| {
                let raw = table.str_at(row, value);
                let value = if is_missing(raw) {
                    None
                } else {
                    Some(table.f64_at(row, value)?)
                };
                Ok(TrendRecord {
                    category: table.str_at(row, category).to_string(),
                    region: region.map(|col| table.str_at(row, col).to_string()),
                    year: table.i32_at(row, year)?,
                    value,
                })
            })
            .collect::<DataResult<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        categories
    }

    /// Per-region series for a category; regions in first-seen order
    pub fn by_region(&self, category: &str) -> Vec<RegionSeries> {
        let mut series: Vec<RegionSeries> = Vec::new();
        for record in self.records.iter().filter(|r| r.category == category) {
            let Some(value) = record.value else { continue };
            let region = record.region.clone().unwrap_or_default();
            match series.iter_mut().find(|s| s.region == region) {
                Some(s) => s.points.push((record.year, value)),
                None => series.push(RegionSeries {
                    region,
                    points: vec![(record.year, value)],
                }),
            }
        }
        for s in &mut series {
            s.points.sort_by_key(|(year, _)| *year);
        }
        series
    }

    /// First value recorded for `(category, year)`
    pub fn value_at(&self, category: &str, year: i32) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.category == category && r.year == year)
            .and_then(|r| r.value)
    }

    /// Start-vs-end comparison per category; categories missing either year are skipped
    pub fn dumbbell(&self, start_year: i32, end_year: i32) -> Vec<DumbbellRow> {
        self.categories()
            .into_iter()
            .filter_map(|category| {
                let start = self.value_at(&category, start_year)?;
                let end = self.value_at(&category, end_year)?;
                Some(DumbbellRow { category, start, end })
            })
            .collect()
    }
}

/// Chart title for an affordability category, falling back to the raw name
pub fn affordability_title(category: &str) -> &str {
    AFFORDABILITY_CATEGORIES
        .iter()
        .find(|(value, _, _)| *value == category)
        .map(|(_, _, title)| *title)
        .unwrap_or(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(csv: &str) -> TrendSeries {
        TrendSeries::from_table(&Table::from_reader("trend.csv", csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_by_region_sorted() {
        let s = series("Cat,Reg,Year,value\nriceAfford,Urban,2020,3\nriceAfford,Rural,2018,2\nriceAfford,Urban,2018,1\nfoodExp_totalExp,Urban,2018,40\n");
        let by_region = s.by_region("riceAfford");

        assert_eq!(by_region.len(), 2);
        assert_eq!(by_region[0].region, "Urban");
        assert_eq!(by_region[0].points, vec![(2018, 1.0), (2020, 3.0)]);
        assert_eq!(s.categories(), vec!["riceAfford", "foodExp_totalExp"]);
    }

    #[test]
    fn test_dumbbell_skips_missing() {
        let s = series("Cat,Year,value\nRice,2013,10\nRice,2023,8\nMeat,2013,4\nMeat,2023,\nFish,2023,3\n");
        let rows = s.dumbbell(2013, DUMBBELL_END_YEAR);

        assert_eq!(
            rows,
            vec![DumbbellRow {
                category: "Rice".to_string(),
                start: 10.0,
                end: 8.0
            }]
        );
    }

    #[test]
    fn test_affordability_title() {
        assert_eq!(affordability_title("riceExp_House"), "Rice Expenditure from Household Income (%)");
        assert_eq!(affordability_title("other"), "other");
    }
}
