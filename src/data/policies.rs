//! Policy database and SDG-tagged sustainability indicators

use super::error::DataResult;
use super::table::{is_missing, Table};
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

/// Pandas index column left in the exported policy file
const INDEX_COLUMN: &str = "Unnamed: 0";

const SDG_COLUMNS: [&str; 5] = ["SDG_1", "SDG_2", "SDG_3", "SDG_4", "SDG_5"];

/// Columns the indicator table shows, in order
pub const INDICATOR_COLUMNS: [&str; 5] = [
    "Dimensions",
    "Components",
    "Indicators",
    "SDG impact area/target",
    "SDG Numbers",
];

/// The policy database, shown verbatim
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PolicyTable {
    pub fn load(path: &Path) -> DataResult<Self> {
        let policies = Self::from_table(Table::read(path)?);
        tracing::info!(file = %path.display(), rows = policies.rows.len(), "Loaded policy database");
        Ok(policies)
    }

    pub fn from_table(mut table: Table) -> Self {
        table.drop_column(INDEX_COLUMN);
        Self {
            columns: table.columns,
            rows: table.rows,
        }
    }

    pub fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

/// One sustainability indicator with the SDGs it maps to
#[derive(Debug, Clone, PartialEq)]
pub struct SdgIndicator {
    pub dimension: String,
    pub component: String,
    pub indicator: String,
    pub impact_area: String,
    /// Goal numbers, unique, in column order
    pub goals: Vec<u8>,
}

impl SdgIndicator {
    /// `"2, 12"`, or `"--"` when the indicator maps to no goal
    pub fn goal_label(&self) -> String {
        if self.goals.is_empty() {
            "--".to_string()
        } else {
            self.goals
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Row keyed by [`INDICATOR_COLUMNS`]
    pub fn record(&self) -> Value {
        let values = [
            self.dimension.clone(),
            self.component.clone(),
            self.indicator.clone(),
            self.impact_area.clone(),
            self.goal_label(),
        ];
        let record: Map<String, Value> = INDICATOR_COLUMNS
            .iter()
            .zip(values)
            .map(|(c, v)| (c.to_string(), Value::String(v)))
            .collect();
        Value::Object(record)
    }
}

/// All indicators
#[derive(Debug, Clone, Default)]
pub struct SdgIndicators {
    pub indicators: Vec<SdgIndicator>,
}

impl SdgIndicators {
    pub fn load(path: &Path) -> DataResult<Self> {
        let indicators = Self::from_table(&Table::read(path)?)?;
        tracing::info!(file = %path.display(), rows = indicators.indicators.len(), "Loaded SDG indicators");
        Ok(indicators)
    }

    pub fn from_table(table: &Table) -> DataResult<Self> {
        let dimension = table.column("Dimensions")?;
        let component = table.column("Components")?;
        let indicator = table.column("Indicators")?;
        let impact = table.column("SDG impact area/target")?;
        let sdg_columns: Vec<usize> = SDG_COLUMNS
            .iter()
            .filter_map(|c| table.find_column(c))
            .collect();

        let indicators = (0..table.len())
            .map(|row| {
                let mut goals: Vec<u8> = Vec::new();
                for col in &sdg_columns {
                    if let Some(goal) = goal_number(table.str_at(row, *col)) {
                        if !goals.contains(&goal) {
                            goals.push(goal);
                        }
                    }
                }
                SdgIndicator {
                    dimension: cell(table, row, dimension),
                    component: cell(table, row, component),
                    indicator: cell(table, row, indicator),
                    impact_area: cell(table, row, impact),
                    goals,
                }
            })
            .collect();

        Ok(Self { indicators })
    }

    pub fn records(&self) -> Vec<Value> {
        self.indicators.iter().map(SdgIndicator::record).collect()
    }

    /// Indicators tagged with `goal`
    pub fn for_goal(&self, goal: u8) -> Vec<&SdgIndicator> {
        self.indicators
            .iter()
            .filter(|i| i.goals.contains(&goal))
            .collect()
    }
}

/// Goal number from a target or indicator code such as `2.1`, `2.a`, `1.3.1` or `12`
pub fn goal_number(raw: &str) -> Option<u8> {
    static TARGET: OnceLock<Option<Regex>> = OnceLock::new();
    if is_missing(raw) {
        return None;
    }
    let re = TARGET
        .get_or_init(|| Regex::new(r"^\s*(\d{1,2})(?:\.\S*)?\s*$").ok())
        .as_ref()?;
    re.captures(raw)?.get(1)?.as_str().parse().ok()
}

fn cell(table: &Table, row: usize, col: usize) -> String {
    let value = table.str_at(row, col);
    if is_missing(value) {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDICATORS: &str = "\
Dimensions,Components,Indicators,SDG impact area/target,SDG_1,SDG_2,SDG_3,SDG_4,SDG_5
Social,Health,Stunting,Nutrition,2.2,3.1,2.1,,
Environment,Water,Water use,Water,6.4,12,,,
Economic,Income,Wages,Work,x.1,,,,
Social,Protection,Coverage,Poverty,1.3.1,,,,
";

    fn indicators() -> SdgIndicators {
        SdgIndicators::from_table(&Table::from_reader("sdg.csv", INDICATORS.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_goal_number() {
        assert_eq!(goal_number("2.1"), Some(2));
        assert_eq!(goal_number("12.0"), Some(12));
        assert_eq!(goal_number("2.a"), Some(2));
        assert_eq!(goal_number("1.3.1"), Some(1));
        assert_eq!(goal_number("2.2.1"), Some(2));
        assert_eq!(goal_number("nan"), None);
        assert_eq!(goal_number("x.1"), None);
    }

    #[test]
    fn test_goal_labels() {
        let ind = indicators();

        assert_eq!(ind.indicators[0].goal_label(), "2, 3");
        assert_eq!(ind.indicators[1].goal_label(), "6, 12");
        assert_eq!(ind.indicators[2].goal_label(), "--");
        assert_eq!(ind.indicators[3].goal_label(), "1");
    }

    #[test]
    fn test_for_goal_is_exact() {
        let ind = indicators();

        assert_eq!(ind.for_goal(2).len(), 1);
        assert_eq!(ind.for_goal(12).len(), 1);

        // Goal 1 matches the 1.3.1 indicator only, never goal 12
        let goal_one: Vec<&str> = ind.for_goal(1).iter().map(|i| i.indicator.as_str()).collect();
        assert_eq!(goal_one, vec!["Coverage"]);
        assert!(ind.for_goal(11).is_empty());
    }

    #[test]
    fn test_policy_index_column_dropped() {
        let table = Table::from_reader(
            "policies.csv",
            "Unnamed: 0,Policy,Year\n0,Food Security Strategy,2021\n".as_bytes(),
        )
        .unwrap();
        let policies = PolicyTable::from_table(table);

        assert_eq!(policies.columns, vec!["Policy", "Year"]);
        assert_eq!(policies.records()[0]["Policy"], "Food Security Strategy");
    }
}
