//! Life-cycle assessment footprints per food item
//!
//! Four indicators per item. Each indicator value is graded against tertiles
//! computed once over the whole table (not the selected food group).
//! Empty cells load as NaN and are left out of the tertiles.

use super::error::DataResult;
use super::table::{is_missing, Table};
use std::path::Path;

/// Footprint indicators in card order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcaIndicator {
    Ghg,
    Water,
    Acidification,
    Eutrophication,
}

impl LcaIndicator {
    pub fn all() -> [LcaIndicator; 4] {
        [
            LcaIndicator::Ghg,
            LcaIndicator::Water,
            LcaIndicator::Acidification,
            LcaIndicator::Eutrophication,
        ]
    }

    /// Source column. The freshwater header is misspelled in the published file.
    pub fn column(&self) -> &'static str {
        match self {
            LcaIndicator::Ghg => "Total GHG Emissions",
            LcaIndicator::Water => "Freshwater Comsumption (l)",
            LcaIndicator::Acidification => "Acidification (kg SO2eq)",
            LcaIndicator::Eutrophication => "Eutrophication (kg PO43-eq)",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LcaIndicator::Ghg => "GHG",
            LcaIndicator::Water => "Water",
            LcaIndicator::Acidification => "Acidification",
            LcaIndicator::Eutrophication => "Eutrophication",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            LcaIndicator::Ghg => "kg CO₂-eq",
            LcaIndicator::Water => "liters",
            LcaIndicator::Acidification => "kg SO₂-eq",
            LcaIndicator::Eutrophication => "kg PO₄³⁻-eq",
        }
    }

    /// Value formatted with the indicator's precision
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "nan".to_string();
        }
        match self {
            LcaIndicator::Ghg => format!("{:.4}", value),
            LcaIndicator::Water => format!("{:.2}", value),
            LcaIndicator::Acidification | LcaIndicator::Eutrophication => format!("{:.6}", value),
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Traffic-light grade; lower footprints are better
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl TrafficLight {
    pub fn border(&self) -> &'static str {
        match self {
            TrafficLight::Green => "#2e7d32",
            TrafficLight::Yellow => "#f57f17",
            TrafficLight::Red => "#c62828",
        }
    }

    pub fn shadow(&self) -> &'static str {
        match self {
            TrafficLight::Green => "#a5d6a7",
            TrafficLight::Yellow => "#fff59d",
            TrafficLight::Red => "#ef9a9a",
        }
    }
}

/// Tertile cut points for one indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub green: f64,
    pub yellow: f64,
}

impl Thresholds {
    pub fn grade(&self, value: f64) -> TrafficLight {
        if value <= self.green {
            TrafficLight::Green
        } else if value <= self.yellow {
            TrafficLight::Yellow
        } else {
            TrafficLight::Red
        }
    }
}

/// One food item with its four footprint values
#[derive(Debug, Clone, PartialEq)]
pub struct LcaItem {
    pub food_group: String,
    pub item: String,
    values: [f64; 4],
}

impl LcaItem {
    pub fn value(&self, indicator: LcaIndicator) -> f64 {
        self.values[indicator.slot()]
    }
}

/// The footprint table with precomputed thresholds
#[derive(Debug, Clone, Default)]
pub struct LcaTable {
    pub items: Vec<LcaItem>,
    thresholds: Vec<Thresholds>,
}

impl LcaTable {
    pub fn load(path: &Path) -> DataResult<Self> {
        let table = Self::from_table(&Table::read(path)?)?;
        tracing::info!(file = %path.display(), items = table.items.len(), "Loaded LCA table");
        Ok(table)
    }

    pub fn from_table(table: &Table) -> DataResult<Self> {
        let group = table.column("Food Group")?;
        let item = table.column("Item Cd")?;
        let columns = LcaIndicator::all()
            .iter()
            .map(|i| table.column(i.column()))
            .collect::<DataResult<Vec<_>>>()?;

        let items = (0..table.len())
            .map(|row| {
                let mut values = [0.0; 4];
                for (slot, col) in columns.iter().enumerate() {
                    values[slot] = if is_missing(table.str_at(row, *col)) {
                        f64::NAN
                    } else {
                        table.f64_at(row, *col)?
                    };
                }
                Ok(LcaItem {
                    food_group: table.str_at(row, group).to_string(),
                    item: table.str_at(row, item).to_string(),
                    values,
                })
            })
            .collect::<DataResult<Vec<_>>>()?;

        let thresholds = LcaIndicator::all()
            .iter()
            .map(|indicator| {
                let mut column: Vec<f64> = items
                    .iter()
                    .map(|i| i.value(*indicator))
                    .filter(|v| !v.is_nan())
                    .collect();
                column.sort_by(f64::total_cmp);
                Thresholds {
                    green: quantile(&column, 0.33),
                    yellow: quantile(&column, 0.67),
                }
            })
            .collect();

        Ok(Self { items, thresholds })
    }

    pub fn thresholds(&self, indicator: LcaIndicator) -> Thresholds {
        self.thresholds
            .get(indicator.slot())
            .copied()
            .unwrap_or(Thresholds {
                green: f64::NAN,
                yellow: f64::NAN,
            })
    }

    pub fn grade(&self, indicator: LcaIndicator, value: f64) -> TrafficLight {
        self.thresholds(indicator).grade(value)
    }

    /// Distinct food groups, sorted
    pub fn food_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.items.iter().map(|i| i.food_group.clone()).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Items of one group, sorted by item name
    pub fn items_in(&self, food_group: &str) -> Vec<&LcaItem> {
        let mut items: Vec<&LcaItem> = self
            .items
            .iter()
            .filter(|i| i.food_group == food_group)
            .collect();
        items.sort_by(|a, b| a.item.cmp(&b.item));
        items
    }
}

/// Linear-interpolated quantile of sorted values
///
/// Empty input gives NaN, so every comparison against it fails and grades red.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
