//! Static dataset loader
//!
//! Every dataset is read once from `assets/data` at startup and held in an
//! immutable [`Datasets`] shared by all requests. Food outlet layers are the
//! exception: only their directory is listed up front.

pub mod error;
pub mod food_env;
pub mod geojson;
pub mod lca;
pub mod outlets;
pub mod policies;
pub mod poverty;
pub mod stakeholders;
pub mod supply;
pub mod table;
pub mod trends;

#[cfg(test)]
pub mod fixtures;

pub use error::{DataError, DataResult};
pub use food_env::{FoodEnvironment, FoodEnvironmentMetric, MetricDirection};
pub use lca::{LcaIndicator, LcaItem, LcaTable, TrafficLight};
pub use outlets::{FoodOutletRecord, OutletLayers};
pub use policies::{PolicyTable, SdgIndicator, SdgIndicators};
pub use poverty::{DistrictPovertyRecord, PovertyDataset, PovertyIndicator};
pub use stakeholders::{GroupingKey, StakeholderDirectory, StakeholderRecord};
pub use supply::{FlowEdge, FlowGraph, SupplyFlowRecord, SupplyFlows};
pub use table::Table;
pub use trends::{DumbbellRow, RegionSeries, TrendRecord, TrendSeries};

use crate::city::City;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Input file names, relative to the data directory
pub mod files {
    pub const ADDIS_MPI_GEOMETRY: &str = "addis_adm3_mpi.geojson";
    pub const ADDIS_MPI_LONG: &str = "addis_mpi_long.csv";
    pub const ADDIS_STAKEHOLDERS: &str = "addis_stakeholders_cleaned.csv";
    pub const ADDIS_OUTLETS_DIR: &str = "jsons_addis_foodoutlets";
    pub const ADDIS_FOOD_ENV: &str = "addis_diet_env_mapping.geojson";
    pub const ADDIS_POLICIES: &str = "addis_policy_database.csv";
    pub const ADDIS_SDG_INDICATORS: &str = "addis_policy_database_expanded_sdg.csv";
    pub const ADDIS_LCA: &str = "addis_lca_pivot.csv";

    pub const HANOI_MPI_GEOMETRY: &str = "Hanoi_districts_MPI.geojson";
    pub const HANOI_MPI_LONG: &str = "Hanoi_districts_MPI_long.csv";
    pub const HANOI_STAKEHOLDERS: &str = "hanoi_stakeholders.csv";
    pub const HANOI_OUTLETS_DIR: &str = "jsons_hanoi_foodoutlets";
    pub const HANOI_AFFORDABILITY: &str = "hanoi_affordability_cleaned.csv";
    pub const HANOI_DIET: &str = "hanoi_health_nutrition_cleaned.csv";
    pub const HANOI_HEALTH: &str = "hanoi_health_nutrition_cleaned_2.csv";

    pub const SUPPLY: &str = "hanoi_supply.csv";
}

/// Addis Ababa datasets
#[derive(Debug, Clone, Default)]
pub struct AddisData {
    pub stakeholders: StakeholderDirectory,
    pub poverty: PovertyDataset,
    pub outlets: OutletLayers,
    pub food_env: FoodEnvironment,
    pub policies: PolicyTable,
    pub indicators: SdgIndicators,
    pub lca: LcaTable,
}

/// Hà Nội datasets
#[derive(Debug, Clone, Default)]
pub struct HanoiData {
    pub stakeholders: StakeholderDirectory,
    pub poverty: PovertyDataset,
    pub outlets: OutletLayers,
    pub affordability: TrendSeries,
    pub health: TrendSeries,
    pub diet: TrendSeries,
}

/// Everything the dashboard serves
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub addis: AddisData,
    pub hanoi: HanoiData,
    /// Both cities' supply tabs chart the same flow table
    pub supply: SupplyFlows,
}

impl Datasets {
    /// Load all datasets from `data_dir`
    pub fn load(data_dir: &Path) -> DataResult<Self> {
        let start = Instant::now();
        let path = |name: &str| data_dir.join(name);

        let addis = AddisData {
            stakeholders: StakeholderDirectory::load(&path(files::ADDIS_STAKEHOLDERS))?,
            poverty: PovertyDataset::load(
                &path(files::ADDIS_MPI_GEOMETRY),
                City::Addis.poverty_score_property(),
                &path(files::ADDIS_MPI_LONG),
            )?,
            outlets: OutletLayers::scan(&path(files::ADDIS_OUTLETS_DIR))?,
            food_env: FoodEnvironment::load(&path(files::ADDIS_FOOD_ENV))?,
            policies: PolicyTable::load(&path(files::ADDIS_POLICIES))?,
            indicators: SdgIndicators::load(&path(files::ADDIS_SDG_INDICATORS))?,
            lca: LcaTable::load(&path(files::ADDIS_LCA))?,
        };

        let hanoi = HanoiData {
            stakeholders: StakeholderDirectory::load(&path(files::HANOI_STAKEHOLDERS))?,
            poverty: PovertyDataset::load(
                &path(files::HANOI_MPI_GEOMETRY),
                City::Hanoi.poverty_score_property(),
                &path(files::HANOI_MPI_LONG),
            )?,
            outlets: OutletLayers::scan(&path(files::HANOI_OUTLETS_DIR))?,
            affordability: TrendSeries::load(&path(files::HANOI_AFFORDABILITY))?,
            health: TrendSeries::load(&path(files::HANOI_HEALTH))?,
            diet: TrendSeries::load(&path(files::HANOI_DIET))?,
        };

        let supply = SupplyFlows::load(&path(files::SUPPLY))?;

        let datasets = Self { addis, hanoi, supply };
        tracing::info!(
            data_dir = %data_dir.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Datasets loaded"
        );
        Ok(datasets)
    }

    pub fn stakeholders(&self, city: City) -> &StakeholderDirectory {
        match city {
            City::Addis => &self.addis.stakeholders,
            City::Hanoi => &self.hanoi.stakeholders,
        }
    }

    pub fn poverty(&self, city: City) -> &PovertyDataset {
        match city {
            City::Addis => &self.addis.poverty,
            City::Hanoi => &self.hanoi.poverty,
        }
    }

    pub fn outlets(&self, city: City) -> &OutletLayers {
        match city {
            City::Addis => &self.addis.outlets,
            City::Hanoi => &self.hanoi.outlets,
        }
    }

    /// Check the load-time invariants the views rely on
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for city in City::all() {
            for district in self.poverty(*city).unmatched_districts() {
                report.issues.push(IntegrityIssue {
                    city: Some(*city),
                    dataset: "poverty".to_string(),
                    message: format!("district '{}' has no polygon", district),
                });
            }

            let stakeholders = self.stakeholders(*city);
            let incomplete = stakeholders
                .records
                .iter()
                .filter(|r| r.cells.iter().any(|c| table::is_missing(c)))
                .count();
            if incomplete > 0 {
                report.issues.push(IntegrityIssue {
                    city: Some(*city),
                    dataset: "stakeholders".to_string(),
                    message: format!("{} rows with empty cells", incomplete),
                });
            }
        }

        for year in SupplyFlows::slider_years() {
            let graph = self.supply.graph(year);
            if graph.edges.is_empty() {
                report.warnings.push(format!("no supply flows for {}", year));
            } else if let Some(share) = graph.urban_share() {
                if !(0.0..=100.0).contains(&share) {
                    report.issues.push(IntegrityIssue {
                        city: None,
                        dataset: "supply".to_string(),
                        message: format!("urban share {:.2} out of range for {}", share, year),
                    });
                }
            }
        }

        report
    }
}

/// A violated data invariant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityIssue {
    pub city: Option<City>,
    pub dataset: String,
    pub message: String,
}

/// Result of [`Datasets::integrity_report`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
    pub warnings: Vec<String>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_fixture() {
        let fixture = fixtures::Fixture::new();
        let ds = &fixture.datasets;

        assert_eq!(ds.addis.stakeholders.len(), 4);
        assert_eq!(ds.hanoi.poverty.districts.len(), 2);
        assert_eq!(ds.outlets(City::Addis).files().len(), 2);
        assert!(!ds.addis.lca.items.is_empty());
    }

    #[test]
    fn test_fixture_passes_integrity() {
        let fixture = fixtures::Fixture::new();
        let report = fixture.datasets.integrity_report();

        assert!(report.is_ok(), "{:?}", report.issues);
        assert!(report.warnings.iter().any(|w| w.contains("2010")));
    }

    #[test]
    fn test_missing_file_aborts_load() {
        let fixture = fixtures::Fixture::new();
        std::fs::remove_file(fixture.data_dir().join(files::ADDIS_LCA)).unwrap();

        assert!(matches!(
            Datasets::load(fixture.data_dir()),
            Err(DataError::Io { .. })
        ));
    }
}
