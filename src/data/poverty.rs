//! Multidimensional poverty (MPI) per district
//!
//! Two sources joined on `Dist_Name`: district polygons carrying the headline
//! score, and a long-format table of per-indicator deprivation percentages.

use super::error::{DataError, DataResult};
use super::geojson::{self, Feature};
use super::table::Table;
use geo::Point;
use serde_json::Value;
use std::path::Path;

pub const DISTRICT_KEY: &str = "Dist_Name";

/// A district polygon with its headline deprivation score
#[derive(Debug, Clone)]
pub struct DistrictPovertyRecord {
    pub name: String,
    pub score: f64,
    pub centroid: Point<f64>,
    pub geometry: Value,
}

/// One row of the long-format indicator table
#[derive(Debug, Clone, PartialEq)]
pub struct PovertyIndicator {
    pub district: String,
    pub variable: String,
    pub value: f64,
}

/// Poverty data for one city
#[derive(Debug, Clone, Default)]
pub struct PovertyDataset {
    pub districts: Vec<DistrictPovertyRecord>,
    pub indicators: Vec<PovertyIndicator>,
    /// Distinct indicator variables in first-seen order
    pub variables: Vec<String>,
    /// FeatureCollection keyed by district name, embedded in map figures
    pub geojson: Value,
}

impl PovertyDataset {
    /// Load polygons from `geometry_path` (score in `score_property`) and the
    /// long table from `table_path`
    pub fn load(geometry_path: &Path, score_property: &str, table_path: &Path) -> DataResult<Self> {
        let features = geojson::read_features(geometry_path)?;
        let table = Table::read(table_path)?;
        let dataset = Self::from_parts(features, score_property, table)?;
        tracing::info!(
            geometry = %geometry_path.display(),
            table = %table_path.display(),
            districts = dataset.districts.len(),
            indicators = dataset.indicators.len(),
            "Loaded poverty dataset"
        );
        Ok(dataset)
    }

    pub fn from_parts(features: Vec<Feature>, score_property: &str, table: Table) -> DataResult<Self> {
        let districts = features
            .iter()
            .enumerate()
            .map(|(idx, feature)| district_from_feature(idx, feature, score_property))
            .collect::<DataResult<Vec<_>>>()?;

        let district_col = table.column(DISTRICT_KEY)?;
        let variable_col = table.column("Variable")?;
        let value_col = table.column("Value")?;

        let mut indicators = Vec::with_capacity(table.len());
        let mut variables: Vec<String> = Vec::new();
        for row in 0..table.len() {
            let variable = table.str_at(row, variable_col).to_string();
            if !variables.contains(&variable) {
                variables.push(variable.clone());
            }
            indicators.push(PovertyIndicator {
                district: table.str_at(row, district_col).to_string(),
                variable,
                value: table.f64_at(row, value_col)?,
            });
        }

        let geojson = geojson::feature_collection(
            districts.iter().map(|d| (d.name.as_str(), &d.geometry)),
        );

        Ok(Self {
            districts,
            indicators,
            variables,
            geojson,
        })
    }

    /// Look up a district polygon by name
    pub fn district(&self, name: &str) -> Option<&DistrictPovertyRecord> {
        self.districts.iter().find(|d| d.name == name)
    }

    /// Indicator rows for one variable, highest deprivation first
    pub fn ranked(&self, variable: &str) -> Vec<&PovertyIndicator> {
        let mut rows: Vec<&PovertyIndicator> = self
            .indicators
            .iter()
            .filter(|i| i.variable == variable)
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows
    }

    /// Mean of all district centroids
    pub fn center(&self) -> Option<Point<f64>> {
        geojson::mean_centroid(self.districts.iter().map(|d| &d.centroid))
    }

    /// District names in the indicator table with no matching polygon
    pub fn unmatched_districts(&self) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for indicator in &self.indicators {
            if self.district(&indicator.district).is_none() && !missing.contains(&indicator.district) {
                missing.push(indicator.district.clone());
            }
        }
        missing
    }
}

fn district_from_feature(idx: usize, feature: &Feature, score_property: &str) -> DataResult<DistrictPovertyRecord> {
    let name = feature
        .property_str(DISTRICT_KEY)
        .ok_or_else(|| DataError::Geometry(format!("feature {} has no {}", idx, DISTRICT_KEY)))?;
    let score = feature.property_f64(score_property).ok_or_else(|| DataError::InvalidValue {
        dataset: "district geometry".to_string(),
        column: score_property.to_string(),
        row: idx,
        value: feature
            .properties
            .get(score_property)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    })?;
    let centroid = feature
        .centroid()
        .ok_or_else(|| DataError::Geometry(format!("district '{}' has an empty polygon", name)))?;

    Ok(DistrictPovertyRecord {
        name,
        score,
        centroid,
        geometry: feature.raw_geometry.clone(),
    })
}
