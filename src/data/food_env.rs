//! Food environment metrics per district
//!
//! Outlet densities and access ratios computed upstream and shipped as
//! polygon properties. Each metric has a fixed direction that picks the map's
//! color ramp.

use super::error::DataResult;
use super::geojson::{self, Feature};
use crate::view::theme::{GREEN_SCALE, GREY_SCALE, RED_SCALE};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Whether a higher value of a metric is good, bad, or neither
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricDirection {
    HigherIsBetter,
    HigherIsWorse,
    Neutral,
}

impl MetricDirection {
    /// Five-step color ramp for choropleths of this direction
    pub fn color_ramp(&self) -> &'static [&'static str; 5] {
        match self {
            MetricDirection::HigherIsBetter => &GREEN_SCALE,
            MetricDirection::HigherIsWorse => &RED_SCALE,
            MetricDirection::Neutral => &GREY_SCALE,
        }
    }
}

/// A metric the choropleth dropdown offers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodEnvironmentMetric {
    pub column: &'static str,
    pub label: &'static str,
    pub direction: MetricDirection,
}

/// Metrics shown in the dropdown, in order
pub const METRICS: [FoodEnvironmentMetric; 6] = [
    FoodEnvironmentMetric {
        column: "density_healthyout",
        label: "Healthy Outlet Density",
        direction: MetricDirection::HigherIsBetter,
    },
    FoodEnvironmentMetric {
        column: "density_unhealthyout",
        label: "Unhealthy Outlet Density",
        direction: MetricDirection::HigherIsWorse,
    },
    FoodEnvironmentMetric {
        column: "density_mixoutlets",
        label: "Mixed Outlet Density",
        direction: MetricDirection::Neutral,
    },
    FoodEnvironmentMetric {
        column: "ratio_obesogenic",
        label: "Obesogenic Ratio",
        direction: MetricDirection::HigherIsWorse,
    },
    FoodEnvironmentMetric {
        column: "pct_access_healthy",
        label: "Percent Access to Healthy Food",
        direction: MetricDirection::HigherIsBetter,
    },
    FoodEnvironmentMetric {
        column: "ptc_access_unhealthy",
        label: "Percent Access to Unhealthy Food",
        direction: MetricDirection::HigherIsWorse,
    },
];

pub const DEFAULT_METRIC: &str = "ratio_obesogenic";

/// Direction of any metric column shipped in the layer, including the ones
/// not offered in the dropdown
pub fn direction_of(column: &str) -> MetricDirection {
    match column {
        "Count_healthy"
        | "density_healthyout"
        | "density_pop_healthy"
        | "acc_healthyaccess_pop_healthysum"
        | "pct_access_healthy" => MetricDirection::HigherIsBetter,
        "Count_UnhealthyOutlets"
        | "density_unhealthyout"
        | "ratio_obesogenic"
        | "density_pop_unhealthy"
        | "acc_unhealthyaccess_unhealthy_popsum"
        | "ptc_access_unhealthy" => MetricDirection::HigherIsWorse,
        _ => MetricDirection::Neutral,
    }
}

/// Label for a metric column, falling back to the column name
pub fn label_of(column: &str) -> &str {
    METRICS
        .iter()
        .find(|m| m.column == column)
        .map(|m| m.label)
        .unwrap_or(column)
}

/// One district of the food environment layer
#[derive(Debug, Clone)]
pub struct FoodEnvironmentDistrict {
    /// `Dist_Name` when present, else the feature index
    pub name: String,
    pub geometry: Value,
    /// Numeric properties; non-numeric values are dropped
    pub values: HashMap<String, f64>,
}

/// The food environment layer for a city
#[derive(Debug, Clone, Default)]
pub struct FoodEnvironment {
    pub districts: Vec<FoodEnvironmentDistrict>,
    pub geojson: Value,
}

impl FoodEnvironment {
    pub fn load(path: &Path) -> DataResult<Self> {
        let env = Self::from_features(geojson::read_features(path)?);
        tracing::info!(file = %path.display(), districts = env.districts.len(), "Loaded food environment");
        Ok(env)
    }

    pub fn from_features(features: Vec<Feature>) -> Self {
        let districts = features
            .into_iter()
            .enumerate()
            .map(|(idx, feature)| {
                let name = feature
                    .property_str("Dist_Name")
                    .unwrap_or_else(|| idx.to_string());
                let values = feature
                    .properties
                    .keys()
                    .filter_map(|k| feature.property_f64(k).map(|v| (k.clone(), v)))
                    .collect();
                FoodEnvironmentDistrict {
                    name,
                    geometry: feature.raw_geometry,
                    values,
                }
            })
            .collect::<Vec<_>>();

        let geojson = geojson::feature_collection(
            districts.iter().map(|d| (d.name.as_str(), &d.geometry)),
        );
        Self { districts, geojson }
    }

    /// `(district, value)` for a metric; districts lacking the value are skipped
    pub fn metric_values(&self, column: &str) -> Vec<(&str, f64)> {
        self.districts
            .iter()
            .filter_map(|d| d.values.get(column).map(|v| (d.name.as_str(), *v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_ramps() {
        assert_eq!(direction_of("ratio_obesogenic"), MetricDirection::HigherIsWorse);
        assert_eq!(direction_of("pct_access_healthy"), MetricDirection::HigherIsBetter);
        assert_eq!(direction_of("pop_sum"), MetricDirection::Neutral);
        assert_eq!(MetricDirection::HigherIsWorse.color_ramp()[4], "#de2d26");
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_of("ratio_obesogenic"), "Obesogenic Ratio");
        assert_eq!(label_of("pop_sum"), "pop_sum");
    }

    #[test]
    fn test_metric_values_coerced() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"Dist_Name":"Bole","ratio_obesogenic":"1.5","note":"x"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","properties":{"ratio_obesogenic":null},
             "geometry":{"type":"Polygon","coordinates":[[[2,0],[3,0],[3,1],[2,0]]]}}]}"#;
        let env = FoodEnvironment::from_features(geojson::parse_features(json.as_bytes()).unwrap());

        assert_eq!(env.districts[1].name, "1");
        assert_eq!(env.metric_values("ratio_obesogenic"), vec![("Bole", 1.5)]);
        assert!(!env.districts[0].values.contains_key("note"));
    }
}
