//! Food outlet point layers
//!
//! One GeoJSON file per outlet category. The directory is listed once at
//! startup; files are only read when a user turns the layer on.

use super::error::{DataError, DataResult};
use super::geojson::{self, FeatureGeometry};
use geo::Point;
use std::path::{Path, PathBuf};

/// A single geolocated outlet
#[derive(Debug, Clone, PartialEq)]
pub struct FoodOutletRecord {
    pub location: Point<f64>,
    pub category: String,
}

/// The outlet layers available for one city
#[derive(Debug, Clone, Default)]
pub struct OutletLayers {
    dir: PathBuf,
    files: Vec<String>,
}

impl OutletLayers {
    /// List the layer directory; a missing directory yields no layers
    pub fn scan(dir: &Path) -> DataResult<Self> {
        let mut files = Vec::new();
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry.map_err(|e| DataError::io(dir, e))?;
                    if entry.path().is_file() {
                        files.push(entry.file_name().to_string_lossy().to_string());
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "Outlet layer directory not found");
            }
            Err(e) => return Err(DataError::io(dir, e)),
        }
        files.sort();

        tracing::info!(dir = %dir.display(), layers = files.len(), "Scanned outlet layers");
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    /// Layer file names, sorted
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file)
    }

    /// Read one layer from disk
    ///
    /// Only files listed by [`OutletLayers::scan`] can be read.
    pub fn load(&self, file: &str) -> DataResult<Vec<FoodOutletRecord>> {
        if !self.contains(file) {
            return Err(DataError::UnknownLayer(file.to_string()));
        }
        let category = layer_label(file);
        let features = geojson::read_features(&self.dir.join(file))?;

        let outlets: Vec<FoodOutletRecord> = features
            .into_iter()
            .filter_map(|f| match f.geometry {
                FeatureGeometry::Point(location) => Some(FoodOutletRecord {
                    location,
                    category: category.clone(),
                }),
                FeatureGeometry::Area(_) => None,
            })
            .collect();

        tracing::debug!(layer = file, outlets = outlets.len(), "Loaded outlet layer");
        Ok(outlets)
    }
}

/// Display label from a layer file name
///
/// `addis_supermarkets_2024.geojson` → `supermarkets`,
/// `addis_street_food_vendors.geojson` → `street food`.
pub fn layer_label(file: &str) -> String {
    let parts: Vec<&str> = file.split('_').collect();
    match parts.len() {
        0 | 1 => file.to_string(),
        2 | 3 => parts[1].to_string(),
        _ => format!("{} {}", parts[1], parts[2]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layer_label() {
        assert_eq!(layer_label("addis_supermarkets_2024.geojson"), "supermarkets");
        assert_eq!(layer_label("addis_street_food_vendors.geojson"), "street food");
        assert_eq!(layer_label("markets.geojson"), "markets.geojson");
    }

    #[test]
    fn test_scan_and_load() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("addis_markets_2024.geojson"),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[38.7,9.0]}},
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[38.8,9.1]}}]}"#,
        )
        .unwrap();

        let layers = OutletLayers::scan(dir.path()).unwrap();
        assert_eq!(layers.files(), &["addis_markets_2024.geojson".to_string()]);

        let outlets = layers.load("addis_markets_2024.geojson").unwrap();
        assert_eq!(outlets.len(), 2);
        assert_eq!(outlets[0].category, "markets");
    }

    #[test]
    fn test_unlisted_layer_rejected() {
        let dir = tempdir().unwrap();
        let layers = OutletLayers::scan(dir.path()).unwrap();

        assert!(matches!(
            layers.load("../addis_adm3_mpi.geojson"),
            Err(DataError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let layers = OutletLayers::scan(&dir.path().join("nope")).unwrap();
        assert!(layers.files().is_empty());
    }
}
