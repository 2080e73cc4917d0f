//! GeoJSON reading
//!
//! Parses FeatureCollections into `geo` geometries while keeping the raw
//! geometry JSON around, since choropleth figures embed it verbatim.
//! Layers declared in a projected CRS are reprojected to EPSG:4326 on read.

use super::error::{DataError, DataResult};
use geo::{Centroid, Coord, LineString, MultiPolygon, Point, Polygon};
use proj4rs::{proj::Proj, transform::transform};
use serde_json::{json, Map, Value};
use std::path::Path;

/// A single GeoJSON feature
#[derive(Debug, Clone)]
pub struct Feature {
    /// Parsed geometry
    pub geometry: FeatureGeometry,
    /// Raw `geometry` member, re-emitted into figures
    pub raw_geometry: Value,
    /// Feature properties
    pub properties: Map<String, Value>,
}

/// Geometry kinds the dashboard layers use
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    Area(MultiPolygon<f64>),
}

impl Feature {
    /// Read a string property, stringifying numbers
    pub fn property_str(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Read a numeric property, coercing numeric strings
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        match self.properties.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Centroid of the feature (the point itself for point features)
    pub fn centroid(&self) -> Option<Point<f64>> {
        match &self.geometry {
            FeatureGeometry::Point(p) => Some(*p),
            FeatureGeometry::Area(mp) => mp.centroid(),
        }
    }
}

/// Read a FeatureCollection file
pub fn read_features(path: &Path) -> DataResult<Vec<Feature>> {
    let bytes = std::fs::read(path).map_err(|e| DataError::io(path, e))?;
    parse_features(&bytes)
}

/// Parse FeatureCollection bytes
pub fn parse_features(bytes: &[u8]) -> DataResult<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let reprojection = Reprojection::for_collection(&value)?;

    let features = value["features"]
        .as_array()
        .ok_or_else(|| DataError::Geometry("missing 'features' array".to_string()))?;

    features
        .iter()
        .map(|feature| {
            let mut raw_geometry = feature["geometry"].clone();
            if let (Some(reprojection), Some(coords)) =
                (&reprojection, raw_geometry.get_mut("coordinates"))
            {
                reprojection.apply(coords)?;
            }
            let geometry = parse_geometry(&raw_geometry)?;
            let properties = feature["properties"].as_object().cloned().unwrap_or_default();
            Ok(Feature {
                geometry,
                raw_geometry,
                properties,
            })
        })
        .collect()
}

/// Build a FeatureCollection whose feature ids are the given keys
pub fn feature_collection<'a>(
    features: impl IntoIterator<Item = (&'a str, &'a Value)>,
) -> Value {
    let features: Vec<Value> = features
        .into_iter()
        .map(|(id, geometry)| {
            json!({
                "type": "Feature",
                "id": id,
                "properties": { "id": id },
                "geometry": geometry,
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

/// Mean of centroids, the map center used when nothing is selected
pub fn mean_centroid<'a>(points: impl IntoIterator<Item = &'a Point<f64>>) -> Option<Point<f64>> {
    let mut count = 0usize;
    let (mut x, mut y) = (0.0, 0.0);
    for p in points {
        x += p.x();
        y += p.y();
        count += 1;
    }
    (count > 0).then(|| Point::new(x / count as f64, y / count as f64))
}

const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// PROJ.4 definitions for the projected CRS codes city layers are exported in
fn proj4_definition(epsg: u32) -> Option<String> {
    match epsg {
        3857 | 900913 => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs"
                .to_string(),
        ),
        32601..=32660 => Some(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            epsg - 32600
        )),
        32701..=32760 => Some(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            epsg - 32700
        )),
        // Adindan / UTM zone 37N, 38N
        20137 | 20138 => Some(format!(
            "+proj=utm +zone={} +ellps=clrk80 +towgs84=-166,-15,204,0,0,0,0 +units=m +no_defs",
            epsg - 20100
        )),
        // VN-2000 / UTM zone 48N, 49N
        3405 | 3406 => Some(format!(
            "+proj=utm +zone={} +ellps=WGS84 +towgs84=-191.90441429,-39.30318279,-111.45032835,-0.00928836,0.01975479,-0.00427372,0.252906278 +units=m +no_defs",
            epsg - 3357
        )),
        _ => None,
    }
}

/// Transform from a layer's declared CRS to lon/lat degrees
struct Reprojection {
    from: Proj,
    to: Proj,
}

impl Reprojection {
    /// `None` when the collection is already in WGS84 or declares no CRS
    fn for_collection(value: &Value) -> DataResult<Option<Self>> {
        let Some(name) = value["crs"]["properties"]["name"].as_str() else {
            return Ok(None);
        };
        if name.contains("CRS84") {
            return Ok(None);
        }
        let epsg = name
            .rsplit(':')
            .next()
            .and_then(|code| code.trim().parse::<u32>().ok())
            .ok_or_else(|| DataError::UnsupportedCrs(name.to_string()))?;
        if epsg == 4326 {
            return Ok(None);
        }
        let definition =
            proj4_definition(epsg).ok_or_else(|| DataError::UnsupportedCrs(name.to_string()))?;

        tracing::debug!(crs = name, "Reprojecting layer to EPSG:4326");
        Ok(Some(Self {
            from: build_proj(&definition)?,
            to: build_proj(WGS84)?,
        }))
    }

    /// Rewrite a GeoJSON `coordinates` member in place
    fn apply(&self, coords: &mut Value) -> DataResult<()> {
        match coords {
            Value::Array(items) if items.first().is_some_and(Value::is_number) => {
                let (x, y) = match (
                    items.first().and_then(Value::as_f64),
                    items.get(1).and_then(Value::as_f64),
                ) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        return Err(DataError::Geometry(format!(
                            "invalid coordinate {:?}",
                            items
                        )))
                    }
                };
                // Projected input in meters, geographic output in radians
                let mut point = (x, y, 0.0);
                transform(&self.from, &self.to, &mut point)
                    .map_err(|e| DataError::Geometry(format!("reprojection failed: {}", e)))?;
                items[0] = json!(point.0.to_degrees());
                items[1] = json!(point.1.to_degrees());
                Ok(())
            }
            Value::Array(items) => items.iter_mut().try_for_each(|c| self.apply(c)),
            _ => Ok(()),
        }
    }
}

fn build_proj(definition: &str) -> DataResult<Proj> {
    Proj::from_proj_string(definition)
        .map_err(|e| DataError::Geometry(format!("invalid projection '{}': {}", definition, e)))
}

fn parse_geometry(geometry: &Value) -> DataResult<FeatureGeometry> {
    let coords = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("Point") => {
            let c = parse_coord(coords)?;
            Ok(FeatureGeometry::Point(Point::from(c)))
        }
        Some("MultiPoint") => {
            // Outlet exports occasionally wrap single points
            let first = coords
                .as_array()
                .and_then(|a| a.first())
                .ok_or_else(|| DataError::Geometry("empty MultiPoint".to_string()))?;
            Ok(FeatureGeometry::Point(Point::from(parse_coord(first)?)))
        }
        Some("Polygon") => Ok(FeatureGeometry::Area(MultiPolygon(vec![parse_polygon(coords)?]))),
        Some("MultiPolygon") => {
            let polygons = coords
                .as_array()
                .ok_or_else(|| DataError::Geometry("MultiPolygon without coordinates".to_string()))?
                .iter()
                .map(parse_polygon)
                .collect::<DataResult<Vec<_>>>()?;
            Ok(FeatureGeometry::Area(MultiPolygon(polygons)))
        }
        other => Err(DataError::Geometry(format!(
            "unsupported geometry type {:?}",
            other
        ))),
    }
}

/// Polygon coordinates: `[exterior, interior...]`
fn parse_polygon(coords: &Value) -> DataResult<Polygon<f64>> {
    let rings = coords
        .as_array()
        .ok_or_else(|| DataError::Geometry("polygon rings must be an array".to_string()))?;
    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings
        .next()
        .ok_or_else(|| DataError::Geometry("polygon without exterior ring".to_string()))??;
    let interiors = rings.collect::<DataResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(coords: &Value) -> DataResult<LineString<f64>> {
    let points = coords
        .as_array()
        .ok_or_else(|| DataError::Geometry("ring must be an array".to_string()))?
        .iter()
        .map(parse_coord)
        .collect::<DataResult<Vec<_>>>()?;
    // geo closes rings on construction
    Ok(LineString(points))
}

fn parse_coord(value: &Value) -> DataResult<Coord<f64>> {
    let pair = value
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| DataError::Geometry(format!("invalid coordinate {}", value)))?;
    match (pair[0].as_f64(), pair[1].as_f64()) {
        (Some(x), Some(y)) => Ok(Coord { x, y }),
        _ => Err(DataError::Geometry(format!("non-numeric coordinate {}", value))),
    }
}
