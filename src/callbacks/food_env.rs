//! Dietary mapping: food environment choropleth and outlet layers

use super::{Callback, CallbackResult, Inputs, Output};
use crate::city::{City, MapView, ADDIS_AFFORDABILITY_VIEW};
use crate::data::food_env::{direction_of, label_of};
use crate::data::outlets::layer_label;
use crate::data::{Datasets, FoodEnvironment, OutletLayers};
use crate::view::figure::{self, Figure, MAP_STYLE};
use crate::view::theme;
use serde_json::{json, Value};

/// Zoom of the Hà Nội affordability map before the user moves it
pub const HANOI_AFFORDABILITY_ZOOM: f64 = 10.0;

/// Element ids of one city's affordability widgets
#[derive(Debug, Clone, Copy)]
pub struct AffordabilityIds {
    /// Metric dropdown; Hà Nội has no food environment layer
    pub metric: Option<&'static str>,
    pub layers: &'static str,
    pub map: &'static str,
}

pub fn ids(city: City) -> AffordabilityIds {
    match city {
        City::Addis => AffordabilityIds {
            metric: Some("choropleth-select"),
            layers: "outlets-layer-select",
            map: "affordability-map",
        },
        City::Hanoi => AffordabilityIds {
            metric: None,
            layers: "outlets-layer-select-hanoi",
            map: "affordability-map-hanoi",
        },
    }
}

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "update_affordability_map",
            inputs: &["choropleth-select.value", "outlets-layer-select.value"],
            states: &["affordability-map.relayoutData"],
            outputs: &["affordability-map.figure"],
            initial: true,
            handler: update_addis_map,
        },
        Callback {
            name: "update_affordability_map_hanoi",
            inputs: &["outlets-layer-select-hanoi.value"],
            states: &["affordability-map-hanoi.relayoutData"],
            outputs: &["affordability-map-hanoi.figure"],
            initial: true,
            handler: update_hanoi_map,
        },
    ]
}

fn update_addis_map(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let ids = ids(City::Addis);
    let metric = ids
        .metric
        .and_then(|id| inputs.opt_str(&format!("{}.value", id)));
    let layers = inputs.strings(&format!("{}.value", ids.layers));
    let view = preserved_view(inputs.value(&format!("{}.relayoutData", ids.map)), ADDIS_AFFORDABILITY_VIEW);

    let mut traces = Vec::new();
    if let Some(column) = metric {
        if let Some(trace) = metric_trace(&datasets.addis.food_env, column) {
            traces.push(trace);
        }
    }
    traces.extend(outlet_traces(datasets.outlets(City::Addis), &layers)?);

    Ok(vec![Output::figure(layered_map(traces, view, !layers.is_empty()))])
}

fn update_hanoi_map(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let ids = ids(City::Hanoi);
    let poverty = datasets.poverty(City::Hanoi);
    let default_view = poverty
        .center()
        .map(|p| MapView {
            lat: p.y(),
            lon: p.x(),
            zoom: HANOI_AFFORDABILITY_ZOOM,
        })
        .unwrap_or(MapView {
            lat: 0.0,
            lon: 0.0,
            zoom: HANOI_AFFORDABILITY_ZOOM,
        });
    let layers = inputs.strings(&format!("{}.value", ids.layers));
    let view = preserved_view(inputs.value(&format!("{}.relayoutData", ids.map)), default_view);

    let outlines = json!({
        "type": "choroplethmapbox",
        "name": "Districts",
        "geojson": poverty.geojson,
        "locations": poverty.districts.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "z": vec![0; poverty.districts.len()],
        "text": poverty.districts.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "colorscale": [[0, theme::TRANSPARENT], [1, theme::TRANSPARENT]],
        "marker": { "opacity": 0.5, "line": { "color": theme::BROWN, "width": 2 } },
        "hovertemplate": "<b>%{text}</b><extra></extra>",
        "showscale": false
    });

    let mut traces = vec![outlines];
    traces.extend(outlet_traces(datasets.outlets(City::Hanoi), &layers)?);

    Ok(vec![Output::figure(layered_map(traces, view, !layers.is_empty()))])
}

/// Map view from client relayout state, falling back to `default`
///
/// The center is kept only when the client reported one; a zoom without a
/// center is ignored.
pub fn preserved_view(relayout: Option<&Value>, default: MapView) -> MapView {
    let Some(relayout) = relayout else {
        return default;
    };
    let center = &relayout["mapbox.center"];
    match (center["lat"].as_f64(), center["lon"].as_f64()) {
        (Some(lat), Some(lon)) => MapView {
            lat,
            lon,
            zoom: relayout["mapbox.zoom"].as_f64().unwrap_or(default.zoom),
        },
        _ => default,
    }
}

/// Choropleth of one food environment metric, colored by its direction
pub fn metric_trace(env: &FoodEnvironment, column: &str) -> Option<Value> {
    let values = env.metric_values(column);
    if values.is_empty() {
        tracing::debug!(metric = column, "Metric not present in food environment layer");
        return None;
    }
    let label = label_of(column);

    Some(json!({
        "type": "choroplethmapbox",
        "geojson": env.geojson,
        "locations": values.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        "z": values.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        "text": values.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        "colorscale": figure::colorscale(direction_of(column).color_ramp()),
        "marker": { "opacity": 0.7, "line": { "color": "#222", "width": 1 } },
        "hovertemplate": format!("<b>{}</b>: %{{z:.2f}}<extra></extra>", label),
        "showscale": false
    }))
}

/// One marker trace per selected layer, colors cycling through the palette
pub fn outlet_traces(layers: &OutletLayers, selected: &[String]) -> CallbackResult<Vec<Value>> {
    selected
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let outlets = layers.load(file)?;
            Ok(json!({
                "type": "scattermapbox",
                "mode": "markers",
                "name": layer_label(file),
                "lat": outlets.iter().map(|o| o.location.y()).collect::<Vec<_>>(),
                "lon": outlets.iter().map(|o| o.location.x()).collect::<Vec<_>>(),
                "marker": {
                    "size": 6,
                    "color": theme::OUTLET_PALETTE[i % theme::OUTLET_PALETTE.len()],
                    "opacity": 0.8
                },
                "hoverinfo": "skip"
            }))
        })
        .collect()
}

fn layered_map(traces: Vec<Value>, view: MapView, show_legend: bool) -> Figure {
    Figure::new(
        traces,
        json!({
            "mapbox": {
                "style": MAP_STYLE,
                "center": { "lat": view.lat, "lon": view.lon },
                "zoom": view.zoom
            },
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            "paper_bgcolor": theme::WHITE,
            "showlegend": show_legend,
            "legend": { "x": 0.01, "y": 0.99, "bgcolor": "rgba(255,255,255,0.8)" },
            "uirevision": "constant"
        }),
    )
}
