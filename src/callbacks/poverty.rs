//! Poverty bar chart and the choropleth it highlights

use super::{Callback, CallbackResult, Inputs, Output};
use crate::city::{City, SELECTED_DISTRICT_ZOOM};
use crate::data::{Datasets, PovertyDataset};
use crate::view::figure::{self, Figure, MAP_STYLE, REDS};
use crate::view::theme;
use serde_json::{json, Value};

pub const DIMMED_OPACITY: f64 = 0.7;
pub const HIGHLIGHT_OPACITY: f64 = 1.0;
pub const BORDER_WIDTH: f64 = 1.0;
pub const HIGHLIGHT_BORDER_WIDTH: f64 = 2.0 * BORDER_WIDTH;

/// Element ids of one city's poverty widgets
#[derive(Debug, Clone, Copy)]
pub struct PovertyIds {
    pub dropdown: &'static str,
    pub bar: &'static str,
    pub map: &'static str,
}

pub fn ids(city: City) -> PovertyIds {
    match city {
        City::Addis => PovertyIds {
            dropdown: "variable-dropdown",
            bar: "bar-plot",
            map: "map",
        },
        City::Hanoi => PovertyIds {
            dropdown: "variable-dropdown-hanoi",
            bar: "bar-plot-hanoi",
            map: "map-hanoi",
        },
    }
}

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "update_bar",
            inputs: &["variable-dropdown.value"],
            states: &[],
            outputs: &["bar-plot.figure"],
            initial: true,
            handler: |ds, inputs| update_bar(City::Addis, ds, inputs),
        },
        Callback {
            name: "update_map_on_bar_click",
            inputs: &["bar-plot.clickData", "variable-dropdown.value"],
            states: &[],
            outputs: &["map.figure"],
            initial: true,
            handler: |ds, inputs| update_map(City::Addis, ds, inputs),
        },
        Callback {
            name: "update_bar_hanoi",
            inputs: &["variable-dropdown-hanoi.value"],
            states: &[],
            outputs: &["bar-plot-hanoi.figure"],
            initial: true,
            handler: |ds, inputs| update_bar(City::Hanoi, ds, inputs),
        },
        Callback {
            name: "update_map_on_bar_click_hanoi",
            inputs: &["bar-plot-hanoi.clickData", "variable-dropdown-hanoi.value"],
            states: &[],
            outputs: &["map-hanoi.figure"],
            initial: true,
            handler: |ds, inputs| update_map(City::Hanoi, ds, inputs),
        },
    ]
}

fn update_bar(city: City, datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let variable = inputs.str(&format!("{}.value", ids(city).dropdown))?;
    Ok(vec![Output::figure(bar_figure(city, datasets.poverty(city), variable))])
}

fn update_map(city: City, datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let ids = ids(city);
    let click = format!("{}.clickData", ids.bar);

    // Changing the variable drops any highlight
    let selected = if inputs.triggered_by(&format!("{}.value", ids.dropdown)) {
        None
    } else {
        inputs
            .value(&click)
            .and_then(|data| data["points"][0]["y"].as_str())
    };

    Ok(vec![Output::figure(map_figure(city, datasets.poverty(city), selected))])
}

/// Horizontal bars of one variable, largest deprivation on top
pub fn bar_figure(city: City, poverty: &PovertyDataset, variable: &str) -> Figure {
    let rows = poverty.ranked(variable);
    if rows.is_empty() {
        return Figure::placeholder(&format!("No data for {}", variable));
    }

    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": rows.iter().map(|r| r.value).collect::<Vec<_>>(),
        "y": rows.iter().map(|r| r.district.as_str()).collect::<Vec<_>>(),
        "marker": { "color": theme::RED },
        "hovertemplate": "District=%{y}<br>Percentage of Deprived Households=%{x}<extra></extra>"
    });

    let mut layout = json!({
        "xaxis": { "title": { "text": "Percentage of Deprived Households" } },
        "yaxis": { "title": { "text": " " }, "categoryorder": "total ascending" },
        "autosize": true,
        "margin": { "l": 0.15, "r": 0.1, "t": 0.15, "b": 1 },
        "hoverlabel": figure::hoverlabel()
    });
    if city == City::Hanoi {
        layout["height"] = json!(25 * rows.len());
    }

    Figure::new(vec![trace], layout)
}

/// District choropleth, optionally zoomed onto one highlighted district
pub fn map_figure(city: City, poverty: &PovertyDataset, selected: Option<&str>) -> Figure {
    let selected = selected.and_then(|name| poverty.district(name));

    let (center, zoom) = match selected {
        Some(district) => (Some(district.centroid), SELECTED_DISTRICT_ZOOM),
        None => (poverty.center(), city.poverty_default_zoom()),
    };
    let center = center
        .map(|p| json!({ "lat": p.y(), "lon": p.x() }))
        .unwrap_or(Value::Null);

    let is_selected = |name: &str| selected.map(|d| d.name == name).unwrap_or(false);
    let opacity: Vec<f64> = poverty
        .districts
        .iter()
        .map(|d| if is_selected(&d.name) { HIGHLIGHT_OPACITY } else { DIMMED_OPACITY })
        .collect();
    let widths: Vec<f64> = poverty
        .districts
        .iter()
        .map(|d| if is_selected(&d.name) { HIGHLIGHT_BORDER_WIDTH } else { BORDER_WIDTH })
        .collect();

    let (zmin, zmax) = city.poverty_range();
    let trace = json!({
        "type": "choroplethmapbox",
        "geojson": poverty.geojson,
        "locations": poverty.districts.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "z": poverty.districts.iter().map(|d| d.score).collect::<Vec<_>>(),
        "zmin": zmin,
        "zmax": zmax,
        "colorscale": figure::colorscale(&REDS),
        "showscale": false,
        "marker": {
            "opacity": opacity,
            "line": { "width": widths, "color": "black" }
        },
        "hovertemplate": "District Name=%{location}<br>MPI=%{z}<extra></extra>"
    });

    Figure::new(
        vec![trace],
        json!({
            "mapbox": { "style": MAP_STYLE, "center": center, "zoom": zoom },
            "paper_bgcolor": theme::WHITE,
            "plot_bgcolor": theme::WHITE,
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0 }
        }),
    )
}
