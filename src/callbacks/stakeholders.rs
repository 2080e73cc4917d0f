//! Stakeholder pie chart and the directory table it filters

use super::{Callback, CallbackError, CallbackResult, Inputs, Output};
use crate::city::City;
use crate::data::{Datasets, GroupingKey, StakeholderDirectory};
use crate::view::figure::Figure;
use crate::view::theme;
use serde_json::{json, Value};

/// Pull applied to the selected slice
pub const SELECTED_PULL: f64 = 0.2;

/// Element ids of one city's stakeholder widgets
#[derive(Debug, Clone, Copy)]
pub struct StakeholderIds {
    pub dropdown: &'static str,
    pub chart: &'static str,
    pub store: &'static str,
    pub table: &'static str,
}

pub fn ids(city: City) -> StakeholderIds {
    match city {
        City::Addis => StakeholderIds {
            dropdown: "pie-filter-dropdown",
            chart: "piechart",
            store: "selected_slice",
            table: "sh_table",
        },
        City::Hanoi => StakeholderIds {
            dropdown: "pie-filter-dropdown-hanoi",
            chart: "piechart-hanoi",
            store: "selected_slice-hanoi",
            table: "sh_table_hanoi",
        },
    }
}

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "update_pie",
            inputs: &["pie-filter-dropdown.value", "piechart.clickData"],
            states: &["selected_slice.data"],
            outputs: &["piechart.figure", "selected_slice.data"],
            initial: true,
            handler: |ds, inputs| update_pie(City::Addis, ds, inputs),
        },
        Callback {
            name: "filter_table",
            inputs: &["pie-filter-dropdown.value", "selected_slice.data"],
            states: &[],
            outputs: &["sh_table.data"],
            initial: true,
            handler: |ds, inputs| filter_table(City::Addis, ds, inputs),
        },
        Callback {
            name: "update_pie_hanoi",
            inputs: &["pie-filter-dropdown-hanoi.value", "piechart-hanoi.clickData"],
            states: &["selected_slice-hanoi.data"],
            outputs: &["piechart-hanoi.figure", "selected_slice-hanoi.data"],
            initial: true,
            handler: |ds, inputs| update_pie(City::Hanoi, ds, inputs),
        },
        Callback {
            name: "filter_table_hanoi",
            inputs: &["pie-filter-dropdown-hanoi.value", "selected_slice-hanoi.data"],
            states: &[],
            outputs: &["sh_table_hanoi.data"],
            initial: true,
            handler: |ds, inputs| filter_table(City::Hanoi, ds, inputs),
        },
    ]
}

fn grouping_key(inputs: &Inputs, property: &str) -> CallbackResult<GroupingKey> {
    inputs
        .str(property)?
        .parse()
        .map_err(|e: String| CallbackError::invalid(property, e))
}

/// New selection after a click: clicking the selected slice clears it
pub fn toggle(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Label of the clicked slice in Plotly click data
fn clicked_label(click_data: &Value) -> Option<&str> {
    click_data["points"][0]["label"].as_str()
}

fn update_pie(city: City, datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let ids = ids(city);
    let dropdown = format!("{}.value", ids.dropdown);
    let click = format!("{}.clickData", ids.chart);
    let store = format!("{}.data", ids.store);

    let key = grouping_key(inputs, &dropdown)?;
    let current = inputs.opt_str(&store);

    // A selection belongs to the grouping it was made under
    let (selected, pulled) = if inputs.triggered_by(&dropdown) {
        (None, false)
    } else if inputs.triggered_by(&click) {
        match inputs.value(&click).and_then(clicked_label) {
            Some(label) => (toggle(current, label), true),
            None => (current.map(str::to_string), false),
        }
    } else {
        (current.map(str::to_string), false)
    };

    let counts = datasets.stakeholders(city).value_counts(key);
    let figure = pie_figure(&counts, if pulled { selected.as_deref() } else { None });

    Ok(vec![
        Output::figure(figure),
        Output::data(selected.map(Value::String).unwrap_or(Value::Null)),
    ])
}

fn filter_table(city: City, datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let ids = ids(city);
    let key = grouping_key(inputs, &format!("{}.value", ids.dropdown))?;
    let selected = inputs.opt_str(&format!("{}.data", ids.store));

    Ok(vec![Output::data(table_rows(datasets.stakeholders(city), key, selected))])
}

/// Rows matching the selected slice, or every row
pub fn table_rows(directory: &StakeholderDirectory, key: GroupingKey, selected: Option<&str>) -> Vec<Value> {
    match selected {
        Some(value) => directory.to_records(directory.filter(key, value)),
        None => directory.to_records(&directory.records),
    }
}

/// Pie of category counts; `pulled` names the slice drawn out of the pie
pub fn pie_figure(counts: &[(String, usize)], pulled: Option<&str>) -> Figure {
    let palette = &theme::PLOTTING_PALETTE_CAT;
    let colors: Vec<&str> = (0..counts.len()).map(|i| palette[i % palette.len()]).collect();
    let text_colors: Vec<&str> = colors.iter().map(|c| theme::text_color_on(c)).collect();
    let pull: Vec<f64> = counts
        .iter()
        .map(|(name, _)| if Some(name.as_str()) == pulled { SELECTED_PULL } else { 0.0 })
        .collect();

    let trace = json!({
        "type": "pie",
        "labels": counts.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        "values": counts.iter().map(|(_, n)| n).collect::<Vec<_>>(),
        "hole": 0,
        "marker": { "colors": colors },
        "textfont": { "color": text_colors },
        "pull": pull,
        "hoverinfo": "percent",
        "textinfo": "label",
        "textposition": "inside",
        "insidetextorientation": "radial"
    });

    Figure::new(
        vec![trace],
        json!({
            "margin": { "t": 0.1, "l": 0.1, "r": 0.1, "b": 0.1 },
            "showlegend": false
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;
    use std::collections::HashMap;

    fn click(label: &str) -> Value {
        json!({ "points": [{ "label": label }] })
    }

    fn run_pie(ds: &Datasets, trigger: Option<&str>, clicked: Option<&str>, current: Option<&str>) -> Vec<Output> {
        let inputs = Inputs::new(trigger, HashMap::new())
            .with("pie-filter-dropdown.value", "Sector")
            .with("piechart.clickData", clicked.map(click).unwrap_or(Value::Null))
            .with("selected_slice.data", current.map(Value::from).unwrap_or(Value::Null));
        update_pie(City::Addis, ds, &inputs).unwrap()
    }

    fn pulls(output: &Output) -> Vec<f64> {
        match output {
            Output::Figure { figure } => figure.data[0]["pull"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_f64().unwrap())
                .collect(),
            other => panic!("not a figure: {:?}", other),
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(toggle(None, "NGO"), Some("NGO".to_string()));
        assert_eq!(toggle(Some("NGO"), "NGO"), None);
        assert_eq!(toggle(Some("NGO"), "Private"), Some("Private".to_string()));
    }

    #[test]
    fn test_click_selects_and_pulls() {
        let fixture = Fixture::new();
        let out = run_pie(&fixture.datasets, Some("piechart.clickData"), Some("NGO"), None);

        assert_eq!(out[1], Output::data("NGO"));
        // Private (2), NGO (1), Public (1)
        assert_eq!(pulls(&out[0]), vec![0.0, 0.2, 0.0]);
    }

    #[test]
    fn test_click_twice_restores_full_table() {
        let fixture = Fixture::new();
        let ds = &fixture.datasets;
        let directory = ds.stakeholders(City::Addis);

        let first = run_pie(ds, Some("piechart.clickData"), Some("Private"), None);
        let selected = match &first[1] {
            Output::Data { data } => data.as_str().map(str::to_string),
            _ => None,
        };
        assert_eq!(table_rows(directory, GroupingKey::Sector, selected.as_deref()).len(), 2);

        let second = run_pie(ds, Some("piechart.clickData"), Some("Private"), selected.as_deref());
        assert_eq!(second[1], Output::data(Value::Null));
        assert_eq!(pulls(&second[0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(table_rows(directory, GroupingKey::Sector, None).len(), directory.len());
    }

    #[test]
    fn test_dropdown_change_clears_selection() {
        let fixture = Fixture::new();
        let out = run_pie(
            &fixture.datasets,
            Some("pie-filter-dropdown.value"),
            Some("Private"),
            Some("Private"),
        );
        assert_eq!(out[1], Output::data(Value::Null));
    }

    #[test]
    fn test_text_colors_follow_luminance() {
        let counts = vec![("A".to_string(), 3), ("B".to_string(), 2), ("C".to_string(), 1)];
        let figure = pie_figure(&counts, None);

        let colors = &figure.data[0]["textfont"]["color"];
        assert_eq!(colors[0], "white");
        assert_eq!(colors[2], theme::BROWN);
    }

    #[test]
    fn test_hanoi_table_filter() {
        let fixture = Fixture::new();
        let inputs = Inputs::new(Some("selected_slice-hanoi.data"), HashMap::new())
            .with("pie-filter-dropdown-hanoi.value", "Scale")
            .with("selected_slice-hanoi.data", "Local");
        let out = filter_table(City::Hanoi, &fixture.datasets, &inputs).unwrap();

        match &out[0] {
            Output::Data { data } => {
                let rows = data.as_array().unwrap();
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0]["Organization"], "Hanoi Markets Board");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_grouping_key() {
        let fixture = Fixture::new();
        let inputs = Inputs::default().with("pie-filter-dropdown.value", "Region");

        assert!(matches!(
            filter_table(City::Addis, &fixture.datasets, &inputs),
            Err(CallbackError::InvalidInput { .. })
        ));
    }
}
