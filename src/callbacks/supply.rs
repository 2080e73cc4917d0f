//! Year slider driving the rice-flow Sankey and its KPIs

use super::{Callback, CallbackError, CallbackResult, Inputs, Output};
use crate::city::City;
use crate::data::supply::{FIRST_YEAR, LAST_YEAR};
use crate::data::{Datasets, FlowGraph};
use crate::view::figure::Figure;
use crate::view::theme;
use serde_json::json;

/// Element ids of one city's supply widgets
#[derive(Debug, Clone, Copy)]
pub struct SupplyIds {
    pub slider: &'static str,
    pub total_flow: &'static str,
    pub urban: &'static str,
    pub sankey: &'static str,
}

pub fn ids(city: City) -> SupplyIds {
    match city {
        City::Addis => SupplyIds {
            slider: "slider",
            total_flow: "kpi-total-flow",
            urban: "urban-indicator",
            sankey: "sankey-graph",
        },
        City::Hanoi => SupplyIds {
            slider: "slider-hanoi",
            total_flow: "kpi-total-flow-hanoi",
            urban: "urban-indicator-hanoi",
            sankey: "sankey-graph-hanoi",
        },
    }
}

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "update_sankey",
            inputs: &["slider.value"],
            states: &[],
            outputs: &["kpi-total-flow.children", "urban-indicator.figure", "sankey-graph.figure"],
            initial: true,
            handler: |ds, inputs| update_sankey(City::Addis, ds, inputs),
        },
        Callback {
            name: "update_sankey_hanoi",
            inputs: &["slider-hanoi.value"],
            states: &[],
            outputs: &[
                "kpi-total-flow-hanoi.children",
                "urban-indicator-hanoi.figure",
                "sankey-graph-hanoi.figure",
            ],
            initial: true,
            handler: |ds, inputs| update_sankey(City::Hanoi, ds, inputs),
        },
    ]
}

fn update_sankey(city: City, datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let property = format!("{}.value", ids(city).slider);
    let year = inputs.i64(&property)?;
    if !(FIRST_YEAR as i64..=LAST_YEAR as i64).contains(&year) || year % 2 != 0 {
        return Err(CallbackError::invalid(
            &property,
            format!("{} is not an even year in {}-{}", year, FIRST_YEAR, LAST_YEAR),
        ));
    }

    let graph = datasets.supply.graph(year as i32);
    Ok(vec![
        Output::text(format_thousands(graph.total_flow())),
        Output::figure(urban_share_figure(graph.urban_share())),
        Output::figure(sankey_figure(&graph)),
    ])
}

/// Whole number with comma thousands separators
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Two-stage flow diagram
pub fn sankey_figure(graph: &FlowGraph) -> Figure {
    let links = graph.links();
    let trace = json!({
        "type": "sankey",
        "node": {
            "label": graph.nodes,
            "color": vec![theme::RED; graph.nodes.len()],
            "pad": 15,
            "thickness": 20
        },
        "link": {
            "source": links.iter().map(|l| l.0).collect::<Vec<_>>(),
            "target": links.iter().map(|l| l.1).collect::<Vec<_>>(),
            "value": links.iter().map(|l| l.2).collect::<Vec<_>>(),
            "color": vec![theme::SANKEY_LINK; links.len()],
            "hovertemplate": "From %{source.label} → %{target.label}<br>Flow: %{value}<extra></extra>"
        }
    });

    Figure::new(
        vec![trace],
        json!({
            "hovermode": "x",
            "font": { "size": 12, "color": "black" },
            "paper_bgcolor": theme::WHITE,
            "plot_bgcolor": theme::WHITE,
            "margin": { "l": 10, "r": 10, "t": 20, "b": 20 }
        }),
    )
}

/// Urban vs rural donut; empty when the year has no stage-two flow
pub fn urban_share_figure(share: Option<f64>) -> Figure {
    let Some(urban) = share else {
        return Figure::placeholder("No data");
    };
    let rural = 100.0 - urban;

    let trace = json!({
        "type": "pie",
        "values": [urban, rural],
        "labels": ["Urban", "Rural"],
        "hole": 0.6,
        "marker": { "colors": [theme::RED, theme::LIGHT_GREEN] },
        "textinfo": "none",
        "hoverinfo": "label+percent",
        "hovertext": [format!("Urban: {:.1}%", urban), format!("Rural: {:.1}%", rural)]
    });

    Figure::new(
        vec![trace],
        json!({
            "showlegend": false,
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0.1 },
            "paper_bgcolor": theme::TRANSPARENT,
            "plot_bgcolor": theme::TRANSPARENT
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;
    use std::collections::HashMap;

    fn run(ds: &Datasets, year: serde_json::Value) -> CallbackResult<Vec<Output>> {
        let inputs = Inputs::new(Some("slider.value"), HashMap::new()).with("slider.value", year);
        update_sankey(City::Addis, ds, &inputs)
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.6), "1,234,568");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn test_total_flow_is_deduplicated_stage_one() {
        let fixture = Fixture::new();
        let out = run(&fixture.datasets, json!(2022)).unwrap();

        assert_eq!(out[0], Output::text("150"));
    }

    #[test]
    fn test_urban_share_donut() {
        let fixture = Fixture::new();
        let out = run(&fixture.datasets, json!("2022")).unwrap();

        match &out[1] {
            Output::Figure { figure } => {
                assert_eq!(figure.data[0]["hovertext"][0], "Urban: 60.0%");
                assert_eq!(figure.data[0]["hole"], 0.6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sankey_links_use_node_indices() {
        let fixture = Fixture::new();
        let graph = fixture.datasets.supply.graph(2022);
        let fig = sankey_figure(&graph);

        let nodes = fig.data[0]["node"]["label"].as_array().unwrap().len();
        assert_eq!(nodes, graph.nodes.len());
        for idx in fig.data[0]["link"]["source"].as_array().unwrap() {
            assert!((idx.as_u64().unwrap() as usize) < nodes);
        }
    }

    #[test]
    fn test_year_without_flows() {
        let fixture = Fixture::new();
        let out = run(&fixture.datasets, json!(2010)).unwrap();

        assert_eq!(out[0], Output::text("0"));
        match &out[1] {
            Output::Figure { figure } => assert_eq!(figure.trace_count(), 0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_odd_year_rejected() {
        let fixture = Fixture::new();
        assert!(matches!(
            run(&fixture.datasets, json!(2021)),
            Err(CallbackError::InvalidInput { .. })
        ));
    }
}
