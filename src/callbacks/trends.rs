//! Hà Nội yearly trend charts: affordability, health outcomes, diet change

use super::{Callback, CallbackError, CallbackResult, Inputs, Output};
use crate::data::trends::{affordability_title, DUMBBELL_END_YEAR, DUMBBELL_FIRST_YEAR};
use crate::data::{Datasets, RegionSeries, TrendSeries};
use crate::view::figure::{self, Figure};
use crate::view::theme;
use serde_json::{json, Value};

pub const AFFORDABILITY_DROPDOWN_ID: &str = "affordability-filter-dropdown-hanoi";
pub const AFFORDABILITY_TREND_ID: &str = "affordability-trend-hanoi";
pub const HEALTH_DROPDOWN_ID: &str = "health-filter-dropdown-hanoi";
pub const HEALTH_TREND_ID: &str = "health-trend-hanoi";
pub const DUMBBELL_SLIDER_ID: &str = "dumbbell-slider-hanoi";
pub const DUMBBELL_ID: &str = "diet-dumbbell-hanoi";

const GRID_COLOR: &str = "#949494";

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "update_affordability_trend_hanoi",
            inputs: &["affordability-filter-dropdown-hanoi.value"],
            states: &[],
            outputs: &["affordability-trend-hanoi.figure"],
            initial: true,
            handler: update_affordability_trend,
        },
        Callback {
            name: "update_health_trend_hanoi",
            inputs: &["health-filter-dropdown-hanoi.value"],
            states: &[],
            outputs: &["health-trend-hanoi.figure"],
            initial: true,
            handler: update_health_trend,
        },
        Callback {
            name: "update_diet_dumbbell_hanoi",
            inputs: &["dumbbell-slider-hanoi.value"],
            states: &[],
            outputs: &["diet-dumbbell-hanoi.figure"],
            initial: true,
            handler: update_diet_dumbbell,
        },
    ]
}

fn update_affordability_trend(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let category = inputs.str(&format!("{}.value", AFFORDABILITY_DROPDOWN_ID))?;
    let mut figure = trend_figure(&datasets.hanoi.affordability, category, "%");
    figure.layout["title"] = json!({ "text": affordability_title(category), "font": { "size": 14 } });
    figure.layout["margin"]["t"] = json!(30);
    Ok(vec![Output::figure(figure)])
}

fn update_health_trend(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let category = inputs.str(&format!("{}.value", HEALTH_DROPDOWN_ID))?;
    Ok(vec![Output::figure(trend_figure(&datasets.hanoi.health, category, category))])
}

fn update_diet_dumbbell(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let property = format!("{}.value", DUMBBELL_SLIDER_ID);
    let year = inputs.i64(&property)?;
    if !(DUMBBELL_FIRST_YEAR as i64..=DUMBBELL_END_YEAR as i64).contains(&year) {
        return Err(CallbackError::invalid(
            &property,
            format!("{} is outside {}-{}", year, DUMBBELL_FIRST_YEAR, DUMBBELL_END_YEAR),
        ));
    }
    Ok(vec![Output::figure(dumbbell_figure(&datasets.hanoi.diet, year as i32))])
}

/// One line per region with markers
pub fn trend_figure(series: &TrendSeries, category: &str, y_title: &str) -> Figure {
    let colors = [theme::RED, theme::DARK_GREEN];
    let traces: Vec<Value> = series
        .by_region(category)
        .iter()
        .enumerate()
        .map(|(i, s)| region_trace(s, colors[i % colors.len()]))
        .collect();

    if traces.is_empty() {
        return Figure::placeholder(&format!("No data for {}", category));
    }

    Figure::new(
        traces,
        json!({
            "margin": { "l": 0.25, "r": 0, "t": 0, "b": 0.25 },
            "hoverlabel": figure::hoverlabel(),
            "legend": {
                "title": { "text": "" },
                "x": 1.1,
                "y": 1.1,
                "xanchor": "right",
                "yanchor": "top",
                "bgcolor": "rgba(255,255,255,0.7)",
                "bordercolor": "rgba(0,0,0,0.1)",
                "borderwidth": 1,
                "font": { "size": 12 }
            },
            "xaxis": { "title": { "text": "" } },
            "yaxis": { "title": { "text": y_title } }
        }),
    )
}

fn region_trace(series: &RegionSeries, color: &str) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines+markers",
        "name": series.region,
        "x": series.points.iter().map(|(year, _)| year).collect::<Vec<_>>(),
        "y": series.points.iter().map(|(_, v)| v).collect::<Vec<_>>(),
        "line": { "color": color },
        "marker": { "size": 8, "color": color }
    })
}

/// Each dietary category's value in `start_year` against the end year
pub fn dumbbell_figure(diet: &TrendSeries, start_year: i32) -> Figure {
    let rows = diet.dumbbell(start_year, DUMBBELL_END_YEAR);

    let mut line_x: Vec<Option<f64>> = Vec::with_capacity(rows.len() * 3);
    let mut line_y: Vec<Option<&str>> = Vec::with_capacity(rows.len() * 3);
    for row in &rows {
        line_x.extend([Some(row.start), Some(row.end), None]);
        line_y.extend([Some(row.category.as_str()), Some(row.category.as_str()), None]);
    }
    let labels: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();

    let markers = |name: String, values: Vec<f64>, color: &str| {
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": name,
            "x": values,
            "y": labels,
            "marker": {
                "color": color,
                "size": 8,
                "symbol": "circle",
                "line": { "color": theme::BROWN, "width": 2 }
            }
        })
    };

    let traces = vec![
        json!({
            "type": "scatter",
            "mode": "lines",
            "x": line_x,
            "y": line_y,
            "line": { "color": "grey" },
            "showlegend": false
        }),
        markers(start_year.to_string(), rows.iter().map(|r| r.start).collect(), theme::RED),
        markers(DUMBBELL_END_YEAR.to_string(), rows.iter().map(|r| r.end).collect(), theme::LIGHT_GREEN),
    ];

    let arrows: Vec<Value> = rows
        .iter()
        .map(|r| {
            json!({
                "x": r.end, "y": r.category,
                "ax": r.start, "ay": r.category,
                "xref": "x", "yref": "y", "axref": "x", "ayref": "y",
                "showarrow": true,
                "arrowhead": 3,
                "arrowsize": 1,
                "arrowwidth": 2,
                "arrowcolor": theme::BROWN
            })
        })
        .collect();

    Figure::new(
        traces,
        json!({
            "annotations": arrows,
            "yaxis": {
                "tickfont": { "size": 12 },
                "automargin": true,
                "ticklabelposition": "outside right",
                "showgrid": true,
                "gridcolor": GRID_COLOR,
                "gridwidth": 0.7
            },
            "xaxis": { "showgrid": true, "gridcolor": GRID_COLOR, "gridwidth": 0.7 },
            "margin": { "l": 120, "r": 20, "t": 40, "b": 20 },
            "paper_bgcolor": theme::WHITE,
            "plot_bgcolor": theme::WHITE
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;

    fn figure(output: &Output) -> &Figure {
        match output {
            Output::Figure { figure } => figure,
            other => panic!("not a figure: {:?}", other),
        }
    }

    #[test]
    fn test_affordability_lines_per_region() {
        let fixture = Fixture::new();
        let inputs = Inputs::default().with(&format!("{}.value", AFFORDABILITY_DROPDOWN_ID), "riceAfford");
        let out = update_affordability_trend(&fixture.datasets, &inputs).unwrap();
        let fig = figure(&out[0]);

        assert_eq!(fig.trace_count(), 2);
        assert_eq!(fig.data[0]["name"], "Urban");
        assert_eq!(fig.data[0]["x"], json!([2018, 2020]));
        assert_eq!(fig.data[1]["line"]["color"], theme::DARK_GREEN);
        assert_eq!(fig.layout["yaxis"]["title"]["text"], "%");
        assert_eq!(fig.layout["title"]["text"], "Rice Affordability");
    }

    #[test]
    fn test_health_axis_named_after_category() {
        let fixture = Fixture::new();
        let inputs = Inputs::default().with(&format!("{}.value", HEALTH_DROPDOWN_ID), "Stunting");
        let out = update_health_trend(&fixture.datasets, &inputs).unwrap();

        assert_eq!(figure(&out[0]).layout["yaxis"]["title"]["text"], "Stunting");
    }

    #[test]
    fn test_dumbbell_skips_incomplete_categories() {
        let fixture = Fixture::new();
        let fig = dumbbell_figure(&fixture.datasets.hanoi.diet, 2013);

        assert_eq!(fig.data[1]["y"], json!(["Rice", "Meat"]));
        assert_eq!(fig.data[1]["name"], "2013");
        assert_eq!(fig.data[2]["x"], json!([280.0, 95.0]));
        assert_eq!(fig.data[0]["x"], json!([320.0, 280.0, null, 60.0, 95.0, null]));
        assert_eq!(fig.layout["annotations"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_dumbbell_year_range() {
        let fixture = Fixture::new();
        let inputs = Inputs::default().with(&format!("{}.value", DUMBBELL_SLIDER_ID), 2030);

        assert!(matches!(
            update_diet_dumbbell(&fixture.datasets, &inputs),
            Err(CallbackError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_unknown_category_placeholder() {
        let fixture = Fixture::new();
        let fig = trend_figure(&fixture.datasets.hanoi.health, "Obesity", "Obesity");
        assert_eq!(fig.trace_count(), 0);
    }
}
