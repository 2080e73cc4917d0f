//! Plotly figure payloads
//!
//! Figures are plain `{data, layout}` JSON handed to Plotly in the browser.

use super::theme;
use serde::Serialize;
use serde_json::{json, Value};

/// ColorBrewer "Reds", light to dark
pub const REDS: [&str; 9] = [
    "rgb(255,245,240)",
    "rgb(254,224,210)",
    "rgb(252,187,161)",
    "rgb(252,146,114)",
    "rgb(251,106,74)",
    "rgb(239,59,44)",
    "rgb(203,24,29)",
    "rgb(165,15,21)",
    "rgb(103,0,13)",
];

pub const MAP_STYLE: &str = "carto-positron";

/// A Plotly figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(data: Vec<Value>, layout: Value) -> Self {
        Self { data, layout }
    }

    /// Blank figure with a centered note, used when there is nothing to plot
    pub fn placeholder(message: &str) -> Self {
        Self {
            data: Vec::new(),
            layout: json!({
                "xaxis": { "visible": false },
                "yaxis": { "visible": false },
                "paper_bgcolor": theme::TRANSPARENT,
                "plot_bgcolor": theme::TRANSPARENT,
                "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
                "annotations": [{
                    "text": message,
                    "showarrow": false,
                    "xref": "paper",
                    "yref": "paper",
                    "x": 0.5,
                    "y": 0.5,
                    "font": { "color": theme::BROWN }
                }]
            }),
        }
    }

    /// Number of traces
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }
}

/// Evenly spaced `[[stop, color], ...]` colorscale
pub fn colorscale(colors: &[&str]) -> Value {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    Value::Array(
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| json!([i as f64 / last, c]))
            .collect(),
    )
}

/// Standard hover label used across charts
pub fn hoverlabel() -> Value {
    json!({ "bgcolor": "white", "font": { "color": "black" } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorscale_stops() {
        let scale = colorscale(&theme::GREEN_SCALE);
        let stops: Vec<f64> = scale
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s[0].as_f64().unwrap())
            .collect();
        assert_eq!(stops, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(scale[4][1], "#3a6649");
    }

    #[test]
    fn test_placeholder_is_empty() {
        let fig = Figure::placeholder("No data");
        assert_eq!(fig.trace_count(), 0);
        assert_eq!(fig.layout["annotations"][0]["text"], "No data");
    }
}
