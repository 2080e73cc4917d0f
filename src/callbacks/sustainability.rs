//! SDG filter buttons over the sustainability indicator table

use super::{Callback, CallbackResult, Inputs, Output};
use crate::data::Datasets;
use crate::view::theme;
use crate::view::Style;

pub const GOAL_COUNT: u8 = 17;
pub const INDICATORS_TABLE_ID: &str = "indicators_table";
pub const STATUS_ID: &str = "sdg-filter-status";
pub const CLEAR_BUTTON_ID: &str = "sdg-clear-filter";

pub const PROMPT: &str = "Click an SDG icon to filter indicators";
pub const SHOWING_ALL: &str = "Showing all indicators";

/// Id of the button for goal `n`
pub fn goal_button_id(goal: u8) -> String {
    format!("sdg-filter-{}", goal)
}

pub fn callbacks() -> Vec<Callback> {
    vec![Callback {
        name: "filter_by_sdg",
        inputs: &[
            "sdg-filter-1.n_clicks",
            "sdg-filter-2.n_clicks",
            "sdg-filter-3.n_clicks",
            "sdg-filter-4.n_clicks",
            "sdg-filter-5.n_clicks",
            "sdg-filter-6.n_clicks",
            "sdg-filter-7.n_clicks",
            "sdg-filter-8.n_clicks",
            "sdg-filter-9.n_clicks",
            "sdg-filter-10.n_clicks",
            "sdg-filter-11.n_clicks",
            "sdg-filter-12.n_clicks",
            "sdg-filter-13.n_clicks",
            "sdg-filter-14.n_clicks",
            "sdg-filter-15.n_clicks",
            "sdg-filter-16.n_clicks",
            "sdg-filter-17.n_clicks",
            "sdg-clear-filter.n_clicks",
        ],
        states: &[],
        outputs: &[
            "indicators_table.data",
            "sdg-filter-status.children",
            "sdg-filter-1.style",
            "sdg-filter-2.style",
            "sdg-filter-3.style",
            "sdg-filter-4.style",
            "sdg-filter-5.style",
            "sdg-filter-6.style",
            "sdg-filter-7.style",
            "sdg-filter-8.style",
            "sdg-filter-9.style",
            "sdg-filter-10.style",
            "sdg-filter-11.style",
            "sdg-filter-12.style",
            "sdg-filter-13.style",
            "sdg-filter-14.style",
            "sdg-filter-15.style",
            "sdg-filter-16.style",
            "sdg-filter-17.style",
        ],
        initial: true,
        handler: filter_by_sdg,
    }]
}

/// Style of an SDG button at rest
pub fn default_button_style() -> Style {
    Style::new()
        .set("border", "3px solid transparent")
        .set("border-radius", "8px")
        .set("padding", "5px")
        .set("margin", "5px")
        .set("cursor", "pointer")
        .set("background-color", "transparent")
        .set("transition", "all 0.2s")
}

/// Style of the active SDG button
pub fn selected_button_style() -> Style {
    default_button_style()
        .set("border", format!("3px solid {}", theme::RED))
        .set("background-color", theme::LIGHT_GREEN)
        .set("box-shadow", "0 2px 8px rgba(168, 0, 80, 0.3)")
}

/// Goal selected by the button that fired, if it was a goal button
fn triggered_goal(inputs: &Inputs) -> Option<u8> {
    let goal: u8 = inputs.trigger_id()?.strip_prefix("sdg-filter-")?.parse().ok()?;
    (1..=GOAL_COUNT).contains(&goal).then_some(goal)
}

fn filter_by_sdg(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let indicators = &datasets.addis.indicators;

    let (rows, status, selected) = match triggered_goal(inputs) {
        Some(goal) => {
            let matching = indicators.for_goal(goal);
            let status = format!("Showing {} indicators for SDG {}", matching.len(), goal);
            (matching.into_iter().map(|i| i.record()).collect(), status, Some(goal))
        }
        None if inputs.trigger_id() == Some(CLEAR_BUTTON_ID) => {
            (indicators.records(), SHOWING_ALL.to_string(), None)
        }
        None => (indicators.records(), PROMPT.to_string(), None),
    };

    let mut outputs = vec![Output::data(rows), Output::text(status)];
    outputs.extend((1..=GOAL_COUNT).map(|goal| {
        Output::style(if Some(goal) == selected {
            selected_button_style()
        } else {
            default_button_style()
        })
    }));
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;
    use serde_json::Value;
    use std::collections::HashMap;

    fn run(trigger: Option<&str>) -> Vec<Output> {
        let fixture = Fixture::new();
        filter_by_sdg(&fixture.datasets, &Inputs::new(trigger, HashMap::new())).unwrap()
    }

    fn rows(output: &Output) -> Vec<Value> {
        match output {
            Output::Data { data } => data.as_array().unwrap().clone(),
            other => panic!("not data: {:?}", other),
        }
    }

    #[test]
    fn test_goal_filter() {
        let out = run(Some("sdg-filter-12.n_clicks"));

        let rows = rows(&out[0]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Indicators"], "Water use");
        assert_eq!(rows[0]["SDG Numbers"], "6, 12");
        assert_eq!(out[1], Output::text("Showing 1 indicators for SDG 12"));
    }

    #[test]
    fn test_goal_match_is_exact() {
        // goal 1 must not match the 12 tagged on "Water use"
        let out = run(Some("sdg-filter-1.n_clicks"));
        assert!(rows(&out[0]).is_empty());
        assert_eq!(out[1], Output::text("Showing 0 indicators for SDG 1"));
    }

    #[test]
    fn test_selected_button_highlighted() {
        let out = run(Some("sdg-filter-3.n_clicks"));

        assert_eq!(out.len(), 2 + GOAL_COUNT as usize);
        assert_eq!(out[2 + 2], Output::style(selected_button_style()));
        assert_eq!(out[2], Output::style(default_button_style()));
    }

    #[test]
    fn test_clear_and_initial() {
        let cleared = run(Some("sdg-clear-filter.n_clicks"));
        assert_eq!(rows(&cleared[0]).len(), 3);
        assert_eq!(cleared[1], Output::text(SHOWING_ALL));

        let initial = run(None);
        assert_eq!(rows(&initial[0]).len(), 3);
        assert_eq!(initial[1], Output::text(PROMPT));
    }

    #[test]
    fn test_selected_style() {
        let style = selected_button_style();
        assert_eq!(style.get("border"), Some("3px solid #A80050"));
        assert_eq!(style.get("border-radius"), Some("8px"));
    }
}
