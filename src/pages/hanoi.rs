//! Hà Nội topic pages

use super::shared::{self, hint, intro_card};
use crate::callbacks::food_env;
use crate::callbacks::trends::{
    AFFORDABILITY_DROPDOWN_ID, AFFORDABILITY_TREND_ID, DUMBBELL_ID, DUMBBELL_SLIDER_ID,
    HEALTH_DROPDOWN_ID, HEALTH_TREND_ID,
};
use crate::city::{City, TabId};
use crate::data::outlets::layer_label;
use crate::data::trends::{
    AFFORDABILITY_CATEGORIES, DEFAULT_AFFORDABILITY_CATEGORY, DUMBBELL_DEFAULT_START,
    DUMBBELL_END_YEAR, DUMBBELL_FIRST_YEAR,
};
use crate::data::Datasets;
use crate::view::components::{card, dropdown, graph, options, slider};
use crate::view::{div, heading, Node};

const FOOD_ENV_DESCRIPTION: &str = "This map shows the distribution of healthy and unhealthy food outlets across Hanoi's districts. The obesogenic ratio reveals where unhealthy outlets dominate, indicating areas with limited access to nutritious food. Population exposure metrics highlight which communities face the greatest imbalance, providing evidence to guide equitable food policy interventions. This analysis forms part of a broader assessment integrating socioeconomic and built environment factors.";

/// Panels of a Hà Nội topic, `None` for topics without data
pub fn tab(tab: TabId, datasets: &Datasets) -> Option<Vec<Node>> {
    let content = match tab {
        TabId::Stakeholders => shared::stakeholders(City::Hanoi, datasets),
        TabId::Supply => shared::supply(City::Hanoi),
        TabId::Poverty => shared::poverty(City::Hanoi, datasets),
        TabId::Affordability => affordability(datasets),
        TabId::Nutrition => nutrition(datasets),
        _ => return None,
    };
    Some(content)
}

fn affordability(datasets: &Datasets) -> Vec<Node> {
    let ids = food_env::ids(City::Hanoi);
    let layers: Vec<(String, String)> = datasets
        .hanoi
        .outlets
        .files()
        .iter()
        .map(|f| (layer_label(f), f.clone()))
        .collect();
    let categories = options(AFFORDABILITY_CATEGORIES.iter().map(|(value, label, _)| (*label, *value)));

    let left = div()
        .class("panel-left")
        .child(intro_card("Food Environment Analysis", FOOD_ENV_DESCRIPTION))
        .child(card(
            None,
            vec![
                hint("Select food outlet layers to display on the map.").into(),
                dropdown(ids.layers, &layers, &[], true)
                    .attr("data-placeholder", "Select outlet layers to display")
                    .into(),
            ],
        ))
        .child(card(
            Some("Affordability Trends"),
            vec![
                dropdown(
                    AFFORDABILITY_DROPDOWN_ID,
                    &categories,
                    &[DEFAULT_AFFORDABILITY_CATEGORY],
                    false,
                )
                .into(),
                graph(AFFORDABILITY_TREND_ID).class("trend-graph").into(),
            ],
        ));

    vec![
        left.into(),
        div().class("panel-map").child(graph(ids.map).class("map-graph")).into(),
    ]
}

fn nutrition(datasets: &Datasets) -> Vec<Node> {
    let outcomes = datasets.hanoi.health.categories();
    let outcome_options = options(outcomes.iter().map(|c| (c.as_str(), c.as_str())));
    let selected: Vec<&str> = outcomes.first().map(String::as_str).into_iter().collect();
    let marks: Vec<i32> = (DUMBBELL_FIRST_YEAR..DUMBBELL_END_YEAR).collect();

    let trend = card(
        None,
        vec![
            heading(2, "Health & Nutrition").class("header").into(),
            hint("Select a health outcome to compare urban and rural trends.").into(),
            dropdown(HEALTH_DROPDOWN_ID, &outcome_options, &selected, false).into(),
            graph(HEALTH_TREND_ID).class("trend-graph").into(),
        ],
    );

    let diet = card(
        Some("Dietary Change"),
        vec![
            hint(&format!(
                "Daily consumption per person, selected year against {}.",
                DUMBBELL_END_YEAR
            ))
            .into(),
            graph(DUMBBELL_ID).class("dumbbell-graph").into(),
            slider(
                DUMBBELL_SLIDER_ID,
                DUMBBELL_FIRST_YEAR,
                DUMBBELL_END_YEAR,
                1,
                DUMBBELL_DEFAULT_START,
                &marks,
            ),
        ],
    );

    vec![
        div().class("panel-left").child(trend).into(),
        div().class("panel-right").child(diet).into(),
    ]
}
