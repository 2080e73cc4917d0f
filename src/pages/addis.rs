//! Addis Ababa topic pages

use super::shared::{self, hint, intro_card};
use crate::callbacks::footprints::{FOOD_GROUP_SELECT_ID, FOOD_ITEMS_CONTAINER_ID};
use crate::callbacks::sustainability::{
    default_button_style, goal_button_id, CLEAR_BUTTON_ID, GOAL_COUNT, INDICATORS_TABLE_ID,
    PROMPT, STATUS_ID,
};
use crate::callbacks::food_env;
use crate::city::{City, TabId};
use crate::data::food_env::{DEFAULT_METRIC, METRICS};
use crate::data::outlets::layer_label;
use crate::data::policies::INDICATOR_COLUMNS;
use crate::data::Datasets;
use crate::view::components::{
    button, card, data_table, dropdown, graph, nutrition_kpi_card, Column,
};
use crate::view::{div, heading, img, Node, Style};

pub const POLICIES_TABLE_ID: &str = "policies_table";
pub const TABLE_PAGE_SIZE: usize = 14;

const FOOD_ENV_DESCRIPTION: &str = "This map shows the distribution of healthy and unhealthy food outlets across Addis Ababa's sub-cities. The obesogenic ratio reveals where unhealthy outlets dominate, indicating areas with limited access to nutritious food. Population exposure metrics highlight which communities face the greatest imbalance, providing evidence to guide equitable food policy interventions. This analysis forms part of a broader assessment integrating socioeconomic and built environment factors.";

/// `(outcome, Addis Ababa %, national %)`, all lower-is-better
const NUTRITION_GROUPS: [(&str, &[(&str, f64, f64)]); 3] = [
    (
        "Children Aged 0-59 Months",
        &[
            ("Stunting", 13.9, 40.9),
            ("Wasting", 3.8, 11.2),
            ("Concurrent Stunting and Wasting", 0.7, 2.9),
            ("Underweight", 5.5, 23.3),
            ("Overweight", 6.9, 3.9),
            ("Malnutrition", 21.9, 51.5),
        ],
    ),
    (
        "Adolescent Girls (10-19 Years)",
        &[
            ("Underweight (BMI)", 5.3, 9.3),
            ("Overweight (BMI)", 12.5, 5.1),
            ("Obese (BMI)", 3.5, 1.0),
        ],
    ),
    (
        "Women (15-49 Years)",
        &[("Underweight", 10.7, 20.1), ("Overweight", 35.8, 11.4)],
    ),
];

/// Panels of an Addis Ababa topic, `None` for topics without data
pub fn tab(tab: TabId, datasets: &Datasets) -> Option<Vec<Node>> {
    let content = match tab {
        TabId::Stakeholders => shared::stakeholders(City::Addis, datasets),
        TabId::Supply => shared::supply(City::Addis),
        TabId::Poverty => shared::poverty(City::Addis, datasets),
        TabId::Sustainability => sustainability(datasets),
        TabId::Affordability => affordability(datasets),
        TabId::Policies => policies(datasets),
        TabId::Nutrition => nutrition(),
        TabId::Footprints => footprints(datasets),
        _ => return None,
    };
    Some(content)
}

/// URL of the square icon for SDG `goal`
pub fn sdg_icon(goal: u8) -> String {
    format!(
        "/assets/logos/SDG%20logos/SDG%20Web%20Files%20w-%20UN%20Emblem/E%20SDG%20Icons%20Square/E_SDG%20goals_icons-individual-rgb-{:02}.png",
        goal
    )
}

fn sustainability(datasets: &Datasets) -> Vec<Node> {
    let buttons = (1..=GOAL_COUNT).map(|goal| {
        button(&goal_button_id(goal), default_button_style())
            .class("sdg-button")
            .attr("title", format!("SDG {}", goal))
            .child(img(&sdg_icon(goal), &format!("SDG {}", goal)).class("sdg-icon"))
    });

    let filter = card(
        None,
        vec![
            heading(5, "Filter by SDG Goal:").class("hint").into(),
            div().class("sdg-grid").children(buttons).into(),
            button(CLEAR_BUTTON_ID, Style::new())
                .class("clear-button")
                .text("Clear Filter")
                .into(),
            div().id(STATUS_ID).class("filter-status").text(PROMPT).into(),
        ],
    );

    let columns: Vec<Column> = INDICATOR_COLUMNS
        .iter()
        .map(|c| match *c {
            "SDG Numbers" => Column::new(c).named("SDG Goals"),
            other => Column::new(other),
        })
        .collect();
    let table = card(
        Some(TabId::Sustainability.label()),
        vec![data_table(
            INDICATORS_TABLE_ID,
            &columns,
            &datasets.addis.indicators.records(),
            TABLE_PAGE_SIZE,
        )],
    );

    vec![div().class("panel-stack").child(filter).child(table).into()]
}

fn affordability(datasets: &Datasets) -> Vec<Node> {
    let ids = food_env::ids(City::Addis);
    let layers: Vec<(String, String)> = datasets
        .addis
        .outlets
        .files()
        .iter()
        .map(|f| (layer_label(f), f.clone()))
        .collect();
    let metrics: Vec<(String, String)> = METRICS
        .iter()
        .map(|m| (m.label.to_string(), m.column.to_string()))
        .collect();

    let mut left = div()
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
        ));
    if let Some(metric_id) = ids.metric {
        left = left.child(card(
            None,
            vec![
                hint("Select a food environment metric to display as a choropleth layer.").into(),
                dropdown(metric_id, &metrics, &[DEFAULT_METRIC], false).into(),
            ],
        ));
    }

    vec![
        left.into(),
        div().class("panel-map").child(graph(ids.map).class("map-graph")).into(),
    ]
}

fn policies(datasets: &Datasets) -> Vec<Node> {
    let policies = &datasets.addis.policies;
    let columns: Vec<Column> = policies.columns.iter().map(|c| Column::new(c)).collect();

    vec![card(
        Some("Food System Policies Database"),
        vec![data_table(POLICIES_TABLE_ID, &columns, &policies.records(), TABLE_PAGE_SIZE)],
    )
    .class("panel-wide")
    .into()]
}

fn nutrition() -> Vec<Node> {
    let mut sections: Vec<Node> = Vec::new();
    for (group, outcomes) in NUTRITION_GROUPS {
        sections.push(heading(3, group).class("section-title").into());
        sections.push(
            div()
                .class("kpi-grid")
                .children(
                    outcomes
                        .iter()
                        .map(|(outcome, city, national)| nutrition_kpi_card(outcome, *city, *national, true)),
                )
                .into(),
        );
    }
    vec![div().class("panel-scroll").children(sections).into()]
}

fn footprints(datasets: &Datasets) -> Vec<Node> {
    let groups = datasets.addis.lca.food_groups();
    let options: Vec<(String, String)> = groups
        .iter()
        .map(|g| {
            let label = g.split_once('-').map(|(_, rest)| rest).unwrap_or(g);
            (label.to_string(), g.clone())
        })
        .collect();
    let selected: Vec<&str> = groups.first().map(String::as_str).into_iter().collect();

    let picker = card(
        None,
        vec![
            heading(5, "Select Food Group:").class("hint").into(),
            dropdown(FOOD_GROUP_SELECT_ID, &options, &selected, false).into(),
        ],
    );

    vec![div()
        .class("panel-scroll")
        .child(picker)
        .child(div().id(FOOD_ITEMS_CONTAINER_ID).class("food-items-grid"))
        .into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::Fixture;

    fn page(tab_id: TabId, datasets: &Datasets) -> Node {
        div().children(tab(tab_id, datasets).unwrap()).into()
    }

    #[test]
    fn test_unpopulated_topics() {
        let fixture = Fixture::new();
        assert!(tab(TabId::Labour, &fixture.datasets).is_none());
        assert!(tab(TabId::Behaviour, &fixture.datasets).is_none());
    }

    #[test]
    fn test_sdg_buttons() {
        let fixture = Fixture::new();
        let page = page(TabId::Sustainability, &fixture.datasets);
        let html = page.render();

        for goal in 1..=GOAL_COUNT {
            assert!(page.find(&goal_button_id(goal)).is_some());
        }
        assert!(html.contains("individual-rgb-07.png"));
        assert!(html.contains("<th>SDG Goals</th>"));
        assert!(page.find(CLEAR_BUTTON_ID).is_some());
    }

    #[test]
    fn test_metric_dropdown_default() {
        let fixture = Fixture::new();
        let html = page(TabId::Affordability, &fixture.datasets).render();

        assert!(html.contains(r#"<option value="ratio_obesogenic" selected="selected">Obesogenic Ratio</option>"#));
        assert!(html.contains(r#"multiple="multiple""#));
    }

    #[test]
    fn test_nutrition_groups() {
        let fixture = Fixture::new();
        let text = page(TabId::Nutrition, &fixture.datasets).text_content();

        assert!(text.contains("Children Aged 0-59 Months"));
        assert!(text.contains("Women (15-49 Years)"));
        assert!(text.contains("Concurrent Stunting and Wasting"));
    }

    #[test]
    fn test_footprints_defaults_to_first_group() {
        let fixture = Fixture::new();
        let groups = fixture.datasets.addis.lca.food_groups();
        let html = page(TabId::Footprints, &fixture.datasets).render();

        assert!(html.contains(&format!(r#"<option value="{}" selected="selected">"#, groups[0])));
        assert!(html.contains(r#"id="food-items-container""#));
    }

    #[test]
    fn test_policies_table() {
        let fixture = Fixture::new();
        let page = page(TabId::Policies, &fixture.datasets);
        assert!(page.find(POLICIES_TABLE_ID).is_some());
    }
}
