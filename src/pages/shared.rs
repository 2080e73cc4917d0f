//! Tabs both cities carry, differing only in data and element ids

use crate::callbacks;
use crate::city::City;
use crate::data::supply::{FIRST_YEAR, LAST_YEAR, YEAR_STEP};
use crate::data::{Datasets, GroupingKey, SupplyFlows};
use crate::view::components::{
    card, data_table, dropdown, graph, kpi_card, options, slider, store, Column,
};
use crate::view::{div, heading, paragraph, span, Element, Node};
use serde_json::Value;

pub const STAKEHOLDER_TABLE_TITLE: &str = "Food System Stakeholder Database";
pub const STAKEHOLDER_PAGE_SIZE: usize = 13;

pub const SANKEY_SOURCE_NOTE: &str = "Data Source: General Statistics Office of Vietnam (GSO). 2025. Production of paddy by province. Consulted on: June 2025. Link: https://www.nso.gov.vn/en/agriculture-forestry-and-fishery/. Estimation method: Trade attractiveness method, including two steps as follows: A) Estimation of Rice Net Supply (Consumption – Production) for every province, based on Consumption (Population * Consumption per person), and Production (Paddy production/Live weight/Raw production * Conversion rate). B) Distribute the rice consumption of Hanoi, considering: Province Production, National Production, and International Import.";

/// Panel with a title and a justified description
pub fn intro_card(title: &str, description: &str) -> Node {
    card(
        None,
        vec![
            heading(2, title).class("header").into(),
            paragraph(description).class("description").into(),
        ],
    )
    .into()
}

/// Italic hint above a control
pub fn hint(text: &str) -> Element {
    paragraph(text).class("hint")
}

/// Stakeholder pie with its grouping dropdown, and the directory table
pub fn stakeholders(city: City, datasets: &Datasets) -> Vec<Node> {
    let ids = callbacks::stakeholders::ids(city);
    let directory = datasets.stakeholders(city);

    let grouping = options(GroupingKey::all().iter().map(|k| (k.label(), k.as_str())));
    let filter = card(
        None,
        vec![
            hint("Filter Database by:").into(),
            dropdown(ids.dropdown, &grouping, &[GroupingKey::Sector.as_str()], false).into(),
        ],
    );
    let pie = card(
        None,
        vec![
            hint("Select a slice of the pie chart to filter the database.").into(),
            graph(ids.chart).class("pie-graph").into(),
            store(ids.store, &Value::Null),
        ],
    );

    let columns: Vec<Column> = directory
        .column_widths()
        .into_iter()
        .map(|(name, width)| Column::new(&name).width(width))
        .collect();
    let table = card(
        Some(STAKEHOLDER_TABLE_TITLE),
        vec![data_table(
            ids.table,
            &columns,
            &directory.to_records(&directory.records),
            STAKEHOLDER_PAGE_SIZE,
        )],
    );

    vec![
        div().class("panel-left").child(filter).child(pie).into(),
        div().class("panel-right").child(table).into(),
    ]
}

/// Sankey of rice flows with its KPI cards and year slider
pub fn supply(city: City) -> Vec<Node> {
    let ids = callbacks::supply::ids(city);
    let years = SupplyFlows::slider_years();

    let kpis = div()
        .class("panel-left kpi-column")
        .child(
            div()
                .class("card kpi-stack")
                .child(kpi_card("Total Flow", ids.total_flow, ""))
                .child(span("tons").class("kpi-unit")),
        )
        .child(
            div()
                .class("card kpi-stack")
                .child(heading(5, "Urban Share").class("kpi-title"))
                .child(graph(ids.urban).class("donut-graph")),
        );

    let info = div()
        .class("info-badge")
        .child(span("ⓘ").class("info-icon").attr("title", SANKEY_SOURCE_NOTE));

    let sankey = card(
        None,
        vec![
            info.into(),
            graph(ids.sankey).class("sankey-graph").into(),
            slider(ids.slider, FIRST_YEAR, LAST_YEAR, YEAR_STEP as i32, LAST_YEAR, &years),
        ],
    );

    vec![kpis.into(), div().class("panel-right").child(sankey).into()]
}

/// Poverty description, variable dropdown, bar chart and district map
pub fn poverty(city: City, datasets: &Datasets) -> Vec<Node> {
    let ids = callbacks::poverty::ids(city);
    let dataset = datasets.poverty(city);
    let area = match city {
        City::Addis => "Addis Ababa's sub-cities",
        City::Hanoi => "Hanoi's districts",
    };
    let description = format!(
        "The Multidimensional Poverty Index (MPI) assesses poverty across health, education, and living standards using ten indicators including nutrition, schooling, sanitation, water, electricity, and housing. This spatial analysis maps deprivation levels across {}, revealing where households face multiple overlapping disadvantages. These insights identify priority areas for targeted interventions, supporting equitable resource allocation and sustainable poverty reduction strategies aligned with SDG goals.",
        area
    );

    let variables = options(dataset.variables.iter().map(|v| (v.as_str(), v.as_str())));
    let selected: Vec<&str> = dataset.variables.first().map(String::as_str).into_iter().collect();

    let left = div()
        .class("panel-left")
        .child(intro_card("Multidimensional Poverty Index", &description))
        .child(card(
            None,
            vec![
                dropdown(ids.dropdown, &variables, &selected, false).into(),
                graph(ids.bar).class("bar-graph").into(),
            ],
        ));

    vec![
        left.into(),
        div().class("panel-map").child(graph(ids.map).class("map-graph")).into(),
    ]
}
