//! Tab navigation and the selected-city store

use super::{Callback, CallbackResult, Inputs, Output};
use crate::city::{City, TabId};
use crate::data::Datasets;
use crate::pages;
use crate::view::components::{CITY_SELECTOR_ID, SELECTED_CITY_STORE_ID};

pub fn callbacks() -> Vec<Callback> {
    vec![
        Callback {
            name: "store_selected_city",
            inputs: &["city-selector.value"],
            states: &[],
            outputs: &["selected-city.data"],
            initial: true,
            handler: store_selected_city,
        },
        Callback {
            name: "render_tab_content",
            inputs: &[
                "tab-home.n_clicks",
                "tab-1-stakeholders.n_clicks",
                "tab-2-supply.n_clicks",
                "tab-3-sustainability.n_clicks",
                "tab-4-poverty.n_clicks",
                "tab-5-labour.n_clicks",
                "tab-6-resilience.n_clicks",
                "tab-7-affordability.n_clicks",
                "tab-8-losses.n_clicks",
                "tab-9-policies.n_clicks",
                "tab-10-nutrition.n_clicks",
                "tab-11-footprints.n_clicks",
                "tab-12-behaviour.n_clicks",
                "city-selector.value",
            ],
            states: &["selected-city.data"],
            outputs: &["tab-content.children"],
            // the page shell renders the landing page itself
            initial: false,
            handler: render_tab_content,
        },
    ]
}

fn city_from(inputs: &Inputs, property: &str) -> City {
    inputs
        .opt_str(property)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn store_selected_city(_datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let city = city_from(inputs, &format!("{}.value", CITY_SELECTOR_ID));
    Ok(vec![Output::data(city.as_str())])
}

fn render_tab_content(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let selector = format!("{}.value", CITY_SELECTOR_ID);

    if inputs.triggered_by(&selector) {
        let city = city_from(inputs, &selector);
        tracing::debug!(city = %city, "City changed");
        return Ok(vec![Output::children(pages::landing(city))]);
    }

    let city = city_from(inputs, &format!("{}.data", SELECTED_CITY_STORE_ID));
    let tab = inputs
        .trigger_id()
        .and_then(TabId::from_element_id)
        .unwrap_or(TabId::Home);

    Ok(vec![Output::children(pages::tab(city, tab, datasets))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::{CallbackRequest, Registry};
    use crate::data::fixtures::Fixture;
    use serde_json::json;

    fn navigate(fixture: &Fixture, trigger: &str, city: &str) -> String {
        let request: CallbackRequest = serde_json::from_value(json!({
            "trigger": trigger,
            "inputs": {
                trigger: 1,
                "city-selector.value": city,
                "selected-city.data": city
            }
        }))
        .unwrap();
        let outputs = Registry::new().dispatch(&fixture.datasets, request).unwrap();
        match &outputs["tab-content.children"] {
            Output::Children { html } => html.clone(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_populated_tab_renders() {
        let fixture = Fixture::new();
        let html = navigate(&fixture, "tab-2-supply.n_clicks", "addis");
        assert!(html.contains(r#"id="sankey-graph""#));
    }

    #[test]
    fn test_city_routes_tab() {
        let fixture = Fixture::new();
        let html = navigate(&fixture, "tab-2-supply.n_clicks", "hanoi");
        assert!(html.contains(r#"id="sankey-graph-hanoi""#));
    }

    #[test]
    fn test_unpopulated_tab_falls_back_to_landing() {
        let fixture = Fixture::new();
        let html = navigate(&fixture, "tab-11-footprints.n_clicks", "hanoi");

        assert!(html.contains("EcoFoodSystems Dashboard"));
        assert!(html.contains(City::Hanoi.background_image()));
    }

    #[test]
    fn test_city_change_reloads_landing_and_store() {
        let fixture = Fixture::new();
        let request: CallbackRequest = serde_json::from_value(json!({
            "trigger": "city-selector.value",
            "inputs": { "city-selector.value": "hanoi", "selected-city.data": "addis" }
        }))
        .unwrap();
        let outputs = Registry::new().dispatch(&fixture.datasets, request).unwrap();

        assert_eq!(outputs["selected-city.data"], Output::data("hanoi"));
        match &outputs["tab-content.children"] {
            Output::Children { html } => assert!(html.contains(City::Hanoi.background_image())),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_home_returns_to_landing() {
        let fixture = Fixture::new();
        let html = navigate(&fixture, "tab-home.n_clicks", "addis");
        assert!(html.contains(City::Addis.background_image()));
    }
}
