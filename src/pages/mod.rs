//! Page composers
//!
//! Each populated (city, tab) pair has a composer returning the view tree
//! that replaces `tab-content`. Widgets are rendered empty or with their
//! defaults; the browser fills charts by posting an initial callback request
//! once a page is mounted.

pub mod addis;
pub mod hanoi;
pub mod landing;
pub mod shared;

pub use landing::landing;

use crate::city::{City, TabId};
use crate::data::Datasets;
use crate::view::components::{self, TAB_CONTENT_ID};
use crate::view::{div, Node};

/// Plotly bundle loaded by the document
pub const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Content of `tab` for `city`, or the city's landing page when the city has
/// nothing for that tab
pub fn tab(city: City, tab: TabId, datasets: &Datasets) -> Node {
    if tab == TabId::Home || !city.is_populated(tab) {
        return landing(city);
    }
    let content = match city {
        City::Addis => addis::tab(tab, datasets),
        City::Hanoi => hanoi::tab(tab, datasets),
    };
    match content {
        Some(content) => tab_page(city, content),
        None => landing(city),
    }
}

/// A topic page: hidden city selector, sidebar, then the topic panels
pub fn tab_page(city: City, content: Vec<Node>) -> Node {
    div()
        .class("tab-page")
        .child(components::city_selector(city, false))
        .child(components::sidebar())
        .child(div().class("tab-main").children(content))
        .into()
}

/// Page shell: the selected-city store and the swappable content container
pub fn shell(city: City, content: Node) -> Node {
    div()
        .id("app")
        .child(components::selected_city_store(city))
        .child(div().id(TAB_CONTENT_ID).child(content))
        .into()
}

/// Full HTML document for the entry point
pub fn document(city: City) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>EcoFoodSystems Dashboard</title>\n",
            "<link rel=\"icon\" href=\"/assets/favicon.ico\">\n",
            "<link rel=\"stylesheet\" href=\"/static/dashboard.css\">\n",
            "<script src=\"{plotly}\"></script>\n",
            "<script src=\"/static/dashboard.js\" defer></script>\n",
            "</head>\n",
            "<body>\n{body}\n</body>\n",
            "</html>\n"
        ),
        plotly = PLOTLY_SRC,
        body = shell(city, landing(city)).render()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::Registry;
    use crate::data::fixtures::Fixture;

    fn component_id(property: &str) -> &str {
        property.split_once('.').map(|(id, _)| id).unwrap_or(property)
    }

    #[test]
    fn test_every_callback_has_a_page() {
        let fixture = Fixture::new();
        let mut pages: Vec<Node> = Vec::new();
        for city in City::all() {
            pages.push(shell(*city, landing(*city)));
            for tab_id in city.populated_tabs() {
                pages.push(shell(*city, tab(*city, *tab_id, &fixture.datasets)));
            }
        }

        for callback in Registry::new().callbacks() {
            let ids: Vec<&str> = callback
                .inputs
                .iter()
                .chain(callback.states)
                .chain(callback.outputs)
                .map(|p| component_id(p))
                .collect();
            let hosted = pages
                .iter()
                .any(|page| ids.iter().all(|id| page.find(id).is_some()));
            assert!(hosted, "no page hosts every component of {}", callback.name);
        }
    }

    #[test]
    fn test_unpopulated_tab_is_landing() {
        let fixture = Fixture::new();
        let page = tab(City::Hanoi, TabId::Policies, &fixture.datasets);

        assert!(page.find("tab-9-policies").is_some());
        assert!(page.find("policies_table").is_none());
    }

    #[test]
    fn test_tab_page_has_hidden_selector() {
        let fixture = Fixture::new();
        let page = tab(City::Hanoi, TabId::Poverty, &fixture.datasets);

        assert!(page.find("city-selector").is_some());
        assert!(page.find("tab-home").is_some());
        assert!(page.find("map-hanoi").is_some());
    }

    #[test]
    fn test_document() {
        let html = document(City::Addis);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="tab-content""#));
        assert!(html.contains(r#"id="selected-city""#));
        assert!(html.contains("/static/dashboard.js"));
    }
}
