//! Reusable UI fragments
//!
//! Interactive widgets carry a `data-component` attribute naming their kind;
//! the browser runtime uses it to read their current value and to apply
//! callback outputs.

use super::node::{div, heading, img, span, Element, Node, Style};
use super::theme;
use crate::city::{City, TabId};
use serde_json::Value;

/// Element id of the page container navigation replaces
pub const TAB_CONTENT_ID: &str = "tab-content";
pub const CITY_SELECTOR_ID: &str = "city-selector";
pub const SELECTED_CITY_STORE_ID: &str = "selected-city";

/// Sidebar navigation: home link plus one link per topic
pub fn sidebar() -> Node {
    let home = Element::new("a")
        .id(TabId::Home.element_id())
        .class("nav-home")
        .attr("href", "#")
        .attr("data-component", "button")
        .child(img("/assets/logos/home_button.svg", "Home").class("nav-home-icon"))
        .child(span("Home"));

    let links = TabId::topics().into_iter().map(|tab| {
        Element::new("a")
            .id(tab.element_id())
            .class("nav-tab")
            .attr("href", "#")
            .attr("data-component", "button")
            .text(tab.label())
    });

    Element::new("nav")
        .class("sidebar")
        .child(home)
        .children(links)
        .into()
}

/// Partner logos
pub fn footer() -> Node {
    let logos = [
        ("/assets/logos/DeSIRA.png", "DeSIRA", "60px"),
        ("/assets/logos/IFAD.png", "IFAD", "65px"),
        ("/assets/logos/Rikolto.png", "Rikolto", "40px"),
        ("/assets/logos/RyanInstitute.png", "Ryan Institute", "60px"),
    ];
    Element::new("footer")
        .class("footer")
        .children(
            logos
                .iter()
                .map(|(src, alt, height)| img(src, alt).style(Style::new().set("height", *height))),
        )
        .into()
}

/// City dropdown; tab pages carry a hidden one so navigation keeps the city
pub fn city_selector(selected: City, visible: bool) -> Node {
    let options: Vec<(String, String)> = City::all()
        .iter()
        .map(|c| (format!("📍 {}", c.display_name()), c.as_str().to_string()))
        .collect();

    let mut wrapper = div().class("city-selector");
    if !visible {
        wrapper = wrapper.style(Style::new().set("display", "none"));
    }
    wrapper
        .child(Element::new("label").attr("for", CITY_SELECTOR_ID).text("City:"))
        .child(dropdown(CITY_SELECTOR_ID, &options, &[selected.as_str()], false))
        .into()
}

/// Client-side store holding the selected city
pub fn selected_city_store(city: City) -> Node {
    store(SELECTED_CITY_STORE_ID, &Value::String(city.as_str().to_string()))
}

/// Hidden JSON value round-tripped through callbacks
pub fn store(id: &str, data: &Value) -> Node {
    Element::new("script")
        .id(id)
        .attr("type", "application/json")
        .attr("data-component", "store")
        .text(data.to_string())
        .into()
}

/// `<select>`; `selected` holds one value, or several when `multi`
pub fn dropdown(id: &str, options: &[(String, String)], selected: &[&str], multi: bool) -> Element {
    let mut select = Element::new("select")
        .id(id)
        .class("dropdown")
        .attr("data-component", "dropdown");
    if multi {
        select = select.attr("multiple", "multiple");
    }
    select.children(options.iter().map(|(label, value)| {
        let mut option = Element::new("option").attr("value", value.as_str());
        if selected.contains(&value.as_str()) {
            option = option.attr("selected", "selected");
        }
        option.text(label.as_str())
    }))
}

/// Range slider with a tick per mark
pub fn slider(id: &str, min: i32, max: i32, step: i32, value: i32, marks: &[i32]) -> Node {
    let list_id = format!("{}-marks", id);
    div()
        .class("slider")
        .child(
            Element::new("input")
                .id(id)
                .attr("type", "range")
                .attr("min", min.to_string())
                .attr("max", max.to_string())
                .attr("step", step.to_string())
                .attr("value", value.to_string())
                .attr("list", list_id.as_str())
                .attr("data-component", "slider"),
        )
        .child(
            Element::new("datalist").id(list_id.as_str()).children(
                marks
                    .iter()
                    .map(|m| Element::new("option").attr("value", m.to_string()).attr("label", m.to_string())),
            ),
        )
        .child(div().class("slider-marks").children(marks.iter().map(|m| span(m.to_string()))))
        .into()
}

/// Button counting clicks
pub fn button(id: &str, style: Style) -> Element {
    Element::new("button")
        .id(id)
        .attr("type", "button")
        .attr("data-component", "button")
        .style(style)
}

/// Container the runtime draws a Plotly figure into
pub fn graph(id: &str) -> Element {
    div().id(id).class("graph").attr("data-component", "graph")
}

/// A table column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub width: Option<u32>,
}

impl Column {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            width: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn width(mut self, px: u32) -> Self {
        self.width = Some(px);
        self
    }
}

/// Paginated table; `data` outputs replace its rows client-side
pub fn data_table(id: &str, columns: &[Column], rows: &[Value], page_size: usize) -> Node {
    let column_meta: Vec<Value> = columns
        .iter()
        .map(|c| serde_json::json!({ "id": c.id, "name": c.name, "width": c.width }))
        .collect();

    let header = Element::new("tr").children(columns.iter().map(|c| {
        let mut th = Element::new("th").text(c.name.as_str());
        if let Some(px) = c.width {
            th = th.style(Style::new().set("width", format!("{}px", px)));
        }
        th
    }));

    let body = Element::new("tbody").children(rows.iter().map(|row| {
        Element::new("tr").children(columns.iter().map(|c| {
            let cell = match &row[c.id.as_str()] {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            Element::new("td").child(cell_content(&cell))
        }))
    }));

    div()
        .id(id)
        .class("data-table")
        .attr("data-component", "table")
        .attr("data-page-size", page_size.to_string())
        .attr("data-columns", Value::Array(column_meta).to_string())
        .child(
            Element::new("table")
                .child(Element::new("thead").child(header))
                .child(body),
        )
        .into()
}

/// A cell's text, turning `[label](url)` into a link
pub fn cell_content(text: &str) -> Node {
    if let Some(rest) = text.strip_prefix('[') {
        if let Some((label, tail)) = rest.split_once("](") {
            if let Some(url) = tail.strip_suffix(')') {
                return Element::new("a")
                    .attr("href", url)
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .text(label)
                    .into();
            }
        }
    }
    Node::text(text)
}

/// White card with an optional header
pub fn card(header: Option<&str>, body: Vec<Node>) -> Element {
    let mut card = div().class("card");
    if let Some(title) = header {
        card = card.child(div().class("card-header").child(heading(3, title).class("header")));
    }
    card.child(div().class("card-body").children(body))
}

/// Page title banner
pub fn title_banner(title: &str) -> Node {
    div()
        .class("card title-banner")
        .child(heading(2, title).class("header"))
        .into()
}

/// Headline KPI card; `value_id` lets callbacks rewrite the value text
pub fn kpi_card(title: &str, value_id: &str, value: &str) -> Node {
    div()
        .class("kpi-card")
        .child(heading(5, title).class("kpi-title"))
        .child(heading(1, value).id(value_id).class("kpi-value"))
        .into()
}

/// City vs national comparison of a nutrition outcome
pub fn nutrition_kpi_card(outcome: &str, city_value: f64, national_value: f64, lower_is_better: bool) -> Node {
    let difference = city_value - national_value;
    let better = if lower_is_better { difference < 0.0 } else { difference > 0.0 };

    let (color, arrow, status) = match (better, lower_is_better) {
        (true, true) => (theme::DARK_GREEN, "↓", "better"),
        (true, false) => (theme::DARK_GREEN, "↑", "better"),
        (false, true) => (theme::RED, "↑", "worse"),
        (false, false) => (theme::RED, "↓", "worse"),
    };
    let colored = |text: String| span(text).style(Style::new().set("color", color));

    div()
        .class("kpi-card nutrition-kpi")
        .child(heading(5, outcome).class("kpi-title"))
        .child(
            div()
                .class("kpi-row")
                .child(span("Addis Ababa: ").class("kpi-caption"))
                .child(colored(format!("{}%", city_value)).class("kpi-number")),
        )
        .child(
            div()
                .class("kpi-row")
                .child(span("National: ").class("kpi-caption"))
                .child(span(format!("{}%", national_value)).class("kpi-number kpi-muted")),
        )
        .child(
            div()
                .class("kpi-diff")
                .child(colored(format!("{} ", arrow)).class("kpi-arrow"))
                .child(colored(format!("{:.1}%", difference.abs())).class("kpi-diff-value"))
                .child(span(format!(" {}", status)).class("kpi-caption")),
        )
        .into()
}

/// Options from `(label, value)` string pairs
pub fn options<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_ids() {
        let html = sidebar().render();
        assert!(html.contains(r#"id="tab-home""#));
        assert!(html.contains(r#"id="tab-12-behaviour""#));
    }

    #[test]
    fn test_hidden_city_selector() {
        let node = city_selector(City::Hanoi, false);
        let html = node.render();

        assert!(html.contains("display: none"));
        assert!(html.contains(r#"<option value="hanoi" selected="selected">"#));
    }

    #[test]
    fn test_store_escapes_script_close() {
        let html = store("s", &Value::String("</script>".to_string())).render();
        assert!(!html.contains("\"</script>\""));
    }

    #[test]
    fn test_nutrition_kpi_better() {
        let card = nutrition_kpi_card("Stunting", 13.9, 40.9, true);
        let text = card.text_content();

        assert!(text.contains("↓"));
        assert!(text.contains("27.0%"));
        assert!(text.contains("better"));
        assert!(card.render().contains(theme::DARK_GREEN));
    }

    #[test]
    fn test_nutrition_kpi_worse() {
        let card = nutrition_kpi_card("Overweight", 35.8, 11.4, true);
        let text = card.text_content();

        assert!(text.contains("↑"));
        assert!(text.contains("24.4%"));
        assert!(text.contains("worse"));
    }

    #[test]
    fn test_cell_links() {
        let link = cell_content("[Link Available](https://a.example)").render();
        assert_eq!(
            link,
            r#"<a href="https://a.example" target="_blank" rel="noopener">Link Available</a>"#
        );
        assert_eq!(cell_content("--").render(), "--");
    }

    #[test]
    fn test_data_table_rows() {
        let rows = vec![serde_json::json!({"Name": "A", "N": 3})];
        let html = data_table("t", &[Column::new("Name"), Column::new("N").named("Count")], &rows, 14).render();

        assert!(html.contains("<th>Count</th>"));
        assert!(html.contains("<td>3</td>"));
        assert!(html.contains(r#"data-page-size="14""#));
    }
}
