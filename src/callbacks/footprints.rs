//! Environmental footprint cards for a food group

use super::{Callback, CallbackResult, Inputs, Output};
use crate::data::{Datasets, LcaIndicator, LcaItem, LcaTable};
use crate::view::theme;
use crate::view::{div, heading, Element, Node, Style};

pub const FOOD_GROUP_SELECT_ID: &str = "food-group-select";
pub const FOOD_ITEMS_CONTAINER_ID: &str = "food-items-container";

pub fn callbacks() -> Vec<Callback> {
    vec![Callback {
        name: "update_food_items_grid",
        inputs: &["food-group-select.value"],
        states: &[],
        outputs: &["food-items-container.children"],
        initial: true,
        handler: update_food_items_grid,
    }]
}

fn update_food_items_grid(datasets: &Datasets, inputs: &Inputs) -> CallbackResult<Vec<Output>> {
    let group = inputs.str(&format!("{}.value", FOOD_GROUP_SELECT_ID))?;
    let lca = &datasets.addis.lca;

    let cards = lca.items_in(group).into_iter().map(|item| item_card(lca, item));
    Ok(vec![Output::fragment(cards)])
}

/// Card for one item: its name over a 2×2 grid of graded indicators
pub fn item_card(lca: &LcaTable, item: &LcaItem) -> Node {
    let [ghg, water, acidification, eutrophication] = LcaIndicator::all();
    let row = |a: LcaIndicator, b: LcaIndicator| {
        div()
            .class("lca-row")
            .child(mini_card(lca, item, a))
            .child(mini_card(lca, item, b))
    };

    div()
        .class("card lca-card")
        .child(
            div()
                .class("card-body")
                .child(heading(5, &item.item).class("lca-item"))
                .child(div().class("lca-grid").child(row(ghg, water)).child(row(acidification, eutrophication))),
        )
        .into()
}

fn mini_card(lca: &LcaTable, item: &LcaItem, indicator: LcaIndicator) -> Element {
    let value = item.value(indicator);
    let light = lca.grade(indicator, value);

    div()
        .class("lca-mini")
        .style(
            Style::new()
                .set("border", format!("2px solid {}", light.border()))
                .set("box-shadow", format!("0 2px 8px {}", light.shadow()))
                .set("background-color", theme::WHITE),
        )
        .attr("data-grade", format!("{:?}", light).to_lowercase())
        .child(div().class("lca-mini-title").text(indicator.title()))
        .child(div().class("lca-mini-value").text(indicator.format(value)))
        .child(div().class("lca-mini-unit").text(indicator.unit()))
}
