use crate::city::{City, TabId};
use crate::view::components::{button, city_selector, footer};
use crate::view::{div, heading, paragraph, theme, Node, Style};

pub const TITLE: &str = "EcoFoodSystems Dashboard";
pub const SUBTITLE: &str = "EcoFoodSystems takes a food systems research approach to enable transitions towards diets that are more sustainable, healthier and affordable for consumers in city regions";

/// Landing page: title, city selector and the grid of topic tiles over the
/// city's header photo
pub fn landing(city: City) -> Node {
    let tiles = TabId::topics().into_iter().map(|tab| {
        let style = Style::new()
            .set("background-color", city.tile_background(tab))
            .set("color", theme::BROWN)
            .set("border", format!("2px solid {}", theme::WHITE));
        div()
            .class("tile-card")
            .child(button(&tab.element_id(), style).class("landing-tile").text(tab.tile_label()))
    });

    div()
        .class("landing")
        .attr("data-city", city.as_str())
        .style(Style::new().set("background-image", format!("url('{}')", city.background_image())))
        .child(
            div()
                .class("landing-header")
                .child(heading(1, TITLE).class("landing-title"))
                .child(city_selector(city, true)),
        )
        .child(paragraph(SUBTITLE).class("landing-subtitle"))
        .child(div().class("tile-grid").children(tiles))
        .child(footer())
        .into()
}
