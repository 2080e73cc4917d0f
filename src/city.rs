//! Per-city configuration
//!
//! Labels, header images, landing tile colors, which topic tabs each city has
//! content for, and map defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Landing tile background for a populated topic
pub const TILE_ACTIVE: &str = "rgba(255, 255, 255, 0.7)";
/// Landing tile background for a topic still in development
pub const TILE_INACTIVE: &str = "rgba(173, 181, 189, 0.7)";

/// Supported cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum City {
    #[default]
    Addis,
    Hanoi,
}

/// Initial map view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

impl City {
    pub fn all() -> &'static [City] {
        &[City::Addis, City::Hanoi]
    }

    /// Selector value and store token
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Addis => "addis",
            City::Hanoi => "hanoi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            City::Addis => "Addis Ababa",
            City::Hanoi => "Hà Nội",
        }
    }

    /// Landing page header photo
    pub fn background_image(&self) -> &'static str {
        match self {
            City::Addis => "/assets/photos/addis_header.png",
            City::Hanoi => "/assets/photos/hanoi_header.png",
        }
    }

    /// Tabs this city has content for
    pub fn populated_tabs(&self) -> &'static [TabId] {
        match self {
            City::Addis => &[
                TabId::Stakeholders,
                TabId::Supply,
                TabId::Sustainability,
                TabId::Poverty,
                TabId::Affordability,
                TabId::Policies,
                TabId::Nutrition,
                TabId::Footprints,
            ],
            City::Hanoi => &[
                TabId::Stakeholders,
                TabId::Supply,
                TabId::Poverty,
                TabId::Affordability,
                TabId::Nutrition,
            ],
        }
    }

    pub fn is_populated(&self, tab: TabId) -> bool {
        self.populated_tabs().contains(&tab)
    }

    /// Landing tile background for a tab
    pub fn tile_background(&self, tab: TabId) -> &'static str {
        let inactive: &[TabId] = match self {
            City::Addis => &[TabId::Labour, TabId::Resilience, TabId::Losses, TabId::Behaviour],
            City::Hanoi => &[
                TabId::Sustainability,
                TabId::Labour,
                TabId::Resilience,
                TabId::Losses,
                TabId::Policies,
                TabId::Footprints,
                TabId::Behaviour,
            ],
        };
        if inactive.contains(&tab) {
            TILE_INACTIVE
        } else {
            TILE_ACTIVE
        }
    }

    /// Polygon property holding the headline poverty score
    pub fn poverty_score_property(&self) -> &'static str {
        match self {
            City::Addis => "MPI",
            City::Hanoi => "Normalized",
        }
    }

    /// Fixed color range of the poverty choropleth
    pub fn poverty_range(&self) -> (f64, f64) {
        match self {
            City::Addis => (0.0, 50.0),
            City::Hanoi => (0.0, 1.0),
        }
    }

    /// Poverty map zoom when no district is selected
    pub fn poverty_default_zoom(&self) -> f64 {
        match self {
            City::Addis => 10.0,
            City::Hanoi => 7.75,
        }
    }

    /// Suffix carried by this city's widget ids
    pub fn id_suffix(&self) -> &'static str {
        match self {
            City::Addis => "",
            City::Hanoi => "-hanoi",
        }
    }

    /// Widget id with this city's suffix, e.g. `slider-hanoi`
    pub fn element_id(&self, base: &str) -> String {
        format!("{}{}", base, self.id_suffix())
    }
}

/// Affordability map opening view for Addis Ababa
pub const ADDIS_AFFORDABILITY_VIEW: MapView = MapView {
    lat: 9.0192,
    lon: 38.752,
    zoom: 11.0,
};

/// Zoom applied when a district is selected on a poverty map
pub const SELECTED_DISTRICT_ZOOM: f64 = 10.0;

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addis" => Ok(City::Addis),
            "hanoi" => Ok(City::Hanoi),
            other => Err(format!("unknown city '{}'", other)),
        }
    }
}

/// The twelve topic tabs, plus home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Home,
    Stakeholders,
    Supply,
    Sustainability,
    Poverty,
    Labour,
    Resilience,
    Affordability,
    Losses,
    Policies,
    Nutrition,
    Footprints,
    Behaviour,
}

impl TabId {
    /// Topic tabs in landing-grid order
    pub fn topics() -> [TabId; 12] {
        [
            TabId::Stakeholders,
            TabId::Supply,
            TabId::Sustainability,
            TabId::Poverty,
            TabId::Labour,
            TabId::Resilience,
            TabId::Affordability,
            TabId::Losses,
            TabId::Policies,
            TabId::Nutrition,
            TabId::Footprints,
            TabId::Behaviour,
        ]
    }

    /// Short key used by the layout endpoint
    pub fn key(&self) -> &'static str {
        match self {
            TabId::Home => "home",
            TabId::Stakeholders => "stakeholders",
            TabId::Supply => "supply",
            TabId::Sustainability => "sustainability",
            TabId::Poverty => "poverty",
            TabId::Labour => "labour",
            TabId::Resilience => "resilience",
            TabId::Affordability => "affordability",
            TabId::Losses => "losses",
            TabId::Policies => "policies",
            TabId::Nutrition => "nutrition",
            TabId::Footprints => "footprints",
            TabId::Behaviour => "behaviour",
        }
    }

    /// Element id of the tile / sidebar link, e.g. `tab-2-supply`
    pub fn element_id(&self) -> String {
        match self {
            TabId::Home => "tab-home".to_string(),
            tab => {
                let position = TabId::topics()
                    .iter()
                    .position(|t| t == tab)
                    .map(|p| p + 1)
                    .unwrap_or(0);
                format!("tab-{}-{}", position, tab.key())
            }
        }
    }

    /// Parse an element id back into a tab
    pub fn from_element_id(id: &str) -> Option<TabId> {
        if id == "tab-home" {
            return Some(TabId::Home);
        }
        TabId::topics().into_iter().find(|t| t.element_id() == id)
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            TabId::Home => "Home",
            TabId::Stakeholders => "Food Systems Stakeholders",
            TabId::Supply => "Food Flows, Supply & Value Chains",
            TabId::Sustainability => "Sustainability Metrics & Indicators",
            TabId::Poverty => "Multidimensional Poverty",
            TabId::Labour => "Labour, Skills & Green Jobs",
            TabId::Resilience => "Resilience to Food System Shocks",
            TabId::Affordability => "Dietary Mapping & Affordability",
            TabId::Losses => "Food Losses & Waste",
            TabId::Policies => "Food System Policies",
            TabId::Nutrition => "Health & Nutrition",
            TabId::Footprints => "Environmental Footprints of Food & Diets",
            TabId::Behaviour => "Behaviour Change Tool (AI Chatbot & Game)",
        }
    }

    /// Landing tile label; two topics read slightly differently there
    pub fn tile_label(&self) -> &'static str {
        match self {
            TabId::Sustainability => "Sustainability Metrics / Indicators",
            TabId::Labour => "Labour, skills & green jobs",
            other => other.label(),
        }
    }
}

impl FromStr for TabId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(TabId::Home)
            .chain(TabId::topics())
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("unknown tab '{}'", s))
    }
}
