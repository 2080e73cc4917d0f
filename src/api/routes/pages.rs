//! Page Routes
//!
//! - GET / - HTML entry point, `?city=hanoi` selects the city
//! - GET /static/dashboard.js - Browser runtime
//! - GET /static/dashboard.css - Stylesheet
//! - GET /api/v1/layout - View tree of a page as JSON

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LayoutQuery, LayoutResponse, PageQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::city::{City, TabId};
use crate::pages;

const DASHBOARD_JS: &str = include_str!("../../../assets/dashboard.js");
const DASHBOARD_CSS: &str = include_str!("../../../assets/dashboard.css");

fn parse_city(raw: Option<&str>) -> ApiResult<City> {
    match raw {
        None | Some("") => Ok(City::default()),
        Some(raw) => raw.parse().map_err(ApiError::Validation),
    }
}

/// GET /
pub async fn index(Query(query): Query<PageQuery>) -> ApiResult<Html<String>> {
    let city = parse_city(query.city.as_deref())?;
    Ok(Html(pages::document(city)))
}

/// GET /static/dashboard.js
pub async fn dashboard_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], DASHBOARD_JS)
}

/// GET /static/dashboard.css
pub async fn dashboard_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], DASHBOARD_CSS)
}

/// GET /api/v1/layout
///
/// Tabs a city has no content for resolve to its landing page, exactly as
/// navigation does.
pub async fn layout(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LayoutQuery>,
) -> ApiResult<Json<LayoutResponse>> {
    let city = parse_city(query.city.as_deref())?;
    let tab: TabId = match query.tab.as_deref() {
        None | Some("") => TabId::Home,
        Some(raw) => raw.parse().map_err(ApiError::Validation)?,
    };

    Ok(Json(LayoutResponse {
        city,
        tab,
        layout: pages::tab(city, tab, &state.datasets),
    }))
}
