//! # EcoFoodSystems Dashboard
//!
//! Food-system indicators for Addis Ababa and Hà Nội, served as a reactive
//! web dashboard.
//!
//! ## Modules
//!
//! - [`data`]: Dataset loading, loaded once into an immutable [`Datasets`]
//! - [`callbacks`]: Reactive callbacks turning widget values into outputs
//! - [`view`]: View tree, Plotly figures and reusable UI fragments
//! - [`pages`]: Landing page and per-city topic pages
//! - [`api`]: HTTP server with Axum
//!
//! ## Request flow
//!
//! The entry point serves the landing page. When the user changes a widget,
//! the browser runtime posts the changed property and the current widget
//! values to `/_callback`; the [`Registry`] runs every callback listening to
//! it and returns the outputs to apply.

pub mod api;
pub mod callbacks;
pub mod city;
pub mod config;
pub mod data;
pub mod logging;
pub mod pages;
pub mod view;

pub use api::{build_router, serve, ApiError, AppState};
pub use callbacks::{CallbackError, CallbackRequest, Output, Outputs, Registry};
pub use city::{City, TabId};
pub use config::{Config, ConfigError, LogFormat};
pub use data::{DataError, Datasets};
