//! API Routes
//!
//! Route handlers organized by functionality.

pub mod callback;
pub mod health;
pub mod pages;
