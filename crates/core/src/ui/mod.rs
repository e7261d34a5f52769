//! Shared UI components
//!
//! Platform-agnostic rendering of the catalog panel and sign-in modal using egui.
//! The web app owns the state and performs the actions these functions return.

mod auth_modal;
mod catalog_grid;

pub use auth_modal::*;
pub use catalog_grid::*;
