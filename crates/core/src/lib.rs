//! Core shared types and logic for PlayDeck
//!
//! This crate contains:
//! - Data models and error types
//! - The catalog pipeline: record parser, loader, filter engine, store
//! - Identity provider interface and sign-in modal logic
//! - Game launch session
//! - Shared UI components (with `ui` feature)

pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod launch;
pub mod loader;
pub mod models;
pub mod parser;
pub mod store;
pub mod testing;

#[cfg(feature = "ui")]
pub mod ui;

pub use config::AppConfig;
pub use error::*;
pub use filter::compute_visible;
pub use launch::{LaunchEffect, LaunchSession, LaunchState};
pub use loader::{load_catalog, CatalogSource, LoadOutcome, LoadReport, SkippedRow};
pub use models::*;
pub use parser::parse_line;
pub use store::{CatalogStore, LoadTicket, ViewState};

#[cfg(feature = "ui")]
pub use ui::*;
