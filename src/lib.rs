//! Hearth - personal multi-currency household budgeting
//!
//! This library backs the `hearth` binary. It tracks incomes and two
//! regional ledgers of expense and savings items, converts the secondary
//! region's amounts through a configurable exchange rate, and derives
//! monthly summaries, spending timelines, and a running-balance statement
//! from the stored document.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (incomes, line items, users)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Pure aggregation over a document snapshot
//! - `remote`: Drive-backed remote mirror of the budget document
//! - `server`: Static hosting for the browser bundle
//! - `hosting`: systemd user-unit install/uninstall
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth_budget::config::{paths::HearthPaths, settings::Settings};
//!
//! let paths = HearthPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hosting;
pub mod models;
pub mod remote;
pub mod reports;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{HearthError, HearthResult};
