//! Library entry for aurquery: the AUR search client core and its console host.
//!
//! The core is host-agnostic: [`logic::SearchSession`] runs one fetch and
//! publishes its status, [`logic::ResultView`] orders and projects it, and
//! hosts receive user selections through [`logic::NavigationBridge`].

pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod logic;
pub mod sources;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_utils;
