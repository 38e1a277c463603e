//! Command-line argument definitions.

mod definition;

pub use definition::Args;
