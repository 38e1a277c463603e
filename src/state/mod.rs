//! Value types shared by the session, the presenter and the RPC client.

pub mod types;

pub use types::{QueryField, ResultRecord, SortKey};
