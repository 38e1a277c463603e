//! User configuration: `settings.conf` discovery, parsing and defaults.

mod parsing;
pub mod paths;
mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::{Settings, load_settings_from, parse_settings, settings};
