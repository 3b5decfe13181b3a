//! Configuration file loading for setlist-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SETLIST_`-prefixed environment variables (`SETLIST_COMPLETION__MODEL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./setlist.toml` or `./.setlist.toml`
//! 4. Global: `$XDG_CONFIG_HOME/setlist-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileCompletionConfig, FileConfig, FileCouncilConfig, FileOutputConfig,
    ProviderKind,
};
pub use loader::ConfigLoader;
