//! Presentation layer for setlist-council
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    CollectArgs, Cli, Command, DesignArgs, OutputFormat, ParticipantArg, RequirementArgs,
};
pub use config::{OutputConfig, ProgressMode};
pub use output::console::ConsoleFormatter;
pub use output::listing::{CatalogListing, CollectTranscript, ParticipantReply};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
