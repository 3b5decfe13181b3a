//! Infrastructure layer for setlist-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod completion;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use catalog::BuiltinCatalog;
pub use completion::{OfflineCompletion, OpenAiCompletion, build_completion};
pub use config::{
    ConfigIssue, ConfigLoader, FileCompletionConfig, FileConfig, FileCouncilConfig,
    FileOutputConfig, ProviderKind,
};
pub use session::InMemorySessionStore;
