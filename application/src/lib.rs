//! Application layer for setlist-council
//!
//! This crate contains use cases, port definitions, the advisor capability
//! and application configuration. It depends only on the domain layer.

pub mod advisors;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use advisors::{Advisor, AdvisorError, LlmAdvisor};
pub use config::CouncilParams;
pub use ports::{
    catalog::{CatalogEntry, CatalogError, StaticCatalog},
    progress::{NoProgress, ProgressNotifier},
    session_store::{SessionHandle, SessionStore},
    text_completion::{CompletionError, TextCompletion},
};
pub use use_cases::collect_preferences::{
    CollectError, PreferenceCollector, StartSessionInput, StartedSession, SubmitOutcome,
    SubmitStatus,
};
pub use use_cases::design_program::{
    AdvisorSuggestions, DesignError, DesignProgramUseCase, DesignReport,
};
