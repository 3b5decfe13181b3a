//! Domain layer for setlist-council
//!
//! This crate contains the data model and every deterministic rule of the
//! setlist engine. It performs no I/O and knows nothing about the
//! text-completion service, catalogs or session storage.
//!
//! # Core Concepts
//!
//! ## Advisor council
//!
//! Three advisors (Curator, Technical, Flow) analyze requirements, propose
//! candidate pieces and score each other's proposals. Their scores are not
//! calibrated against each other; a piece's aggregate is the plain mean.
//!
//! ## Group collection
//!
//! A [`CollectionSession`] gathers one [`PreferenceRecord`] per invited
//! participant. Once every participant has answered, the group's preferences
//! are aggregated and a collaborative program is selected from a catalog.
//!
//! ## Never fail empty
//!
//! Degraded paths are explicit default constructors:
//! [`Evaluation::fallback`], [`AdvisorKind::fallback_pieces`] and
//! [`Program::placeholder`].

pub mod advisor;
pub mod collaboration;
pub mod core;
pub mod council;
pub mod music;
pub mod preference;
pub mod prompt;
pub mod synthesis;

// Re-export commonly used types
pub use advisor::{
    AdvisorAnalysis, AdvisorKind, DerivedConstraints, EnsembleType, Evaluation, ProgramStructure,
    Recommendation, parse_evaluation, parse_piece_list,
};
pub use collaboration::{
    CollectionSession, GroupPreferences, PreferenceQuestions, SessionId, SessionOrigin,
    SessionSnapshot, SessionStatus, broadcast_message, completion_message, waiting_message,
};
pub use core::error::DomainError;
pub use core::output_format::OutputFormat;
pub use council::{Phase, PhaseNote};
pub use music::{
    AdvisorContribution, CandidatePiece, ConcertType, DurationBucket, Program, ProgramPiece,
    Requirements, SelectionRule, SkillLevel,
};
pub use preference::{
    MoodPreference, PreferenceExtractor, PreferenceRecord, RequirementsParser, TempoPreference,
};
pub use prompt::PromptTemplate;
pub use synthesis::{ProgramSynthesizer, SynthesisError};
