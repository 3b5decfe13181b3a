//! Participant preferences: records, vocabularies and text heuristics

pub mod extractor;
pub mod record;
pub mod request;
pub mod vocabulary;

pub use extractor::PreferenceExtractor;
pub use record::{MoodPreference, PreferenceRecord, TempoPreference};
pub use request::RequirementsParser;
