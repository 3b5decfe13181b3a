//! Group collaboration: collection sessions, aggregation and chat messages

pub mod aggregate;
pub mod messages;
pub mod session;

pub use aggregate::{GroupPreferences, MAX_COMPATIBILITY};
pub use messages::{PreferenceQuestions, broadcast_message, completion_message, waiting_message};
pub use session::{CollectionSession, SessionId, SessionOrigin, SessionSnapshot, SessionStatus};
