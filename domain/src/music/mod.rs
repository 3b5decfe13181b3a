//! Music vocabulary: concert types, skill tiers, pieces, requirements and programs

pub mod concert;
pub mod piece;
pub mod program;
pub mod requirements;
pub mod skill;

pub use concert::ConcertType;
pub use piece::{CandidatePiece, DEFAULT_PIECE_MINUTES};
pub use program::{AdvisorContribution, Program, ProgramPiece, SelectionRule};
pub use requirements::{DEFAULT_TARGET_MINUTES, DurationBucket, MAX_TARGET_MINUTES, Requirements};
pub use skill::SkillLevel;
