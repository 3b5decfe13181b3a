//! Advisor data: variants, analyses, evaluations, reply parsing and fallbacks

pub mod analysis;
pub mod evaluation;
mod fallback;
pub mod kind;
pub mod proposal;

pub use analysis::{AdvisorAnalysis, DerivedConstraints, EnsembleType, ProgramStructure};
pub use evaluation::{Evaluation, Recommendation, parse_evaluation};
pub use kind::AdvisorKind;
pub use proposal::parse_piece_list;
