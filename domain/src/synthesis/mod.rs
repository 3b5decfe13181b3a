//! Program synthesis: duration-bounded selection, ordering and rationale.
//!
//! Two selection paths share the [`ProgramSynthesizer`] entry point:
//!
//! | Path | Used by | Budget | Ordering |
//! |------|---------|--------|----------|
//! | scored | advisor pipeline | `target + 5` min, at most 8 pieces | first approachable piece opens |
//! | collaborative | group sessions | `0.9 × target` | start/end hints reserve the outer slots |

mod collaborative;
mod scored;

use thiserror::Error;

pub use collaborative::COLLABORATIVE_BUDGET_RATIO;
pub use scored::{DURATION_TOLERANCE_MINUTES, MAX_PROGRAM_PIECES};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("No candidate pieces to choose from")]
    NoCandidates,

    #[error("No candidate fits a {0} minute program")]
    NothingFits(u32),
}

/// Selection and ordering shared by the advisor pipeline and group sessions
pub struct ProgramSynthesizer;
