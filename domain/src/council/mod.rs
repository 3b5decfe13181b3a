//! Advisor council pipeline vocabulary

pub mod phase;

pub use phase::{Phase, PhaseNote};
