//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod catalog;
pub mod progress;
pub mod session_store;
pub mod text_completion;
