//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`output_format::OutputFormat`]: how results are rendered
//! - [`string`]: small text helpers used by prompts and messages

pub mod error;
pub mod output_format;
pub mod string;
