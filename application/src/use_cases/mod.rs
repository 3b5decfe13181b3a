//! Use cases (application services)

pub mod collect_preferences;
pub mod design_program;
