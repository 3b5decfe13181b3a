//! Prompt domain
//!
//! Templates for the text-completion calls each advisor makes.

mod template;

pub use template::PromptTemplate;
