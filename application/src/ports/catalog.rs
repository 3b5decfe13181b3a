//! Static catalog port
//!
//! Seed repertoire and the lists of supported concert types, skill levels
//! and instruments. The data is external to the engine.

use serde::{Deserialize, Serialize};
use setlist_domain::core::string::title_case;
use setlist_domain::{CandidatePiece, ConcertType, SkillLevel};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("No catalog pieces for {0}")]
    Empty(ConcertType),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// One row of a catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Seed repertoire lookup
pub trait StaticCatalog: Send + Sync {
    /// Candidate pieces for a concert type
    fn pieces(&self, concert_type: ConcertType) -> Result<Vec<CandidatePiece>, CatalogError>;

    /// Supported instruments
    fn instruments(&self) -> Vec<CatalogEntry>;

    fn concert_types(&self) -> Vec<CatalogEntry> {
        ConcertType::all()
            .iter()
            .map(|c| {
                CatalogEntry::new(
                    c.as_str(),
                    c.display_name(),
                    format!("{} (typically {})", c.description(), c.typical_duration()),
                )
            })
            .collect()
    }

    fn skill_levels(&self) -> Vec<CatalogEntry> {
        SkillLevel::all()
            .iter()
            .map(|s| {
                CatalogEntry::new(
                    s.as_str(),
                    title_case(s.as_str()),
                    format!("{} {}", s.description(), s.technical_demands()),
                )
            })
            .collect()
    }
}
