//! Concert type value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Kind of concert a program is designed for (Value Object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcertType {
    #[default]
    JazzConcert,
    ClassicalRecital,
    ChamberMusic,
    SoloPerformance,
    FolkConcert,
}

impl ConcertType {
    pub fn all() -> [ConcertType; 5] {
        [
            ConcertType::ClassicalRecital,
            ConcertType::ChamberMusic,
            ConcertType::SoloPerformance,
            ConcertType::JazzConcert,
            ConcertType::FolkConcert,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcertType::JazzConcert => "jazz_concert",
            ConcertType::ClassicalRecital => "classical_recital",
            ConcertType::ChamberMusic => "chamber_music",
            ConcertType::SoloPerformance => "solo_performance",
            ConcertType::FolkConcert => "folk_concert",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConcertType::JazzConcert => "Jazz Concert",
            ConcertType::ClassicalRecital => "Classical Recital",
            ConcertType::ChamberMusic => "Chamber Music",
            ConcertType::SoloPerformance => "Solo Performance",
            ConcertType::FolkConcert => "Folk Concert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConcertType::JazzConcert => "Jazz and contemporary music",
            ConcertType::ClassicalRecital => "Traditional classical music recital",
            ConcertType::ChamberMusic => "Small ensemble performance",
            ConcertType::SoloPerformance => "Individual instrument showcase",
            ConcertType::FolkConcert => "Traditional and folk music",
        }
    }

    pub fn typical_duration(&self) -> &'static str {
        match self {
            ConcertType::JazzConcert | ConcertType::ClassicalRecital => "60-90 minutes",
            ConcertType::ChamberMusic | ConcertType::FolkConcert => "45-75 minutes",
            ConcertType::SoloPerformance => "30-60 minutes",
        }
    }

    pub fn typical_instruments(&self) -> &'static [&'static str] {
        match self {
            ConcertType::JazzConcert => &["piano", "saxophone", "trumpet", "bass", "drums"],
            ConcertType::ClassicalRecital => &["piano", "violin", "cello", "voice"],
            ConcertType::ChamberMusic => {
                &["piano", "violin", "cello", "viola", "flute", "clarinet"]
            }
            ConcertType::SoloPerformance => &["piano", "violin", "cello", "guitar", "flute"],
            ConcertType::FolkConcert => &["guitar", "violin", "banjo", "voice", "accordion"],
        }
    }
}

impl std::fmt::Display for ConcertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConcertType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "jazz_concert" | "jazz" => Ok(ConcertType::JazzConcert),
            "classical_recital" | "classical" | "recital" => Ok(ConcertType::ClassicalRecital),
            "chamber_music" | "chamber" => Ok(ConcertType::ChamberMusic),
            "solo_performance" | "solo" => Ok(ConcertType::SoloPerformance),
            "folk_concert" | "folk" => Ok(ConcertType::FolkConcert),
            _ => Err(DomainError::UnknownConcertType(s.to_string())),
        }
    }
}
