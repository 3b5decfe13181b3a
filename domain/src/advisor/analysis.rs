//! Deterministic requirement analysis (Analyze phase)

use super::kind::AdvisorKind;
use crate::music::{ConcertType, DurationBucket, Requirements, SkillLevel};
use serde::{Deserialize, Serialize};

/// Ensemble size category derived from the instrument count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleType {
    Solo,
    Duo,
    Chamber,
    Orchestral,
}

impl EnsembleType {
    pub fn for_instrument_count(count: usize) -> Self {
        match count {
            0 | 1 => EnsembleType::Solo,
            2 => EnsembleType::Duo,
            3 | 4 => EnsembleType::Chamber,
            _ => EnsembleType::Orchestral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnsembleType::Solo => "solo",
            EnsembleType::Duo => "duo",
            EnsembleType::Chamber => "chamber",
            EnsembleType::Orchestral => "orchestral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStructure {
    SingleSet,
    SingleSetExtended,
    TwoSets,
}

impl ProgramStructure {
    pub fn for_bucket(bucket: DurationBucket) -> Self {
        match bucket {
            DurationBucket::Short => ProgramStructure::SingleSet,
            DurationBucket::Standard => ProgramStructure::SingleSetExtended,
            DurationBucket::Extended => ProgramStructure::TwoSets,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStructure::SingleSet => "single set",
            ProgramStructure::SingleSetExtended => "extended single set",
            ProgramStructure::TwoSets => "two sets with intermission",
        }
    }
}

/// Constraints every advisor derives the same way from the requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConstraints {
    /// 1-10 scale
    pub max_difficulty_tier: u8,
    pub duration_bucket: DurationBucket,
    pub max_piece_minutes: u32,
    pub recommended_piece_count: usize,
    pub ensemble: EnsembleType,
    pub warmup_minutes: u32,
    pub structure: ProgramStructure,
    pub tempo_progression: Vec<String>,
    pub energy_progression: Vec<String>,
    /// Percentage of the program at which the climax should land
    pub climax_at_percent: u8,
}

impl DerivedConstraints {
    pub fn from_requirements(requirements: &Requirements) -> Self {
        let bucket = requirements.duration_bucket();
        Self {
            max_difficulty_tier: requirements.skill_ceiling.max_difficulty_tier(),
            duration_bucket: bucket,
            max_piece_minutes: bucket.max_piece_minutes(),
            recommended_piece_count: bucket.recommended_piece_count(),
            ensemble: EnsembleType::for_instrument_count(requirements.instruments.len()),
            warmup_minutes: warmup_minutes(&requirements.instruments),
            structure: ProgramStructure::for_bucket(bucket),
            tempo_progression: to_strings(tempo_progression(bucket)),
            energy_progression: to_strings(energy_progression(bucket)),
            climax_at_percent: match bucket {
                DurationBucket::Short => 75,
                DurationBucket::Standard => 70,
                DurationBucket::Extended => 65,
            },
        }
    }
}

/// One advisor's reading of the requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorAnalysis {
    pub advisor: AdvisorKind,
    pub notes: String,
    pub constraints: DerivedConstraints,
}

impl AdvisorAnalysis {
    pub fn analyze(kind: AdvisorKind, requirements: &Requirements) -> Self {
        let constraints = DerivedConstraints::from_requirements(requirements);
        let notes = match kind {
            AdvisorKind::Curator => curator_notes(requirements),
            AdvisorKind::Technical => technical_notes(requirements, &constraints),
            AdvisorKind::Flow => flow_notes(requirements, &constraints),
        };
        Self {
            advisor: kind,
            notes,
            constraints,
        }
    }

    /// Compact text form used when sharing analyses with peers
    pub fn summary(&self) -> String {
        format!("{} ({}): {}", self.advisor.name(), self.advisor.role(), self.notes)
    }
}

fn curator_notes(requirements: &Requirements) -> String {
    let mut notes = Vec::new();

    notes.push(match requirements.concert_type {
        ConcertType::ClassicalRecital => {
            "Focus on classical repertoire with a clear difficulty progression"
        }
        ConcertType::ChamberMusic => "Emphasize ensemble pieces with good balance between parts",
        ConcertType::SoloPerformance => "Pick pieces that showcase individual technique and expression",
        ConcertType::JazzConcert => "Mix standards across ballad, medium and up-tempo feels",
        ConcertType::FolkConcert => "Favor singable traditional tunes with familiar melodies",
    });

    match requirements.skill_ceiling {
        SkillLevel::Beginner => {
            notes.push("Choose pieces with simple technical demands and clear structure")
        }
        SkillLevel::Advanced | SkillLevel::Professional => {
            notes.push("Include challenging pieces that demonstrate virtuosity")
        }
        SkillLevel::Intermediate => {}
    }

    if requirements.target_duration_minutes < 30 {
        notes.push("Select shorter pieces to fit the time limit");
    } else if requirements.target_duration_minutes > 90 {
        notes.push("Include longer works and plan an intermission");
    }

    notes.join("; ")
}

fn technical_notes(requirements: &Requirements, constraints: &DerivedConstraints) -> String {
    format!(
        "Max difficulty {}/10 for {} performers; pieces up to {} min, about {} pieces; \
         {} ensemble; allow {} min warm-up; transitions: {}",
        constraints.max_difficulty_tier,
        requirements.skill_ceiling,
        constraints.max_piece_minutes,
        constraints.recommended_piece_count,
        constraints.ensemble.as_str(),
        constraints.warmup_minutes,
        transition_difficulty(requirements.skill_ceiling),
    )
}

fn flow_notes(requirements: &Requirements, constraints: &DerivedConstraints) -> String {
    format!(
        "{} structure; tempo {}; energy {}; climax at {}% of the program; {}",
        constraints.structure.as_str(),
        constraints.tempo_progression.join(" > "),
        constraints.energy_progression.join(" > "),
        constraints.climax_at_percent,
        opening_strategy(requirements.concert_type),
    )
}

fn warmup_minutes(instruments: &[String]) -> u32 {
    let total: u32 = instruments
        .iter()
        .map(|i| match i.to_lowercase().as_str() {
            "violin" | "viola" | "cello" | "bass" => 10,
            "piano" => 5,
            _ => 7,
        })
        .sum();
    total.min(20)
}

fn transition_difficulty(skill: SkillLevel) -> &'static str {
    match skill {
        SkillLevel::Beginner => "simple key relationships and similar tempos",
        SkillLevel::Intermediate => "some key changes and tempo variation",
        SkillLevel::Advanced => "complex modulations and dramatic tempo changes",
        SkillLevel::Professional => "any transition",
    }
}

fn opening_strategy(concert: ConcertType) -> &'static str {
    match concert {
        ConcertType::ClassicalRecital => "open with an accessible, technically secure piece",
        ConcertType::ChamberMusic => "open with a piece that shows group cohesion",
        ConcertType::SoloPerformance => "open with a piece that shows technical command",
        ConcertType::JazzConcert | ConcertType::FolkConcert => {
            "open with an engaging, audience-friendly piece"
        }
    }
}

fn tempo_progression(bucket: DurationBucket) -> &'static [&'static str] {
    match bucket {
        DurationBucket::Short => &["moderate", "slow", "fast", "moderate"],
        DurationBucket::Standard => &["moderate", "slow", "fast", "moderate", "slow", "fast"],
        DurationBucket::Extended => &[
            "moderate", "slow", "fast", "moderate", "slow", "fast", "moderate", "fast",
        ],
    }
}

fn energy_progression(bucket: DurationBucket) -> &'static [&'static str] {
    match bucket {
        DurationBucket::Short => &["building", "sustained", "peak", "resolution"],
        DurationBucket::Standard => &[
            "building", "sustained", "peak", "resolution", "building", "peak",
        ],
        DurationBucket::Extended => &[
            "building",
            "sustained",
            "peak",
            "resolution",
            "building",
            "sustained",
            "peak",
            "resolution",
        ],
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirements(minutes: u32, instruments: &[&str], skill: SkillLevel) -> Requirements {
        Requirements::new(ConcertType::JazzConcert, minutes)
            .with_instruments(instruments.iter().map(|s| s.to_string()).collect())
            .with_skill(skill)
    }

    #[test]
    fn test_technical_constraints() {
        let req = requirements(25, &["piano"], SkillLevel::Beginner);
        let c = DerivedConstraints::from_requirements(&req);
        assert_eq!(c.max_difficulty_tier, 3);
        assert_eq!(c.max_piece_minutes, 8);
        assert_eq!(c.recommended_piece_count, 4);
        assert_eq!(c.ensemble, EnsembleType::Solo);
        assert_eq!(c.warmup_minutes, 5);
        assert_eq!(c.climax_at_percent, 75);
    }

    #[test]
    fn test_warmup_is_capped() {
        let req = requirements(
            90,
            &["violin", "viola", "cello", "bass"],
            SkillLevel::Professional,
        );
        let c = DerivedConstraints::from_requirements(&req);
        assert_eq!(c.warmup_minutes, 20);
        assert_eq!(c.ensemble, EnsembleType::Chamber);
        assert_eq!(c.structure, ProgramStructure::TwoSets);
        assert_eq!(c.tempo_progression.len(), 8);
    }

    #[test]
    fn test_notes_differ_per_advisor() {
        let req = requirements(45, &["piano", "bass"], SkillLevel::Intermediate);
        let curator = AdvisorAnalysis::analyze(AdvisorKind::Curator, &req);
        let technical = AdvisorAnalysis::analyze(AdvisorKind::Technical, &req);
        let flow = AdvisorAnalysis::analyze(AdvisorKind::Flow, &req);

        assert!(curator.notes.contains("standards"));
        assert!(technical.notes.contains("duo ensemble"));
        assert!(flow.notes.contains("climax at 70%"));
        assert_eq!(curator.constraints, technical.constraints);
    }
}
