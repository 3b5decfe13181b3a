//! Built-in seed repertoire
//!
//! Serves the collaborative path and the `catalog` listings. Solo
//! performances draw from the classical table.

mod data;

use data::{CHAMBER, CLASSICAL, FOLK, INSTRUMENTS, JAZZ, Row};
use setlist_application::{CatalogEntry, CatalogError, StaticCatalog};
use setlist_domain::core::string::title_case;
use setlist_domain::{CandidatePiece, ConcertType};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    fn rows(concert_type: ConcertType) -> &'static [Row] {
        match concert_type {
            ConcertType::JazzConcert => JAZZ,
            ConcertType::ClassicalRecital | ConcertType::SoloPerformance => CLASSICAL,
            ConcertType::ChamberMusic => CHAMBER,
            ConcertType::FolkConcert => FOLK,
        }
    }
}

fn to_piece(row: &Row, concert_type: ConcertType) -> CandidatePiece {
    let (title, composer, minutes, genre, style, difficulty, key) = *row;
    CandidatePiece::new(title, composer)
        .with_duration(minutes)
        .with_genre(genre)
        .with_style(style)
        .with_difficulty(difficulty)
        .with_key(key)
        .with_rationale(format!(
            "Standard {} repertoire",
            concert_type.display_name().to_lowercase()
        ))
}

impl StaticCatalog for BuiltinCatalog {
    fn pieces(&self, concert_type: ConcertType) -> Result<Vec<CandidatePiece>, CatalogError> {
        let pieces: Vec<CandidatePiece> = Self::rows(concert_type)
            .iter()
            .map(|row| to_piece(row, concert_type))
            .collect();
        if pieces.is_empty() {
            return Err(CatalogError::Empty(concert_type));
        }
        Ok(pieces)
    }

    fn instruments(&self) -> Vec<CatalogEntry> {
        INSTRUMENTS
            .iter()
            .map(|(id, name, family)| {
                CatalogEntry::new(*id, *name, format!("{} instrument", title_case(family)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_domain::SkillLevel;

    #[test]
    fn test_every_concert_type_has_pieces() {
        let catalog = BuiltinCatalog::new();
        for concert_type in ConcertType::all() {
            let pieces = catalog.pieces(concert_type).unwrap();
            assert!(!pieces.is_empty(), "{:?}", concert_type);
            assert!(pieces.iter().all(|p| p.duration_minutes > 0));
            assert!(pieces.iter().all(|p| p.scores.is_empty()));
        }
    }

    #[test]
    fn test_jazz_table_carries_bebop_and_blues() {
        let pieces = BuiltinCatalog.pieces(ConcertType::JazzConcert).unwrap();
        assert_eq!(pieces.len(), 24);

        let confirmation = pieces.iter().find(|p| p.same_title("confirmation")).unwrap();
        assert_eq!(confirmation.genre, "bebop");
        assert_eq!(confirmation.difficulty, SkillLevel::Advanced);

        let blue_monk = pieces.iter().find(|p| p.same_title("Blue Monk")).unwrap();
        assert!(blue_monk.matches_hint("blues"));
        assert_eq!(blue_monk.duration_minutes, 4);
    }

    #[test]
    fn test_solo_performance_uses_classical_table() {
        let catalog = BuiltinCatalog;
        assert_eq!(
            catalog.pieces(ConcertType::SoloPerformance).unwrap(),
            catalog.pieces(ConcertType::ClassicalRecital).unwrap()
        );
    }

    #[test]
    fn test_folk_has_beginner_friendly_pieces() {
        let pieces = BuiltinCatalog.pieces(ConcertType::FolkConcert).unwrap();
        assert!(pieces.iter().any(|p| p.difficulty == SkillLevel::Beginner));
    }

    #[test]
    fn test_instrument_listing() {
        let instruments = BuiltinCatalog.instruments();
        let piano = instruments.iter().find(|e| e.id == "piano").unwrap();
        assert_eq!(piano.name, "Piano");
        assert_eq!(piano.description, "Keyboard instrument");
        assert!(instruments.iter().any(|e| e.id == "voice"));
    }
}
