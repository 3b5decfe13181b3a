//! Built-in repertoire tables

use setlist_domain::SkillLevel::{self, Advanced, Intermediate};

/// (title, composer, minutes, genre, style, difficulty, key)
pub(super) type Row = (&'static str, &'static str, u32, &'static str, &'static str, SkillLevel, &'static str);

pub(super) const JAZZ: &[Row] = &[
    ("Blue in Green", "Miles Davis", 5, "jazz", "ballad", Intermediate, "D minor"),
    ("Autumn Leaves", "Joseph Kosma", 4, "jazz", "ballad", Intermediate, "G minor"),
    ("All the Things You Are", "Jerome Kern", 6, "jazz", "ballad", Advanced, "A-flat major"),
    ("Body and Soul", "Johnny Green", 5, "jazz", "ballad", Intermediate, "D-flat major"),
    ("Round Midnight", "Thelonious Monk", 6, "jazz", "ballad", Advanced, "E-flat minor"),
    ("Blue Bossa", "Kenny Dorham", 4, "jazz", "medium", Intermediate, "C minor"),
    ("Cantaloupe Island", "Herbie Hancock", 5, "jazz", "medium", Intermediate, "F minor"),
    ("Song for My Father", "Horace Silver", 4, "jazz", "medium", Intermediate, "F minor"),
    ("Maiden Voyage", "Herbie Hancock", 6, "jazz", "medium", Advanced, "D dorian"),
    ("All Blues", "Miles Davis", 5, "jazz", "up-tempo", Intermediate, "G major"),
    ("So What", "Miles Davis", 6, "jazz", "up-tempo", Advanced, "D dorian"),
    ("Giant Steps", "John Coltrane", 5, "jazz", "up-tempo", Advanced, "B major"),
    ("Take Five", "Paul Desmond", 5, "jazz", "up-tempo", Intermediate, "E-flat minor"),
    ("Blue Monk", "Thelonious Monk", 4, "blues", "medium", Intermediate, "B-flat major"),
    ("Straight No Chaser", "Thelonious Monk", 5, "blues", "up-tempo", Intermediate, "F major"),
    ("Blue Train", "John Coltrane", 6, "blues", "up-tempo", Advanced, "E-flat major"),
    ("Confirmation", "Charlie Parker", 4, "bebop", "up-tempo", Advanced, "F major"),
    ("Donna Lee", "Charlie Parker", 5, "bebop", "up-tempo", Advanced, "A-flat major"),
    ("Anthropology", "Charlie Parker", 4, "bebop", "up-tempo", Advanced, "B-flat major"),
    ("Hot House", "Tadd Dameron", 5, "bebop", "up-tempo", Advanced, "F minor"),
    ("Ornithology", "Charlie Parker", 4, "bebop", "up-tempo", Advanced, "G major"),
    ("Tenor Madness", "Sonny Rollins", 5, "blues", "medium", Intermediate, "B-flat major"),
    ("Blues Walk", "Lou Donaldson", 4, "blues", "medium", Intermediate, "A-flat major"),
    ("Blues for Alice", "Charlie Parker", 5, "blues", "medium", Advanced, "F major"),
];

pub(super) const CLASSICAL: &[Row] = &[
    ("Prelude and Fugue in C Major", "J.S. Bach", 6, "classical", "baroque", Advanced, "C major"),
    ("Air on the G String", "J.S. Bach", 4, "classical", "baroque", Intermediate, "D major"),
    ("Sonata in C Major", "Mozart", 8, "classical", "classical", Advanced, "C major"),
    ("Für Elise", "Beethoven", 3, "classical", "classical", Intermediate, "A minor"),
    ("Nocturne in E-flat Major", "Chopin", 5, "classical", "romantic", Advanced, "E-flat major"),
    ("Clair de Lune", "Debussy", 5, "classical", "romantic", Advanced, "D-flat major"),
];

pub(super) const CHAMBER: &[Row] = &[
    ("String Quartet No. 14", "Mozart", 8, "chamber", "classical", Advanced, "G major"),
    ("Piano Trio No. 1", "Brahms", 10, "chamber", "romantic", Advanced, "B major"),
    ("Wind Quintet", "Nielsen", 6, "chamber", "modern", Advanced, "A major"),
];

pub(super) const FOLK: &[Row] = &[
    ("Scarborough Fair", "Traditional", 3, "folk", "ballad", SkillLevel::Beginner, "D dorian"),
    ("Danny Boy", "Traditional", 4, "folk", "ballad", SkillLevel::Beginner, "E-flat major"),
    ("The Water Is Wide", "Traditional", 4, "folk", "ballad", SkillLevel::Beginner, "G major"),
    ("Shenandoah", "Traditional", 4, "folk", "ballad", SkillLevel::Beginner, "D major"),
    ("Wild Mountain Thyme", "Traditional", 3, "folk", "medium", Intermediate, "D major"),
    ("Down by the Salley Gardens", "Traditional", 3, "folk", "ballad", Intermediate, "D major"),
    ("Whiskey Before Breakfast", "Traditional", 3, "folk", "up-tempo", Intermediate, "D major"),
];

/// (id, name, family)
pub(super) const INSTRUMENTS: &[(&str, &str, &str)] = &[
    ("piano", "Piano", "keyboard"),
    ("violin", "Violin", "string"),
    ("viola", "Viola", "string"),
    ("cello", "Cello", "string"),
    ("guitar", "Guitar", "string"),
    ("bass", "Bass", "string"),
    ("flute", "Flute", "woodwind"),
    ("clarinet", "Clarinet", "woodwind"),
    ("saxophone", "Saxophone", "woodwind"),
    ("trumpet", "Trumpet", "brass"),
    ("drums", "Drums", "percussion"),
    ("voice", "Voice", "vocal"),
];
