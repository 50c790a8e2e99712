//! # Catalog Module
//!
//! The immutable song table recommendations are drawn from. The built-in
//! catalog is created once at start-up and never mutated; row order matters
//! because it breaks distance ties in the recommender.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique song name; also the stem of the audio file (`{name}.mp3`).
    pub name: String,
    pub genre: String,
    /// Beats per minute.
    pub tempo: f64,
    /// Conventionally in `[0, 1]`, not enforced.
    pub energy: f64,
}

impl CatalogEntry {
    pub fn new(name: &str, genre: &str, tempo: f64, energy: f64) -> Self {
        Self {
            name: name.to_string(),
            genre: genre.to_string(),
            tempo,
            energy,
        }
    }
}

/// Ordered, read-only collection of [`CatalogEntry`] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The fixed 11-song table shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        const ROWS: [(&str, &str, f64, f64); 11] = [
            ("Song1", "Pop", 120.0, 0.8),
            ("Song2", "Rock", 140.0, 0.6),
            ("Song3", "Pop", 128.0, 0.75),
            ("Song4", "Jazz", 100.0, 0.5),
            ("Song5", "Rock", 135.0, 0.7),
            ("Song6", "Pop", 125.0, 0.9),
            ("Song7", "Rock", 122.0, 1.0),
            ("Song8", "Pop", 126.0, 0.87),
            ("Song9", "Jazz", 120.0, 0.82),
            ("Song10", "Rock", 138.0, 0.92),
            ("Song11", "Jazz", 133.0, 0.78),
        ];

        let entries = ROWS
            .iter()
            .map(|&(name, genre, tempo, energy)| CatalogEntry::new(name, genre, tempo, energy))
            .collect();
        Self { entries }
    }

    /// Builds a catalog from arbitrary rows, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSong`] if two rows share a name, since the
    /// name doubles as the audio file name.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::DuplicateSong(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_eleven_rows_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 11);

        let names: Vec<&str> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Song1"));
        assert_eq!(names.last(), Some(&"Song11"));
        assert_eq!(names[6], "Song7");
    }

    #[test]
    fn test_builtin_names_unique() {
        let catalog = Catalog::builtin();
        assert!(Catalog::from_entries(catalog.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_get_by_name() {
        let catalog = Catalog::builtin();
        let song = catalog.get("Song4").expect("Song4 is in the catalog");
        assert_eq!(song.genre, "Jazz");
        assert_eq!(song.tempo, 100.0);
        assert_eq!(song.energy, 0.5);
        assert!(catalog.get("Song12").is_none());
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let entries = vec![
            CatalogEntry::new("A", "Pop", 100.0, 0.5),
            CatalogEntry::new("B", "Rock", 110.0, 0.6),
            CatalogEntry::new("A", "Jazz", 90.0, 0.4),
        ];
        assert_eq!(
            Catalog::from_entries(entries),
            Err(Error::DuplicateSong("A".to_string()))
        );
    }

    #[test]
    fn test_from_entries_allows_empty() {
        let catalog = Catalog::from_entries(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
