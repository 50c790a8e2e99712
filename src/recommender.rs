//! Nearest-neighbor song recommendations.
//!
//! Songs are compared on two features only, tempo and energy, using plain
//! Euclidean distance over the raw values. Genre is carried in the query but
//! takes no part in the ranking.

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use serde::Serialize;

/// How many songs one request returns.
pub const DEFAULT_NEIGHBORS: usize = 4;

/// A single recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Accepted for symmetry with the form; not used for filtering or distance.
    pub genre: String,
    pub tempo: f64,
    pub energy: f64,
}

impl Query {
    pub fn new(genre: &str, tempo: f64, energy: f64) -> Self {
        Self {
            genre: genre.to_string(),
            tempo,
            energy,
        }
    }
}

/// A catalog row paired with its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub distance: f64,
}

impl Recommendation<'_> {
    pub fn name(&self) -> &str {
        &self.entry.name
    }
}

/// Ranks catalog rows by their distance to a query.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    neighbors: usize,
}

impl Recommender {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_neighbors(catalog, DEFAULT_NEIGHBORS)
    }

    pub fn with_neighbors(catalog: Catalog, neighbors: usize) -> Self {
        Self { catalog, neighbors }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// Returns the `neighbors` closest rows, nearest first.
    ///
    /// Equal distances keep catalog row order. Out-of-range tempo or energy
    /// values are not rejected; the closest rows are returned regardless.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when the catalog holds fewer rows than
    /// requested. A short list is never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use muse_recommender::catalog::Catalog;
    /// use muse_recommender::recommender::{Query, Recommender};
    ///
    /// let recommender = Recommender::new(Catalog::builtin());
    /// let picks = recommender.recommend(&Query::new("Pop", 120.0, 0.8))?;
    /// assert_eq!(picks[0].name(), "Song1");
    /// assert_eq!(picks.len(), 4);
    /// # Ok::<(), muse_recommender::error::Error>(())
    /// ```
    pub fn recommend(&self, query: &Query) -> Result<Vec<Recommendation<'_>>> {
        let available = self.catalog.len();
        if available < self.neighbors {
            log::warn!(
                "Catalog too small: {available} songs for {} recommendations",
                self.neighbors
            );
            return Err(Error::InsufficientData {
                requested: self.neighbors,
                available,
            });
        }

        log::debug!(
            "Ranking {available} songs against tempo={} energy={} (genre `{}' ignored)",
            query.tempo,
            query.energy,
            query.genre
        );

        let mut ranked: Vec<Recommendation<'_>> = self
            .catalog
            .iter()
            .map(|entry| Recommendation {
                entry,
                distance: distance(query, entry),
            })
            .collect();

        // Stable sort, so ties stay in row order.
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked.truncate(self.neighbors);

        log::trace!("Ranked: {ranked:?}");
        Ok(ranked)
    }

    /// Like [`Recommender::recommend`] but yields only the song names.
    pub fn recommend_names(&self, query: &Query) -> Result<Vec<String>> {
        Ok(self
            .recommend(query)?
            .into_iter()
            .map(|rec| rec.entry.name.clone())
            .collect())
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

/// Euclidean distance in (tempo, energy) space.
#[inline]
#[must_use]
pub fn distance(query: &Query, entry: &CatalogEntry) -> f64 {
    (query.tempo - entry.tempo).hypot(query.energy - entry.energy)
}
