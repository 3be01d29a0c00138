//! Population counts per species.

use crate::Species;
use serde::{Deserialize, Serialize};

/// Number of cells holding each species in one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    counts: [usize; 8],
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, species: Species) {
        self.counts[species.code() as usize] += 1;
    }

    pub fn count(&self, species: Species) -> usize {
        self.counts[species.code() as usize]
    }

    /// Total number of cells counted, empty ones included
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of occupied cells
    pub fn alive(&self) -> usize {
        self.total() - self.count(Species::Empty)
    }

    /// Fraction of cells that are occupied (0.0 for an empty census)
    pub fn density(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.alive() as f64 / total as f64
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Species, usize)> + '_ {
        Species::ALL
            .into_iter()
            .map(move |species| (species, self.count(species)))
    }
}

impl FromIterator<Species> for Census {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut census = Census::new();
        for species in iter {
            census.record(species);
        }
        census
    }
}
