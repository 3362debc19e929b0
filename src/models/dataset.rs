//! Ordered collection of observations

use std::sync::Arc;

use crate::models::observation::{Exposure, Observation, Race};

/// An immutable, cheaply clonable set of birth observations
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Arc<[Observation]>,
}

impl Dataset {
    #[must_use]
    pub fn new(observations: Vec<Observation>) -> Self {
        Self {
            observations: observations.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Copy with the exposure of every row set to `exposure`
    #[must_use]
    pub fn with_exposure(&self, exposure: Exposure) -> Self {
        Self::new(
            self.observations
                .iter()
                .map(|obs| obs.with_exposure(exposure))
                .collect(),
        )
    }

    /// Rows at the given indices, in index order; indices may repeat
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::new(indices.iter().map(|&i| self.observations[i]).collect())
    }

    /// Rows whose race is `race`
    #[must_use]
    pub fn filter_race(&self, race: Race) -> Self {
        self.filter(|obs| obs.race == Some(race))
    }

    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Observation) -> bool,
    {
        Self::new(
            self.observations
                .iter()
                .filter(|obs| predicate(obs))
                .copied()
                .collect(),
        )
    }

    /// Number of rows with a preterm outcome
    #[must_use]
    pub fn preterm_count(&self) -> usize {
        self.observations.iter().filter(|obs| obs.preterm).count()
    }

    /// Number of rows above the exposure threshold
    #[must_use]
    pub fn exposed_count(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.black_carbon == Exposure::High)
            .count()
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
