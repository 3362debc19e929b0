//! Population slices analysed separately
//!
//! The total population, then one subgroup per reported race/ethnicity. Rows
//! without a reported code belong to the total population only.

use std::borrow::Cow;
use std::fmt;

use crate::models::{Dataset, Observation, Race};

/// Defines a criterion for including an entity in a population
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A population over which the effect is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopulationSlice {
    /// Every birth in the input
    Total,
    /// Births with the given race/ethnicity
    Race(Race),
}

impl PopulationSlice {
    /// Total population followed by the six subgroups, in reporting order
    #[must_use]
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Total)
            .chain(Race::ALL.into_iter().map(Self::Race))
            .collect()
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Race(race) => race.label(),
        }
    }

    /// Rows of `dataset` in this slice; the total population is borrowed
    #[must_use]
    pub fn select<'a>(&self, dataset: &'a Dataset) -> Cow<'a, Dataset> {
        match self {
            Self::Total => Cow::Borrowed(dataset),
            Self::Race(_) => Cow::Owned(dataset.filter(|obs| self.meets_criteria(obs))),
        }
    }
}

impl FilterCriteria<Observation> for PopulationSlice {
    fn meets_criteria(&self, obs: &Observation) -> bool {
        match self {
            Self::Total => true,
            Self::Race(race) => obs.race == Some(*race),
        }
    }
}

impl fmt::Display for PopulationSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
