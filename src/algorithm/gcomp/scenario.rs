//! Counterfactual exposure scenarios

use std::borrow::Cow;
use std::fmt;

use crate::models::{Dataset, Exposure};

/// An exposure scenario under which risk is standardized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Exposure as observed
    Current,
    /// Every birth below the black-carbon threshold
    LowExposure,
}

impl Scenario {
    pub const ALL: [Self; 2] = [Self::Current, Self::LowExposure];

    /// The dataset as it would look under this scenario
    ///
    /// `Current` borrows the input; `LowExposure` is a full copy with only the
    /// exposure field changed.
    #[must_use]
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Cow<'a, Dataset> {
        match self {
            Self::Current => Cow::Borrowed(dataset),
            Self::LowExposure => Cow::Owned(dataset.with_exposure(Exposure::Low)),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::LowExposure => f.write_str("low exposure"),
        }
    }
}
