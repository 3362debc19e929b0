//! Design-matrix encoding for the outcome model
//!
//! Column order: intercept, black carbon, maternal age, education indicators for
//! levels 2-5 (level 1 is the reference), infant sex, birth weight.

use std::fmt;

use nalgebra::DMatrix;

use crate::models::{Dataset, Education, Observation};

/// Number of design columns, intercept included
pub const N_TERMS: usize = 9;

/// A column of the design matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Intercept,
    BlackCarbon,
    MaternalAge,
    /// Indicator for a non-reference education level
    Education(Education),
    InfantSex,
    BirthWeight,
}

/// Terms in column order
pub const TERMS: [Term; N_TERMS] = [
    Term::Intercept,
    Term::BlackCarbon,
    Term::MaternalAge,
    Term::Education(Education::Level2),
    Term::Education(Education::Level3),
    Term::Education(Education::Level4),
    Term::Education(Education::Level5),
    Term::InfantSex,
    Term::BirthWeight,
];

impl Term {
    /// Column position, or `None` for the reference education level
    #[must_use]
    pub fn index(self) -> Option<usize> {
        TERMS.iter().position(|&t| t == self)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intercept => "(Intercept)",
            Self::BlackCarbon => "black_carbon",
            Self::MaternalAge => "maternal_age",
            Self::Education(Education::Level1) => "education1",
            Self::Education(Education::Level2) => "education2",
            Self::Education(Education::Level3) => "education3",
            Self::Education(Education::Level4) => "education4",
            Self::Education(Education::Level5) => "education5",
            Self::InfantSex => "infant_sex",
            Self::BirthWeight => "birth_weight",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode one observation as a design row
#[must_use]
pub fn encode(obs: &Observation) -> [f64; N_TERMS] {
    let level = |l: Education| if obs.education == l { 1.0 } else { 0.0 };
    [
        1.0,
        obs.black_carbon.indicator(),
        obs.maternal_age,
        level(Education::Level2),
        level(Education::Level3),
        level(Education::Level4),
        level(Education::Level5),
        obs.infant_sex.indicator(),
        obs.birth_weight,
    ]
}

/// Build the `n × N_TERMS` design matrix of a dataset
#[must_use]
pub fn design_matrix(dataset: &Dataset) -> DMatrix<f64> {
    let rows: Vec<f64> = dataset.iter().flat_map(encode).collect();
    DMatrix::from_row_slice(dataset.len(), N_TERMS, &rows)
}
