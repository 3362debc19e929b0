//! Birth observation and its categorical codings
//!
//! One `Observation` per birth certificate. Categorical fields are enums so that
//! only the documented codings can be represented.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maternal education, ordinal with five levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Education {
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
    Level5 = 5,
}

impl Education {
    /// All levels in ascending order; `Level1` is the reference category
    pub const ALL: [Self; 5] = [
        Self::Level1,
        Self::Level2,
        Self::Level3,
        Self::Level4,
        Self::Level5,
    ];

    /// Parse the 1-5 integer coding
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Level1),
            2 => Some(Self::Level2),
            3 => Some(Self::Level3),
            4 => Some(Self::Level4),
            5 => Some(Self::Level5),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Infant sex, coded 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfantSex {
    Female = 0,
    Male = 1,
}

impl InfantSex {
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Female),
            1 => Some(Self::Male),
            _ => None,
        }
    }

    #[must_use]
    pub const fn indicator(self) -> f64 {
        match self {
            Self::Female => 0.0,
            Self::Male => 1.0,
        }
    }
}

/// Black-carbon exposure dichotomised at 0.20 mg/m³
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exposure {
    /// At or below the threshold
    Low = 0,
    /// Above the threshold
    High = 1,
}

impl Exposure {
    /// Exposure threshold in mg/m³
    pub const THRESHOLD_MG_M3: f64 = 0.20;

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub const fn indicator(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::High => 1.0,
        }
    }
}

/// Race/ethnicity categories reported on the birth certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    AmericanIndian,
    Asian,
    Black,
    PacificIslander,
    White,
    Hispanic,
}

impl Race {
    /// Subgroups in reporting order
    pub const ALL: [Self; 6] = [
        Self::AmericanIndian,
        Self::Asian,
        Self::Black,
        Self::PacificIslander,
        Self::White,
        Self::Hispanic,
    ];

    /// Parse the input file code (`AI`, `AS`, `BL`, `NHPI`, `WH`, `HIS`)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "AI" => Some(Self::AmericanIndian),
            "AS" => Some(Self::Asian),
            "BL" => Some(Self::Black),
            "NHPI" => Some(Self::PacificIslander),
            "WH" => Some(Self::White),
            "HIS" => Some(Self::Hispanic),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AmericanIndian => "AI",
            Self::Asian => "AS",
            Self::Black => "BL",
            Self::PacificIslander => "NHPI",
            Self::White => "WH",
            Self::Hispanic => "HIS",
        }
    }

    /// Human-readable label used in the summary table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AmericanIndian => "American Indian/Alaska Native",
            Self::Asian => "Asian",
            Self::Black => "Black",
            Self::PacificIslander => "Native Hawaiian/Pacific Islander",
            Self::White => "White",
            Self::Hispanic => "Hispanic",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One birth record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Maternal age in years
    pub maternal_age: f64,
    pub education: Education,
    pub infant_sex: InfantSex,
    /// Birth weight in pounds
    pub birth_weight: f64,
    /// Birth before 37 weeks of gestation
    pub preterm: bool,
    /// `None` when the row carries none of the six reported codes
    pub race: Option<Race>,
    pub black_carbon: Exposure,
}

impl Observation {
    /// Copy of this observation with the exposure overridden
    #[must_use]
    pub const fn with_exposure(mut self, exposure: Exposure) -> Self {
        self.black_carbon = exposure;
        self
    }

    #[must_use]
    pub const fn outcome(&self) -> f64 {
        if self.preterm { 1.0 } else { 0.0 }
    }
}
