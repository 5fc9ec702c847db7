//! Shared identifiers and the fixed department enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque house-officer identifier, stable for the record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfficerId(Uuid);

impl OfficerId {
    /// Generates a fresh random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OfficerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error returned when a string is not a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind}: {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// Offending input.
    pub value: String,
}

/// Officer gender, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Every gender, in form display order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Canonical display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    /// Exact match only; `"male"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "gender",
                value: s.to_string(),
            })
    }
}

/// Department unit a house officer can be assigned to.
///
/// This is the single list shared by registration and the view filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Cardiology 1.
    #[serde(rename = "Cardiology 1")]
    Cardiology1,
    /// Cardiology 2.
    #[serde(rename = "Cardiology 2")]
    Cardiology2,
    /// Nephrology.
    Nephrology,
    /// Neurology.
    Neurology,
    /// Endocrinology.
    Endocrinology,
    /// Pulmonology.
    Pulmonology,
    /// Gastroenterology.
    Gastroenterology,
    /// Infectious Disease/Dermatology.
    #[serde(rename = "Infectious Disease/Dermatology")]
    InfectiousDiseaseDermatology,
    /// Rheumatology.
    Rheumatology,
}

impl Unit {
    /// Every unit, in form display order.
    pub const ALL: [Unit; 9] = [
        Unit::Cardiology1,
        Unit::Cardiology2,
        Unit::Nephrology,
        Unit::Neurology,
        Unit::Endocrinology,
        Unit::Pulmonology,
        Unit::Gastroenterology,
        Unit::InfectiousDiseaseDermatology,
        Unit::Rheumatology,
    ];

    /// Literal unit name as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cardiology1 => "Cardiology 1",
            Unit::Cardiology2 => "Cardiology 2",
            Unit::Nephrology => "Nephrology",
            Unit::Neurology => "Neurology",
            Unit::Endocrinology => "Endocrinology",
            Unit::Pulmonology => "Pulmonology",
            Unit::Gastroenterology => "Gastroenterology",
            Unit::InfectiousDiseaseDermatology => "Infectious Disease/Dermatology",
            Unit::Rheumatology => "Rheumatology",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "unit",
                value: s.to_string(),
            })
    }
}
