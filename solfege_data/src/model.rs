use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEGREE_COUNT: i32 = 7;

/// One of the seven cyclic solfège names, indexed 0-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Degree {
    Do,
    #[serde(rename = "Ré")]
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Si,
}

impl Degree {
    pub const ALL: [Degree; 7] = [
        Degree::Do,
        Degree::Re,
        Degree::Mi,
        Degree::Fa,
        Degree::Sol,
        Degree::La,
        Degree::Si,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Wraps any integer into the 0-6 range, so negative offsets work too.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(DEGREE_COUNT) as usize]
    }

    /// The degree `steps` positions away, wrapping mod 7.
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }

    pub fn name(self) -> &'static str {
        match self {
            Degree::Do => "Do",
            Degree::Re => "Ré",
            Degree::Mi => "Mi",
            Degree::Fa => "Fa",
            Degree::Sol => "Sol",
            Degree::La => "La",
            Degree::Si => "Si",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solfège degree: {0:?}")]
pub struct ParseDegreeError(pub String);

impl FromStr for Degree {
    type Err = ParseDegreeError;

    /// Accepts names case-insensitively (`re` and `ré` both work) or 1-based numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return match n {
                1..=7 => Ok(Self::ALL[n - 1]),
                _ => Err(ParseDegreeError(s.to_string())),
            };
        }

        let lowered = trimmed.to_lowercase();
        match lowered.as_str() {
            "do" => Ok(Degree::Do),
            "re" | "ré" => Ok(Degree::Re),
            "mi" => Ok(Degree::Mi),
            "fa" => Ok(Degree::Fa),
            "sol" => Ok(Degree::Sol),
            "la" => Ok(Degree::La),
            "si" => Ok(Degree::Si),
            _ => Err(ParseDegreeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn step(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Quiz mode an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Relative,
    Ordinance,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Relative, Mode::Ordinance];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Relative => "relative",
            Mode::Ordinance => "ordinance",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
