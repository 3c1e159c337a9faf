#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// An academic year such as `2016/2017`, identified by its starting calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcadYear(u16);

impl AcadYear {
    pub fn new(start: u16) -> Self {
        Self(start)
    }

    pub fn start(&self) -> u16 {
        self.0
    }

    /// Parsing rejects a start year with no successor, so this only
    /// saturates for years built directly with [`AcadYear::new`].
    pub fn end(&self) -> u16 {
        self.0.saturating_add(1)
    }

    /// Directory name used for input and output trees (`2016-2017`).
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.start(), self.end())
    }
}

impl fmt::Display for AcadYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start(), self.end())
    }
}

impl FromStr for AcadYear {
    type Err = ModelError;

    /// Accepts `2016/2017`, `2016-2017` or a bare starting year `2016`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidAcadYear(s.to_string());
        let trimmed = s.trim();
        let (start, end) = match trimmed.split_once(['/', '-']) {
            Some((start, end)) => (start, Some(end)),
            None => (trimmed, None),
        };
        let start: u16 = start.trim().parse().map_err(|_| invalid())?;
        let next = start.checked_add(1).ok_or_else(invalid)?;
        if let Some(end) = end {
            let end: u16 = end.trim().parse().map_err(|_| invalid())?;
            if end != next {
                return Err(invalid());
            }
        }
        Ok(Self(start))
    }
}

impl serde::Serialize for AcadYear {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for AcadYear {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A teaching period within an academic year, 1 through 4.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Semester(u8);

impl Semester {
    pub const ALL: [Semester; 4] = [Semester(1), Semester(2), Semester(3), Semester(4)];

    pub fn new(value: u8) -> Result<Self, ModelError> {
        if (1..=4).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidSemester(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Semester {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Semester> for u8 {
    fn from(value: Semester) -> Self {
        value.0
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
