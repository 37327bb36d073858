//! Axis identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CriteriaError;

/// Key that resolves to the same entry as [`Axis::T`].
pub const TIME_ALIAS: &str = "time";

/// Semantic coordinate axis a dataset variable can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "latitude")]
    Latitude,
    #[serde(rename = "longitude")]
    Longitude,
    /// Physical vertical coordinate (pressure, height, depth)
    #[serde(rename = "vertical")]
    Vertical,
    X,
    Y,
    /// Generic vertical axis, including dimensionless model levels
    Z,
    #[serde(alias = "time")]
    T,
}

impl Axis {
    /// Every axis, in table construction order.
    pub const ALL: [Axis; 7] = [
        Axis::Latitude,
        Axis::Longitude,
        Axis::Z,
        Axis::Vertical,
        Axis::X,
        Axis::Y,
        Axis::T,
    ];

    /// Canonical table key for this axis.
    pub fn key(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
            Axis::Vertical => "vertical",
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::T => "T",
        }
    }

    /// Resolve a table key, including the `time` alias.
    ///
    /// Keys are case-sensitive: `"x"` is not an axis key.
    pub fn from_key(key: &str) -> Result<Self, CriteriaError> {
        match key {
            "latitude" => Ok(Axis::Latitude),
            "longitude" => Ok(Axis::Longitude),
            "vertical" => Ok(Axis::Vertical),
            "X" => Ok(Axis::X),
            "Y" => Ok(Axis::Y),
            "Z" => Ok(Axis::Z),
            "T" | TIME_ALIAS => Ok(Axis::T),
            _ => Err(CriteriaError::UnknownAxis(key.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Axis {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::from_key(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_key(axis.key()).unwrap(), axis);
        }
    }

    #[test]
    fn test_time_alias() {
        assert_eq!(Axis::from_key("time").unwrap(), Axis::T);
        assert_eq!("time".parse::<Axis>().unwrap(), Axis::T);
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            Axis::from_key("x"),
            Err(CriteriaError::UnknownAxis(k)) if k == "x"
        ));
        assert!(Axis::from_key("").is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Axis::Latitude).unwrap(), "\"latitude\"");
        assert_eq!(serde_json::to_string(&Axis::X).unwrap(), "\"X\"");
        let t: Axis = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(t, Axis::T);
    }
}
