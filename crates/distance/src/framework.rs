use crate::error::DistanceError;
use crate::scores::{HallScores, HofstedeScores, LewisScores, ScoreVector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cultural-dimension framework used to compare participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Lewis model: linear-active, multi-active, reactive
    Lewis,
    /// Hall: context, time, space
    Hall,
    /// Hofstede six-dimension model
    Hofstede,
    /// Normalized average over every framework both participants share
    Combined,
}

impl Framework {
    /// The concrete frameworks, in the order combined distance visits them
    pub const NAMED: [Self; 3] = [Self::Lewis, Self::Hall, Self::Hofstede];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lewis => "lewis",
            Self::Hall => "hall",
            Self::Hofstede => "hofstede",
            Self::Combined => "combined",
        }
    }

    /// Number of coordinates in this framework's vector (0 for combined)
    #[must_use]
    pub const fn dimension_count(self) -> usize {
        self.dimension_names().len()
    }

    /// Largest possible distance under this framework
    ///
    /// For a named framework this is the diagonal of the unit hypercube,
    /// √dimension_count. Combined distances are normalized, so 1.0.
    #[must_use]
    pub fn max_distance(self) -> f64 {
        match self {
            Self::Combined => 1.0,
            named => (named.dimension_count() as f64).sqrt(),
        }
    }

    #[must_use]
    pub const fn dimension_names(self) -> &'static [&'static str] {
        match self {
            Self::Lewis => LewisScores::DIMENSIONS,
            Self::Hall => HallScores::DIMENSIONS,
            Self::Hofstede => HofstedeScores::DIMENSIONS,
            Self::Combined => &[],
        }
    }

    #[must_use]
    pub const fn is_combined(self) -> bool {
        matches!(self, Self::Combined)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lewis" => Ok(Self::Lewis),
            "hall" => Ok(Self::Hall),
            "hofstede" => Ok(Self::Hofstede),
            "combined" => Ok(Self::Combined),
            _ => Err(DistanceError::UnknownFramework(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Lewis".parse::<Framework>().unwrap(), Framework::Lewis);
        assert_eq!(" HOFSTEDE ".parse::<Framework>().unwrap(), Framework::Hofstede);
        assert_eq!("combined".parse::<Framework>().unwrap(), Framework::Combined);
        assert!(matches!(
            "trompenaars".parse::<Framework>(),
            Err(DistanceError::UnknownFramework(_))
        ));
    }

    #[test]
    fn test_dimension_counts() {
        assert_eq!(Framework::Lewis.dimension_count(), 3);
        assert_eq!(Framework::Hall.dimension_count(), 3);
        assert_eq!(Framework::Hofstede.dimension_count(), 6);
        assert_eq!(Framework::Combined.dimension_count(), 0);
    }

    #[test]
    fn test_max_distance() {
        assert!((Framework::Lewis.max_distance() - 3f64.sqrt()).abs() < 1e-12);
        assert!((Framework::Hofstede.max_distance() - 6f64.sqrt()).abs() < 1e-12);
        assert_eq!(Framework::Combined.max_distance(), 1.0);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Framework::Hall).unwrap();
        assert_eq!(json, "\"hall\"");
        let parsed: Framework = serde_json::from_str("\"hofstede\"").unwrap();
        assert_eq!(parsed, Framework::Hofstede);
    }
}
