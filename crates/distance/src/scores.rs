use crate::error::{DistanceError, Result};
use crate::framework::Framework;
use serde::{Deserialize, Serialize};

/// Fixed-arity score vector for one framework
///
/// Coordinates are expected in [0, 1]. Names exist for reporting only;
/// numerically a vector is just a point in the unit hypercube.
///
/// Fields are public, so struct literals and deserialized values skip the
/// range check in `new`/`from_slice`. `CulturalProfile::check_scores` and
/// `validate_participants` re-check them.
pub trait ScoreVector: Sized {
    /// Framework this vector belongs to
    const FRAMEWORK: Framework;

    /// Dimension names, in coordinate order
    const DIMENSIONS: &'static [&'static str];

    /// Coordinates in `DIMENSIONS` order
    fn coordinates(&self) -> Vec<f64>;

    /// Build from coordinates in `DIMENSIONS` order
    fn from_slice(values: &[f64]) -> Result<Self>;

    /// Euclidean distance, in [0, √dimensions] for in-range scores
    fn euclidean(&self, other: &Self) -> f64 {
        self.coordinates()
            .iter()
            .zip(other.coordinates().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

fn checked(dimension: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DistanceError::ScoreOutOfRange { dimension, value })
    }
}

fn check_arity<V: ScoreVector>(values: &[f64]) -> Result<()> {
    if values.len() == V::DIMENSIONS.len() {
        Ok(())
    } else {
        Err(DistanceError::WrongArity {
            framework: V::FRAMEWORK,
            expected: V::DIMENSIONS.len(),
            actual: values.len(),
        })
    }
}

/// Lewis model position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LewisScores {
    pub linear_active: f64,
    pub multi_active: f64,
    pub reactive: f64,
}

impl LewisScores {
    pub fn new(linear_active: f64, multi_active: f64, reactive: f64) -> Result<Self> {
        Ok(Self {
            linear_active: checked("linear_active", linear_active)?,
            multi_active: checked("multi_active", multi_active)?,
            reactive: checked("reactive", reactive)?,
        })
    }
}

impl ScoreVector for LewisScores {
    const FRAMEWORK: Framework = Framework::Lewis;
    const DIMENSIONS: &'static [&'static str] = &["linear_active", "multi_active", "reactive"];

    fn coordinates(&self) -> Vec<f64> {
        vec![self.linear_active, self.multi_active, self.reactive]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity::<Self>(values)?;
        Self::new(values[0], values[1], values[2])
    }
}

/// Hall dimensions: high vs low context, polychronic vs monochronic time,
/// close vs distant personal space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HallScores {
    pub context: f64,
    pub time: f64,
    pub space: f64,
}

impl HallScores {
    pub fn new(context: f64, time: f64, space: f64) -> Result<Self> {
        Ok(Self {
            context: checked("context", context)?,
            time: checked("time", time)?,
            space: checked("space", space)?,
        })
    }
}

impl ScoreVector for HallScores {
    const FRAMEWORK: Framework = Framework::Hall;
    const DIMENSIONS: &'static [&'static str] = &["context", "time", "space"];

    fn coordinates(&self) -> Vec<f64> {
        vec![self.context, self.time, self.space]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity::<Self>(values)?;
        Self::new(values[0], values[1], values[2])
    }
}

/// Hofstede's six dimensions, rescaled from 0-100 to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HofstedeScores {
    pub power_distance: f64,
    pub individualism: f64,
    pub masculinity: f64,
    pub uncertainty_avoidance: f64,
    pub long_term_orientation: f64,
    pub indulgence: f64,
}

impl HofstedeScores {
    pub fn new(
        power_distance: f64,
        individualism: f64,
        masculinity: f64,
        uncertainty_avoidance: f64,
        long_term_orientation: f64,
        indulgence: f64,
    ) -> Result<Self> {
        Ok(Self {
            power_distance: checked("power_distance", power_distance)?,
            individualism: checked("individualism", individualism)?,
            masculinity: checked("masculinity", masculinity)?,
            uncertainty_avoidance: checked("uncertainty_avoidance", uncertainty_avoidance)?,
            long_term_orientation: checked("long_term_orientation", long_term_orientation)?,
            indulgence: checked("indulgence", indulgence)?,
        })
    }
}

impl ScoreVector for HofstedeScores {
    const FRAMEWORK: Framework = Framework::Hofstede;
    const DIMENSIONS: &'static [&'static str] = &[
        "power_distance",
        "individualism",
        "masculinity",
        "uncertainty_avoidance",
        "long_term_orientation",
        "indulgence",
    ];

    fn coordinates(&self) -> Vec<f64> {
        vec![
            self.power_distance,
            self.individualism,
            self.masculinity,
            self.uncertainty_avoidance,
            self.long_term_orientation,
            self.indulgence,
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity::<Self>(values)?;
        Self::new(
            values[0], values[1], values[2], values[3], values[4], values[5],
        )
    }
}
