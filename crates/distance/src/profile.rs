use crate::error::Result;
use crate::framework::Framework;
use crate::scores::{HallScores, HofstedeScores, LewisScores, ScoreVector};
use serde::{Deserialize, Serialize};

/// Per-participant score vectors, one optional slot per framework
///
/// A slot stays empty when no published research values exist for the
/// participant's country under that framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CulturalProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lewis: Option<LewisScores>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<HallScores>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hofstede: Option<HofstedeScores>,
}

impl CulturalProfile {
    /// Builder: set Lewis scores
    #[must_use]
    pub const fn with_lewis(mut self, scores: LewisScores) -> Self {
        self.lewis = Some(scores);
        self
    }

    /// Builder: set Hall scores
    #[must_use]
    pub const fn with_hall(mut self, scores: HallScores) -> Self {
        self.hall = Some(scores);
        self
    }

    /// Builder: set Hofstede scores
    #[must_use]
    pub const fn with_hofstede(mut self, scores: HofstedeScores) -> Self {
        self.hofstede = Some(scores);
        self
    }

    /// Whether this profile can take part in a distance under `framework`
    ///
    /// For combined this only means "has at least one vector"; whether two
    /// profiles overlap is a pairwise question.
    #[must_use]
    pub const fn has(&self, framework: Framework) -> bool {
        match framework {
            Framework::Lewis => self.lewis.is_some(),
            Framework::Hall => self.hall.is_some(),
            Framework::Hofstede => self.hofstede.is_some(),
            Framework::Combined => !self.is_empty(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lewis.is_none() && self.hall.is_none() && self.hofstede.is_none()
    }

    /// Named frameworks present in this profile
    #[must_use]
    pub fn frameworks(&self) -> Vec<Framework> {
        Framework::NAMED
            .into_iter()
            .filter(|framework| self.has(*framework))
            .collect()
    }

    /// Named frameworks present in both profiles
    #[must_use]
    pub fn shared_frameworks(&self, other: &Self) -> Vec<Framework> {
        Framework::NAMED
            .into_iter()
            .filter(|framework| self.has(*framework) && other.has(*framework))
            .collect()
    }

    /// Re-check every present vector against the unit interval
    ///
    /// Deserialized profiles bypass the validating constructors.
    pub fn check_scores(&self) -> Result<()> {
        if let Some(lewis) = &self.lewis {
            LewisScores::from_slice(&lewis.coordinates())?;
        }
        if let Some(hall) = &self.hall {
            HallScores::from_slice(&hall.coordinates())?;
        }
        if let Some(hofstede) = &self.hofstede {
            HofstedeScores::from_slice(&hofstede.coordinates())?;
        }
        Ok(())
    }
}

/// A participant identifier with its resolved profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub profile: CulturalProfile,
}

impl Participant {
    pub fn new(id: impl Into<String>, profile: CulturalProfile) -> Self {
        Self {
            id: id.into(),
            profile,
        }
    }
}
