use crate::error::{DistanceError, Result};
use crate::framework::Framework;
use crate::profile::{CulturalProfile, Participant};
use crate::scores::ScoreVector;

/// Distance between two profiles under `framework`
///
/// Named frameworks return the raw Euclidean distance, in
/// [0, √dimension_count]. Combined normalizes each shared framework's distance
/// by its maximum and averages the results, so every framework weighs the
/// same regardless of dimensionality; the value lies in [0, 1].
pub fn distance(a: &CulturalProfile, b: &CulturalProfile, framework: Framework) -> Result<f64> {
    match framework {
        Framework::Lewis => framework_distance(a.lewis.as_ref(), b.lewis.as_ref()),
        Framework::Hall => framework_distance(a.hall.as_ref(), b.hall.as_ref()),
        Framework::Hofstede => framework_distance(a.hofstede.as_ref(), b.hofstede.as_ref()),
        Framework::Combined => combined_distance(a, b),
    }
}

fn framework_distance<V: ScoreVector>(a: Option<&V>, b: Option<&V>) -> Result<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(a.euclidean(b)),
        _ => Err(DistanceError::MissingFrameworkData {
            framework: V::FRAMEWORK,
        }),
    }
}

fn combined_distance(a: &CulturalProfile, b: &CulturalProfile) -> Result<f64> {
    let shared = a.shared_frameworks(b);
    if shared.is_empty() {
        return Err(DistanceError::NoSharedFrameworkData);
    }

    let mut total = 0.0;
    for framework in &shared {
        total += distance(a, b, *framework)? / framework.max_distance();
    }

    Ok(total / shared.len() as f64)
}

/// Check that every participant can be compared under `framework`
///
/// Every present vector must hold scores in [0, 1]. Named frameworks need the
/// vector on every profile. Combined needs every pair to share at least one
/// framework, which is checked pairwise because two non-empty profiles may
/// still be disjoint.
pub fn validate_participants(participants: &[Participant], framework: Framework) -> Result<()> {
    for participant in participants {
        participant
            .profile
            .check_scores()
            .map_err(|err| DistanceError::InvalidScores {
                participant: participant.id.clone(),
                source: Box::new(err),
            })?;
    }

    if !framework.is_combined() {
        if let Some(missing) = participants.iter().find(|p| !p.profile.has(framework)) {
            return Err(DistanceError::IncompleteProfile {
                participant: missing.id.clone(),
                framework,
            });
        }
        return Ok(());
    }

    if let Some(empty) = participants.iter().find(|p| p.profile.is_empty()) {
        return Err(DistanceError::IncompleteProfile {
            participant: empty.id.clone(),
            framework,
        });
    }

    for (i, first) in participants.iter().enumerate() {
        for second in &participants[i + 1..] {
            if first.profile.shared_frameworks(&second.profile).is_empty() {
                return Err(DistanceError::pair(
                    &first.id,
                    &second.id,
                    DistanceError::NoSharedFrameworkData,
                ));
            }
        }
    }

    Ok(())
}
