use crate::chromosome::fitness;
use crate::config::SearchConfig;
use crate::error::{GroupingError, Result};
use crate::genetic::{GeneticSearch, SearchStats};
use crate::greedy::greedy_partition;
use crate::size::GroupSize;
use culture_distance::{DistanceMatrix, Framework, Participant};
use serde::{Deserialize, Serialize};

/// Why the greedy path produced a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No seed supplied; greedy is the deterministic unseeded path
    NoSeed,
    /// The genetic search raised an internal failure
    SearchFailed(String),
}

/// Which path built a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum PartitionOutcome {
    Genetic(SearchStats),
    Fallback { reason: FallbackReason },
}

impl PartitionOutcome {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Disjoint groups covering every participant exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Participant ids per group, in formation order
    pub groups: Vec<Vec<String>>,

    /// Sum of each group's mean intra-group distance
    pub fitness: f64,

    pub outcome: PartitionOutcome,
}

/// Entry point for partitioning participants into diverse groups
#[derive(Debug, Clone, Default)]
pub struct Partitioner {
    config: SearchConfig,
}

impl Partitioner {
    /// Create a partitioner, validating `config`
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate().map_err(GroupingError::InvalidConfig)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Partition `participants` so each group is as culturally diverse as possible
    ///
    /// Callers are expected to run `validate_participants` first; a distance
    /// failure while building the matrix is returned as is, since neither
    /// search path can run without distances.
    pub fn partition(
        &self,
        participants: &[Participant],
        framework: Framework,
        size: GroupSize,
        seed: Option<&str>,
    ) -> Result<Partition> {
        ensure_enough(participants.len())?;
        let matrix = DistanceMatrix::build(participants, framework)?;
        self.partition_matrix(&matrix, size, seed)
    }

    /// Partition over a prebuilt matrix
    ///
    /// With a seed the genetic search runs; if it fails internally the greedy
    /// construction takes over and the outcome records why. Without a seed the
    /// greedy construction is used directly.
    pub fn partition_matrix(
        &self,
        matrix: &DistanceMatrix,
        size: GroupSize,
        seed: Option<&str>,
    ) -> Result<Partition> {
        ensure_enough(matrix.len())?;

        let (groups, outcome) = match seed {
            Some(seed) => match GeneticSearch::new(matrix, &self.config, size, seed).run() {
                Ok(found) => (found.best.groups, PartitionOutcome::Genetic(found.stats)),
                Err(failure) => {
                    log::warn!("Genetic search failed, falling back to greedy: {failure}");
                    (
                        greedy_partition(matrix, size),
                        PartitionOutcome::Fallback {
                            reason: FallbackReason::SearchFailed(failure.to_string()),
                        },
                    )
                }
            },
            None => {
                log::debug!("No seed supplied, using greedy construction");
                (
                    greedy_partition(matrix, size),
                    PartitionOutcome::Fallback {
                        reason: FallbackReason::NoSeed,
                    },
                )
            }
        };

        let fitness = fitness(&groups, matrix);
        log::info!(
            "Partitioned {} participants into {} groups (size {size}, fitness {fitness:.4})",
            matrix.len(),
            groups.len()
        );

        let groups = groups
            .into_iter()
            .map(|group| group.into_iter().map(|i| matrix.id(i).to_string()).collect())
            .collect();

        Ok(Partition {
            groups,
            fitness,
            outcome,
        })
    }
}

/// Partition with the default search configuration, returning only the groups
pub fn partition(
    participants: &[Participant],
    framework: Framework,
    size: GroupSize,
    seed: Option<&str>,
) -> Result<Vec<Vec<String>>> {
    Partitioner::default()
        .partition(participants, framework, size, seed)
        .map(|partition| partition.groups)
}

fn ensure_enough(count: usize) -> Result<()> {
    if count < GroupSize::MIN_PARTICIPANTS {
        return Err(GroupingError::InsufficientParticipants { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use culture_distance::{CulturalProfile, LewisScores};
    use pretty_assertions::assert_eq;

    fn participants(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                let x = i as f64 / n as f64;
                let scores = LewisScores::new(x, 1.0 - x, (x * 7.0) % 1.0).unwrap();
                Participant::new(format!("p{i}"), CulturalProfile::default().with_lewis(scores))
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SearchConfig {
            population_size: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            Partitioner::new(config),
            Err(GroupingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_too_few_participants() {
        let result = Partitioner::default().partition(
            &participants(2),
            Framework::Lewis,
            GroupSize::Three,
            Some("x"),
        );
        assert_eq!(
            result.unwrap_err(),
            GroupingError::InsufficientParticipants { count: 2 }
        );
    }

    #[test]
    fn test_without_seed_uses_greedy() {
        let partition = Partitioner::default()
            .partition(&participants(6), Framework::Lewis, GroupSize::Three, None)
            .unwrap();
        assert_eq!(
            partition.outcome,
            PartitionOutcome::Fallback {
                reason: FallbackReason::NoSeed
            }
        );
        assert!(partition.outcome.is_fallback());
        assert_eq!(partition.groups.len(), 2);
    }

    #[test]
    fn test_with_seed_uses_genetic_search() {
        let partition = Partitioner::default()
            .partition(&participants(6), Framework::Lewis, GroupSize::Three, Some("s"))
            .unwrap();
        assert!(matches!(partition.outcome, PartitionOutcome::Genetic(_)));
        assert!(partition.fitness > 0.0);
    }

    #[test]
    fn test_distance_failure_propagates() {
        let mut people = participants(4);
        people[2].profile = CulturalProfile::default();
        let result = Partitioner::default().partition(
            &people,
            Framework::Lewis,
            GroupSize::Four,
            Some("seed"),
        );
        assert!(matches!(result, Err(GroupingError::Distance(_))));
    }

    #[test]
    fn test_outcome_serializes_with_path_tag() {
        let outcome = PartitionOutcome::Fallback {
            reason: FallbackReason::NoSeed,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["path"], "fallback");
        assert_eq!(json["reason"]["reason"], "no_seed");
    }
}
