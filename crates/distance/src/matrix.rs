use crate::distance::distance;
use crate::error::{DistanceError, Result};
use crate::framework::Framework;
use crate::profile::Participant;
use ndarray::Array2;
use std::collections::HashMap;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Dense symmetric pairwise distance table over a fixed participant set
///
/// Rows and columns follow the order participants were supplied in; `index_of`
/// maps an id back to its row. The diagonal is always zero and the table is
/// immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    values: Array2<f64>,
}

impl DistanceMatrix {
    /// Compute every unordered pair once under `framework`
    ///
    /// Self-distance is set to zero without consulting the distance engine.
    /// The first failing pair is reported with both ids.
    pub fn build(participants: &[Participant], framework: Framework) -> Result<Self> {
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let index = index_ids(&ids)?;
        let n = ids.len();

        log::debug!(
            "Building {framework} distance matrix for {n} participants ({} pairs)",
            n * n.saturating_sub(1) / 2
        );

        let mut values = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(&participants[i].profile, &participants[j].profile, framework)
                    .map_err(|err| DistanceError::pair(&ids[i], &ids[j], err))?;
                values[[i, j]] = d;
                values[[j, i]] = d;
            }
        }

        Ok(Self { ids, index, values })
    }

    /// Build from explicit rows, validating shape, diagonal, sign and symmetry
    pub fn from_rows(ids: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let index = index_ids(&ids)?;
        let n = ids.len();

        if rows.len() != n {
            return Err(DistanceError::invalid_matrix(format!(
                "expected {n} rows, got {}",
                rows.len()
            )));
        }
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(DistanceError::invalid_matrix(format!(
                "row {row} has {} columns, expected {n}",
                values.len()
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((n, n), flat)
            .map_err(|err| DistanceError::invalid_matrix(err.to_string()))?;

        for i in 0..n {
            if values[[i, i]] != 0.0 {
                return Err(DistanceError::invalid_matrix(format!(
                    "diagonal entry for '{}' is {}",
                    ids[i],
                    values[[i, i]]
                )));
            }
            for j in (i + 1)..n {
                let (forward, backward) = (values[[i, j]], values[[j, i]]);
                if forward.is_nan() || backward.is_nan() || forward < 0.0 || backward < 0.0 {
                    return Err(DistanceError::invalid_matrix(format!(
                        "negative or undefined distance between '{}' and '{}'",
                        ids[i], ids[j]
                    )));
                }
                if (forward - backward).abs() > SYMMETRY_TOLERANCE {
                    return Err(DistanceError::invalid_matrix(format!(
                        "asymmetric entries for '{}' and '{}': {forward} vs {backward}",
                        ids[i], ids[j]
                    )));
                }
            }
        }

        Ok(Self { ids, index, values })
    }

    /// Distance by participant id
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[[i, j]])
    }

    /// Distance by row/column index; panics when out of bounds
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Participant ids in row order
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Underlying dense table
    #[must_use]
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Average distance over every unordered pair of `members`
    ///
    /// Groups with fewer than two members have no pairs and score zero.
    #[must_use]
    pub fn mean_pairwise(&self, members: &[usize]) -> f64 {
        let mut sum = 0.0;
        let mut pairs = 0usize;
        for (pos, &i) in members.iter().enumerate() {
            for &j in &members[pos + 1..] {
                sum += self.values[[i, j]];
                pairs += 1;
            }
        }
        if pairs == 0 {
            0.0
        } else {
            sum / pairs as f64
        }
    }

    /// Average distance from `from` to every other entry of `others`
    #[must_use]
    pub fn average_distance_to(&self, from: usize, others: &[usize]) -> f64 {
        let (sum, count) = others
            .iter()
            .filter(|&&other| other != from)
            .fold((0.0, 0usize), |(sum, count), &other| {
                (sum + self.values[[from, other]], count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// The most distant pair, first in row order on ties
    #[must_use]
    pub fn most_distant_pair(&self) -> Option<(&str, &str, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        let n = self.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.values[[i, j]];
                if best.map_or(true, |(_, _, current)| d > current) {
                    best = Some((i, j, d));
                }
            }
        }
        best.map(|(i, j, d)| (self.ids[i].as_str(), self.ids[j].as_str(), d))
    }
}

fn index_ids(ids: &[String]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        if index.insert(id.clone(), position).is_some() {
            return Err(DistanceError::DuplicateParticipant(id.clone()));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CulturalProfile;
    use crate::scores::LewisScores;
    use pretty_assertions::assert_eq;

    fn participant(id: &str, l: f64, m: f64, r: f64) -> Participant {
        Participant::new(
            id,
            CulturalProfile::default().with_lewis(LewisScores::new(l, m, r).unwrap()),
        )
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_build_is_symmetric_with_zero_diagonal() {
        let participants = vec![
            participant("a", 0.0, 0.0, 0.0),
            participant("b", 1.0, 0.0, 0.0),
            participant("c", 0.0, 1.0, 1.0),
        ];
        let matrix = DistanceMatrix::build(&participants, Framework::Lewis).unwrap();

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.at(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.at(i, j), matrix.at(j, i));
            }
        }
        assert_eq!(matrix.get("a", "b"), Some(1.0));
        assert!((matrix.get("a", "c").unwrap() - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(matrix.get("a", "zed"), None);
    }

    #[test]
    fn test_build_reports_failing_pair() {
        let participants = vec![
            participant("a", 0.0, 0.0, 0.0),
            Participant::new("b", CulturalProfile::default()),
        ];
        let err = DistanceMatrix::build(&participants, Framework::Lewis).unwrap_err();
        assert_eq!(
            err,
            DistanceError::pair(
                "a",
                "b",
                DistanceError::MissingFrameworkData {
                    framework: Framework::Lewis
                }
            )
        );
    }

    #[test]
    fn test_single_participant_with_missing_data_builds() {
        let participants = vec![Participant::new("solo", CulturalProfile::default())];
        let matrix = DistanceMatrix::build(&participants, Framework::Hofstede).unwrap();
        assert_eq!(matrix.at(0, 0), 0.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let participants = vec![participant("a", 0.0, 0.0, 0.0), participant("a", 1.0, 1.0, 1.0)];
        assert_eq!(
            DistanceMatrix::build(&participants, Framework::Lewis).unwrap_err(),
            DistanceError::DuplicateParticipant("a".to_string())
        );
    }

    #[test]
    fn test_from_rows_validation() {
        let ok = DistanceMatrix::from_rows(
            ids(&["a", "b"]),
            vec![vec![0.0, 0.5], vec![0.5, 0.0]],
        );
        assert!(ok.is_ok());

        let asymmetric = DistanceMatrix::from_rows(
            ids(&["a", "b"]),
            vec![vec![0.0, 0.5], vec![0.4, 0.0]],
        );
        assert!(matches!(asymmetric, Err(DistanceError::InvalidMatrix(_))));

        let diagonal = DistanceMatrix::from_rows(
            ids(&["a", "b"]),
            vec![vec![0.1, 0.5], vec![0.5, 0.0]],
        );
        assert!(matches!(diagonal, Err(DistanceError::InvalidMatrix(_))));

        let negative = DistanceMatrix::from_rows(
            ids(&["a", "b"]),
            vec![vec![0.0, -0.5], vec![-0.5, 0.0]],
        );
        assert!(matches!(negative, Err(DistanceError::InvalidMatrix(_))));

        let ragged = DistanceMatrix::from_rows(ids(&["a", "b"]), vec![vec![0.0], vec![0.5, 0.0]]);
        assert!(matches!(ragged, Err(DistanceError::InvalidMatrix(_))));
    }

    #[test]
    fn test_mean_pairwise_and_average_distance() {
        let matrix = DistanceMatrix::from_rows(
            ids(&["a", "b", "c"]),
            vec![
                vec![0.0, 1.0, 2.0],
                vec![1.0, 0.0, 3.0],
                vec![2.0, 3.0, 0.0],
            ],
        )
        .unwrap();

        assert_eq!(matrix.mean_pairwise(&[0, 1, 2]), 2.0);
        assert_eq!(matrix.mean_pairwise(&[1]), 0.0);
        assert_eq!(matrix.average_distance_to(0, &[0, 1, 2]), 1.5);
        assert_eq!(matrix.average_distance_to(0, &[0]), 0.0);
        assert_eq!(matrix.most_distant_pair(), Some(("b", "c", 3.0)));
    }
}
