use culture_distance::DistanceMatrix;

/// Sum over groups of each group's mean intra-group distance
///
/// Averages rather than totals keep groups of unequal size comparable.
pub fn fitness(groups: &[Vec<usize>], matrix: &DistanceMatrix) -> f64 {
    groups.iter().map(|group| matrix.mean_pairwise(group)).sum()
}

/// A candidate partition (matrix indices) with its evaluated fitness
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chromosome {
    pub groups: Vec<Vec<usize>>,
    pub fitness: f64,
}

impl Chromosome {
    pub fn evaluate(groups: Vec<Vec<usize>>, matrix: &DistanceMatrix) -> Self {
        let fitness = fitness(&groups, matrix);
        Self { groups, fitness }
    }
}

/// One generation of candidates, owned and handed from step to step
#[derive(Debug, Clone)]
pub(crate) struct Population {
    members: Vec<Chromosome>,
}

impl Population {
    /// Wrap `members`, ordered by fitness descending
    ///
    /// The sort is stable so equal fitness keeps creation order.
    pub fn ranked(mut members: Vec<Chromosome>) -> Self {
        members.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Self { members }
    }

    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn best(&self) -> Option<&Chromosome> {
        self.members.first()
    }
}

/// Check that `groups` covers `0..n` exactly once with no empty group
pub(crate) fn check_partition(groups: &[Vec<usize>], n: usize) -> Result<(), String> {
    let mut seen = vec![false; n];
    for (position, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(format!("group {position} is empty"));
        }
        for &member in group {
            match seen.get_mut(member) {
                None => return Err(format!("unknown participant index {member}")),
                Some(true) => return Err(format!("participant index {member} appears twice")),
                Some(slot) => *slot = true,
            }
        }
    }

    if let Some(missing) = seen.iter().position(|placed| !placed) {
        return Err(format!("participant index {missing} is not placed"));
    }

    Ok(())
}
