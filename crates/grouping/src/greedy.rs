use crate::size::GroupSize;
use culture_distance::DistanceMatrix;

/// Deterministic max-min diversification
///
/// Participants are visited in lexicographic id order. Each group starts from
/// the remaining participant with the highest average distance to the rest of
/// the pool, then repeatedly adds the candidate whose *closest* current member
/// is farthest away. Ties go to the first candidate encountered.
pub(crate) fn greedy_partition(matrix: &DistanceMatrix, size: GroupSize) -> Vec<Vec<usize>> {
    let mut pool: Vec<usize> = (0..matrix.len()).collect();
    pool.sort_by(|&a, &b| matrix.id(a).cmp(matrix.id(b)));

    let mut groups = Vec::new();
    while !pool.is_empty() {
        let target = size.greedy_len(pool.len());

        let anchor = most_isolated(matrix, &pool);
        let mut group = vec![pool.remove(anchor)];

        while group.len() < target && !pool.is_empty() {
            let next = farthest_from_group(matrix, &pool, &group);
            group.push(pool.remove(next));
        }

        log::trace!("Greedy group {}: {} members", groups.len() + 1, group.len());
        groups.push(group);
    }

    groups
}

/// Position in `pool` with the highest average distance to the rest
fn most_isolated(matrix: &DistanceMatrix, pool: &[usize]) -> usize {
    let mut best = 0;
    let mut best_score = matrix.average_distance_to(pool[0], pool);
    for (position, &candidate) in pool.iter().enumerate().skip(1) {
        let score = matrix.average_distance_to(candidate, pool);
        if score > best_score {
            best = position;
            best_score = score;
        }
    }
    best
}

/// Position in `pool` maximizing the minimum distance to `group`
fn farthest_from_group(matrix: &DistanceMatrix, pool: &[usize], group: &[usize]) -> usize {
    let min_distance = |candidate: usize| {
        group
            .iter()
            .map(|&member| matrix.at(candidate, member))
            .fold(f64::INFINITY, f64::min)
    };

    let mut best = 0;
    let mut best_score = min_distance(pool[0]);
    for (position, &candidate) in pool.iter().enumerate().skip(1) {
        let score = min_distance(candidate);
        if score > best_score {
            best = position;
            best_score = score;
        }
    }
    best
}
