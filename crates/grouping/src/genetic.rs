use crate::chromosome::{check_partition, Chromosome, Population};
use crate::config::SearchConfig;
use crate::error::SearchFailure;
use crate::rng::SeededStream;
use crate::size::GroupSize;
use culture_distance::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// How a genetic run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generations fully evolved
    pub generations: usize,

    /// Whether the wall-clock budget stopped the run early
    pub timed_out: bool,

    /// Wall time spent, in milliseconds
    pub elapsed_ms: u64,
}

pub(crate) struct SearchOutcome {
    pub best: Chromosome,
    pub stats: SearchStats,
}

/// Seeded genetic search over partitions of matrix indices
///
/// Every stochastic choice draws from one `SeededStream`, so a run is a pure
/// function of (matrix, config, size, seed) as long as the time budget does
/// not cut it short.
pub(crate) struct GeneticSearch<'a> {
    matrix: &'a DistanceMatrix,
    config: &'a SearchConfig,
    size: GroupSize,
    rng: SeededStream,
}

impl<'a> GeneticSearch<'a> {
    pub fn new(
        matrix: &'a DistanceMatrix,
        config: &'a SearchConfig,
        size: GroupSize,
        seed: &str,
    ) -> Self {
        Self {
            matrix,
            config,
            size,
            rng: SeededStream::from_seed(seed),
        }
    }

    pub fn run(mut self) -> Result<SearchOutcome, SearchFailure> {
        let started = Instant::now();
        let timeout = self.config.timeout();

        log::debug!(
            "Genetic search: {} participants, size {}, population {}, up to {} generations in {}ms (state {:#010x})",
            self.matrix.len(),
            self.size,
            self.config.population_size,
            self.config.generations,
            self.config.timeout_ms,
            self.rng.state()
        );

        let mut population = self.initial_population()?;
        let mut best = population
            .best()
            .cloned()
            .ok_or(SearchFailure::EmptyPopulation)?;

        let mut generations = 0;
        let mut timed_out = false;
        while generations < self.config.generations {
            if started.elapsed() >= timeout {
                timed_out = true;
                log::warn!(
                    "Genetic search hit its {}ms budget after {generations} generations; keeping best so far",
                    self.config.timeout_ms
                );
                break;
            }

            population = self.next_generation(population)?;
            generations += 1;

            if let Some(leader) = population.best() {
                if leader.fitness > best.fitness {
                    best = leader.clone();
                }
            }

            if generations % 10 == 0 {
                log::trace!("Generation {generations}: best fitness {:.4}", best.fitness);
            }
        }

        check_partition(&best.groups, self.matrix.len())
            .map_err(SearchFailure::InvariantViolation)?;

        let stats = SearchStats {
            generations,
            timed_out,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::debug!(
            "Genetic search finished: fitness {:.4} after {} generations",
            best.fitness,
            stats.generations
        );

        Ok(SearchOutcome { best, stats })
    }

    fn evaluate(&self, groups: Vec<Vec<usize>>) -> Result<Chromosome, SearchFailure> {
        let chromosome = Chromosome::evaluate(groups, self.matrix);
        if chromosome.fitness.is_finite() {
            Ok(chromosome)
        } else {
            Err(SearchFailure::NonFiniteFitness)
        }
    }

    /// Shuffle-and-slice candidates, ranked
    fn initial_population(&mut self) -> Result<Population, SearchFailure> {
        let n = self.matrix.len();
        let mut members = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(&mut self.rng);
            let groups = self.size.slice(&order, &mut self.rng);
            members.push(self.evaluate(groups)?);
        }

        if members.is_empty() {
            return Err(SearchFailure::EmptyPopulation);
        }
        Ok(Population::ranked(members))
    }

    /// Elites carried over, the rest bred by tournament, crossover and mutation
    fn next_generation(&mut self, population: Population) -> Result<Population, SearchFailure> {
        if population.is_empty() {
            return Err(SearchFailure::EmptyPopulation);
        }

        let target = self.config.population_size;
        let elite_count = self.config.elite_count().min(population.len());
        let mut next: Vec<Chromosome> = population.members()[..elite_count].to_vec();

        while next.len() < target {
            let first = self.tournament(&population);
            let second = self.tournament(&population);
            let mut child = self.crossover(
                &population.members()[first],
                &population.members()[second],
            );
            if self.rng.gen_bool(self.config.mutation_rate) {
                child = self.mutate(child);
            }
            next.push(self.evaluate(child)?);
        }

        Ok(Population::ranked(next))
    }

    /// Index of the fittest of `tournament_size` uniformly drawn candidates
    fn tournament(&mut self, population: &Population) -> usize {
        let members = population.members();
        let mut winner = self.rng.gen_range(0..members.len());
        for _ in 1..self.config.tournament_size {
            let challenger = self.rng.gen_range(0..members.len());
            if members[challenger].fitness > members[winner].fitness {
                winner = challenger;
            }
        }
        winner
    }

    /// Child built on `first`'s groups, pulled toward `second`'s layout
    ///
    /// A participant is disputed when the child group holding most of its
    /// `second` groupmates is not the one it sits in. A share of the disputed
    /// participants is lifted out and each is dropped into the group holding
    /// most of its `second` groupmates, or a random group if none is placed.
    fn crossover(&mut self, first: &Chromosome, second: &Chromosome) -> Vec<Vec<usize>> {
        let n = self.matrix.len();
        let mut child = first.groups.clone();
        let mut location = locate(&child, n);

        let empty: &[usize] = &[];
        let mut mates = vec![empty; n];
        for group in &second.groups {
            for &member in group {
                if member < n {
                    mates[member] = group.as_slice();
                }
            }
        }

        let disputed: Vec<usize> = second
            .groups
            .iter()
            .flatten()
            .copied()
            .filter(|&member| member < n)
            .filter(|&member| {
                matches!(
                    preferred_group(member, mates[member], &location, child.len()),
                    Some(group) if Some(group) != location[member]
                )
            })
            .collect();
        if disputed.is_empty() {
            return self.repair(child);
        }

        let swap_count = ((n as f64 * self.config.crossover_swap_fraction).round() as usize)
            .clamp(1, disputed.len());
        let moved: Vec<usize> = disputed
            .choose_multiple(&mut self.rng, swap_count)
            .copied()
            .collect();

        for group in &mut child {
            group.retain(|member| !moved.contains(member));
        }
        for &member in &moved {
            location[member] = None;
        }

        for member in moved {
            let target = match preferred_group(member, mates[member], &location, child.len()) {
                Some(group) => group,
                None => self.rng.gen_range(0..child.len()),
            };
            child[target].push(member);
            location[member] = Some(target);
        }

        self.repair(child)
    }

    /// Move one random participant into a different random group
    fn mutate(&mut self, mut groups: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        let occupied: Vec<usize> = (0..groups.len())
            .filter(|&index| !groups[index].is_empty())
            .collect();
        if groups.len() < 2 || occupied.is_empty() {
            return self.repair(groups);
        }

        let source = occupied[self.rng.gen_range(0..occupied.len())];
        let position = self.rng.gen_range(0..groups[source].len());
        let member = groups[source].remove(position);

        let mut target = self.rng.gen_range(0..groups.len() - 1);
        if target >= source {
            target += 1;
        }
        groups[target].push(member);

        self.repair(groups)
    }

    /// Restore coverage and size rules after crossover or mutation
    ///
    /// Drops unknown and repeated indices, puts missing ones into random
    /// groups, then flattens and re-slices with the size rule.
    fn repair(&mut self, groups: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        let n = self.matrix.len();
        let mut seen = vec![false; n];
        let mut cleaned: Vec<Vec<usize>> = Vec::with_capacity(groups.len());

        for group in groups {
            let mut kept = Vec::with_capacity(group.len());
            for member in group {
                if member < n && !seen[member] {
                    seen[member] = true;
                    kept.push(member);
                }
            }
            if !kept.is_empty() {
                cleaned.push(kept);
            }
        }

        for member in 0..n {
            if seen[member] {
                continue;
            }
            if cleaned.is_empty() {
                cleaned.push(vec![member]);
            } else {
                let target = self.rng.gen_range(0..cleaned.len());
                cleaned[target].push(member);
            }
        }

        let order: Vec<usize> = cleaned.into_iter().flatten().collect();
        self.size.slice(&order, &mut self.rng)
    }
}

/// Group index of every participant in `groups`
fn locate(groups: &[Vec<usize>], n: usize) -> Vec<Option<usize>> {
    let mut location = vec![None; n];
    for (index, group) in groups.iter().enumerate() {
        for &member in group {
            if let Some(slot) = location.get_mut(member) {
                *slot = Some(index);
            }
        }
    }
    location
}

/// Group holding the most placed `mates` of `member`
///
/// Ties keep the member's current group, then the lowest index. `None` when
/// no mate is placed.
fn preferred_group(
    member: usize,
    mates: &[usize],
    location: &[Option<usize>],
    group_count: usize,
) -> Option<usize> {
    let mut counts = vec![0usize; group_count];
    for &mate in mates.iter().filter(|&&mate| mate != member) {
        if let Some(Some(group)) = location.get(mate) {
            counts[*group] += 1;
        }
    }

    let best = counts.iter().copied().max().filter(|&count| count > 0)?;
    match location.get(member).copied().flatten() {
        Some(current) if counts[current] == best => Some(current),
        _ => counts.iter().position(|&count| count == best),
    }
}
