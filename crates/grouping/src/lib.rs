//! # Culture Grouping
//!
//! Partition participants into small groups that are as culturally
//! heterogeneous as possible.
//!
//! ## Architecture
//!
//! ```text
//! Participant[] + Framework
//!     │
//!     ├──> DistanceMatrix (built once per run)
//!     │
//!     ├──> seed given ──> Genetic search (SeededStream)
//!     │      ├─ shuffle-and-slice initial population
//!     │      ├─ elites + tournament selection
//!     │      ├─ crossover / mutation, each followed by repair
//!     │      └─ stop at generation limit or time budget
//!     │
//!     └──> no seed, or search failure ──> Greedy max-min construction
//! ```
//!
//! Fitness is the sum over groups of each group's mean pairwise distance.
//! Both paths honor the same size rule, so every participant lands in exactly
//! one group.
//!
//! ## Example
//!
//! ```rust
//! use culture_distance::{CulturalProfile, Framework, LewisScores, Participant};
//! use culture_grouping::{GroupSize, Partitioner};
//!
//! let participants: Vec<Participant> = (0..6)
//!     .map(|i| {
//!         let x = f64::from(i) / 6.0;
//!         let lewis = LewisScores::new(x, 1.0 - x, 0.5).unwrap();
//!         Participant::new(format!("p{i}"), CulturalProfile::default().with_lewis(lewis))
//!     })
//!     .collect();
//!
//! let partition = Partitioner::default()
//!     .partition(&participants, Framework::Lewis, GroupSize::Three, Some("workshop-42"))
//!     .unwrap();
//! assert_eq!(partition.groups.len(), 2);
//! ```

mod chromosome;
mod config;
mod error;
mod genetic;
mod greedy;
mod partitioner;
mod rng;
mod size;

pub use chromosome::fitness;
pub use config::SearchConfig;
pub use error::{GroupingError, Result, SearchFailure};
pub use genetic::SearchStats;
pub use partitioner::{partition, FallbackReason, Partition, PartitionOutcome, Partitioner};
pub use rng::SeededStream;
pub use size::GroupSize;
