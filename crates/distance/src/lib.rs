//! # Culture Distance
//!
//! Cultural-dimension score vectors and a single normalized pairwise distance
//! over them.
//!
//! ## Frameworks
//!
//! - **Lewis** - 3 dimensions (linear-active, multi-active, reactive)
//! - **Hall** - 3 dimensions (context, time, space)
//! - **Hofstede** - 6 dimensions
//! - **Combined** - each shared framework normalized to [0, 1], then averaged
//!
//! ## Architecture
//!
//! ```text
//! Participant { id, CulturalProfile }
//!     │
//!     ├──> Distance Engine
//!     │      ├─ named: Euclidean over one framework
//!     │      └─ combined: mean of distance / √dimensions over shared frameworks
//!     │
//!     └──> DistanceMatrix (ndarray, symmetric, zero diagonal)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use culture_distance::{CulturalProfile, DistanceMatrix, Framework, LewisScores, Participant};
//!
//! let participants = vec![
//!     Participant::new("ana", CulturalProfile::default().with_lewis(LewisScores::new(0.8, 0.1, 0.1)?)),
//!     Participant::new("kenji", CulturalProfile::default().with_lewis(LewisScores::new(0.2, 0.1, 0.9)?)),
//! ];
//!
//! let matrix = DistanceMatrix::build(&participants, Framework::Lewis)?;
//! assert_eq!(matrix.get("ana", "ana"), Some(0.0));
//! assert_eq!(matrix.get("ana", "kenji"), matrix.get("kenji", "ana"));
//! # Ok::<(), culture_distance::DistanceError>(())
//! ```

mod distance;
mod error;
mod framework;
mod matrix;
mod profile;
mod scores;

pub use distance::{distance, validate_participants};
pub use error::{DistanceError, Result};
pub use framework::Framework;
pub use matrix::DistanceMatrix;
pub use profile::{CulturalProfile, Participant};
pub use scores::{HallScores, HofstedeScores, LewisScores, ScoreVector};
