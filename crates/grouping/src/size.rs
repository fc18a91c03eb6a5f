use crate::error::GroupingError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target group size for a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GroupSize {
    /// Groups of exactly 3; the last group takes the remainder
    Three,
    /// Groups of exactly 4; the last group takes the remainder
    Four,
    /// Each group is 3 or 4, chosen as groups are formed
    Flexible,
}

impl GroupSize {
    /// Smallest participant count that can be partitioned at all
    pub const MIN_PARTICIPANTS: usize = 3;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Three => "3",
            Self::Four => "4",
            Self::Flexible => "flexible",
        }
    }

    /// Largest group this mode ever forms, remainder groups aside
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Flexible | Self::Four => 4,
        }
    }

    /// Size of the next group when `remaining` participants are ungrouped
    ///
    /// Flexible: three or fewer left all go together; exactly four or five
    /// left take three; otherwise three or four is drawn from `rng`.
    pub fn next_len<R: Rng + ?Sized>(self, remaining: usize, rng: &mut R) -> usize {
        match self {
            Self::Three | Self::Four => remaining.min(self.max_len()),
            Self::Flexible => match remaining {
                0..=3 => remaining,
                4 | 5 => 3,
                _ => rng.gen_range(3..=4),
            },
        }
    }

    /// Deterministic counterpart of `next_len` used by greedy construction
    ///
    /// Where `next_len` draws three or four, a group that has reached three
    /// continues to four only if the participants left after it still split
    /// into groups of three and four.
    #[must_use]
    pub fn greedy_len(self, remaining: usize) -> usize {
        match self {
            Self::Three | Self::Four => remaining.min(self.max_len()),
            Self::Flexible => match remaining {
                0..=3 => remaining,
                4 | 5 => 3,
                _ if Self::splits_cleanly(remaining - 4) => 4,
                _ => 3,
            },
        }
    }

    /// Whether `count` flexible participants end without a group under three
    ///
    /// 1, 2, 4, 5 and 8 always leave a remainder of one or two.
    const fn splits_cleanly(count: usize) -> bool {
        matches!(count, 0 | 3 | 6 | 7) || count >= 9
    }

    /// Cut `order` into consecutive groups following `next_len`
    pub fn slice<R: Rng + ?Sized>(self, order: &[usize], rng: &mut R) -> Vec<Vec<usize>> {
        let mut groups = Vec::new();
        let mut start = 0;
        while start < order.len() {
            let len = self.next_len(order.len() - start, rng);
            groups.push(order[start..start + len].to_vec());
            start += len;
        }
        groups
    }
}

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupSize {
    type Err = GroupingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3" | "three" => Ok(Self::Three),
            "4" | "four" => Ok(Self::Four),
            "flexible" | "flex" => Ok(Self::Flexible),
            _ => Err(GroupingError::UnknownGroupSize(s.to_string())),
        }
    }
}

impl TryFrom<String> for GroupSize {
    type Error = GroupingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GroupSize> for String {
    fn from(size: GroupSize) -> Self {
        size.as_str().to_string()
    }
}
