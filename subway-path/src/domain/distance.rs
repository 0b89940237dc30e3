//! Travel distance between stations.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A non-negative travel distance.
///
/// Segment weights and path totals share this type. Addition saturates
/// instead of wrapping, so a total can never silently become smaller than
/// one of its parts.
///
/// # Examples
///
/// ```
/// use subway_path::domain::Distance;
///
/// let total = Distance::new(2) + Distance::new(2);
/// assert_eq!(total, Distance::new(4));
/// assert_eq!(Distance::ZERO.get(), 0);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Distance(u64);

impl Distance {
    pub const ZERO: Distance = Distance(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Distance {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sum() {
        let parts = [Distance::new(1), Distance::new(2), Distance::new(3)];
        assert_eq!(parts.iter().copied().sum::<Distance>(), Distance::new(6));
        assert_eq!(Distance::new(5) + Distance::ZERO, Distance::new(5));
    }

    #[test]
    fn add_saturates() {
        let big = Distance::new(u64::MAX);
        assert_eq!(big + Distance::new(1), big);
    }

    #[test]
    fn negative_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Distance>("-1").is_err());
        assert_eq!(serde_json::from_str::<Distance>("0").unwrap(), Distance::ZERO);
    }
}
