use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::time::Duration;

/// Estimated time for a car to reach and serve a hall call.
///
/// Infeasibility is expressed as `Option<Cost>::None` by the producers, so a
/// `Cost` value is always a real estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(Duration);

impl Cost {
    pub const ZERO: Cost = Cost(Duration::ZERO);

    pub fn new(duration: Duration) -> Self {
        Cost(duration)
    }

    pub fn from_millis(millis: u64) -> Self {
        Cost(Duration::from_millis(millis))
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0.as_millis())
    }
}
