use std::fmt;

/// Button column in a floor's request row: the two hall buttons followed by
/// the cab button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Call {
    HallUp = 0,
    HallDown = 1,
    Cab = 2,
}

impl Call {
    pub fn num_calls() -> u8 {
        3
    }

    pub fn num_hall_calls() -> u8 {
        2
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_hall(self) -> bool {
        !matches!(self, Call::Cab)
    }

    pub fn iter_hall() -> impl Iterator<Item = Call> {
        [Call::HallUp, Call::HallDown].iter().copied()
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::HallUp => write!(f, "hall up"),
            Call::HallDown => write!(f, "hall down"),
            Call::Cab => write!(f, "cab"),
        }
    }
}
