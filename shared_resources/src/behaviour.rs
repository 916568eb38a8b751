use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behaviour {
    Idle,
    Moving,
    DoorOpen,
}

impl Behaviour {
    pub fn as_str(self) -> &'static str {
        match self {
            Behaviour::Idle => "idle",
            Behaviour::Moving => "moving",
            Behaviour::DoorOpen => "doorOpen",
        }
    }
}

impl fmt::Display for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behaviour {
    type Err = String;

    // Callers built against older assigners send "doorsOpen".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Behaviour::Idle),
            "moving" => Ok(Behaviour::Moving),
            "doorOpen" | "doorsOpen" => Ok(Behaviour::DoorOpen),
            other => Err(other.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_door_spellings() {
        assert_eq!("doorOpen".parse::<Behaviour>(), Ok(Behaviour::DoorOpen));
        assert_eq!("doorsOpen".parse::<Behaviour>(), Ok(Behaviour::DoorOpen));
        assert_eq!("idle".parse::<Behaviour>(), Ok(Behaviour::Idle));
        assert!("stuck".parse::<Behaviour>().is_err());
    }
}
