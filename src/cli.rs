use std::fmt;

pub const USAGE: &str = "\nUsage: brmdoor [0|1]\n\n";

/// The state the door switch reported. Both states currently produce the
/// same IRC session; it is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Closed,
    Open,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorState::Closed => write!(f, "closed"),
            DoorState::Open => write!(f, "open"),
        }
    }
}

/// Accepts exactly one argument (program name excluded), `0` or `1`.
pub fn parse_args<I, S>(args: I) -> Option<DoorState>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let state = match args.next()?.as_ref() {
        "0" => DoorState::Closed,
        "1" => DoorState::Open,
        _ => return None,
    };

    if args.next().is_some() {
        return None;
    }
    Some(state)
}
