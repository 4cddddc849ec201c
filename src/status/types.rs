use serde::Serialize;
use std::fmt;

/// Current state of the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    Down,
    Up,
    Finish,
}

/// State the supervisor has been asked to keep the service in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Want {
    Down,
    Up,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Down => "down",
            State::Up => "up",
            State::Finish => "finish",
        }
    }
}

impl Want {
    pub fn as_str(&self) -> &'static str {
        match self {
            Want::Down => "down",
            Want::Up => "up",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Want {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatusSnapshot {
    /// Only meaningful when `state` is not [`State::Down`].
    pub pid: u32,
    /// Seconds since the last state change. Negative under clock skew.
    pub elapsed_seconds: i64,
    pub state: State,
    pub want_up: Want,
    pub normally_up: bool,
}

impl StatusSnapshot {
    /// Pid of the supervised process, if one is running or finishing.
    pub fn live_pid(&self) -> Option<u32> {
        match self.state {
            State::Down => None,
            State::Up | State::Finish => Some(self.pid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(State::Down.to_string(), "down");
        assert_eq!(State::Up.to_string(), "up");
        assert_eq!(State::Finish.to_string(), "finish");
        assert_eq!(Want::Up.as_str(), "up");
        assert_eq!(Want::Down.as_str(), "down");
    }

    #[test]
    fn live_pid_hidden_when_down() {
        let mut snapshot = StatusSnapshot {
            pid: 42,
            elapsed_seconds: 5,
            state: State::Down,
            want_up: Want::Up,
            normally_up: true,
        };
        assert_eq!(snapshot.live_pid(), None);
        snapshot.state = State::Finish;
        assert_eq!(snapshot.live_pid(), Some(42));
    }

    #[test]
    fn serialize() {
        let snapshot = StatusSnapshot {
            pid: 1234,
            elapsed_seconds: 60,
            state: State::Up,
            want_up: Want::Up,
            normally_up: false,
        };
        assert_eq!(
            serde_yaml::to_string(&snapshot).unwrap(),
            "pid: 1234\nelapsed-seconds: 60\nstate: up\nwant-up: up\nnormally-up: false\n"
        );
    }
}
