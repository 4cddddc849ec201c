use serde::Serialize;
use std::time::Duration;
use svstatus::{Error, State, StatusSnapshot, Want};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Yaml,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Entry {
    pub name: String,
    /// `None` when the supervisor probe could not tell either way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervised: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Entry {
    pub fn new(name: &str, result: &svstatus::Result<StatusSnapshot>) -> Self {
        let (supervised, status, error) = match result {
            Ok(snapshot) => (Some(true), Some(snapshot.clone()), None),
            Err(Error::SupervisorNotRunning(_)) => (Some(false), None, None),
            Err(err @ Error::UnexpectedIoCondition { .. }) => (None, None, Some(error_chain(err))),
            Err(err) => (Some(true), None, Some(error_chain(err))),
        };
        Self {
            name: name.into(),
            supervised,
            status,
            error,
        }
    }
}

/// One line per service, in the style of `sv status`.
pub fn text_line(name: &str, result: &svstatus::Result<StatusSnapshot>) -> String {
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(Error::SupervisorNotRunning(_)) => return format!("down: {name}: supervisor not running"),
        Err(err) => return format!("fail: {name}: {}", error_chain(err)),
    };

    let mut line = format!("{}: {name}: ", snapshot.state);
    if let Some(pid) = snapshot.live_pid() {
        line.push_str(&format!("(pid {pid}) "));
    }
    line.push_str(&elapsed(snapshot.elapsed_seconds));

    match (snapshot.state, snapshot.normally_up) {
        (State::Down, true) => line.push_str(", normally up"),
        (State::Up | State::Finish, false) => line.push_str(", normally down"),
        _ => {}
    }
    match (snapshot.state, snapshot.want_up) {
        (State::Down, Want::Up) => line.push_str(", want up"),
        (State::Up | State::Finish, Want::Down) => line.push_str(", want down"),
        _ => {}
    }
    line
}

pub fn yaml(entries: &[Entry]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(entries)
}

fn elapsed(seconds: i64) -> String {
    let seconds = u64::try_from(seconds).unwrap_or_default();
    humantime::format_duration(Duration::from_secs(seconds)).to_string()
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
