use std::io;
use std::path::PathBuf;

pub type Result<R, E = Error> = std::result::Result<R, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The rendezvous file has no listener. Expected for unsupervised services.
    #[error("supervisor not running for service {0}")]
    SupervisorNotRunning(String),

    #[error("unable to read directory {}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read status file {}", path.display())]
    StatusFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("status record {} truncated: read {read} of {expected} bytes", path.display())]
    StatusRecordTruncated {
        path: PathBuf,
        read: usize,
        expected: usize,
    },

    #[error("unexpected error probing supervisor at {}", path.display())]
    UnexpectedIoCondition {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid state byte {0:#04x} in status record")]
    InvalidStateByte(u8),

    #[error("invalid want byte {0:#04x} in status record")]
    InvalidWantByte(u8),
}

impl Error {
    /// True for the well-defined "no supervisor attached" outcome.
    pub fn is_not_running(&self) -> bool {
        matches!(self, Error::SupervisorNotRunning(_))
    }

    /// True when the status record itself is damaged.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::StatusRecordTruncated { .. }
                | Error::InvalidStateByte(_)
                | Error::InvalidWantByte(_)
        )
    }
}
