use nix::errno::Errno;
use nix::fcntl::OFlag;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, instrument};

/// Outcome of opening the `supervise/ok` rendezvous FIFO.
#[derive(Debug)]
pub enum Liveness {
    /// A supervisor holds the read end open.
    Attached,
    /// The FIFO exists but nobody is reading it (`ENXIO`).
    NotAttached,
    /// Any other failure. Not evidence either way.
    Failed(io::Error),
}

impl Liveness {
    pub fn is_attached(&self) -> bool {
        matches!(self, Liveness::Attached)
    }
}

/// Opens `path` write-only and non-blocking, then closes it again.
#[instrument]
pub fn probe(path: &Path) -> Liveness {
    let opened = OpenOptions::new()
        .write(true)
        .custom_flags(OFlag::O_NONBLOCK.bits())
        .open(path);

    match opened {
        Ok(_file) => {
            debug!("Supervisor attached");
            Liveness::Attached
        }
        Err(err) if err.raw_os_error() == Some(Errno::ENXIO as i32) => {
            debug!("No supervisor listening");
            Liveness::NotAttached
        }
        Err(err) => {
            debug!(?err, "Probe failed");
            Liveness::Failed(err)
        }
    }
}
