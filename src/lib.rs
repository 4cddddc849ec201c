//! Read-only inspection of runit-style supervised services.
//!
//! A service lives at `<root>/<name>`; its supervisor keeps a `supervise/ok`
//! rendezvous FIFO and a 20-byte `supervise/status` record there.

pub mod clock;
pub mod error;
pub mod service;
pub mod status;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use service::{control_file_path, list_services, service, Service, SERVICE_DIR};
pub use status::{
    is_normally_up, is_supervisor_attached, read_status_record, status, Liveness, State,
    StatusSnapshot, Want,
};
