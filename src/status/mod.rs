mod probe;
pub mod record;
mod types;

pub use self::probe::Liveness;
pub use self::record::{decode, Record, RECORD_LEN, TAI_OFFSET};
pub use self::types::{State, StatusSnapshot, Want};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::service::Service;
use std::fs::File;
use std::io::{self, Read};
use tracing::{instrument, trace};

const OK_FILE: &str = "ok";
const STATUS_FILE: &str = "status";
const DOWN_FILE: &str = "down";

/// Probes the `ok` rendezvous file of `service`.
pub fn is_supervisor_attached(service: &Service) -> Liveness {
    probe::probe(&service.control_file(OK_FILE))
}

/// False when a `down` marker is present in the service directory.
///
/// Errors other than "not found" count as present.
pub fn is_normally_up(service: &Service) -> bool {
    match service.dir().join(DOWN_FILE).metadata() {
        Ok(_) => false,
        Err(err) => err.kind() == io::ErrorKind::NotFound,
    }
}

/// Reads the raw status record. A short read is an error.
#[instrument(skip(service), fields(service = %service.name))]
pub fn read_status_record(service: &Service) -> Result<Record> {
    let path = service.control_file(STATUS_FILE);
    let unreadable = |source| Error::StatusFileUnreadable {
        path: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(unreadable)?;
    let mut buf = Vec::with_capacity(RECORD_LEN);
    file.take(RECORD_LEN as u64)
        .read_to_end(&mut buf)
        .map_err(unreadable)?;
    trace!(read = buf.len(), "Read status record");

    let read = buf.len();
    buf.try_into().map_err(|_| Error::StatusRecordTruncated {
        path,
        read,
        expected: RECORD_LEN,
    })
}

/// Queries the supervisor-tracked state of `service`.
#[instrument(skip(service, clock), fields(service = %service.name))]
pub fn status(service: &Service, clock: &impl Clock) -> Result<StatusSnapshot> {
    match is_supervisor_attached(service) {
        Liveness::Attached => {}
        Liveness::NotAttached => return Err(Error::SupervisorNotRunning(service.name.clone())),
        Liveness::Failed(source) => {
            return Err(Error::UnexpectedIoCondition {
                path: service.control_file(OK_FILE),
                source,
            })
        }
    }

    let record = read_status_record(service)?;
    let normally_up = is_normally_up(service);
    decode(&record, clock.now(), normally_up)
}
