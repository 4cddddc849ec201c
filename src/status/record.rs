//! Layout of the 20-byte `supervise/status` record.
//!
//! ```text
//! bytes  0..8   TAI64 label, big-endian
//! bytes 12..15  pid, little-endian
//! byte  17      want: 'u' or 'd'
//! byte  19      state: 0 down, 1 up, 2 finish
//! ```

use super::types::{State, StatusSnapshot, Want};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

pub const RECORD_LEN: usize = 20;

/// Difference between the TAI64 label base and the Unix epoch, in seconds.
pub const TAI_OFFSET: i64 = 4611686018427387914;

pub type Record = [u8; RECORD_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// A fixed byte range inside the record.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub endian: Endian,
}

pub const TIMESTAMP: Field = Field {
    name: "timestamp",
    offset: 0,
    width: 8,
    endian: Endian::Big,
};

pub const PID: Field = Field {
    name: "pid",
    offset: 12,
    width: 3,
    endian: Endian::Little,
};

pub const WANT: Field = Field {
    name: "want",
    offset: 17,
    width: 1,
    endian: Endian::Little,
};

pub const STATE: Field = Field {
    name: "state",
    offset: 19,
    width: 1,
    endian: Endian::Little,
};

const WANT_UP: u8 = b'u';
const WANT_DOWN: u8 = b'd';

const STATE_DOWN: u8 = 0;
const STATE_UP: u8 = 1;
const STATE_FINISH: u8 = 2;

impl Field {
    pub fn bytes<'a>(&self, record: &'a Record) -> &'a [u8] {
        &record[self.offset..self.offset + self.width]
    }

    /// Unsigned value of the field. Width is at most 8.
    pub fn read(&self, record: &Record) -> u64 {
        let bytes = self.bytes(record);
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
        match self.endian {
            Endian::Big => bytes.iter().fold(0, fold),
            Endian::Little => bytes.iter().rev().fold(0, fold),
        }
    }

    pub fn write(&self, record: &mut Record, value: u64) {
        let bytes = &mut record[self.offset..self.offset + self.width];
        for i in 0..self.width {
            let byte = (value >> (8 * i)) as u8;
            match self.endian {
                Endian::Big => bytes[self.width - 1 - i] = byte,
                Endian::Little => bytes[i] = byte,
            }
        }
    }

    fn byte(&self, record: &Record) -> u8 {
        record[self.offset]
    }
}

pub fn decode_state(byte: u8) -> Result<State> {
    match byte {
        STATE_DOWN => Ok(State::Down),
        STATE_UP => Ok(State::Up),
        STATE_FINISH => Ok(State::Finish),
        other => Err(Error::InvalidStateByte(other)),
    }
}

pub fn decode_want(byte: u8) -> Result<Want> {
    match byte {
        WANT_UP => Ok(Want::Up),
        WANT_DOWN => Ok(Want::Down),
        other => Err(Error::InvalidWantByte(other)),
    }
}

/// Converts the raw TAI64 label to Unix seconds.
pub fn unix_seconds(record: &Record) -> i64 {
    (TIMESTAMP.read(record) as i64).wrapping_sub(TAI_OFFSET)
}

/// Decodes a status record as seen at `now`. No I/O.
pub fn decode(record: &Record, now: DateTime<Utc>, normally_up: bool) -> Result<StatusSnapshot> {
    let state = decode_state(STATE.byte(record))?;
    let want_up = decode_want(WANT.byte(record))?;

    Ok(StatusSnapshot {
        pid: PID.read(record) as u32,
        elapsed_seconds: now.timestamp().wrapping_sub(unix_seconds(record)),
        state,
        want_up,
        normally_up,
    })
}

/// Builds a record the way the supervisor lays it out.
pub fn encode(unix_seconds: i64, pid: u32, want: Want, state: State) -> Record {
    let mut record = [0u8; RECORD_LEN];
    TIMESTAMP.write(&mut record, unix_seconds.wrapping_add(TAI_OFFSET) as u64);
    PID.write(&mut record, u64::from(pid));
    record[WANT.offset] = match want {
        Want::Up => WANT_UP,
        Want::Down => WANT_DOWN,
    };
    record[STATE.offset] = match state {
        State::Down => STATE_DOWN,
        State::Up => STATE_UP,
        State::Finish => STATE_FINISH,
    };
    record
}
