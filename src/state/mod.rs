// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

mod cartridge;
mod drive;
mod registers;

pub use self::cartridge::CartridgeState;
pub use self::drive::{DriveState, MechanicsState};

use std::io::{self, Cursor, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("state size mismatch, expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid chip {index} at {start:04x} size {size:04x}")]
    InvalidChip { index: usize, start: u16, size: u16 },
    #[error("invalid bank index {0}")]
    InvalidBankIndex(u8),
    #[error("invalid halftrack {0}")]
    InvalidHalftrack(u8),
}

/// Flat, versionless state image of a component. Loading is split in two
/// so that nothing is changed until the whole image has been decoded.
pub trait Snapshot {
    type State;

    /// Exact number of bytes written by `save_state`.
    fn state_size(&self) -> usize;
    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError>;
    fn read_state(reader: &mut dyn Read) -> Result<Self::State, SnapshotError>;
    fn restore_state(&mut self, state: Self::State);
}

pub fn save_to_buffer<T: Snapshot>(item: &T) -> Result<Vec<u8>, SnapshotError> {
    let expected = item.state_size();
    let mut buffer = Vec::with_capacity(expected);
    item.save_state(&mut buffer)?;
    if buffer.len() != expected {
        return Err(SnapshotError::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    debug!(target: "state", "Saved {} bytes", expected);
    Ok(buffer)
}

pub fn load_from_buffer<T: Snapshot>(item: &mut T, buffer: &[u8]) -> Result<(), SnapshotError> {
    let mut cursor = Cursor::new(buffer);
    let state = T::read_state(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != buffer.len() {
        warn!(
            target: "state",
            "Rejected state, decoded {} of {} bytes",
            consumed,
            buffer.len()
        );
        return Err(SnapshotError::SizeMismatch {
            expected: consumed,
            actual: buffer.len(),
        });
    }
    item.restore_state(state);
    debug!(target: "state", "Loaded {} bytes", consumed);
    Ok(())
}

fn read_bool(reader: &mut dyn Read) -> io::Result<bool> {
    Ok(reader.read_u8()? != 0)
}

fn write_bool(writer: &mut dyn Write, value: bool) -> io::Result<()> {
    writer.write_u8(value as u8)
}
