// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use super::{read_bool, write_bool, Snapshot, SnapshotError};
use crate::drive::{DiskDrive, DriveMechanics, MAX_HALFTRACK, MIN_HALFTRACK};
use crate::io::Registers;

const MECHANICS_SIZE: usize = 8;

pub struct MechanicsState {
    halftrack: u8,
    zone: u8,
    red_led: bool,
    motor: bool,
    sync: bool,
    light_barrier: bool,
    read_mode: bool,
    data: u8,
}

impl Snapshot for DriveMechanics {
    type State = MechanicsState;

    fn state_size(&self) -> usize {
        MECHANICS_SIZE
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError> {
        writer.write_u8(self.halftrack)?;
        writer.write_u8(self.zone)?;
        write_bool(writer, self.red_led)?;
        write_bool(writer, self.motor)?;
        write_bool(writer, self.sync)?;
        write_bool(writer, self.light_barrier)?;
        write_bool(writer, self.read_mode)?;
        writer.write_u8(self.data)?;
        Ok(())
    }

    fn read_state(reader: &mut dyn Read) -> Result<MechanicsState, SnapshotError> {
        let halftrack = reader.read_u8()?;
        if halftrack < MIN_HALFTRACK || halftrack > MAX_HALFTRACK {
            return Err(SnapshotError::InvalidHalftrack(halftrack));
        }
        Ok(MechanicsState {
            halftrack,
            zone: reader.read_u8()? & 0x03,
            red_led: read_bool(reader)?,
            motor: read_bool(reader)?,
            sync: read_bool(reader)?,
            light_barrier: read_bool(reader)?,
            read_mode: read_bool(reader)?,
            data: reader.read_u8()?,
        })
    }

    fn restore_state(&mut self, state: MechanicsState) {
        self.halftrack = state.halftrack;
        self.zone = state.zone;
        self.red_led = state.red_led;
        self.motor = state.motor;
        self.sync = state.sync;
        self.light_barrier = state.light_barrier;
        self.read_mode = state.read_mode;
        self.data = state.data;
    }
}

pub struct DriveState {
    via1: Registers,
    via2: Registers,
    mechanics: MechanicsState,
}

impl Snapshot for DiskDrive {
    type State = DriveState;

    fn state_size(&self) -> usize {
        self.get_via1().state_size()
            + self.get_via2().state_size()
            + self.get_mechanics().borrow().state_size()
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError> {
        self.get_via1().save_state(writer)?;
        self.get_via2().save_state(writer)?;
        self.get_mechanics().borrow().save_state(writer)
    }

    fn read_state(reader: &mut dyn Read) -> Result<DriveState, SnapshotError> {
        Ok(DriveState {
            via1: Registers::read_state(reader)?,
            via2: Registers::read_state(reader)?,
            mechanics: DriveMechanics::read_state(reader)?,
        })
    }

    fn restore_state(&mut self, state: DriveState) {
        self.get_mechanics().borrow_mut().restore_state(state.mechanics);
        self.get_via1_mut().restore_state(state.via1);
        let via2 = self.get_via2_mut();
        via2.restore_state(state.via2);
        let regs = via2.get_registers().clone();
        via2.get_port_mut().sync_stepper(&regs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriveConfig;
    use crate::drive::IecBus;
    use crate::io::reg;
    use crate::state::{load_from_buffer, save_to_buffer};
    use zinc64_core::{new_shared, Chip};

    fn setup_drive() -> DiskDrive {
        DiskDrive::new(&DriveConfig::default(), new_shared(IecBus::new()))
    }

    #[test]
    fn drive_round_trip() {
        let mut drive = setup_drive();
        drive.get_via2_mut().poke(reg::DDRB, 0x6f);
        drive.get_via2_mut().poke(reg::ORB, 0x0d);
        drive.byte_ready(0x99);
        drive.clock_delta(10);
        let buffer = save_to_buffer(&drive).unwrap();
        assert_eq!(36 + 36 + MECHANICS_SIZE, buffer.len());
        let mut restored = setup_drive();
        load_from_buffer(&mut restored, &buffer).unwrap();
        let mechanics = restored.get_mechanics();
        assert_eq!(42, mechanics.borrow().get_halftrack());
        assert_eq!(true, mechanics.borrow().is_motor_on());
        assert_eq!(0x99, mechanics.borrow().get_data());
        assert_eq!(
            drive.get_via2().get_registers(),
            restored.get_via2().get_registers()
        );
    }

    #[test]
    fn restore_keeps_stepper_phase() {
        let mut drive = setup_drive();
        drive.get_via2_mut().poke(reg::DDRB, 0x6f);
        drive.get_via2_mut().poke(reg::ORB, 0x02);
        let buffer = save_to_buffer(&drive).unwrap();
        let mut restored = setup_drive();
        load_from_buffer(&mut restored, &buffer).unwrap();
        assert_eq!(41, restored.get_mechanics().borrow().get_halftrack());
        restored.get_via2_mut().poke(reg::ORB, 0x03);
        assert_eq!(42, restored.get_mechanics().borrow().get_halftrack());
    }

    #[test]
    fn invalid_halftrack_is_rejected() {
        let drive = setup_drive();
        let mut buffer = save_to_buffer(&drive).unwrap();
        buffer[72] = 0;
        let mut restored = setup_drive();
        assert_eq!(
            true,
            matches!(
                load_from_buffer(&mut restored, &buffer),
                Err(SnapshotError::InvalidHalftrack(0))
            )
        );
    }
}
