// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::{read_bool, write_bool, Snapshot, SnapshotError};
use crate::io::{PortBinding, Registers, Via};

const REGISTERS_SIZE: usize = 36;

impl Snapshot for Registers {
    type State = Registers;

    fn state_size(&self) -> usize {
        REGISTERS_SIZE
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError> {
        writer.write_u8(self.pa)?;
        write_bool(writer, self.ca1)?;
        write_bool(writer, self.ca2)?;
        write_bool(writer, self.ca2_out)?;
        writer.write_u8(self.pb)?;
        write_bool(writer, self.cb1)?;
        write_bool(writer, self.cb2)?;
        write_bool(writer, self.cb2_out)?;
        writer.write_u8(self.ddra)?;
        writer.write_u8(self.ddrb)?;
        writer.write_u8(self.ora)?;
        writer.write_u8(self.orb)?;
        writer.write_u8(self.ira)?;
        writer.write_u8(self.irb)?;
        writer.write_u16::<BigEndian>(self.t1)?;
        writer.write_u16::<BigEndian>(self.t2)?;
        writer.write_u8(self.t1_latch_lo)?;
        writer.write_u8(self.t1_latch_hi)?;
        writer.write_u8(self.t2_latch_lo)?;
        write_bool(writer, self.pb7_toggle)?;
        write_bool(writer, self.pb7_timer_out)?;
        writer.write_u8(self.pcr)?;
        writer.write_u8(self.acr)?;
        writer.write_u8(self.irq_control.get_mask())?;
        writer.write_u8(self.irq_control.get_raw_data())?;
        writer.write_u8(self.sr)?;
        writer.write_u32::<BigEndian>(self.delay.get_cycles())?;
        writer.write_u32::<BigEndian>(self.delay.get_feed())?;
        Ok(())
    }

    fn read_state(reader: &mut dyn Read) -> Result<Registers, SnapshotError> {
        let mut regs = Registers::new();
        regs.pa = reader.read_u8()?;
        regs.ca1 = read_bool(reader)?;
        regs.ca2 = read_bool(reader)?;
        regs.ca2_out = read_bool(reader)?;
        regs.pb = reader.read_u8()?;
        regs.cb1 = read_bool(reader)?;
        regs.cb2 = read_bool(reader)?;
        regs.cb2_out = read_bool(reader)?;
        regs.ddra = reader.read_u8()?;
        regs.ddrb = reader.read_u8()?;
        regs.ora = reader.read_u8()?;
        regs.orb = reader.read_u8()?;
        regs.ira = reader.read_u8()?;
        regs.irb = reader.read_u8()?;
        regs.t1 = reader.read_u16::<BigEndian>()?;
        regs.t2 = reader.read_u16::<BigEndian>()?;
        regs.t1_latch_lo = reader.read_u8()?;
        regs.t1_latch_hi = reader.read_u8()?;
        regs.t2_latch_lo = reader.read_u8()?;
        regs.pb7_toggle = read_bool(reader)?;
        regs.pb7_timer_out = read_bool(reader)?;
        regs.pcr = reader.read_u8()?;
        regs.acr = reader.read_u8()?;
        let mask = reader.read_u8()?;
        let data = reader.read_u8()?;
        regs.irq_control.restore(data, mask);
        regs.sr = reader.read_u8()?;
        let cycles = reader.read_u32::<BigEndian>()?;
        let feed = reader.read_u32::<BigEndian>()?;
        regs.delay.restore(cycles, feed);
        Ok(regs)
    }

    fn restore_state(&mut self, state: Registers) {
        *self = state;
    }
}

impl<P: PortBinding> Snapshot for Via<P> {
    type State = Registers;

    fn state_size(&self) -> usize {
        self.get_registers().state_size()
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError> {
        self.get_registers().save_state(writer)
    }

    fn read_state(reader: &mut dyn Read) -> Result<Registers, SnapshotError> {
        Registers::read_state(reader)
    }

    fn restore_state(&mut self, state: Registers) {
        self.get_registers_mut().restore_state(state);
        self.irq();
    }
}
