// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

mod disk_port;
mod iec_bus;
mod mechanics;
mod serial_port;

pub use self::disk_port::DiskPort;
pub use self::iec_bus::IecBus;
pub use self::mechanics::{DriveMechanics, MAX_HALFTRACK, MIN_HALFTRACK};
pub use self::serial_port::SerialPort;

use zinc64_core::{new_shared, Chip, IrqLine, SerialBus, Shared};

use crate::config::DriveConfig;
use crate::io::{Port, Via};

#[derive(Copy, Clone)]
pub enum IrqSource {
    Via1 = 0,
    Via2 = 1,
}

impl IrqSource {
    pub fn value(self) -> usize {
        self as usize
    }
}

/// The two interface chips of a 1541 together with the mechanics they drive.
pub struct DiskDrive {
    // Dependencies
    bus: Shared<IecBus>,
    irq_line: Shared<IrqLine>,
    mechanics: Shared<DriveMechanics>,
    // Chipset
    via1: Via<SerialPort>,
    via2: Via<DiskPort>,
}

impl DiskDrive {
    pub fn new(config: &DriveConfig, bus: Shared<IecBus>) -> Self {
        let irq_line = new_shared(IrqLine::new("drive"));
        let mechanics = new_shared(DriveMechanics::new(config.halftrack));
        let serial_port = SerialPort::new(bus.clone(), config.device_number);
        let disk_port = DiskPort::new(mechanics.clone());
        let mut drive = Self {
            bus,
            irq_line: irq_line.clone(),
            mechanics,
            via1: Via::new("via1", IrqSource::Via1.value(), serial_port, irq_line.clone()),
            via2: Via::new("via2", IrqSource::Via2.value(), disk_port, irq_line),
        };
        drive.reset();
        drive
    }

    pub fn get_bus(&self) -> Shared<IecBus> {
        self.bus.clone()
    }

    pub fn get_irq_line(&self) -> Shared<IrqLine> {
        self.irq_line.clone()
    }

    pub fn get_mechanics(&self) -> Shared<DriveMechanics> {
        self.mechanics.clone()
    }

    pub fn get_via1(&self) -> &Via<SerialPort> {
        &self.via1
    }

    pub fn get_via1_mut(&mut self) -> &mut Via<SerialPort> {
        &mut self.via1
    }

    pub fn get_via2(&self) -> &Via<DiskPort> {
        &self.via2
    }

    pub fn get_via2_mut(&mut self) -> &mut Via<DiskPort> {
        &mut self.via2
    }

    pub fn is_irq(&self) -> bool {
        self.irq_line.borrow().is_low()
    }

    pub fn clock(&mut self) {
        self.via1.clock();
        self.via2.clock();
    }

    pub fn clock_delta(&mut self, delta: u32) {
        for _i in 0..delta {
            self.clock();
        }
    }

    pub fn reset(&mut self) {
        self.mechanics.borrow_mut().reset();
        self.irq_line.borrow_mut().reset();
        self.via1.reset();
        self.via2.reset();
        // BYTE READY idles high
        self.via2.set_control_line_1(Port::A, true);
        let atn = self.bus.borrow().atn_line();
        self.via1.set_control_line_1(Port::A, !atn);
    }

    /// Host side ATN. The line reaches CA1 of the serial chip inverted.
    pub fn set_atn(&mut self, value: bool) {
        self.bus.borrow_mut().set_atn(value);
        let atn = self.bus.borrow().atn_line();
        self.via1.set_control_line_1(Port::A, !atn);
    }

    pub fn set_clock(&mut self, value: bool) {
        self.bus.borrow_mut().set_clock(value);
    }

    pub fn set_data(&mut self, value: bool) {
        self.bus.borrow_mut().set_data(value);
    }

    pub fn set_light_barrier(&mut self, value: bool) {
        self.mechanics.borrow_mut().set_light_barrier(value);
    }

    pub fn set_sync(&mut self, value: bool) {
        self.mechanics.borrow_mut().set_sync(value);
    }

    /// Places the next byte under the head and signals byte ready on CA1 of
    /// the disk controller chip.
    pub fn byte_ready(&mut self, byte: u8) {
        self.mechanics.borrow_mut().set_data(byte);
        self.via2.set_control_line_1(Port::A, false);
        self.via2.set_control_line_1(Port::A, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::reg;

    fn setup_drive() -> DiskDrive {
        let bus = new_shared(IecBus::new());
        let mut drive = DiskDrive::new(&DriveConfig::default(), bus);
        drive.reset();
        drive
    }

    #[test]
    fn byte_ready_latches_data() {
        let mut drive = setup_drive();
        drive.get_via2_mut().poke(reg::PCR, 0x00);
        drive.get_via2_mut().poke(reg::ACR, 0x01);
        drive.byte_ready(0x52);
        assert_eq!(0x02, drive.get_via2().read(reg::IFR));
        assert_eq!(0x52, drive.get_via2_mut().peek(reg::ORA));
        assert_eq!(0x00, drive.get_via2().read(reg::IFR));
    }

    #[test]
    fn atn_raises_serial_interrupt() {
        let mut drive = setup_drive();
        drive.get_via1_mut().poke(reg::PCR, 0x01);
        drive.get_via1_mut().poke(reg::IER, 0x82);
        drive.set_atn(false);
        assert_eq!(0x82, drive.get_via1().read(reg::IFR));
        drive.clock();
        drive.clock();
        assert_eq!(true, drive.is_irq());
        assert_eq!(
            true,
            drive.get_irq_line().borrow().is_pulled_by(IrqSource::Via1.value())
        );
    }

    #[test]
    fn chips_share_irq_line() {
        let mut drive = setup_drive();
        drive.get_via2_mut().poke(reg::IER, 0x80 | 0x40);
        drive.get_via2_mut().poke(reg::T1CL, 0x01);
        drive.get_via2_mut().poke(reg::T1CH, 0x00);
        drive.clock_delta(3);
        assert_eq!(false, drive.is_irq());
        drive.clock();
        assert_eq!(true, drive.is_irq());
        assert_eq!(
            true,
            drive.get_irq_line().borrow().is_pulled_by(IrqSource::Via2.value())
        );
        drive.reset();
        assert_eq!(false, drive.is_irq());
    }
}
