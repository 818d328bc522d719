// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use zinc64_core::{SerialBus, Shared};

use crate::io::{PortBinding, Registers};

/// Port wiring of the 1541 serial bus chip (VIA1).
///
/// | bit | port B                  |
/// |-----|-------------------------|
/// | 0   | data in                 |
/// | 1   | data out                |
/// | 2   | clock in                |
/// | 3   | clock out               |
/// | 4   | atn acknowledge         |
/// | 5-6 | device address          |
/// | 7   | atn in                  |
pub struct SerialPort {
    bus: Shared<dyn SerialBus>,
    device_number: u8,
}

impl SerialPort {
    pub fn new(bus: Shared<dyn SerialBus>, device_number: u8) -> Self {
        assert!(
            device_number >= 8 && device_number <= 11,
            "invalid device number {}",
            device_number
        );
        Self { bus, device_number }
    }

    pub fn get_device_number(&self) -> u8 {
        self.device_number
    }
}

impl PortBinding for SerialPort {
    fn external_a(&self, _regs: &Registers) -> u8 {
        0xff
    }

    fn external_b(&self, _regs: &Registers) -> u8 {
        let bus = self.bus.borrow();
        let mut value = (self.device_number - 8) << 5;
        value.set_bit(7, !bus.atn_line());
        value.set_bit(2, !bus.clock_line());
        value.set_bit(0, !bus.data_line());
        value
    }

    fn update_port_b(&mut self, regs: &mut Registers) {
        let value = regs.merge_port_b(self.internal_b(regs), self.external_b(regs));
        regs.set_pb(value);
        self.bus
            .borrow_mut()
            .update_device_pins(regs.get_orb(), regs.get_ddrb());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::IecBus;
    use zinc64_core::new_shared;

    #[test]
    fn external_b_reflects_bus() {
        let bus = new_shared(IecBus::new());
        let port = SerialPort::new(bus.clone(), 9);
        let regs = Registers::new();
        assert_eq!(0x20, port.external_b(&regs));
        bus.borrow_mut().set_clock(false);
        bus.borrow_mut().set_atn(false);
        // ATN without acknowledge also pulls data
        assert_eq!(0xa5, port.external_b(&regs));
    }

    #[test]
    fn update_port_b_drives_bus() {
        let bus = new_shared(IecBus::new());
        let mut port = SerialPort::new(bus.clone(), 8);
        let mut regs = Registers::new();
        regs.orb = 0x08;
        regs.ddrb = 0x1a;
        port.update_port_b(&mut regs);
        assert_eq!(false, bus.borrow().clock_line());
        assert_eq!(true, bus.borrow().data_line());
    }
}
