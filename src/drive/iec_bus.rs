// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use log::Level;
use zinc64_core::SerialBus;

/// Open collector serial bus between the computer and one drive. A line is
/// high unless some participant pulls it low.
pub struct IecBus {
    // Host side, true while released
    atn: bool,
    clock: bool,
    data: bool,
    // Drive side, true while pulling low
    device_atn_ack: bool,
    device_clock: bool,
    device_data: bool,
}

impl IecBus {
    pub fn new() -> Self {
        Self {
            atn: true,
            clock: true,
            data: true,
            device_atn_ack: false,
            device_clock: false,
            device_data: false,
        }
    }

    pub fn set_atn(&mut self, value: bool) {
        self.atn = value;
    }

    pub fn set_clock(&mut self, value: bool) {
        self.clock = value;
    }

    pub fn set_data(&mut self, value: bool) {
        self.data = value;
    }

    pub fn reset(&mut self) {
        self.atn = true;
        self.clock = true;
        self.data = true;
        self.device_atn_ack = false;
        self.device_clock = false;
        self.device_data = false;
    }
}

impl Default for IecBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialBus for IecBus {
    fn atn_line(&self) -> bool {
        self.atn
    }

    fn clock_line(&self) -> bool {
        self.clock && !self.device_clock
    }

    fn data_line(&self) -> bool {
        // DATA is held low while ATN acknowledge disagrees with ATN
        let atn_ack_pull = !self.atn != self.device_atn_ack;
        self.data && !self.device_data && !atn_ack_pull
    }

    fn update_device_pins(&mut self, output: u8, direction: u8) {
        let pins = output & direction;
        self.device_data = pins.get_bit(1);
        self.device_clock = pins.get_bit(3);
        self.device_atn_ack = pins.get_bit(4);
        if log_enabled!(Level::Trace) {
            trace!(
                target: "drive::port",
                "Bus pins data {} clock {} atn ack {}",
                self.device_data,
                self.device_clock,
                self.device_atn_ack
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_lines_are_high() {
        let bus = IecBus::new();
        assert_eq!(true, bus.atn_line());
        assert_eq!(true, bus.clock_line());
        assert_eq!(true, bus.data_line());
    }

    #[test]
    fn device_pulls_lines() {
        let mut bus = IecBus::new();
        bus.update_device_pins(0x0a, 0x1a);
        assert_eq!(false, bus.clock_line());
        assert_eq!(false, bus.data_line());
        bus.update_device_pins(0x0a, 0x00);
        assert_eq!(true, bus.clock_line());
        assert_eq!(true, bus.data_line());
    }

    #[test]
    fn atn_without_ack_pulls_data() {
        let mut bus = IecBus::new();
        bus.set_atn(false);
        assert_eq!(false, bus.data_line());
        bus.update_device_pins(0x10, 0x10);
        assert_eq!(true, bus.data_line());
        bus.set_atn(true);
        assert_eq!(false, bus.data_line());
    }
}
