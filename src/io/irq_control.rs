// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;

const EVENT_MASK: u8 = 0x7f;

/// Interrupt flag (IFR) and enable (IER) pair. Bit 7 of the flag register
/// is never stored, it is derived from `data & mask` on every read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IrqControl {
    data: u8,
    mask: u8,
}

impl IrqControl {
    pub fn clear_events(&mut self, events: u8) {
        self.data &= !(events & EVENT_MASK);
    }

    pub fn get_data(&self) -> u8 {
        let mut data = self.data;
        data.set_bit(7, self.is_triggered());
        data
    }

    pub fn get_mask(&self) -> u8 {
        self.mask
    }

    pub fn get_raw_data(&self) -> u8 {
        self.data
    }

    pub fn has_event(&self, bit: usize) -> bool {
        self.data.get_bit(bit)
    }

    pub fn is_triggered(&self) -> bool {
        (self.mask & self.data) != 0
    }

    pub fn reset(&mut self) {
        self.data = 0;
        self.mask = 0;
    }

    pub fn restore(&mut self, data: u8, mask: u8) {
        self.data = data & EVENT_MASK;
        self.mask = mask & EVENT_MASK;
    }

    pub fn set_event(&mut self, bit: usize) {
        self.data.set_bit(bit, true);
    }

    pub fn update_mask(&mut self, mask: u8) {
        /*
        Bit 7 selects set or clear. If it is a ONE, every enable bit
        written with a one is set. If it is a ZERO, every enable bit
        written with a one is cleared. Bits written with a zero are
        unaffected in both cases.
        */
        if mask.get_bit(7) {
            self.mask |= mask & EVENT_MASK;
        } else {
            self.mask &= !(mask & EVENT_MASK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_mask_sets_and_clears() {
        let mut irq = IrqControl::default();
        irq.update_mask(0x80 | 0x41);
        assert_eq!(0x41, irq.get_mask());
        irq.update_mask(0x80 | 0x02);
        assert_eq!(0x43, irq.get_mask());
        irq.update_mask(0x01);
        assert_eq!(0x42, irq.get_mask());
    }

    #[test]
    fn data_bit_7_is_derived() {
        let mut irq = IrqControl::default();
        irq.set_event(6);
        assert_eq!(0x40, irq.get_data());
        irq.update_mask(0xc0);
        assert_eq!(0xc0, irq.get_data());
        assert_eq!(0x40, irq.get_raw_data());
    }

    #[test]
    fn clear_events_never_sets() {
        let mut irq = IrqControl::default();
        irq.set_event(1);
        irq.clear_events(0xff);
        assert_eq!(0x00, irq.get_raw_data());
    }
}
