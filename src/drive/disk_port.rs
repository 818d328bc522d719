// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use zinc64_core::Shared;

use super::mechanics::DriveMechanics;
use crate::io::{Port, PortBinding, Registers};

/// Port wiring of the 1541 disk controller chip (VIA2).
///
/// | bit | port B                  |
/// |-----|-------------------------|
/// | 0-1 | stepper motor phase     |
/// | 2   | spindle motor           |
/// | 3   | red led                 |
/// | 4   | write protect, in       |
/// | 5-6 | density zone            |
/// | 7   | sync, in                |
///
/// Port A carries the byte under the read/write head.
pub struct DiskPort {
    mechanics: Shared<DriveMechanics>,
    // Stepper phase driven by the outputs, input pins count as low
    stepper_phase: u8,
}

impl DiskPort {
    pub fn new(mechanics: Shared<DriveMechanics>) -> Self {
        Self {
            mechanics,
            stepper_phase: 0,
        }
    }

    /// Takes over the driven stepper phase without moving the head.
    pub fn sync_stepper(&mut self, regs: &Registers) {
        self.stepper_phase = Self::driven_phase(regs);
    }

    fn driven_phase(regs: &Registers) -> u8 {
        regs.get_orb() & regs.get_ddrb() & 0x03
    }

    fn step(&mut self, new_phase: u8) {
        let old_phase = self.stepper_phase;
        if old_phase == new_phase {
            return;
        }
        self.stepper_phase = new_phase;
        let mut mechanics = self.mechanics.borrow_mut();
        if new_phase == (old_phase + 1) & 0x03 {
            mechanics.move_head_up();
        } else if new_phase == old_phase.wrapping_sub(1) & 0x03 {
            mechanics.move_head_down();
        } else {
            warn!(
                target: "drive::head",
                "Unexpected stepper sequence {} -> {} at halftrack {}",
                old_phase,
                new_phase,
                mechanics.get_halftrack()
            );
        }
    }
}

impl PortBinding for DiskPort {
    fn external_a(&self, _regs: &Registers) -> u8 {
        self.mechanics.borrow().get_data()
    }

    fn external_b(&self, _regs: &Registers) -> u8 {
        let mechanics = self.mechanics.borrow();
        let mut value = 0x6f;
        value.set_bit(7, !mechanics.is_sync());
        value.set_bit(4, !mechanics.is_light_barrier_blocked());
        value
    }

    fn update_port_b(&mut self, regs: &mut Registers) {
        let value = regs.merge_port_b(self.internal_b(regs), self.external_b(regs));
        regs.set_pb(value);
        self.step(Self::driven_phase(regs));
        let mut mechanics = self.mechanics.borrow_mut();
        mechanics.set_zone((value >> 5) & 0x03);
        mechanics.set_red_led(value.get_bit(3));
        mechanics.set_motor(value.get_bit(2));
    }

    fn port_a_value(&self, regs: &Registers) -> u8 {
        if regs.is_input_latching_enabled(Port::A) {
            regs.latched_port_a()
        } else {
            warn!(target: "drive::port", "Port A read with input latching disabled");
            0
        }
    }

    fn peripheral_control_changed(&mut self, _old: u8, new: u8) {
        self.mechanics.borrow_mut().set_read_mode(new.get_bit(5));
    }

    fn reset(&mut self) {
        self.stepper_phase = 0;
    }
}
