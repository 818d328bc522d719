// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use super::registers::{Port, Registers};

/// Device specific side of a 6522. The engine owns the timers, interrupts and
/// control lines, the binding decides what sits on the port pins and reacts
/// to the values the engine drives onto them.
pub trait PortBinding {
    /// Value driven by the chip on port A.
    fn internal_a(&self, regs: &Registers) -> u8 {
        regs.get_ora()
    }

    /// Value driven by the outside world on port A.
    fn external_a(&self, regs: &Registers) -> u8;

    /// Value driven by the chip on port B.
    fn internal_b(&self, regs: &Registers) -> u8 {
        regs.get_orb()
    }

    /// Value driven by the outside world on port B.
    fn external_b(&self, regs: &Registers) -> u8;

    /// Recompute port A pins and propagate them to the device.
    fn update_port_a(&mut self, regs: &mut Registers) {
        let value = regs.merge_port_a(self.internal_a(regs), self.external_a(regs));
        regs.set_pa(value);
    }

    /// Recompute port B pins and propagate them to the device.
    fn update_port_b(&mut self, regs: &mut Registers) {
        let value = regs.merge_port_b(self.internal_b(regs), self.external_b(regs));
        regs.set_pb(value);
    }

    /// Value returned to the CPU by a read of port A.
    fn port_a_value(&self, regs: &Registers) -> u8 {
        if regs.is_input_latching_enabled(Port::A) {
            regs.latched_port_a()
        } else {
            regs.merge_port_a(self.internal_a(regs), self.external_a(regs))
        }
    }

    /// Value returned to the CPU by a read of port B.
    fn port_b_value(&self, regs: &Registers) -> u8 {
        if regs.is_input_latching_enabled(Port::B) {
            regs.latched_port_b()
        } else {
            regs.merge_port_b(self.internal_b(regs), self.external_b(regs))
        }
    }

    fn peripheral_control_changed(&mut self, _old: u8, _new: u8) {}

    fn reset(&mut self) {}
}
