// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use log::Level;
use zinc64_core::{Chip, IrqLine, Shared};

use super::port::PortBinding;
use super::registers::{irq, pipeline, reg, ControlMode, Port, Registers};

// Ref: R6522 VERSATILE INTERFACE ADAPTER Datasheet
// Ref: http://archive.6502.org/datasheets/mos_6522_preliminary_nov_1977.pdf

/// 6522 versatile interface adapter. Timers, interrupts and control lines
/// are shared by every instance, port semantics come from `P`.
pub struct Via<P: PortBinding> {
    // Dependencies
    name: &'static str,
    irq_source: usize,
    irq_line: Shared<IrqLine>,
    // Functional Units
    port: P,
    regs: Registers,
}

impl<P: PortBinding> Via<P> {
    pub fn new(name: &'static str, irq_source: usize, port: P, irq_line: Shared<IrqLine>) -> Self {
        let mut via = Self {
            name,
            irq_source,
            irq_line,
            port,
            regs: Registers::new(),
        };
        via.reset();
        via
    }

    pub fn get_name(&self) -> &'static str {
        self.name
    }

    pub fn get_port(&self) -> &P {
        &self.port
    }

    pub fn get_port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn get_registers(&self) -> &Registers {
        &self.regs
    }

    pub fn get_registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn control_line_2_out(&self, port: Port) -> bool {
        self.regs.get_control_line_2_out(port)
    }

    /// Drives the interrupt source from the current flag and enable state.
    /// Returns true if the line is pulled down.
    pub fn irq(&mut self) -> bool {
        let triggered = self.regs.irq_control.is_triggered();
        if triggered {
            self.irq_line.borrow_mut().pull_down(self.irq_source);
        } else {
            self.irq_line.borrow_mut().release(self.irq_source);
            self.regs
                .delay
                .remove(pipeline::INTERRUPT0 | pipeline::INTERRUPT1);
        }
        if log_enabled!(Level::Trace) {
            trace!(target: "via::irq", "{} irq {}", self.name, triggered);
        }
        triggered
    }

    pub fn set_control_line_1(&mut self, port: Port, value: bool) {
        let current = self.regs.get_control_line_1(port);
        let active = if self.regs.is_positive_edge(port) {
            !current && value
        } else {
            current && !value
        };
        if active {
            let handshake = self.regs.control_mode(port) == ControlMode::Handshake;
            match port {
                Port::A => {
                    self.regs.irq_control.set_event(irq::CA1);
                    if self.regs.is_input_latching_enabled(Port::A) {
                        self.regs.ira = self.port.external_a(&self.regs);
                    }
                    if handshake {
                        self.regs.delay.feed(pipeline::SET_CA2_OUT1);
                    }
                }
                Port::B => {
                    self.regs.irq_control.set_event(irq::CB1);
                    if self.regs.is_input_latching_enabled(Port::B) {
                        self.regs.irb = self.port.external_b(&self.regs);
                    }
                    if handshake {
                        self.regs.delay.feed(pipeline::SET_CB2_OUT1);
                    }
                }
            }
        }
        match port {
            Port::A => self.regs.ca1 = value,
            Port::B => self.regs.cb1 = value,
        }
    }

    pub fn set_control_line_2(&mut self, port: Port, value: bool) {
        match port {
            Port::A => self.regs.ca2 = value,
            Port::B => self.regs.cb2 = value,
        }
    }

    fn clear_event(&mut self, bit: usize) {
        self.regs.irq_control.clear_events(1 << bit);
        self.irq();
    }

    /// Flag clearing and CA2/CB2 output effects of an output register access.
    fn port_access(&mut self, port: Port, handshake: bool) {
        let (line_1, line_2, clear_out, set_out) = match port {
            Port::A => (
                irq::CA1,
                irq::CA2,
                pipeline::CLEAR_CA2_OUT1,
                pipeline::SET_CA2_OUT0,
            ),
            Port::B => (
                irq::CB1,
                irq::CB2,
                pipeline::CLEAR_CB2_OUT1,
                pipeline::SET_CB2_OUT0,
            ),
        };
        let mut events = 1u8 << line_1;
        match self.regs.control_mode(port) {
            mode if mode.clears_on_access() => {
                events |= 1 << line_2;
            }
            ControlMode::Handshake if handshake => {
                events |= 1 << line_2;
                self.regs.delay.feed(clear_out);
            }
            ControlMode::Pulse if handshake => {
                events |= 1 << line_2;
                self.regs.delay.feed(clear_out | set_out);
            }
            _ => {}
        }
        self.regs.irq_control.clear_events(events);
        self.irq();
    }

    fn clock_timer_1(&mut self) {
        let regs = &mut self.regs;
        if regs.delay.has_cycle(pipeline::RELOAD_A2) {
            regs.t1 = regs.get_timer_1_latch();
        }
        if regs.delay.has_cycle(pipeline::COUNT_A1) {
            regs.t1 = regs.t1.wrapping_sub(1);
        }
        if regs.t1 == 0 {
            if regs.is_timer_1_free_run() {
                regs.irq_control.set_event(irq::TIMER_1);
                regs.pb7_toggle = !regs.pb7_toggle;
                regs.delay.feed(pipeline::RELOAD_A0);
            } else if !regs.delay.is_fed(pipeline::POST_ONE_SHOT_A0) {
                regs.irq_control.set_event(irq::TIMER_1);
                regs.pb7_toggle = !regs.pb7_toggle;
            }
            regs.delay.autofeed(pipeline::POST_ONE_SHOT_A0, true);
        }
        if regs.is_pb7_output_enabled() {
            regs.pb7_timer_out = regs.pb7_toggle;
        }
    }

    fn clock_timer_2(&mut self) {
        let regs = &mut self.regs;
        if regs.delay.has_cycle(pipeline::COUNT_B1) {
            regs.t2 = regs.t2.wrapping_sub(1);
        }
        if regs.t2 == 0 && !regs.delay.is_fed(pipeline::POST_ONE_SHOT_B0) {
            regs.irq_control.set_event(irq::TIMER_2);
            regs.delay.autofeed(pipeline::POST_ONE_SHOT_B0, true);
        }
    }

    fn clock_outputs(&mut self) {
        let regs = &mut self.regs;
        if regs.delay.has_cycle(pipeline::SET_CA2_OUT1) {
            regs.ca2_out = true;
        }
        if regs.delay.has_cycle(pipeline::CLEAR_CA2_OUT1) {
            regs.ca2_out = false;
        }
        if regs.delay.has_cycle(pipeline::SET_CB2_OUT1) {
            regs.cb2_out = true;
        }
        if regs.delay.has_cycle(pipeline::CLEAR_CB2_OUT1) {
            regs.cb2_out = false;
        }
    }
}

impl<P: PortBinding> Chip for Via<P> {
    fn clock(&mut self) {
        // Process timers
        self.clock_timer_1();
        self.clock_timer_2();

        // Process interrupts
        if self.regs.irq_control.is_triggered() {
            self.regs.delay.feed(pipeline::INTERRUPT0);
        }
        if self.regs.delay.has_cycle(pipeline::INTERRUPT1) {
            self.irq_line.borrow_mut().pull_down(self.irq_source);
        }

        // Process control line outputs
        self.clock_outputs();

        self.regs.delay.clock();
    }

    fn clock_delta(&mut self, delta: u32) {
        for _i in 0..delta {
            self.clock();
        }
    }

    fn reset(&mut self) {
        self.regs.reset();
        self.port.reset();
        // Ports are derived without notifying the device
        let pa = self
            .regs
            .merge_port_a(self.port.internal_a(&self.regs), self.port.external_a(&self.regs));
        let pb = self
            .regs
            .merge_port_b(self.port.internal_b(&self.regs), self.port.external_b(&self.regs));
        self.regs.set_pa(pa);
        self.regs.set_pb(pb);
        self.irq_line.borrow_mut().release(self.irq_source);
    }

    // I/O

    fn peek(&mut self, reg: u8) -> u8 {
        let value = match reg {
            reg::ORB => {
                self.port_access(Port::B, false);
                self.port.update_port_b(&mut self.regs);
                self.port.port_b_value(&self.regs)
            }
            reg::ORA => {
                self.port_access(Port::A, true);
                self.port.update_port_a(&mut self.regs);
                self.port.port_a_value(&self.regs)
            }
            reg::DDRB => self.regs.ddrb,
            reg::DDRA => self.regs.ddra,
            reg::T1CL => {
                self.clear_event(irq::TIMER_1);
                self.regs.t1 as u8
            }
            reg::T1CH => (self.regs.t1 >> 8) as u8,
            reg::T1LL => self.regs.t1_latch_lo,
            reg::T1LH => self.regs.t1_latch_hi,
            reg::T2CL => {
                self.clear_event(irq::TIMER_2);
                self.regs.t2 as u8
            }
            reg::T2CH => (self.regs.t2 >> 8) as u8,
            reg::SR => {
                self.clear_event(irq::SR);
                self.regs.sr
            }
            reg::ACR => self.regs.acr,
            reg::PCR => self.regs.pcr,
            reg::IFR => self.regs.irq_control.get_data(),
            reg::IER => self.regs.irq_control.get_mask() | 0x80,
            reg::ORA_NH => {
                self.port_access(Port::A, false);
                self.port.update_port_a(&mut self.regs);
                self.port.port_a_value(&self.regs)
            }
            _ => panic!("invalid reg {}", reg),
        };
        if log_enabled!(Level::Trace) {
            trace!(target: "via::reg", "{} Read 0x{:02x} = 0x{:02x}", self.name, reg, value);
        }
        value
    }

    fn read(&self, reg: u8) -> u8 {
        match reg {
            reg::ORB => self.port.port_b_value(&self.regs),
            reg::ORA | reg::ORA_NH => self.port.port_a_value(&self.regs),
            reg::DDRB => self.regs.ddrb,
            reg::DDRA => self.regs.ddra,
            reg::T1CL => self.regs.t1 as u8,
            reg::T1CH => (self.regs.t1 >> 8) as u8,
            reg::T1LL => self.regs.t1_latch_lo,
            reg::T1LH => self.regs.t1_latch_hi,
            reg::T2CL => self.regs.t2 as u8,
            reg::T2CH => (self.regs.t2 >> 8) as u8,
            reg::SR => self.regs.sr,
            reg::ACR => self.regs.acr,
            reg::PCR => self.regs.pcr,
            reg::IFR => self.regs.irq_control.get_data(),
            reg::IER => self.regs.irq_control.get_mask() | 0x80,
            _ => panic!("invalid reg {}", reg),
        }
    }

    fn poke(&mut self, reg: u8, value: u8) {
        if log_enabled!(Level::Trace) {
            trace!(target: "via::reg", "{} Write 0x{:02x} = 0x{:02x}", self.name, reg, value);
        }
        match reg {
            reg::ORB => {
                self.regs.orb = value;
                self.port_access(Port::B, true);
                self.port.update_port_b(&mut self.regs);
            }
            reg::ORA => {
                self.regs.ora = value;
                self.port_access(Port::A, true);
                self.port.update_port_a(&mut self.regs);
            }
            reg::DDRB => {
                self.regs.ddrb = value;
                self.port.update_port_b(&mut self.regs);
            }
            reg::DDRA => {
                self.regs.ddra = value;
                self.port.update_port_a(&mut self.regs);
            }
            reg::T1CL | reg::T1LL => {
                self.regs.t1_latch_lo = value;
            }
            reg::T1CH => {
                /*
                Both latches are transferred into the counter and the
                T1 interrupt flag is reset. The counter does not
                decrement in the cycle following the write.
                */
                self.regs.t1_latch_hi = value;
                self.regs.t1 = self.regs.get_timer_1_latch();
                self.regs.delay.autofeed(pipeline::POST_ONE_SHOT_A0, false);
                self.regs.delay.remove(pipeline::COUNT_A1);
                if self.regs.is_pb7_output_enabled() {
                    self.regs.pb7_toggle = false;
                    self.regs.pb7_timer_out = false;
                }
                self.clear_event(irq::TIMER_1);
            }
            reg::T1LH => {
                self.regs.t1_latch_hi = value;
            }
            reg::T2CL => {
                self.regs.t2_latch_lo = value;
                self.clear_event(irq::TIMER_2);
            }
            reg::T2CH => {
                self.regs.t2 = ((value as u16) << 8) | self.regs.t2_latch_lo as u16;
                self.regs.delay.autofeed(pipeline::POST_ONE_SHOT_B0, false);
                self.regs.delay.remove(pipeline::COUNT_B1);
                self.clear_event(irq::TIMER_2);
            }
            reg::SR => {
                self.regs.sr = value;
                self.clear_event(irq::SR);
            }
            reg::ACR => {
                self.regs.acr = value;
                if self.regs.is_timer_2_pulse_counting() {
                    // T2 counts PB6 pulses instead of cycles
                    self.regs.delay.remove(pipeline::COUNT_B0);
                    self.regs.delay.autofeed(pipeline::COUNT_B0, false);
                } else {
                    self.regs.delay.feed(pipeline::COUNT_B0);
                    self.regs.delay.autofeed(pipeline::COUNT_B0, true);
                }
                if self.regs.is_pb7_output_enabled() {
                    self.regs.pb7_timer_out = self.regs.pb7_toggle;
                }
            }
            reg::PCR => {
                let old = self.regs.pcr;
                self.regs.pcr = value;
                match self.regs.control_mode(Port::A) {
                    ControlMode::ManualLow => self.regs.delay.feed(pipeline::CLEAR_CA2_OUT1),
                    ControlMode::ManualHigh => self.regs.delay.feed(pipeline::SET_CA2_OUT1),
                    _ => {}
                }
                match self.regs.control_mode(Port::B) {
                    ControlMode::ManualLow => self.regs.delay.feed(pipeline::CLEAR_CB2_OUT1),
                    ControlMode::ManualHigh => self.regs.delay.feed(pipeline::SET_CB2_OUT1),
                    _ => {}
                }
                self.port.peripheral_control_changed(old, value);
            }
            reg::IFR => {
                self.regs.irq_control.clear_events(value);
                self.irq();
            }
            reg::IER => {
                self.regs.irq_control.update_mask(value);
                self.irq();
            }
            reg::ORA_NH => {
                self.regs.ora = value;
                self.port_access(Port::A, false);
                self.port.update_port_a(&mut self.regs);
            }
            _ => panic!("invalid reg {}", reg),
        }
    }
}
