// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;

use super::delay_line::DelayLine;
use super::irq_control::IrqControl;

// Ref: R6522 VERSATILE INTERFACE ADAPTER Datasheet
// Ref: http://archive.6502.org/datasheets/mos_6522_preliminary_nov_1977.pdf

pub mod reg {
    pub const ORB: u8 = 0x00;
    pub const ORA: u8 = 0x01;
    pub const DDRB: u8 = 0x02;
    pub const DDRA: u8 = 0x03;
    pub const T1CL: u8 = 0x04;
    pub const T1CH: u8 = 0x05;
    pub const T1LL: u8 = 0x06;
    pub const T1LH: u8 = 0x07;
    pub const T2CL: u8 = 0x08;
    pub const T2CH: u8 = 0x09;
    pub const SR: u8 = 0x0a;
    pub const ACR: u8 = 0x0b;
    pub const PCR: u8 = 0x0c;
    pub const IFR: u8 = 0x0d;
    pub const IER: u8 = 0x0e;
    pub const ORA_NH: u8 = 0x0f;
}

/// Interrupt flag bit positions.
pub mod irq {
    pub const CA2: usize = 0;
    pub const CA1: usize = 1;
    pub const SR: usize = 2;
    pub const CB2: usize = 3;
    pub const CB1: usize = 4;
    pub const TIMER_2: usize = 5;
    pub const TIMER_1: usize = 6;
}

/// Pending effects carried by the delay line. Stage 0 bits are only ever
/// armed directly or from the feed, the shift drops them into stage 1.
pub mod pipeline {
    pub const COUNT_A0: u32 = 1 << 0;
    pub const COUNT_A1: u32 = 1 << 1;
    pub const COUNT_B0: u32 = 1 << 2;
    pub const COUNT_B1: u32 = 1 << 3;
    pub const RELOAD_A0: u32 = 1 << 4;
    pub const RELOAD_A1: u32 = 1 << 5;
    pub const RELOAD_A2: u32 = 1 << 6;
    pub const POST_ONE_SHOT_A0: u32 = 1 << 7;
    pub const POST_ONE_SHOT_B0: u32 = 1 << 8;
    pub const INTERRUPT0: u32 = 1 << 9;
    pub const INTERRUPT1: u32 = 1 << 10;
    pub const SET_CA2_OUT0: u32 = 1 << 11;
    pub const SET_CA2_OUT1: u32 = 1 << 12;
    pub const CLEAR_CA2_OUT0: u32 = 1 << 13;
    pub const CLEAR_CA2_OUT1: u32 = 1 << 14;
    pub const SET_CB2_OUT0: u32 = 1 << 15;
    pub const SET_CB2_OUT1: u32 = 1 << 16;
    pub const CLEAR_CB2_OUT0: u32 = 1 << 17;
    pub const CLEAR_CB2_OUT1: u32 = 1 << 18;

    pub const RETAIN_MASK: u32 = ((1 << 19) - 1)
        & !(COUNT_A0
            | COUNT_B0
            | RELOAD_A0
            | POST_ONE_SHOT_A0
            | POST_ONE_SHOT_B0
            | INTERRUPT0
            | SET_CA2_OUT0
            | CLEAR_CA2_OUT0
            | SET_CB2_OUT0
            | CLEAR_CB2_OUT0);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Port {
    A,
    B,
}

/// Control line 2 operating mode, three bits of PCR per port.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlMode {
    InputNegative,
    IndependentNegative,
    InputPositive,
    IndependentPositive,
    Handshake,
    Pulse,
    ManualLow,
    ManualHigh,
}

impl ControlMode {
    pub fn from(mode: u8) -> ControlMode {
        match mode & 0x07 {
            0 => ControlMode::InputNegative,
            1 => ControlMode::IndependentNegative,
            2 => ControlMode::InputPositive,
            3 => ControlMode::IndependentPositive,
            4 => ControlMode::Handshake,
            5 => ControlMode::Pulse,
            6 => ControlMode::ManualLow,
            _ => ControlMode::ManualHigh,
        }
    }

    /// Input modes whose flag is cleared by a port register access.
    pub fn clears_on_access(self) -> bool {
        match self {
            ControlMode::InputNegative | ControlMode::InputPositive => true,
            _ => false,
        }
    }
}

/// Register file of one 6522 instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Registers {
    // Ports
    pub(crate) pa: u8,
    pub(crate) pb: u8,
    pub(crate) ddra: u8,
    pub(crate) ddrb: u8,
    pub(crate) ora: u8,
    pub(crate) orb: u8,
    pub(crate) ira: u8,
    pub(crate) irb: u8,
    // Control lines
    pub(crate) ca1: bool,
    pub(crate) ca2: bool,
    pub(crate) ca2_out: bool,
    pub(crate) cb1: bool,
    pub(crate) cb2: bool,
    pub(crate) cb2_out: bool,
    // Timers
    pub(crate) t1: u16,
    pub(crate) t1_latch_lo: u8,
    pub(crate) t1_latch_hi: u8,
    pub(crate) t2: u16,
    pub(crate) t2_latch_lo: u8,
    pub(crate) pb7_toggle: bool,
    pub(crate) pb7_timer_out: bool,
    // Control
    pub(crate) pcr: u8,
    pub(crate) acr: u8,
    pub(crate) sr: u8,
    pub(crate) irq_control: IrqControl,
    pub(crate) delay: DelayLine,
}

impl Registers {
    pub fn new() -> Self {
        let mut delay = DelayLine::new(pipeline::RETAIN_MASK);
        delay.autofeed(pipeline::COUNT_A0 | pipeline::COUNT_B0, true);
        Self {
            pa: 0,
            pb: 0,
            ddra: 0,
            ddrb: 0,
            ora: 0,
            orb: 0,
            ira: 0,
            irb: 0,
            ca1: false,
            ca2: false,
            ca2_out: false,
            cb1: false,
            cb2: false,
            cb2_out: false,
            t1: 0x01aa,
            t1_latch_lo: 0xaa,
            t1_latch_hi: 0x01,
            t2: 0x01aa,
            t2_latch_lo: 0xaa,
            pb7_toggle: false,
            pb7_timer_out: false,
            pcr: 0,
            acr: 0,
            sr: 0,
            irq_control: IrqControl::default(),
            delay,
        }
    }

    /// Restores the power-on state: timers and latches at 0x01aa, both
    /// timers counting, everything else cleared.
    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    // -- Port merging

    pub fn merge_port_a(&self, internal: u8, external: u8) -> u8 {
        (internal & self.ddra) | (external & !self.ddra)
    }

    pub fn merge_port_b(&self, internal: u8, external: u8) -> u8 {
        let mut value = (internal & self.ddrb) | (external & !self.ddrb);
        if self.is_pb7_output_enabled() {
            value.set_bit(7, self.pb7_timer_out);
        }
        value
    }

    /// Outputs where DDRA is set, latched inputs elsewhere.
    pub fn latched_port_a(&self) -> u8 {
        (self.ora & self.ddra) | (self.ira & !self.ddra)
    }

    pub fn latched_port_b(&self) -> u8 {
        self.merge_port_b(self.orb, self.irb)
    }

    // -- Getters

    pub fn get_pa(&self) -> u8 {
        self.pa
    }

    pub fn get_pb(&self) -> u8 {
        self.pb
    }

    pub fn get_ddra(&self) -> u8 {
        self.ddra
    }

    pub fn get_ddrb(&self) -> u8 {
        self.ddrb
    }

    pub fn get_ora(&self) -> u8 {
        self.ora
    }

    pub fn get_orb(&self) -> u8 {
        self.orb
    }

    pub fn get_ira(&self) -> u8 {
        self.ira
    }

    pub fn get_irb(&self) -> u8 {
        self.irb
    }

    pub fn get_acr(&self) -> u8 {
        self.acr
    }

    pub fn get_pcr(&self) -> u8 {
        self.pcr
    }

    pub fn get_timer_1(&self) -> u16 {
        self.t1
    }

    pub fn get_timer_1_latch(&self) -> u16 {
        ((self.t1_latch_hi as u16) << 8) | self.t1_latch_lo as u16
    }

    pub fn get_timer_2(&self) -> u16 {
        self.t2
    }

    pub fn get_pb7_toggle(&self) -> bool {
        self.pb7_toggle
    }

    pub fn get_pb7_timer_out(&self) -> bool {
        self.pb7_timer_out
    }

    pub fn get_irq_control(&self) -> &IrqControl {
        &self.irq_control
    }

    pub fn get_delay(&self) -> &DelayLine {
        &self.delay
    }

    pub fn get_control_line_1(&self, port: Port) -> bool {
        match port {
            Port::A => self.ca1,
            Port::B => self.cb1,
        }
    }

    pub fn get_control_line_2(&self, port: Port) -> bool {
        match port {
            Port::A => self.ca2,
            Port::B => self.cb2,
        }
    }

    pub fn get_control_line_2_out(&self, port: Port) -> bool {
        match port {
            Port::A => self.ca2_out,
            Port::B => self.cb2_out,
        }
    }

    // -- Setters used by port bindings

    pub fn set_pa(&mut self, value: u8) {
        self.pa = value;
    }

    pub fn set_pb(&mut self, value: u8) {
        self.pb = value;
    }

    // -- Decoded control bits

    pub fn control_mode(&self, port: Port) -> ControlMode {
        match port {
            Port::A => ControlMode::from(self.pcr >> 1),
            Port::B => ControlMode::from(self.pcr >> 5),
        }
    }

    /// Active transition of CA1/CB1, true for the positive edge.
    pub fn is_positive_edge(&self, port: Port) -> bool {
        match port {
            Port::A => self.pcr.get_bit(0),
            Port::B => self.pcr.get_bit(4),
        }
    }

    pub fn is_input_latching_enabled(&self, port: Port) -> bool {
        match port {
            Port::A => self.acr.get_bit(0),
            Port::B => self.acr.get_bit(1),
        }
    }

    pub fn is_timer_1_free_run(&self) -> bool {
        self.acr.get_bit(6)
    }

    pub fn is_timer_2_pulse_counting(&self) -> bool {
        self.acr.get_bit(5)
    }

    pub fn is_pb7_output_enabled(&self) -> bool {
        self.acr.get_bit(7)
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
