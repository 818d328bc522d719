// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

pub const MIN_HALFTRACK: u8 = 1;
pub const MAX_HALFTRACK: u8 = 84;

/// Read/write head, spindle motor and indicator state of a 1541.
pub struct DriveMechanics {
    // Configuration
    initial_halftrack: u8,
    // Runtime state
    pub(crate) halftrack: u8,
    pub(crate) zone: u8,
    pub(crate) red_led: bool,
    pub(crate) motor: bool,
    pub(crate) sync: bool,
    pub(crate) light_barrier: bool,
    pub(crate) read_mode: bool,
    pub(crate) data: u8,
}

impl DriveMechanics {
    pub fn new(halftrack: u8) -> Self {
        Self {
            initial_halftrack: halftrack,
            halftrack,
            zone: 0,
            red_led: false,
            motor: false,
            sync: false,
            light_barrier: false,
            read_mode: true,
            data: 0,
        }
    }

    pub fn get_data(&self) -> u8 {
        self.data
    }

    pub fn get_halftrack(&self) -> u8 {
        self.halftrack
    }

    pub fn get_zone(&self) -> u8 {
        self.zone
    }

    pub fn is_light_barrier_blocked(&self) -> bool {
        self.light_barrier
    }

    pub fn is_motor_on(&self) -> bool {
        self.motor
    }

    pub fn is_read_mode(&self) -> bool {
        self.read_mode
    }

    pub fn is_red_led_on(&self) -> bool {
        self.red_led
    }

    pub fn is_sync(&self) -> bool {
        self.sync
    }

    pub fn set_data(&mut self, value: u8) {
        self.data = value;
    }

    pub fn set_light_barrier(&mut self, value: bool) {
        self.light_barrier = value;
    }

    pub fn set_motor(&mut self, value: bool) {
        if self.motor != value {
            debug!(target: "drive::head", "Motor {}", if value { "on" } else { "off" });
        }
        self.motor = value;
    }

    pub fn set_read_mode(&mut self, value: bool) {
        self.read_mode = value;
    }

    pub fn set_red_led(&mut self, value: bool) {
        self.red_led = value;
    }

    pub fn set_sync(&mut self, value: bool) {
        self.sync = value;
    }

    pub fn set_zone(&mut self, value: u8) {
        self.zone = value & 0x03;
    }

    pub fn move_head_up(&mut self) {
        if self.halftrack < MAX_HALFTRACK {
            self.halftrack += 1;
            debug!(target: "drive::head", "Head up to halftrack {}", self.halftrack);
        }
    }

    pub fn move_head_down(&mut self) {
        if self.halftrack > MIN_HALFTRACK {
            self.halftrack -= 1;
            debug!(target: "drive::head", "Head down to halftrack {}", self.halftrack);
        }
    }

    pub fn reset(&mut self) {
        self.halftrack = self.initial_halftrack;
        self.zone = 0;
        self.red_led = false;
        self.motor = false;
        self.sync = false;
        self.light_barrier = false;
        self.read_mode = true;
        self.data = 0;
    }
}
