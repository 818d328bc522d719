// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use log::Level;

/// Wired-OR interrupt line. Each source owns one bit and the line is low
/// while at least one source holds it down.
pub struct IrqLine {
    kind: &'static str,
    signal: u8,
}

impl IrqLine {
    pub fn new(kind: &'static str) -> Self {
        Self { kind, signal: 0 }
    }

    pub fn is_low(&self) -> bool {
        self.signal != 0
    }

    pub fn is_pulled_by(&self, source: usize) -> bool {
        self.signal.get_bit(source)
    }

    pub fn pull_down(&mut self, source: usize) {
        self.set_low(source, true);
    }

    pub fn release(&mut self, source: usize) {
        self.set_low(source, false);
    }

    pub fn reset(&mut self) {
        self.signal = 0;
    }

    fn set_low(&mut self, source: usize, value: bool) {
        if self.signal.get_bit(source) != value && log_enabled!(Level::Trace) {
            trace!(
                target: "cpu::int", "{}.{} {}",
                self.kind,
                source,
                if value { "set" } else { "cleared" }
            );
        }
        self.signal.set_bit(source, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_wired_or() {
        let mut line = IrqLine::new("irq");
        line.pull_down(0);
        line.pull_down(1);
        line.release(0);
        assert_eq!(true, line.is_low());
        assert_eq!(false, line.is_pulled_by(0));
        line.release(1);
        assert_eq!(false, line.is_low());
    }

    #[test]
    fn release_without_pull_is_noop() {
        let mut line = IrqLine::new("irq");
        line.release(3);
        assert_eq!(false, line.is_low());
    }
}
