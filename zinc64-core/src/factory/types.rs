// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

/// Addressable represents a bank of memory.
pub trait Addressable {
    /// Read byte from the specified address.
    fn read(&self, address: u16) -> u8;
    /// Write byte to the specified address.
    fn write(&mut self, address: u16, value: u8);
}

/// Addressable represents a bank of memory that may be faded by RAM.
pub trait AddressableFaded {
    /// Read byte from the specified address, `None` if the bank is not visible there.
    fn read(&mut self, address: u16) -> Option<u8>;
    /// Write byte to the specified address.
    fn write(&mut self, address: u16, value: u8);
}

/// Memory bank type used with MMU to determine how to map a memory address
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bank {
    Ram,
    RomL,
    RomH,
}

/// A chip represents a system component that is driven by clock signal.
pub trait Chip {
    /// The core method of the chip, emulates one clock cycle of the chip.
    fn clock(&mut self);
    /// Process delta cycles at once.
    fn clock_delta(&mut self, delta: u32);
    /// Handle reset signal.
    fn reset(&mut self);
    // I/O
    /// Read value from the specified register, applying read side effects.
    fn peek(&mut self, reg: u8) -> u8;
    /// Read value from the specified register without side effects.
    fn read(&self, reg: u8) -> u8;
    /// Write value to the specified register.
    fn poke(&mut self, reg: u8, value: u8);
}

/// Represents memory management unit which controls visible memory banks.
pub trait Mmu {
    /// Map address to currently mapped in memory bank.
    fn map(&self, address: u16) -> Bank;
    /// Change bank configuration based on the specified mode.
    fn switch_banks(&mut self, mode: u8);
}

/// Open collector serial bus shared by the computer and its drives.
/// Line getters return true while the line is high (released).
pub trait SerialBus {
    fn atn_line(&self) -> bool;
    fn clock_line(&self) -> bool;
    fn data_line(&self) -> bool;
    /// Drive side outputs, taken from a port output register and its direction register.
    fn update_device_pins(&mut self, output: u8, direction: u8);
}
