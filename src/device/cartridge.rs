// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use log::Level;
use thiserror::Error;

// Ref: http://ist.uwaterloo.ca/~schepers/formats/CRT.TXT

pub const MAX_CHIPS: usize = 64;
pub const ROM_BASE: u16 = 0x8000;
pub const ROM_SIZE: usize = 0x8000;
pub const SEGMENT_COUNT: usize = 16;

#[derive(Debug, Error, PartialEq)]
pub enum ChipError {
    #[error("invalid start address {0:04x}")]
    InvalidStartAddress(u16),
    #[error("invalid size {size:04x} for chip at {start:04x}")]
    InvalidSize { start: u16, size: usize },
}

/// ROM payload with a fixed load address inside the cartridge window.
#[derive(Clone, Debug, PartialEq)]
pub struct ChipImage {
    start: u16,
    data: Vec<u8>,
}

impl ChipImage {
    pub fn new(start: u16, data: &[u8]) -> Result<ChipImage, ChipError> {
        if start < ROM_BASE {
            return Err(ChipError::InvalidStartAddress(start));
        }
        if data.is_empty() || start as usize + data.len() > 0x10000 {
            return Err(ChipError::InvalidSize {
                start,
                size: data.len(),
            });
        }
        Ok(ChipImage {
            start,
            data: data.to_vec(),
        })
    }

    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    pub fn get_size(&self) -> u16 {
        self.data.len() as u16
    }

    pub fn get_start(&self) -> u16 {
        self.start
    }

    /// Every 4 KB segment of the address space the chip overlaps. A partly
    /// filled trailing segment counts as active, the bytes past the chip
    /// read from whatever the ROM image holds there.
    fn segments(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        let end = start + self.data.len();
        (start >> 12)..((end + 0x0fff) >> 12)
    }
}

pub struct IoConfig {
    pub exrom: bool,
    pub game: bool,
}

impl IoConfig {
    pub fn new() -> Self {
        IoConfig {
            exrom: true,
            game: true,
        }
    }
}

/// Bank controller of a ROM cartridge. Banked in chips are copied into a
/// 32 KB image of 0x8000-0xffff. The active mask has one flag per 4 KB
/// segment of the address space and tells which parts of the image hold
/// live data.
pub struct Cartridge {
    // Configuration
    pub(crate) game: bool,
    pub(crate) exrom: bool,
    pub(crate) chips: [Option<ChipImage>; MAX_CHIPS],
    io_observer: Option<Box<dyn Fn(&IoConfig)>>,
    // Runtime state
    pub(crate) rom: Vec<u8>,
    pub(crate) active: [bool; SEGMENT_COUNT],
    pub(crate) last_banked_in: Option<usize>,
}

impl Cartridge {
    pub fn new() -> Self {
        Cartridge {
            game: true,
            exrom: true,
            chips: std::array::from_fn(|_| None),
            io_observer: None,
            rom: vec![0x00; ROM_SIZE],
            active: [false; SEGMENT_COUNT],
            last_banked_in: None,
        }
    }

    pub fn set_io_observer(&mut self, observer: Option<Box<dyn Fn(&IoConfig)>>) {
        self.io_observer = observer;
    }

    pub fn get_chip(&self, index: usize) -> Option<&ChipImage> {
        self.chips.get(index).and_then(|chip| chip.as_ref())
    }

    pub fn get_active_mask(&self) -> &[bool; SEGMENT_COUNT] {
        &self.active
    }

    pub fn get_exrom_line(&self) -> bool {
        self.exrom
    }

    pub fn get_game_line(&self) -> bool {
        self.game
    }

    pub fn get_last_banked_in(&self) -> Option<usize> {
        self.last_banked_in
    }

    pub fn get_rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn number_of_chips(&self) -> usize {
        self.chips.iter().filter(|chip| chip.is_some()).count()
    }

    pub fn number_of_bytes(&self) -> usize {
        self.chips
            .iter()
            .filter_map(|chip| chip.as_ref())
            .map(|chip| chip.data.len())
            .sum()
    }

    /// Stores a chip image in the given slot, replacing the previous one. A
    /// rejected image leaves the slot untouched.
    pub fn load_chip(&mut self, index: usize, start: u16, data: &[u8]) -> Result<(), ChipError> {
        assert!(index < MAX_CHIPS, "invalid chip index {}", index);
        match ChipImage::new(start, data) {
            Ok(chip) => {
                debug!(
                    target: "cart::chips",
                    "Loaded chip {} at {:04x} size {:04x}",
                    index,
                    start,
                    data.len()
                );
                self.chips[index] = Some(chip);
                if self.last_banked_in == Some(index) {
                    self.last_banked_in = None;
                }
                Ok(())
            }
            Err(err) => {
                warn!(target: "cart::chips", "Rejected chip {}: {}", index, err);
                Err(err)
            }
        }
    }

    pub fn bank_in(&mut self, index: usize) {
        if self.last_banked_in == Some(index) {
            return;
        }
        let chip = match self.chips.get(index) {
            Some(Some(chip)) => chip,
            _ => panic!("invalid chip {}", index),
        };
        if log_enabled!(Level::Debug) {
            debug!(
                target: "cart::banks",
                "Bank in chip {} at {:04x}",
                index,
                chip.start
            );
        }
        let offset = (chip.start - ROM_BASE) as usize;
        self.rom[offset..offset + chip.data.len()].copy_from_slice(&chip.data);
        for segment in chip.segments() {
            self.active[segment] = true;
        }
        self.last_banked_in = Some(index);
    }

    pub fn bank_out(&mut self, index: usize) {
        let chip = match self.chips.get(index) {
            Some(Some(chip)) => chip,
            _ => panic!("invalid chip {}", index),
        };
        if log_enabled!(Level::Debug) {
            debug!(
                target: "cart::banks",
                "Bank out chip {} at {:04x}",
                index,
                chip.start
            );
        }
        for segment in chip.segments() {
            self.active[segment] = false;
        }
        if self.last_banked_in == Some(index) {
            self.last_banked_in = None;
        }
    }

    pub fn set_exrom_line(&mut self, value: bool) {
        self.exrom = value;
        self.notify_io_changed();
    }

    pub fn set_game_line(&mut self, value: bool) {
        self.game = value;
        self.notify_io_changed();
    }

    pub fn is_active(&self, address: u16) -> bool {
        address >= ROM_BASE && self.active[(address >> 12) as usize]
    }

    pub fn read(&self, address: u16) -> Option<u8> {
        if self.is_active(address) {
            Some(self.rom[(address - ROM_BASE) as usize])
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        if self.chips[0].is_some() {
            self.last_banked_in = None;
            self.bank_in(0);
        }
    }

    pub fn powerup(&mut self) {
        self.reset();
        self.notify_io_changed();
    }

    pub fn dump_state(&self) {
        debug!(
            target: "cart::chips",
            "Game line {} exrom line {} chips {} bytes {}",
            self.game,
            self.exrom,
            self.number_of_chips(),
            self.number_of_bytes()
        );
        for (index, chip) in self.chips.iter().enumerate() {
            if let Some(chip) = chip {
                debug!(
                    target: "cart::chips",
                    "Chip {:2}: {:04x}-{:04x}",
                    index,
                    chip.start,
                    chip.start as usize + chip.data.len() - 1
                );
            }
        }
    }

    fn notify_io_changed(&self) {
        if log_enabled!(Level::Trace) {
            trace!(
                target: "cart::banks",
                "Lines game {} exrom {}",
                self.game,
                self.exrom
            );
        }
        if let Some(ref observer) = self.io_observer {
            observer(&IoConfig {
                exrom: self.exrom,
                game: self.game,
            });
        }
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup_cartridge() -> Cartridge {
        let mut cartridge = Cartridge::new();
        cartridge.load_chip(0, 0x8000, &[0x11; 0x2000]).unwrap();
        cartridge.load_chip(1, 0x8000, &[0x22; 0x2000]).unwrap();
        cartridge.load_chip(2, 0xa000, &[0x33; 0x1800]).unwrap();
        cartridge
    }

    #[test]
    fn load_chip_rejects_start_below_window() {
        let mut cartridge = setup_cartridge();
        let result = cartridge.load_chip(1, 0x7fff, &[0x44; 0x10]);
        assert_eq!(Err(ChipError::InvalidStartAddress(0x7fff)), result);
        assert_eq!(0x8000, cartridge.get_chip(1).unwrap().get_start());
        assert_eq!(0x22, cartridge.get_chip(1).unwrap().get_data()[0]);
    }

    #[test]
    fn load_chip_rejects_overflow() {
        let mut cartridge = Cartridge::new();
        let result = cartridge.load_chip(5, 0xf000, &[0x00; 0x1001]);
        assert_eq!(
            Err(ChipError::InvalidSize {
                start: 0xf000,
                size: 0x1001
            }),
            result
        );
        assert_eq!(None, cartridge.get_chip(5));
        assert_eq!(true, cartridge.load_chip(5, 0xf000, &[0x00; 0x1000]).is_ok());
    }

    #[test]
    fn load_chip_rejects_empty() {
        let mut cartridge = Cartridge::new();
        assert_eq!(true, cartridge.load_chip(0, 0x8000, &[]).is_err());
        assert_eq!(0, cartridge.number_of_chips());
    }

    #[test]
    fn bank_in_copies_and_activates() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(2);
        assert_eq!(Some(0x33), cartridge.read(0xa000));
        assert_eq!(Some(0x33), cartridge.read(0xb7ff));
        assert_eq!(Some(0x00), cartridge.read(0xb800));
        assert_eq!(None, cartridge.read(0x8000));
        assert_eq!(None, cartridge.read(0xc000));
        assert_eq!(Some(2), cartridge.get_last_banked_in());
    }

    #[test]
    fn bank_in_twice_is_noop() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(0);
        cartridge.rom[0] = 0xee;
        cartridge.bank_in(0);
        assert_eq!(Some(0xee), cartridge.read(0x8000));
    }

    #[test]
    fn bank_out_clears_overlapping_segments() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(0);
        cartridge.bank_in(2);
        cartridge.bank_out(2);
        let mut expected = [false; SEGMENT_COUNT];
        expected[8] = true;
        expected[9] = true;
        assert_eq!(&expected, cartridge.get_active_mask());
        assert_eq!(0x33, cartridge.get_rom()[0x2000]);
    }

    #[test]
    fn bank_in_after_bank_out() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(1);
        cartridge.bank_out(1);
        cartridge.bank_in(1);
        assert_eq!(Some(0x22), cartridge.read(0x9fff));
    }

    #[test]
    #[should_panic]
    fn bank_in_empty_slot() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(10);
    }

    #[test]
    fn reset_banks_in_chip_0() {
        let mut cartridge = setup_cartridge();
        cartridge.bank_in(1);
        cartridge.reset();
        assert_eq!(Some(0x11), cartridge.read(0x8000));
        assert_eq!(Some(0), cartridge.get_last_banked_in());
    }

    #[test]
    fn lines_notify_observer() {
        let mut cartridge = setup_cartridge();
        let calls = Rc::new(Cell::new(0u8));
        let calls_clone = calls.clone();
        cartridge.set_io_observer(Some(Box::new(move |config| {
            assert_eq!(false, config.exrom);
            calls_clone.set(calls_clone.get() + 1);
        })));
        cartridge.set_exrom_line(false);
        cartridge.powerup();
        assert_eq!(2, calls.get());
    }

    #[test]
    fn chip_counters() {
        let cartridge = setup_cartridge();
        assert_eq!(3, cartridge.number_of_chips());
        assert_eq!(0x5800, cartridge.number_of_bytes());
    }
}
