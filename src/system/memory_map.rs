// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

// Ref: https://www.c64-wiki.com/index.php/Bank_Switching

use bit_field::BitField;
use log::Level;
use zinc64_core::{Bank, Mmu};

use crate::device::IoLine;

/// Cartridge part of the memory configuration, selected by the active low
/// GAME and EXROM lines.
pub struct MemoryMap {
    banks: [Bank; 0x10],
}

impl MemoryMap {
    pub fn new() -> Self {
        Self {
            banks: Self::layout(true, true),
        }
    }

    fn layout(game: bool, exrom: bool) -> [Bank; 0x10] {
        let mut banks = [Bank::Ram; 0x10];
        match (game, exrom) {
            // 8K
            (true, false) => {
                banks[0x08] = Bank::RomL;
                banks[0x09] = Bank::RomL;
            }
            // 16K
            (false, false) => {
                banks[0x08] = Bank::RomL;
                banks[0x09] = Bank::RomL;
                banks[0x0a] = Bank::RomH;
                banks[0x0b] = Bank::RomH;
            }
            // Ultimax
            (false, true) => {
                banks[0x08] = Bank::RomL;
                banks[0x09] = Bank::RomL;
                banks[0x0e] = Bank::RomH;
                banks[0x0f] = Bank::RomH;
            }
            (true, true) => {}
        }
        banks
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu for MemoryMap {
    fn map(&self, address: u16) -> Bank {
        self.banks[(address >> 12) as usize]
    }

    fn switch_banks(&mut self, mode: u8) {
        let game = mode.get_bit(IoLine::Game.value());
        let exrom = mode.get_bit(IoLine::Exrom.value());
        if log_enabled!(Level::Trace) {
            trace!(target: "cart::banks", "Switching to game {} exrom {}", game, exrom);
        }
        self.banks = Self::layout(game, exrom);
    }
}
