// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use bit_field::BitField;
use zinc64_core::{AddressableFaded, Mmu, Shared};

use super::cartridge::{Cartridge, IoConfig};

#[derive(Copy, Clone)]
pub enum IoLine {
    Game = 3,
    Exrom = 4,
}

impl IoLine {
    pub fn value(self) -> usize {
        self as usize
    }
}

/// Memory mode derived from the cartridge lines, as understood by `Mmu::switch_banks`.
pub fn io_mode(config: &IoConfig) -> u8 {
    let mut mode = 0u8;
    mode.set_bit(IoLine::Game.value(), config.game);
    mode.set_bit(IoLine::Exrom.value(), config.exrom);
    mode
}

pub struct ExpansionPort {
    cartridge: Option<Cartridge>,
    // I/O
    mmu: Shared<dyn Mmu>,
}

impl ExpansionPort {
    pub fn new(mmu: Shared<dyn Mmu>) -> Self {
        Self {
            cartridge: None,
            mmu,
        }
    }

    pub fn get_cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn get_cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    pub fn attach(&mut self, mut cartridge: Cartridge) {
        let mmu_clone = self.mmu.clone();
        cartridge.set_io_observer(Some(Box::new(move |config| {
            mmu_clone.borrow_mut().switch_banks(io_mode(config));
        })));
        self.cartridge = Some(cartridge);
    }

    pub fn detach(&mut self) -> Option<Cartridge> {
        let mut cartridge = self.cartridge.take();
        if let Some(ref mut cartridge) = cartridge {
            cartridge.set_io_observer(None);
            self.release_lines();
        }
        cartridge
    }

    pub fn reset(&mut self) {
        if let Some(ref mut cartridge) = self.cartridge {
            cartridge.reset();
        } else {
            self.release_lines();
        }
    }

    pub fn powerup(&mut self) {
        if let Some(ref mut cartridge) = self.cartridge {
            cartridge.powerup();
        } else {
            self.release_lines();
        }
    }

    fn release_lines(&self) {
        self.mmu.borrow_mut().switch_banks(io_mode(&IoConfig::new()));
    }
}

impl AddressableFaded for ExpansionPort {
    fn read(&mut self, address: u16) -> Option<u8> {
        self.cartridge.as_ref().and_then(|crt| crt.read(address))
    }

    fn write(&mut self, _address: u16, _value: u8) {}
}
