// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::rc::Rc;

use zinc64_core::{new_shared, Addressable, AddressableFaded, Bank, Clock, Mmu, Ram, Shared};

use super::memory_map::MemoryMap;
use crate::config::Config;
use crate::device::{Cartridge, ExpansionPort};
use crate::drive::{DiskDrive, IecBus};

const RAM_SIZE: usize = 0x10000;

/// Cycle scheduler tying a drive and the cartridge port to a flat 64 KB
/// memory. One `step` is one system clock cycle.
pub struct System {
    // Dependencies
    config: Rc<Config>,
    // Chipset
    drive: DiskDrive,
    // Memory
    expansion_port: ExpansionPort,
    memory_map: Shared<MemoryMap>,
    ram: Ram,
    // Runtime State
    clock: Rc<Clock>,
}

impl System {
    pub fn new(config: Rc<Config>) -> Self {
        info!(target: "system", "Initializing system");
        let bus = new_shared(IecBus::new());
        let memory_map = new_shared(MemoryMap::new());
        let drive = DiskDrive::new(&config.drive, bus);
        let expansion_port = ExpansionPort::new(memory_map.clone());
        Self {
            config,
            drive,
            expansion_port,
            memory_map,
            ram: Ram::new(RAM_SIZE),
            clock: Rc::new(Clock::new()),
        }
    }

    pub fn get_clock(&self) -> Rc<Clock> {
        self.clock.clone()
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_cycles(&self) -> u64 {
        self.clock.get()
    }

    pub fn get_drive(&self) -> &DiskDrive {
        &self.drive
    }

    pub fn get_drive_mut(&mut self) -> &mut DiskDrive {
        &mut self.drive
    }

    pub fn get_expansion_port(&self) -> &ExpansionPort {
        &self.expansion_port
    }

    pub fn get_expansion_port_mut(&mut self) -> &mut ExpansionPort {
        &mut self.expansion_port
    }

    pub fn get_memory_map(&self) -> Shared<MemoryMap> {
        self.memory_map.clone()
    }

    pub fn attach_cartridge(&mut self, cartridge: Cartridge) {
        self.expansion_port.attach(cartridge);
        self.expansion_port.powerup();
    }

    pub fn detach_cartridge(&mut self) -> Option<Cartridge> {
        self.expansion_port.detach()
    }

    pub fn powerup(&mut self) {
        self.ram.fill(0x00);
        self.reset();
        self.expansion_port.powerup();
    }

    pub fn reset(&mut self) {
        info!(target: "system", "Resetting system");
        self.drive.reset();
        self.expansion_port.reset();
        self.clock.reset();
    }

    pub fn step(&mut self) {
        self.clock.tick();
        self.drive.clock();
    }

    pub fn run(&mut self, cycles: u64) {
        for _i in 0..cycles {
            self.step();
        }
    }

    // -- Memory Ops

    pub fn read(&mut self, address: u16) -> u8 {
        let bank = self.memory_map.borrow().map(address);
        match bank {
            Bank::Ram => self.ram.read(address),
            Bank::RomL | Bank::RomH => match self.expansion_port.read(address) {
                Some(value) => value,
                None => self.ram.read(address),
            },
        }
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.ram.write(address, value);
    }

    pub fn load(&mut self, data: &[u8], offset: u16) {
        self.ram.load(data, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_system() -> System {
        let mut system = System::new(Rc::new(Config::default()));
        system.powerup();
        system
    }

    #[test]
    fn step_advances_clock() {
        let mut system = setup_system();
        system.run(10);
        assert_eq!(10, system.get_cycles());
        system.reset();
        assert_eq!(0, system.get_cycles());
    }

    #[test]
    fn powerup_clears_ram() {
        let mut system = setup_system();
        system.load(&[0x01, 0x02, 0x03], 0x0801);
        assert_eq!(0x02, system.read(0x0802));
        system.reset();
        assert_eq!(0x03, system.read(0x0803));
        system.powerup();
        assert_eq!(0x00, system.read(0x0802));
    }

    #[test]
    fn write_lands_in_ram_under_rom() {
        let mut system = setup_system();
        let mut cartridge = Cartridge::new();
        cartridge.set_exrom_line(false);
        cartridge.load_chip(0, 0x8000, &[0x42; 0x2000]).unwrap();
        system.attach_cartridge(cartridge);
        system.write(0x8000, 0x01);
        assert_eq!(0x42, system.read(0x8000));
        system.detach_cartridge();
        assert_eq!(0x01, system.read(0x8000));
    }
}
