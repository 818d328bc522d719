// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::rc::Rc;

use test_log::test;
use zinc64_core::{Bank, Chip, Mmu};
use zinc64_periph::config::{Config, DriveConfig};
use zinc64_periph::device::Cartridge;
use zinc64_periph::io::reg;
use zinc64_periph::system::System;

fn setup_system() -> System {
    let config = Rc::new(Config::new(DriveConfig::new(9, 35)));
    let mut system = System::new(config);
    system.powerup();
    system
}

fn setup_cartridge(game: bool, exrom: bool) -> Cartridge {
    let mut cartridge = Cartridge::new();
    cartridge.set_game_line(game);
    cartridge.set_exrom_line(exrom);
    cartridge.load_chip(0, 0x8000, &[0x11; 0x2000]).unwrap();
    cartridge.load_chip(1, 0xa000, &[0x22; 0x2000]).unwrap();
    cartridge.load_chip(2, 0xe000, &[0x33; 0x2000]).unwrap();
    cartridge
}

#[test]
fn ram_without_cartridge() {
    let mut system = setup_system();
    system.write(0x8000, 0x5a);
    system.write(0xe000, 0xa5);
    assert_eq!(0x5a, system.read(0x8000));
    assert_eq!(0xa5, system.read(0xe000));
    assert_eq!(Bank::Ram, system.get_memory_map().borrow().map(0x8000));
}

#[test]
fn cartridge_16k_mode() {
    let mut system = setup_system();
    system.attach_cartridge(setup_cartridge(false, false));
    if let Some(cartridge) = system.get_expansion_port_mut().get_cartridge_mut() {
        cartridge.bank_in(1);
    }
    assert_eq!(0x11, system.read(0x8000));
    assert_eq!(0x22, system.read(0xbfff));
    assert_eq!(0x00, system.read(0xc000));
    assert_eq!(Bank::RomH, system.get_memory_map().borrow().map(0xa000));
}

#[test]
fn cartridge_ultimax_mode() {
    let mut system = setup_system();
    system.attach_cartridge(setup_cartridge(false, true));
    if let Some(cartridge) = system.get_expansion_port_mut().get_cartridge_mut() {
        cartridge.bank_in(2);
    }
    assert_eq!(0x11, system.read(0x9fff));
    assert_eq!(0x33, system.read(0xe000));
    assert_eq!(Bank::Ram, system.get_memory_map().borrow().map(0xa000));
    if let Some(cartridge) = system.get_expansion_port_mut().get_cartridge_mut() {
        cartridge.bank_out(0);
    }
    // Mapped to RomL but no chip banked in
    system.write(0x8000, 0x77);
    assert_eq!(0x77, system.read(0x8000));
}

#[test]
fn detach_restores_ram() {
    let mut system = setup_system();
    system.attach_cartridge(setup_cartridge(true, false));
    assert_eq!(0x11, system.read(0x8000));
    let cartridge = system.detach_cartridge();
    assert_eq!(true, cartridge.is_some());
    assert_eq!(0x00, system.read(0x8000));
    assert_eq!(Bank::Ram, system.get_memory_map().borrow().map(0x8000));
}

#[test]
fn reset_banks_in_first_chip() {
    let mut system = setup_system();
    system.attach_cartridge(setup_cartridge(true, false));
    if let Some(cartridge) = system.get_expansion_port_mut().get_cartridge_mut() {
        cartridge.bank_out(0);
    }
    assert_eq!(0x00, system.read(0x8000));
    system.reset();
    assert_eq!(0x11, system.read(0x8000));
}

#[test]
fn step_clocks_drive() {
    let mut system = setup_system();
    let drive = system.get_drive_mut();
    drive.get_via2_mut().poke(reg::IER, 0x80 | 0x40);
    drive.get_via2_mut().poke(reg::T1CL, 0x01);
    drive.get_via2_mut().poke(reg::T1CH, 0x00);
    system.run(3);
    assert_eq!(false, system.get_drive().is_irq());
    system.step();
    assert_eq!(true, system.get_drive().is_irq());
    assert_eq!(4, system.get_cycles());
}

#[test]
fn drive_config() {
    let mut system = setup_system();
    assert_eq!(35, system.get_drive().get_mechanics().borrow().get_halftrack());
    assert_eq!(0x20, system.get_drive_mut().get_via1_mut().peek(reg::ORB) & 0x60);
}
