// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::{read_bool, write_bool, Snapshot, SnapshotError};
use crate::device::cartridge::{Cartridge, ChipImage, MAX_CHIPS, ROM_SIZE, SEGMENT_COUNT};

const NO_CHIP: u8 = 0xff;

/// Decoded cartridge image, applied only after the whole buffer checked out.
pub struct CartridgeState {
    game: bool,
    exrom: bool,
    chips: [Option<ChipImage>; MAX_CHIPS],
    rom: Vec<u8>,
    active: [bool; SEGMENT_COUNT],
    last_banked_in: Option<usize>,
}

impl Snapshot for Cartridge {
    type State = CartridgeState;

    fn state_size(&self) -> usize {
        let chips: usize = self
            .chips
            .iter()
            .map(|chip| 4 + chip.as_ref().map_or(0, |chip| chip.get_data().len()))
            .sum();
        2 + chips + ROM_SIZE + SEGMENT_COUNT + 1
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<(), SnapshotError> {
        write_bool(writer, self.game)?;
        write_bool(writer, self.exrom)?;
        for chip in self.chips.iter() {
            match chip {
                Some(chip) => {
                    writer.write_u16::<BigEndian>(chip.get_start())?;
                    writer.write_u16::<BigEndian>(chip.get_size())?;
                    writer.write_all(chip.get_data())?;
                }
                None => {
                    writer.write_u16::<BigEndian>(0)?;
                    writer.write_u16::<BigEndian>(0)?;
                }
            }
        }
        writer.write_all(&self.rom)?;
        for active in self.active.iter() {
            write_bool(writer, *active)?;
        }
        writer.write_u8(self.last_banked_in.map_or(NO_CHIP, |index| index as u8))?;
        Ok(())
    }

    fn read_state(reader: &mut dyn Read) -> Result<CartridgeState, SnapshotError> {
        let game = read_bool(reader)?;
        let exrom = read_bool(reader)?;
        let mut chips: [Option<ChipImage>; MAX_CHIPS] = std::array::from_fn(|_| None);
        for (index, slot) in chips.iter_mut().enumerate() {
            let start = reader.read_u16::<BigEndian>()?;
            let size = reader.read_u16::<BigEndian>()?;
            if size == 0 {
                continue;
            }
            let mut data = vec![0u8; size as usize];
            reader.read_exact(&mut data)?;
            let chip = ChipImage::new(start, &data)
                .map_err(|_| SnapshotError::InvalidChip { index, start, size })?;
            *slot = Some(chip);
        }
        let mut rom = vec![0u8; ROM_SIZE];
        reader.read_exact(&mut rom)?;
        let mut active = [false; SEGMENT_COUNT];
        for segment in active.iter_mut() {
            *segment = read_bool(reader)?;
        }
        let last_banked_in = match reader.read_u8()? {
            NO_CHIP => None,
            index if (index as usize) < MAX_CHIPS && chips[index as usize].is_some() => {
                Some(index as usize)
            }
            index => return Err(SnapshotError::InvalidBankIndex(index)),
        };
        Ok(CartridgeState {
            game,
            exrom,
            chips,
            rom,
            active,
            last_banked_in,
        })
    }

    fn restore_state(&mut self, state: CartridgeState) {
        self.game = state.game;
        self.exrom = state.exrom;
        self.chips = state.chips;
        self.rom = state.rom;
        self.active = state.active;
        self.last_banked_in = state.last_banked_in;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{load_from_buffer, save_to_buffer};

    fn setup_cartridge() -> Cartridge {
        let mut cartridge = Cartridge::new();
        cartridge.set_exrom_line(false);
        cartridge.load_chip(0, 0x8000, &[0x11; 0x2000]).unwrap();
        cartridge.load_chip(7, 0xa000, &[0x22; 0x0800]).unwrap();
        cartridge.load_chip(63, 0xe000, &[0x33; 0x2000]).unwrap();
        cartridge.bank_in(7);
        cartridge.bank_in(0);
        cartridge
    }

    #[test]
    fn state_size() {
        let cartridge = setup_cartridge();
        let expected = 2 + 64 * 4 + 0x2000 + 0x0800 + 0x2000 + 0x8000 + 16 + 1;
        assert_eq!(expected, cartridge.state_size());
        assert_eq!(expected, save_to_buffer(&cartridge).unwrap().len());
    }

    #[test]
    fn invalid_chip_is_rejected() {
        let cartridge = setup_cartridge();
        let mut buffer = save_to_buffer(&cartridge).unwrap();
        // Start address of chip 0
        buffer[2] = 0x70;
        let mut restored = Cartridge::new();
        match load_from_buffer(&mut restored, &buffer) {
            Err(SnapshotError::InvalidChip { index, start, size }) => {
                assert_eq!(0, index);
                assert_eq!(0x7000, start);
                assert_eq!(0x2000, size);
            }
            _ => panic!("expected invalid chip"),
        }
        assert_eq!(0, restored.number_of_chips());
    }

    #[test]
    fn invalid_bank_index_is_rejected() {
        let cartridge = setup_cartridge();
        let mut buffer = save_to_buffer(&cartridge).unwrap();
        let last = buffer.len() - 1;
        buffer[last] = 64;
        let mut restored = Cartridge::new();
        assert_eq!(
            true,
            matches!(
                load_from_buffer(&mut restored, &buffer),
                Err(SnapshotError::InvalidBankIndex(64))
            )
        );
    }

    #[test]
    fn bank_index_of_empty_slot_is_rejected() {
        let cartridge = setup_cartridge();
        let mut buffer = save_to_buffer(&cartridge).unwrap();
        let last = buffer.len() - 1;
        buffer[last] = 5;
        let mut restored = Cartridge::new();
        assert_eq!(
            true,
            matches!(
                load_from_buffer(&mut restored, &buffer),
                Err(SnapshotError::InvalidBankIndex(5))
            )
        );
        assert_eq!(None, restored.get_last_banked_in());
    }
}
