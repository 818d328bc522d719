// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use crate::factory::Addressable;

pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0x00; capacity],
        }
    }

    pub fn fill(&mut self, pattern: u8) {
        for byte in self.data.iter_mut() {
            *byte = pattern;
        }
    }

    pub fn load(&mut self, data: &[u8], offset: u16) {
        let mut address = offset;
        for byte in data {
            self.data[address as usize] = *byte;
            address = address.wrapping_add(1);
        }
    }
}

impl Addressable for Ram {
    fn read(&self, address: u16) -> u8 {
        self.data[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.data[address as usize] = value
    }
}
