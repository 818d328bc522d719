// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

use std::cell::Cell;

/// System cycle counter shared by everything driven from the scheduler.
pub struct Clock {
    counter: Cell<u64>,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            counter: Cell::new(0),
        }
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.counter.get()
    }

    pub fn reset(&self) {
        self.counter.set(0);
    }

    #[inline]
    pub fn tick(&self) {
        self.counter.set(self.counter.get().wrapping_add(1));
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
