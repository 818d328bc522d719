// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

/// Bit pipeline of pending effects. Each clock moves every stage one bit to
/// the left, drops the bits outside `mask` and re-arms the persistent ones
/// from `feed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DelayLine {
    // Configuration
    mask: u32,
    // State
    cycles: u32,
    feed: u32,
}

impl DelayLine {
    pub fn new(mask: u32) -> Self {
        Self {
            mask,
            cycles: 0,
            feed: 0,
        }
    }

    #[inline]
    pub fn has_cycle(&self, mask: u32) -> bool {
        self.cycles & mask != 0
    }

    #[inline]
    pub fn is_fed(&self, mask: u32) -> bool {
        self.feed & mask != 0
    }

    #[inline]
    pub fn autofeed(&mut self, mask: u32, enabled: bool) {
        if enabled {
            self.feed |= mask;
        } else {
            self.feed &= !mask;
        }
    }

    #[inline]
    pub fn clock(&mut self) {
        self.cycles = ((self.cycles << 1) & self.mask) | self.feed;
    }

    #[inline]
    pub fn feed(&mut self, mask: u32) {
        self.cycles |= mask;
    }

    #[inline]
    pub fn remove(&mut self, mask: u32) {
        self.cycles &= !mask;
    }

    #[inline]
    pub fn reset(&mut self) {
        self.cycles = 0;
        self.feed = 0;
    }

    pub fn get_cycles(&self) -> u32 {
        self.cycles
    }

    pub fn get_feed(&self) -> u32 {
        self.feed
    }

    pub fn restore(&mut self, cycles: u32, feed: u32) {
        self.cycles = cycles;
        self.feed = feed;
    }
}
