// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

pub mod cartridge;
mod expansion_port;

pub use self::cartridge::{Cartridge, ChipError, ChipImage, IoConfig};
pub use self::expansion_port::{io_mode, ExpansionPort, IoLine};
