// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

mod clock;
mod irq_line;
mod ram;
mod shared;

pub use self::clock::Clock;
pub use self::irq_line::IrqLine;
pub use self::ram::Ram;
pub use self::shared::{new_shared, Shared};
