// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

mod delay_line;
mod irq_control;
mod port;
mod registers;
mod via;

pub use self::delay_line::DelayLine;
pub use self::irq_control::IrqControl;
pub use self::port::PortBinding;
pub use self::registers::{irq, pipeline, reg, ControlMode, Port, Registers};
pub use self::via::Via;
