// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

mod memory_map;
mod scheduler;

pub use self::memory_map::MemoryMap;
pub use self::scheduler::System;
