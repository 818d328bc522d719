// This file is part of zinc64.
// Copyright (c) 2016-2019 Sebastian Jastrzebski. All rights reserved.
// Licensed under the GPLv3. See LICENSE file in the project root for full license text.

pub struct Config {
    pub drive: DriveConfig,
}

impl Config {
    pub fn new(drive: DriveConfig) -> Config {
        Config { drive }
    }

    pub fn default() -> Config {
        Config {
            drive: DriveConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveConfig {
    /// Serial bus device number, 8 to 11.
    pub device_number: u8,
    /// Head position after reset, 1 to 84.
    pub halftrack: u8,
}

impl DriveConfig {
    pub fn new(device_number: u8, halftrack: u8) -> DriveConfig {
        assert!(
            device_number >= 8 && device_number <= 11,
            "invalid device number {}",
            device_number
        );
        assert!(
            halftrack >= 1 && halftrack <= 84,
            "invalid halftrack {}",
            halftrack
        );
        DriveConfig {
            device_number,
            halftrack,
        }
    }

    pub fn default() -> DriveConfig {
        DriveConfig {
            device_number: 8,
            halftrack: 41,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drive() {
        let config = Config::default();
        assert_eq!(8, config.drive.device_number);
        assert_eq!(41, config.drive.halftrack);
    }

    #[test]
    #[should_panic]
    fn invalid_device_number() {
        DriveConfig::new(12, 41);
    }
}
