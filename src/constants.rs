/*
 * This file is part of fodbridge.
 *
 * Copyright (C) 2025 fodbridge contributors
 *
 * fodbridge is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * fodbridge is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with fodbridge. If not, see <https://www.gnu.org/licenses/>.
 */

//! Constants for the msmnile FOD handler
//!
//! Centralizes every path, command code and ioctl number the handler touches.
//! Other modules never hard-code these values.

use std::time::Duration;

/// Kernel endpoints, in the order they are tried
pub mod paths {
    /// Display FOD illumination state (read-only, supports POLLPRI)
    pub const FOD_UI: &[&str] = &[
        "/sys/devices/platform/soc/soc:qcom,dsi-display-primary/fod_ui",
        "/sys/devices/platform/soc/soc:qcom,dsi-display/fod_ui",
    ];

    /// Status mirror read by the touch HAL and other consumers (write-only)
    pub const FOD_STATUS: &[&str] = &[
        "/sys/touchpanel/fod_status",
        "/sys/devices/virtual/touch/tp_dev/fod_status",
    ];

    /// Xiaomi touch feature device
    pub const TOUCH_DEV: &str = "/dev/xiaomi-touch";
}

/// Fingerprint HAL extension commands
pub mod nit {
    /// `extCmd` code selecting the illumination (NIT) level
    pub const COMMAND_NIT: i32 = 10;
    /// FOD illumination active
    pub const PARAM_NIT_FOD: i32 = 1;
    /// FOD illumination inactive
    pub const PARAM_NIT_NONE: i32 = 0;
}

/// Xiaomi touch feature ioctl interface
pub mod touch {
    pub const TOUCH_MAGIC: u32 = 0x5400;
    pub const TOUCH_IOC_SETMODE: u32 = TOUCH_MAGIC;

    /// Feature id for under-display fingerprint sampling
    pub const TOUCH_UDFPS_ENABLE: i32 = 10;
    pub const UDFPS_STATUS_ON: i32 = 1;
    pub const UDFPS_STATUS_OFF: i32 = 0;
}

/// Event loop tuning
pub mod event_loop {
    use super::Duration;

    /// Name of the background thread
    pub const THREAD_NAME: &str = "fod-ui-poll";

    /// Pause after a failed poll before waiting again
    pub const WAIT_RETRY_DELAY: Duration = Duration::from_millis(10);
}
