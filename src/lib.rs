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

//! fodbridge - under-display fingerprint handler for Xiaomi msmnile
//!
//! Watches the display's FOD illumination state and forwards every change to
//! the fingerprint HAL (NIT command), the touchscreen driver (UDFPS sampling
//! mode) and a sysfs status mirror.

pub mod constants;
pub mod event_loop;
pub mod ffi;
pub mod handler;
pub mod locator;
pub mod logger;
pub mod sinks;
pub mod state;

#[cfg(test)]
pub mod test_utils;

pub use fb_error::{FodError, Result};
pub use handler::{MsmnileUdfpsHandler, UdfpsHandler};
pub use locator::{AccessMode, Endpoint, EndpointPaths};
pub use sinks::{FingerprintDevice, SharedFingerprintDevice, TouchControl, TouchDevice};
