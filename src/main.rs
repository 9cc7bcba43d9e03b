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

//! fodbridged - standalone host for the msmnile FOD handler
//!
//! Runs the handler outside the fingerprint HAL, with a fingerprint device that
//! only logs NIT commands. Useful for panel bring-up: the touch driver and the
//! status mirror still receive real updates.

use std::sync::Arc;
use std::thread;

use anyhow::Context;
use fodbridge::{logger, FingerprintDevice, MsmnileUdfpsHandler, UdfpsHandler};
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

struct LoggingFingerprintDevice;

impl FingerprintDevice for LoggingFingerprintDevice {
    fn ext_cmd(&self, cmd: i32, param: i32) -> i32 {
        info!("extCmd(cmd={}, param={})", cmd, param);
        0
    }
}

fn main() -> anyhow::Result<()> {
    logger::init_logging();
    info!("fodbridged {} starting", VERSION);

    let mut handler = MsmnileUdfpsHandler::new();
    handler
        .init(Arc::new(LoggingFingerprintDevice))
        .context("failed to start FOD handler")?;

    if let Some(touch) = handler.touch_device() {
        info!(
            "touch device {} {}",
            touch.path().display(),
            if touch.is_open() { "open" } else { "unavailable" }
        );
    }

    // The event loop owns the process from here on; exit if it gives up.
    while !handler.event_loop_finished() {
        thread::park_timeout(std::time::Duration::from_secs(60));
    }
    anyhow::bail!("FOD event loop exited, no display FOD node?")
}
