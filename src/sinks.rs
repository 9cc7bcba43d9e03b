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

//! Propagation sinks for the FOD state
//!
//! Every sink is best effort. Each call reports its outcome so tests can tell
//! an attempted propagation from a confirmed one; the event loop ignores them.

use std::fs::File;
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::constants::{nit, touch};
use crate::locator::AccessMode;

/// The one fingerprint HAL operation this handler needs
#[cfg_attr(test, mockall::automock)]
pub trait FingerprintDevice {
    /// Dispatch a vendor extension command. The return code is driver defined.
    fn ext_cmd(&self, cmd: i32, param: i32) -> i32;
}

/// Fingerprint capability shared with the background thread
pub type SharedFingerprintDevice = Arc<dyn FingerprintDevice + Send + Sync>;

/// Touch driver mode switch
pub trait TouchControl {
    fn set_mode(&self, mode: i32, value: i32) -> io::Result<()>;
}

/// Touch control shared between the handler and its event loop
pub type SharedTouchControl = Arc<dyn TouchControl + Send + Sync>;

pub fn nit_param(fod_ui: bool) -> i32 {
    if fod_ui {
        nit::PARAM_NIT_FOD
    } else {
        nit::PARAM_NIT_NONE
    }
}

pub fn udfps_status(fod_ui: bool) -> i32 {
    if fod_ui {
        touch::UDFPS_STATUS_ON
    } else {
        touch::UDFPS_STATUS_OFF
    }
}

/// Ask the fingerprint HAL to switch illumination level. Returns the driver's code.
pub fn send_nit(device: &dyn FingerprintDevice, fod_ui: bool) -> i32 {
    device.ext_cmd(nit::COMMAND_NIT, nit_param(fod_ui))
}

/// Mirror the state into the status node as a single ASCII digit.
pub fn write_status<W: Write + ?Sized>(status: &mut W, fod_ui: bool) -> io::Result<()> {
    let byte: &[u8] = if fod_ui { b"1" } else { b"0" };
    status.write_all(byte)
}

/// Toggle UDFPS sampling in the touch driver.
pub fn send_touch_mode(control: &dyn TouchControl, fod_ui: bool) -> io::Result<()> {
    control.set_mode(touch::TOUCH_UDFPS_ENABLE, udfps_status(fod_ui))
}

/// `/dev/xiaomi-touch`, opened once. A failed open is kept as a closed device.
#[derive(Debug)]
pub struct TouchDevice {
    path: PathBuf,
    file: Option<File>,
}

impl TouchDevice {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = match AccessMode::ReadWrite.options().open(&path) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("failed to open touch device {}: {}", path.display(), e);
                None
            }
        };
        Self { path, file }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl TouchControl for TouchDevice {
    fn set_mode(&self, mode: i32, value: i32) -> io::Result<()> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::EBADF))?;

        let mut arg: [libc::c_int; 2] = [mode, value];
        // SAFETY: the fd is owned by `file` and stays open for the call; the
        // driver reads exactly two ints from `arg`, which outlives the call.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                touch::TOUCH_IOC_SETMODE as _,
                arg.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
