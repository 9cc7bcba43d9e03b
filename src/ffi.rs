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

//! C ABI for the fingerprint HAL's handler loader
//!
//! The HAL `dlopen`s this library, looks up `UDFPS_HANDLER_FACTORY` and uses
//! its `create` / `destroy` pair to manage exactly one handler. The fingerprint
//! device is passed to `udfps_handler_init` as an ops table so the handler can
//! call back into the vendor `extCmd` hook.
//!
//! This is a C ABI, not the C++ one. The stock LineageOS fingerprint HAL
//! looks up the same `UDFPS_HANDLER_FACTORY` symbol but treats the pointer
//! from `create` as a C++ `UdfpsHandler` and calls `init`, `onFingerDown` and
//! `onFingerUp` through its vtable. [`MsmnileUdfpsHandler`] has no vtable, so
//! loading this library into an unmodified HAL crashes on the first virtual
//! call. The HAL side must call `udfps_handler_init`,
//! `udfps_handler_on_finger_down` and `udfps_handler_on_finger_up` instead.

use std::ffi::{c_float, c_int, c_void};
use std::sync::Arc;

use fb_error::FodError;
use tracing::error;

use crate::handler::{MsmnileUdfpsHandler, UdfpsHandler};
use crate::logger;
use crate::sinks::FingerprintDevice;

pub type ExtCmdFn = unsafe extern "C" fn(device: *mut c_void, cmd: c_int, param: c_int) -> c_int;

/// Fingerprint device as seen from C
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FingerprintDeviceOps {
    pub device: *mut c_void,
    pub ext_cmd: Option<ExtCmdFn>,
}

/// [`FingerprintDevice`] backed by a C ops table
#[derive(Debug)]
pub struct ExternFingerprintDevice {
    ops: FingerprintDeviceOps,
}

// SAFETY: the HAL owns the device for the whole process and serializes access
// to it; this wrapper only forwards calls.
unsafe impl Send for ExternFingerprintDevice {}
unsafe impl Sync for ExternFingerprintDevice {}

impl ExternFingerprintDevice {
    /// # Safety
    /// `ops.device` must stay valid, and `ops.ext_cmd` callable with it, for as
    /// long as the returned value exists.
    pub unsafe fn new(ops: FingerprintDeviceOps) -> Self {
        Self { ops }
    }
}

impl FingerprintDevice for ExternFingerprintDevice {
    fn ext_cmd(&self, cmd: i32, param: i32) -> i32 {
        match self.ops.ext_cmd {
            // SAFETY: upheld by the contract of `ExternFingerprintDevice::new`.
            Some(ext_cmd) => unsafe { ext_cmd(self.ops.device, cmd, param) },
            None => -libc::ENOSYS,
        }
    }
}

/// Factory table exported to the HAL
#[repr(C)]
pub struct UdfpsHandlerFactory {
    pub create: extern "C" fn() -> *mut MsmnileUdfpsHandler,
    pub destroy: unsafe extern "C" fn(handler: *mut MsmnileUdfpsHandler),
}

#[no_mangle]
pub static UDFPS_HANDLER_FACTORY: UdfpsHandlerFactory = UdfpsHandlerFactory {
    create: udfps_handler_create,
    destroy: udfps_handler_destroy,
};

#[no_mangle]
pub extern "C" fn udfps_handler_create() -> *mut MsmnileUdfpsHandler {
    logger::init_logging();
    Box::into_raw(Box::new(MsmnileUdfpsHandler::new()))
}

/// # Safety
/// `handler` must be null or a pointer returned by `udfps_handler_create` that
/// has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn udfps_handler_destroy(handler: *mut MsmnileUdfpsHandler) {
    if !handler.is_null() {
        drop(Box::from_raw(handler));
    }
}

/// Returns 0 on success or a negative errno.
///
/// # Safety
/// `handler` must be a live handler from `udfps_handler_create`. `ops` must
/// point to a valid ops table whose device outlives the handler's process.
#[no_mangle]
pub unsafe extern "C" fn udfps_handler_init(
    handler: *mut MsmnileUdfpsHandler,
    ops: *const FingerprintDeviceOps,
) -> c_int {
    let Some(handler) = handler.as_mut() else {
        return FodError::NullPointer("handler").errno();
    };
    let Some(ops) = ops.as_ref() else {
        return FodError::NullPointer("fingerprint device").errno();
    };

    let device = Arc::new(ExternFingerprintDevice::new(*ops));
    match handler.init(device) {
        Ok(()) => 0,
        Err(e) => {
            error!("failed to init UDFPS handler: {}", e);
            e.errno()
        }
    }
}

/// # Safety
/// `handler` must be null or a live handler from `udfps_handler_create`.
#[no_mangle]
pub unsafe extern "C" fn udfps_handler_on_finger_down(
    handler: *mut MsmnileUdfpsHandler,
    x: u32,
    y: u32,
    minor: c_float,
    major: c_float,
) {
    if let Some(handler) = handler.as_mut() {
        handler.on_finger_down(x, y, minor, major);
    }
}

/// # Safety
/// `handler` must be null or a live handler from `udfps_handler_create`.
#[no_mangle]
pub unsafe extern "C" fn udfps_handler_on_finger_up(handler: *mut MsmnileUdfpsHandler) {
    if let Some(handler) = handler.as_mut() {
        handler.on_finger_up();
    }
}
