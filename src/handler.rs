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

//! UDFPS handler lifecycle
//!
//! The fingerprint HAL creates one handler per process, calls [`UdfpsHandler::init`]
//! once with its device, and forwards touch capture events for the rest of its
//! life. On msmnile all the work happens on the FOD event loop; the capture
//! callbacks have nothing to do.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use fb_error::{FodError, Result};
use tracing::info;

use crate::event_loop;
use crate::locator::EndpointPaths;
use crate::sinks::{SharedFingerprintDevice, SharedTouchControl, TouchDevice};

/// Callbacks the fingerprint HAL drives
pub trait UdfpsHandler {
    fn init(&mut self, device: SharedFingerprintDevice) -> Result<()>;
    fn on_finger_down(&mut self, x: u32, y: u32, minor: f32, major: f32);
    fn on_finger_up(&mut self);
}

/// Handler for Xiaomi msmnile panels.
///
/// Dropping it does not stop the event loop; the thread is detached and lives
/// until the process exits.
pub struct MsmnileUdfpsHandler {
    paths: EndpointPaths,
    device: Option<SharedFingerprintDevice>,
    touch: Option<Arc<TouchDevice>>,
    event_loop: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl MsmnileUdfpsHandler {
    pub fn new() -> Self {
        Self::with_paths(EndpointPaths::default())
    }

    pub fn with_paths(paths: EndpointPaths) -> Self {
        Self {
            paths,
            device: None,
            touch: None,
            event_loop: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn paths(&self) -> &EndpointPaths {
        &self.paths
    }

    pub fn is_initialized(&self) -> bool {
        self.touch.is_some()
    }

    pub fn touch_device(&self) -> Option<&TouchDevice> {
        self.touch.as_deref()
    }

    /// True once the event loop thread has exited, or if it never started.
    pub fn event_loop_finished(&self) -> bool {
        self.event_loop.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Ask the event loop to exit at its next wake. Production never calls this.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }
}

impl Default for MsmnileUdfpsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UdfpsHandler for MsmnileUdfpsHandler {
    fn init(&mut self, device: SharedFingerprintDevice) -> Result<()> {
        if self.is_initialized() {
            return Err(FodError::AlreadyInitialized);
        }

        let touch = Arc::new(TouchDevice::open(&self.paths.touch_dev));
        let touch_control: SharedTouchControl = touch.clone();
        self.touch = Some(touch);
        self.device = Some(device.clone());

        let handle = event_loop::spawn(self.paths.clone(), device, touch_control, self.stop.clone())?;
        info!("FOD event loop started");
        self.event_loop = Some(handle);
        Ok(())
    }

    fn on_finger_down(&mut self, _x: u32, _y: u32, _minor: f32, _major: f32) {
        // nothing
    }

    fn on_finger_up(&mut self) {
        // nothing
    }
}
