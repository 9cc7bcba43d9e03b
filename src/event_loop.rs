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

//! Background FOD state reactor
//!
//! One thread per process blocks on `poll(POLLPRI | POLLERR)` over the
//! display's `fod_ui` node. Every wake reads the state and fans it out to the
//! fingerprint HAL, the status mirror and the touch driver, in that order.
//! Nothing is deduplicated: each wake fires every sink even if the state did
//! not change.

use std::fs::File;
use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use fb_error::{FodError, Result};
use tracing::dispatcher::{self, Dispatch};
use tracing::{debug, error, info};

use crate::constants::event_loop::{THREAD_NAME, WAIT_RETRY_DELAY};
use crate::locator::{resolve, AccessMode, EndpointPaths};
use crate::sinks::{send_nit, send_touch_mode, write_status, SharedFingerprintDevice, SharedTouchControl};
use crate::state::read_state;

/// Blocks until the state node signals a change
pub trait Waiter {
    fn wait(&mut self, fd: BorrowedFd<'_>) -> io::Result<()>;
}

/// `poll(2)` for sysfs_notify wakeups, no timeout
#[derive(Debug, Default, Clone, Copy)]
pub struct PollWaiter;

impl Waiter for PollWaiter {
    fn wait(&mut self, fd: BorrowedFd<'_>) -> io::Result<()> {
        let mut pfd = libc::pollfd {
            fd: fd.as_raw_fd(),
            events: libc::POLLERR | libc::POLLPRI,
            revents: 0,
        };
        // SAFETY: `pfd` is a single valid pollfd and `fd` is borrowed for the call.
        let rc = unsafe { libc::poll(&mut pfd, 1, -1) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

/// What one wake read and what each sink answered
#[derive(Debug)]
pub struct WakeReport {
    /// State used for the NIT command and status mirror
    pub fod_ui: bool,
    pub nit_rc: i32,
    /// `None` when there is no status mirror
    pub status: Option<io::Result<()>>,
    /// State re-read for the touch driver
    pub touch_state: bool,
    pub touch: io::Result<()>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub wakes: u64,
    pub wait_failures: u64,
}

pub struct FodEventLoop<W> {
    fod_ui: File,
    fod_status: Option<File>,
    device: SharedFingerprintDevice,
    touch: SharedTouchControl,
    waiter: W,
    stop: Arc<AtomicBool>,
    stats: LoopStats,
}

impl<W: Waiter> FodEventLoop<W> {
    /// Resolve the state and status nodes. Only a missing state node is fatal.
    pub fn open(
        paths: &EndpointPaths,
        device: SharedFingerprintDevice,
        touch: SharedTouchControl,
        waiter: W,
        stop: Arc<AtomicBool>,
    ) -> Result<Self> {
        let fod_ui = resolve(&paths.fod_ui, AccessMode::ReadOnly);
        if let Some(path) = fod_ui.path() {
            info!("watching FOD state at {}", path.display());
        }
        let fod_ui = fod_ui
            .into_handle()
            .ok_or_else(|| FodError::endpoint_unavailable("fod_ui", &paths.fod_ui))?;

        let fod_status = resolve(&paths.fod_status, AccessMode::WriteOnly);
        match fod_status.path() {
            Some(path) => info!("mirroring FOD status to {}", path.display()),
            None => debug!("no fod_status node, status mirror disabled"),
        }

        Ok(Self {
            fod_ui,
            fod_status: fod_status.into_handle(),
            device,
            touch,
            waiter,
            stop,
            stats: LoopStats::default(),
        })
    }

    pub fn has_status_mirror(&self) -> bool {
        self.fod_status.is_some()
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Read the state and push it to every sink once.
    ///
    /// The touch driver gets a second, independent read of the node, so it can
    /// disagree with the HAL and status mirror if the display flips in between.
    pub fn process_wake(&mut self) -> WakeReport {
        let fod_ui = read_state(&mut self.fod_ui);

        let nit_rc = send_nit(self.device.as_ref(), fod_ui);
        let status = self
            .fod_status
            .as_mut()
            .map(|status| write_status(status, fod_ui));

        let touch_state = read_state(&mut self.fod_ui);
        let touch = send_touch_mode(self.touch.as_ref(), touch_state);

        WakeReport {
            fod_ui,
            nit_rc,
            status,
            touch_state,
            touch,
        }
    }

    /// Run until the stop flag is raised, handing each wake's report to `on_wake`.
    pub fn run_with<F: FnMut(&WakeReport)>(&mut self, mut on_wake: F) -> LoopStats {
        while !self.stop.load(Ordering::Acquire) {
            if let Err(e) = self.waiter.wait(self.fod_ui.as_fd()) {
                error!("failed to poll fod_ui: {}", e);
                self.stats.wait_failures += 1;
                thread::sleep(WAIT_RETRY_DELAY);
                continue;
            }
            if self.stop.load(Ordering::Acquire) {
                break;
            }

            self.stats.wakes += 1;
            let report = self.process_wake();
            on_wake(&report);
        }
        self.stats
    }

    pub fn run(&mut self) -> LoopStats {
        self.run_with(|report| debug!("fod_ui={} touch={}", report.fod_ui, report.touch_state))
    }
}

/// Start the event loop on its own thread. The handle may be dropped to detach it.
///
/// The thread logs through the subscriber that is current for the caller.
pub fn spawn(
    paths: EndpointPaths,
    device: SharedFingerprintDevice,
    touch: SharedTouchControl,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<()>> {
    let dispatch = dispatcher::get_default(Dispatch::clone);
    thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || {
            dispatcher::with_default(&dispatch, || {
                let mut event_loop = match FodEventLoop::open(&paths, device, touch, PollWaiter, stop) {
                    Ok(event_loop) => event_loop,
                    Err(e) => {
                        error!("FOD event loop not started: {}", e);
                        return;
                    }
                };
                event_loop.run();
            })
        })
        .map_err(FodError::ThreadSpawn)
}
