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

//! Ordered endpoint discovery
//!
//! Different kernel builds expose the same logical endpoint under different
//! sysfs paths. The locator tries each candidate in order and hands back the
//! first one that opens. Finding none is not an error: callers get
//! [`Endpoint::Unavailable`] and degrade.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::paths;

/// How an endpoint is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    /// OpenOptions matching this mode. Never creates files.
    pub fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            AccessMode::ReadOnly => opts.read(true),
            AccessMode::WriteOnly => opts.write(true),
            AccessMode::ReadWrite => opts.read(true).write(true),
        };
        opts
    }
}

/// A resolved endpoint, or the sentinel for "nothing could be opened"
#[derive(Debug)]
pub enum Endpoint<T> {
    Available { path: PathBuf, handle: T },
    Unavailable,
}

impl<T> Endpoint<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Endpoint::Available { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Endpoint::Available { path, .. } => Some(path),
            Endpoint::Unavailable => None,
        }
    }

    pub fn handle(&self) -> Option<&T> {
        match self {
            Endpoint::Available { handle, .. } => Some(handle),
            Endpoint::Unavailable => None,
        }
    }

    pub fn into_handle(self) -> Option<T> {
        match self {
            Endpoint::Available { handle, .. } => Some(handle),
            Endpoint::Unavailable => None,
        }
    }
}

/// Try `open` on each candidate in order; the first success wins.
pub fn resolve_with<P, T, F>(candidates: &[P], mode: AccessMode, mut open: F) -> Endpoint<T>
where
    P: AsRef<Path>,
    F: FnMut(&Path, AccessMode) -> io::Result<T>,
{
    for candidate in candidates {
        let path = candidate.as_ref();
        match open(path, mode) {
            Ok(handle) => {
                return Endpoint::Available {
                    path: path.to_path_buf(),
                    handle,
                }
            }
            Err(e) => debug!("{} unavailable ({:?}): {}", path.display(), mode, e),
        }
    }
    Endpoint::Unavailable
}

/// Open the first candidate file that exists and accepts `mode`.
pub fn resolve<P: AsRef<Path>>(candidates: &[P], mode: AccessMode) -> Endpoint<File> {
    resolve_with(candidates, mode, |path, mode| mode.options().open(path))
}

/// The set of kernel endpoints one handler talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub fod_ui: Vec<PathBuf>,
    pub fod_status: Vec<PathBuf>,
    pub touch_dev: PathBuf,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            fod_ui: paths::FOD_UI.iter().map(PathBuf::from).collect(),
            fod_status: paths::FOD_STATUS.iter().map(PathBuf::from).collect(),
            touch_dev: PathBuf::from(paths::TOUCH_DEV),
        }
    }
}
