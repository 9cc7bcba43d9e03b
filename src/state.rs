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

//! FOD illumination state as exposed by the display driver
//!
//! The `fod_ui` node holds a single ASCII digit. `'0'` means the FOD region is
//! not lit; anything else means it is.

use std::io::{Read, Seek, SeekFrom};

use fb_error::{FodError, Result};
use tracing::error;

/// Interpret the first byte of the state node
pub fn parse_state_byte(byte: u8) -> bool {
    byte != b'0'
}

/// Rewind and read one byte from the state node.
pub fn try_read_state<R: Read + Seek>(source: &mut R) -> Result<bool> {
    source.seek(SeekFrom::Start(0)).map_err(FodError::StateSeek)?;

    let mut buf = [0u8; 1];
    let read = source.read(&mut buf).map_err(FodError::StateRead)?;
    if read != 1 {
        return Err(FodError::ShortRead { read });
    }
    Ok(parse_state_byte(buf[0]))
}

/// Like [`try_read_state`], but any failure is logged and reads as inactive.
pub fn read_state<R: Read + Seek>(source: &mut R) -> bool {
    match try_read_state(source) {
        Ok(state) => state,
        Err(e) => {
            error!("failed to read FOD state: {}", e);
            false
        }
    }
}
