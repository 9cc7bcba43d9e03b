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

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or `info` when unset or unparsable
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; returns false if a subscriber was already set
/// (by the host process or an earlier call).
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_thread_names(true)
        .with_env_filter(env_filter())
        .try_init()
        .is_ok()
}
