// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! File based logging.
//!
//! The terminal is owned by the TUI, so log output goes to a file next to
//! the configuration file. The filter comes from `RUST_LOG`, falling back to
//! the configured level.

use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{self, AppConfig};

const LOG_FILE: &str = "songlist.log";

/// Installs the global subscriber.
///
/// The returned guard flushes buffered output when dropped, so it must be
/// held until the application exits.
pub(crate) fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    let dir = config::config_dir().unwrap_or_else(|| env::temp_dir().join(config::CONFIG_NAME));
    init_logging_in(dir, &config.log_level)
}

fn init_logging_in(dir: PathBuf, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
