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

//! Terminal background control via OSC escape sequences.
//!
//! Terminals that do not understand OSC 11/111 ignore them, so failures here
//! are logged and otherwise ignored.

use std::io::{self, Write};

use tracing::debug;

/// Paints the whole terminal window with `hex_color` (e.g. `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) {
    send_osc(&format!("\x1b]11;{hex_color}\x07"));
}

/// Hands the background back to the user's terminal configuration.
pub(crate) fn reset_terminal_bg() {
    send_osc("\x1b]111\x07");
}

fn send_osc(sequence: &str) {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(sequence.as_bytes()).and_then(|_| stdout.flush()) {
        debug!("Failed to write terminal escape sequence: {e}");
    }
}
