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

//! Command-line input logic and state management.
//!
//! `:` opens the command line. Typed text is kept in a `tui-input` component
//! until `Enter` submits it, at which point it is parsed into a [`Command`]
//! for the event loop to carry out.
//!
//! | Command                 | Effect                                        |
//! |-------------------------|-----------------------------------------------|
//! | `new <name>`            | Create a playlist and select it               |
//! | `delete`                | Delete the selected playlist file             |
//! | `add <path>...`         | Add files or directories to the playlist      |
//! | `sort <column> [desc]`  | Sort tracks by index/title/artist/album/time  |
//! | `rescan`                | Scan the music directories again              |
//! | `q`, `quit`             | Exit                                          |

use std::path::PathBuf;

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::model::TrackColumn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    Rescan,
    NewPlaylist(String),
    DeletePlaylist,
    AddTracks(Vec<PathBuf>),
    Sort { column: TrackColumn, descending: bool },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Outcome of offering a terminal event to the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommanderEvent {
    Ignored,
    Handled,
    Submitted(Result<Command, CommandError>),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn handle_event(&mut self, event: &Event) -> CommanderEvent {
        let Event::Key(key_event) = event else {
            return CommanderEvent::Ignored;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return CommanderEvent::Handled;
            }
            return CommanderEvent::Ignored;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
                CommanderEvent::Handled
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                match parse_command(&buffer) {
                    Ok(Some(command)) => CommanderEvent::Submitted(Ok(command)),
                    Ok(None) => CommanderEvent::Handled,
                    Err(e) => CommanderEvent::Submitted(Err(e)),
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
                CommanderEvent::Handled
            }
        }
    }
}

/// Parses a submitted command line; an empty line is no command.
pub(crate) fn parse_command(buffer: &str) -> Result<Option<Command>, CommandError> {
    let parts = split_args(buffer)?;
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();

    let command = match parts.as_slice() {
        [] => return Ok(None),

        ["q"] | ["quit"] => Command::Quit,

        ["rescan"] | ["scan"] => Command::Rescan,

        ["new"] => return Err(CommandError::MissingArgument("new")),
        ["new", name @ ..] => Command::NewPlaylist(name.join(" ")),

        ["delete"] => Command::DeletePlaylist,

        ["add"] => return Err(CommandError::MissingArgument("add")),
        ["add", paths @ ..] => Command::AddTracks(paths.iter().map(PathBuf::from).collect()),

        ["sort"] => return Err(CommandError::MissingArgument("sort")),
        ["sort", column, rest @ ..] => {
            let column =
                TrackColumn::parse(column).ok_or_else(|| CommandError::UnknownColumn(column.to_string()))?;
            let descending = matches!(rest, ["desc"] | ["descending"]);
            Command::Sort { column, descending }
        }

        [cmd, ..] => return Err(CommandError::Unknown(cmd.to_string())),
    };

    Ok(Some(command))
}

/// Splits on whitespace, keeping double-quoted runs together.
fn split_args(buffer: &str) -> Result<Vec<String>, CommandError> {
    let mut args = vec![];
    let mut current = String::new();
    let mut in_arg = false;
    let mut quoted = false;

    for c in buffer.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_arg = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_arg {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("rescan"), Ok(Some(Command::Rescan)));
        assert_eq!(parse_command("delete"), Ok(Some(Command::DeletePlaylist)));
        assert_eq!(
            parse_command("new Road Trip"),
            Ok(Some(Command::NewPlaylist("Road Trip".into())))
        );
        assert_eq!(
            parse_command("sort artist desc"),
            Ok(Some(Command::Sort { column: TrackColumn::Artist, descending: true }))
        );
        assert_eq!(
            parse_command("sort time"),
            Ok(Some(Command::Sort { column: TrackColumn::Duration, descending: false }))
        );
    }

    #[test]
    fn add_keeps_quoted_paths_together() {
        assert_eq!(
            parse_command(r#"add "Some Album/01 Intro.mp3" other.mp3"#),
            Ok(Some(Command::AddTracks(vec![
                PathBuf::from("Some Album/01 Intro.mp3"),
                PathBuf::from("other.mp3"),
            ])))
        );
    }

    #[test]
    fn reports_bad_commands() {
        assert_eq!(parse_command("new"), Err(CommandError::MissingArgument("new")));
        assert_eq!(parse_command("add"), Err(CommandError::MissingArgument("add")));
        assert_eq!(parse_command("sort genre"), Err(CommandError::UnknownColumn("genre".into())));
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse_command(r#"add "open"#), Err(CommandError::UnterminatedQuote));
    }

    #[test]
    fn split_handles_empty_quotes_and_extra_spaces() {
        assert_eq!(split_args(r#"  a  "" b "#).unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn typing_and_submitting_a_command() {
        let mut commander = Commander::new();

        assert_eq!(commander.handle_event(&key(KeyCode::Char('x'))), CommanderEvent::Ignored);
        assert_eq!(commander.handle_event(&key(KeyCode::Char(':'))), CommanderEvent::Handled);
        assert!(commander.active());

        commander.handle_event(&key(KeyCode::Char('q')));
        assert_eq!(commander.input.value(), "q");

        assert_eq!(
            commander.handle_event(&key(KeyCode::Enter)),
            CommanderEvent::Submitted(Ok(Command::Quit))
        );
        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
    }

    #[test]
    fn escape_abandons_the_command_line() {
        let mut commander = Commander::new();
        commander.handle_event(&key(KeyCode::Char(':')));
        commander.handle_event(&key(KeyCode::Char('d')));

        assert_eq!(commander.handle_event(&key(KeyCode::Esc)), CommanderEvent::Handled);
        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
    }
}
