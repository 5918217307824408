//! Interactive command parsing

use crate::error::{CliError, Result};
use echo_core::{ActiveView, SongId};
use std::str::FromStr;
use std::time::Duration;

/// Longest span a single `tick` may simulate
pub const MAX_TICK: Duration = Duration::from_secs(24 * 60 * 60);

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the active list
    List,
    /// Switch the active view
    View(ActiveView),
    /// Select a song without a user gesture (navigation)
    Select(SongId),
    /// Play a song (click) or resume
    Play(Option<SongId>),
    Pause,
    Toggle,
    Next,
    Prev,
    /// Seek to a percentage
    Seek(f64),
    /// Set volume (0.0-1.0)
    Volume(f64),
    Mute,
    /// Toggle favorite of a song, or of the current one
    Fav(Option<SongId>),
    Favorites,
    Recent,
    Top,
    /// Let simulated time pass
    Tick(Duration),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                      show the active list
  view <catalog|recent|top|favorites>
  select <id>               load a song (no gesture)
  play [id]                 play a song, or resume
  pause | toggle            transport
  next | prev               move through the active list
  seek <percent>            jump within the current song
  volume <0..1> | mute      output level
  fav [id]                  toggle favorite (current song by default)
  favorites | recent | top  show a persisted list
  tick <seconds>            let playback advance
  status                    show the now-playing line
  help | quit";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CliError::InvalidCommand("empty input".to_string()));
        };
        let arg = parts.next();
        if let Some(extra) = parts.next() {
            return Err(CliError::InvalidCommand(format!(
                "unexpected argument '{extra}'"
            )));
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "view" | "go" => {
                let view = required(name, arg)?;
                Command::View(
                    ActiveView::from_str(view)
                        .or_else(|| ActiveView::from_route(view))
                        .ok_or_else(|| {
                            CliError::InvalidCommand(format!("unknown view '{view}'"))
                        })?,
                )
            }
            "select" => Command::Select(song_id(required(name, arg)?)?),
            "play" => Command::Play(arg.map(song_id).transpose()?),
            "pause" => Command::Pause,
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "seek" => Command::Seek(number(name, required(name, arg)?)?),
            "volume" | "vol" => Command::Volume(number(name, required(name, arg)?)?),
            "mute" => Command::Mute,
            "fav" | "favorite" => Command::Fav(arg.map(song_id).transpose()?),
            "favorites" | "favs" => Command::Favorites,
            "recent" => Command::Recent,
            "top" => Command::Top,
            "tick" => {
                let secs = number(name, required(name, arg)?)?;
                let elapsed = Duration::try_from_secs_f64(secs)
                    .ok()
                    .filter(|d| *d <= MAX_TICK)
                    .ok_or_else(|| {
                        CliError::InvalidCommand(format!(
                            "tick needs between 0 and {} seconds, got '{secs}'",
                            MAX_TICK.as_secs()
                        ))
                    })?;
                Command::Tick(elapsed)
            }
            "status" | "st" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(CliError::InvalidCommand(format!(
                    "unknown command '{other}' (try 'help')"
                )))
            }
        };

        // Commands without arguments reject one
        let takes_arg = matches!(
            command,
            Command::View(_)
                | Command::Select(_)
                | Command::Play(_)
                | Command::Seek(_)
                | Command::Volume(_)
                | Command::Fav(_)
                | Command::Tick(_)
        );
        if !takes_arg {
            if let Some(arg) = arg {
                return Err(CliError::InvalidCommand(format!(
                    "'{name}' takes no argument, got '{arg}'"
                )));
            }
        }

        Ok(command)
    }
}

fn required<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| CliError::InvalidCommand(format!("'{name}' needs an argument")))
}

fn song_id(arg: &str) -> Result<SongId> {
    arg.parse()
        .map_err(|_| CliError::InvalidCommand(format!("'{arg}' is not a song id")))
}

fn number(name: &str, arg: &str) -> Result<f64> {
    arg.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::InvalidCommand(format!("'{name}' needs a number, got '{arg}'")))
}
