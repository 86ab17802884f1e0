//! Terminal commands and rendering
//!
//! Each input line is parsed into a [`Command`] and applied to the
//! controller. Rendering works from the controller's state and `PlayerView`,
//! so everything here runs against any media resource.

use cadence_playback::{MediaResource, PlaybackEvent, PlayerView, RepeatMode, TransportController};
use thiserror::Error;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the track list
    List,
    /// Click a track, by list number (1-based) or id
    Select(String),
    /// Play/pause button
    Toggle,
    Next,
    Previous,
    /// Seek, in seconds or `m:ss`
    Seek(f64),
    /// Volume in percent
    Volume(u8),
    Mute,
    Repeat,
    Shuffle,
    /// Toggle a favorite; current track when no target is given
    Favorite(Option<String>),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid time: {0} (use seconds or m:ss)")]
    InvalidTime(String),

    #[error("Invalid volume: {0} (use 0-100)")]
    InvalidVolume(String),
}

pub const HELP: &str = "\
Commands:
  list, ls            show tracks
  play <n|id>         click a track (toggles if it is the current one)
  p, toggle           play/pause
  n, next             next track
  b, prev             previous track
  seek <secs|m:ss>    jump to position
  vol <0-100>         set volume
  mute                toggle mute
  repeat              cycle repeat off/one/all
  shuffle             toggle shuffle
  fav [n|id]          toggle favorite (current track by default)
  status              show the player bar
  help                this text
  q, quit             exit";

impl Command {
    /// Parse a line; `Ok(None)` for blank input
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "play" | "select" => Command::Select(
                arg.ok_or(ParseError::MissingArgument("play"))?.to_string(),
            ),
            "p" | "toggle" | "pause" => Command::Toggle,
            "n" | "next" => Command::Next,
            "b" | "prev" | "previous" => Command::Previous,
            "seek" => {
                let raw = arg.ok_or(ParseError::MissingArgument("seek"))?;
                Command::Seek(parse_time(raw).ok_or_else(|| ParseError::InvalidTime(raw.into()))?)
            }
            "vol" | "volume" => {
                let raw = arg.ok_or(ParseError::MissingArgument("vol"))?;
                let level = raw
                    .parse::<u8>()
                    .ok()
                    .filter(|v| *v <= 100)
                    .ok_or_else(|| ParseError::InvalidVolume(raw.into()))?;
                Command::Volume(level)
            }
            "mute" => Command::Mute,
            "repeat" | "r" => Command::Repeat,
            "shuffle" | "s" => Command::Shuffle,
            "fav" | "favorite" => Command::Favorite(arg.map(str::to_string)),
            "status" | "st" => Command::Status,
            "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Parse `90`, `90.5` or `1:30` into seconds
pub fn parse_time(raw: &str) -> Option<f64> {
    match raw.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            (0.0..60.0)
                .contains(&seconds)
                .then_some(minutes as f64 * 60.0 + seconds)
        }
        None => raw.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0),
    }
}

/// Resolve a list number (1-based) or id to a track id
pub fn resolve_track<M: MediaResource>(
    controller: &TransportController<M>,
    target: &str,
) -> Option<String> {
    let tracks = controller.tracks();

    if let Some(track) = tracks.iter().find(|t| t.id == target) {
        return Some(track.id.clone());
    }

    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| tracks.get(i))
        .map(|t| t.id.clone())
}

/// Apply a command; returns text to print, if any
///
/// `Quit` is handled by the caller.
pub fn apply<M: MediaResource>(
    controller: &mut TransportController<M>,
    command: Command,
) -> Option<String> {
    match command {
        Command::List => Some(render_tracks(controller)),
        Command::Select(target) => match resolve_track(controller, &target) {
            Some(id) => {
                controller.select(&id);
                None
            }
            None => Some(format!("No track '{}'", target)),
        },
        Command::Toggle => {
            controller.toggle_play();
            None
        }
        Command::Next => {
            controller.next();
            None
        }
        Command::Previous => {
            controller.previous();
            None
        }
        Command::Seek(secs) => {
            controller.seek(secs);
            Some(render_status(&controller.view()))
        }
        Command::Volume(percent) => {
            controller.set_volume(f32::from(percent) / 100.0);
            None
        }
        Command::Mute => {
            controller.toggle_mute();
            None
        }
        Command::Repeat => {
            let mode = controller.toggle_repeat();
            Some(format!("Repeat: {}", mode.as_str()))
        }
        Command::Shuffle => {
            let shuffle = controller.toggle_shuffle();
            Some(format!("Shuffle: {}", if shuffle { "on" } else { "off" }))
        }
        Command::Favorite(target) => {
            let id = match target {
                Some(target) => resolve_track(controller, &target),
                None => controller.current_track().map(|t| t.id.clone()),
            };
            match id {
                Some(id) => {
                    controller.toggle_favorite(&id);
                    None
                }
                None => Some("No track to favorite".to_string()),
            }
        }
        Command::Status => Some(render_status(&controller.view())),
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    }
}

/// Track list with current/playing/favorite markers
pub fn render_tracks<M: MediaResource>(controller: &TransportController<M>) -> String {
    if controller.tracks().is_empty() {
        return "No tracks".to_string();
    }

    controller
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if controller.is_animating(&track.id) {
                '▶'
            } else if controller.is_active(&track.id) {
                '•'
            } else {
                ' '
            };
            let heart = if controller.is_favorite(&track.id) {
                " ♥"
            } else {
                ""
            };
            format!(
                "{} {:>3}. {} - {}{}",
                marker,
                i + 1,
                track.title,
                track.artist,
                heart
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line player bar
pub fn render_status(view: &PlayerView) -> String {
    let Some(track) = &view.current_track else {
        return "Nothing loaded".to_string();
    };

    let mut flags = Vec::new();
    if view.shuffle {
        flags.push("shuffle".to_string());
    }
    if view.repeat != RepeatMode::Off {
        flags.push(format!("repeat {}", view.repeat.as_str()));
    }
    if view.is_favorite {
        flags.push("♥".to_string());
    }
    if view.show_admin_affordance {
        flags.push("admin".to_string());
    }

    let volume = if view.is_muted {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", view.volume * 100.0)
    };

    let mut line = format!(
        "{} {} - {}  {} / {}  {}",
        if view.is_playing { '▶' } else { '⏸' },
        track.title,
        track.artist,
        view.elapsed,
        view.duration,
        volume
    );
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}

/// Text for events worth showing; position ticks and the like stay quiet
pub fn describe_event<M: MediaResource>(
    controller: &TransportController<M>,
    event: &PlaybackEvent,
) -> Option<String> {
    match event {
        PlaybackEvent::TrackChanged { .. } => controller
            .current_track()
            .map(|t| format!("Now playing: {} - {}", t.title, t.artist)),
        PlaybackEvent::TrackFinished { track_id } => {
            let title = controller
                .tracks()
                .iter()
                .find(|t| &t.id == track_id)
                .map_or(track_id.as_str(), |t| t.title.as_str());
            Some(format!("Finished: {}", title))
        }
        PlaybackEvent::StateChanged { .. } => Some(render_status(&controller.view())),
        PlaybackEvent::QueueChanged { length } => Some(format!("{} tracks loaded", length)),
        PlaybackEvent::FavoriteToggled {
            track_id,
            is_favorite,
        } => Some(format!(
            "{} {}",
            if *is_favorite { "♥ Added" } else { "Removed" },
            track_id
        )),
        PlaybackEvent::VolumeChanged { level, is_muted } => Some(if *is_muted {
            "Muted".to_string()
        } else {
            format!("Volume {:.0}%", level * 100.0)
        }),
        PlaybackEvent::PlaybackRejected { reason } => {
            Some(format!("Playback prevented: {}", reason))
        }
        PlaybackEvent::Error { message } => Some(format!("Error: {}", message)),
        PlaybackEvent::PositionUpdate { .. } | PlaybackEvent::ModeChanged { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("n"), Ok(Some(Command::Next)));
        assert_eq!(
            Command::parse("play 3"),
            Ok(Some(Command::Select("3".into())))
        );
        assert_eq!(Command::parse("vol 40"), Ok(Some(Command::Volume(40))));
        assert_eq!(Command::parse("fav"), Ok(Some(Command::Favorite(None))));
        assert_eq!(Command::parse("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            Command::parse("play"),
            Err(ParseError::MissingArgument("play"))
        );
        assert_eq!(
            Command::parse("vol 140"),
            Err(ParseError::InvalidVolume("140".into()))
        );
        assert!(matches!(
            Command::parse("dance"),
            Err(ParseError::Unknown(_))
        ));
    }

    #[test]
    fn parses_times() {
        assert_eq!(parse_time("90"), Some(90.0));
        assert_eq!(parse_time("1:30"), Some(90.0));
        assert_eq!(parse_time("0:05.5"), Some(5.5));
        assert_eq!(parse_time("1:75"), None);
        assert_eq!(parse_time("-3"), None);
        assert_eq!(parse_time("abc"), None);
    }
}
