//! Keyboard mapping
//!
//! Arrow keys steer directly, bypassing gaze; the rest are session commands.

use crate::sim::Direction;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Char(char),
    Escape,
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Recalibrate,
    Quit,
}

pub fn map_key(key: Key) -> Option<Command> {
    match key {
        Key::ArrowUp => Some(Command::Steer(Direction::Up)),
        Key::ArrowDown => Some(Command::Steer(Direction::Down)),
        Key::ArrowLeft => Some(Command::Steer(Direction::Left)),
        Key::ArrowRight => Some(Command::Steer(Direction::Right)),
        Key::Space => Some(Command::TogglePause),
        Key::Escape => Some(Command::Quit),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'r' => Some(Command::Restart),
            'c' => Some(Command::Recalibrate),
            _ => None,
        },
    }
}
