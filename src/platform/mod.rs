//! Platform abstraction layer
//!
//! Handles the outside world the simulation must not touch:
//! - Keyboard input mapping
//! - Wall-clock time
//! - Scripted camera/face sources for headless runs

pub mod input;
pub mod scripted;
pub mod time;

pub use input::{Command, Key, map_key};
pub use scripted::{GazeScript, ScriptedCamera, ScriptedFace};
pub use time::{Clock, ManualClock, SystemClock};
