//! Drives a soundboard: a grid of buttons, each bound to a short clip, laid
//! out on one or more pages.
//!
//! The [`controller::Controller`] is the only stateful piece. It talks to
//! its environment through the traits of [`host`], which makes it usable
//! from a browser front-end as well as from plain unit tests.
//!
//! ```rust
//! use soundboard::board::BoardConfig;
//! use soundboard::controller::Controller;
//! use soundboard::render::ClassBook;
//! # use soundboard::host::*;
//! # use soundboard::{playback::PlayToken, sound::SoundId, error::SoundboardError};
//! # use std::time::Duration;
//! # struct Page { classes: ClassBook }
//! # impl Renderer for Page {
//! #     fn add_marker(&mut self, s: &Surface, m: Marker) { self.classes.add_marker(s, m) }
//! #     fn remove_marker(&mut self, s: &Surface, m: Marker) { self.classes.remove_marker(s, m) }
//! #     fn clear_marker(&mut self, m: Marker) { self.classes.clear_marker(m) }
//! # }
//! # impl Audio for Page {
//! #     type Handle = ();
//! #     fn resolve(&mut self, _: &SoundId) -> Option<()> { Some(()) }
//! #     fn prepare(&mut self, _: &SoundId, _: &()) {}
//! #     fn rewind(&mut self, _: &()) {}
//! #     fn start(&mut self, _: &SoundId, _: &(), _: PlayToken) {}
//! #     fn pause(&mut self, _: &()) {}
//! # }
//! # impl Haptics for Page { fn pulse(&mut self, _: u32) {} }
//! # impl Scheduler for Page {
//! #     fn schedule(&mut self, _: Duration, _: Deferred) -> TimerId { TimerId(0) }
//! #     fn cancel(&mut self, _: TimerId) {}
//! # }
//! # impl Notifier for Page { fn notify(&mut self, _: &SoundboardError) {} }
//!
//! // Thirty sounds on two pages
//! let page = Page { classes: ClassBook::new() };
//! let mut board = Controller::new(page, BoardConfig::paged(30, 2)).unwrap();
//! board.init();
//!
//! // A button was tapped
//! let sound = "sound3".parse().unwrap();
//! let token = board.request_play(&sound).unwrap();
//!
//! // ... and the audio element reports back
//! board.play_resolved(&sound, token);
//! board.sound_started(&sound);
//! assert!(board.is_playing(&sound));
//!
//! // Changing page silences the board
//! assert!(board.navigate_to(2));
//! assert!(!board.is_playing(&sound));
//! ```

pub mod board;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod host;
pub mod pages;
pub mod playback;
pub mod render;
pub mod sound;

#[cfg(test)]
mod mock;

pub use crate::controller::Controller;
pub use crate::error::{BoardError, SoundboardError};
pub use crate::sound::SoundId;
