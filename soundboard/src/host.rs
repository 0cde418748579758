//! Collaborators the controller drives.
//!
//! The controller never touches the page directly. Everything it does goes
//! through a [`Host`]: markers on visual surfaces, playback commands on
//! audio handles, timers, haptic pulses and user-visible notices. Outcomes
//! that arrive later (media events, play request results, elapsed timers)
//! are fed back by the host through the controller's methods.

use std::time::Duration;

use strum_macros::EnumIter;

use crate::error::SoundboardError;
use crate::playback::PlayToken;
use crate::sound::SoundId;

/// Visual state toggled on a surface.
#[derive(EnumIter, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum Marker {
    /// The button's sound is audible
    Playing,
    /// The page or page indicator is the current one
    Active,
    /// The page is being left, until its transition completes
    Previous,
    /// A finger is down on the button
    Pressed,
}

impl Marker {
    /// CSS class carrying this marker.
    pub fn class_name(self) -> &'static str {
        match self {
            Marker::Playing => "playing",
            Marker::Active => "active",
            Marker::Previous => "prev",
            Marker::Pressed => "pressed",
        }
    }
}

/// Something the renderer can mark.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub enum Surface {
    /// The button triggering a sound
    Button(SoundId),
    /// A page container (1-based)
    Page(usize),
    /// The navigation dot of a page (1-based)
    Indicator(usize),
}

pub trait Renderer {
    fn add_marker(&mut self, surface: &Surface, marker: Marker);
    fn remove_marker(&mut self, surface: &Surface, marker: Marker);
    /// Removes `marker` from every surface carrying it.
    fn clear_marker(&mut self, marker: Marker);
}

/// Audio playback.
pub trait Audio {
    /// Playable media owned by the host.
    type Handle;

    /// Looks up the media of a sound.
    fn resolve(&mut self, sound: &SoundId) -> Option<Self::Handle>;

    /// Registers the lifecycle callbacks of a freshly resolved handle, asks
    /// for eager preloading at full volume and starts loading.
    fn prepare(&mut self, sound: &SoundId, handle: &Self::Handle);

    /// Moves the playback position back to the start.
    fn rewind(&mut self, handle: &Self::Handle);

    /// Requests playback.
    ///
    /// The outcome is reported later through `Controller::play_resolved` or
    /// `Controller::play_rejected`, with the same token.
    fn start(&mut self, sound: &SoundId, handle: &Self::Handle, token: PlayToken);

    fn pause(&mut self, handle: &Self::Handle);
}

/// Best-effort vibration. Missing hardware support is not an error.
pub trait Haptics {
    fn pulse(&mut self, millis: u32);
}

/// Identifies a scheduled task.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TimerId(pub u64);

/// Work the controller postpones.
#[derive(PartialEq, Clone, Debug)]
pub enum Deferred {
    /// Second and last attempt of a rejected play request
    RetryPlay { sound: SoundId, token: PlayToken },
    /// Removes the transitional marker of a page once its animation is over
    ClearTransition { page: usize },
    /// Resolves the sounds that were missing at initialization
    ResolveMissing,
}

/// Single-shot timers. Elapsed tasks are handed back through
/// `Controller::fire`.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> TimerId;
    /// Cancelling an elapsed or unknown timer does nothing.
    fn cancel(&mut self, timer: TimerId);
}

/// User-visible notices.
pub trait Notifier {
    fn notify(&mut self, error: &SoundboardError);
}

/// Everything the controller needs from its environment.
pub trait Host: Renderer + Audio + Haptics + Scheduler + Notifier {}

impl<T> Host for T where T: Renderer + Audio + Haptics + Scheduler + Notifier {}
