//! Recording host for the controller tests.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::SoundboardError;
use crate::host::{
    Audio, Deferred, Haptics, Marker, Notifier, Renderer, Scheduler, Surface, TimerId,
};
use crate::playback::PlayToken;
use crate::render::ClassBook;
use crate::sound::{self, SoundId};

/// Playback command received by the host.
#[derive(PartialEq, Clone, Debug)]
pub enum Command {
    Rewind(SoundId),
    Start(SoundId, PlayToken),
    Pause(SoundId),
}

#[derive(Default)]
pub struct MockHost {
    pub classes: ClassBook,
    /// Sounds the host can resolve
    pub present: HashSet<SoundId>,
    pub resolutions: Vec<SoundId>,
    pub prepared: Vec<SoundId>,
    pub commands: Vec<Command>,
    pub pulses: Vec<u32>,
    /// Pending timers, in scheduling order
    pub timers: Vec<(TimerId, Duration, Deferred)>,
    pub cancelled: Vec<TimerId>,
    pub notices: Vec<SoundboardError>,
    last_timer: u64,
}

impl MockHost {
    pub fn with_sounds(count: usize) -> Self {
        MockHost {
            present: sound::range(count).collect(),
            ..Default::default()
        }
    }

    pub fn starts(&self) -> Vec<(&SoundId, PlayToken)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Start(sound, token) => Some((sound, *token)),
                _ => None,
            })
            .collect()
    }

    /// Lets every pending timer elapse, returning their tasks in order.
    pub fn elapse(&mut self) -> Vec<Deferred> {
        self.timers.drain(..).map(|(_, _, task)| task).collect()
    }
}

impl Renderer for MockHost {
    fn add_marker(&mut self, surface: &Surface, marker: Marker) {
        self.classes.add_marker(surface, marker);
    }

    fn remove_marker(&mut self, surface: &Surface, marker: Marker) {
        self.classes.remove_marker(surface, marker);
    }

    fn clear_marker(&mut self, marker: Marker) {
        self.classes.clear_marker(marker);
    }
}

impl Audio for MockHost {
    type Handle = SoundId;

    fn resolve(&mut self, sound: &SoundId) -> Option<SoundId> {
        self.resolutions.push(sound.clone());
        self.present.get(sound).cloned()
    }

    fn prepare(&mut self, sound: &SoundId, _handle: &SoundId) {
        self.prepared.push(sound.clone());
    }

    fn rewind(&mut self, handle: &SoundId) {
        self.commands.push(Command::Rewind(handle.clone()));
    }

    fn start(&mut self, sound: &SoundId, _handle: &SoundId, token: PlayToken) {
        self.commands.push(Command::Start(sound.clone(), token));
    }

    fn pause(&mut self, handle: &SoundId) {
        self.commands.push(Command::Pause(handle.clone()));
    }
}

impl Haptics for MockHost {
    fn pulse(&mut self, millis: u32) {
        self.pulses.push(millis);
    }
}

impl Scheduler for MockHost {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> TimerId {
        self.last_timer += 1;
        let timer = TimerId(self.last_timer);
        self.timers.push((timer, delay, task));
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _, _)| *id != timer);
        self.cancelled.push(timer);
    }
}

impl Notifier for MockHost {
    fn notify(&mut self, error: &SoundboardError) {
        self.notices.push(error.clone());
    }
}
