use std::collections::HashMap;
use std::time::Duration;

use web_sys::HtmlAudioElement;
use yew::services::timeout::{TimeoutService, TimeoutTask};
use yew::ComponentLink;

use soundboard::host::{Audio, Deferred, Haptics, Marker, Notifier, Renderer, Scheduler, Surface, TimerId};
use soundboard::playback::PlayToken;
use soundboard::render::ClassBook;
use soundboard::{SoundId, SoundboardError};

use crate::sound_player::SoundPlayer;
use crate::{App, Msg};

/// The browser side of the controller.
///
/// Markers land in a class book the view renders from, and timers are yew
/// timeouts that post a message back when they elapse. Dropping a timeout
/// task cancels it.
pub struct WebHost {
    link: ComponentLink<App>,
    player: SoundPlayer,
    classes: ClassBook,
    timers: HashMap<TimerId, TimeoutTask>,
    last_timer: u64,
    notice: Option<String>,
}

impl WebHost {
    pub fn new(link: ComponentLink<App>) -> Self {
        WebHost {
            player: SoundPlayer::new(link.clone()),
            link,
            classes: ClassBook::new(),
            timers: HashMap::new(),
            last_timer: 0,
            notice: None,
        }
    }

    pub fn classes(&self) -> &ClassBook {
        &self.classes
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn close_notice(&mut self) {
        self.notice = None;
    }

    /// Forgets an elapsed timer. Returns `false` if it was cancelled in the
    /// meantime.
    pub fn finish_timer(&mut self, timer: TimerId) -> bool {
        self.timers.remove(&timer).is_some()
    }
}

impl Renderer for WebHost {
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

impl Audio for WebHost {
    type Handle = HtmlAudioElement;

    fn resolve(&mut self, sound: &SoundId) -> Option<HtmlAudioElement> {
        self.player.find(sound)
    }

    fn prepare(&mut self, sound: &SoundId, handle: &HtmlAudioElement) {
        self.player.prepare(sound, handle);
    }

    fn rewind(&mut self, handle: &HtmlAudioElement) {
        self.player.rewind(handle);
    }

    fn start(&mut self, sound: &SoundId, handle: &HtmlAudioElement, token: PlayToken) {
        self.player.play(sound, handle, token);
    }

    fn pause(&mut self, handle: &HtmlAudioElement) {
        self.player.pause(handle);
    }
}

impl Haptics for WebHost {
    fn pulse(&mut self, millis: u32) {
        if let Some(window) = web_sys::window() {
            // false when vibration is unsupported or blocked
            let _ = window.navigator().vibrate_with_duration(millis);
        }
    }
}

impl Scheduler for WebHost {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> TimerId {
        self.last_timer += 1;
        let timer = TimerId(self.last_timer);
        let handle = TimeoutService::spawn(
            delay,
            self.link.callback(move |_| Msg::Timeout(timer, task.clone())),
        );
        self.timers.insert(timer, handle);
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}

impl Notifier for WebHost {
    fn notify(&mut self, error: &SoundboardError) {
        log::error!("{}", error);
        self.notice = Some(error.to_string());
    }
}
