//! The soundboard controller.
//!
//! Owns the sound registry, the playback state, the current page and the
//! gesture scratch, and keeps the markers of the renderer consistent with
//! them. Every method runs to completion on the UI thread; asynchronous
//! outcomes come back later as separate calls and are checked against the
//! current state before they change anything.

use std::collections::{HashMap, HashSet};

use log::{debug, error, info, warn};

use crate::board::BoardConfig;
use crate::error::{BoardError, SoundboardError};
use crate::gesture::{GestureTracker, Point, Swipe, TouchOrigin};
use crate::host::{Deferred, Host, Marker, Surface};
use crate::pages::Pager;
use crate::playback::{ActiveRequest, PlayToken, PlaybackState};
use crate::sound::SoundId;

pub struct Controller<H: Host> {
    host: H,
    board: BoardConfig,
    handles: HashMap<SoundId, H::Handle>,
    /// Sounds whose single late resolution has been spent
    late_resolved: HashSet<SoundId>,
    playback: PlaybackState,
    pager: Pager,
    gesture: GestureTracker,
}

impl<H: Host> Controller<H> {
    /// Drives `board` through `host`, once the board passed validation.
    pub fn new(host: H, board: BoardConfig) -> Result<Self, BoardError> {
        board.validate()?;
        Ok(Self::build(host, board))
    }

    /// Drives the thirty sounds, two pages board.
    pub fn with_default_board(host: H) -> Self {
        Self::build(host, BoardConfig::default())
    }

    fn build(host: H, board: BoardConfig) -> Self {
        let pager = Pager::new(board.page_count());
        let gesture = GestureTracker::new(board.timings.swipe_threshold);
        Controller {
            host,
            board,
            handles: HashMap::new(),
            late_resolved: HashSet::new(),
            playback: PlaybackState::new(),
            pager,
            gesture,
        }
    }

    /// Resolves and prepares every sound of the board, and marks the first
    /// page as shown.
    ///
    /// Missing sounds are skipped; they get one more chance a little later.
    pub fn init(&mut self) {
        let ids: Vec<SoundId> = self.board.sounds().map(|s| s.id.clone()).collect();
        let mut missing = 0;
        for id in ids {
            if self.handles.contains_key(&id) {
                continue;
            }
            match self.host.resolve(&id) {
                Some(handle) => self.register(id, handle),
                None => {
                    warn!("audio element {} not found", id);
                    missing += 1;
                }
            }
        }
        info!("{} of {} sounds registered", self.handles.len(), self.board.sound_count());

        let current = self.pager.current();
        self.host.add_marker(&Surface::Page(current), Marker::Active);
        self.mark_indicators();

        if missing > 0 {
            let delay = self.board.timings.resolve_fallback();
            self.host.schedule(delay, Deferred::ResolveMissing);
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn page_count(&self) -> usize {
        self.pager.count()
    }

    pub fn is_registered(&self, sound: &SoundId) -> bool {
        self.handles.contains_key(sound)
    }

    pub fn registered_count(&self) -> usize {
        self.handles.len()
    }

    /// Sounds confirmed audible by the audio element.
    pub fn playing(&self) -> impl Iterator<Item = &SoundId> {
        self.playback.playing()
    }

    pub fn is_playing(&self, sound: &SoundId) -> bool {
        self.playback.is_playing(sound)
    }

    pub fn active_request(&self) -> Option<&ActiveRequest> {
        self.playback.request()
    }

    fn register(&mut self, sound: SoundId, handle: H::Handle) {
        self.host.prepare(&sound, &handle);
        self.handles.insert(sound, handle);
    }

    /// Returns `true` if `sound` has a handle, resolving it late at most
    /// once per session.
    fn lookup(&mut self, sound: &SoundId) -> bool {
        if self.handles.contains_key(sound) {
            return true;
        }
        if !self.late_resolved.insert(sound.clone()) {
            return false;
        }
        match self.host.resolve(sound) {
            Some(handle) => {
                debug!("audio element {} resolved late", sound);
                self.register(sound.clone(), handle);
                true
            }
            None => false,
        }
    }

    fn resolve_missing(&mut self) {
        let missing: Vec<SoundId> = self
            .board
            .sounds()
            .map(|s| &s.id)
            .filter(|id| !self.handles.contains_key(*id))
            .cloned()
            .collect();
        let found = missing.iter().filter(|id| self.lookup(id)).count();
        if found < missing.len() {
            warn!("{} sounds still missing after fallback resolution", missing.len() - found);
        }
        info!("{} sounds registered after fallback resolution", self.handles.len());
    }

    /// Plays `sound` alone, from the start.
    ///
    /// The button is marked playing right away. The audio element confirms
    /// later through `sound_started`, or refuses through `play_rejected`.
    pub fn request_play(&mut self, sound: &SoundId) -> Result<PlayToken, SoundboardError> {
        if !self.lookup(sound) {
            warn!("audio element not found for sound: {}", sound);
            return Err(SoundboardError::MissingSound(sound.clone()));
        }

        self.stop_all();
        let token = self.playback.issue(sound.clone());
        self.attempt(sound, token);
        self.host.pulse(self.board.timings.haptic_ms);
        Ok(token)
    }

    fn attempt(&mut self, sound: &SoundId, token: PlayToken) {
        let handle = match self.handles.get(sound) {
            Some(handle) => handle,
            None => return,
        };
        self.host.add_marker(&Surface::Button(sound.clone()), Marker::Playing);
        self.host.rewind(handle);
        self.host.start(sound, handle, token);
    }

    fn silence(&mut self, sound: &SoundId) {
        if let Some(handle) = self.handles.get(sound) {
            self.host.pause(handle);
            self.host.rewind(handle);
        }
    }

    /// Stops every sound and clears every playing marker.
    pub fn stop_all(&mut self) {
        if let Some(request) = self.playback.take_request() {
            if let Some(timer) = request.retry {
                self.host.cancel(timer);
            }
            // An unconfirmed request must not start once the board went quiet
            if !self.playback.is_playing(&request.sound) {
                self.silence(&request.sound);
            }
        }
        for sound in self.playback.drain() {
            self.silence(&sound);
        }
        self.host.clear_marker(Marker::Playing);
    }

    /// The audio element accepted the play command.
    pub fn play_resolved(&mut self, sound: &SoundId, token: PlayToken) {
        match self.playback.current_mut(sound, token) {
            Some(request) => {
                request.confirmed = true;
                debug!("sound {} started playing successfully", sound);
            }
            None => debug!("ignoring stale confirmation for {} ({:?})", sound, token),
        }
    }

    /// The audio element refused the play command.
    ///
    /// The first refusal is retried once after a short delay; the second one
    /// is reported to the user.
    pub fn play_rejected(&mut self, sound: &SoundId, token: PlayToken, reason: &str) {
        let (attempt, retry_pending) = match self.playback.current_mut(sound, token) {
            Some(request) => (request.attempt, request.retry.is_some()),
            None => {
                debug!("ignoring stale failure for {} ({:?}): {}", sound, token, reason);
                return;
            }
        };
        if retry_pending {
            debug!("retry of {} already scheduled", sound);
            return;
        }

        self.playback.mark_stopped(sound);
        self.host.remove_marker(&Surface::Button(sound.clone()), Marker::Playing);

        if attempt == 0 {
            warn!("error playing sound {}: {}, retrying", sound, reason);
            let delay = self.board.timings.retry_delay();
            let timer = self.host.schedule(
                delay,
                Deferred::RetryPlay {
                    sound: sound.clone(),
                    token,
                },
            );
            if let Some(request) = self.playback.current_mut(sound, token) {
                request.attempt = 1;
                request.retry = Some(timer);
            }
        } else {
            error!("error playing sound {}: {}", sound, reason);
            self.playback.take_request();
            self.host.notify(&SoundboardError::PlaybackRejected {
                sound: sound.clone(),
                reason: reason.to_owned(),
            });
        }
    }

    fn retry(&mut self, sound: &SoundId, token: PlayToken) {
        match self.playback.current_mut(sound, token) {
            Some(request) => request.retry = None,
            None => {
                debug!("dropping retry of superseded request for {}", sound);
                return;
            }
        }
        for other in self.playback.drain() {
            self.silence(&other);
        }
        self.host.clear_marker(Marker::Playing);
        info!("retrying sound {}", sound);
        self.attempt(sound, token);
    }

    /// Media event: the sound became audible.
    pub fn sound_started(&mut self, sound: &SoundId) {
        if !self.playback.is_requested(sound) {
            debug!("silencing {}, which started without a current request", sound);
            self.silence(sound);
            return;
        }
        for other in self.playback.mark_started(sound.clone()) {
            self.silence(&other);
            self.host.remove_marker(&Surface::Button(other), Marker::Playing);
        }
        self.host.add_marker(&Surface::Button(sound.clone()), Marker::Playing);
    }

    /// Media event: the sound played to its end.
    pub fn sound_ended(&mut self, sound: &SoundId) {
        self.playback.mark_stopped(sound);
        self.drop_request_for(sound);
        self.host.remove_marker(&Surface::Button(sound.clone()), Marker::Playing);
    }

    /// Media event: the sound failed to load or decode.
    pub fn sound_failed(&mut self, sound: &SoundId, reason: &str) {
        error!("error with sound {}: {}", sound, reason);
        self.playback.mark_stopped(sound);
        self.drop_request_for(sound);
        self.host.remove_marker(&Surface::Button(sound.clone()), Marker::Playing);
        self.host.notify(&SoundboardError::MediaError {
            sound: sound.clone(),
            reason: reason.to_owned(),
        });
    }

    fn drop_request_for(&mut self, sound: &SoundId) {
        if !self.playback.is_requested(sound) {
            return;
        }
        if let Some(timer) = self.playback.take_request().and_then(|req| req.retry) {
            self.host.cancel(timer);
        }
    }

    /// Shows page `target`.
    ///
    /// Returns `false` without doing anything if `target` is already shown
    /// or does not exist.
    pub fn navigate_to(&mut self, target: usize) -> bool {
        if !self.pager.can_go_to(target) {
            debug!("staying on page {} (requested {})", self.pager.current(), target);
            return false;
        }

        self.stop_all();
        let previous = match self.pager.go_to(target) {
            Some(previous) => previous,
            None => return false,
        };

        self.host.remove_marker(&Surface::Page(previous), Marker::Active);
        self.host.add_marker(&Surface::Page(previous), Marker::Previous);
        self.host.remove_marker(&Surface::Page(target), Marker::Previous);
        self.host.add_marker(&Surface::Page(target), Marker::Active);
        self.mark_indicators();

        let delay = self.board.timings.transition();
        self.host.schedule(delay, Deferred::ClearTransition { page: previous });
        self.host.pulse(self.board.timings.haptic_ms);
        true
    }

    pub fn next_page(&mut self) -> bool {
        match self.pager.next() {
            Some(page) => self.navigate_to(page),
            None => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pager.prev() {
            Some(page) => self.navigate_to(page),
            None => false,
        }
    }

    /// Tap on the slider track, `fraction` being the horizontal position of
    /// the tap relative to the track width.
    pub fn select_track_position(&mut self, fraction: f64) -> bool {
        let page = self.pager.at_fraction(fraction);
        self.navigate_to(page)
    }

    fn mark_indicators(&mut self) {
        let current = self.pager.current();
        for page in self.pager.pages() {
            let indicator = Surface::Indicator(page);
            if page == current {
                self.host.add_marker(&indicator, Marker::Active);
            } else {
                self.host.remove_marker(&indicator, Marker::Active);
            }
        }
    }

    pub fn touch_start(&mut self, point: Point, origin: TouchOrigin) {
        self.gesture.begin(point, origin);
    }

    pub fn touch_move(&mut self, point: Point) {
        self.gesture.track(point);
    }

    /// Ends the touch gesture, navigating if it was a swipe.
    pub fn touch_end(&mut self, point: Option<Point>) -> bool {
        match self.gesture.finish(point) {
            Some(Swipe::Next) => self.next_page(),
            Some(Swipe::Previous) => self.previous_page(),
            None => false,
        }
    }

    pub fn touch_cancel(&mut self) {
        self.gesture.cancel();
    }

    /// A finger went down on the button of `sound`.
    pub fn press(&mut self, sound: &SoundId) {
        self.host.add_marker(&Surface::Button(sound.clone()), Marker::Pressed);
    }

    pub fn release(&mut self, sound: &SoundId) {
        self.host.remove_marker(&Surface::Button(sound.clone()), Marker::Pressed);
    }

    /// A hidden document must never emit audio.
    pub fn visibility_changed(&mut self, hidden: bool) {
        if hidden {
            info!("document hidden, stopping all sounds");
            self.stop_all();
        }
    }

    /// Runs a task whose timer elapsed.
    pub fn fire(&mut self, task: Deferred) {
        match task {
            Deferred::RetryPlay { sound, token } => self.retry(&sound, token),
            Deferred::ClearTransition { page } => {
                if page != self.pager.current() {
                    self.host.remove_marker(&Surface::Page(page), Marker::Previous);
                }
            }
            Deferred::ResolveMissing => self.resolve_missing(),
        }
    }
}
