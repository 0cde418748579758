//! Playback bookkeeping: what is audible, and which play request is current.

use std::collections::BTreeSet;

use crate::host::TimerId;
use crate::sound::SoundId;

/// Identifies a play request.
///
/// Tokens grow monotonically, so a callback carrying an older token belongs
/// to a request the user has since moved away from.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PlayToken(u64);

/// The most recent play request still in effect.
#[derive(PartialEq, Clone, Debug)]
pub struct ActiveRequest {
    pub sound: SoundId,
    pub token: PlayToken,
    /// 0 for the first attempt, 1 for the retry
    pub attempt: u8,
    /// The audio element accepted the play command
    pub confirmed: bool,
    /// Pending retry, if the first attempt was rejected
    pub retry: Option<TimerId>,
}

#[derive(Clone, Debug, Default)]
pub struct PlaybackState {
    playing: BTreeSet<SoundId>,
    request: Option<ActiveRequest>,
    last_token: u64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new play request, superseding the previous one.
    pub fn issue(&mut self, sound: SoundId) -> PlayToken {
        self.last_token += 1;
        let token = PlayToken(self.last_token);
        self.request = Some(ActiveRequest {
            sound,
            token,
            attempt: 0,
            confirmed: false,
            retry: None,
        });
        token
    }

    pub fn request(&self) -> Option<&ActiveRequest> {
        self.request.as_ref()
    }

    /// Returns the active request if `token` still designates it.
    pub fn current_mut(&mut self, sound: &SoundId, token: PlayToken) -> Option<&mut ActiveRequest> {
        self.request
            .as_mut()
            .filter(|req| req.token == token && &req.sound == sound)
    }

    pub fn is_current(&self, sound: &SoundId, token: PlayToken) -> bool {
        self.request
            .as_ref()
            .map_or(false, |req| req.token == token && &req.sound == sound)
    }

    /// Returns `true` if `sound` is the one last requested.
    pub fn is_requested(&self, sound: &SoundId) -> bool {
        self.request.as_ref().map_or(false, |req| &req.sound == sound)
    }

    pub fn take_request(&mut self) -> Option<ActiveRequest> {
        self.request.take()
    }

    /// Records that `sound` became audible. Any other sound is dropped from
    /// the set, which is returned so that it can be silenced.
    pub fn mark_started(&mut self, sound: SoundId) -> Vec<SoundId> {
        let others = self
            .playing
            .iter()
            .filter(|playing| **playing != sound)
            .cloned()
            .collect();
        self.playing.clear();
        self.playing.insert(sound);
        others
    }

    /// Returns `true` if `sound` was playing.
    pub fn mark_stopped(&mut self, sound: &SoundId) -> bool {
        self.playing.remove(sound)
    }

    /// Empties the set of playing sounds, returning them.
    pub fn drain(&mut self) -> Vec<SoundId> {
        std::mem::take(&mut self.playing).into_iter().collect()
    }

    pub fn is_playing(&self, sound: &SoundId) -> bool {
        self.playing.contains(sound)
    }

    pub fn playing(&self) -> impl Iterator<Item = &SoundId> {
        self.playing.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let mut state = PlaybackState::new();
        let first = state.issue(SoundId::nth(1));
        let second = state.issue(SoundId::nth(1));
        assert!(second > first);
        assert!(!state.is_current(&SoundId::nth(1), first));
        assert!(state.is_current(&SoundId::nth(1), second));
        assert!(!state.is_current(&SoundId::nth(2), second));

        assert_eq!(state.take_request().map(|r| r.token), Some(second));
        assert!(!state.is_current(&SoundId::nth(1), second));
        assert!(state.issue(SoundId::nth(2)) > second);
    }

    #[test]
    fn test_single_voice() {
        let mut state = PlaybackState::new();
        assert!(state.mark_started(SoundId::nth(1)).is_empty());
        assert_eq!(state.mark_started(SoundId::nth(3)), vec![SoundId::nth(1)]);
        assert_eq!(state.playing().collect::<Vec<_>>(), vec![&SoundId::nth(3)]);

        assert!(!state.mark_stopped(&SoundId::nth(1)));
        assert_eq!(state.drain(), vec![SoundId::nth(3)]);
        assert_eq!(state.playing().count(), 0);
    }
}
