//! Errors reported by the controller and the board configuration.

use std::fmt;

use crate::sound::SoundId;

/// Error that can occur while driving the board.
///
/// None of them is fatal: the controller always falls back to a state where
/// nothing is playing and the markers match.
#[derive(PartialEq, Debug, Clone)]
pub enum SoundboardError {
    /// No playable media could be found for this sound
    MissingSound(SoundId),
    /// The audio element refused to start, even after the retry
    PlaybackRejected { sound: SoundId, reason: String },
    /// The audio element failed to load or decode its media
    MediaError { sound: SoundId, reason: String },
}

impl fmt::Display for SoundboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundboardError::MissingSound(sound) => {
                write!(f, "Audio element not found for sound: {}", sound)
            }
            SoundboardError::PlaybackRejected { sound, .. } => write!(
                f,
                "Unable to play sound {}. Please check your audio settings.",
                sound
            ),
            SoundboardError::MediaError { sound, .. } => {
                write!(f, "Error loading sound: {}", sound)
            }
        }
    }
}

/// Error found while loading a board configuration
#[derive(PartialEq, Debug, Clone)]
pub enum BoardError {
    /// The configuration is not valid JSON for a board
    Parse(String),
    /// A board needs at least one page
    NoPages,
    /// This page (1-based) has no sound
    EmptyPage(usize),
    /// The same sound id appears twice
    DuplicateSound(SoundId),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Parse(msg) => write!(f, "invalid board configuration: {}", msg),
            BoardError::NoPages => write!(f, "board has no page"),
            BoardError::EmptyPage(page) => write!(f, "page {} has no sound", page),
            BoardError::DuplicateSound(sound) => write!(f, "sound {} is declared twice", sound),
        }
    }
}

impl std::error::Error for SoundboardError {}
impl std::error::Error for BoardError {}
