//! Board layout and tuning.
//!
//! A board is a list of pages, each holding a group of sound buttons. The
//! same controller drives every layout, from the single page of nine
//! buttons to the paged board of thirty.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::sound::SoundId;

/// One sound button.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SoundConfig {
    pub id: SoundId,
    /// Text shown on the button
    #[serde(default)]
    pub label: String,
    /// Media url, when the board renders its own audio elements
    #[serde(default)]
    pub src: Option<String>,
}

impl SoundConfig {
    fn numbered(n: usize) -> Self {
        SoundConfig {
            id: SoundId::nth(n),
            label: format!("{}", n),
            src: Some(format!("sounds/sound{}.mp3", n)),
        }
    }
}

/// A group of buttons shown exclusively of the other pages.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PageConfig {
    #[serde(default)]
    pub name: String,
    pub sounds: Vec<SoundConfig>,
}

/// Delays and thresholds of the board interactions.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Timings {
    /// Minimum horizontal displacement of a swipe
    pub swipe_threshold: f64,
    /// Delay before the single retry of a rejected play request
    pub retry_delay_ms: u64,
    /// Duration of the page transition animation
    pub transition_ms: u64,
    /// Length of the haptic pulse on play and navigation
    pub haptic_ms: u32,
    /// Delay before re-resolving sounds missing at initialization
    pub resolve_fallback_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            swipe_threshold: 50.0,
            retry_delay_ms: 500,
            transition_ms: 300,
            haptic_ms: 50,
            resolve_fallback_ms: 1000,
        }
    }
}

impl Timings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn resolve_fallback(&self) -> Duration {
        Duration::from_millis(self.resolve_fallback_ms)
    }
}

fn default_title() -> String {
    "Soundboard".to_owned()
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct BoardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub pages: Vec<PageConfig>,
    #[serde(default)]
    pub timings: Timings,
}

impl BoardConfig {
    /// A single page holding `sound1..=soundN`.
    pub fn single_page(count: usize) -> Self {
        Self::paged(count, 1)
    }

    /// `count` sounds split evenly across `pages` pages.
    ///
    /// The last page gets the remainder when the split is uneven. Pages are
    /// never left empty: with fewer sounds than pages, the board gets one
    /// page per sound, and a board without sounds has no page at all, which
    /// [`validate`](Self::validate) rejects.
    pub fn paged(count: usize, pages: usize) -> Self {
        let pages = pages.max(1);
        let per_page = (count + pages - 1) / pages;
        let all: Vec<SoundConfig> = (1..=count).map(SoundConfig::numbered).collect();
        let pages = all
            .chunks(per_page.max(1))
            .enumerate()
            .map(|(idx, chunk)| PageConfig {
                name: format!("Page {}", idx + 1),
                sounds: chunk.to_vec(),
            })
            .collect();
        BoardConfig {
            title: default_title(),
            pages,
            timings: Timings::default(),
        }
    }

    /// Parses and validates a JSON board description.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let board: BoardConfig =
            serde_json::from_str(json).map_err(|e| BoardError::Parse(e.to_string()))?;
        board.validate()?;
        Ok(board)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        if self.pages.is_empty() {
            return Err(BoardError::NoPages);
        }
        let mut seen = HashSet::new();
        for (idx, page) in self.pages.iter().enumerate() {
            if page.sounds.is_empty() {
                return Err(BoardError::EmptyPage(idx + 1));
            }
            for sound in page.sounds.iter() {
                if !seen.insert(&sound.id) {
                    return Err(BoardError::DuplicateSound(sound.id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every sound of the board, in page order.
    pub fn sounds(&self) -> impl Iterator<Item = &SoundConfig> {
        self.pages.iter().flat_map(|page| page.sounds.iter())
    }

    pub fn sound_count(&self) -> usize {
        self.sounds().count()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::paged(30, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts() {
        let single = BoardConfig::single_page(9);
        assert_eq!(single.page_count(), 1);
        assert_eq!(single.sound_count(), 9);

        let paged = BoardConfig::paged(30, 2);
        assert_eq!(paged.page_count(), 2);
        assert_eq!(paged.pages[0].sounds.len(), 15);
        assert_eq!(paged.pages[0].sounds.last().map(|s| &s.id), Some(&SoundId::nth(15)));
        assert_eq!(paged.pages[1].sounds[0].id, SoundId::nth(16));
        assert!(paged.validate().is_ok());

        let sparse = BoardConfig::paged(3, 5);
        assert_eq!(sparse.page_count(), 3);
        assert!(sparse.validate().is_ok());
        assert_eq!(BoardConfig::paged(0, 2).validate(), Err(BoardError::NoPages));

        let uneven = BoardConfig::paged(7, 2);
        assert_eq!(uneven.pages[0].sounds.len(), 4);
        assert_eq!(uneven.pages[1].sounds.len(), 3);
    }

    #[test]
    fn test_from_json() {
        let board = BoardConfig::from_json(
            r#"{
                "pages": [
                    { "name": "Space", "sounds": [ { "id": "sound1", "label": "Launch" } ] },
                    { "sounds": [ { "id": "sound2", "src": "sounds/beep.mp3" } ] }
                ],
                "timings": { "retry_delay_ms": 250 }
            }"#,
        )
        .unwrap();
        assert_eq!(board.title, "Soundboard");
        assert_eq!(board.page_count(), 2);
        assert_eq!(board.pages[0].sounds[0].label, "Launch");
        assert_eq!(board.pages[1].sounds[0].src.as_deref(), Some("sounds/beep.mp3"));
        assert_eq!(board.timings.retry_delay_ms, 250);
        assert_eq!(board.timings.swipe_threshold, 50.0);
    }

    #[test]
    fn test_invalid_boards() {
        assert_eq!(BoardConfig::from_json(r#"{ "pages": [] }"#), Err(BoardError::NoPages));
        assert_eq!(
            BoardConfig::from_json(r#"{ "pages": [ { "sounds": [] } ] }"#),
            Err(BoardError::EmptyPage(1))
        );
        assert_eq!(
            BoardConfig::from_json(
                r#"{ "pages": [
                    { "sounds": [ { "id": "sound1" } ] },
                    { "sounds": [ { "id": "sound1" } ] }
                ] }"#
            ),
            Err(BoardError::DuplicateSound(SoundId::nth(1)))
        );
        match BoardConfig::from_json(r#"{ "pages": [ { "sounds": [ { "id": "" } ] } ] }"#) {
            Err(BoardError::Parse(msg)) => assert!(msg.contains("empty sound id"), "{}", msg),
            other => panic!("unexpected result {:?}", other),
        }
        match BoardConfig::from_json(r#"{ "pages": [ { "sounds": [ { "id": "sound 7" } ] } ] }"#) {
            Err(BoardError::Parse(msg)) => assert!(msg.contains("invalid sound id"), "{}", msg),
            other => panic!("unexpected result {:?}", other),
        }
        match BoardConfig::from_json("{ not json") {
            Err(BoardError::Parse(_)) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
