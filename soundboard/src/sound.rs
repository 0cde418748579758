//! Sound identifiers.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable key naming one playable clip and the button that triggers it.
///
/// Boards conventionally number their sounds `sound1`, `sound2`, ...
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SoundId(String);

impl SoundId {
    /// Builds the conventional identifier of the `n`th sound (1-based).
    pub fn nth(n: usize) -> Self {
        SoundId(format!("sound{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for SoundId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("empty sound id".to_owned());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(format!("invalid sound id: {:?}", s));
        }
        Ok(SoundId(s.to_owned()))
    }
}

impl TryFrom<String> for SoundId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, String> {
        s.parse()
    }
}

impl From<SoundId> for String {
    fn from(id: SoundId) -> String {
        id.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiers `sound1..=soundN`.
pub fn range(count: usize) -> impl Iterator<Item = SoundId> {
    (1..=count).map(SoundId::nth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("sound7".parse::<SoundId>(), Ok(SoundId::nth(7)));
        assert!("".parse::<SoundId>().is_err());
        assert!("sound 7".parse::<SoundId>().is_err());
        assert_eq!("kick".parse::<SoundId>().map(|s| s.to_string()), Ok("kick".to_owned()));
    }

    #[test]
    fn test_range() {
        let ids: Vec<String> = range(3).map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["sound1", "sound2", "sound3"]);
        assert_eq!(range(0).count(), 0);
    }
}
