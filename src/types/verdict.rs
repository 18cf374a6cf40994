//! Verdict taxonomy and confidence banding
//!
//! A verdict is either supplied by the analysis capability or derived from its
//! confidence score with [`band`]. The banding edges are:
//!
//! | Score              | Verdict              |
//! |--------------------|----------------------|
//! | `score <= 0.4`     | `Safe`               |
//! | `0.4 < s <= 0.75`  | `Suspicious`         |
//! | `score > 0.75`     | `Likely Manipulated` |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Upper bound (inclusive) of the `Safe` band
pub const SAFE_UPPER_BOUND: f64 = 0.4;

/// Upper bound (inclusive) of the `Suspicious` band
pub const SUSPICIOUS_UPPER_BOUND: f64 = 0.75;

/// Three-way safety classification of a piece of media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Safe,
    Suspicious,
    LikelyManipulated,
}

impl Verdict {
    /// Display label, also the wire form
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Suspicious => "Suspicious",
            Verdict::LikelyManipulated => "Likely Manipulated",
        }
    }

    /// CSS-style class name used by the popup view ("likely-manipulated")
    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Suspicious => "suspicious",
            Verdict::LikelyManipulated => "likely-manipulated",
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

/// Map a confidence score to a verdict
///
/// # Examples
///
/// ```
/// use fakecheck::types::{band, Verdict};
///
/// assert_eq!(band(0.4), Verdict::Safe);
/// assert_eq!(band(0.41), Verdict::Suspicious);
/// assert_eq!(band(0.76), Verdict::LikelyManipulated);
/// ```
pub fn band(score: f64) -> Verdict {
    if score > SUSPICIOUS_UPPER_BOUND {
        Verdict::LikelyManipulated
    } else if score > SAFE_UPPER_BOUND {
        Verdict::Suspicious
    } else {
        Verdict::Safe
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a verdict label is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verdict label: {0}")]
pub struct UnknownVerdict(pub String);

impl FromStr for Verdict {
    type Err = UnknownVerdict;

    /// Accepts "Safe", "safe", "Likely Manipulated", "likely_manipulated",
    /// "LikelyManipulated", "likely-manipulated"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalised.as_str() {
            "safe" => Ok(Verdict::Safe),
            "suspicious" => Ok(Verdict::Suspicious),
            "likelymanipulated" => Ok(Verdict::LikelyManipulated),
            _ => Err(UnknownVerdict(s.to_string())),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
