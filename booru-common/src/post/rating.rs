//! General enum for rating posts found by the importer
//! # Post Safety
//! Imageboards classify posts by how explicit they are, each with its own vocabulary.
//!
//! The importer folds every known token into three levels:
//! * `Safe`: `s`, `safe`, `g`, `general`.
//! * `Sketchy`: `q`, `questionable`, `sensitive`.
//! * `Unsafe`: `e`, `explicit`.
//!
//! Anything else is rejected with an [`UnknownRatingError`].

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    /// Represents posts that don't involve anything suggestive or sensitive.
    Safe,
    /// Represents posts that have some degree of nudity or sexually suggestive elements.
    Sketchy,
    /// Represents posts that have explicit elements of pornography, gore, death, etc.
    Unsafe,
}

/// The rating token is not part of any known imageboard vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid rating tag: {0}")]
pub struct UnknownRatingError(pub String);

impl Display for Safety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Sketchy => write!(f, "sketchy"),
            Self::Unsafe => write!(f, "unsafe"),
        }
    }
}

impl Safety {
    /// Converts the rating token present in a post. Matching ignores ASCII case.
    pub fn from_rating_str(s: &str) -> Result<Self, UnknownRatingError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "g" | "safe" | "general" => Ok(Self::Safe),
            "q" | "questionable" | "sensitive" => Ok(Self::Sketchy),
            "e" | "explicit" => Ok(Self::Unsafe),
            _ => Err(UnknownRatingError(s.to_string())),
        }
    }
}

impl FromStr for Safety {
    type Err = UnknownRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rating_str(s)
    }
}
