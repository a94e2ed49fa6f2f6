//! Fuzzy lesson search.
//!
//! Approximate substring matching over selected lesson fields, scored the
//! way Fuse-style matchers do: `edits / pattern_len`, plus a positional
//! penalty of `start / distance` unless location is ignored. Lower is better;
//! 0 is an exact match at the start of a field. Queries are cut to
//! [`MAX_PATTERN_LEN`] characters before matching.

mod fuzzy;

pub use fuzzy::{FuzzyMatcher, MAX_PATTERN_LEN};

use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;

/// A lesson field that can take part in fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKey {
    LessonNumber,
    LessonName,
    Category,
    Summary,
    Url,
}

impl SearchKey {
    /// Value of this field on a lesson.
    pub fn value<'a>(&self, lesson: &'a Lesson) -> Option<&'a str> {
        match self {
            SearchKey::LessonNumber => lesson.lesson_number.as_deref(),
            SearchKey::LessonName => lesson.lesson_name.as_deref(),
            SearchKey::Category => lesson.category.as_deref(),
            SearchKey::Summary => lesson.summary.as_deref(),
            SearchKey::Url => lesson.url.as_deref(),
        }
    }
}

/// Fuzzy search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fields compared against the query.
    #[serde(default = "default_keys")]
    pub keys: Vec<SearchKey>,
    /// Maximum accepted score (0 = exact, 1 = anything).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Characters from the start of a field over which a match costs a full point.
    #[serde(default = "default_distance")]
    pub distance: u32,
    /// Skip the positional penalty entirely.
    #[serde(default)]
    pub ignore_location: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            threshold: default_threshold(),
            distance: default_distance(),
            ignore_location: false,
        }
    }
}

fn default_keys() -> Vec<SearchKey> {
    vec![SearchKey::LessonName, SearchKey::Summary, SearchKey::Category]
}

fn default_threshold() -> f64 {
    0.3
}

fn default_distance() -> u32 {
    100
}
