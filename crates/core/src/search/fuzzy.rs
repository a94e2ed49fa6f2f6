use std::cmp::Ordering;

use super::SearchConfig;
use crate::lesson::Lesson;

/// Longest pattern compared against a field; longer queries are cut here.
pub const MAX_PATTERN_LEN: usize = 32;

/// Ranks lessons against a free-text query.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: SearchConfig,
}

impl FuzzyMatcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Lessons scoring within the threshold, best first.
    ///
    /// Ties keep their input order.
    pub fn search(&self, records: &[Lesson], query: &str) -> Vec<Lesson> {
        let pattern = pattern(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &Lesson)> = records
            .iter()
            .filter_map(|lesson| {
                self.score_pattern(lesson, &pattern)
                    .filter(|score| *score <= self.config.threshold)
                    .map(|score| (score, lesson))
            })
            .collect();

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, lesson)| lesson.clone()).collect()
    }

    /// Best score of `query` over the configured keys, or `None` when no key
    /// has a value to compare against.
    pub fn score(&self, lesson: &Lesson, query: &str) -> Option<f64> {
        let pattern = pattern(query);
        if pattern.is_empty() {
            return None;
        }
        self.score_pattern(lesson, &pattern)
    }

    fn score_pattern(&self, lesson: &Lesson, pattern: &[char]) -> Option<f64> {
        self.config
            .keys
            .iter()
            .filter_map(|key| key.value(lesson))
            .map(|text| self.score_text(pattern, text))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    fn score_text(&self, pattern: &[char], text: &str) -> f64 {
        let text = normalize(text);
        let m = pattern.len();
        let n = text.len();
        if n == 0 {
            return 1.0;
        }

        let pattern_str: String = pattern.iter().collect();

        // Shorter than any window: compare the whole field.
        if n + 1 < m {
            let whole: String = text.iter().collect();
            return strsim::levenshtein(&whole, &pattern_str) as f64 / m as f64;
        }

        let mut best = f64::INFINITY;
        for start in 0..n {
            let penalty = self.location_penalty(start);
            if penalty >= best {
                break;
            }
            for len in [m, m.saturating_sub(1), m + 1] {
                if len == 0 || start + len > n {
                    continue;
                }
                let window: String = text[start..start + len].iter().collect();
                let edits = strsim::levenshtein(&window, &pattern_str);
                let score = edits as f64 / m as f64 + penalty;
                if score < best {
                    best = score;
                }
            }
            if best == 0.0 {
                break;
            }
        }

        if best.is_finite() {
            best
        } else {
            1.0
        }
    }

    fn location_penalty(&self, start: usize) -> f64 {
        if self.config.ignore_location {
            0.0
        } else {
            start as f64 / self.config.distance as f64
        }
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn normalize(s: &str) -> Vec<char> {
    s.trim().to_lowercase().chars().collect()
}

fn pattern(query: &str) -> Vec<char> {
    let mut pattern = normalize(query);
    pattern.truncate(MAX_PATTERN_LEN);
    pattern
}
