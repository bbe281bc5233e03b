//! Pattern engine — active-subsequence tracking for the scorer.
//!
//! The scorer only depends on the `PatternSource` seam: given the recent
//! outcome history, which predefined subsequences are partially matched and
//! what single outcome would continue each one. `PatternBook` is the
//! built-in implementation; external engines plug in through the trait.

use crate::domain::{Outcome, ParseOutcomeError};

/// A predefined subsequence whose prefix currently matches the tail of the
/// history.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePattern {
    pub name: String,
    /// Completion fraction in `(0, 1)`: matched elements / pattern length.
    pub progress: f64,
    /// The single outcome that would extend the match.
    pub expected_next: Outcome,
}

/// Source of active patterns, recomputed per snapshot.
pub trait PatternSource: Send + Sync {
    /// Active patterns given the recent outcomes, oldest first.
    fn active_patterns(&self, recent: &[Outcome]) -> Vec<ActivePattern>;
}

/// The null source: no patterns are ever active.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPatterns;

impl PatternSource for NoPatterns {
    fn active_patterns(&self, _recent: &[Outcome]) -> Vec<ActivePattern> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Pattern {
    name: String,
    sequence: Vec<Outcome>,
}

/// A set of named outcome subsequences parsed from label strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternBook {
    patterns: Vec<Pattern>,
}

impl PatternBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add one pattern spec.
    ///
    /// Specs are dash- or whitespace-separated outcome labels; `+`, `/` and
    /// `=` are accepted as stray separators and collapsed. Leading zeros
    /// are normalized (`"07"` ⇒ `7`) and `"00"` stays the double zero. A
    /// label outside the alphabet rejects the whole spec.
    pub fn add(&mut self, spec: &str) -> Result<(), ParseOutcomeError> {
        let cleaned: String = spec
            .trim()
            .chars()
            .map(|c| if matches!(c, '+' | '/' | '=') { '-' } else { c })
            .collect();
        let parts: Vec<&str> = if cleaned.contains('-') {
            cleaned.split('-').collect()
        } else {
            cleaned.split_whitespace().collect()
        };

        let mut sequence = Vec::new();
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            sequence.push(part.parse::<Outcome>()?);
        }
        if sequence.is_empty() {
            return Ok(());
        }
        let name = sequence
            .iter()
            .map(|o| o.label())
            .collect::<Vec<_>>()
            .join("-");
        self.patterns.push(Pattern { name, sequence });
        Ok(())
    }

    /// Build a book from many specs, rejecting the first malformed one.
    pub fn with_patterns<'a, I>(specs: I) -> Result<Self, ParseOutcomeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut book = Self::new();
        for spec in specs {
            book.add(spec)?;
        }
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PatternSource for PatternBook {
    /// A pattern is active when its longest prefix matching a suffix of
    /// `recent` is non-empty and shorter than the pattern: there is still a
    /// single expected continuation. A fully matched pattern is complete,
    /// not active.
    fn active_patterns(&self, recent: &[Outcome]) -> Vec<ActivePattern> {
        let mut active = Vec::new();
        for pattern in &self.patterns {
            let n = pattern.sequence.len();
            let limit = recent.len().min(n);
            let mut matched = 0;
            for k in (1..=limit).rev() {
                if recent[recent.len() - k..] == pattern.sequence[..k] {
                    matched = k;
                    break;
                }
            }
            if matched > 0 && matched < n {
                active.push(ActivePattern {
                    name: pattern.name.clone(),
                    progress: matched as f64 / n as f64,
                    expected_next: pattern.sequence[matched],
                });
            }
        }
        // Strongest matches first.
        active.sort_by(|a, b| {
            b.progress
                .partial_cmp(&a.progress)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(label: &str) -> Outcome {
        label.parse().unwrap()
    }

    fn history(labels: &[&str]) -> Vec<Outcome> {
        labels.iter().map(|l| outcome(l)).collect()
    }

    #[test]
    fn parses_dash_and_space_specs() {
        let book = PatternBook::with_patterns(["01-06-04", "7 15 34"]).unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn normalizes_stray_separators_and_zeros() {
        let mut book = PatternBook::new();
        book.add("02+14/10=00-0").unwrap();
        let active = book.active_patterns(&history(&["2"]));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].expected_next, outcome("14"));
        assert_eq!(active[0].name, "2-14-10-00-0");
    }

    #[test]
    fn rejects_labels_outside_the_alphabet() {
        let mut book = PatternBook::new();
        assert!(book.add("04-01-075").is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn empty_spec_adds_nothing() {
        let mut book = PatternBook::new();
        book.add("   ").unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn longest_prefix_suffix_match_wins() {
        let book = PatternBook::with_patterns(["1-2-1-3"]).unwrap();
        // Tail ...1-2-1 matches three elements, not just the final 1.
        let active = book.active_patterns(&history(&["9", "1", "2", "1"]));
        assert_eq!(active.len(), 1);
        assert!((active[0].progress - 0.75).abs() < 1e-12);
        assert_eq!(active[0].expected_next, outcome("3"));
    }

    #[test]
    fn completed_pattern_is_not_active() {
        let book = PatternBook::with_patterns(["5-6"]).unwrap();
        let active = book.active_patterns(&history(&["5", "6"]));
        assert!(active.is_empty());
    }

    #[test]
    fn unmatched_pattern_is_not_active() {
        let book = PatternBook::with_patterns(["5-6"]).unwrap();
        let active = book.active_patterns(&history(&["7", "8"]));
        assert!(active.is_empty());
    }

    #[test]
    fn strongest_match_ranks_first() {
        let book = PatternBook::with_patterns(["2-9-9-9", "1-2-3-4"]).unwrap();
        let active = book.active_patterns(&history(&["1", "2"]));
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].expected_next, outcome("3")); // 2/4 matched
        assert_eq!(active[1].expected_next, outcome("9")); // 1/4 matched
    }

    #[test]
    fn no_patterns_source_is_always_empty() {
        assert!(NoPatterns.active_patterns(&history(&["1", "2"])).is_empty());
    }
}
