/*!
 * Per-section cache of compiled pattern rules.
 *
 * Each section moves from "not attempted" to either a list of rules or a
 * cached "no rules" marker the first time it is asked for, and stays there
 * for the lifetime of the cache.
 */

use std::collections::HashMap;

use log::debug;

use super::patterns::PatternRule;

enum CachedRules {
    Empty,
    Rules(Vec<PatternRule>),
}

/// Observable state of one section's rule set
#[derive(Debug, Clone, Copy)]
pub enum RuleSetState<'a> {
    /// Never requested
    NotAttempted,
    /// Requested, and no usable rules exist
    Empty,
    /// Compiled rules in declaration order
    Rules(&'a [PatternRule]),
}

/// Pattern rule sets keyed by section name
#[derive(Default)]
pub struct PatternCache {
    sets: HashMap<String, CachedRules>,

    /// Requests answered from the cache
    hits: usize,

    /// Requests that had to build a rule set
    misses: usize,
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache")
            .field("sections", &self.sets.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for `section`, building them with `build` on first request.
    ///
    /// `build` returns `None` when the section has no pattern source; that
    /// outcome is remembered like any other.
    pub fn get_or_build<F>(&mut self, section: &str, build: F) -> &[PatternRule]
    where
        F: FnOnce() -> Option<Vec<PatternRule>>,
    {
        if self.sets.contains_key(section) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let entry = match build() {
                Some(rules) if !rules.is_empty() => {
                    debug!("Compiled {} pattern rule(s) for '{}'", rules.len(), section);
                    CachedRules::Rules(rules)
                }
                _ => {
                    debug!("No pattern rules for '{}'", section);
                    CachedRules::Empty
                }
            };
            self.sets.insert(section.to_string(), entry);
        }

        match self.sets.get(section) {
            Some(CachedRules::Rules(rules)) => rules,
            _ => &[],
        }
    }

    /// State of a section without building anything
    pub fn state(&self, section: &str) -> RuleSetState<'_> {
        match self.sets.get(section) {
            None => RuleSetState::NotAttempted,
            Some(CachedRules::Empty) => RuleSetState::Empty,
            Some(CachedRules::Rules(rules)) => RuleSetState::Rules(rules),
        }
    }

    /// Get cache statistics as (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Number of sections with a cached state
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
