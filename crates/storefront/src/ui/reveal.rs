//! One-shot scroll reveal.

use std::collections::HashMap;

use localshop_core::RevealState;

use crate::config::ShopConfig;

/// Tracks which elements have been revealed.
///
/// An element is revealed the first time its visible fraction reaches the
/// threshold; it is then unobserved and later intersections are ignored.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    elements: HashMap<String, RevealState>,
}

impl RevealTracker {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            elements: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ShopConfig) -> Self {
        Self::new(config.reveal_threshold)
    }

    /// Start observing `id`. Already revealed elements stay revealed.
    pub fn observe(&mut self, id: impl Into<String>) {
        self.elements.entry(id.into()).or_default();
    }

    /// Report an intersection; returns `true` when `id` should be revealed now.
    pub fn on_intersect(&mut self, id: &str, ratio: f64) -> bool {
        match self.elements.get_mut(id) {
            Some(state) if *state == RevealState::Observing && ratio >= self.threshold => {
                *state = RevealState::Revealed;
                tracing::trace!(element = id, ratio, "revealed");
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn state(&self, id: &str) -> Option<RevealState> {
        self.elements.get(id).copied()
    }

    /// Number of elements still waiting to be revealed.
    #[must_use]
    pub fn observing(&self) -> usize {
        self.elements
            .values()
            .filter(|s| **s == RevealState::Observing)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_once() {
        let mut tracker = RevealTracker::new(0.12);
        tracker.observe("hero");

        assert!(!tracker.on_intersect("hero", 0.05));
        assert!(tracker.on_intersect("hero", 0.12));
        assert!(!tracker.on_intersect("hero", 1.0));
        assert_eq!(tracker.state("hero"), Some(RevealState::Revealed));
        assert_eq!(tracker.observing(), 0);
    }

    #[test]
    fn test_unobserved_elements_are_ignored() {
        let mut tracker = RevealTracker::from_config(&ShopConfig::default());
        assert!(!tracker.on_intersect("footer", 1.0));
        assert_eq!(tracker.state("footer"), None);
    }

    #[test]
    fn test_observe_again_keeps_revealed() {
        let mut tracker = RevealTracker::new(0.5);
        tracker.observe("card-1");
        tracker.observe("card-2");
        assert!(tracker.on_intersect("card-1", 0.6));

        tracker.observe("card-1");
        assert_eq!(tracker.state("card-1"), Some(RevealState::Revealed));
        assert_eq!(tracker.observing(), 1);
    }
}
