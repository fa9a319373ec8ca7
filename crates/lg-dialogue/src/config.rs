//! Configuration for matching and dialogue behavior.

/// Tuning knobs for the fuzzy matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Candidates scoring below this are dropped (0.0-1.0).
    pub acceptance_threshold: f64,
    /// Two entities scoring closer than this are ambiguous (0.0-1.0).
    pub tie_gap: f64,
    /// Largest accepted edit distance as a fraction of the longer string (0.0-1.0).
    pub max_divergence: f64,
    /// Aliases and keywords shorter than this (in characters) only match exactly.
    pub min_fuzzy_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.45,
            tie_gap: 0.05,
            max_divergence: 0.30,
            min_fuzzy_len: 5,
        }
    }
}

impl MatcherConfig {
    /// Set the acceptance threshold (clamped to 0.0-1.0).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the ambiguity tie gap (clamped to 0.0-1.0).
    pub fn with_tie_gap(mut self, gap: f64) -> Self {
        self.tie_gap = gap.clamp(0.0, 1.0);
        self
    }

    /// Set the maximum edit divergence (clamped to 0.0-1.0).
    pub fn with_max_divergence(mut self, divergence: f64) -> Self {
        self.max_divergence = divergence.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum length for approximate matching.
    pub fn with_min_fuzzy_len(mut self, len: usize) -> Self {
        self.min_fuzzy_len = len;
        self
    }
}

/// Configuration for a dialogue engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogueConfig {
    /// Matcher settings.
    pub matcher: MatcherConfig,
    /// Most landmarks offered in a disambiguation prompt (at least 2).
    pub max_choices: usize,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            max_choices: 3,
        }
    }
}

impl DialogueConfig {
    /// Replace the matcher settings.
    pub fn with_matcher(mut self, matcher: MatcherConfig) -> Self {
        self.matcher = matcher;
        self
    }

    /// Set the number of disambiguation choices (at least 2).
    pub fn with_max_choices(mut self, max: usize) -> Self {
        self.max_choices = max.max(2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = DialogueConfig::default();
        assert_eq!(cfg.matcher.acceptance_threshold, 0.45);
        assert_eq!(cfg.matcher.tie_gap, 0.05);
        assert_eq!(cfg.matcher.max_divergence, 0.30);
        assert_eq!(cfg.max_choices, 3);
    }

    #[test]
    fn builder_methods() {
        let cfg = DialogueConfig::default()
            .with_matcher(MatcherConfig::default().with_threshold(0.6).with_tie_gap(0.1))
            .with_max_choices(4);
        assert_eq!(cfg.matcher.acceptance_threshold, 0.6);
        assert_eq!(cfg.matcher.tie_gap, 0.1);
        assert_eq!(cfg.max_choices, 4);
    }

    #[test]
    fn values_clamped() {
        let cfg = MatcherConfig::default()
            .with_threshold(1.5)
            .with_tie_gap(-0.2)
            .with_max_divergence(2.0);
        assert_eq!(cfg.acceptance_threshold, 1.0);
        assert_eq!(cfg.tie_gap, 0.0);
        assert_eq!(cfg.max_divergence, 1.0);
        assert_eq!(DialogueConfig::default().with_max_choices(0).max_choices, 2);
    }
}
