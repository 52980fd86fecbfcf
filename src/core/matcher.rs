use tracing::debug;

use crate::config::MatchingConfig;
use crate::core::scoring::compute_match;
use crate::models::{Child, MatchResult};

/// Batch matching orchestrator
///
/// Holds the engine configuration once so callers score many pairs without
/// threading config through every call. Stateless beyond that; cloning is
/// cheap and clones are safe to use from multiple threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchingConfig,
}

impl Matcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: MatchingConfig::default(),
        }
    }

    /// Score a single pair with this matcher's configuration
    pub fn compute_match(&self, subject: &Child, candidate: &Child) -> MatchResult {
        compute_match(subject, candidate, &self.config)
    }

    /// Find the best matches for a child among the given candidates
    ///
    /// Candidates carrying the subject's own id are skipped, results under
    /// the configured minimum score are dropped, and the rest are ranked by
    /// overall score. Candidates with equal scores keep their input order.
    ///
    /// # Arguments
    /// * `subject` - The child to find matches for
    /// * `candidates` - Pre-filtered candidate pool from the caller
    /// * `limit` - Maximum number of matches to return
    pub fn find_top_matches(
        &self,
        subject: &Child,
        candidates: &[Child],
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter(|candidate| candidate.id != subject.id)
            .map(|candidate| compute_match(subject, candidate, &self.config))
            .filter(|result| f64::from(result.overall_score) >= self.config.min_overall_score)
            .collect();

        matches.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        matches.truncate(limit);

        debug!(
            "scored {} candidates for child {}, returning {}",
            candidates.len(),
            subject.id,
            matches.len()
        );

        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}
