//! Random forest adapter: Implementation of `RiskClassifier`.
//!
//! Trains an ensemble of CART trees on a synthetic, seed-determined corpus.
//!
//! # Determinism
//!
//! Corpus synthesis and forest fitting each use a ChaCha20 generator seeded
//! from `ForestConfig::seed` (on separate streams). The same seed produces the
//! same trees and therefore the same verdicts across process restarts and
//! platforms.
//!
//! # Thread Safety
//!
//! A trained `RandomForest` is never mutated. Share it behind an `Arc` and
//! call `predict` from any thread without locking.
//!
//! # Scope
//!
//! The training data is illustrative. This is not a validated clinical model.

mod corpus;
mod tree;

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub use corpus::{heuristic_label, heuristic_score, Row, TrainingCorpus, LABEL_THRESHOLD};
pub use tree::{DecisionTree, TreeParams};

use crate::domain::{RiskVerdict, FEATURE_COUNT};
use crate::ports::{check_row, ClassifierError, RiskClassifier};

/// Fixed seed for corpus synthesis and forest fitting.
pub const DEFAULT_SEED: u64 = 42;

/// ChaCha stream used for bootstrap and feature sampling, so that it never
/// overlaps the corpus stream drawn from the same seed.
const FOREST_STREAM: u64 = 1;

/// Training configuration for the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,

    /// Number of synthetic training rows
    pub n_samples: usize,

    /// Seed for corpus synthesis and fitting
    pub seed: u64,

    /// Features considered per split (`None` = floor(sqrt(FEATURE_COUNT)))
    pub max_features: Option<usize>,

    /// Maximum tree depth (`None` = grow until pure)
    pub max_depth: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            n_samples: 1000,
            seed: DEFAULT_SEED,
            max_features: None,
            max_depth: None,
        }
    }
}

impl ForestConfig {
    fn effective_max_features(&self) -> usize {
        self.max_features
            .unwrap_or_else(|| (FEATURE_COUNT as f64).sqrt().floor() as usize)
            .clamp(1, FEATURE_COUNT)
    }
}

/// Bagged ensemble of decision trees voting on a binary label.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    config: ForestConfig,
}

impl RandomForest {
    /// Synthesize the training corpus and fit the forest.
    ///
    /// Runs synchronously; call once at startup and share the result.
    ///
    /// # Errors
    /// Returns `ClassifierError::Training` if the configuration asks for zero
    /// trees or zero samples.
    pub fn train(config: ForestConfig) -> Result<Self, ClassifierError> {
        if config.n_samples == 0 {
            return Err(ClassifierError::Training(
                "n_samples must be greater than zero".to_string(),
            ));
        }
        let corpus = TrainingCorpus::synthesize(config.n_samples, config.seed);
        tracing::debug!(
            rows = corpus.len(),
            positive_rate = corpus.positive_rate(),
            "Synthesized training corpus"
        );
        Self::fit(&corpus, config)
    }

    /// Fit the forest on an existing corpus.
    ///
    /// # Errors
    /// Returns `ClassifierError::Training` for an empty corpus or zero trees.
    pub fn fit(corpus: &TrainingCorpus, config: ForestConfig) -> Result<Self, ClassifierError> {
        if config.n_trees == 0 {
            return Err(ClassifierError::Training(
                "n_trees must be greater than zero".to_string(),
            ));
        }
        if corpus.is_empty() {
            return Err(ClassifierError::Training(
                "training corpus is empty".to_string(),
            ));
        }

        let started = Instant::now();
        let params = TreeParams {
            max_features: config.effective_max_features(),
            max_depth: config.max_depth,
        };

        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        rng.set_stream(FOREST_STREAM);

        let n = corpus.len();
        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .map(|_| {
                let mut tree_rng = ChaCha20Rng::seed_from_u64(rng.gen());
                let bootstrap: Vec<usize> = (0..n).map(|_| tree_rng.gen_range(0..n)).collect();
                DecisionTree::fit(
                    corpus.rows(),
                    corpus.labels(),
                    bootstrap,
                    params,
                    &mut tree_rng,
                )
            })
            .collect();

        let forest = Self { trees, config };
        tracing::info!(
            "Trained random forest: {} trees on {} rows (seed={}, max_features={}) in {:?}",
            forest.trees.len(),
            n,
            forest.config.seed,
            params.max_features,
            started.elapsed()
        );
        Ok(forest)
    }

    /// Number of trees voting at risk for `features`.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidInput` for malformed rows.
    pub fn votes(&self, features: &[f64]) -> Result<usize, ClassifierError> {
        check_row(features)?;
        Ok(self
            .trees
            .iter()
            .filter(|tree| tree.predict(features) == 1)
            .count())
    }

    /// Fraction of trees voting at risk, in `[0, 1]`.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidInput` for malformed rows.
    pub fn vote_share(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        Ok(self.votes(features)? as f64 / self.trees.len() as f64)
    }

    /// Fraction of corpus rows whose majority vote matches the label.
    #[must_use]
    pub fn accuracy_on(&self, corpus: &TrainingCorpus) -> f64 {
        if corpus.is_empty() {
            return 0.0;
        }
        let correct = corpus
            .rows()
            .iter()
            .zip(corpus.labels())
            .filter(|&(row, &label)| {
                let votes = self.trees.iter().filter(|t| t.predict(row) == 1).count();
                u8::from(votes * 2 > self.trees.len()) == label
            })
            .count();
        correct as f64 / corpus.len() as f64
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}

impl RiskClassifier for RandomForest {
    fn predict(&self, features: &[f64]) -> Result<RiskVerdict, ClassifierError> {
        let share = self.vote_share(features)?;
        // Majority vote; a tie is not at risk.
        let verdict = RiskVerdict::from(share > 0.5);
        tracing::debug!(
            share,
            trees = self.trees.len(),
            "Forest vote -> {}",
            verdict
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChestPainType, HealthProfile, Sex};
    use std::sync::OnceLock;

    fn default_forest() -> &'static RandomForest {
        static FOREST: OnceLock<RandomForest> = OnceLock::new();
        FOREST.get_or_init(|| RandomForest::train(ForestConfig::default()).expect("train"))
    }

    fn small_config(seed: u64) -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            n_samples: 300,
            seed,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ForestConfig::default();
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.n_samples, 1000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.effective_max_features(), 2);
        assert_eq!(default_forest().n_trees(), 100);
    }

    #[test]
    fn test_scenario_a_not_at_risk() {
        let profile =
            HealthProfile::new(30, Sex::Male, 120, 200, ChestPainType::Asymptomatic).expect("valid");
        let verdict = default_forest().predict_profile(&profile).expect("predict");
        assert_eq!(verdict, RiskVerdict::NotAtRisk);
    }

    #[test]
    fn test_scenario_b_at_risk() {
        let profile =
            HealthProfile::new(60, Sex::Male, 150, 260, ChestPainType::TypicalAngina).expect("valid");
        let verdict = default_forest().predict_profile(&profile).expect("predict");
        assert_eq!(verdict, RiskVerdict::AtRisk);
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let forest = default_forest();
        let row = [57.0, 0.0, 145.0, 250.0, 2.0];
        let first = forest.predict(&row).expect("predict");
        for _ in 0..10 {
            assert_eq!(forest.predict(&row).expect("predict"), first);
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let a = RandomForest::train(small_config(42)).expect("train");
        let b = RandomForest::train(small_config(42)).expect("train");

        for age in (25..80).step_by(9) {
            for bp in (95..180).step_by(17) {
                for pain in 0..4 {
                    let row = [f64::from(age), 1.0, f64::from(bp), 245.0, f64::from(pain)];
                    assert_eq!(a.votes(&row).expect("votes"), b.votes(&row).expect("votes"));
                }
            }
        }
    }

    #[test]
    fn test_fits_training_corpus() {
        let corpus = TrainingCorpus::synthesize(1000, DEFAULT_SEED);
        let accuracy = default_forest().accuracy_on(&corpus);
        assert!(accuracy > 0.95, "training accuracy too low: {accuracy}");
    }

    #[test]
    fn test_predict_rejects_malformed_rows() {
        let forest = default_forest();
        assert!(matches!(
            forest.predict(&[60.0, 1.0, 150.0]),
            Err(ClassifierError::InvalidInput(_))
        ));
        assert!(matches!(
            forest.predict(&[60.0, 1.0, 150.0, f64::INFINITY, 3.0]),
            Err(ClassifierError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_vote_share_in_unit_interval() {
        let share = default_forest()
            .vote_share(&[60.0, 1.0, 150.0, 260.0, 3.0])
            .expect("share");
        assert!((0.0..=1.0).contains(&share));
        assert!(share > 0.5);
    }

    #[test]
    fn test_verdict_follows_vote_share() {
        let forest = default_forest();
        for age in (25..80).step_by(11) {
            for chol in (160..340).step_by(30) {
                for pain in 0..4 {
                    let row = [f64::from(age), 1.0, 145.0, f64::from(chol), f64::from(pain)];
                    let votes = forest.votes(&row).expect("votes");
                    let verdict = forest.predict(&row).expect("predict");
                    assert_eq!(verdict.is_at_risk(), votes * 2 > forest.n_trees());
                }
            }
        }
    }

    #[test]
    fn test_zero_trees_or_samples_rejected() {
        let config = ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        };
        assert!(matches!(
            RandomForest::train(config),
            Err(ClassifierError::Training(_))
        ));

        let config = ForestConfig {
            n_samples: 0,
            ..ForestConfig::default()
        };
        assert!(matches!(
            RandomForest::train(config),
            Err(ClassifierError::Training(_))
        ));
    }

    #[test]
    fn test_forest_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomForest>();
    }
}
