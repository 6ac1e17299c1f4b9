//! Synthetic training corpus.
//!
//! Rows are drawn from uniform integer ranges and labelled by a weighted
//! threshold heuristic. The data is illustrative, not clinical.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::FEATURE_COUNT;

/// One feature row in classifier column order.
pub type Row = [f64; FEATURE_COUNT];

/// Heuristic score at or above which a row is labelled at risk.
pub const LABEL_THRESHOLD: u32 = 5;

/// Weighted risk score used to label synthetic rows.
///
/// `1·[age>50] + 1·[sex==1] + 2·[bp>140] + 2·[chol>240] + 3·[pain>1]`
#[must_use]
pub fn heuristic_score(row: &Row) -> u32 {
    let [age, sex, bp, chol, pain] = *row;
    u32::from(age > 50.0)
        + u32::from(sex == 1.0)
        + 2 * u32::from(bp > 140.0)
        + 2 * u32::from(chol > 240.0)
        + 3 * u32::from(pain > 1.0)
}

/// Class label (1 = at risk) assigned by the heuristic.
#[must_use]
pub fn heuristic_label(row: &Row) -> u8 {
    u8::from(heuristic_score(row) >= LABEL_THRESHOLD)
}

/// Labelled rows used to fit the forest.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingCorpus {
    rows: Vec<Row>,
    labels: Vec<u8>,
}

impl TrainingCorpus {
    /// Generate `n` labelled rows from `seed`.
    ///
    /// Each column is drawn in full before the next (age, sex, systolic BP,
    /// cholesterol, chest pain), so a given seed always yields the same corpus.
    #[must_use]
    pub fn synthesize(n: usize, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let mut column = |low: i64, high: i64| -> Vec<f64> {
            (0..n).map(|_| rng.gen_range(low..high) as f64).collect()
        };
        let ages = column(20, 80);
        let sexes = column(0, 2);
        let pressures = column(90, 180);
        let cholesterols = column(150, 350);
        let pains = column(0, 4);

        let rows: Vec<Row> = (0..n)
            .map(|i| [ages[i], sexes[i], pressures[i], cholesterols[i], pains[i]])
            .collect();
        let labels = rows.iter().map(heuristic_label).collect();

        Self { rows, labels }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fraction of rows labelled at risk.
    #[must_use]
    pub fn positive_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.labels.iter().filter(|&&l| l == 1).count() as f64 / self.labels.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_score_examples() {
        assert_eq!(heuristic_score(&[30.0, 1.0, 120.0, 200.0, 0.0]), 1);
        assert_eq!(heuristic_score(&[60.0, 1.0, 150.0, 260.0, 3.0]), 9);
        // Boundaries are strict.
        assert_eq!(heuristic_score(&[50.0, 0.0, 140.0, 240.0, 1.0]), 0);
        assert_eq!(heuristic_label(&[51.0, 1.0, 141.0, 200.0, 0.0]), 0);
        assert_eq!(heuristic_label(&[51.0, 0.0, 120.0, 241.0, 2.0]), 1);
    }

    #[test]
    fn test_synthesize_shape_and_ranges() {
        let corpus = TrainingCorpus::synthesize(1000, 42);
        assert_eq!(corpus.len(), 1000);
        assert_eq!(corpus.labels().len(), 1000);

        for row in corpus.rows() {
            assert!((20.0..80.0).contains(&row[0]));
            assert!(row[1] == 0.0 || row[1] == 1.0);
            assert!((90.0..180.0).contains(&row[2]));
            assert!((150.0..350.0).contains(&row[3]));
            assert!((0.0..4.0).contains(&row[4]));
            assert!(row.iter().all(|v| v.fract() == 0.0));
        }
    }

    #[test]
    fn test_labels_follow_heuristic() {
        let corpus = TrainingCorpus::synthesize(500, 7);
        for (row, &label) in corpus.rows().iter().zip(corpus.labels()) {
            assert_eq!(label, heuristic_label(row));
        }
        let rate = corpus.positive_rate();
        assert!(rate > 0.0 && rate < 1.0, "both classes present, got {rate}");
    }

    #[test]
    fn test_same_seed_same_corpus() {
        assert_eq!(
            TrainingCorpus::synthesize(200, 42),
            TrainingCorpus::synthesize(200, 42)
        );
        assert_ne!(
            TrainingCorpus::synthesize(200, 42),
            TrainingCorpus::synthesize(200, 43)
        );
    }
}
