//! CART decision tree with Gini impurity and random feature subsets.

use rand::seq::SliceRandom;
use rand::Rng;

use super::corpus::Row;
use crate::domain::FEATURE_COUNT;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Non-constant features evaluated per split
    pub max_features: usize,
    /// Maximum depth (`None` grows until leaves are pure)
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Binary classification tree stored as a flat node arena (root at index 0).
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

impl DecisionTree {
    /// Grow a tree on the rows selected by `sample` (indices may repeat).
    pub fn fit<R: Rng>(
        rows: &[Row],
        labels: &[u8],
        sample: Vec<usize>,
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        if sample.is_empty() {
            tree.nodes.push(Node::Leaf { class: 0 });
        } else {
            tree.grow(rows, labels, sample, 0, params, rng);
        }
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        rows: &[Row],
        labels: &[u8],
        sample: Vec<usize>,
        depth: usize,
        params: TreeParams,
        rng: &mut R,
    ) -> usize {
        let total = sample.len();
        let positives = sample.iter().filter(|&&i| labels[i] == 1).count();
        // Ties go to class 0.
        let majority = u8::from(positives * 2 > total);

        let pure = positives == 0 || positives == total;
        let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
        if pure || depth_reached || total < 2 {
            return self.push(Node::Leaf { class: majority });
        }

        let Some(split) = best_split(rows, labels, &sample, positives, params.max_features, rng)
        else {
            return self.push(Node::Leaf { class: majority });
        };

        let (left, right): (Vec<usize>, Vec<usize>) = sample
            .into_iter()
            .partition(|&i| rows[i][split.feature] <= split.threshold);

        let idx = self.push(Node::Leaf { class: majority });
        let left = self.grow(rows, labels, left, depth + 1, params, rng);
        let right = self.grow(rows, labels, right, depth + 1, params, rng);
        self.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        idx
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Predicted class for a row of `FEATURE_COUNT` values.
    #[must_use]
    pub fn predict(&self, row: &[f64]) -> u8 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { class } => return class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf path, in edges.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Split { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }
}

/// Lowest weighted-Gini split over a random subset of non-constant features.
///
/// Features are visited in shuffled order; constant ones are skipped without
/// counting towards `max_features`. Thresholds sit midway between adjacent
/// distinct values.
fn best_split<R: Rng>(
    rows: &[Row],
    labels: &[u8],
    sample: &[usize],
    positives: usize,
    max_features: usize,
    rng: &mut R,
) -> Option<Split> {
    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);

    let n = sample.len();
    let mut order = sample.to_vec();
    let mut best: Option<Split> = None;
    let mut visited = 0;

    for feature in features {
        if visited >= max_features {
            break;
        }

        order.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));
        if rows[order[0]][feature] == rows[order[n - 1]][feature] {
            continue;
        }
        visited += 1;

        let mut left_pos = 0;
        for k in 1..n {
            if labels[order[k - 1]] == 1 {
                left_pos += 1;
            }
            let prev = rows[order[k - 1]][feature];
            let cur = rows[order[k]][feature];
            if prev == cur {
                continue;
            }

            let right_pos = positives - left_pos;
            let impurity = (k as f64 * gini(left_pos, k)
                + (n - k) as f64 * gini(right_pos, n - k))
                / n as f64;

            if best.map_or(true, |b| impurity < b.impurity) {
                best = Some(Split {
                    feature,
                    threshold: (prev + cur) / 2.0,
                    impurity,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn params() -> TreeParams {
        TreeParams {
            max_features: FEATURE_COUNT,
            max_depth: None,
        }
    }

    fn row(x: f64) -> Row {
        [x, 0.0, 0.0, 0.0, 0.0]
    }

    #[test]
    fn test_perfect_fit_on_separable_data() {
        let rows = vec![row(0.0), row(1.0), row(10.0), row(11.0)];
        let labels = vec![0, 0, 1, 1];
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let tree = DecisionTree::fit(&rows, &labels, (0..4).collect(), params(), &mut rng);

        for (r, &l) in rows.iter().zip(&labels) {
            assert_eq!(tree.predict(r), l);
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node_count(), 3);
        // Midpoint threshold.
        assert_eq!(tree.predict(&row(5.4)), 0);
        assert_eq!(tree.predict(&row(5.6)), 1);
    }

    #[test]
    fn test_pure_sample_is_single_leaf() {
        let rows = vec![row(0.0), row(3.0)];
        let labels = vec![1, 1];
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let tree = DecisionTree::fit(&rows, &labels, vec![0, 1, 1], params(), &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&row(100.0)), 1);
    }

    #[test]
    fn test_constant_features_fall_back_to_majority() {
        let rows = vec![row(2.0), row(2.0), row(2.0)];
        let labels = vec![1, 0, 1];
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let tree = DecisionTree::fit(&rows, &labels, vec![0, 1, 2], params(), &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&row(2.0)), 1);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let rows: Vec<Row> = (0..16).map(|i| row(f64::from(i))).collect();
        let labels: Vec<u8> = (0..16).map(|i| (i % 2) as u8).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let limited = TreeParams {
            max_features: FEATURE_COUNT,
            max_depth: Some(2),
        };
        let tree = DecisionTree::fit(&rows, &labels, (0..16).collect(), limited, &mut rng);
        assert!(tree.depth() <= 2);
    }
}
