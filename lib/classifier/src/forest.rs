//! Random forest of Gini decision trees.
//!
//! Every tree is grown on a bootstrap sample with its own `StdRng` seeded
//! from the forest seed and the tree index, so fitting is reproducible even
//! though trees are built in parallel.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Non-constant features evaluated per split
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Class mass at this leaf, sums to 1.0
        distribution: Vec<f32>,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f32,
    impurity: f64,
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// A single classification tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Grow a tree over `sample` (indices into `features`/`labels`,
    /// duplicates allowed for bootstrap samples).
    pub fn fit(
        features: &[Vec<f32>],
        labels: &[usize],
        sample: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = features.first().map(Vec::len).unwrap_or(0);
        let builder = TreeBuilder {
            features,
            labels,
            n_classes,
            n_features,
            params,
        };
        let root = builder.build(sample, 0, rng);
        Self { root }
    }

    /// Class distribution of the leaf reached by `row`
    pub fn predict_proba(&self, row: &[f32]) -> &[f32] {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f32>],
    labels: &'a [usize],
    n_classes: usize,
    n_features: usize,
    params: &'a TreeParams,
}

impl TreeBuilder<'_> {
    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn leaf(&self, counts: &[usize], total: usize) -> Node {
        let distribution = if total == 0 {
            vec![1.0 / self.n_classes.max(1) as f32; self.n_classes]
        } else {
            counts.iter().map(|&c| c as f32 / total as f32).collect()
        };
        Node::Leaf { distribution }
    }

    fn build(&self, indices: &[usize], depth: usize, rng: &mut StdRng) -> Node {
        let counts = self.class_counts(indices);
        let total = indices.len();
        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        if is_pure || depth >= self.params.max_depth || total < self.params.min_samples_split {
            return self.leaf(&counts, total);
        }

        let Some(split) = self.find_best_split(indices, &counts, rng) else {
            return self.leaf(&counts, total);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.features[i][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.build(&left, depth + 1, rng)),
            right: Box::new(self.build(&right, depth + 1, rng)),
        }
    }

    /// Best Gini split among up to `max_features` randomly ordered,
    /// non-constant features. Constant features are skipped without
    /// counting towards the budget.
    fn find_best_split(
        &self,
        indices: &[usize],
        counts: &[usize],
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let mut order: Vec<usize> = (0..self.n_features).collect();
        order.shuffle(rng);

        let total = indices.len();
        let mut best: Option<SplitCandidate> = None;
        let mut evaluated = 0usize;

        for feature in order {
            if evaluated >= self.params.max_features {
                break;
            }

            let mut values: Vec<(f32, usize)> = indices
                .iter()
                .map(|&i| (self.features[i][feature], self.labels[i]))
                .collect();
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (lowest, highest) = (values[0].0, values[total - 1].0);
            if lowest == highest {
                continue;
            }
            evaluated += 1;

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = counts.to_vec();

            for pos in 0..total - 1 {
                let (value, class) = values[pos];
                left_counts[class] += 1;
                right_counts[class] -= 1;

                let next = values[pos + 1].0;
                if value == next {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = total - n_left;
                let impurity = (n_left as f64 * gini(&left_counts, n_left)
                    + n_right as f64 * gini(&right_counts, n_right))
                    / total as f64;

                if best.map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = value + (next - value) / 2.0;
                    if threshold >= next {
                        threshold = value;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
        }

        best
    }
}

/// Bagged ensemble of decision trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Fit `n_estimators` trees in parallel. Tree `t` draws its bootstrap
    /// sample and feature order from `StdRng::seed_from_u64(seed + t)`.
    pub fn fit(
        features: &[Vec<f32>],
        labels: &[usize],
        n_classes: usize,
        n_estimators: usize,
        params: TreeParams,
        seed: u64,
    ) -> Self {
        let n_samples = labels.len();

        let trees: Vec<DecisionTree> = (0..n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let sample: Vec<usize> = (0..n_samples)
                    .map(|_| rng.random_range(0..n_samples))
                    .collect();
                DecisionTree::fit(features, labels, &sample, n_classes, &params, &mut rng)
            })
            .collect();

        Self { trees, n_classes }
    }

    /// Mean of the trees' leaf distributions
    pub fn predict_proba(&self, row: &[f32]) -> Vec<f32> {
        let mut proba = vec![0.0f32; self.n_classes];
        if self.trees.is_empty() {
            return proba;
        }

        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(row)) {
                *acc += p;
            }
        }

        let inv = 1.0 / self.trees.len() as f32;
        for p in &mut proba {
            *p *= inv;
        }
        proba
    }

    #[inline]
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Features evaluated per split: `max(1, floor(sqrt(n_features)))`
pub fn sqrt_features(n_features: usize) -> usize {
    ((n_features as f64).sqrt() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f32>>, Vec<usize>) {
        let features = vec![
            vec![0.9, 0.1, 0.0],
            vec![0.8, 0.0, 0.1],
            vec![0.7, 0.2, 0.0],
            vec![0.0, 0.1, 0.9],
            vec![0.1, 0.0, 0.8],
            vec![0.0, 0.2, 0.7],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        (features, labels)
    }

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 10,
            min_samples_split: 2,
            max_features: 3,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_tree_fits_separable_data() {
        let (features, labels) = separable_data();
        let sample: Vec<usize> = (0..labels.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::fit(&features, &labels, &sample, 2, &params(), &mut rng);

        for (row, &label) in features.iter().zip(labels.iter()) {
            let proba = tree.predict_proba(row);
            assert_eq!(proba[label], 1.0);
        }
        assert!(tree.depth() >= 1);
    }

    #[test]
    fn test_tree_respects_max_depth() {
        let (features, labels) = separable_data();
        let sample: Vec<usize> = (0..labels.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let shallow = TreeParams {
            max_depth: 1,
            ..params()
        };

        let tree = DecisionTree::fit(&features, &labels, &sample, 2, &shallow, &mut rng);
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn test_forest_distribution_sums_to_one() {
        let (features, labels) = separable_data();
        let forest = RandomForest::fit(&features, &labels, 2, 25, params(), 42);

        assert_eq!(forest.n_trees(), 25);
        let proba = forest.predict_proba(&[0.85, 0.05, 0.05]);
        assert!((proba.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(proba[0] > proba[1]);
    }

    #[test]
    fn test_forest_is_deterministic() {
        let (features, labels) = separable_data();
        let a = RandomForest::fit(&features, &labels, 2, 20, params(), 42);
        let b = RandomForest::fit(&features, &labels, 2, 20, params(), 42);

        for row in &features {
            assert_eq!(a.predict_proba(row), b.predict_proba(row));
        }
        assert_eq!(a.predict_proba(&[0.3, 0.3, 0.3]), b.predict_proba(&[0.3, 0.3, 0.3]));
    }

    #[test]
    fn test_sqrt_features() {
        assert_eq!(sqrt_features(0), 1);
        assert_eq!(sqrt_features(1000), 31);
        assert_eq!(sqrt_features(16), 4);
    }
}
