//! CART classification tree with Gini impurity.
//!
//! Leaves store class frequencies rather than a hard vote so the forest can
//! average probabilities. Each node draws a random subset of `max_features`
//! candidate features; if none of them yields a valid split the search keeps
//! going through the remaining features before giving up.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Size of the class table (SELL, HOLD, BUY).
pub const N_CLASSES: usize = 3;

pub type ClassProbs = [f64; N_CLASSES];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Candidate features drawn per node.
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        probs: ClassProbs,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Best split found for one node.
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
    depth: usize,
}

impl DecisionTree {
    /// Fit on the rows selected by `indices` (duplicates allowed, as produced
    /// by bootstrap sampling). `labels` holds dense class indices.
    pub fn fit<const F: usize>(
        samples: &[[f64; F]],
        labels: &[usize],
        indices: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = Builder {
            samples,
            labels,
            params,
            rng,
            depth: 0,
        };
        let root = builder.grow(indices, 0);
        Self {
            root,
            depth: builder.depth,
        }
    }

    pub fn predict_proba(&self, x: &[f64]) -> ClassProbs {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { probs } => return *probs,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Depth of the deepest split (a lone leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_leaves(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}

struct Builder<'a, const F: usize> {
    samples: &'a [[f64; F]],
    labels: &'a [usize],
    params: &'a TreeParams,
    rng: &'a mut StdRng,
    depth: usize,
}

impl<'a, const F: usize> Builder<'a, F> {
    fn grow(&mut self, indices: Vec<usize>, depth: usize) -> Node {
        let counts = self.class_counts(&indices);
        let n = indices.len();

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth >= self.params.max_depth || n < self.params.min_samples_split {
            return leaf(&counts, n);
        }

        let Some(split) = self.best_split(&indices, gini(&counts, n)) else {
            return leaf(&counts, n);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.samples[i][split.feature] <= split.threshold);

        self.depth = self.depth.max(depth + 1);
        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(left, depth + 1)),
            right: Box::new(self.grow(right, depth + 1)),
        }
    }

    fn class_counts(&self, indices: &[usize]) -> [usize; N_CLASSES] {
        let mut counts = [0usize; N_CLASSES];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn best_split(&mut self, indices: &[usize], parent_impurity: f64) -> Option<SplitCandidate> {
        let mut features: Vec<usize> = (0..F).collect();
        features.shuffle(&mut *self.rng);

        let mut best: Option<SplitCandidate> = None;
        for (drawn, &feature) in features.iter().enumerate() {
            if drawn >= self.params.max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(indices, feature) {
                if best.as_ref().map_or(true, |b| candidate.impurity < b.impurity) {
                    best = Some(candidate);
                }
            }
        }

        best.filter(|b| b.impurity <= parent_impurity)
    }

    /// Sweep the sorted feature values once, moving samples from right to left.
    fn best_split_on(&self, indices: &[usize], feature: usize) -> Option<SplitCandidate> {
        let mut order: Vec<usize> = indices.to_vec();
        order.sort_by(|&a, &b| self.samples[a][feature].total_cmp(&self.samples[b][feature]));

        let n = order.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        let mut left = [0usize; N_CLASSES];
        let mut right = self.class_counts(&order);
        let mut best: Option<SplitCandidate> = None;

        for pos in 1..n {
            let moved = self.labels[order[pos - 1]];
            left[moved] += 1;
            right[moved] -= 1;

            let lo = self.samples[order[pos - 1]][feature];
            let hi = self.samples[order[pos]][feature];
            if lo >= hi || pos < min_leaf || n - pos < min_leaf {
                continue;
            }

            let impurity =
                (pos as f64 * gini(&left, pos) + (n - pos) as f64 * gini(&right, n - pos)) / n as f64;
            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize; N_CLASSES], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

fn leaf(counts: &[usize; N_CLASSES], n: usize) -> Node {
    let mut probs = [0.0; N_CLASSES];
    if n > 0 {
        for (p, &c) in probs.iter_mut().zip(counts) {
            *p = c as f64 / n as f64;
        }
    }
    Node::Leaf { probs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params(max_depth: usize) -> TreeParams {
        TreeParams {
            max_depth,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: 2,
        }
    }

    fn threshold_data() -> (Vec<[f64; 2]>, Vec<usize>) {
        let samples: Vec<[f64; 2]> = (0..40).map(|i| [i as f64, (i % 3) as f64]).collect();
        let labels = (0..40).map(|i| if i < 20 { 0 } else { 2 }).collect();
        (samples, labels)
    }

    #[test]
    fn learns_single_threshold() {
        let (samples, labels) = threshold_data();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&samples, &labels, (0..40).collect(), &params(6), &mut rng);

        assert_eq!(tree.predict_proba(&[3.0, 0.0]), [1.0, 0.0, 0.0]);
        assert_eq!(tree.predict_proba(&[35.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
    }

    #[test]
    fn pure_node_is_a_leaf() {
        let samples = vec![[1.0], [2.0], [3.0]];
        let labels = vec![1, 1, 1];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&samples, &labels, vec![0, 1, 2], &params(6), &mut rng);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict_proba(&[10.0]), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn depth_is_bounded() {
        // alternating labels force deep trees
        let samples: Vec<[f64; 1]> = (0..64).map(|i| [i as f64]).collect();
        let labels: Vec<usize> = (0..64).map(|i| (i % 2) * 2).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let tree = DecisionTree::fit(&samples, &labels, (0..64).collect(), &params(3), &mut rng);
        assert!(tree.depth() <= 3);
        let p = tree.predict_proba(&[10.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_features_cannot_split() {
        let samples = vec![[5.0], [5.0], [5.0], [5.0]];
        let labels = vec![0, 2, 0, 2];
        let mut rng = StdRng::seed_from_u64(3);
        let tree = DecisionTree::fit(&samples, &labels, vec![0, 1, 2, 3], &params(6), &mut rng);
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict_proba(&[5.0]), [0.5, 0.0, 0.5]);
    }

    #[test]
    fn duplicate_indices_weight_the_leaf() {
        let samples = vec![[1.0], [1.0]];
        let labels = vec![0, 2];
        let mut rng = StdRng::seed_from_u64(3);
        let tree = DecisionTree::fit(&samples, &labels, vec![0, 0, 0, 1], &params(6), &mut rng);
        assert_eq!(tree.predict_proba(&[1.0]), [0.75, 0.0, 0.25]);
    }

    #[test]
    fn gini_values() {
        assert_eq!(gini(&[4, 0, 0], 4), 0.0);
        assert!((gini(&[2, 0, 2], 4) - 0.5).abs() < 1e-12);
    }
}
