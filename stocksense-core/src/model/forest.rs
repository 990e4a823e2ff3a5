//! Bootstrap-aggregated forest of [`DecisionTree`]s.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rng::SeedHierarchy;

use super::tree::{ClassProbs, DecisionTree, TreeParams, N_CLASSES};

/// How many candidate features each node inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least one.
    Sqrt,
    All,
    Fixed(usize),
}

impl MaxFeatures {
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Fixed(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 6,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `params.n_trees` trees in parallel.
    ///
    /// Tree `i` draws its bootstrap sample and feature subsets from the
    /// `("tree", i)` child seed, so the fitted forest does not depend on how
    /// rayon schedules the work.
    pub fn fit<const F: usize>(samples: &[[f64; F]], labels: &[usize], params: &ForestParams) -> Self {
        debug_assert_eq!(samples.len(), labels.len());
        let seeds = SeedHierarchy::new(params.seed);
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            min_samples_leaf: params.min_samples_leaf,
            max_features: params.max_features.resolve(F),
        };
        let n = samples.len();

        let trees = (0..params.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = seeds.rng_for("tree", i as u64);
                let indices: Vec<usize> = if params.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(samples, labels, indices, &tree_params, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Mean of the per-tree class probabilities.
    pub fn predict_proba(&self, x: &[f64]) -> ClassProbs {
        let mut total = [0.0; N_CLASSES];
        if self.trees.is_empty() {
            return total;
        }
        for tree in &self.trees {
            for (t, p) in total.iter_mut().zip(tree.predict_proba(x)) {
                *t += p;
            }
        }
        let n = self.trees.len() as f64;
        total.map(|t| t / n)
    }

    /// Class index with the highest mean probability; ties go to the lower index.
    pub fn predict(&self, x: &[f64]) -> usize {
        argmax(&self.predict_proba(x))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_tree_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}

pub(crate) fn argmax(probs: &ClassProbs) -> usize {
    let mut best = 0;
    for (i, &p) in probs.iter().enumerate().skip(1) {
        if p > probs[best] {
            best = i;
        }
    }
    best
}
