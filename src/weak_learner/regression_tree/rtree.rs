use rand::prelude::*;
use rand::seq::index;
use rayon::prelude::*;

use crate::{
    booster::LossFunction,
    constants::GAIN_TOLERANCE,
    Sample,
    WeakLearner,
};
use super::{
    bin::*,
    node::*,
    split_rule::*,
    regressor::RegressionTreeRegressor,
};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};


type Gradient = f64;
type Hessian  = f64;


/// `RegressionTree` is the factory that generates
/// a `RegressionTreeRegressor` for the current predictions.
///
/// Trees are grown leaf-wise:
/// each step splits the leaf with the largest gain
/// until the tree has `max_leaves` leaves
/// or no leaf has an admissible split.
/// A split is admissible if both children keep at least
/// `min_leaf_examples` examples and the gain is positive.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
/// # let sample: Sample = todo!();
///
/// let tree = RegressionTreeBuilder::new(&sample)
///     .max_leaves(4)
///     .min_leaf_examples(20)
///     .build();
///
/// let n_sample = sample.shape().0;
/// let predictions = vec![0f64; n_sample];
/// let f = tree.produce(&sample, &predictions);
///
/// println!("# of leaves: {}", f.n_leaves());
/// ```
pub struct RegressionTree<L> {
    bins: Vec<(String, Bins)>,

    // The number of training instances
    n_sample: usize,

    max_leaves: usize,
    min_leaf_examples: usize,

    // Regularization parameter
    lambda_l2: f64,

    feature_fraction: f64,
    seed: u64,
    // The number of trees produced so far.
    // Each tree draws its features with a different seed.
    round: AtomicU64,

    // Loss function
    loss: L,
}


/// The best split found for a leaf.
#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}


enum TrainNode {
    Leaf {
        indices: Vec<usize>,
        value: f64,
        split: Option<Split>,
    },
    Branch {
        splitter: Splitter,
        left: usize,
        right: usize,
        value: f64,
    },
}


impl<L> RegressionTree<L> {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub(super) fn from_components(
        bins: Vec<(String, Bins)>,
        n_sample: usize,
        max_leaves: usize,
        min_leaf_examples: usize,
        lambda_l2: f64,
        feature_fraction: f64,
        seed: u64,
        loss: L,
    ) -> Self
    {
        Self {
            bins,
            n_sample,
            max_leaves,
            min_leaf_examples,
            lambda_l2,
            feature_fraction,
            seed,
            round: AtomicU64::new(0),
            loss,
        }
    }
}


impl<L> RegressionTree<L>
    where L: Sync,
{
    /// Returns the indices of the features this tree may split on.
    fn sample_features(&self) -> Vec<usize> {
        let n_feature = self.bins.len();
        if self.feature_fraction >= 1.0 || n_feature == 0 {
            return (0..n_feature).collect();
        }

        let round = self.round.fetch_add(1, Ordering::Relaxed);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(round));

        let k = (n_feature as f64 * self.feature_fraction).ceil() as usize;
        let k = k.clamp(1, n_feature);
        let mut features = index::sample(&mut rng, n_feature, k).into_vec();
        features.sort_unstable();
        features
    }


    fn leaf(
        &self,
        sample: &Sample,
        gradient: &[Gradient],
        hessian: &[Hessian],
        features: &[usize],
        indices: Vec<usize>,
    ) -> TrainNode
    {
        let (grad_sum, hess_sum) = sums(&indices[..], gradient, hessian);
        let value = - grad_sum / (hess_sum + self.lambda_l2);

        let split = if indices.len() >= 2 * self.min_leaf_examples {
            self.best_split(
                sample, gradient, hessian, features, &indices[..],
                grad_sum, hess_sum,
            )
        } else {
            None
        };

        TrainNode::Leaf { indices, value, split }
    }


    /// Returns the best admissible split of the examples in `indices`.
    #[allow(clippy::too_many_arguments)]
    fn best_split(
        &self,
        sample: &Sample,
        gradient: &[Gradient],
        hessian: &[Hessian],
        features: &[usize],
        indices: &[usize],
        grad_sum: f64,
        hess_sum: f64,
    ) -> Option<Split>
    {
        let parent = grad_sum.powi(2) / (hess_sum + self.lambda_l2);

        features.par_iter()
            .filter_map(|&j| {
                let feature = &sample.features()[j];
                let pack = self.bins[j].1.pack(
                    indices, feature, gradient, hessian
                );
                let (score, threshold) = self.best_split_at(
                    pack, grad_sum, hess_sum
                )?;
                let gain = 0.5 * (score - parent);
                Some(Split { feature: j, threshold, gain })
            })
            .filter(|split| split.gain > GAIN_TOLERANCE)
            .reduce_with(|a, b| {
                let b_wins = b.gain > a.gain
                    || (b.gain == a.gain && b.feature < a.feature);
                if b_wins { b } else { a }
            })
    }


    /// this code is implemented based on Algorithm 3 of the following paper:
    /// Tianqi Chen and Carlos Guestrin.
    /// XGBoost: A scalable tree boosting system [KDD '16]
    fn best_split_at(
        &self,
        pack: Vec<(Bin, BinStat)>,
        grad_sum: f64,
        hess_sum: f64,
    ) -> Option<(f64, f64)>
    {
        let total = pack.iter()
            .map(|(_, stat)| stat.count)
            .sum::<usize>();

        let mut left_grad_sum = 0.0;
        let mut left_hess_sum = 0.0;
        let mut left_count = 0;

        let mut best: Option<(f64, f64)> = None;

        // The right-most bin cannot be the left child.
        let n_candidates = pack.len().saturating_sub(1);
        for (bin, stat) in pack.into_iter().take(n_candidates) {
            left_grad_sum += stat.grad;
            left_hess_sum += stat.hess;
            left_count    += stat.count;

            let right_count = total - left_count;
            if left_count < self.min_leaf_examples
                || right_count < self.min_leaf_examples
            {
                continue;
            }

            let right_grad_sum = grad_sum - left_grad_sum;
            let right_hess_sum = hess_sum - left_hess_sum;

            let score = {
                let l = left_grad_sum.powi(2)
                    / (left_hess_sum + self.lambda_l2);
                let r = right_grad_sum.powi(2)
                    / (right_hess_sum + self.lambda_l2);
                l + r
            };
            if best.map_or(true, |(s, _)| s < score) {
                best = Some((score, bin.end()));
            }
        }

        best
    }


    /// Grows a tree leaf-wise.
    fn grow(
        &self,
        sample: &Sample,
        gradient: &[Gradient],
        hessian: &[Hessian],
        features: &[usize],
    ) -> Box<Node>
    {
        let indices = (0..self.n_sample).collect::<Vec<_>>();
        let root = self.leaf(sample, gradient, hessian, features, indices);

        let mut nodes = vec![root];
        let mut n_leaves = 1;

        while n_leaves < self.max_leaves {
            let best = nodes.iter()
                .enumerate()
                .filter_map(|(k, node)| match node {
                    TrainNode::Leaf { split: Some(s), .. } => Some((k, s.gain)),
                    _ => None,
                })
                .fold(None, |best: Option<(usize, f64)>, (k, gain)| {
                    match best {
                        Some((_, g)) if g >= gain => best,
                        _ => Some((k, gain)),
                    }
                });

            let k = match best {
                Some((k, _)) => k,
                None => { break; },
            };

            let placeholder = TrainNode::Leaf {
                indices: Vec::new(), value: 0.0, split: None,
            };
            let node = std::mem::replace(&mut nodes[k], placeholder);
            let (indices, value, split) = match node {
                TrainNode::Leaf { indices, value, split: Some(split) } => {
                    (indices, value, split)
                },
                other => { nodes[k] = other; break; },
            };

            let feature = &sample.features()[split.feature];
            let splitter = Splitter::new(feature.name(), split.threshold);

            // Split the train data for left/right childrens
            let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices
                .into_iter()
                .partition(|&i| {
                    splitter.split_value(feature[i]) == LeftRight::Left
                });

            let ltree = self.leaf(sample, gradient, hessian, features, lindices);
            let rtree = self.leaf(sample, gradient, hessian, features, rindices);

            let left = nodes.len();
            nodes.push(ltree);
            let right = nodes.len();
            nodes.push(rtree);

            nodes[k] = TrainNode::Branch { splitter, left, right, value };
            n_leaves += 1;
        }

        to_node(&nodes[..], 0)
    }
}


impl<L> WeakLearner for RegressionTree<L>
    where L: LossFunction + Sync,
{
    type Hypothesis = RegressionTreeRegressor;

    fn name(&self) -> &str {
        "Regression Tree"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_bins = self.bins.iter()
            .map(|(_, bin)| bin.len())
            .reduce(usize::max)
            .unwrap_or(0);
        let info = Vec::from([
            ("# of bins (max)", format!("{n_bins}")),
            ("Max leaves", format!("{}", self.max_leaves)),
            ("Min examples per leaf", format!("{}", self.min_leaf_examples)),
            ("Feature fraction", format!("{}", self.feature_fraction)),
            ("Split criterion", self.loss.name().to_string()),
            ("Regularization param.", format!("{}", self.lambda_l2)),
        ]);
        Some(info)
    }

    fn produce(&self, sample: &Sample, predictions: &[f64])
        -> Self::Hypothesis
    {
        let gradient = self.loss.gradient(predictions, sample.target());
        let hessian = self.loss.hessian(predictions, sample.target());

        let features = self.sample_features();
        let root = self.grow(
            sample,
            &gradient[..],
            &hessian[..],
            &features[..],
        );

        RegressionTreeRegressor::from(root)
    }
}


impl<L> fmt::Display for RegressionTree<L>
    where L: LossFunction,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\
            ----------\n\
            # Regression Tree Weak Learner\n\n\
            - Max leaves: {}\n\
            - Loss function: {}\n\
            - Bins:\
            ",
            self.max_leaves,
            self.loss.name(),
        )?;

        let width = self.bins.iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        let max_bin_width = self.bins.iter()
            .map(|(_, bin)| bin.len().max(1).ilog10() as usize)
            .max()
            .unwrap_or(0)
            + 1;
        for (feat_name, feat_bins) in self.bins.iter() {
            let n_bins = feat_bins.len();
            writeln!(
                f,
                "\
                \t* [{feat_name: <width$} | \
                {n_bins: >max_bin_width$} bins]  \
                {feat_bins}\
                "
            )?;
        }

        write!(f, "----------")
    }
}


fn sums(indices: &[usize], gradient: &[Gradient], hessian: &[Hessian])
    -> (f64, f64)
{
    let grad_sum = indices.par_iter()
        .map(|&i| gradient[i])
        .sum::<f64>();

    let hess_sum = indices.par_iter()
        .map(|&i| hessian[i])
        .sum::<f64>();

    (grad_sum, hess_sum)
}


fn to_node(nodes: &[TrainNode], id: usize) -> Box<Node> {
    match &nodes[id] {
        TrainNode::Leaf { value, .. } => Box::new(Node::leaf(*value)),
        TrainNode::Branch { splitter, left, right, value } => {
            let left = to_node(nodes, *left);
            let right = to_node(nodes, *right);
            Box::new(Node::branch(splitter.clone(), left, right, *value))
        },
    }
}
