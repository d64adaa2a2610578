use crate::{
    constants::{
        DEFAULT_NUMBER_OF_LEAVES,
        DEFAULT_MIN_EXAMPLES_PER_LEAF,
        DEFAULT_MAX_BINS,
        DEFAULT_LAMBDA_L2,
        DEFAULT_FEATURE_FRACTION,
        DEFAULT_SEED,
    },
    booster::LogisticLoss,
    Sample,
    RegressionTree,
};
use super::bin::*;


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```no_run
/// use fastboosts::prelude::*;
/// # let sample: Sample = todo!();
///
/// let weak_learner = RegressionTreeBuilder::new(&sample)
///     .max_leaves(4)
///     .min_leaf_examples(20)
///     .max_bins(254)
///     .lambda_l2(0.01)
///     .build();
/// ```
#[derive(Clone)]
pub struct RegressionTreeBuilder<'a, L> {
    sample: &'a Sample,

    max_leaves: usize,
    min_leaf_examples: usize,

    /// Upper bound of the number of bins per feature.
    max_bins: usize,

    /// L2 regularization for the leaf values.
    lambda_l2: f64,

    feature_fraction: f64,
    seed: u64,

    /// Loss function
    loss: L,
}


impl<'a> RegressionTreeBuilder<'a, LogisticLoss> {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// By default,
    /// `RegressionTreeBuilder` sets the parameters as follows;
    /// ```text
    /// max_leaves: DEFAULT_NUMBER_OF_LEAVES == 4,
    /// min_leaf_examples: DEFAULT_MIN_EXAMPLES_PER_LEAF == 20,
    /// max_bins: DEFAULT_MAX_BINS == 254,
    /// lambda_l2: DEFAULT_LAMBDA_L2 == 0.01,
    /// feature_fraction: DEFAULT_FEATURE_FRACTION == 1.0,
    /// loss: LogisticLoss,
    /// ```
    pub fn new(sample: &'a Sample) -> Self {
        Self {
            sample,
            max_leaves: DEFAULT_NUMBER_OF_LEAVES,
            min_leaf_examples: DEFAULT_MIN_EXAMPLES_PER_LEAF,
            max_bins: DEFAULT_MAX_BINS,
            lambda_l2: DEFAULT_LAMBDA_L2,
            feature_fraction: DEFAULT_FEATURE_FRACTION,
            seed: DEFAULT_SEED,
            loss: LogisticLoss,
        }
    }
}


impl<'a, L> RegressionTreeBuilder<'a, L> {
    /// Specify the loss function the trees are fitted to.
    /// Default is [`LogisticLoss`].
    pub fn loss<M>(self, loss: M) -> RegressionTreeBuilder<'a, M> {
        RegressionTreeBuilder {
            sample: self.sample,
            max_leaves: self.max_leaves,
            min_leaf_examples: self.min_leaf_examples,
            max_bins: self.max_bins,
            lambda_l2: self.lambda_l2,
            feature_fraction: self.feature_fraction,
            seed: self.seed,
            loss,
        }
    }


    /// Set the maximal number of leaves of a tree.
    pub fn max_leaves(mut self, max_leaves: usize) -> Self {
        assert!(max_leaves > 1, "a tree needs at least two leaves");
        self.max_leaves = max_leaves;
        self
    }


    /// Set the minimal number of training examples in a leaf.
    pub fn min_leaf_examples(mut self, min_leaf_examples: usize) -> Self {
        assert!(min_leaf_examples > 0);
        self.min_leaf_examples = min_leaf_examples;
        self
    }


    /// Set the upper bound of the number of bins per feature.
    /// A feature with fewer distinct values gets one bin per value.
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        assert!(max_bins > 1);
        self.max_bins = max_bins;
        self
    }


    /// Set the L2-regularization parameter.
    pub fn lambda_l2(mut self, lambda_l2: f64) -> Self {
        assert!(lambda_l2 >= 0.0);
        self.lambda_l2 = lambda_l2;
        self
    }


    /// Set the fraction of features drawn for each tree.
    pub fn feature_fraction(mut self, fraction: f64) -> Self {
        assert!(
            fraction > 0.0 && fraction <= 1.0,
            "the feature fraction must be in (0, 1]"
        );
        self.feature_fraction = fraction;
        self
    }


    /// Set the seed of the feature sampler.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> RegressionTree<L> {
        let bins = self.sample.features()
            .iter()
            .map(|feature| {
                let n_bins = feature.distinct_value_count()
                    .min(self.max_bins);
                (feature.name().to_string(), Bins::cut(feature, n_bins))
            })
            .collect::<Vec<_>>();

        let n_sample = self.sample.shape().0;
        RegressionTree::from_components(
            bins,
            n_sample,
            self.max_leaves,
            self.min_leaf_examples,
            self.lambda_l2,
            self.feature_fraction,
            self.seed,
            self.loss,
        )
    }
}
