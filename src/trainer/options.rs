use std::path::PathBuf;

use crate::{
    constants::*,
    Error,
    Result,
};


/// Hyper-parameters of [`FastTreeBinaryTrainer`](crate::FastTreeBinaryTrainer).
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
///
/// let options = FastTreeBinaryOptions::new("Purchase")
///     .number_of_leaves(4)
///     .minimum_example_count_per_leaf(20)
///     .number_of_trees(4)
///     .maximum_bin_count_per_feature(254)
///     .feature_fraction(1.0)
///     .learning_rate(0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FastTreeBinaryOptions {
    pub(crate) label_column_name: String,
    pub(crate) feature_column_name: String,
    pub(crate) number_of_leaves: usize,
    pub(crate) minimum_example_count_per_leaf: usize,
    pub(crate) number_of_trees: usize,
    pub(crate) maximum_bin_count_per_feature: usize,
    pub(crate) feature_fraction: f64,
    pub(crate) learning_rate: f64,
    pub(crate) lambda_l2: f64,
    pub(crate) seed: u64,
    pub(crate) verbose: bool,
    pub(crate) log_file: Option<PathBuf>,
}


impl FastTreeBinaryOptions {
    /// Construct the default options for the label column `label`.
    /// The feature column defaults to `Features`.
    pub fn new<T: ToString>(label: T) -> Self {
        Self {
            label_column_name: label.to_string(),
            feature_column_name: DEFAULT_FEATURE_COLUMN.to_string(),
            number_of_leaves: DEFAULT_NUMBER_OF_LEAVES,
            minimum_example_count_per_leaf: DEFAULT_MIN_EXAMPLES_PER_LEAF,
            number_of_trees: DEFAULT_NUMBER_OF_TREES,
            maximum_bin_count_per_feature: DEFAULT_MAX_BINS,
            feature_fraction: DEFAULT_FEATURE_FRACTION,
            learning_rate: DEFAULT_LEARNING_RATE,
            lambda_l2: DEFAULT_LAMBDA_L2,
            seed: DEFAULT_SEED,
            verbose: false,
            log_file: None,
        }
    }


    /// Set the name of the feature vector column.
    pub fn feature_column_name<T: ToString>(mut self, name: T) -> Self {
        self.feature_column_name = name.to_string();
        self
    }


    /// Set the maximal number of leaves per tree.
    pub fn number_of_leaves(mut self, n: usize) -> Self {
        self.number_of_leaves = n;
        self
    }


    /// Set the minimal number of training examples per leaf.
    pub fn minimum_example_count_per_leaf(mut self, n: usize) -> Self {
        self.minimum_example_count_per_leaf = n;
        self
    }


    /// Set the number of trees.
    pub fn number_of_trees(mut self, n: usize) -> Self {
        self.number_of_trees = n;
        self
    }


    /// Set the upper bound of the number of bins per feature.
    pub fn maximum_bin_count_per_feature(mut self, n: usize) -> Self {
        self.maximum_bin_count_per_feature = n;
        self
    }


    /// Set the fraction of features drawn for each tree.
    pub fn feature_fraction(mut self, fraction: f64) -> Self {
        self.feature_fraction = fraction;
        self
    }


    /// Set the shrinkage applied to each tree.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }


    /// Set the L2-regularization parameter of the leaf values.
    pub fn lambda_l2(mut self, lambda_l2: f64) -> Self {
        self.lambda_l2 = lambda_l2;
        self
    }


    /// Set the seed of the feature sampler.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Print the training progress per round.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }


    /// Write the training progress per round to a CSV file.
    pub fn log_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_file = Some(path.into());
        self
    }


    /// Returns the label column name.
    pub fn label_column(&self) -> &str {
        &self.label_column_name
    }


    /// Returns the feature column name.
    pub fn feature_column(&self) -> &str {
        &self.feature_column_name
    }


    /// Check every hyper-parameter against its valid range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidOption(msg));

        if self.number_of_leaves < 2 {
            return invalid(format!(
                "`number_of_leaves` must be at least 2, got {}",
                self.number_of_leaves
            ));
        }
        if self.minimum_example_count_per_leaf == 0 {
            return invalid(
                "`minimum_example_count_per_leaf` must be positive".into()
            );
        }
        if self.number_of_trees == 0 {
            return invalid("`number_of_trees` must be positive".into());
        }
        if self.maximum_bin_count_per_feature < 2 {
            return invalid(format!(
                "`maximum_bin_count_per_feature` must be at least 2, got {}",
                self.maximum_bin_count_per_feature
            ));
        }
        if !(self.feature_fraction > 0.0 && self.feature_fraction <= 1.0) {
            return invalid(format!(
                "`feature_fraction` must be in (0, 1], got {}",
                self.feature_fraction
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return invalid(format!(
                "`learning_rate` must be positive, got {}",
                self.learning_rate
            ));
        }
        if !(self.lambda_l2 >= 0.0 && self.lambda_l2.is_finite()) {
            return invalid(format!(
                "`lambda_l2` must be non-negative, got {}",
                self.lambda_l2
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = FastTreeBinaryOptions::new("Purchase");
        assert!(options.validate().is_ok());
        assert_eq!(options.feature_column(), "Features");
        assert_eq!(options.number_of_leaves, 4);
        assert_eq!(options.minimum_example_count_per_leaf, 20);
        assert_eq!(options.maximum_bin_count_per_feature, 254);
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        let base = FastTreeBinaryOptions::new("Purchase");
        let bad = [
            base.clone().number_of_leaves(1),
            base.clone().minimum_example_count_per_leaf(0),
            base.clone().number_of_trees(0),
            base.clone().maximum_bin_count_per_feature(1),
            base.clone().feature_fraction(0.0),
            base.clone().feature_fraction(1.5),
            base.clone().learning_rate(0.0),
            base.clone().lambda_l2(-1.0),
        ];
        for options in bad {
            assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
        }
    }
}
