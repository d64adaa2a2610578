//! Default parameters and column names.

/// Default number of leaves per tree.
pub const DEFAULT_NUMBER_OF_LEAVES: usize = 4;
/// Default minimum number of training examples in a leaf.
pub const DEFAULT_MIN_EXAMPLES_PER_LEAF: usize = 20;
/// Default number of boosting rounds.
pub const DEFAULT_NUMBER_OF_TREES: usize = 4;
/// Default cap on the number of bins per feature.
pub const DEFAULT_MAX_BINS: usize = 254;
/// Default fraction of features drawn for each tree.
pub const DEFAULT_FEATURE_FRACTION: f64 = 1.0;
/// Default shrinkage applied to each tree.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default L2-regularization parameter for the leaf values.
pub const DEFAULT_LAMBDA_L2: f64 = 0.01;
/// Default seed for shuffling and feature sampling.
pub const DEFAULT_SEED: u64 = 1234;
/// Default fraction of rows held out by `train_test_split`.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
/// Default cap on the vocabulary size of a one-hot encoded column.
pub const DEFAULT_MAX_KEYS: usize = 1_000_000;

/// Name of the raw score column appended by a trained predictor.
pub const SCORE_COLUMN: &str = "Score";
/// Name of the calibrated probability column.
pub const PROBABILITY_COLUMN: &str = "Probability";
/// Name of the predicted label column.
pub const PREDICTED_LABEL_COLUMN: &str = "PredictedLabel";
/// Default name of the feature vector column.
pub const DEFAULT_FEATURE_COLUMN: &str = "Features";

/// Separator between a vector column name and its slot name.
pub const SLOT_SEPARATOR: char = '.';

/// Tolerance used when comparing split gains.
pub const GAIN_TOLERANCE: f64 = 1e-12;
/// Perturbation applied to constant features before binning.
pub const PERTURBATION: f64 = 1e-10;
/// Probabilities are clipped to `[EPSILON, 1 - EPSILON]` in log-losses.
pub const EPSILON: f64 = 1e-15;

/// Width of the bin list printed by `Display for Bins`.
pub const PRINT_WIDTH_BINNING: usize = 3;
/// Initial capacity of a feature column.
pub const BUFFER_SIZE: usize = 256;

/// The version tag written to the model file.
pub const MODEL_FORMAT_VERSION: u32 = 1;
