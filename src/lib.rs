#![warn(missing_docs)]

//!
//! A crate that trains gradient boosted decision trees
//! on small tabular datasets.
//!
//! The crate follows the usual machine-learning pipeline:
//!
//! - Load a CSV file into a `polars::DataFrame` with [`TextLoader`],
//!   and split it with [`train_test_split`].
//! - Chain [`Estimator`]s
//!   ([`OneHotEncoder`] → [`Concatenate`] → [`FastTreeBinaryTrainer`])
//!   and fit them into a [`TransformerChain`].
//! - Score a held-out frame and evaluate it with
//!   [`BinaryClassificationMetrics`].
//! - Persist the fitted chain with [`save`] / [`load`] and
//!   score single records with [`PredictionEngine`].
//!
//! The tree learner grows regression trees leaf-wise
//! on binned features, and the booster ([`FastTree`]) minimizes
//! the logistic loss by Newton steps.

pub mod constants;
pub mod error;
pub mod sample;
pub mod data;
pub mod pipeline;
pub mod weak_learner;
pub mod hypothesis;
pub mod booster;
pub mod trainer;
pub mod metrics;
pub mod model;
pub mod logger;

pub mod prelude;


pub use error::{Error, Result};

pub use sample::{Sample, Feature};

pub use data::{
    ColumnType,
    Schema,
    TextLoader,
    Record,
    Customer,
    train_test_split,
};

pub use pipeline::{
    Estimator,
    Transformer,
    EstimatorChain,
    TransformerChain,
    OneHotEncoder,
    OneHotTransformer,
    OutputKind,
    Concatenate,
};

pub use weak_learner::{
    WeakLearner,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};

pub use hypothesis::{
    Classifier,
    Regressor,
    TreeEnsemble,
    PlattCalibrator,
    CalibratedBinaryPredictor,
};

pub use booster::{
    Booster,
    CurrentHypothesis,
    FastTree,
    LossFunction,
    LogisticLoss,
};

pub use trainer::{
    FastTreeBinaryOptions,
    FastTreeBinaryTrainer,
    BinaryPredictionTransformer,
};

pub use metrics::{
    BinaryClassificationMetrics,
    ConfusionMatrix,
};

pub use model::{
    save,
    load,
    PipelineModel,
    PredictionEngine,
    Prediction,
};

pub use logger::Logger;
