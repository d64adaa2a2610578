//! Exports the data pipeline, the FastTree trainer and the traits
//! needed to fit, evaluate, save and use a model.
//! 
pub use crate::data::{
    ColumnType,
    Schema,
    TextLoader,
    Record,
    Customer,
    train_test_split,
};


pub use crate::pipeline::{
    // Pipeline traits
    Estimator,
    Transformer,
    EstimatorChain,
    TransformerChain,


    // Stages -----------------------------------
    OneHotEncoder,
    OneHotTransformer,
    OutputKind,
    Concatenate,
};


pub use crate::booster::{
    // Booster trait
    Booster,
    CurrentHypothesis,


    // Gradient boosting ------------------------
    FastTree,
    LossFunction,
    LogisticLoss,
};


pub use crate::weak_learner::{
    // Weak Learner trait
    WeakLearner,


    // Regression -------------------------------
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};


pub use crate::hypothesis::{
    Classifier,
    Regressor,
    TreeEnsemble,
    PlattCalibrator,
    CalibratedBinaryPredictor,
};


pub use crate::trainer::{
    FastTreeBinaryOptions,
    FastTreeBinaryTrainer,
    BinaryPredictionTransformer,
};


pub use crate::metrics::{
    BinaryClassificationMetrics,
    ConfusionMatrix,
};


pub use crate::model::{
    PipelineModel,
    PredictionEngine,
    Prediction,
};


pub use crate::{
    Sample,
    Feature,
    Logger,
    Error,
    Result,
};
