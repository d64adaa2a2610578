//! The core library for `Hypothesis` traits
//! and the models a trained booster returns.

pub(crate) mod traits;
pub(crate) mod ensemble;
pub(crate) mod calibrator;
pub(crate) mod predictor;


pub use traits::{
    Classifier,
    Regressor,
};

pub use ensemble::TreeEnsemble;
pub use calibrator::PlattCalibrator;
pub use predictor::CalibratedBinaryPredictor;
