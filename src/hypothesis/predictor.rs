use polars::prelude::DataFrame;
use serde::{Serialize, Deserialize};

use crate::{
    data::column,
    Classifier,
    PlattCalibrator,
    Regressor,
    Result,
    Sample,
    TreeEnsemble,
};


/// A tree ensemble with a probability calibrator.
/// The ensemble reads the slots of `feature_column` named
/// `feature_names`, in the order they had at training time.
/// You can read/write this struct by `Serde` trait.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalibratedBinaryPredictor {
    feature_column: String,
    feature_names: Vec<String>,
    ensemble: TreeEnsemble,
    calibrator: PlattCalibrator,
}


impl CalibratedBinaryPredictor {
    /// Construct a new instance of [`CalibratedBinaryPredictor`].
    pub fn new(
        feature_column: String,
        feature_names: Vec<String>,
        ensemble: TreeEnsemble,
        calibrator: PlattCalibrator,
    ) -> Self
    {
        Self { feature_column, feature_names, ensemble, calibrator }
    }


    /// Returns the feature names in slot order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names[..]
    }


    /// Returns the tree ensemble.
    pub fn ensemble(&self) -> &TreeEnsemble {
        &self.ensemble
    }


    /// Returns the calibrator.
    pub fn calibrator(&self) -> &PlattCalibrator {
        &self.calibrator
    }


    /// Reads the feature slots of `data` as an unlabeled [`Sample`].
    pub fn sample(&self, data: &DataFrame) -> Result<Sample> {
        let features = column::vector_features(
            data, &self.feature_column, &self.feature_names
        )?;
        Sample::from_features(features, vec![0.0; data.height()])
    }


    /// Returns the raw scores of the rows of `data`.
    pub fn scores(&self, data: &DataFrame) -> Result<Vec<f64>> {
        let sample = self.sample(data)?;
        Ok(self.confidence_all(&sample))
    }


    /// Returns the calibrated probability of a raw score.
    pub fn probability(&self, score: f64) -> f64 {
        self.calibrator.probability(score)
    }


    /// Returns the predicted label of a raw score.
    pub fn predicted_label(&self, score: f64) -> bool {
        score > 0.0
    }
}


impl Classifier for CalibratedBinaryPredictor {
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        Regressor::predict(&self.ensemble, sample, row)
    }
}
