//! Provides [`FastTreeBinaryTrainer`], the binary classification trainer
//! that boosts regression trees and calibrates their scores.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    constants::*,
    data::column,
    pipeline::{Estimator, Transformer},
    Booster,
    CalibratedBinaryPredictor,
    Error,
    FastTree,
    Logger,
    LogisticLoss,
    PlattCalibrator,
    RegressionTreeBuilder,
    Regressor,
    Result,
    Sample,
};
use super::options::FastTreeBinaryOptions;


/// An [`Estimator`] that fits a FastTree binary classifier
/// on a boolean label column and a feature vector column.
///
/// The fitted [`BinaryPredictionTransformer`] appends
/// `Score`, `Probability` and `PredictedLabel` to a frame.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
/// # let train: polars::prelude::DataFrame = todo!();
///
/// let options = FastTreeBinaryOptions::new("Purchase")
///     .number_of_leaves(4)
///     .number_of_trees(4);
/// let trainer = FastTreeBinaryTrainer::new(options);
/// let model = trainer.fit(&train).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FastTreeBinaryTrainer {
    options: FastTreeBinaryOptions,
}


impl FastTreeBinaryTrainer {
    /// Construct a trainer with the given options.
    pub fn new(options: FastTreeBinaryOptions) -> Self {
        Self { options }
    }


    /// Returns the options of this trainer.
    pub fn options(&self) -> &FastTreeBinaryOptions {
        &self.options
    }


    /// Reads the labeled training sample from `data`.
    /// The targets are `+1` for `true` and `-1` for `false`.
    fn training_sample(&self, data: &DataFrame)
        -> Result<(Sample, Vec<bool>, Vec<String>)>
    {
        let label = self.options.label_column();
        let vector = self.options.feature_column();

        if data.height() == 0 {
            return Err(Error::EmptyData);
        }

        let labels = column::labels(data, label)?;
        let names = column::slot_names(data, vector);
        if names.is_empty() {
            return Err(Error::MissingColumn(vector.to_string()));
        }

        let features = column::vector_features(data, vector, &names)?;
        let target = labels.iter()
            .map(|&y| if y { 1.0 } else { -1.0 })
            .collect::<Vec<_>>();
        let sample = Sample::from_features(features, target)?;

        if !sample.is_valid_binary_instance() {
            return Err(Error::SingleClass(label.to_string()));
        }
        Ok((sample, labels, names))
    }
}


impl Estimator for FastTreeBinaryTrainer {
    type Transformer = BinaryPredictionTransformer;


    fn fit(&self, data: &DataFrame) -> Result<Self::Transformer> {
        let opt = &self.options;
        opt.validate()?;

        let (sample, labels, names) = self.training_sample(data)?;

        let weak_learner = RegressionTreeBuilder::new(&sample)
            .max_leaves(opt.number_of_leaves)
            .min_leaf_examples(opt.minimum_example_count_per_leaf)
            .max_bins(opt.maximum_bin_count_per_feature)
            .lambda_l2(opt.lambda_l2)
            .feature_fraction(opt.feature_fraction)
            .seed(opt.seed)
            .build();

        let mut booster = FastTree::init(&sample)
            .n_trees(opt.number_of_trees)
            .learning_rate(opt.learning_rate);

        let ensemble = if opt.verbose || opt.log_file.is_some() {
            let round = if opt.verbose { 1 } else { usize::MAX };
            let mut logger = Logger::new(
                booster, weak_learner, LogisticLoss, &sample
            ).print_every(round);
            match &opt.log_file {
                Some(path) => logger.run_with_log(path)?,
                None => logger.run(),
            }
        } else {
            booster.run(&weak_learner)
        };

        let scores = Regressor::predict_all(&ensemble, &sample);
        let calibrator = PlattCalibrator::fit(&scores[..], &labels[..])?;

        let predictor = CalibratedBinaryPredictor::new(
            opt.feature_column().to_string(),
            names,
            ensemble,
            calibrator,
        );
        Ok(BinaryPredictionTransformer::new(predictor))
    }
}


/// The fitted stage of [`FastTreeBinaryTrainer`].
/// You can read/write this struct by `serde` traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryPredictionTransformer {
    predictor: CalibratedBinaryPredictor,
}


impl BinaryPredictionTransformer {
    /// Wrap a fitted predictor.
    pub fn new(predictor: CalibratedBinaryPredictor) -> Self {
        Self { predictor }
    }


    /// Returns the fitted predictor.
    pub fn predictor(&self) -> &CalibratedBinaryPredictor {
        &self.predictor
    }
}


impl Transformer for BinaryPredictionTransformer {
    fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        let scores = self.predictor.scores(data)?;
        let probabilities = scores.iter()
            .map(|&s| self.predictor.probability(s))
            .collect::<Vec<f64>>();
        let predicted = scores.iter()
            .map(|&s| self.predictor.predicted_label(s))
            .collect::<Vec<bool>>();

        let mut data = data.clone();
        data.with_column(Series::new(SCORE_COLUMN, scores))?;
        data.with_column(Series::new(PROBABILITY_COLUMN, probabilities))?;
        data.with_column(Series::new(PREDICTED_LABEL_COLUMN, predicted))?;
        Ok(data)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn step_frame() -> DataFrame {
        let x = (0..60).map(|i| i as f64).collect::<Vec<_>>();
        let noise = (0..60).map(|i| (i % 7) as f64).collect::<Vec<_>>();
        let y = (0..60).map(|i| i >= 30).collect::<Vec<_>>();
        df!(
            "Purchase" => y,
            "Features.x" => x,
            "Features.noise" => noise,
        ).unwrap()
    }

    #[test]
    fn fitted_model_separates_a_step() {
        let data = step_frame();
        let trainer = FastTreeBinaryTrainer::new(
            FastTreeBinaryOptions::new("Purchase")
        );
        let (model, scored) = trainer.fit_transform(&data).unwrap();

        assert_eq!(
            model.predictor().feature_names(),
            &["x".to_string(), "noise".to_string()],
        );
        let predicted = scored.column(PREDICTED_LABEL_COLUMN).unwrap()
            .bool().unwrap()
            .into_no_null_iter()
            .collect::<Vec<_>>();
        let expected = (0..60).map(|i| i >= 30).collect::<Vec<_>>();
        assert_eq!(predicted, expected);

        let probability = scored.column(PROBABILITY_COLUMN).unwrap()
            .f64().unwrap()
            .into_no_null_iter()
            .collect::<Vec<_>>();
        assert!(probability[0] < 0.5 && probability[59] > 0.5);
        assert!(probability.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn transform_replaces_previous_scores() {
        let data = step_frame();
        let trainer = FastTreeBinaryTrainer::new(
            FastTreeBinaryOptions::new("Purchase")
        );
        let (model, scored) = trainer.fit_transform(&data).unwrap();
        let rescored = model.transform(&scored).unwrap();
        assert_eq!(rescored.width(), scored.width());
    }

    #[test]
    fn single_class_is_rejected() {
        let data = df!(
            "Purchase" => &[true, true, true],
            "Features.x" => &[1.0, 2.0, 3.0],
        ).unwrap();
        let trainer = FastTreeBinaryTrainer::new(
            FastTreeBinaryOptions::new("Purchase")
        );
        assert!(matches!(trainer.fit(&data), Err(Error::SingleClass(_))));
    }

    #[test]
    fn missing_features_are_rejected() {
        let data = df!(
            "Purchase" => &[true, false],
            "Age" => &[1.0, 2.0],
        ).unwrap();
        let trainer = FastTreeBinaryTrainer::new(
            FastTreeBinaryOptions::new("Purchase")
        );
        assert!(matches!(trainer.fit(&data), Err(Error::MissingColumn(_))));
    }
}
