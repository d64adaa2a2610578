use polars::prelude::DataFrame;

use std::marker::PhantomData;

use crate::{
    constants::*,
    data::column,
    pipeline::{Concatenate, OneHotTransformer, Transformer, TransformerChain},
    BinaryPredictionTransformer,
    Error,
    Record,
    Result,
};


/// The fitted purchase pipeline:
/// one-hot encoding, concatenation and the calibrated tree ensemble.
pub type PipelineModel = TransformerChain<
    TransformerChain<OneHotTransformer, Concatenate>,
    BinaryPredictionTransformer,
>;


/// The outcome of scoring a single record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// `true` if the record is predicted positive.
    pub predicted_label: bool,
    /// Calibrated probability of the positive class.
    pub probability: f64,
    /// Raw score of the ensemble.
    pub score: f64,
}


/// Scores records of type `R` one at a time with a fitted model.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
///
/// let (model, _schema): (PipelineModel, _) = fastboosts::load("model.json")
///     .unwrap();
/// let engine = PredictionEngine::<Customer>::new(model);
/// let customer = Customer::new(35.0, "Male", 50_000.0, "Single");
/// let prediction = engine.predict(&customer).unwrap();
/// println!("Prediction: {}", prediction.predicted_label);
/// ```
pub struct PredictionEngine<R, T = PipelineModel> {
    model: T,
    _record: PhantomData<fn(&R)>,
}


impl<R, T> PredictionEngine<R, T>
    where R: Record,
          T: Transformer,
{
    /// Construct an engine that owns `model`.
    pub fn new(model: T) -> Self {
        Self { model, _record: PhantomData }
    }


    /// Returns the wrapped model.
    pub fn model(&self) -> &T {
        &self.model
    }


    /// Score a single record.
    pub fn predict(&self, record: &R) -> Result<Prediction> {
        self.predict_all(std::slice::from_ref(record))?
            .pop()
            .ok_or(Error::EmptyData)
    }


    /// Score every record in `records`.
    pub fn predict_all(&self, records: &[R]) -> Result<Vec<Prediction>> {
        let data = R::to_frame(records)?;
        let scored = self.model.transform(&data)?;
        predictions(&scored)
    }
}


fn predictions(scored: &DataFrame) -> Result<Vec<Prediction>> {
    let scores = column::dense(scored, SCORE_COLUMN)?;
    let probabilities = column::dense(scored, PROBABILITY_COLUMN)?;
    let labels = column::labels(scored, PREDICTED_LABEL_COLUMN)?;

    let predictions = scores.into_iter()
        .zip(probabilities)
        .zip(labels)
        .map(|((score, probability), predicted_label)| {
            Prediction { predicted_label, probability, score }
        })
        .collect();
    Ok(predictions)
}


#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use crate::Customer;

    /// Scores a customer by the sign of `Age - 30`.
    struct AgeRule;

    impl Transformer for AgeRule {
        fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
            let scores = data.column("Age")?.f64()?
                .into_no_null_iter()
                .map(|age| age - 30.0)
                .collect::<Vec<_>>();
            let probability = scores.iter()
                .map(|&s| if s > 0.0 { 0.9 } else { 0.1 })
                .collect::<Vec<_>>();
            let label = scores.iter()
                .map(|&s| s > 0.0)
                .collect::<Vec<_>>();

            let mut data = data.clone();
            data.with_column(Series::new(SCORE_COLUMN, scores))?;
            data.with_column(Series::new(PROBABILITY_COLUMN, probability))?;
            data.with_column(Series::new(PREDICTED_LABEL_COLUMN, label))?;
            Ok(data)
        }
    }

    #[test]
    fn predicts_one_record_at_a_time() {
        let engine = PredictionEngine::<Customer, _>::new(AgeRule);

        let old = Customer::new(35.0, "Male", 50_000.0, "Single");
        let young = Customer::new(20.0, "Female", 20_000.0, "Married");

        let p = engine.predict(&old).unwrap();
        assert_eq!(p, Prediction { predicted_label: true, probability: 0.9, score: 5.0 });

        let p = engine.predict(&young).unwrap();
        assert!(!p.predicted_label);
        assert_eq!(p.score, -10.0);
    }

    #[test]
    fn predicts_in_record_order() {
        let engine = PredictionEngine::<Customer, _>::new(AgeRule);
        let customers = [
            Customer::new(40.0, "Male", 1.0, "Single"),
            Customer::new(10.0, "Male", 1.0, "Single"),
        ];
        let labels = engine.predict_all(&customers).unwrap()
            .into_iter()
            .map(|p| p.predicted_label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec![true, false]);
    }
}
