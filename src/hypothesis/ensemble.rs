use serde::{Serialize, Deserialize};

use crate::{
    Classifier,
    Regressor,
    RegressionTreeRegressor,
    Sample,
};


/// An additive model `Σ w_t h_t(x)`.
/// [`FastTree`](crate::FastTree) returns this struct.
/// You can read/write this struct by `Serde` trait.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreeEnsemble<H = RegressionTreeRegressor> {
    /// Weights on each hypothesis in `self.hypotheses`.
    pub weights: Vec<f64>,
    /// Set of hypotheses.
    pub hypotheses: Vec<H>,
}


impl<H> TreeEnsemble<H> {
    /// Construct an empty ensemble. It predicts `0` everywhere.
    pub fn new() -> Self {
        Self { weights: Vec::new(), hypotheses: Vec::new() }
    }


    /// Append a pair `(weight, H)` to the current ensemble.
    #[inline]
    pub fn push(&mut self, weight: f64, hypothesis: H) {
        self.weights.push(weight);
        self.hypotheses.push(hypothesis);
    }


    /// Returns the number of hypotheses.
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }


    /// Returns `true` if the ensemble has no hypothesis.
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }


    /// Decompose the ensemble
    /// into the two vectors `Vec<f64>` and `Vec<H>`
    #[inline]
    pub fn decompose(self) -> (Vec<f64>, Vec<H>) {
        (self.weights, self.hypotheses)
    }
}


impl<H> Default for TreeEnsemble<H> {
    fn default() -> Self {
        Self::new()
    }
}


impl<H> Regressor for TreeEnsemble<H>
    where H: Regressor,
{
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.weights.iter()
            .zip(&self.hypotheses[..])
            .map(|(w, h)| *w * h.predict(sample, row))
            .sum::<f64>()
    }
}


impl<H> Classifier for TreeEnsemble<H>
    where H: Regressor,
{
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        Regressor::predict(self, sample, row)
    }
}
