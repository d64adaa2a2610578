//! Provides `WeakLearner` trait.
use crate::Sample;


/// An interface for weak learners.
/// A weak learner receives the training sample and the current
/// predictions of the combined hypothesis,
/// and returns a hypothesis that improves them.
pub trait WeakLearner {
    /// The hypothesis produced by this weak learner.
    type Hypothesis;


    /// Returns the name of this weak learner.
    fn name(&self) -> &str;


    /// Returns the information of this weak learner.
    /// [`Logger`](crate::Logger) prints it in the stats block.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Produce a hypothesis for the given predictions on `sample`.
    fn produce(&self, sample: &Sample, predictions: &[f64])
        -> Self::Hypothesis;
}
