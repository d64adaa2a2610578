//! Provides [`FastTree`], gradient boosting with Newton steps.
use rayon::prelude::*;

use crate::{
    constants::{DEFAULT_NUMBER_OF_TREES, DEFAULT_LEARNING_RATE},
    Sample,
    Booster,
    WeakLearner,
    Regressor,
    TreeEnsemble,
};
use super::{
    core::CurrentHypothesis,
    loss::{LossFunction, LogisticLoss},
};

use std::ops::ControlFlow;


/// Gradient boosting of regression trees for binary classification.
///
/// `FastTree` starts from the constant score `0`.
/// In each round, the weak learner fits a tree to the gradient and
/// hessian of the loss at the current scores,
/// and `FastTree` adds the tree shrunk by `learning_rate`.
/// It stops after `n_trees` rounds,
/// or as soon as the weak learner returns a tree that predicts `0`
/// on every training example.
///
/// The labels of `sample` must be `+1` or `-1`.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
/// # let sample: Sample = todo!();
///
/// let mut booster = FastTree::init(&sample)
///     .n_trees(4)
///     .learning_rate(0.1);
///
/// let weak_learner = RegressionTreeBuilder::new(&sample)
///     .max_leaves(4)
///     .min_leaf_examples(20)
///     .build();
///
/// let f = booster.run(&weak_learner);
/// let scores = Regressor::predict_all(&f, &sample);
/// ```
pub struct FastTree<'a, H, L> {
    // Training data
    sample: &'a Sample,

    n_trees: usize,
    learning_rate: f64,

    // Some struct that implements `LossFunction` trait
    loss: L,

    ensemble: TreeEnsemble<H>,

    // Terminated iteration.
    terminated: usize,

    // The scores of the training examples at the current round.
    predictions: Vec<f64>,
}


impl<'a, H> FastTree<'a, H, LogisticLoss> {
    /// Initialize the `FastTree`.
    /// By default, `FastTree` minimizes [`LogisticLoss`] with
    /// ```text
    /// n_trees: DEFAULT_NUMBER_OF_TREES == 4,
    /// learning_rate: DEFAULT_LEARNING_RATE == 0.1,
    /// ```
    pub fn init(sample: &'a Sample) -> Self {
        let n_sample = sample.shape().0;

        Self {
            sample,
            n_trees: DEFAULT_NUMBER_OF_TREES,
            learning_rate: DEFAULT_LEARNING_RATE,
            loss: LogisticLoss,
            ensemble: TreeEnsemble::new(),
            terminated: usize::MAX,
            predictions: vec![0.0; n_sample],
        }
    }
}


impl<'a, H, L> FastTree<'a, H, L> {
    /// Set the number of boosting rounds.
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        assert!(n_trees > 0);
        self.n_trees = n_trees;
        self
    }


    /// Set the shrinkage applied to each tree.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        assert!(learning_rate > 0.0);
        self.learning_rate = learning_rate;
        self
    }


    /// Set the loss function.
    pub fn loss<M>(self, loss: M) -> FastTree<'a, H, M> {
        FastTree {
            sample: self.sample,
            n_trees: self.n_trees,
            learning_rate: self.learning_rate,
            loss,
            ensemble: self.ensemble,
            terminated: self.terminated,
            predictions: self.predictions,
        }
    }


    /// Returns the round at which boosting stopped.
    pub fn terminated(&self) -> usize {
        self.terminated
    }


    /// Returns the scores of the training examples.
    pub fn predictions(&self) -> &[f64] {
        &self.predictions[..]
    }
}


impl<H, L> Booster<H> for FastTree<'_, H, L>
    where H: Regressor + Clone,
          L: LossFunction,
{
    type Output = TreeEnsemble<H>;


    fn name(&self) -> &str {
        "FastTree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.sample.shape();
        let info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("# of trees", format!("{}", self.n_trees)),
            ("Learning rate", format!("{}", self.learning_rate)),
            ("Loss", self.loss.name().to_string()),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) {
        let n_sample = self.sample.shape().0;

        self.ensemble = TreeEnsemble::new();
        self.terminated = self.n_trees;
        self.predictions = vec![0.0; n_sample];
    }


    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> ControlFlow<usize>
        where W: WeakLearner<Hypothesis = H>,
    {
        if self.n_trees < iteration {
            return ControlFlow::Break(self.n_trees);
        }

        // Get a new hypothesis
        let h = weak_learner.produce(self.sample, &self.predictions[..]);
        let predictions = h.predict_all(self.sample);

        // A tree that predicts zero everywhere does nothing.
        if predictions.iter().all(|&p| p == 0.0) {
            self.terminated = iteration;
            return ControlFlow::Break(iteration);
        }

        let coef = self.learning_rate;
        self.ensemble.push(coef, h);

        self.predictions.par_iter_mut()
            .zip(predictions)
            .for_each(|(p, q)| { *p += coef * q; });

        if iteration >= self.n_trees {
            self.terminated = iteration;
            return ControlFlow::Break(iteration);
        }
        ControlFlow::Continue(())
    }


    fn postprocess(&mut self) -> Self::Output {
        std::mem::take(&mut self.ensemble)
    }
}


impl<H, L> CurrentHypothesis for FastTree<'_, H, L>
    where H: Clone,
{
    type Output = TreeEnsemble<H>;

    fn current_hypothesis(&self) -> Self::Output {
        self.ensemble.clone()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Feature, RegressionTreeBuilder};

    fn step_sample() -> Sample {
        let x = (0..60).map(|i| i as f64).collect::<Vec<_>>();
        let y = (0..60)
            .map(|i| if i >= 30 { 1.0 } else { -1.0 })
            .collect::<Vec<_>>();
        Sample::from_features(vec![Feature::from_vals("x", x)], y).unwrap()
    }

    #[test]
    fn loss_decreases_every_round() {
        let sample = step_sample();
        let weak_learner = RegressionTreeBuilder::new(&sample)
            .min_leaf_examples(5)
            .build();
        let mut booster = FastTree::init(&sample)
            .n_trees(4)
            .learning_rate(0.1);

        booster.preprocess();
        let mut losses = vec![LogisticLoss.eval(booster.predictions(), sample.target())];
        for iter in 1.. {
            let flow = booster.boost(&weak_learner, iter);
            losses.push(LogisticLoss.eval(booster.predictions(), sample.target()));
            if flow.is_break() { break; }
        }
        let f = booster.postprocess();

        assert_eq!(f.len(), 4);
        assert!(losses.windows(2).all(|w| w[1] < w[0]));
        assert!(Regressor::predict(&f, &sample, 0) < 0.0);
        assert!(Regressor::predict(&f, &sample, 59) > 0.0);
    }

    #[test]
    fn stops_when_a_tree_predicts_zero() {
        let sample = step_sample();
        // No split is admissible and the gradients cancel out,
        // so the first tree is a single leaf with value 0.
        let weak_learner = RegressionTreeBuilder::new(&sample)
            .min_leaf_examples(31)
            .build();
        let mut booster = FastTree::init(&sample).n_trees(10);
        let f = booster.run(&weak_learner);

        assert!(f.is_empty());
        assert_eq!(booster.terminated(), 1);
    }
}
