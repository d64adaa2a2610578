//! Provides [`Estimator`] and [`Transformer`] traits.
use polars::prelude::DataFrame;
use serde::{Serialize, Deserialize};

use crate::Result;


/// A fitted stage that maps a frame to a new frame.
pub trait Transformer {
    /// Transform `data`.
    fn transform(&self, data: &DataFrame) -> Result<DataFrame>;
}


/// A stage that learns a [`Transformer`] from a frame.
pub trait Estimator {
    /// The fitted stage.
    type Transformer: Transformer;


    /// Learn a transformer from `data`.
    fn fit(&self, data: &DataFrame) -> Result<Self::Transformer>;


    /// Learn a transformer from `data` and apply it to `data`.
    fn fit_transform(&self, data: &DataFrame)
        -> Result<(Self::Transformer, DataFrame)>
    {
        let transformer = self.fit(data)?;
        let transformed = transformer.transform(data)?;
        Ok((transformer, transformed))
    }


    /// Chain `next` after `self`.
    fn append<E>(self, next: E) -> EstimatorChain<Self, E>
        where Self: Sized,
              E: Estimator,
    {
        EstimatorChain { first: self, second: next }
    }
}


/// Two estimators applied one after another.
#[derive(Debug, Clone)]
pub struct EstimatorChain<A, B> {
    first: A,
    second: B,
}


impl<A, B> Estimator for EstimatorChain<A, B>
    where A: Estimator,
          B: Estimator,
{
    type Transformer = TransformerChain<A::Transformer, B::Transformer>;

    fn fit(&self, data: &DataFrame) -> Result<Self::Transformer> {
        let (first, data) = self.first.fit_transform(data)?;
        let second = self.second.fit(&data)?;
        Ok(TransformerChain { first, second })
    }


    fn fit_transform(&self, data: &DataFrame)
        -> Result<(Self::Transformer, DataFrame)>
    {
        let (first, data) = self.first.fit_transform(data)?;
        let (second, data) = self.second.fit_transform(&data)?;
        Ok((TransformerChain { first, second }, data))
    }
}


/// Two fitted transformers applied one after another.
/// You can read/write this struct by `serde` traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerChain<A, B> {
    /// The stage applied first.
    pub first: A,
    /// The stage applied to the output of `first`.
    pub second: B,
}


impl<A, B> TransformerChain<A, B> {
    /// Returns the last stage of this chain.
    pub fn last(&self) -> &B {
        &self.second
    }
}


impl<A, B> Transformer for TransformerChain<A, B>
    where A: Transformer,
          B: Transformer,
{
    fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        let data = self.first.transform(data)?;
        self.second.transform(&data)
    }
}
