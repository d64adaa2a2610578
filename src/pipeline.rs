//! Estimators and transformers over `DataFrame`s.
//!
//! An [`Estimator`] learns from a frame and returns a [`Transformer`].
//! Estimators are chained with [`Estimator::append`];
//! fitting a chain fits each stage on the output of the previous one.
//!
//! A vector-valued column `V` is stored as the run of `Float64` columns
//! named `V.<slot>`, e.g. the one-hot encoding of `Gender` is
//! `Gender.Male`, `Gender.Female`.

pub mod core;
pub mod one_hot;
pub mod concat;


pub use self::core::{
    Estimator,
    Transformer,
    EstimatorChain,
    TransformerChain,
};
pub use one_hot::{
    OneHotEncoder,
    OneHotTransformer,
    OutputKind,
};
pub use concat::Concatenate;
