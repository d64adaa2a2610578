//! Struct `Sample` represents a batch sample.
//!
//! A [`Sample`] is the numeric view of a data set that the tree learner
//! consumes: a column-major matrix of named [`Feature`]s and a target vector.

pub mod feature;
pub mod sample_struct;


pub use sample_struct::Sample;
pub use feature::Feature;
