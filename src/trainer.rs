//! Trainers that turn a feature vector column into a fitted predictor.

pub mod options;
pub mod fasttree_binary;


pub use options::FastTreeBinaryOptions;
pub use fasttree_binary::{
    FastTreeBinaryTrainer,
    BinaryPredictionTransformer,
};
