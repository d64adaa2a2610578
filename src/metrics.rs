//! Evaluation metrics of scored frames.

pub mod binary;


pub use binary::{
    BinaryClassificationMetrics,
    ConfusionMatrix,
};
