//! Persistence of fitted pipelines and single-record prediction.

pub mod io;
pub mod engine;


pub use io::{save, load};
pub use engine::{
    PipelineModel,
    PredictionEngine,
    Prediction,
};
