/// This file defines the regression tree producer.
pub mod rtree;
/// This file defines the regression tree regressor.
pub mod regressor;

/// Regression Tree builder.
pub mod builder;


pub(crate) mod bin;
pub(crate) mod split_rule;

mod node;


pub use rtree::RegressionTree;
pub use regressor::RegressionTreeRegressor;
pub use builder::RegressionTreeBuilder;
