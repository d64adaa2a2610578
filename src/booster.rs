//! Provides the [`Booster`] trait and the [`FastTree`] booster.

mod core;
mod loss;
mod fasttree;


/// Booster trait
pub use self::core::{Booster, CurrentHypothesis};

pub use self::loss::{LossFunction, LogisticLoss};

pub use self::fasttree::FastTree;
