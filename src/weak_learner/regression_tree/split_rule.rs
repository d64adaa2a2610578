//! This file defines split rules for regression tree.
use serde::{Serialize, Deserialize};

use crate::Sample;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    Left,
    Right,
}


/// A threshold rule on a single feature.
/// `NaN` values go to the left child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    pub feature: String,
    pub threshold: f64,
}


impl Splitter {
    #[inline]
    pub fn new(name: &str, threshold: f64) -> Self {
        let feature = name.to_string();
        Self {
            feature,
            threshold
        }
    }


    /// Defines the splitting.
    #[inline]
    pub fn split(&self, sample: &Sample, row: usize) -> LeftRight {
        let value = sample[&self.feature][row];
        self.split_value(value)
    }


    #[inline]
    pub fn split_value(&self, value: f64) -> LeftRight {
        if value >= self.threshold { LeftRight::Right } else { LeftRight::Left }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_goes_left() {
        let rule = Splitter::new("Gender.Male", 0.5);
        assert_eq!(rule.split_value(f64::NAN), LeftRight::Left);
        assert_eq!(rule.split_value(0.0), LeftRight::Left);
        assert_eq!(rule.split_value(0.5), LeftRight::Right);
        assert_eq!(rule.split_value(1.0), LeftRight::Right);
    }
}
