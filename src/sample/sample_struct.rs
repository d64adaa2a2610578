use std::collections::HashMap;
use std::ops::Index;

use crate::{Error, Result};
use super::feature::Feature;


/// Struct `Sample` holds a batch sample in dense format.
/// The features are stored column by column,
/// and the target values are stored in a separate vector.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a new `Sample` from feature columns and a target vector.
    /// Every feature must have the same length as `target`.
    pub fn from_features(features: Vec<Feature>, target: Vec<f64>)
        -> Result<Self>
    {
        let n_sample = target.len();
        if let Some(feat) = features.iter().find(|f| f.len() != n_sample) {
            return Err(Error::InvalidOption(format!(
                "feature `{}` has {} rows, but the target has {n_sample}",
                feat.name(),
                feat.len(),
            )));
        }

        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(Self { name_to_index, features, target, n_sample, n_feature, })
    }


    /// Returns the slice of target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature names in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter()
            .map(|feat| feat.name())
            .collect()
    }


    /// Returns the pair of the number of examples and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>();
        let y = self.target[idx];

        (x, y)
    }


    /// Returns the feature named `name`, if any.
    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Check whether `self` is
    /// a training set for binary classification or not.
    /// That is, every target value is `+1` or `-1`,
    /// and both of them appear.
    pub fn is_valid_binary_instance(&self) -> bool {
        if self.target.len() != self.n_sample { return false; }

        let all_pm = self.target.iter()
            .all(|&y| y == 1.0 || y == -1.0);
        let has_pos = self.target.iter().any(|&y| y > 0.0);
        let has_neg = self.target.iter().any(|&y| y < 0.0);

        all_pm && has_pos && has_neg
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn toy_sample(target: Vec<f64>) -> Sample {
        let x = Feature::from_vals("x", vec![0.1, -8.0, 3.0, -0.001]);
        let z = Feature::from_vals("z", vec![0.2, 2.0, -9.0, 0.0]);
        Sample::from_features(vec![x, z], target).unwrap()
    }

    #[test]
    fn shape_and_lookup() {
        let sample = toy_sample(vec![1.0, -1.0, 1.0, -1.0]);
        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample["z"][2], -9.0);
        assert_eq!(sample.at(1), (vec![-8.0, 2.0], -1.0));
        assert_eq!(sample.feature_names(), vec!["x", "z"]);
        assert!(sample.get("w").is_none());
    }

    #[test]
    fn binary_instance() {
        assert!(toy_sample(vec![1.0, -1.0, 1.0, -1.0]).is_valid_binary_instance());
        assert!(!toy_sample(vec![1.0, 1.0, 1.0, 1.0]).is_valid_binary_instance());
        assert!(!toy_sample(vec![1.0, 0.0, 1.0, -1.0]).is_valid_binary_instance());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let x = Feature::from_vals("x", vec![0.1, 0.2]);
        let err = Sample::from_features(vec![x], vec![1.0]);
        assert!(err.is_err());
    }
}
