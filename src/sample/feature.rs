use std::ops::Index;

use crate::constants::BUFFER_SIZE;


/// A named dense column of feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    vals: Vec<f64>,
}


impl Feature {
    /// Construct an empty feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            vals: Vec::with_capacity(BUFFER_SIZE),
        }
    }


    /// Construct a feature from its values.
    pub fn from_vals<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), vals, }
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the values of this feature.
    pub fn vals(&self) -> &[f64] {
        &self.vals[..]
    }


    /// Append an example to this feature.
    pub fn append(&mut self, x: f64) {
        self.vals.push(x);
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        self.vals.len()
    }


    /// Returns `true` if this feature has no items.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }


    /// Returns the minimum and maximum value of this feature.
    /// `NaN`s are ignored.
    /// Returns `None` if the feature has no other value.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.vals.iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }


    /// Returns the number of distinct non-`NaN` values in this feature.
    pub fn distinct_value_count(&self) -> usize {
        let mut values = self.vals.iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values.len()
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.vals[idx]
    }
}
