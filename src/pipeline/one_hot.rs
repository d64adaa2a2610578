//! One-hot encoding of categorical columns.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use std::collections::{HashMap, HashSet};

use crate::{
    constants::{DEFAULT_MAX_KEYS, SLOT_SEPARATOR},
    data::column,
    Error,
    Result,
};
use super::core::{Estimator, Transformer};


/// How an encoded column is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    /// One `0/1` slot per category.
    Indicator,
    /// A single scalar column holding the 1-based category index,
    /// `0` for unknown values.
    Key,
    /// The 1-based category index written in binary,
    /// one slot per bit (least significant first).
    Binary,
}


/// Learns a vocabulary for each input column.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
///
/// let encoder = OneHotEncoder::new(["Gender", "MaritalStatus"])
///     .output_kind(OutputKind::Indicator);
/// ```
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<(String, String)>,
    output_kind: OutputKind,
    max_keys: usize,
}


impl OneHotEncoder {
    /// Encode each column in place.
    pub fn new<I, S>(columns: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let columns = columns.into_iter()
            .map(|c| (c.as_ref().to_string(), c.as_ref().to_string()))
            .collect();
        Self::from_pairs(columns)
    }


    /// Encode `input` into `output` for each `(input, output)` pair.
    /// If `input == output`, the input column is replaced.
    pub fn with_pairs<I, S, T>(pairs: I) -> Self
        where I: IntoIterator<Item = (S, T)>,
              S: AsRef<str>,
              T: AsRef<str>,
    {
        let columns = pairs.into_iter()
            .map(|(i, o)| (i.as_ref().to_string(), o.as_ref().to_string()))
            .collect();
        Self::from_pairs(columns)
    }


    fn from_pairs(columns: Vec<(String, String)>) -> Self {
        Self {
            columns,
            output_kind: OutputKind::Indicator,
            max_keys: DEFAULT_MAX_KEYS,
        }
    }


    /// Set the output layout. Default is [`OutputKind::Indicator`].
    pub fn output_kind(mut self, kind: OutputKind) -> Self {
        self.output_kind = kind;
        self
    }


    /// Set the maximum number of categories kept per column.
    /// Categories beyond this cap are treated as unknown.
    pub fn max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }
}


impl Estimator for OneHotEncoder {
    type Transformer = OneHotTransformer;

    fn fit(&self, data: &DataFrame) -> Result<OneHotTransformer> {
        if self.max_keys == 0 {
            return Err(Error::InvalidOption(
                "`max_keys` must be positive".into()
            ));
        }

        let columns = self.columns.iter()
            .map(|(input, output)| {
                let keys = vocabulary(
                    column::keys(data, input)?, self.max_keys
                );
                Ok(Vocabulary {
                    input: input.clone(),
                    output: output.clone(),
                    keys,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(OneHotTransformer { output_kind: self.output_kind, columns })
    }
}


/// Collects the distinct keys in the order of their first occurrence.
fn vocabulary(values: Vec<Option<String>>, max_keys: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for value in values.into_iter().flatten() {
        if keys.len() >= max_keys { break; }
        if seen.insert(value.clone()) {
            keys.push(value);
        }
    }
    keys
}


/// The categories learned for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    input: String,
    output: String,
    keys: Vec<String>,
}


impl Vocabulary {
    /// Returns the categories in slot order.
    pub fn keys(&self) -> &[String] {
        &self.keys[..]
    }


    /// Returns the 1-based index of each value, `0` for unknown.
    fn key_indices(&self, data: &DataFrame) -> Result<Vec<usize>> {
        let lookup = self.keys.iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i + 1))
            .collect::<HashMap<_, _>>();

        let indices = column::keys(data, &self.input)?
            .into_iter()
            .map(|v| {
                v.and_then(|k| lookup.get(k.as_str()).copied())
                    .unwrap_or(0)
            })
            .collect();
        Ok(indices)
    }


    fn slot_name<T: std::fmt::Display>(&self, slot: T) -> String {
        format!("{}{SLOT_SEPARATOR}{slot}", self.output)
    }


    fn encode(&self, data: &DataFrame, kind: OutputKind)
        -> Result<Vec<Series>>
    {
        let indices = self.key_indices(data)?;

        let series = match kind {
            OutputKind::Indicator => {
                self.keys.iter()
                    .enumerate()
                    .map(|(k, key)| {
                        let vals = indices.iter()
                            .map(|&ix| if ix == k + 1 { 1f64 } else { 0f64 })
                            .collect::<Vec<_>>();
                        Series::new(&self.slot_name(key), vals)
                    })
                    .collect()
            },
            OutputKind::Key => {
                let vals = indices.iter()
                    .map(|&ix| ix as f64)
                    .collect::<Vec<_>>();
                vec![Series::new(&self.output, vals)]
            },
            OutputKind::Binary => {
                let n_bits = usize::BITS - self.keys.len().leading_zeros();
                (0..n_bits.max(1))
                    .map(|bit| {
                        let vals = indices.iter()
                            .map(|&ix| ((ix >> bit) & 1) as f64)
                            .collect::<Vec<_>>();
                        Series::new(&self.slot_name(bit), vals)
                    })
                    .collect()
            },
        };
        Ok(series)
    }
}


/// A fitted one-hot encoder.
/// You can read/write this struct by `serde` traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotTransformer {
    output_kind: OutputKind,
    columns: Vec<Vocabulary>,
}


impl OneHotTransformer {
    /// Returns the vocabulary learned for `output`.
    pub fn vocabulary(&self, output: &str) -> Option<&Vocabulary> {
        self.columns.iter()
            .find(|v| v.output == output)
    }
}


impl Transformer for OneHotTransformer {
    fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        let mut encoded = Vec::with_capacity(self.columns.len());
        for vocab in self.columns.iter() {
            encoded.push(vocab.encode(data, self.output_kind)?);
        }

        let mut data = data.clone();
        for (vocab, series) in self.columns.iter().zip(encoded) {
            if data.column(&vocab.output).is_ok() {
                data = data.drop(&vocab.output)?;
            }
            data.hstack_mut(&series[..])?;
        }
        Ok(data)
    }
}
