use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    constants::SLOT_SEPARATOR,
    data::column,
    Error,
    Result,
};
use super::core::{Estimator, Transformer};


/// Copies scalar columns and vector columns into one vector column.
///
/// An input `x` names either the scalar column `x`
/// or the run of slot columns `x.*`.
/// The slots are written as `<output>.<slot>` in input order,
/// where `<slot>` is the source column name.
/// The input columns are kept.
///
/// `Concatenate` has nothing to learn,
/// so it is its own [`Estimator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concatenate {
    output: String,
    inputs: Vec<String>,
}


impl Concatenate {
    /// Construct a new instance of [`Concatenate`].
    pub fn new<T, I, S>(output: T, inputs: I) -> Self
        where T: ToString,
              I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let inputs = inputs.into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        Self { output: output.to_string(), inputs }
    }


    /// Returns the name of the output vector column.
    pub fn output(&self) -> &str {
        &self.output
    }


    /// Resolves each input to its source columns.
    fn sources<'a>(&self, data: &'a DataFrame) -> Result<Vec<&'a str>> {
        let mut sources = Vec::new();
        for input in self.inputs.iter() {
            if let Ok(series) = data.column(input) {
                sources.push(series.name());
                continue;
            }

            let slots = column::slots(data, input);
            if slots.is_empty() {
                return Err(Error::MissingColumn(input.clone()));
            }
            sources.extend(slots);
        }
        Ok(sources)
    }
}


impl Transformer for Concatenate {
    fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        let series = self.sources(data)?
            .into_iter()
            .map(|name| {
                let vals = column::numeric(data, name)?
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect::<Vec<_>>();
                let slot = format!("{}{SLOT_SEPARATOR}{name}", self.output);
                Ok(Series::new(&slot, vals))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut data = data.clone();
        for s in series {
            data.with_column(s)?;
        }
        Ok(data)
    }
}


impl Estimator for Concatenate {
    type Transformer = Self;

    fn fit(&self, _data: &DataFrame) -> Result<Self> {
        Ok(self.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_input_order() {
        let data = df!(
            "Gender.Male" => &[1.0f64, 0.0],
            "Gender.Female" => &[0.0f64, 1.0],
            "Income" => &[50_000.0f64, 64_000.0],
        ).unwrap();
        let out = Concatenate::new("Features", ["Income", "Gender"])
            .transform(&data)
            .unwrap();

        assert_eq!(
            column::slots(&out, "Features"),
            vec![
                "Features.Income",
                "Features.Gender.Male",
                "Features.Gender.Female",
            ]
        );
        assert_eq!(
            column::dense(&out, "Features.Income").unwrap(),
            vec![50_000.0, 64_000.0]
        );
        assert!(out.column("Income").is_ok());
    }

    #[test]
    fn unknown_input_is_an_error() {
        let data = df!("Age" => &[1.0f64]).unwrap();
        let res = Concatenate::new("Features", ["Age", "Income"])
            .transform(&data);
        assert!(matches!(res, Err(Error::MissingColumn(c)) if c == "Income"));
    }

    #[test]
    fn nulls_become_nan() {
        let data = df!("Age" => &[Some(1.0f64), None]).unwrap();
        let out = Concatenate::new("Features", ["Age"])
            .transform(&data)
            .unwrap();
        let vals = column::numeric(&out, "Features.Age").unwrap();
        assert_eq!(vals[0], Some(1.0));
        assert!(vals[1].map_or(true, f64::is_nan));
    }
}
