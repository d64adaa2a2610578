//! Column types of the raw data.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{Error, Result};
use super::column;


/// The logical type of a raw column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Real-valued column, stored as `Float64`.
    Numeric,
    /// Free text or category names, stored as `Utf8`.
    Text,
    /// `true` / `false`, stored as `Boolean`.
    Boolean,
}


impl ColumnType {
    /// Returns the `ColumnType` that holds values of `dtype`.
    /// Types other than numbers and booleans are treated as text.
    pub fn of(dtype: &DataType) -> Self {
        if dtype.is_numeric() {
            Self::Numeric
        } else if *dtype == DataType::Boolean {
            Self::Boolean
        } else {
            Self::Text
        }
    }


    /// Cast `series` to this type.
    pub(crate) fn cast(&self, df: &DataFrame, name: &str) -> Result<Series> {
        let series = column::column(df, name)?;
        let series = match self {
            Self::Numeric => match series.dtype() {
                DataType::Utf8 => series.cast(&DataType::Float64)?,
                _ => Series::new(name, column::numeric(df, name)?),
            },
            Self::Text => series.cast(&DataType::Utf8)?,
            Self::Boolean => {
                let values = column::booleans(df, name)?;
                Series::new(name, values)
            },
        };
        Ok(series)
    }
}


impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Numeric => "Numeric",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
        };
        write!(f, "{name}")
    }
}


/// An ordered list of named, typed columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<(String, ColumnType)>,
}


impl Schema {
    /// Construct an empty schema.
    pub fn new() -> Self {
        Self::default()
    }


    /// Append a column to this schema.
    pub fn with_column<T: ToString>(mut self, name: T, ty: ColumnType)
        -> Self
    {
        self.columns.push((name.to_string(), ty));
        self
    }


    /// Returns the schema of `df`.
    pub fn of(df: &DataFrame) -> Self {
        let columns = df.get_columns()
            .iter()
            .map(|s| (s.name().to_string(), ColumnType::of(s.dtype())))
            .collect();
        Self { columns }
    }


    /// Returns the columns of this schema.
    pub fn columns(&self) -> &[(String, ColumnType)] {
        &self.columns[..]
    }


    /// Returns the type of the column named `name`.
    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.columns.iter()
            .find(|(n, _)| n == name)
            .map(|(_, ty)| *ty)
    }


    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }


    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }


    /// Cast the columns of `df` to the types declared in `self`.
    /// Columns not mentioned in `self` are left untouched.
    pub fn apply(&self, mut df: DataFrame) -> Result<DataFrame> {
        for (name, ty) in self.columns.iter() {
            if df.column(name).is_err() {
                return Err(Error::MissingColumn(name.to_string()));
            }
            let series = ty.cast(&df, name)?;
            df.with_column(series)?;
        }
        Ok(df)
    }
}


impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.columns.iter()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{line}}}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_of_frame() {
        let df = df!(
            "Age" => &[35i64, 40],
            "Gender" => &["Male", "Female"],
            "Purchase" => &[true, false],
        ).unwrap();
        let schema = Schema::of(&df);
        assert_eq!(schema.get("Age"), Some(ColumnType::Numeric));
        assert_eq!(schema.get("Gender"), Some(ColumnType::Text));
        assert_eq!(schema.get("Purchase"), Some(ColumnType::Boolean));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn apply_casts_declared_columns() {
        let df = df!(
            "Age" => &[35i64, 40],
            "Purchase" => &["yes", "no"],
        ).unwrap();
        let schema = Schema::new()
            .with_column("Age", ColumnType::Numeric)
            .with_column("Purchase", ColumnType::Boolean);
        let df = schema.apply(df).unwrap();
        assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Purchase").unwrap().dtype(), &DataType::Boolean);
    }

    #[test]
    fn apply_rejects_missing_column() {
        let df = df!("Age" => &[35.0f64]).unwrap();
        let schema = Schema::new().with_column("Income", ColumnType::Numeric);
        assert!(matches!(schema.apply(df), Err(Error::MissingColumn(_))));
    }
}
