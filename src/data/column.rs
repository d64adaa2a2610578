//! Typed access to the columns of a `DataFrame`.
use polars::prelude::*;

use crate::{
    constants::SLOT_SEPARATOR,
    Error,
    Feature,
    Result,
};


/// Returns the column named `name`, or `Error::MissingColumn`.
pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map_err(|_| Error::MissingColumn(name.to_string()))
}


/// Reads a numeric column as `f64` values. Nulls are kept as `None`.
pub(crate) fn numeric(df: &DataFrame, name: &str)
    -> Result<Vec<Option<f64>>>
{
    let series = column(df, name)?;
    let dtype = series.dtype();
    if !dtype.is_numeric() && *dtype != DataType::Boolean {
        return Err(Error::ColumnType {
            name: name.to_string(),
            found: format!("{dtype}"),
            expected: "numeric",
        });
    }
    let series = series.cast(&DataType::Float64)?;
    let values = series.f64()?
        .into_iter()
        .collect::<Vec<_>>();
    Ok(values)
}


/// Reads a numeric column that must not contain nulls.
pub(crate) fn dense(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    numeric(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| Error::InvalidOption(
                format!("column `{name}` has a null value at row {row}")
            ))
        })
        .collect()
}


/// Reads any scalar column as category keys.
/// Numbers are keyed by the shortest textual form of their `f32` value,
/// so `35.0` and `35` share the key `"35"`, and a value read from text
/// shares its key with the same value stored as `f32` by a [`Record`].
///
/// [`Record`]: crate::Record
pub(crate) fn keys(df: &DataFrame, name: &str)
    -> Result<Vec<Option<String>>>
{
    let series = column(df, name)?;
    let keys = match series.dtype() {
        DataType::Utf8 => {
            series.utf8()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect()
        },
        DataType::Boolean => {
            series.bool()?
                .into_iter()
                .map(|v| v.map(|b| b.to_string()))
                .collect()
        },
        dtype if dtype.is_numeric() => {
            series.cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| {
                    v.filter(|x| !x.is_nan())
                        .map(|x| format!("{}", x as f32))
                })
                .collect()
        },
        dtype => {
            return Err(Error::ColumnType {
                name: name.to_string(),
                found: format!("{dtype}"),
                expected: "text, boolean or numeric",
            });
        },
    };
    Ok(keys)
}


/// Returns the names of the slot columns `<vector>.<slot>` in frame order.
pub(crate) fn slots<'a>(df: &'a DataFrame, vector: &str) -> Vec<&'a str> {
    let prefix = format!("{vector}{SLOT_SEPARATOR}");
    df.get_column_names()
        .into_iter()
        .filter(|name| name.starts_with(&prefix))
        .collect()
}


/// Returns the slot names of `vector` without the `<vector>.` prefix.
pub(crate) fn slot_names(df: &DataFrame, vector: &str) -> Vec<String> {
    let skip = vector.len() + SLOT_SEPARATOR.len_utf8();
    slots(df, vector)
        .into_iter()
        .map(|name| name[skip..].to_string())
        .collect()
}


/// Reads the slots `names` of `vector` as features.
/// Nulls become `NaN`.
pub(crate) fn vector_features(
    df: &DataFrame,
    vector: &str,
    names: &[String],
) -> Result<Vec<Feature>>
{
    names.iter()
        .map(|name| {
            let column = format!("{vector}{SLOT_SEPARATOR}{name}");
            let vals = numeric(df, &column)?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect::<Vec<_>>();
            Ok(Feature::from_vals(name, vals))
        })
        .collect()
}


/// Parses the textual form of a boolean.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}


/// Reads a column as booleans.
/// Text columns are parsed with [`parse_bool`],
/// numeric columns are `true` iff non-zero.
/// Nulls stay `None`; unparsable text is an error.
pub(crate) fn booleans(df: &DataFrame, name: &str)
    -> Result<Vec<Option<bool>>>
{
    let series = column(df, name)?;
    let values = match series.dtype() {
        DataType::Boolean => series.bool()?.into_iter().collect(),
        DataType::Utf8 => {
            series.utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| match v {
                    None => Ok(None),
                    Some(text) => parse_bool(text)
                        .map(Some)
                        .ok_or_else(|| Error::InvalidLabel {
                            column: name.to_string(),
                            row,
                            value: text.to_string(),
                        }),
                })
                .collect::<Result<Vec<_>>>()?
        },
        dtype if dtype.is_numeric() => {
            series.cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.map(|x| x != 0.0))
                .collect()
        },
        dtype => {
            return Err(Error::ColumnType {
                name: name.to_string(),
                found: format!("{dtype}"),
                expected: "boolean",
            });
        },
    };
    Ok(values)
}


/// Reads a label column. Nulls are an error.
pub(crate) fn labels(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    booleans(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| Error::InvalidLabel {
                column: name.to_string(),
                row,
                value: "null".to_string(),
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_keyed_by_short_text() {
        let df = df!("Age" => &[35.0f64, 41.5]).unwrap();
        let keys = keys(&df, "Age").unwrap();
        assert_eq!(keys, vec![Some("35".to_string()), Some("41.5".to_string())]);
    }

    #[test]
    fn single_precision_values_share_their_key() {
        let parsed = df!("Age" => &[41.3f64, 50000.5]).unwrap();
        let stored = df!("Age" => &[41.3f32 as f64, 50000.5f32 as f64]).unwrap();

        let expected = vec![Some("41.3".to_string()), Some("50000.5".to_string())];
        assert_eq!(keys(&parsed, "Age").unwrap(), expected);
        assert_eq!(keys(&stored, "Age").unwrap(), expected);
    }

    #[test]
    fn text_labels_are_parsed() {
        let df = df!("Purchase" => &["True", "no", "1"]).unwrap();
        let labels = labels(&df, "Purchase").unwrap();
        assert_eq!(labels, vec![true, false, true]);
    }

    #[test]
    fn bad_label_is_an_error() {
        let df = df!("Purchase" => &["maybe"]).unwrap();
        assert!(matches!(
            labels(&df, "Purchase"),
            Err(Error::InvalidLabel { .. })
        ));
    }

    #[test]
    fn slots_keep_frame_order() {
        let df = df!(
            "Gender.Male" => &[1.0f64],
            "Age" => &[35.0f64],
            "Gender.Female" => &[0.0f64],
            "GenderX" => &[0.0f64],
        ).unwrap();
        assert_eq!(slots(&df, "Gender"), vec!["Gender.Male", "Gender.Female"]);
        assert_eq!(slot_names(&df, "Gender"), vec!["Male", "Female"]);

        let names = slot_names(&df, "Gender");
        let features = vector_features(&df, "Gender", &names).unwrap();
        assert_eq!(features[1].name(), "Female");
        assert_eq!(features[1].vals(), &[0.0]);
    }

    #[test]
    fn missing_column_is_reported() {
        let df = df!("Age" => &[1.0f64]).unwrap();
        assert!(matches!(numeric(&df, "Income"), Err(Error::MissingColumn(_))));
    }
}
