use polars::prelude::*;

use std::io::Cursor;
use std::path::Path;

use crate::{Error, Result};
use super::schema::Schema;


/// A struct that reads a delimited text file into a `DataFrame`.
///
/// # Example
/// The following code reads a CSV file with a header row
/// and casts the columns to the declared types.
/// ```no_run
/// use fastboosts::prelude::*;
///
/// let data = TextLoader::new()
///     .file("customer.csv")
///     .has_header(true)
///     .schema(Customer::schema())
///     .load()
///     .unwrap();
/// ```
pub struct TextLoader<P> {
    file: Option<P>,
    has_header: bool,
    separator: u8,
    schema: Option<Schema>,
}


impl<P> TextLoader<P> {
    /// Construct a new instance of [`TextLoader`].
    /// By default the file is comma-separated and has a header row.
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: true,
            separator: b',',
            schema: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `true`.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the column separator. Default is `,`.
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }


    /// Declare the column types.
    /// Every declared column must exist in the file.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }


    /// Parse in-memory text with the current settings.
    /// See [`TextLoader::load`] for how declared columns are typed.
    pub fn parse(&self, text: &str) -> Result<DataFrame> {
        let cursor = Cursor::new(text.as_bytes().to_vec());
        let df = CsvReader::new(cursor)
            .has_header(self.has_header)
            .with_separator(self.separator)
            .finish()?;
        self.typed(df)
    }


    fn typed(&self, df: DataFrame) -> Result<DataFrame> {
        match &self.schema {
            Some(schema) => schema.apply(df),
            None => Ok(df),
        }
    }
}


impl<P> Default for TextLoader<P> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P> TextLoader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments,
    /// and returns the typed `DataFrame`.
    /// This method consumes `self.`
    ///
    /// A `Numeric` cell that does not parse as a number becomes null,
    /// and the encoders treat it as a missing value.
    /// A `Boolean` cell that does not parse is an error.
    pub fn load(self) -> Result<DataFrame> {
        let file = self.file.as_ref()
            .ok_or_else(|| Error::InvalidOption(
                "the file name is not set. Use `TextLoader::file`.".into()
            ))?;
        let path = file.as_ref();

        if let Err(e) = std::fs::metadata(path) {
            return Err(Error::io(path, e));
        }

        let df = CsvReader::from_path(path)?
            .has_header(self.has_header)
            .with_separator(self.separator)
            .finish()?;
        self.typed(df)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ColumnType;
    use crate::{Customer, Record};

    const TEXT: &str = "\
        Age,Gender,Income,MaritalStatus,Purchase\n\
        35,Male,50000,Single,false\n\
        42,Female,64000,Married,true\n";

    #[test]
    fn parse_with_schema() {
        let schema = Schema::new()
            .with_column("Age", ColumnType::Numeric)
            .with_column("Gender", ColumnType::Text)
            .with_column("Income", ColumnType::Numeric)
            .with_column("MaritalStatus", ColumnType::Text)
            .with_column("Purchase", ColumnType::Boolean);
        let df = TextLoader::<&str>::new()
            .schema(schema.clone())
            .parse(TEXT)
            .unwrap();

        assert_eq!(df.shape(), (2, 5));
        assert_eq!(Schema::of(&df), schema);
    }

    #[test]
    fn unparsable_number_is_missing() {
        let text = "\
            Age,Gender,Income,MaritalStatus,Purchase\n\
            abc,Male,50000,Single,true\n\
            35,Female,64000,Married,false\n";
        let df = TextLoader::<&str>::new()
            .schema(Customer::schema())
            .parse(text)
            .unwrap();

        let age = df.column("Age").unwrap().f64().unwrap();
        assert_eq!(age.get(0), None);
        assert_eq!(age.get(1), Some(35.0));
    }

    #[test]
    fn unparsable_label_is_an_error() {
        let text = "\
            Age,Gender,Income,MaritalStatus,Purchase\n\
            35,Male,50000,Single,perhaps\n";
        let res = TextLoader::<&str>::new()
            .schema(Customer::schema())
            .parse(text);
        assert!(matches!(res, Err(Error::ColumnType { .. } | Error::InvalidLabel { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = TextLoader::new()
            .file("no/such/file.csv")
            .load();
        assert!(matches!(res, Err(Error::Io { .. })));
    }

    #[test]
    fn unset_file_is_an_error() {
        let res = TextLoader::<&str>::new().load();
        assert!(matches!(res, Err(Error::InvalidOption(_))));
    }
}
