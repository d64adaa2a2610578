use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::{
    constants::MODEL_FORMAT_VERSION,
    Error,
    Result,
    Schema,
};


#[derive(Serialize)]
struct ModelFileRef<'a, M> {
    version: u32,
    schema: &'a Schema,
    model: &'a M,
}


#[derive(Deserialize)]
struct ModelFile<M> {
    schema: Schema,
    model: M,
}


#[derive(Deserialize)]
struct Header {
    version: u32,
}


/// Write `model` and the input `schema` it was fitted on to `path`
/// as a JSON object `{ "version", "schema", "model" }`.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
/// # let model: PipelineModel = todo!();
///
/// fastboosts::save(&model, &Customer::schema(), "model.json").unwrap();
/// let (model, schema): (PipelineModel, _) = fastboosts::load("model.json")
///     .unwrap();
/// ```
pub fn save<M, P>(model: &M, schema: &Schema, path: P) -> Result<()>
    where M: Serialize,
          P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let content = ModelFileRef {
        version: MODEL_FORMAT_VERSION,
        schema,
        model,
    };
    serde_json::to_writer(&mut writer, &content)?;
    writer.flush()
        .map_err(|e| Error::io(path, e))?;
    Ok(())
}


/// Read a model and its input schema written by [`save`].
pub fn load<M, P>(path: P) -> Result<(M, Schema)>
    where M: DeserializeOwned,
          P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = {
        let file = File::open(path)
            .map_err(|e| Error::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut text = String::new();
        std::io::Read::read_to_string(&mut reader, &mut text)
            .map_err(|e| Error::io(path, e))?;
        text
    };

    let header = serde_json::from_str::<Header>(&text)?;
    if header.version != MODEL_FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(header.version));
    }

    let file = serde_json::from_str::<ModelFile<M>>(&text)?;
    Ok((file.model, file.schema))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, Concatenate};

    fn schema() -> Schema {
        Schema::new()
            .with_column("Age", ColumnType::Numeric)
            .with_column("Gender", ColumnType::Text)
    }

    #[test]
    fn saved_model_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = Concatenate::new("Features", &["Age", "Gender"]);

        save(&model, &schema(), &path).unwrap();
        let (loaded, loaded_schema): (Concatenate, Schema) = load(&path)
            .unwrap();

        assert_eq!(loaded, model);
        assert_eq!(loaded_schema, schema());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"version":99,"schema":{},"model":null}"#)
            .unwrap();

        let result = load::<Concatenate, _>(&path);
        assert!(matches!(result, Err(Error::UnsupportedVersion(99))));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let result = load::<Concatenate, _>("no/such/model.json");
        match result {
            Err(Error::Io { path, .. }) => {
                assert_eq!(path, Path::new("no/such/model.json"));
            },
            _ => panic!("expected an I/O error"),
        }
    }
}
