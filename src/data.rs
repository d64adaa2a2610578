//! Loading, typing and splitting of raw tabular data.
//!
//! Raw data is kept as a `polars::DataFrame` until a pipeline turns it
//! into a numeric [`Sample`](crate::Sample).

pub mod schema;
pub mod loader;
pub mod split;
pub mod record;
pub(crate) mod column;


pub use schema::{ColumnType, Schema};
pub use loader::TextLoader;
pub use split::train_test_split;
pub use record::{Record, Customer};
