use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::Result;
use super::schema::{ColumnType, Schema};


/// A row type that can be turned into a `DataFrame`.
pub trait Record: Sized {
    /// The columns a frame of `Self` has.
    fn schema() -> Schema;


    /// Convert `records` into a frame whose columns follow
    /// [`Record::schema`].
    fn to_frame(records: &[Self]) -> Result<DataFrame>;
}


/// A customer of the purchase data set.
/// `purchase` is the label. It is `None` for customers to be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    /// Age in years.
    pub age: f32,
    /// Gender, e.g. `"Male"`.
    pub gender: String,
    /// Yearly income.
    pub income: f32,
    /// Marital status, e.g. `"Single"`.
    pub marital_status: String,
    /// Whether the customer bought the product.
    pub purchase: Option<bool>,
}


impl Customer {
    /// Construct an unlabeled customer.
    pub fn new<S, T>(age: f32, gender: S, income: f32, marital_status: T)
        -> Self
        where S: ToString,
              T: ToString,
    {
        Self {
            age,
            gender: gender.to_string(),
            income,
            marital_status: marital_status.to_string(),
            purchase: None,
        }
    }


    /// Set the label.
    pub fn purchase(mut self, purchase: bool) -> Self {
        self.purchase = Some(purchase);
        self
    }
}


impl Record for Customer {
    fn schema() -> Schema {
        Schema::new()
            .with_column("Age", ColumnType::Numeric)
            .with_column("Gender", ColumnType::Text)
            .with_column("Income", ColumnType::Numeric)
            .with_column("MaritalStatus", ColumnType::Text)
            .with_column("Purchase", ColumnType::Boolean)
    }


    fn to_frame(records: &[Self]) -> Result<DataFrame> {
        let age = records.iter()
            .map(|c| c.age as f64)
            .collect::<Vec<_>>();
        let gender = records.iter()
            .map(|c| c.gender.as_str())
            .collect::<Vec<_>>();
        let income = records.iter()
            .map(|c| c.income as f64)
            .collect::<Vec<_>>();
        let marital_status = records.iter()
            .map(|c| c.marital_status.as_str())
            .collect::<Vec<_>>();
        let purchase = records.iter()
            .map(|c| c.purchase)
            .collect::<Vec<_>>();

        let df = DataFrame::new(vec![
            Series::new("Age", age),
            Series::new("Gender", gender),
            Series::new("Income", income),
            Series::new("MaritalStatus", marital_status),
            Series::new("Purchase", purchase),
        ])?;
        Ok(df)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_frame_matches_schema() {
        let customers = [
            Customer::new(35.0, "Male", 50_000.0, "Single"),
            Customer::new(52.0, "Female", 72_000.0, "Married").purchase(true),
        ];
        let df = Customer::to_frame(&customers).unwrap();
        assert_eq!(df.shape(), (2, 5));
        assert_eq!(Schema::of(&df), Customer::schema());
        assert_eq!(df.column("Purchase").unwrap().null_count(), 1);
    }
}
