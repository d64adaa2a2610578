use polars::prelude::*;
use rand::prelude::*;

use crate::{Error, Result};


/// Split `data` into a training frame and a test frame.
///
/// The rows are shuffled with a `StdRng` seeded by `seed`,
/// and `round(n * test_fraction)` of them go to the test frame
/// (at least one row on each side).
/// Both frames keep the original row order.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
///
/// # let data = polars::prelude::DataFrame::default();
/// let (train, test) = train_test_split(&data, 0.2, 1234).unwrap();
/// ```
pub fn train_test_split(data: &DataFrame, test_fraction: f64, seed: u64)
    -> Result<(DataFrame, DataFrame)>
{
    if !(0f64 < test_fraction && test_fraction < 1f64) {
        return Err(Error::InvalidOption(format!(
            "test fraction must be in (0, 1). got {test_fraction}"
        )));
    }

    let n_sample = data.height();
    if n_sample < 2 {
        return Err(Error::InvalidOption(format!(
            "cannot split a data set of {n_sample} rows"
        )));
    }

    let mut ix = (0..n_sample as IdxSize).collect::<Vec<_>>();
    let mut rng = StdRng::seed_from_u64(seed);
    ix.shuffle(&mut rng);

    let n_test = (n_sample as f64 * test_fraction).round() as usize;
    let n_test = n_test.clamp(1, n_sample - 1);

    let mut test_ix = ix[..n_test].to_vec();
    let mut train_ix = ix[n_test..].to_vec();
    test_ix.sort_unstable();
    train_ix.sort_unstable();

    let train = data.take(&IdxCa::new("ix", &train_ix[..]))?;
    let test = data.take(&IdxCa::new("ix", &test_ix[..]))?;

    Ok((train, test))
}
