use serde::{Serialize, Deserialize};

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use crate::{Error, Regressor, Result, Sample};
use super::node::*;


/// Regression Tree regressor.
/// This struct is just a wrapper of `Node`.
/// You can read/write this struct by `serde` traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTreeRegressor {
    root: Node,
}


impl From<Box<Node>> for RegressionTreeRegressor {
    #[inline]
    fn from(root: Box<Node>) -> Self {
        Self { root: *root }
    }
}


impl Regressor for RegressionTreeRegressor {
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.root.predict(sample, row)
    }
}


impl RegressionTreeRegressor {
    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Write the current regression tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let mut f = File::create(path)
            .map_err(|e| Error::io(path, e))?;

        let info = self.root.to_dot_info(0).0;
        let body = format!("graph RegressionTree {{\n{}}}\n", info.concat());
        f.write_all(body.as_bytes())
            .map_err(|e| Error::io(path, e))?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::weak_learner::regression_tree::split_rule::Splitter;

    fn stump() -> RegressionTreeRegressor {
        let root = Node::branch(
            Splitter::new("x", 0.5),
            Box::new(Node::leaf(-1.0)),
            Box::new(Node::leaf(2.0)),
            0.0,
        );
        RegressionTreeRegressor::from(Box::new(root))
    }

    #[test]
    fn dot_file_lists_every_node() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.dot");
        stump().to_dot_file(&path).unwrap();

        let dot = std::fs::read_to_string(&path).unwrap();
        assert!(dot.starts_with("graph RegressionTree {"));
        assert!(dot.contains("x < 0.50 ?"));
        assert_eq!(dot.matches("shape = box").count(), 2);
    }

    #[test]
    fn predict_and_leaves() {
        let tree = stump();
        let sample = Sample::from_features(
            vec![crate::Feature::from_vals("x", vec![0.0, 1.0, f64::NAN])],
            vec![-1.0, 1.0, 1.0],
        ).unwrap();
        assert_eq!(tree.predict_all(&sample), vec![-1.0, 2.0, -1.0]);
        assert_eq!(tree.n_leaves(), 2);
    }
}
