use std::fmt;
use std::ops::Range;

use crate::{
    constants::{PERTURBATION, PRINT_WIDTH_BINNING},
    Feature,
};


/// Binning: A feature processing.
#[derive(Debug, Clone)]
pub struct Bin(pub Range<f64>);

impl Bin {
    /// Create a new instance of `Bin`.
    #[inline(always)]
    pub fn new(range: Range<f64>) -> Self {
        Self(range)
    }


    /// Check whether the given `item` is conteined by `self.`
    #[inline(always)]
    pub fn contains(&self, item: &f64) -> bool {
        self.0.contains(item)
    }


    pub fn start(&self) -> f64 { self.0.start }


    pub fn set_start(&mut self, s: f64) {
        self.0.start = s;
    }


    pub fn end(&self) -> f64 { self.0.end }


    pub fn set_end(&mut self, e: f64) {
        self.0.end = e;
    }
}


/// The first/second order derivatives and the number of examples
/// that fall into a bin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BinStat {
    pub(crate) grad: f64,
    pub(crate) hess: f64,
    pub(crate) count: usize,
}


impl BinStat {
    #[inline(always)]
    fn add(&mut self, grad: f64, hess: f64) {
        self.grad += grad;
        self.hess += hess;
        self.count += 1;
    }
}


/// A wrapper of `Vec<Bin>`.
#[derive(Debug, Clone)]
pub struct Bins(Vec<Bin>);

impl Bins {
    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Cut the given `Feature` into `n_bin` bins of the same width.
    /// `NaN`s are ignored. A feature without any other value
    /// gets a single bin.
    pub fn cut(feature: &Feature, n_bin: usize) -> Self {
        let (mut min, mut max) = match feature.min_max() {
            Some(min_max) => min_max,
            None => { return Self(vec![Bin::new(f64::MIN..f64::MAX)]); },
        };
        let n_bin = n_bin.max(1);

        // If the minimum value equals to the maximum one,
        // slightly perturb them.
        if min == max {
            min -= PERTURBATION;
            max += PERTURBATION;
        }

        let width = (max - min) / n_bin as f64;

        let mut bins = Vec::with_capacity(n_bin);

        let mut left = min;
        for i in 0..n_bin {
            let l = if i == 0 { f64::MIN } else { left };
            let r = if i == n_bin - 1 { f64::MAX } else { left + width };
            bins.push(Bin::new(l..r));

            left = r;
        }

        assert_eq!(bins.len(), n_bin);

        Self(bins)
    }


    /// Returns the index of the bin that contains `x`.
    /// `NaN` goes to the left-most bin.
    #[inline(always)]
    fn position(&self, x: f64) -> usize {
        self.0.partition_point(|bin| bin.end() <= x)
            .min(self.0.len() - 1)
    }


    /// Accumulates the gradient and hessian of the examples in `indices`
    /// per bin. Empty bins are removed.
    pub(crate) fn pack(
        &self,
        indices: &[usize],
        feature: &Feature,
        gradient: &[f64],
        hessian: &[f64],
    ) -> Vec<(Bin, BinStat)>
    {
        let n_bins = self.0.len();
        let mut packed = vec![BinStat::default(); n_bins];

        for &i in indices {
            let pos = self.position(feature[i]);
            packed[pos].add(gradient[i], hessian[i]);
        }
        self.remove_empty_bins(packed)
    }


    /// This method removes bins with no examples.
    /// # Example
    /// Assume that we have bins and its counts.
    /// ```text
    /// Bins   | [-Inf, 2.5), [2.5, 7.0), [7.0, 8.1), [8.1, +Inf)
    /// Counts |      5,           0,          0,          2
    /// ```
    /// This method removes the empty bins and
    /// moves the boundary to the midpoint between the occupied bins:
    /// ```text
    /// Bins   | [-Inf, 5.3), [5.3, +Inf)
    /// Counts |      5,           2
    /// ```
    fn remove_empty_bins(&self, pack: Vec<BinStat>)
        -> Vec<(Bin, BinStat)>
    {
        let mut pack = self.0.iter()
            .cloned()
            .zip(pack)
            .filter(|(_, stat)| stat.count > 0)
            .collect::<Vec<_>>();

        let n = pack.len();
        if n == 0 { return pack; }

        for i in 0..n-1 {
            let t = (pack[i].0.end() + pack[i+1].0.start()) / 2f64;
            pack[i].0.set_end(t);
            pack[i+1].0.set_start(t);
        }
        pack[0].0.set_start(f64::MIN);
        pack[n-1].0.set_end(f64::MAX);
        pack
    }
}


impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bins = &self.0;
        let n_bins = bins.len();
        if n_bins > PRINT_WIDTH_BINNING {
            let head = bins[..2].iter()
                .map(|bin| format!("{bin}"))
                .collect::<Vec<_>>()
                .join(", ");
            let tail = bins.last()
                .map(|bin| format!("{bin}"))
                .unwrap_or_default();
            write!(f, "{head}, ..., {tail}")
        } else {
            let line = bins.iter()
                .map(|bin| format!("{}", bin))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{line}")
        }
    }
}


fn signed(x: f64) -> String {
    let sgn = if x > 0.0 {
        '+'
    } else if x < 0.0 {
        '-'
    } else {
        ' '
    };
    format!("{sgn}{: >.2}", x.abs())
}


impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = if self.0.start == f64::MIN {
            String::from("-Inf")
        } else {
            signed(self.0.start)
        };
        let end = if self.0.end == f64::MAX {
            String::from("+Inf")
        } else {
            signed(self.0.end)
        };

        write!(f, "[{start}, {end})")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(bins: &[(Bin, BinStat)]) -> Vec<Range<f64>> {
        bins.iter().map(|(b, _)| b.0.clone()).collect()
    }

    #[test]
    fn test_bin_display() {
        let bin = Bin::new(-2f64..100f64);
        assert_eq!(format!("{bin}"), "[-2.00, +100.00)");

        let bin = Bin::new(f64::MIN..f64::MAX);
        assert_eq!(format!("{bin}"), "[-Inf, +Inf)");
    }

    #[test]
    fn test_cut_01() {
        let feature = Feature::from_vals("f", vec![0.0, 4.0, 1.0]);

        let result = Bins::cut(&feature, 2);
        let expect = vec![f64::MIN..2f64, 2f64..f64::MAX];

        let result = result.0.into_iter().map(|b| b.0).collect::<Vec<_>>();
        assert_eq!(result, expect);
    }

    #[test]
    fn test_cut_02() {
        let feature = Feature::from_vals("f", vec![-10.0, 4.0, 10.0]);

        let result = Bins::cut(&feature, 4);
        let expect = vec![
            f64::MIN..-5f64,
            -5f64..0f64,
            0f64..5f64,
            5f64..f64::MAX,
        ];

        let result = result.0.into_iter().map(|b| b.0).collect::<Vec<_>>();
        assert_eq!(result, expect);
    }

    #[test]
    fn test_cut_all_nan() {
        let feature = Feature::from_vals("f", vec![f64::NAN, f64::NAN]);
        let bins = Bins::cut(&feature, 10);
        assert_eq!(bins.len(), 1);
    }

    #[test]
    fn test_pack_merges_empty_bins() {
        let feature = Feature::from_vals("f", vec![-10.0, -9.0, 10.0, f64::NAN]);
        let bins = Bins::cut(&feature, 4);
        let gradient = vec![1.0, 2.0, 3.0, 4.0];
        let hessian = vec![0.5; 4];

        let pack = bins.pack(&[0, 1, 2, 3], &feature, &gradient, &hessian);

        assert_eq!(ranges(&pack), vec![f64::MIN..0f64, 0f64..f64::MAX]);
        // `NaN` joins the left-most bin.
        assert_eq!(pack[0].1, BinStat { grad: 7.0, hess: 1.5, count: 3 });
        assert_eq!(pack[1].1, BinStat { grad: 3.0, hess: 0.5, count: 1 });
    }
}
