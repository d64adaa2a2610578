use serde::{Serialize, Deserialize};

use crate::{Error, Result};


const MAX_ITER: usize = 100;
const MIN_STEP: f64 = 1e-10;
const SIGMA: f64 = 1e-12;
const TOLERANCE: f64 = 1e-5;


/// Maps a raw score `s` to the probability of the positive class,
/// `1 / (1 + exp(a s + b))`.
///
/// The parameters are fitted by Platt's method
/// with the smoothed targets and the Newton iterations of
///
/// Hsuan-Tien Lin, Chih-Jen Lin and Ruby C. Weng, 2007.
/// A note on Platt's probabilistic outputs for support vector machines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattCalibrator {
    /// Slope.
    pub a: f64,
    /// Offset.
    pub b: f64,
}


impl PlattCalibrator {
    /// Construct a calibrator from its parameters.
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }


    /// Fit a calibrator on the raw `scores` of the `labels`.
    pub fn fit(scores: &[f64], labels: &[bool]) -> Result<Self> {
        if scores.len() != labels.len() {
            return Err(Error::InvalidOption(format!(
                "{} scores for {} labels", scores.len(), labels.len()
            )));
        }
        if scores.is_empty() {
            return Err(Error::EmptyData);
        }

        let prior1 = labels.iter().filter(|&&y| y).count() as f64;
        let prior0 = labels.len() as f64 - prior1;

        let hi = (prior1 + 1.0) / (prior1 + 2.0);
        let lo = 1.0 / (prior0 + 2.0);
        let targets = labels.iter()
            .map(|&y| if y { hi } else { lo })
            .collect::<Vec<_>>();

        let mut a = 0.0;
        let mut b = ((prior0 + 1.0) / (prior1 + 1.0)).ln();
        let mut fval = objective(scores, &targets, a, b);

        for _ in 0..MAX_ITER {
            // Gradient and Hessian (with a small ridge on the diagonal).
            let mut h11 = SIGMA;
            let mut h22 = SIGMA;
            let mut h21 = 0.0;
            let mut g1 = 0.0;
            let mut g2 = 0.0;
            for (&s, &t) in scores.iter().zip(&targets) {
                let (p, q) = probabilities(s * a + b);
                let d2 = p * q;
                h11 += s * s * d2;
                h22 += d2;
                h21 += s * d2;

                let d1 = t - p;
                g1 += s * d1;
                g2 += d1;
            }

            if g1.abs() < TOLERANCE && g2.abs() < TOLERANCE { break; }

            let det = h11 * h22 - h21 * h21;
            let da = -(h22 * g1 - h21 * g2) / det;
            let db = -(-h21 * g1 + h11 * g2) / det;
            let gd = g1 * da + g2 * db;

            // Backtracking line search.
            let mut step = 1.0;
            while step >= MIN_STEP {
                let new_a = a + step * da;
                let new_b = b + step * db;
                let new_f = objective(scores, &targets, new_a, new_b);
                if new_f < fval + 1e-4 * step * gd {
                    a = new_a;
                    b = new_b;
                    fval = new_f;
                    break;
                }
                step /= 2.0;
            }

            if step < MIN_STEP { break; }
        }

        Ok(Self { a, b })
    }


    /// Returns the calibrated probability of the positive class.
    #[inline]
    pub fn probability(&self, score: f64) -> f64 {
        probabilities(self.a * score + self.b).0
    }
}


/// Returns `(1 / (1 + exp(x)), exp(x) / (1 + exp(x)))`
/// without overflow.
#[inline]
fn probabilities(x: f64) -> (f64, f64) {
    if x >= 0.0 {
        let e = (-x).exp();
        (e / (1.0 + e), 1.0 / (1.0 + e))
    } else {
        let e = x.exp();
        (1.0 / (1.0 + e), e / (1.0 + e))
    }
}


/// Cross-entropy between the smoothed targets and the sigmoid.
fn objective(scores: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    scores.iter()
        .zip(targets)
        .map(|(&s, &t)| {
            let x = s * a + b;
            if x >= 0.0 {
                t * x + (-x).exp().ln_1p()
            } else {
                (t - 1.0) * x + x.exp().ln_1p()
            }
        })
        .sum()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_is_monotone_in_score() {
        let scores = [-2.0, -1.5, -1.0, -0.2, 0.3, 1.0, 1.2, 2.0];
        let labels = [false, false, false, true, false, true, true, true];
        let platt = PlattCalibrator::fit(&scores, &labels).unwrap();

        assert!(platt.a < 0.0);
        let lo = platt.probability(-2.0);
        let mid = platt.probability(0.0);
        let hi = platt.probability(2.0);
        assert!(lo < mid && mid < hi);
        assert!((0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi));
    }

    #[test]
    fn constant_scores_give_the_smoothed_prior() {
        let scores = [0.0; 4];
        let labels = [true, false, false, false];
        let platt = PlattCalibrator::fit(&scores, &labels).unwrap();

        // Targets are 2/3 once and 1/5 three times, so the mean is 19/60.
        assert!((platt.probability(0.0) - 19.0 / 60.0).abs() < 1e-3);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(PlattCalibrator::fit(&[0.0], &[true, false]).is_err());
        assert!(matches!(PlattCalibrator::fit(&[], &[]), Err(Error::EmptyData)));
    }
}
