//! Loss functions minimized by the booster.


/// This trait defines the loss functions.
pub trait LossFunction {
    /// The name of the loss function.
    fn name(&self) -> &str;


    /// Loss value for a single point.
    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64;


    /// Mean loss value over the given points.
    fn eval(&self, predictions: &[f64], target: &[f64]) -> f64 {
        let n_items = predictions.len();

        assert_eq!(n_items, target.len());

        if n_items == 0 { return 0.0; }

        predictions.iter()
            .zip(target)
            .map(|(&p, &y)| self.eval_at_point(p, y))
            .sum::<f64>()
            / n_items as f64
    }


    /// Gradient vector at the current point.
    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>;


    /// Hessian at the current point.
    /// Here, this method assumes that the Hessian is diagonal,
    /// so that it returns a diagonal vector.
    fn hessian(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>;
}


/// The logistic loss `ln(1 + exp(-y f))` for labels `y ∈ {-1, +1}`.
///
/// With `p = 1 / (1 + exp(-f))` and `y01 = (y + 1) / 2`,
/// the gradient is `p - y01` and the hessian is `p (1 - p)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogisticLoss;


/// Returns `1 / (1 + exp(-x))`.
#[inline]
pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}


impl LossFunction for LogisticLoss {
    fn name(&self) -> &str {
        "Logistic loss"
    }


    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        let margin = true_value * prediction;
        // ln(1 + exp(-m)), evaluated without overflow.
        if margin > 0.0 {
            (-margin).exp().ln_1p()
        } else {
            -margin + margin.exp().ln_1p()
        }
    }


    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64> {
        assert_eq!(predictions.len(), target.len());

        predictions.iter()
            .zip(target)
            .map(|(&f, &y)| {
                let y01 = if y > 0.0 { 1.0 } else { 0.0 };
                sigmoid(f) - y01
            })
            .collect()
    }


    fn hessian(&self, predictions: &[f64], target: &[f64]) -> Vec<f64> {
        assert_eq!(predictions.len(), target.len());

        predictions.iter()
            .map(|&f| {
                let p = sigmoid(f);
                p * (1.0 - p)
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_loss_at_zero() {
        let loss = LogisticLoss;
        let ln2 = 2f64.ln();
        assert!((loss.eval_at_point(0.0, 1.0) - ln2).abs() < 1e-12);
        assert!((loss.eval(&[0.0, 0.0], &[1.0, -1.0]) - ln2).abs() < 1e-12);

        assert_eq!(loss.gradient(&[0.0, 0.0], &[1.0, -1.0]), vec![-0.5, 0.5]);
        assert_eq!(loss.hessian(&[0.0, 0.0], &[1.0, -1.0]), vec![0.25, 0.25]);
    }

    #[test]
    fn logistic_loss_is_stable() {
        let loss = LogisticLoss;
        assert!(loss.eval_at_point(1_000.0, 1.0) < 1e-12);
        assert!((loss.eval_at_point(-1_000.0, 1.0) - 1_000.0).abs() < 1e-9);
        assert_eq!(sigmoid(-1_000.0), 0.0);
        assert_eq!(sigmoid(1_000.0), 1.0);
    }
}
