//! Metrics of a binary classifier on a scored frame.
use polars::prelude::DataFrame;

use std::fmt;

use crate::{
    constants::*,
    data::column,
    Error,
    Result,
};


/// Counts of the four outcomes of a binary classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Positive examples predicted positive.
    pub true_positive: usize,
    /// Negative examples predicted positive.
    pub false_positive: usize,
    /// Negative examples predicted negative.
    pub true_negative: usize,
    /// Positive examples predicted negative.
    pub false_negative: usize,
}


impl ConfusionMatrix {
    /// Count the outcomes of `predicted` against `labels`.
    pub fn new(labels: &[bool], predicted: &[bool]) -> Self {
        let mut matrix = Self::default();
        for (&y, &p) in labels.iter().zip(predicted) {
            match (y, p) {
                (true,  true)  => matrix.true_positive  += 1,
                (false, true)  => matrix.false_positive += 1,
                (false, false) => matrix.true_negative  += 1,
                (true,  false) => matrix.false_negative += 1,
            }
        }
        matrix
    }


    /// Returns the number of counted examples.
    pub fn total(&self) -> usize {
        self.true_positive
            + self.false_positive
            + self.true_negative
            + self.false_negative
    }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} | {:>9} {:>9}", "", "PREDICTED", "")?;
        writeln!(f, "{:>10} | {:>9} {:>9}", "TRUTH", "positive", "negative")?;
        writeln!(f, "{:-<32}", "")?;
        writeln!(
            f, "{:>10} | {:>9} {:>9}",
            "positive", self.true_positive, self.false_negative,
        )?;
        write!(
            f, "{:>10} | {:>9} {:>9}",
            "negative", self.false_positive, self.true_negative,
        )
    }
}


/// Evaluation of a binary classifier.
/// Logarithms are in base 2.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryClassificationMetrics {
    /// Fraction of correctly predicted examples.
    pub accuracy: f64,
    /// Area under the ROC curve of the scores.
    pub area_under_roc_curve: f64,
    /// Average precision of the scores.
    pub area_under_precision_recall_curve: f64,
    /// Harmonic mean of the positive precision and recall.
    pub f1_score: f64,
    /// `TP / (TP + FP)`.
    pub positive_precision: f64,
    /// `TP / (TP + FN)`.
    pub positive_recall: f64,
    /// `TN / (TN + FN)`.
    pub negative_precision: f64,
    /// `TN / (TN + FP)`.
    pub negative_recall: f64,
    /// Mean cross-entropy of the probabilities.
    pub log_loss: f64,
    /// Relative improvement of `log_loss` over `entropy`.
    pub log_loss_reduction: f64,
    /// Entropy of the label prior.
    pub entropy: f64,
    /// Outcome counts of `PredictedLabel`.
    pub confusion_matrix: ConfusionMatrix,
}


impl BinaryClassificationMetrics {
    /// Evaluate the `Score`, `Probability` and `PredictedLabel` columns
    /// of `data` against the boolean column `label`.
    pub fn evaluate(data: &DataFrame, label: &str) -> Result<Self> {
        if data.height() == 0 {
            return Err(Error::EmptyData);
        }
        let labels = column::labels(data, label)?;
        let scores = column::dense(data, SCORE_COLUMN)?;
        let probabilities = column::dense(data, PROBABILITY_COLUMN)?;
        let predicted = column::labels(data, PREDICTED_LABEL_COLUMN)?;

        Ok(Self::from_parts(&labels, &scores, &probabilities, &predicted))
    }


    /// Evaluate raw columns of the same length.
    pub fn from_parts(
        labels: &[bool],
        scores: &[f64],
        probabilities: &[f64],
        predicted: &[bool],
    ) -> Self
    {
        let cm = ConfusionMatrix::new(labels, predicted);
        let tp = cm.true_positive as f64;
        let fp = cm.false_positive as f64;
        let tn = cm.true_negative as f64;
        let fn_ = cm.false_negative as f64;

        let accuracy = ratio(tp + tn, cm.total() as f64);
        let positive_precision = ratio(tp, tp + fp);
        let positive_recall = ratio(tp, tp + fn_);
        let negative_precision = ratio(tn, tn + fn_);
        let negative_recall = ratio(tn, tn + fp);
        let f1_score = ratio(
            2.0 * positive_precision * positive_recall,
            positive_precision + positive_recall,
        );

        let log_loss = log_loss(labels, probabilities);
        let entropy = prior_entropy(labels);
        let log_loss_reduction = ratio(entropy - log_loss, entropy);

        Self {
            accuracy,
            area_under_roc_curve: area_under_roc_curve(labels, scores),
            area_under_precision_recall_curve: average_precision(labels, scores),
            f1_score,
            positive_precision,
            positive_recall,
            negative_precision,
            negative_recall,
            log_loss,
            log_loss_reduction,
            entropy,
            confusion_matrix: cm,
        }
    }
}


impl fmt::Display for BinaryClassificationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Accuracy", self.accuracy),
            ("Area Under ROC Curve", self.area_under_roc_curve),
            ("Area Under PR Curve", self.area_under_precision_recall_curve),
            ("F1 Score", self.f1_score),
            ("Positive Precision", self.positive_precision),
            ("Positive Recall", self.positive_recall),
            ("Negative Precision", self.negative_precision),
            ("Negative Recall", self.negative_recall),
            ("Log Loss", self.log_loss),
            ("Log Loss Reduction", self.log_loss_reduction),
            ("Entropy", self.entropy),
        ];
        writeln!(f, "{:=>40}", "")?;
        writeln!(f, "{:^40}", "BINARY CLASSIFICATION METRICS")?;
        writeln!(f, "{:->40}", "")?;
        for (name, value) in rows {
            writeln!(f, "  {name:<24}{value:>14.4}")?;
        }
        writeln!(f, "{:->40}", "")?;
        writeln!(f, "{}", self.confusion_matrix)?;
        write!(f, "{:=>40}", "")
    }
}


#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 { 0.0 } else { numerator / denominator }
}


/// Mann-Whitney statistic with tied scores sharing their mean rank.
fn area_under_roc_curve(labels: &[bool], scores: &[f64]) -> f64 {
    let n_pos = labels.iter().filter(|&&y| y).count() as f64;
    let n_neg = labels.len() as f64 - n_pos;
    if n_pos == 0.0 || n_neg == 0.0 { return 0.0; }

    let mut pairs = scores.iter()
        .copied()
        .zip(labels.iter().copied())
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut rank_sum = 0.0;
    let mut i = 0;
    while i < pairs.len() {
        let mut j = i;
        while j < pairs.len() && pairs[j].0 == pairs[i].0 { j += 1; }

        // Ranks `i + 1 ..= j` share their mean.
        let rank = (i + 1 + j) as f64 / 2.0;
        let pos = pairs[i..j].iter().filter(|p| p.1).count() as f64;
        rank_sum += rank * pos;
        i = j;
    }

    (rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}


/// Step-wise area under the precision-recall curve,
/// visiting the tied scores as one threshold.
fn average_precision(labels: &[bool], scores: &[f64]) -> f64 {
    let n_pos = labels.iter().filter(|&&y| y).count() as f64;
    if n_pos == 0.0 { return 0.0; }

    let mut pairs = scores.iter()
        .copied()
        .zip(labels.iter().copied())
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut tp = 0.0;
    let mut seen = 0.0;
    let mut recall = 0.0;
    let mut area = 0.0;
    let mut i = 0;
    while i < pairs.len() {
        let mut j = i;
        while j < pairs.len() && pairs[j].0 == pairs[i].0 {
            if pairs[j].1 { tp += 1.0; }
            seen += 1.0;
            j += 1;
        }
        let next_recall = tp / n_pos;
        area += (next_recall - recall) * (tp / seen);
        recall = next_recall;
        i = j;
    }
    area
}


fn log_loss(labels: &[bool], probabilities: &[f64]) -> f64 {
    if labels.is_empty() { return 0.0; }

    let total = labels.iter()
        .zip(probabilities)
        .map(|(&y, &p)| {
            let p = p.clamp(EPSILON, 1.0 - EPSILON);
            if y { -p.log2() } else { -(1.0 - p).log2() }
        })
        .sum::<f64>();
    total / labels.len() as f64
}


fn prior_entropy(labels: &[bool]) -> f64 {
    if labels.is_empty() { return 0.0; }

    let prior = labels.iter().filter(|&&y| y).count() as f64
        / labels.len() as f64;
    [prior, 1.0 - prior].into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}


#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn scored() -> DataFrame {
        df!(
            "Purchase" => &[true, true, false, false],
            "Score" => &[0.9, 0.4, 0.6, 0.1],
            "Probability" => &[0.8, 0.5, 0.5, 0.2],
            "PredictedLabel" => &[true, false, true, false],
        ).unwrap()
    }

    #[test]
    fn counts_and_rates() {
        let m = BinaryClassificationMetrics::evaluate(&scored(), "Purchase")
            .unwrap();
        assert_eq!(
            m.confusion_matrix,
            ConfusionMatrix {
                true_positive: 1,
                false_positive: 1,
                true_negative: 1,
                false_negative: 1,
            }
        );
        assert_eq!(m.accuracy, 0.5);
        assert_eq!(m.positive_precision, 0.5);
        assert_eq!(m.negative_recall, 0.5);
        assert_eq!(m.f1_score, 0.5);
    }

    #[test]
    fn ranking_metrics() {
        let m = BinaryClassificationMetrics::evaluate(&scored(), "Purchase")
            .unwrap();
        assert!((m.area_under_roc_curve - 0.75).abs() < 1e-12);
        assert!((m.area_under_precision_recall_curve - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn tied_scores_share_their_rank() {
        let labels = [true, false, true, false];
        assert_eq!(area_under_roc_curve(&labels, &[0.3; 4]), 0.5);
        assert_eq!(area_under_roc_curve(&[true, true], &[0.1, 0.2]), 0.0);
    }

    #[test]
    fn log_loss_is_relative_to_the_prior() {
        let m = BinaryClassificationMetrics::evaluate(&scored(), "Purchase")
            .unwrap();
        let expected = (2.0 * -(0.8f64).log2() + 2.0) / 4.0;
        assert!((m.log_loss - expected).abs() < 1e-12);
        assert_eq!(m.entropy, 1.0);
        assert!((m.log_loss_reduction - (1.0 - expected)).abs() < 1e-12);
    }

    #[test]
    fn zero_denominators_give_zero() {
        let m = BinaryClassificationMetrics::from_parts(
            &[false, false], &[-1.0, -2.0], &[0.1, 0.2], &[false, false],
        );
        assert_eq!(m.positive_precision, 0.0);
        assert_eq!(m.positive_recall, 0.0);
        assert_eq!(m.f1_score, 0.0);
        assert_eq!(m.entropy, 0.0);
        assert_eq!(m.log_loss_reduction, 0.0);
        assert_eq!(m.accuracy, 1.0);
    }

    #[test]
    fn empty_frame_is_an_error() {
        let data = scored().head(Some(0));
        let result = BinaryClassificationMetrics::evaluate(&data, "Purchase");
        assert!(matches!(result, Err(Error::EmptyData)));
    }

    #[test]
    fn report_names_every_metric() {
        let m = BinaryClassificationMetrics::evaluate(&scored(), "Purchase")
            .unwrap();
        let report = format!("{m}");
        assert!(report.contains("Area Under ROC Curve"));
        assert!(report.contains("Log Loss Reduction"));
        assert!(report.contains("TRUTH"));
    }
}
