//! Provides [`Logger`], a wrapper of [`Booster::run`]
//! that reports the training progress per round.
use colored::Colorize;

use crate::{
    booster::CurrentHypothesis,
    Booster,
    Error,
    LossFunction,
    Regressor,
    Result,
    Sample,
    WeakLearner,
};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;
use std::ops::ControlFlow;

const DEFAULT_ROUND: usize = 100;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Round,TrainLoss,TrainError,Time\n";


/// Struct `Logger` provides a generic function that
/// logs the train loss, train error, and running time
/// for each step of boosting.
///
/// # Example
/// ```no_run
/// use fastboosts::prelude::*;
/// # let sample: Sample = todo!();
///
/// let booster = FastTree::init(&sample);
/// let weak_learner = RegressionTreeBuilder::new(&sample).build();
///
/// let mut logger = Logger::new(booster, weak_learner, LogisticLoss, &sample)
///     .print_every(1);
/// let f = logger.run_with_log("fasttree.csv").unwrap();
/// ```
pub struct Logger<'a, B, W, L> {
    booster: B,
    weak_learner: W,
    loss: L,
    sample: &'a Sample,
    time_limit: u128,
    round: usize,
}


impl<'a, B, W, L> Logger<'a, B, W, L> {
    /// Create a new instance of `Logger`.
    pub fn new(
        booster: B,
        weak_learner: W,
        loss: L,
        sample: &'a Sample,
    ) -> Self
    {
        Self {
            booster,
            weak_learner,
            loss,
            sample,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the time limit for boosting algorithm as milliseconds.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for boosting algorithm as seconds.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000);
        self
    }


    /// Set the interval to print the current status.
    /// By default, the logger prints its status every `100` rounds.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round;
        self
    }


    /// Returns a reference to the wrapped booster.
    pub fn booster(&self) -> &B {
        &self.booster
    }
}


impl<H, B, W, L, O, S> Logger<'_, B, W, L>
    where B: Booster<H, Output=O> + CurrentHypothesis<Output=S>,
          S: Regressor,
          W: WeakLearner<Hypothesis = H>,
          L: LossFunction,
{
    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "TRAIN".bold().blue(),
            "TRAIN".bold().green(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ROUND".bold().red(),
            "LOSS".bold().blue(),
            "ERROR".bold().green(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let limit = if self.time_limit != u128::MAX {
            time_format(self.time_limit)
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Booster".bold(),
            self.booster.name().bold().green(),
        );
        if let Some(info) = self.booster.info() {
            println!("{}", info_lines(info));
        }

        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Weak Learner".bold(),
            self.weak_learner.name().bold().green(),
        );
        if let Some(info) = self.weak_learner.info() {
            println!("{}", info_lines(info));
        }
        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Loss".bold(),
            self.loss.name().bold().green(),
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }


    /// Returns the train loss and the train error of `f`.
    fn evaluate(&self, f: &S) -> (f64, f64) {
        let target = self.sample.target();
        let scores = f.predict_all(self.sample);
        let loss = self.loss.eval(&scores[..], target);

        let n_sample = target.len().max(1) as f64;
        let error = scores.iter()
            .zip(target)
            .filter(|(&s, &y)| (s > 0.0) != (y > 0.0))
            .count() as f64 / n_sample;
        (loss, error)
    }


    /// Run the given boosting algorithm with logging to the console.
    /// Note that this method is almost the same as `Booster::run`.
    /// This method measures running time per iteration.
    pub fn run(&mut self) -> O {
        self.run_inner(None).0
    }


    /// Run the given boosting algorithm with logging,
    /// and write `Round,TrainLoss,TrainError,Time` per round
    /// to `filename`.
    pub fn run_with_log<P: AsRef<Path>>(&mut self, filename: P) -> Result<O> {
        let path = filename.as_ref();
        let mut file = File::create(path)
            .map_err(|e| Error::io(path, e))?;
        file.write_all(HEADER.as_bytes())
            .map_err(|e| Error::io(path, e))?;

        match self.run_inner(Some((path, file))) {
            (_, Some(e)) => Err(e),
            (f, None) => Ok(f),
        }
    }


    /// Returns the final hypothesis and
    /// the first error raised while writing the log.
    fn run_inner(&mut self, mut file: Option<(&Path, File)>)
        -> (O, Option<Error>)
    {
        // ---------------------------------------------------------------------
        // Pre-processing
        self.booster.preprocess();
        if self.round != usize::MAX { self.print_stats(); }

        // Cumulative time
        let mut time_acc = 0;
        let mut failure = None;

        // ---------------------------------------------------------------------
        // Boosting step
        if self.round != usize::MAX { self.print_log_header(); }
        let _ = (1..).try_for_each(|iter| {
            // Start measuring time
            let now = Instant::now();

            let flow = self.booster.boost(&self.weak_learner, iter);

            // Stop measuring and convert `Duration` to Milliseconds.
            let time = now.elapsed().as_millis();

            // Update the cumulative time
            time_acc += time;

            let f = self.booster.current_hypothesis();
            let (loss, error) = self.evaluate(&f);

            if let Some((path, file)) = file.as_mut() {
                let line = format!("{iter},{loss},{error},{time_acc}\n");
                if let Err(e) = file.write_all(line.as_bytes()) {
                    failure = Some(Error::io(*path, e));
                    return ControlFlow::Break(iter);
                }
            }

            if time_acc > self.time_limit {
                println!(
                    "{} {}\t\t{}\t{}\t{}\n",
                    "[TLE]".bold().bright_red(),
                    format!("{:>WIDTH$}", iter).bold().red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", loss).bold().blue(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", error).bold().green(),
                    time_format(time_acc).bold().cyan(),
                );
                return ControlFlow::Break(iter);
            }

            if self.round != usize::MAX && iter % self.round == 0 {
                println!(
                    "{} {}\t\t{}\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", iter).red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", loss).blue(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", error).green(),
                    time_format(time_acc).bold().cyan(),
                );
            }

            if flow.is_break() && self.round != usize::MAX {
                println!(
                    "{} {}\t\t{}\t{}\t{}\n",
                    "[FIN]".bold().bright_green(),
                    format!("{:>WIDTH$}", iter).red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", loss).bold().blue(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", error).bold().green(),
                    time_format(time_acc).bold().cyan(),
                );
            }
            flow
        });

        let f = self.booster.postprocess();
        (f, failure)
    }
}


fn info_lines(info: Vec<(&str, String)>) -> String {
    info.into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Feature, FastTree, LogisticLoss, RegressionTreeBuilder};

    #[test]
    fn time_is_formatted_by_magnitude() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(12_345), " 12.345s");
        assert_eq!(time_format(125_000), " 02m 05s");
        assert_eq!(time_format(3_725_000), " 01h 02m");
    }

    #[test]
    fn log_file_has_one_line_per_round() {
        let x = (0..40).map(|i| i as f64).collect::<Vec<_>>();
        let y = (0..40)
            .map(|i| if i < 20 { -1.0 } else { 1.0 })
            .collect::<Vec<_>>();
        let sample = Sample::from_features(
            vec![Feature::from_vals("x", x)], y
        ).unwrap();

        let booster = FastTree::init(&sample).n_trees(3);
        let weak_learner = RegressionTreeBuilder::new(&sample)
            .min_leaf_examples(5)
            .build();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let f = Logger::new(booster, weak_learner, LogisticLoss, &sample)
            .print_every(usize::MAX)
            .run_with_log(&path)
            .unwrap();
        assert_eq!(f.len(), 3);

        let log = std::fs::read_to_string(&path).unwrap();
        let lines = log.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Round,TrainLoss,TrainError,Time");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("3,"));
    }
}
