//! `fastboosts`: trains a purchase classifier on a customer CSV file,
//! reports its test accuracy, and scores a single customer
//! with the reloaded model.
use clap::Parser;
use colored::Colorize;

use fastboosts::prelude::*;
use fastboosts::constants::*;

use std::path::PathBuf;
use std::process::ExitCode;


const LABEL: &str = "Purchase";


#[derive(Parser)]
#[command(name = "fastboosts")]
#[command(about = "Train a FastTree purchase classifier on customer data")]
#[command(version)]
struct Cli {
    /// Customer CSV file with a header row
    #[arg(short, long, default_value = "customer.csv")]
    data: PathBuf,

    /// Output model file (JSON)
    #[arg(short, long, default_value = "model.json")]
    model: PathBuf,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Random seed of the split and the feature sampler
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Maximal number of leaves per tree
    #[arg(long, default_value_t = DEFAULT_NUMBER_OF_LEAVES)]
    leaves: usize,

    /// Minimal number of training examples per leaf
    #[arg(long, default_value_t = DEFAULT_MIN_EXAMPLES_PER_LEAF)]
    min_leaf_examples: usize,

    /// Number of trees
    #[arg(long, default_value_t = DEFAULT_NUMBER_OF_TREES)]
    trees: usize,

    /// Maximal number of bins per feature
    #[arg(long, default_value_t = DEFAULT_MAX_BINS)]
    max_bins: usize,

    /// Fraction of features drawn for each tree
    #[arg(long, default_value_t = DEFAULT_FEATURE_FRACTION)]
    feature_fraction: f64,

    /// Shrinkage applied to each tree
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Print the training log and the full evaluation report
    #[arg(short, long)]
    verbose: bool,

    /// Write the per-round training log to this CSV file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Age of the customer to score
    #[arg(long, default_value_t = 35.0)]
    age: f32,

    /// Gender of the customer to score
    #[arg(long, default_value = "Male")]
    gender: String,

    /// Income of the customer to score
    #[arg(long, default_value_t = 50_000.0)]
    income: f32,

    /// Marital status of the customer to score
    #[arg(long, default_value = "Single")]
    marital_status: String,
}


fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "[ERR]".bold().bright_red());
            ExitCode::FAILURE
        },
    }
}


fn run(cli: &Cli) -> Result<()> {
    // Load the data and hold out the test rows.
    let data = TextLoader::new()
        .file(&cli.data)
        .has_header(true)
        .schema(Customer::schema())
        .load()?;
    let (train, test) = train_test_split(&data, cli.test_fraction, cli.seed)?;

    let mut options = FastTreeBinaryOptions::new(LABEL)
        .feature_column_name(DEFAULT_FEATURE_COLUMN)
        .number_of_leaves(cli.leaves)
        .minimum_example_count_per_leaf(cli.min_leaf_examples)
        .number_of_trees(cli.trees)
        .maximum_bin_count_per_feature(cli.max_bins)
        .feature_fraction(cli.feature_fraction)
        .learning_rate(cli.learning_rate)
        .seed(cli.seed)
        .verbose(cli.verbose);
    if let Some(path) = &cli.log {
        options = options.log_file(path);
    }

    let pipeline = OneHotEncoder::new(["Age", "Income", "Gender", "MaritalStatus"])
        .output_kind(OutputKind::Indicator)
        .append(Concatenate::new(
            DEFAULT_FEATURE_COLUMN,
            ["Gender", "MaritalStatus", "Age", "Income"],
        ))
        .append(FastTreeBinaryTrainer::new(options));

    // Train, then evaluate on the held-out rows.
    let model = pipeline.fit(&train)?;
    let scored = model.transform(&test)?;
    let metrics = BinaryClassificationMetrics::evaluate(&scored, LABEL)?;
    println!("Accuracy: {:.2}%", metrics.accuracy * 100.0);
    if cli.verbose {
        println!("{metrics}");
    }

    fastboosts::save(&model, &Schema::of(&data), &cli.model)?;
    let (model, _schema): (PipelineModel, Schema) = fastboosts::load(&cli.model)?;

    let engine = PredictionEngine::<Customer>::new(model);
    let customer = Customer::new(
        cli.age, &cli.gender, cli.income, &cli.marital_status
    );
    let prediction = engine.predict(&customer)?;
    println!("Prediction: {}", prediction.predicted_label);

    Ok(())
}
