use std::env;
use fastboosts::prelude::*;
use polars::prelude::DataFrame;


type PurchasePipeline = EstimatorChain<
    EstimatorChain<OneHotEncoder, Concatenate>,
    FastTreeBinaryTrainer,
>;


fn customers() -> DataFrame {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/customer.csv");

    TextLoader::new()
        .file(path)
        .has_header(true)
        .schema(Customer::schema())
        .load()
        .unwrap()
}


fn pipeline(options: FastTreeBinaryOptions) -> PurchasePipeline {
    OneHotEncoder::new(["Age", "Income", "Gender", "MaritalStatus"])
        .output_kind(OutputKind::Indicator)
        .append(Concatenate::new(
            "Features",
            ["Gender", "MaritalStatus", "Age", "Income"],
        ))
        .append(FastTreeBinaryTrainer::new(options))
}


fn options() -> FastTreeBinaryOptions {
    FastTreeBinaryOptions::new("Purchase")
        .feature_column_name("Features")
        .number_of_leaves(4)
        .minimum_example_count_per_leaf(20)
        .number_of_trees(4)
        .maximum_bin_count_per_feature(254)
        .feature_fraction(1.0)
        .learning_rate(0.1)
}


/// Tests for the purchase workflow on `customer.csv`.
#[cfg(test)]
pub mod purchase_workflow {
    use super::*;

    #[test]
    fn split_holds_out_a_fifth() {
        let data = customers();
        assert_eq!(data.height(), 250);
        assert_eq!(Schema::of(&data), Customer::schema());

        let (train, test) = train_test_split(&data, 0.2, 1234).unwrap();
        assert_eq!(train.height(), 200);
        assert_eq!(test.height(), 50);
    }


    #[test]
    fn features_follow_the_concatenation_order() {
        let data = customers();
        let model = pipeline(options()).fit(&data).unwrap();

        let names = model.last().predictor().feature_names();
        assert!(names[0].starts_with("Gender."));
        assert!(names.iter().any(|n| n == "MaritalStatus.Single"));
        assert!(names.iter().any(|n| n == "Age.35"));
        assert!(names.last().unwrap().starts_with("Income."));
    }


    #[test]
    fn accuracy_on_the_held_out_rows() {
        let data = customers();
        let (train, test) = train_test_split(&data, 0.2, 1234).unwrap();

        let model = pipeline(options()).fit(&train).unwrap();
        let scored = model.transform(&test).unwrap();
        let metrics = BinaryClassificationMetrics::evaluate(&scored, "Purchase")
            .unwrap();
        println!("Accuracy: {:.2}%", metrics.accuracy * 100.0);
        println!("{metrics}");

        assert!(metrics.accuracy > 0.8);
        assert!(metrics.area_under_roc_curve > 0.8);
        assert_eq!(metrics.confusion_matrix.total(), 50);
    }


    #[test]
    fn saved_model_predicts_a_single_customer() {
        let data = customers();
        let (train, test) = train_test_split(&data, 0.2, 1234).unwrap();
        let model = pipeline(options()).fit(&train).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fastboosts::save(&model, &Schema::of(&data), &path).unwrap();
        let (loaded, schema): (PipelineModel, Schema) = fastboosts::load(&path)
            .unwrap();
        assert_eq!(schema, Customer::schema());
        assert_eq!(loaded, model);

        // The reloaded model scores the same as the fitted one.
        let before = model.transform(&test).unwrap();
        let after = loaded.transform(&test).unwrap();
        assert!(before.column("Score").unwrap()
            .series_equal(after.column("Score").unwrap()));

        let engine = PredictionEngine::<Customer>::new(loaded);
        let single = Customer::new(35.0, "Male", 50_000.0, "Single");
        let married = Customer::new(35.0, "Male", 50_000.0, "Married");

        let prediction = engine.predict(&single).unwrap();
        println!("Prediction: {}", prediction.predicted_label);
        assert!(prediction.predicted_label);
        assert!(prediction.probability > 0.5);
        assert!(!engine.predict(&married).unwrap().predicted_label);
    }


    #[test]
    fn unseen_categories_are_scored() {
        let data = customers();
        let model = pipeline(options()).fit(&data).unwrap();

        let engine = PredictionEngine::<Customer>::new(model);
        let stranger = Customer::new(99.0, "Other", 1.0, "Widowed");
        let prediction = engine.predict(&stranger).unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
    }


    #[test]
    fn fractional_values_keep_their_categories() {
        let text = "\
            Age,Gender,Income,MaritalStatus,Purchase\n\
            41.3,Male,50000.5,Single,true\n\
            27.8,Female,38000.25,Married,false\n";
        let data = TextLoader::<&str>::new()
            .schema(Customer::schema())
            .parse(text)
            .unwrap();
        let encoder = OneHotEncoder::new(["Age", "Income"])
            .output_kind(OutputKind::Indicator)
            .fit(&data)
            .unwrap();

        let customer = Customer::new(41.3, "Male", 50_000.5, "Single");
        let frame = Customer::to_frame(&[customer]).unwrap();
        let out = encoder.transform(&frame).unwrap();

        let slot = |name: &str| out.column(name).unwrap().f64().unwrap().get(0);
        assert_eq!(slot("Age.41.3"), Some(1.0));
        assert_eq!(slot("Age.27.8"), Some(0.0));
        assert_eq!(slot("Income.50000.5"), Some(1.0));
        assert_eq!(slot("Income.38000.25"), Some(0.0));
    }


    #[test]
    fn training_log_has_one_row_per_tree() {
        let data = customers();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");

        pipeline(options().log_file(&path)).fit(&data).unwrap();

        let log = std::fs::read_to_string(&path).unwrap();
        let mut lines = log.lines();
        assert_eq!(lines.next(), Some("Round,TrainLoss,TrainError,Time"));
        assert_eq!(lines.count(), 4);
    }


    #[test]
    fn invalid_options_fail_at_fit_time() {
        let data = customers();
        let result = pipeline(options().number_of_leaves(1)).fit(&data);
        assert!(matches!(result, Err(Error::InvalidOption(_))));
    }
}
