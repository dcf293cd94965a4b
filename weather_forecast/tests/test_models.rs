use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use weather_forecast::models::decision_tree::{DecisionTree, TreeConfig};
use weather_forecast::models::random_forest::RandomForest;
use weather_forecast::trainer::Trainer;
use weather_forecast::{
    ClassificationModel, FeatureSet, ForecastError, ForestConfig, Observation, PredictorConfig,
    TrainedClassifier, WeatherCode, WeatherData,
};

/// Rainfall alone decides the code: wet days are 63, dry days 1
fn create_test_features() -> FeatureSet {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut observations = Vec::new();
    for day in 0..120 {
        let wet = day % 4 == 0;
        for city in ["Batticaloa", "Matara"] {
            observations.push(Observation {
                city: city.to_string(),
                date: start + Duration::days(day),
                temperature_mean: 27.0 + (day % 7) as f64 * 0.3,
                rainfall_sum: if wet { 15.0 + (day % 5) as f64 } else { 0.0 },
                weather_code: WeatherCode::new(if wet { "63" } else { "1" }),
            });
        }
    }
    FeatureSet::engineer(&WeatherData::from_observations(observations).unwrap())
}

#[test]
fn test_decision_tree_learns_rainfall_rule() {
    let features = create_test_features();
    let matrix = features.matrix();
    let mut rng = StdRng::seed_from_u64(42);

    let tree = DecisionTree::new(TreeConfig::default())
        .unwrap()
        .train(&matrix, features.targets(), features.n_classes(), &mut rng)
        .unwrap();

    assert_eq!(tree.n_classes(), 2);
    for (row, &target) in matrix.iter().zip(features.targets()) {
        assert_eq!(tree.predict(row), target);
    }
}

#[test]
fn test_random_forest_on_engineered_features() {
    let features = create_test_features();
    let matrix = features.matrix();
    let mut rng = StdRng::seed_from_u64(42);

    let forest = RandomForest::new(ForestConfig {
        n_trees: 20,
        ..ForestConfig::default()
    })
    .unwrap();
    assert_eq!(forest.name(), "Random Forest (trees=20)");

    let trained = forest
        .train(&matrix, features.targets(), features.n_classes(), &mut rng)
        .unwrap();

    let wet = features.code_encoder().encode(&WeatherCode::new("63")).unwrap();
    let mut wet_day = matrix[0];
    wet_day[1] = 30.0;
    assert_eq!(trained.predict(&wet_day), wet);

    let proba = trained.predict_proba(&wet_day);
    assert_relative_eq!(proba.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_trainer_reports_holdout_accuracy() {
    let features = create_test_features();
    let config = PredictorConfig::default().with_trees(15);

    let trained = Trainer::from_config(&config).unwrap().train(&features).unwrap();

    assert_eq!(trained.test_rows, 48);
    assert_eq!(trained.train_rows, 192);
    let accuracy = trained.holdout_accuracy.unwrap();
    assert!(accuracy > 0.9, "holdout accuracy {}", accuracy);
}

#[test]
fn test_trainer_works_with_any_model() {
    let features = create_test_features();
    let model = DecisionTree::new(TreeConfig {
        max_depth: Some(3),
        ..TreeConfig::default()
    })
    .unwrap();

    let trained = Trainer::new(model, 1, 0.25).train(&features).unwrap();
    assert_eq!(trained.test_rows, 60);
    assert!(trained.classifier.depth() <= 3);
}

#[test]
fn test_trainer_rejects_invalid_config() {
    let config = PredictorConfig::default().with_trees(0);
    assert!(matches!(
        Trainer::from_config(&config),
        Err(ForecastError::InvalidParameter(_))
    ));
}
