//! Tests for run configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        target_length = 40

        [inputs]
        responses = "r.csv"
        keys = "k.csv"

        [strategy]
        type = "exhaustive"
        max_subsets = 500
    "#;

    let config = FormConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.target_length().unwrap(), 40);
    assert_eq!(config.inputs.responses, PathBuf::from("r.csv"));
    assert_eq!(config.inputs.keys, PathBuf::from("k.csv"));
    assert_eq!(config.inputs.domains, PathBuf::from("alt_domains.csv"));
    assert_eq!(
        config.strategy,
        StrategyConfig::Exhaustive(ExhaustiveConfig { max_subsets: 500 })
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        target_length: 75
        strategy:
          type: greedy_backward
          reference: checked
    "#;

    let config = FormConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.target_length, Some(75));
    assert_eq!(
        config.strategy,
        StrategyConfig::GreedyBackward(GreedyConfig {
            reference: ReferenceItem::Checked
        })
    );
    assert_eq!(config.inputs, InputConfig::default());
}

#[test]
fn test_defaults() {
    let config = FormConfig::from_toml_str("target_length = 10").unwrap();

    assert_eq!(
        config.strategy,
        StrategyConfig::GreedyBackward(GreedyConfig {
            reference: ReferenceItem::FirstItem
        })
    );
    assert_eq!(
        config.inputs.responses,
        PathBuf::from("alt_response_string.csv")
    );
}

#[test]
fn test_exhaustive_default_limit() {
    let config = FormConfig::from_toml_str(
        r#"
        target_length = 3
        [strategy]
        type = "exhaustive"
        "#,
    )
    .unwrap();

    assert_eq!(
        config.strategy,
        StrategyConfig::Exhaustive(ExhaustiveConfig {
            max_subsets: 100_000
        })
    );
}

#[test]
fn test_missing_target_length() {
    let config = FormConfig::new();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid(msg)) if msg.contains("target_length")
    ));
}

#[test]
fn test_zero_target_length() {
    let config = FormConfig::new().with_target_length(0);
    assert!(config.target_length().is_err());
}

#[test]
fn test_zero_subset_limit() {
    let config = FormConfig::new()
        .with_target_length(5)
        .with_strategy(StrategyConfig::Exhaustive(ExhaustiveConfig { max_subsets: 0 }));
    assert!(config.validate().is_err());
}

#[test]
fn test_builder() {
    let config = FormConfig::new()
        .with_target_length(75)
        .with_strategy(StrategyConfig::Exhaustive(ExhaustiveConfig::default()));

    assert!(config.validate().is_ok());
    assert_eq!(config.target_length().unwrap(), 75);
}

#[test]
fn test_unknown_strategy_rejected() {
    let result = FormConfig::from_toml_str(
        r#"
        target_length = 3
        [strategy]
        type = "annealing"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("form.toml");
    std::fs::write(&toml_path, "target_length = 12\n").unwrap();
    assert_eq!(FormConfig::load(&toml_path).unwrap().target_length, Some(12));

    let yaml_path = dir.path().join("form.yml");
    std::fs::write(&yaml_path, "target_length: 13\n").unwrap();
    assert_eq!(FormConfig::load(&yaml_path).unwrap().target_length, Some(13));

    assert!(matches!(
        FormConfig::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_relative_inputs() {
    let inputs = InputConfig::default().relative_to(Path::new("/data/beta"));
    assert_eq!(inputs.keys, PathBuf::from("/data/beta/alt_keys.csv"));
}
