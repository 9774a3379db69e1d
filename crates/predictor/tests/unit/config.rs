//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, selector parsing,
//! width validation, and storage accounting.

use std::io::Write;

use bpsim_core::ConfigError;
use bpsim_core::config::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn test_config_default() {
    let config = PredictorConfig::default();
    assert_eq!(config.predictor, BranchPredictor::Static);
    assert_eq!(config.budget_bits, 64 * 1024 + 1024);
    assert_eq!(config.storage_bits(), 0);
    assert_eq!(config.validate().unwrap(), 0);
}

#[test]
fn test_gshare_defaults() {
    let gshare = GShareConfig::default();
    assert_eq!(gshare.history_bits, 15);
    assert_eq!(gshare.storage_bits(), 65_551);
}

#[test]
fn test_tournament_defaults() {
    let t = TournamentConfig::default();
    assert_eq!(t.global_history_bits, 12);
    assert_eq!(t.local_history_bits, 10);
    assert_eq!(t.pc_index_bits, 10);
    assert_eq!(t.choice_bits, 12);
    assert_eq!(t.path_history_bits, 12);
    assert_eq!(t.choice_index, ChoiceIndex::GlobalHistory);
    assert_eq!(t.storage_bits(), 28_696);
}

#[test]
fn test_perceptron_defaults() {
    let p = PerceptronConfig::default();
    assert_eq!(p.history_length, 31);
    assert_eq!(p.table_bits, 8);
    assert_eq!(p.storage_bits(), 65_567);
}

#[test]
fn test_every_default_variant_fits_budget() {
    for selector in ["static", "gshare", "tournament", "custom"] {
        let config: PredictorConfig = selector.parse().unwrap();
        assert!(config.validate().is_ok(), "{selector}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn test_empty_json_uses_defaults() {
    let config = PredictorConfig::from_json("{}").unwrap();
    assert_eq!(config.predictor, BranchPredictor::Static);
    assert_eq!(config.budget_bits, 66_560);
    assert_eq!(config.gshare.history_bits, 15);
}

#[test]
fn test_partial_tournament_json() {
    let json = r#"{
        "predictor": "Tournament",
        "tournament": { "local_history_bits": 8, "choice_index": "PathHistory" }
    }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(config.predictor, BranchPredictor::Tournament);
    assert_eq!(config.tournament.local_history_bits, 8);
    assert_eq!(config.tournament.global_history_bits, 12);
    assert_eq!(config.tournament.choice_index, ChoiceIndex::PathHistory);
    assert!(config.validate().is_ok());
}

#[rstest]
#[case("\"GShare\"", BranchPredictor::GShare)]
#[case("\"Gshare\"", BranchPredictor::GShare)]
#[case("\"Perceptron\"", BranchPredictor::Custom)]
#[case("\"Custom\"", BranchPredictor::Custom)]
fn test_predictor_aliases(#[case] name: &str, #[case] expected: BranchPredictor) {
    let config = PredictorConfig::from_json(&format!("{{ \"predictor\": {name} }}")).unwrap();
    assert_eq!(config.predictor, expected);
}

#[test]
fn test_unknown_predictor_json_rejected() {
    let err = PredictorConfig::from_json(r#"{ "predictor": "Tage" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "predictor": "Custom", "budget_bits": 5000, "custom": {{ "history_length": 8, "table_bits": 6 }} }}"#
    )
    .unwrap();

    let config = PredictorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.predictor, BranchPredictor::Custom);
    assert_eq!(config.budget_bits, 5000);
    assert_eq!(config.validate().unwrap(), 4616);
}

#[test]
fn test_missing_file() {
    let err = PredictorConfig::from_file("/nonexistent/bpsim.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

// ══════════════════════════════════════════════════════════
// 3. Selectors
// ══════════════════════════════════════════════════════════

#[test]
fn test_selector_gshare_width() {
    let config: PredictorConfig = "gshare:13".parse().unwrap();
    assert_eq!(config.predictor, BranchPredictor::GShare);
    assert_eq!(config.gshare.history_bits, 13);
}

#[test]
fn test_selector_tournament_widths() {
    let config: PredictorConfig = "tournament:11:9:8".parse().unwrap();
    let t = &config.tournament;
    assert_eq!(t.global_history_bits, 11);
    assert_eq!(t.choice_bits, 11);
    assert_eq!(t.local_history_bits, 9);
    assert_eq!(t.pc_index_bits, 8);
    assert_eq!(t.path_history_bits, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_selector_tournament_path_follows_choice() {
    let mut config =
        PredictorConfig::from_json(r#"{ "tournament": { "choice_index": "PathHistory" } }"#).unwrap();
    config.apply_selector("tournament:10:10:10").unwrap();
    assert_eq!(config.tournament.path_history_bits, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_selector_custom_widths() {
    let config: PredictorConfig = "Custom:16:7".parse().unwrap();
    assert_eq!(config.predictor, BranchPredictor::Custom);
    assert_eq!(config.custom.history_length, 16);
    assert_eq!(config.custom.table_bits, 7);
}

#[test]
fn test_selector_overrides_json_variant() {
    let mut config = PredictorConfig::from_json(r#"{ "predictor": "Tournament" }"#).unwrap();
    config.apply_selector("static").unwrap();
    assert_eq!(config.predictor, BranchPredictor::Static);
}

#[rstest]
#[case("")]
#[case("bimodal")]
#[case("tage")]
#[case("gshare:")]
#[case("gshare:x")]
#[case("gshare:12:3")]
#[case("tournament:12:10")]
#[case("custom:31")]
#[case("static:1")]
fn test_invalid_selectors(#[case] selector: &str) {
    let err = selector.parse::<PredictorConfig>().unwrap_err();
    assert!(
        matches!(&err, ConfigError::InvalidSelector(s) if s == selector),
        "{selector}: {err}"
    );
}

// ══════════════════════════════════════════════════════════
// 4. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("gshare:0", "gshare.history_bits", 0, 24)]
#[case("gshare:25", "gshare.history_bits", 25, 24)]
#[case("tournament:0:10:10", "tournament.global_history_bits", 0, 24)]
#[case("tournament:12:30:10", "tournament.local_history_bits", 30, 24)]
#[case("tournament:12:10:0", "tournament.pc_index_bits", 0, 24)]
#[case("custom:63:4", "custom.history_length", 63, 62)]
#[case("custom:8:0", "custom.table_bits", 0, 24)]
fn test_invalid_widths(
    #[case] selector: &str,
    #[case] field: &str,
    #[case] bits: usize,
    #[case] max: usize,
) {
    let config: PredictorConfig = selector.parse().unwrap();
    match config.validate() {
        Err(ConfigError::InvalidWidth {
            field: f,
            bits: b,
            max: m,
        }) => {
            assert_eq!((f, b, m), (field, bits, max));
        }
        other => panic!("{selector}: unexpected {other:?}"),
    }
}

#[test]
fn test_validation_only_checks_active_variant() {
    let mut config = PredictorConfig::default();
    config.gshare.history_bits = 99;
    assert!(config.validate().is_ok());
}

#[test]
fn test_budget_boundary() {
    let mut config: PredictorConfig = "gshare:10".parse().unwrap();
    config.budget_bits = 2058;
    assert_eq!(config.validate().unwrap(), 2058);
    config.budget_bits = 2057;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BudgetExceeded {
            required: 2058,
            budget: 2057
        })
    ));
}

#[test]
fn test_error_messages() {
    let err = ConfigError::BudgetExceeded {
        required: 10,
        budget: 5,
    };
    assert_eq!(
        err.to_string(),
        "predictor needs 10 bits of storage, budget is 5 bits"
    );
    let err = ConfigError::InvalidSelector("tage".into());
    assert_eq!(err.to_string(), "unsupported predictor selector 'tage'");
}
