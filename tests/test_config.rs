use std::collections::HashMap;
use std::path::PathBuf;

use star_striker::config::*;
use star_striker::error::ConfigError;

fn load(vars: &[(&str, &str)]) -> Result<GameConfig, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    GameConfig::from_lookup(|var| map.get(var).cloned())
}

#[test]
fn defaults_when_nothing_set() {
    let config = load(&[]).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.frame_rate, 60);
    assert_eq!(config.seed, None);
    assert_eq!(config.log_file, None);
}

#[test]
fn reads_every_variable() {
    let config = load(&[
        (SEED_VAR, "1234"),
        (FPS_VAR, " 30 "),
        (LOG_VAR, "/tmp/striker.log"),
    ])
    .unwrap();
    assert_eq!(config.seed, Some(1234));
    assert_eq!(config.frame_rate, 30);
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/striker.log")));
}

#[test]
fn blank_values_count_as_unset() {
    let config = load(&[(SEED_VAR, "  "), (LOG_VAR, "")]).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn bad_seed_is_rejected() {
    let err = load(&[(SEED_VAR, "forty-two")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == SEED_VAR));
    assert!(err.to_string().contains("forty-two"));
}

#[test]
fn frame_rate_must_be_in_range() {
    let err = load(&[(FPS_VAR, "0")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange { value: 0, min: MIN_FPS, max: MAX_FPS, .. }
    ));
    assert!(load(&[(FPS_VAR, "241")]).is_err());
    assert!(load(&[(FPS_VAR, "fast")]).is_err());
    assert_eq!(load(&[(FPS_VAR, "240")]).unwrap().frame_rate, 240);
}
