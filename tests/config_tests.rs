use poker_table::config::{ConfigError, EngineConfig, DEFAULT_BOT_NAMES};
use poker_table::domain::{chips::Chips, table::TableConfig};

#[test]
fn presets_are_valid() {
    for cfg in [EngineConfig::texas_holdem(), EngineConfig::five_card_stud()] {
        cfg.validate().unwrap();
    }
    assert_eq!(EngineConfig::default(), EngineConfig::texas_holdem());
    assert_eq!(
        EngineConfig::five_card_stud().table,
        TableConfig::five_card_stud()
    );
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = EngineConfig::from_json_str(r#"{ "seed": 5, "bots": { "count": 3 } }"#).unwrap();
    assert_eq!(cfg.seed, Some(5));
    assert_eq!(cfg.bots.count, 3);
    assert_eq!(cfg.bots.names.len(), DEFAULT_BOT_NAMES.len());
    assert_eq!(cfg.table.starting_purse, Chips(1000));
    assert_eq!(cfg.bots.full_names()[0], "Clyd BOT");
}

#[test]
fn json_round_trip_through_pretty_printer() {
    let cfg = EngineConfig::five_card_stud();
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(EngineConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn rejects_inconsistent_values() {
    let err = EngineConfig::from_json_str(r#"{ "table": { "max_seats": 9 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = EngineConfig::from_json_str(r#"{ "table": { "max_seats": 1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = EngineConfig::from_json_str(r#"{ "table": { "max_seats": 2 }, "bots": { "count": 3 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = EngineConfig::from_json_str(r#"{ "bots": { "count": 2, "names": ["Solo"] } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_json_and_missing_file() {
    assert!(matches!(
        EngineConfig::from_json_str("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        EngineConfig::from_file("/definitely/not/here.json"),
        Err(ConfigError::Io(_))
    ));
}
