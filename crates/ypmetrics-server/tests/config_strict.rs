#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::time::Duration;

use ypmetrics_server::config::{self, Cli, SaveMode};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn deny_unknown_fields() {
    let bad = r#"
address: "localhost:9090"
store_intervall: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("restore: false\n").expect("must parse");
    assert_eq!(cfg.address, "localhost:8080");
    assert_eq!(cfg.store_interval, 300);
    assert_eq!(cfg.file_storage_path, "/tmp/metrics-db.json");
    assert!(!cfg.restore);
    assert_eq!(cfg.save_mode(), SaveMode::Periodic(Duration::from_secs(300)));
}

#[test]
fn bad_address_is_rejected() {
    let err = config::load_from_str("address: \"localhost\"\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    let err = config::load_from_str("address: \"host:http\"\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn env_overrides_flags() {
    let cli = Cli {
        address: Some("127.0.0.1:1000".into()),
        store_interval: Some(5),
        ..Default::default()
    };
    let cfg = config::resolve(cli, env_of(&[("ADDRESS", "127.0.0.1:2000"), ("STORE_INTERVAL", "")])).unwrap();
    assert_eq!(cfg.address, "127.0.0.1:2000");
    // empty env values do not override
    assert_eq!(cfg.store_interval, 5);
}

#[test]
fn zero_interval_is_sync_and_empty_path_disables() {
    let cli = Cli {
        store_interval: Some(0),
        ..Default::default()
    };
    let cfg = config::resolve(cli, env_of(&[])).unwrap();
    assert_eq!(cfg.save_mode(), SaveMode::Sync);

    let cli = Cli {
        file_storage_path: Some(String::new()),
        ..Default::default()
    };
    let cfg = config::resolve(cli, env_of(&[])).unwrap();
    assert_eq!(cfg.save_mode(), SaveMode::Disabled);
}

#[test]
fn restore_env_must_be_bool() {
    let err = config::resolve(Cli::default(), env_of(&[("RESTORE", "maybe")])).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let cfg = config::resolve(Cli::default(), env_of(&[("RESTORE", "false")])).unwrap();
    assert!(!cfg.restore);
}

#[test]
fn restore_env_accepts_short_bool_spellings() {
    for raw in ["0", "f", "F", "FALSE", "False"] {
        let cfg = config::resolve(Cli::default(), env_of(&[("RESTORE", raw)])).unwrap();
        assert!(!cfg.restore, "{raw}");
    }

    // the flag says false, the environment wins
    for raw in ["1", "t", "T", "TRUE", "True"] {
        let cli = Cli {
            restore: Some(false),
            ..Default::default()
        };
        let cfg = config::resolve(cli, env_of(&[("RESTORE", raw)])).unwrap();
        assert!(cfg.restore, "{raw}");
    }

    assert!(config::resolve(Cli::default(), env_of(&[("RESTORE", "yes")])).is_err());
}

#[test]
fn flags_parse_like_the_command_line() {
    use clap::Parser;

    let cli = Cli::try_parse_from(["ypmetrics-server", "-a", "0.0.0.0:9000", "-i", "0", "-r", "false"]).unwrap();
    let cfg = config::resolve(cli, env_of(&[])).unwrap();
    assert_eq!(cfg.address, "0.0.0.0:9000");
    assert_eq!(cfg.store_interval, 0);
    assert!(!cfg.restore);
}
