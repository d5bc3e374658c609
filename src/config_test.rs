use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_apply_when_only_key_set() {
    let cfg = config_from(&[("OPENFORT_PUBLISHABLE_KEY", "pk_test")]).unwrap();
    assert_eq!(cfg.provider.publishable_key, "pk_test");
    assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        cfg.provider.timeouts,
        ProviderTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.app_url, DEFAULT_APP_URL);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.credentials_path, PathBuf::from(DEFAULT_CREDENTIALS_PATH));
}

#[test]
fn overrides_are_parsed_and_urls_trimmed() {
    let cfg = config_from(&[
        ("OPENFORT_PUBLISHABLE_KEY", "pk_live"),
        ("OPENFORT_BASE_URL", "https://iam.example.test/"),
        ("OPENFORT_REQUEST_TIMEOUT_SECS", "5"),
        ("OPENFORT_CONNECT_TIMEOUT_SECS", " 2 "),
        ("APP_URL", "https://app.example.test/"),
        ("PORT", "8080"),
        ("AUTH_CREDENTIALS_PATH", "/tmp/creds.json"),
    ])
    .unwrap();
    assert_eq!(cfg.provider.base_url, "https://iam.example.test");
    assert_eq!(cfg.provider.timeouts, ProviderTimeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.app_url, "https://app.example.test");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.credentials_path, PathBuf::from("/tmp/creds.json"));
}

#[test]
fn missing_publishable_key_errors() {
    let err = config_from(&[]).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: "OPENFORT_PUBLISHABLE_KEY" });
    assert!(err.to_string().contains("OPENFORT_PUBLISHABLE_KEY"));
}

#[test]
fn blank_publishable_key_errors() {
    let err = config_from(&[("OPENFORT_PUBLISHABLE_KEY", "   ")]).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: "OPENFORT_PUBLISHABLE_KEY" });
}

#[test]
fn invalid_port_errors() {
    let err = config_from(&[("OPENFORT_PUBLISHABLE_KEY", "pk"), ("PORT", "eighty")]).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });
}

#[test]
fn cli_overrides_win() {
    let cfg = config_from(&[("OPENFORT_PUBLISHABLE_KEY", "pk"), ("PORT", "4000")])
        .unwrap()
        .with_overrides(Some("http://127.0.0.1:9000/".into()), Some(9000));
    assert_eq!(cfg.app_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.port, 9000);
}

#[test]
fn absent_overrides_keep_env_values() {
    let cfg = config_from(&[("OPENFORT_PUBLISHABLE_KEY", "pk"), ("PORT", "4000")])
        .unwrap()
        .with_overrides(None, None);
    assert_eq!(cfg.app_url, DEFAULT_APP_URL);
    assert_eq!(cfg.port, 4000);
}
