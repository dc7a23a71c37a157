use super::{apply_env, apply_file, load_settings, Settings, DEFAULT_MAX_BODY_BYTES};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_leave_store_unconfigured() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8443");
    assert_eq!(settings.store_table, "junior_leads");
    assert_eq!(settings.cors_origins, vec!["*".to_string()]);
    assert_eq!(settings.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    assert!(settings.store_config().expect("no error").is_none());
}

#[test]
fn file_values_apply_and_env_overrides_them() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
store_url = "https://file.example"
store_table = "leads"
cors_origins = "https://a.example, https://b.example"
max_body_bytes = "1024"
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.store_table, "leads");
    assert_eq!(settings.cors_origins.len(), 2);
    assert_eq!(settings.max_body_bytes, 1024);

    apply_env(
        &mut settings,
        env_from(&[
            ("STORE_URL", "https://short.example"),
            ("APP__STORE_URL", "https://env.example/"),
            ("STORE_SERVICE_KEY", "secret"),
        ]),
    );
    let store = settings
        .store_config()
        .expect("valid")
        .expect("configured");
    assert_eq!(store.base_url, "https://env.example");
    assert_eq!(store.service_key, "secret");
    assert_eq!(store.table, "leads");
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "this is = = not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn blank_key_counts_as_unconfigured() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("STORE_URL", "https://store.example"), ("STORE_SERVICE_KEY", "  ")]),
    );
    assert!(settings.store_config().expect("no error").is_none());
}

#[test]
fn invalid_store_url_is_an_error() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("STORE_URL", "ftp://store.example"), ("STORE_SERVICE_KEY", "k")]),
    );
    assert!(settings.store_config().is_err());

    apply_env(&mut settings, env_from(&[("STORE_URL", "not a url")]));
    assert!(settings.store_config().is_err());
}

#[test]
fn loads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("lead_intake_settings_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("server.toml");
    fs::write(&path, "store_table = \"from_file\"\n").expect("write settings");

    let settings = load_settings(&path);
    if env::var("STORE_TABLE").is_err() && env::var("APP__STORE_TABLE").is_err() {
        assert_eq!(settings.store_table, "from_file");
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}
