use super::*;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn default_openai_config() {
    let config = OpenAiConfig::default();
    assert_eq!(config.base_url, "https://api.openai.com");
    assert_eq!(config.model, "text-embedding-ada-002");
    assert_eq!(config.timeout_seconds, 30);
    assert!(config.api_key.is_empty());
}

#[test]
fn load_missing_file_returns_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::load(dir.path()).expect("Failed to load config");

    assert_eq!(config.openai, OpenAiConfig::default());
    assert_eq!(config.pinecone, PineconeConfig::default());
    assert_eq!(config.base_dir, dir.path());
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        openai: OpenAiConfig {
            api_key: "sk-test".to_string(),
            model: "text-embedding-ada-002".to_string(),
            ..OpenAiConfig::default()
        },
        pinecone: PineconeConfig {
            api_key: "pc-test".to_string(),
            index_host: "https://papers.svc.us-east-1.pinecone.io".to_string(),
            timeout_seconds: 15,
        },
        base_dir: dir.path().to_path_buf(),
    };
    config.save().expect("Failed to save config");

    let loaded = Config::load(dir.path()).expect("Failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn invalid_index_host_rejected() {
    let config = PineconeConfig {
        index_host: "not a url".to_string(),
        ..PineconeConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl(_))
    ));
}

#[test]
fn empty_model_rejected() {
    let config = OpenAiConfig {
        model: "  ".to_string(),
        ..OpenAiConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidModel(_))
    ));
}

#[test]
fn zero_timeout_rejected() {
    let config = OpenAiConfig {
        timeout_seconds: 0,
        ..OpenAiConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidTimeout(0))
    ));
}

#[test]
fn load_rejects_invalid_config_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("config.toml"),
        "[pinecone]\nindex_host = \"not a url\"\n",
    )
    .expect("Failed to write config file");

    assert!(Config::load(dir.path()).is_err());
}

#[test]
#[serial]
fn api_key_falls_back_to_environment() {
    // SAFETY: test is serialized; no other thread reads the environment here.
    unsafe { std::env::set_var(OPENAI_API_KEY_VAR, "sk-from-env") };

    let config = OpenAiConfig::default();
    assert_eq!(config.resolved_api_key().as_deref(), Some("sk-from-env"));

    // SAFETY: as above.
    unsafe { std::env::remove_var(OPENAI_API_KEY_VAR) };
}

#[test]
#[serial]
fn configured_api_key_wins_over_environment() {
    // SAFETY: test is serialized; no other thread reads the environment here.
    unsafe { std::env::set_var(OPENAI_API_KEY_VAR, "sk-from-env") };

    let config = OpenAiConfig {
        api_key: "sk-from-file".to_string(),
        ..OpenAiConfig::default()
    };
    assert_eq!(config.resolved_api_key().as_deref(), Some("sk-from-file"));

    // SAFETY: as above.
    unsafe { std::env::remove_var(OPENAI_API_KEY_VAR) };
}
