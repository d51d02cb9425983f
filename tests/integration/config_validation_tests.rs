//! Configuration loading as the binary does it

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::database::test_db_config;
    use estate_admin::config::{BackendConfig, Config};
    use estate_admin::{AdminError, HttpServer};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
server:
  host: "0.0.0.0"
  port: 9000
  workers: 2
  dev_mode: true
  cors:
    enabled: true
    allowed_origins: ["https://admin.example.com"]
    max_age: 600

storage:
  database:
    url: "sqlite::memory:"
    max_connections: 1
    connection_timeout: 5

auth:
  jwt_secret: "file-provided-secret-that-is-long-enough-for-hs256"
  jwt_expiration: 7200
  jwt_issuer: "estate-admin-test"
  reset_token_ttl: 900
  reset_link_base: "https://admin.example.com"
  permission_check_timeout_ms: 1500
  password_min_length: 8

email:
  enabled: false
  from_address: "security@example.com"
  from_name: "Estate Security"

logging:
  level: "estate_admin=debug,sqlx=warn"
  json: true
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_full_file_is_loaded() {
        let file = write_config(FULL_CONFIG);
        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().address(), "0.0.0.0:9000");
        assert_eq!(config.server().worker_count(), 2);
        assert!(config.server().dev_mode);
        assert!(!config.server().cors.allows_all_origins());
        assert_eq!(config.auth().jwt_issuer, "estate-admin-test");
        assert_eq!(config.auth().reset_token_ttl().num_seconds(), 900);
        assert_eq!(config.auth().permission_check_timeout().as_millis(), 1500);
        assert!(!config.email().enabled);
        assert_eq!(config.logging().level, "estate_admin=debug,sqlx=warn");
    }

    #[tokio::test]
    async fn test_environment_wins_over_file() {
        let file = write_config(FULL_CONFIG);
        let config = Config::from_file(file.path()).await.unwrap();

        let backend = assert_ok!(config.backend.with_env_overrides(env(&[
            ("PORT", "9100"),
            ("JWT_EXPIRES_IN", "12h"),
            ("FRONTEND_URL", "https://staging.example.com"),
            ("DEV_MODE", "false"),
        ])));
        let config = Config { backend };
        assert_ok!(config.validate());

        assert_eq!(config.server().port, 9100);
        assert_eq!(config.auth().jwt_expiration, 12 * 3600);
        assert_eq!(config.auth().reset_link_base, "https://staging.example.com");
        assert!(!config.server().dev_mode);
        // Untouched by the environment
        assert_eq!(config.auth().jwt_issuer, "estate-admin-test");
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        for broken in [
            "server:\n  port: 0\n",
            "auth:\n  jwt_secret: \"short\"\n",
            "server:\n  port: \"eighty\"\n",
        ] {
            let file = write_config(broken);
            let result = Config::from_file(file.path()).await;
            assert!(
                matches!(result, Err(AdminError::Config(_))),
                "accepted: {}",
                broken
            );
        }
    }

    #[tokio::test]
    async fn test_loaded_config_builds_a_server() {
        let file = write_config(FULL_CONFIG);
        let mut config = Config::from_file(file.path()).await.unwrap();
        config.backend.storage.database = test_db_config();

        let server = assert_ok!(HttpServer::new(&config).await);
        assert_eq!(server.config().port, 9000);
        assert_eq!(server.state().config().auth().jwt_expiration, 7200);
    }

    #[test]
    fn test_defaults_need_no_file() {
        let backend = BackendConfig::default()
            .with_env_overrides(env(&[(
                "JWT_SECRET",
                "env-only-secret-that-is-also-long-enough",
            )]))
            .unwrap();
        let config = Config { backend };
        assert!(config.validate().is_ok());
    }
}
