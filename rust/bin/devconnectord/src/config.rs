//! Server configuration file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:5000"
//!
//! [storage]
//! data_dir = "/var/lib/devconnector"
//!
//! [jwt]
//! secret = "..."
//! expire_secs = 3600
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use devconnector_auth::AuthConfig;
use devconnector_core::ServiceConfig;

/// Overrides `[jwt] secret` when set.
pub const JWT_SECRET_ENV: &str = "DEVCONNECTOR_JWT_SECRET";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expire_secs: default_expire_secs(),
        }
    }
}

fn default_listen() -> String {
    ServiceConfig::default().listen
}

fn default_expire_secs() -> i64 {
    ServiceConfig::default().jwt_expire_secs
}

impl ServerConfig {
    /// A bare name resolves to `/etc/devconnector/<name>.toml`.
    /// Anything containing `/` or `.` is used as a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from("/etc/devconnector").join(format!("{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_secret_override(std::env::var(JWT_SECRET_ENV).ok());
    }

    fn apply_secret_override(&mut self, secret: Option<String>) {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.jwt.secret = secret;
        }
    }

    /// Runtime settings, with `listen` taken from the CLI when given.
    pub fn service_config(&self, listen: Option<&str>) -> ServiceConfig {
        let data_dir = (!self.storage.data_dir.is_empty()).then(|| PathBuf::from(&self.storage.data_dir));
        ServiceConfig {
            data_dir,
            db_path: None,
            listen: listen.unwrap_or(&self.server.listen).to_string(),
            jwt_secret: self.jwt.secret.clone(),
            jwt_expire_secs: self.jwt.expire_secs,
        }
    }
}

/// Token signing settings for the users module.
pub fn auth_config(svc: &ServiceConfig) -> AuthConfig {
    AuthConfig {
        jwt_secret: svc.jwt_secret.clone(),
        token_ttl: svc.jwt_expire_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let config = ServerConfig::parse(
            r#"
            [server]
            listen = "127.0.0.1:9000"

            [storage]
            data_dir = "/srv/devconnector"

            [jwt]
            secret = "s3cret"
            expire_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert_eq!(config.storage.data_dir, "/srv/devconnector");
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expire_secs, 600);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = ServerConfig::parse("[jwt]\nsecret = \"x\"\n").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:5000");
        assert_eq!(config.jwt.expire_secs, 3600);
        assert!(config.storage.data_dir.is_empty());
    }

    #[test]
    fn resolve_path_by_name_or_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/devconnector/prod.toml")
        );
        assert_eq!(ServerConfig::resolve_path("./dev.toml"), PathBuf::from("./dev.toml"));
    }

    #[test]
    fn secret_override() {
        let mut config = ServerConfig::default();
        config.jwt.secret = "from-file".into();

        config.apply_secret_override(Some(String::new()));
        assert_eq!(config.jwt.secret, "from-file");

        config.apply_secret_override(Some("from-env".into()));
        assert_eq!(config.jwt.secret, "from-env");
    }

    #[test]
    fn cli_listen_wins() {
        let mut config = ServerConfig::default();
        config.storage.data_dir = "/data".into();
        let svc = config.service_config(Some("127.0.0.1:1234"));
        assert_eq!(svc.listen, "127.0.0.1:1234");
        assert_eq!(svc.resolve_db_path(), PathBuf::from("/data/data.redb"));

        let svc = config.service_config(None);
        assert_eq!(svc.listen, "0.0.0.0:5000");
    }

    #[test]
    fn auth_settings_follow_jwt_section() {
        let mut config = ServerConfig::default();
        config.jwt.secret = "k".into();
        config.jwt.expire_secs = 60;
        let auth = auth_config(&config.service_config(None));
        assert_eq!(auth.jwt_secret, "k");
        assert_eq!(auth.token_ttl, 60);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/tmp/dc\"\n").unwrap();
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/dc");

        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
