use std::path::PathBuf;

/// Runtime settings shared by the server and its modules.
///
/// The binary fills this from its TOML file and CLI flags, then passes it
/// to storage initialisation.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding all persistent data.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/data.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,

    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,

    /// Session token lifetime in seconds.
    pub jwt_expire_secs: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:5000".to_string(),
            jwt_secret: String::new(),
            jwt_expire_secs: 3600,
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/data.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join("data.redb"))
                .unwrap_or_else(|| PathBuf::from("data.redb"))
        })
    }
}
