//! Startup checks.

use crate::config::ServerConfig;

/// Refuse to start with a configuration that cannot serve safely.
///
/// An ephemeral server keeps everything in memory, so it needs no data dir.
pub fn verify_config(config: &ServerConfig, ephemeral: bool) -> anyhow::Result<()> {
    if config.jwt.secret.trim().is_empty() {
        anyhow::bail!(
            "JWT secret is empty in configuration.\n\
             Set [jwt] secret or the {} environment variable.",
            crate::config::JWT_SECRET_ENV
        );
    }
    if config.jwt.expire_secs <= 0 {
        anyhow::bail!("JWT expire_secs must be positive.");
    }
    if !ephemeral && config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    Ok(())
}
