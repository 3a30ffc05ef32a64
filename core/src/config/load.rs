use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default mfgchat data directory: ~/.mfgchat
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".mfgchat"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.mfgchat/config.toml (highest)
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Update logging directory to use the mfgchat data directory if not set
    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        let logs_dir = data_dir.join("logs");
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("MFGCHAT_LOG") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
    if let Ok(v) = std::env::var("MFGCHAT_LLM_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.llm.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("MFGCHAT_LLM_MODEL") {
        if !v.trim().is_empty() {
            cfg.llm.model = v;
        }
    }

    // The API key only ever comes from the environment.
    cfg.llm.api_key = std::env::var("MFGCHAT_GEMINI_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(cfg)
}

/// Parse a config file at an explicit path. Used by tests and by callers that
/// manage their own config discovery.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_config_with_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
[filter]
extra_keywords = ["extrusion", "injection molding"]

[http_server]
port = 9090
"#
        )
        .unwrap();

        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(
            cfg.filter.extra_keywords,
            vec!["extrusion", "injection molding"]
        );
        assert_eq!(cfg.http_server.port, 9090);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
        assert_eq!(cfg.llm.model, "gemini-2.0-flash");
        assert!(cfg.logging.enabled);
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[filter\nextra_keywords = 3").unwrap();
        assert!(load_from_path(f.path()).is_err());
    }
}
