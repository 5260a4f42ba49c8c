use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Minimal query length for the external product catalog search
    pub min_chars: usize,
    /// Input debounce on the caller side, milliseconds
    pub debounce_ms: u64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[search]
min_chars = 2
debounce_ms = 300
"#;

/// Load configuration from wizard.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<WizardConfig> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("wizard.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: WizardConfig = toml::from_str(&contents)?;
                return Ok(config);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: WizardConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                min_chars: 2,
                debounce_ms: 300,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: WizardConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.search.min_chars, 2);
        assert_eq!(config.search.debounce_ms, 300);

        // Встроенный дефолт и Default совпадают
        let fallback = WizardConfig::default();
        assert_eq!(fallback.search.min_chars, config.search.min_chars);
        assert_eq!(fallback.search.debounce_ms, config.search.debounce_ms);
    }
}
