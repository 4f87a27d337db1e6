//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./triage.toml` or `./.triage.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/triage-council/config.toml`
    /// 4. Fallback: `~/.config/triage-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        // Add project-level config files (check both names)
        for filename in &["triage.toml", ".triage.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/triage-council/config.toml if set,
    /// otherwise falls back to ~/.config/triage-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("triage-council").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.behavior.timeout_seconds, 60);
        assert!(config.directory.path.is_none());
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[behavior]\ntimeout_seconds = 5\nreview_failure_policy = \"no_new_findings\""
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.behavior.timeout_seconds, 5);
        assert_eq!(config.behavior.review_failure_policy, "no_new_findings");
        // Untouched sections keep their defaults
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("triage-council"));
    }
}
