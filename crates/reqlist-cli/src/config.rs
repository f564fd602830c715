use reqlist_schema::EmitOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MANIFEST: &str = "requirements.txt";
const PROJECT_CONFIG: &str = ".reqlist.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings shared by all commands, read from `.reqlist.toml` or
/// `~/.config/reqlist/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Manifest used when a command is not given a path.
    pub manifest: Option<PathBuf>,
    pub emit: EmitOptions,
}

impl CliConfig {
    /// Load `explicit` if given, else the first config found in the project
    /// directory or the user config directory, else defaults.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidates = [Some(PathBuf::from(PROJECT_CONFIG)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config {}", path.display());
        Ok(config)
    }

    pub fn manifest_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| self.manifest.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }
}

fn user_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/reqlist/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_emit_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "manifest = \"env/requirements.txt\"\n\n[emit]\ninline_comment_gap = 1\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.emit.inline_comment_gap, 1);
        assert!(!config.emit.canonical_names);
        assert_eq!(
            config.manifest_path(None),
            PathBuf::from("env/requirements.txt")
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sort = true\n").unwrap();
        assert!(matches!(
            CliConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliConfig::load_default(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn argument_wins_over_config_and_default() {
        let config = CliConfig::default();
        assert_eq!(
            config.manifest_path(None),
            PathBuf::from(DEFAULT_MANIFEST)
        );
        assert_eq!(
            config.manifest_path(Some(PathBuf::from("other.txt"))),
            PathBuf::from("other.txt")
        );
    }
}
