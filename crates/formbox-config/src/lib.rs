use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "formbox";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_STORAGE_KEY: &str = "contacts";
pub const DEFAULT_IMPORT_TIMEOUT_SECS: u64 = 30;
pub const MAX_IMPORT_TIMEOUT_SECS: u64 = 3_600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_key: String,
    pub storage_path: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub import: ImportConfig,
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub timeout_secs: u64,
}

impl ImportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: None,
            export_dir: None,
            import: ImportConfig {
                timeout_secs: DEFAULT_IMPORT_TIMEOUT_SECS,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid storage_key value: {0:?}")]
    InvalidStorageKey(String),
    #[error("invalid {field} value: path cannot be empty")]
    EmptyPath { field: &'static str },
    #[error("invalid import.timeout_secs value: {0}")]
    InvalidImportTimeout(u64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    storage_key: Option<String>,
    storage_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    import: Option<ImportFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImportFile {
    timeout_secs: Option<u64>,
}

/// Defaults apply when no file exists at the default location. An explicit
/// path must exist.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(key) = parsed.storage_key {
        let trimmed = key.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidStorageKey(key));
        }
        config.storage_key = trimmed.to_string();
    }

    if let Some(path) = parsed.storage_path {
        config.storage_path = Some(non_empty_path(path, "storage_path")?);
    }

    if let Some(path) = parsed.export_dir {
        config.export_dir = Some(non_empty_path(path, "export_dir")?);
    }

    if let Some(import) = parsed.import {
        if let Some(timeout) = import.timeout_secs {
            if timeout == 0 || timeout > MAX_IMPORT_TIMEOUT_SECS {
                return Err(ConfigError::InvalidImportTimeout(timeout));
            }
            config.import.timeout_secs = timeout;
        }
    }

    Ok(config)
}

fn non_empty_path(path: PathBuf, field: &'static str) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath { field });
    }
    Ok(path)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, load_at_path, merge_config, ConfigError, ConfigFile, ImportFile};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    fn empty_file() -> ConfigFile {
        ConfigFile {
            storage_key: None,
            storage_path: None,
            export_dir: None,
            import: None,
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            storage_key: Some(" inbox ".to_string()),
            storage_path: Some(PathBuf::from("/tmp/formbox.json")),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            import: Some(ImportFile {
                timeout_secs: Some(5),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.storage_key, "inbox");
        assert_eq!(
            merged.storage_path.as_deref(),
            Some(Path::new("/tmp/formbox.json"))
        );
        assert_eq!(merged.export_dir.as_deref(), Some(Path::new("/tmp/exports")));
        assert_eq!(merged.import.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn merge_config_keeps_defaults() {
        let merged = merge_config(empty_file()).expect("merge");
        assert_eq!(merged.storage_key, "contacts");
        assert!(merged.storage_path.is_none());
        assert_eq!(merged.import.timeout_secs, 30);
    }

    #[test]
    fn merge_config_rejects_bad_values() {
        let bad_key = ConfigFile {
            storage_key: Some("two words".to_string()),
            ..empty_file()
        };
        assert!(matches!(
            merge_config(bad_key),
            Err(ConfigError::InvalidStorageKey(_))
        ));

        let zero_timeout = ConfigFile {
            import: Some(ImportFile {
                timeout_secs: Some(0),
            }),
            ..empty_file()
        };
        assert!(matches!(
            merge_config(zero_timeout),
            Err(ConfigError::InvalidImportTimeout(0))
        ));

        let empty_path = ConfigFile {
            export_dir: Some(PathBuf::new()),
            ..empty_file()
        };
        assert!(matches!(
            merge_config(empty_path),
            Err(ConfigError::EmptyPath {
                field: "export_dir"
            })
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "storage_key = \"inbox\"\n[import]\ntimeout_secs = 12\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load(Some(path)).expect("load");
        assert_eq!(config.storage_key, "inbox");
        assert_eq!(config.import.timeout_secs, 12);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "storage = \"x\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "storage_key = \"inbox\"\n").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
