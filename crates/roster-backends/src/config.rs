//! Roster configuration and backend factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roster_core::interchange::{NumericPolicy, RecordLayout};
use roster_core::PersistenceBackend;

use crate::bulk_file::BulkFileBackend;
use crate::sqlite::{SqliteBackend, DEFAULT_BUSY_TIMEOUT_MS};

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "roster.toml";

/// Which storage engine holds the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Whole roster in one JSON file.
    BulkFile {
        #[serde(default = "default_bulk_path")]
        path: PathBuf,
    },
    /// SQLite database with a `students` table.
    Sqlite {
        #[serde(default = "default_sqlite_path")]
        path: PathBuf,
        #[serde(default = "default_busy_timeout")]
        busy_timeout_ms: u64,
    },
}

impl BackendConfig {
    /// Backend kind as written in config files and `ROSTER_BACKEND`.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::BulkFile { .. } => "bulk_file",
            BackendConfig::Sqlite { .. } => "sqlite",
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        match self {
            BackendConfig::BulkFile { path } | BackendConfig::Sqlite { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut PathBuf {
        match self {
            BackendConfig::BulkFile { path } | BackendConfig::Sqlite { path, .. } => path,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::BulkFile {
            path: default_bulk_path(),
        }
    }
}

fn default_bulk_path() -> PathBuf {
    PathBuf::from("./students.json")
}
fn default_sqlite_path() -> PathBuf {
    PathBuf::from("./students.db")
}
fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Top-level roster configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Layout used by `export`.
    #[serde(default)]
    pub export_layout: RecordLayout,
    /// Handling of malformed numbers on `import`.
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
    /// Storage engine.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl RosterConfig {
    /// Render as TOML, e.g. for `roster init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables resolve to the empty string. Substituted values are not
/// expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `roster.toml` in the current directory
/// 2. `~/.config/roster/config.toml`
///
/// Environment variable overrides: `ROSTER_BACKEND`, `ROSTER_DATA_PATH`.
pub fn load_config() -> Result<RosterConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RosterConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<RosterConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RosterConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    let resolved = resolve_env_vars(&config.backend.path().to_string_lossy());
    *config.backend.path_mut() = PathBuf::from(resolved);

    Ok(config)
}

fn apply_env_overrides(config: &mut RosterConfig) -> Result<()> {
    if let Ok(kind) = std::env::var("ROSTER_BACKEND") {
        if kind != config.backend.kind() {
            config.backend = match kind.as_str() {
                "bulk_file" => BackendConfig::BulkFile {
                    path: default_bulk_path(),
                },
                "sqlite" => BackendConfig::Sqlite {
                    path: default_sqlite_path(),
                    busy_timeout_ms: default_busy_timeout(),
                },
                other => anyhow::bail!(
                    "ROSTER_BACKEND must be 'bulk_file' or 'sqlite', got '{other}'"
                ),
            };
        }
    }

    if let Ok(path) = std::env::var("ROSTER_DATA_PATH") {
        *config.backend.path_mut() = PathBuf::from(path);
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roster"))
}

/// Create the configured backend.
pub fn open_backend(config: &RosterConfig) -> Result<Box<dyn PersistenceBackend>> {
    match &config.backend {
        BackendConfig::BulkFile { path } => Ok(Box::new(BulkFileBackend::new(path.clone()))),
        BackendConfig::Sqlite {
            path,
            busy_timeout_ms,
        } => {
            let timeout = Duration::from_millis(*busy_timeout_ms);
            let backend = SqliteBackend::open(path.clone(), timeout).with_context(|| {
                format!("failed to open SQLite database: {}", path.display())
            })?;
            Ok(Box::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ROSTER_TEST_VAR", "data");
        assert_eq!(resolve_env_vars("${_ROSTER_TEST_VAR}"), "data");
        assert_eq!(
            resolve_env_vars("/srv/${_ROSTER_TEST_VAR}/students.db"),
            "/srv/data/students.db"
        );
        assert_eq!(resolve_env_vars("${_ROSTER_UNSET_VAR}x"), "x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_ROSTER_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_ROSTER_SELF_REF", "${_ROSTER_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_ROSTER_SELF_REF}/students.db"),
            "${_ROSTER_SELF_REF}/students.db"
        );
        std::env::set_var("_ROSTER_TWO", "b");
        assert_eq!(
            resolve_env_vars("a-${_ROSTER_TWO}-${_ROSTER_TWO}-c"),
            "a-b-b-c"
        );
        std::env::remove_var("_ROSTER_SELF_REF");
        std::env::remove_var("_ROSTER_TWO");
    }

    #[test]
    fn default_config() {
        let config = RosterConfig::default();
        assert_eq!(config.backend.kind(), "bulk_file");
        assert_eq!(config.backend.path(), Path::new("./students.json"));
        assert_eq!(config.export_layout, RecordLayout::OnePerLine);
        assert_eq!(config.numeric_policy, NumericPolicy::Skip);
    }

    #[test]
    fn parse_sqlite_config() {
        let toml_str = r#"
export_layout = "legacy_single_line"
numeric_policy = "strict"

[backend]
type = "sqlite"
path = "/var/lib/roster/students.db"
"#;
        let config: RosterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend,
            BackendConfig::Sqlite {
                path: PathBuf::from("/var/lib/roster/students.db"),
                busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            }
        );
        assert_eq!(config.export_layout, RecordLayout::LegacySingleLine);
        assert_eq!(config.numeric_policy, NumericPolicy::Strict);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn to_toml_roundtrips() {
        let config = RosterConfig {
            backend: BackendConfig::Sqlite {
                path: PathBuf::from("roster.db"),
                busy_timeout_ms: 250,
            },
            ..RosterConfig::default()
        };
        let text = config.to_toml().unwrap();
        let back: RosterConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(
            &path,
            "[backend]\ntype = \"bulk_file\"\npath = \"/tmp/roster-test.json\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.backend.path(), Path::new("/tmp/roster-test.json"));
    }

    #[test]
    fn open_backend_builds_each_kind() {
        let dir = tempfile::tempdir().unwrap();

        let bulk = RosterConfig {
            backend: BackendConfig::BulkFile {
                path: dir.path().join("students.json"),
            },
            ..RosterConfig::default()
        };
        let backend = open_backend(&bulk).unwrap();
        assert_eq!(backend.name(), "bulk_file");

        let sqlite = RosterConfig {
            backend: BackendConfig::Sqlite {
                path: dir.path().join("students.db"),
                busy_timeout_ms: 100,
            },
            ..RosterConfig::default()
        };
        let backend = open_backend(&sqlite).unwrap();
        assert_eq!(backend.name(), "sqlite");
        assert!(dir.path().join("students.db").exists());
    }
}
