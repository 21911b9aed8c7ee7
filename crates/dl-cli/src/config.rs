//! Configuration loading and management.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use dl_sync::{InternalApiSettings, ProjectSettings};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Internal reporting API credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<InternalApiSettings>,

    /// Backend settings per project, keyed by lower-cased project name.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectSettings>,

    /// Directory for the per-run debug logs written by `dl sync`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("internal", &self.internal)
            .field("projects", &self.projects.keys().collect::<Vec<_>>())
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DL_*, nested keys split on `__`)
        figment = figment.merge(Env::prefixed("DL_").split("__"));

        let mut config: Self = figment.extract()?;
        config.projects = config
            .projects
            .into_iter()
            .map(|(key, settings)| (key.to_lowercase(), settings))
            .collect();
        Ok(config)
    }

    /// Where `dl sync` writes its run logs.
    ///
    /// Falls back to `<data_local_dir>/dl/logs`, or `logs` in the working
    /// directory when the platform has no data directory.
    pub fn run_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir().map_or_else(
                || PathBuf::from("logs"),
                |dir| dir.join("dl").join("logs"),
            )
        })
    }
}

/// Returns the platform-specific config directory for dl.
///
/// On Linux: `~/.config/dl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use dl_sync::settings::InternalProject;

    #[test]
    fn test_dirs_config_path_ends_with_dl() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "dl");
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.internal.is_none());
        assert!(config.projects.is_empty());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_run_log_dir_prefers_configured_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "log_dir = \"/var/tmp/dl-runs\"\n").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.run_log_dir(), PathBuf::from("/var/tmp/dl-runs"));
    }

    #[test]
    fn test_run_log_dir_default_ends_with_logs() {
        let config = Config::default();
        assert!(config.run_log_dir().ends_with("logs"));
    }

    #[test]
    fn test_load_projects_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[internal]
url = "https://intranet.local/api"
auth = "dG9rZW4="
user = "jdoe"
password = "pw"
user_id = "42"

[projects.Intra]
backend = "internal"
id = 17
main_task = "1234"

[projects.acme]
backend = "jira"
url = "https://acme.atlassian.net"
user = "me@acme.io"
api_key = "k"
main_task = "OPS-1"
hour_offset = -1
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        let internal = config.internal.as_ref().unwrap();
        assert_eq!(internal.user_id, "42");
        assert_eq!(internal.hour_offset, 2);
        assert!(!internal.accept_invalid_certs);

        assert_eq!(
            config.projects.get("intra"),
            Some(&ProjectSettings::Internal(InternalProject {
                id: 17,
                main_task: Some("1234".to_string()),
                meet_task: None,
                format_note: false,
                redmine: None,
                hour_offset: 0,
            }))
        );
        assert_eq!(config.projects["acme"].hour_offset(), -1);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[internal]
url = "https://intranet.local/api"
auth = "dG9rZW4="
user = "jdoe"
password = "hunter2"
user_id = "42"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
    }
}
