use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Runtime settings, merged from defaults, a TOML file and `TODO_*`
/// environment variables, in that order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// HTTP listen port (`TODO_PORT`)
    pub port: u16,
    /// SQLite database file (`TODO_DBFILE`)
    pub dbfile: PathBuf,
    /// Directory served for non-API paths (`TODO_WEB_DIR`)
    pub web_dir: PathBuf,
    /// Maximum rows returned by `/api/tasks` and `list` (`TODO_TASK_LIMIT`)
    pub task_limit: u32,
    /// Default log level when `RUST_LOG` is unset (`TODO_LOG_LEVEL`)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7540,
            dbfile: PathBuf::from("scheduler.db"),
            web_dir: PathBuf::from("./web"),
            task_limit: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration. An explicit `path` must exist; the default
    /// `config.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file '{}' does not exist", path.display());
            }
        }
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config: Config = Self::figment(file)
            .extract()
            .context("failed to read configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("TODO_"))
    }

    fn validate(&self) -> Result<()> {
        if self.task_limit == 0 {
            bail!("task_limit must be at least 1");
        }
        if self.dbfile.as_os_str().is_empty() {
            bail!("dbfile must not be empty");
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            bail!(
                "unknown log_level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            );
        }
        Ok(())
    }
}
