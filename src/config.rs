use crate::consts;
use crate::leaderboard::LeaderboardFile;
use ratatui::style::Style;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Overrides for the colors & attributes used on screen
    #[serde(default)]
    pub(crate) styles: StyleConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake-arcade").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the leaderboard store described by the configuration: the file
    /// given in the configuration or, failing that, the default file.  If
    /// `files.save-leaderboard` is false or no path can be determined, the
    /// store is disabled.
    pub(crate) fn leaderboard(&self) -> LeaderboardFile {
        if !self.files.save_leaderboard {
            return LeaderboardFile::disabled();
        }
        match self
            .files
            .leaderboard_file
            .clone()
            .or_else(LeaderboardFile::default_path)
        {
            Some(path) => LeaderboardFile::new(path),
            None => {
                tracing::warn!("Could not determine leaderboard file location; scores will not be saved");
                LeaderboardFile::disabled()
            }
        }
    }

    /// Return the path to write the log to: the file given in the
    /// configuration or, failing that, the default log file
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("snake-arcade").join("snake-arcade.log"))
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the leaderboard should be stored
    pub(crate) leaderboard_file: Option<PathBuf>,

    /// Whether to load & save the leaderboard at all
    pub(crate) save_leaderboard: bool,

    /// Path at which to write the log
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            leaderboard_file: None,
            save_leaderboard: true,
            log_file: None,
        }
    }
}

/// Style strings as written in the configuration file, e.g. `"bold red on
/// black"`.  Unset entries keep the built-in style.
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct StyleConfig {
    border: Option<String>,
    text: Option<String>,
    snake: Option<String>,
    prey: Option<String>,
    decoration: Option<String>,
}

impl StyleConfig {
    pub(crate) fn resolve(&self) -> Result<Styles, ConfigError> {
        Ok(Styles {
            border: parse_style("border", self.border.as_deref(), consts::BORDER_STYLE)?,
            text: parse_style("text", self.text.as_deref(), consts::TEXT_STYLE)?,
            snake: parse_style("snake", self.snake.as_deref(), consts::SNAKE_STYLE)?,
            prey: parse_style("prey", self.prey.as_deref(), consts::PREY_STYLE)?,
            decoration: parse_style(
                "decoration",
                self.decoration.as_deref(),
                consts::DECORATION_STYLE,
            )?,
        })
    }
}

fn parse_style(key: &'static str, s: Option<&str>, default: Style) -> Result<Style, ConfigError> {
    match s {
        Some(s) => s
            .parse::<parse_style::Style>()
            .map(Style::from)
            .map_err(|e| ConfigError::Style {
                key,
                message: e.to_string(),
            }),
        None => Ok(default),
    }
}

/// The styles everything on screen is drawn with
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Styles {
    pub(crate) border: Style,
    pub(crate) text: Style,
    pub(crate) snake: Style,
    pub(crate) prey: Style,
    pub(crate) decoration: Style,
}

impl Default for Styles {
    fn default() -> Styles {
        Styles {
            border: consts::BORDER_STYLE,
            text: consts::TEXT_STYLE,
            snake: consts::SNAKE_STYLE,
            prey: consts::PREY_STYLE,
            decoration: consts::DECORATION_STYLE,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid style for styles.{key}: {message}")]
    Style { key: &'static str, message: String },
}
