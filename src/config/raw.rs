use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{default_appname, default_hint, default_opener, default_volume};
use super::env::{env_parse, env_string};
use super::{Config, DisplaySettings, NavigationSettings, SoundSettings, VOLUME_BOUNDS};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("ACHIEVEMENT_TOAST")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) sound: RawSound,
    #[serde(default)]
    pub(super) navigation: RawNavigation,
    #[serde(default)]
    pub(super) display: RawDisplay,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSound {
    #[serde(default)]
    pub(super) path: Option<PathBuf>,
    #[serde(default = "default_volume")]
    pub(super) volume: f32,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawNavigation {
    #[serde(default)]
    pub(super) base_url: Option<String>,
    #[serde(default = "default_opener")]
    pub(super) opener: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDisplay {
    #[serde(default = "default_appname")]
    pub(super) appname: String,
    #[serde(default)]
    pub(super) icon: Option<PathBuf>,
    #[serde(default = "default_hint")]
    pub(super) hint: String,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(path) = env_string("TOAST_SOUND")? {
            self.sound.path = Some(PathBuf::from(path));
        }
        if let Some(volume) = env_parse::<f32>("TOAST_VOLUME")? {
            self.sound.volume = volume;
        }
        if let Some(url) = env_string("TOAST_COLLECTION_URL")? {
            self.navigation.base_url = Some(url);
        }
        if let Some(opener) = env_string("TOAST_OPENER")? {
            self.navigation.opener = opener;
        }
        if let Some(appname) = env_string("TOAST_APPNAME")? {
            self.display.appname = appname;
        }
        if let Some(icon) = env_string("TOAST_ICON")? {
            self.display.icon = Some(PathBuf::from(icon));
        }
        if let Some(hint) = env_string("TOAST_HINT")? {
            self.display.hint = hint;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        if !VOLUME_BOUNDS.contains(&self.sound.volume) {
            return Err(ConfigError::InvalidField {
                field: "sound.volume",
                message: format!(
                    "expected between {} and {}, got {}",
                    VOLUME_BOUNDS.start(),
                    VOLUME_BOUNDS.end(),
                    self.sound.volume
                ),
            }
            .into());
        }

        let base_url = self
            .navigation
            .base_url
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Url::parse(raw.trim()))
            .transpose()
            .map_err(|err| ConfigError::InvalidField {
                field: "navigation.base_url",
                message: err.to_string(),
            })?;
        if base_url.as_ref().is_some_and(Url::cannot_be_a_base) {
            return Err(ConfigError::InvalidField {
                field: "navigation.base_url",
                message: "URL cannot carry a path".to_string(),
            }
            .into());
        }

        let opener = self.navigation.opener.trim().to_string();
        if opener.is_empty() {
            return Err(ConfigError::MissingField {
                field: "navigation.opener",
            }
            .into());
        }

        let path = self.sound.path.filter(|p| !p.as_os_str().is_empty());

        Ok(Config {
            sound: SoundSettings {
                path,
                volume: self.sound.volume,
            },
            navigation: NavigationSettings { base_url, opener },
            display: DisplaySettings {
                appname: self.display.appname,
                icon: self.display.icon,
                hint: self.display.hint,
            },
        })
    }
}

impl Default for RawSound {
    fn default() -> Self {
        Self {
            path: None,
            volume: default_volume(),
        }
    }
}

impl Default for RawNavigation {
    fn default() -> Self {
        Self {
            base_url: None,
            opener: default_opener(),
        }
    }
}

impl Default for RawDisplay {
    fn default() -> Self {
        Self {
            appname: default_appname(),
            icon: None,
            hint: default_hint(),
        }
    }
}
