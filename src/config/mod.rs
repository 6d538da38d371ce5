use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use url::Url;

use crate::Result;
use crate::error::Error as ToastError;

mod defaults;
mod env;
mod raw;

const VOLUME_BOUNDS: RangeInclusive<f32> = 0.0..=1.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub sound: SoundSettings,
    pub navigation: NavigationSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone)]
pub struct SoundSettings {
    /// Cue file. No file means silent toasts.
    pub path: Option<PathBuf>,
    pub volume: f32,
}

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// Site the collection path is opened on. Without it navigation is only
    /// logged.
    pub base_url: Option<Url>,
    pub opener: String,
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub appname: String,
    pub icon: Option<PathBuf>,
    pub hint: String,
}

impl Config {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = match Config::from_env_and_file("/nonexistent/achievement.toml") {
            Ok(config) => config,
            Err(err) => panic!("defaults should load: {err}"),
        };
        assert!((config.sound.volume - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.display.appname, "Achievement");
    }

    #[test]
    fn reads_sections_from_toml() {
        let path = std::env::temp_dir().join("achievement-toast-config-test.toml");
        let written = std::fs::File::create(&path).and_then(|mut file| {
            file.write_all(
                br#"
[sound]
path = "assets/sound.mp3"
volume = 0.5

[navigation]
base_url = "http://localhost:3000"

[display]
appname = "Antika"
"#,
            )
        });
        if let Err(err) = written {
            panic!("cannot write fixture: {err}");
        }

        let loaded = Config::from_env_and_file(&path);
        let _ = std::fs::remove_file(&path);
        let config = match loaded {
            Ok(config) => config,
            Err(err) => panic!("config should load: {err}"),
        };

        assert_eq!(
            config.sound.path.as_deref(),
            Some(std::path::Path::new("assets/sound.mp3"))
        );
        assert!((config.sound.volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(
            config.navigation.base_url.map(String::from).as_deref(),
            Some("http://localhost:3000/")
        );
        assert_eq!(config.navigation.opener, "xdg-open");
        assert_eq!(config.display.appname, "Antika");
    }
}
