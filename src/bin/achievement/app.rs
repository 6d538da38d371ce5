use std::path::PathBuf;

use achievement_toast::Result;
use achievement_toast::config::{Config, NavigationSettings, SoundSettings};
use achievement_toast::navigation::{OpenerRouter, Router, TraceRouter};
#[cfg(feature = "sound")]
use achievement_toast::sound::SoundFile;
use achievement_toast::telemetry::init_tracing;
use achievement_toast::toast::{self, Collaborators, CueLoader};
use achievement_toast::types::ToastContent;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{info, warn};

use super::cli::Cli;
use super::surface::present;

const DEFAULT_CONFIG: &str = "config.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;
    if let Some(sound) = cli.sound {
        config.sound.path = Some(sound);
    }

    let content = ToastContent::new(cli.title, cli.subtitle);
    let (closed_tx, closed_rx) = oneshot::channel();
    let mut closed_tx = Some(closed_tx);
    let handle = toast::attach(
        content.clone(),
        Collaborators {
            cue: cue_loader(&config.sound),
            router: router(&config.navigation),
            on_close: Box::new(move || {
                if let Some(tx) = closed_tx.take() {
                    let _ = tx.send(());
                }
            }),
        },
    )
    .await;

    let presenter = tokio::spawn(present(
        handle.clone(),
        content,
        config.display.clone(),
        cli.headless,
    ));

    handle.set_visible(true).await;

    if let Some(delay) = cli.click_after {
        let clicker = handle.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            clicker.click().await;
        });
    }

    tokio::select! {
        biased;
        _ = signal::ctrl_c() => info!("interrupted, detaching toast"),
        _ = closed_rx => info!("toast closed"),
    }

    // The host owns the trigger: lower it before unmounting.
    handle.set_visible(false).await;
    handle.detach().await;
    drop(handle);

    if let Err(err) = presenter.await {
        warn!(error = %err, "presenter task terminated unexpectedly");
    }
    Ok(())
}

#[cfg(feature = "sound")]
fn cue_loader(sound: &SoundSettings) -> Option<Box<dyn CueLoader>> {
    sound
        .path
        .as_ref()
        .map(|path| Box::new(SoundFile::new(path, sound.volume)) as Box<dyn CueLoader>)
}

#[cfg(not(feature = "sound"))]
fn cue_loader(sound: &SoundSettings) -> Option<Box<dyn CueLoader>> {
    if let Some(path) = &sound.path {
        warn!(
            path = %path.display(),
            "built without the `sound` feature, cue ignored"
        );
    }
    None
}

fn router(navigation: &NavigationSettings) -> Box<dyn Router> {
    match &navigation.base_url {
        Some(base) => Box::new(OpenerRouter::new(base.clone(), navigation.opener.clone())),
        None => Box::new(TraceRouter),
    }
}

#[cfg(test)]
mod tests {
    use super::cue_loader;
    use achievement_toast::config::SoundSettings;

    #[test]
    fn no_cue_without_a_path() {
        let sound = SoundSettings {
            path: None,
            volume: 0.3,
        };
        assert!(cue_loader(&sound).is_none());
    }
}
