mod backends;

use achievement_toast::config::DisplaySettings;
use achievement_toast::toast::{AUTO_CLOSE_DELAY, ToastHandle};
use achievement_toast::types::ToastContent;
use tracing::{debug, info, warn};

use backends::ToastParams;

/// Renders each new episode until the toast is detached.
pub async fn present(
    handle: ToastHandle,
    content: ToastContent,
    settings: DisplaySettings,
    headless: bool,
) {
    let mut state = handle.subscribe();
    let mut rendered = 0;

    while state.changed().await.is_ok() {
        let snapshot = *state.borrow_and_update();
        if !snapshot.visible || snapshot.episodes == rendered {
            debug!(
                visible = snapshot.visible,
                expanded = snapshot.expanded,
                "toast state changed"
            );
            continue;
        }
        rendered = snapshot.episodes;

        if headless {
            info!(
                title = %content.title,
                subtitle = %content.subtitle,
                hint = %settings.hint,
                "toast rendered"
            );
            continue;
        }

        let body = notification_body(&content, &settings);
        let params = ToastParams {
            summary: &content.title,
            body: &body,
            appname: &settings.appname,
            icon: settings.icon.as_deref(),
            action_label: &settings.hint,
            timeout: AUTO_CLOSE_DELAY,
        };
        if let Err(err) = backends::show(&params, handle.clone()) {
            warn!(error = %err, "desktop notification failed, toast stays headless");
        }
    }
}

fn notification_body(content: &ToastContent, settings: &DisplaySettings) -> String {
    format!("{}\n{}", content.subtitle, settings.hint)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use achievement_toast::config::DisplaySettings;
    use achievement_toast::navigation::TraceRouter;
    use achievement_toast::toast::{self, Collaborators};
    use achievement_toast::types::ToastContent;

    use super::{notification_body, present};

    fn settings() -> DisplaySettings {
        DisplaySettings {
            appname: "Achievement".to_string(),
            icon: None,
            hint: "Koleksiyonlarınızı görüntülemek için tıklayın".to_string(),
        }
    }

    #[test]
    fn body_puts_the_hint_under_the_subtitle() {
        let content = ToastContent::new("Koleksiyon Açıldı", "Yeni bir antika keşfettiniz");
        assert_eq!(
            notification_body(&content, &settings()),
            "Yeni bir antika keşfettiniz\nKoleksiyonlarınızı görüntülemek için tıklayın"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn headless_presenter_finishes_after_detach() {
        let handle = toast::attach(
            ToastContent::default(),
            Collaborators {
                cue: None,
                router: Box::new(TraceRouter),
                on_close: Box::new(|| {}),
            },
        )
        .await;
        let presenter = tokio::spawn(present(
            handle.clone(),
            ToastContent::default(),
            settings(),
            true,
        ));

        handle.set_visible(true).await;
        handle.detach().await;
        drop(handle);

        let finished = tokio::time::timeout(Duration::from_secs(1), presenter).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }
}
