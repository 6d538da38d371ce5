use std::path::Path;
use std::time::Duration;

use achievement_toast::Result;
use achievement_toast::error::Error as ToastError;
#[cfg(not(target_os = "linux"))]
use achievement_toast::error::NotifyError;
use achievement_toast::toast::ToastHandle;

pub(super) struct ToastParams<'a> {
    pub summary: &'a str,
    pub body: &'a str,
    pub appname: &'a str,
    pub icon: Option<&'a Path>,
    pub action_label: &'a str,
    pub timeout: Duration,
}

#[cfg(target_os = "linux")]
pub(super) fn show(params: &ToastParams<'_>, handle: ToastHandle) -> Result<()> {
    linux::show(params, handle).map_err(ToastError::from)
}

#[cfg(not(target_os = "linux"))]
pub(super) fn show(params: &ToastParams<'_>, handle: ToastHandle) -> Result<()> {
    let _ = (params, handle);
    Err(ToastError::from(NotifyError::Backend))
}

#[cfg(target_os = "linux")]
mod linux {
    use achievement_toast::error::NotifyError;
    use achievement_toast::toast::ToastHandle;
    use notify_rust::{Notification, Timeout as LibTimeout};
    use tracing::trace;

    use super::ToastParams;

    const DEFAULT_KEY: &str = "default";
    const OPEN_KEY: &str = "open";

    pub fn show(
        params: &ToastParams<'_>,
        handle: ToastHandle,
    ) -> std::result::Result<(), NotifyError> {
        let timeout_ms = u32::try_from(params.timeout.as_millis()).unwrap_or(u32::MAX);

        let mut builder = Notification::new();
        builder
            .summary(params.summary)
            .body(params.body)
            .appname(params.appname)
            .timeout(LibTimeout::Milliseconds(timeout_ms));

        if let Some(icon_path) = params.icon {
            builder.icon(&icon_path.to_string_lossy());
        }

        builder.action(DEFAULT_KEY, params.action_label);
        builder.action(OPEN_KEY, params.action_label);

        let notification = builder.show().map_err(|_| NotifyError::Backend)?;

        std::thread::Builder::new()
            .name("toast-actions".to_string())
            .spawn(move || {
                notification.wait_for_action(move |action| match action {
                    DEFAULT_KEY | OPEN_KEY => {
                        trace!(action, "toast activated");
                        handle.click_blocking();
                    }
                    _ => trace!(action, "toast dismissed"),
                });
            })
            .map_err(|_| NotifyError::Backend)?;
        Ok(())
    }
}
