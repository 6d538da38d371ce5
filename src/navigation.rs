use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};
use url::Url;

/// Where a click on the toast takes the user.
pub const COLLECTION_PATH: &str = "/koleksiyon";

/// Routing capability the toast delegates navigation to.
///
/// The toast never observes the outcome; failures are the router's business.
pub trait Router: Send {
    fn navigate(&self, path: &str);
}

/// Logs navigation requests instead of performing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceRouter;

impl Router for TraceRouter {
    fn navigate(&self, path: &str) {
        info!(path, "navigation requested");
    }
}

/// Opens `base_url` joined with the requested path through an external
/// opener such as `xdg-open`.
#[derive(Clone, Debug)]
pub struct OpenerRouter {
    base: Url,
    program: String,
}

impl OpenerRouter {
    pub fn new(base: Url, program: impl Into<String>) -> Self {
        Self {
            base,
            program: program.into(),
        }
    }

    pub fn target(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base.join(path)
    }

    /// Launches the opener on `target`. The child is waited on by a helper
    /// thread, whose handle yields the opener's exit status.
    pub fn open(&self, target: &Url) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
        let child = Command::new(&self.program)
            .arg(target.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        reap(child, self.program.clone())
    }
}

fn reap(mut child: Child, program: String) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    std::thread::Builder::new()
        .name("toast-opener".to_string())
        .spawn(move || {
            let status = child.wait();
            match &status {
                Ok(status) if status.success() => debug!(%program, "opener exited"),
                Ok(status) => warn!(%program, %status, "opener reported failure"),
                Err(err) => warn!(%program, error = %err, "cannot wait for opener"),
            }
            status
        })
}

impl Router for OpenerRouter {
    fn navigate(&self, path: &str) {
        let target = match self.target(path) {
            Ok(url) => url,
            Err(err) => {
                warn!(error = %err, base = %self.base, path, "cannot build navigation target");
                return;
            }
        };

        match self.open(&target) {
            Ok(_) => info!(url = %target, "navigation opened"),
            Err(err) => warn!(error = %err, program = %self.program, "failed to launch opener"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{COLLECTION_PATH, OpenerRouter};
    use url::Url;

    fn router_with(base: &str, program: &str) -> OpenerRouter {
        match Url::parse(base) {
            Ok(url) => OpenerRouter::new(url, program),
            Err(err) => panic!("bad base url: {err}"),
        }
    }

    fn router(base: &str) -> OpenerRouter {
        router_with(base, "xdg-open")
    }

    #[test]
    fn collection_path_replaces_base_path() {
        let target = router("https://antika.example/profil/ayarlar").target(COLLECTION_PATH);
        assert_eq!(
            target.map(String::from).ok().as_deref(),
            Some("https://antika.example/koleksiyon")
        );
    }

    #[test]
    fn keeps_port_of_base() {
        let target = router("http://localhost:3000").target(COLLECTION_PATH);
        assert_eq!(
            target.map(String::from).ok().as_deref(),
            Some("http://localhost:3000/koleksiyon")
        );
    }

    #[cfg(unix)]
    #[test]
    fn opener_is_waited_on() {
        let router = router_with("http://localhost:3000", "true");
        let target = match router.target(COLLECTION_PATH) {
            Ok(url) => url,
            Err(err) => panic!("bad target: {err}"),
        };
        let waiter = match router.open(&target) {
            Ok(waiter) => waiter,
            Err(err) => panic!("cannot launch opener: {err}"),
        };
        match waiter.join() {
            Ok(Ok(status)) => assert!(status.success()),
            Ok(Err(err)) => panic!("opener was not reaped: {err}"),
            Err(_) => panic!("reaper thread panicked"),
        }
    }

    #[test]
    fn missing_opener_fails_to_launch() {
        let router = router_with("http://localhost:3000", "/nonexistent/achievement-opener");
        let target = match router.target(COLLECTION_PATH) {
            Ok(url) => url,
            Err(err) => panic!("bad target: {err}"),
        };
        assert!(router.open(&target).is_err());
    }
}
