//! Lifecycle controller of one achievement toast.
//!
//! [`attach`] mounts an instance: it loads the sound cue on the blocking pool
//! and spawns a task that owns every piece of state. The returned [`ToastHandle`] is the
//! caller's side of the contract: it drives the trigger, forwards clicks and
//! detaches the instance. Events are handled one at a time, in order.

pub mod audio;
pub mod expansion;
pub mod lifecycle;
pub mod timer;

use std::ops::ControlFlow;

use async_channel::{Receiver, Sender, bounded};
use tokio::sync::{oneshot, watch};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::navigation::{COLLECTION_PATH, Router};
use crate::types::{ToastContent, ToastSnapshot};

pub use audio::{AudioGate, CueLoader, CuePlayer};
pub use expansion::ExpansionToggle;
pub use lifecycle::{CloseReason, Lifecycle, Transition};
pub use timer::{AUTO_CLOSE_DELAY, AutoCloseTimer};

const COMMAND_BACKLOG: usize = 32;

pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Everything the toast talks to besides its caller.
pub struct Collaborators {
    pub cue: Option<Box<dyn CueLoader>>,
    pub router: Box<dyn Router>,
    /// Invoked once per episode that ends because the auto-close delay
    /// elapsed. Never on a forced close or on detach.
    pub on_close: CloseCallback,
}

enum Command {
    SetVisible(bool),
    Click,
    Snapshot(oneshot::Sender<ToastSnapshot>),
    Detach(oneshot::Sender<()>),
}

/// Mounts a toast and returns the handle controlling it. Resolves once the
/// sound cue is loaded.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub async fn attach(content: ToastContent, parts: Collaborators) -> ToastHandle {
    let (tx, rx) = bounded(COMMAND_BACKLOG);
    let (state_tx, state_rx) = watch::channel(ToastSnapshot::default());

    let span = info_span!("toast", title = %content.title);
    let toast = Toast {
        audio: load_cue(parts.cue).await,
        content,
        lifecycle: Lifecycle::new(AUTO_CLOSE_DELAY),
        expansion: ExpansionToggle::default(),
        router: parts.router,
        on_close: parts.on_close,
        state: state_tx,
    };
    tokio::spawn(toast.run(rx).instrument(span));

    ToastHandle {
        tx,
        state: state_rx,
    }
}

async fn load_cue(loader: Option<Box<dyn CueLoader>>) -> AudioGate {
    let Some(loader) = loader else {
        return AudioGate::attach(None);
    };
    match tokio::task::spawn_blocking(move || AudioGate::attach(Some(loader.as_ref()))).await {
        Ok(gate) => gate,
        Err(err) => {
            warn!(error = %err, "sound cue loader crashed, toasts will be silent");
            AudioGate::attach(None)
        }
    }
}

/// Caller side of an attached toast. Cloning shares the same instance;
/// dropping every clone detaches it.
#[derive(Clone)]
pub struct ToastHandle {
    tx: Sender<Command>,
    state: watch::Receiver<ToastSnapshot>,
}

impl ToastHandle {
    /// Feeds the trigger. A rising edge starts an episode, a falling edge
    /// closes it without invoking `on_close`.
    pub async fn set_visible(&self, visible: bool) {
        self.send(Command::SetVisible(visible)).await;
    }

    pub async fn click(&self) {
        self.send(Command::Click).await;
    }

    /// Same as [`Self::click`] for threads outside the async runtime, such as
    /// a desktop notification's action listener.
    pub fn click_blocking(&self) {
        if self.tx.send_blocking(Command::Click).is_err() {
            debug!("toast detached, click dropped");
        }
    }

    /// State after every command sent before this call has been handled.
    pub async fn snapshot(&self) -> ToastSnapshot {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await;
        match answer.await {
            Ok(snapshot) => snapshot,
            Err(_) => *self.state.borrow(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ToastSnapshot> {
        self.state.clone()
    }

    pub fn is_attached(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Unmounts the instance: cancels the timer, stops and releases the cue.
    /// Resolves once cleanup is done. Further commands are ignored.
    pub async fn detach(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Detach(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    async fn send(&self, command: Command) {
        if self.tx.send(command).await.is_err() {
            debug!("toast detached, command dropped");
        }
    }
}

struct Toast {
    content: ToastContent,
    lifecycle: Lifecycle,
    audio: AudioGate,
    expansion: ExpansionToggle,
    router: Box<dyn Router>,
    on_close: CloseCallback,
    state: watch::Sender<ToastSnapshot>,
}

impl Toast {
    async fn run(mut self, inbox: Receiver<Command>) {
        loop {
            tokio::select! {
                biased;
                command = inbox.recv() => {
                    let Ok(command) = command else {
                        debug!("all handles dropped");
                        self.detach().await;
                        break;
                    };
                    if let ControlFlow::Break(ack) = self.handle(command) {
                        inbox.close();
                        self.detach().await;
                        let _ = ack.send(());
                        break;
                    }
                }
                episode = self.lifecycle.expired() => {
                    let transition = self.lifecycle.elapse(episode);
                    self.apply(transition);
                }
            }
        }
    }

    fn handle(&mut self, command: Command) -> ControlFlow<oneshot::Sender<()>> {
        match command {
            Command::SetVisible(visible) => {
                let transition = self.lifecycle.set_trigger(visible);
                self.apply(transition);
            }
            Command::Click => self.click(),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Detach(ack) => return ControlFlow::Break(ack),
        }
        ControlFlow::Continue(())
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Shown(episode) => {
                info!(%episode, subtitle = %self.content.subtitle, "toast shown");
                self.audio.on_episode_start(episode);
            }
            Transition::Hidden { episode, reason } => {
                self.audio.reset();
                match reason {
                    CloseReason::Elapsed => {
                        info!(%episode, "toast auto-closed");
                        (self.on_close)();
                    }
                    CloseReason::Forced => info!(%episode, "toast closed by caller"),
                    CloseReason::Detached => info!(%episode, "toast detached while visible"),
                }
            }
            Transition::Unchanged => return,
        }
        self.publish();
    }

    fn click(&mut self) {
        if !self.lifecycle.phase().is_visible() {
            debug!("click ignored while hidden");
            return;
        }
        let expanded = self.expansion.toggle();
        debug!(expanded, "toast clicked");
        self.router.navigate(COLLECTION_PATH);
        self.publish();
    }

    /// Stopping the cue may wait for its output device, so the release runs
    /// on the blocking pool.
    async fn detach(&mut self) {
        let transition = self.lifecycle.detach();
        self.apply(transition);
        if let Some(player) = self.audio.take_player() {
            let released = tokio::task::spawn_blocking(move || audio::release(player)).await;
            if let Err(err) = released {
                warn!(error = %err, "sound cue release crashed");
            }
        }
        self.publish();
    }

    fn snapshot(&self) -> ToastSnapshot {
        ToastSnapshot {
            visible: self.lifecycle.phase().is_visible(),
            expanded: self.expansion.is_expanded(),
            has_played_audio: self.audio.has_played(),
            timer_armed: self.lifecycle.timer_armed(),
            episodes: self.lifecycle.episodes(),
        }
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot());
    }
}
