//! Sound cue playback through `rodio`.
//!
//! The output stream is not `Send`, so it lives on a dedicated thread; the
//! toast talks to it over a channel.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{trace, warn};

use crate::error::AudioError;
use crate::toast::audio::{CueLoader, CuePlayer};

/// A cue file played at a fixed volume.
#[derive(Clone, Debug)]
pub struct SoundFile {
    path: PathBuf,
    volume: f32,
}

impl SoundFile {
    pub fn new(path: impl Into<PathBuf>, volume: f32) -> Self {
        Self {
            path: path.into(),
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CueLoader for SoundFile {
    fn load(&self) -> Result<Box<dyn CuePlayer>, AudioError> {
        let bytes: Arc<[u8]> = std::fs::read(&self.path)
            .map_err(|source| AudioError::Read {
                path: self.path.clone(),
                source,
            })?
            .into();
        Decoder::new(Cursor::new(Arc::clone(&bytes)))
            .map_err(|err| AudioError::Decode(err.to_string()))?;

        let (tx, rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let volume = self.volume;
        let worker = std::thread::Builder::new()
            .name("toast-cue".to_string())
            .spawn(move || playback_loop(&bytes, volume, &rx, &ready_tx))
            .map_err(|err| AudioError::Output(err.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Box::new(RodioCue { tx })),
            Ok(Err(err)) => {
                let _ = worker.join();
                Err(err)
            }
            Err(_) => Err(AudioError::Disconnected),
        }
    }
}

enum CueCommand {
    Play,
    Stop,
}

/// Dropping the cue closes the command channel; the playback thread then
/// stops its sink and exits on its own.
struct RodioCue {
    tx: Sender<CueCommand>,
}

impl RodioCue {
    fn send(&self, command: CueCommand) -> Result<(), AudioError> {
        self.tx.send(command).map_err(|_| AudioError::Disconnected)
    }
}

impl CuePlayer for RodioCue {
    fn play_from_start(&mut self) -> Result<(), AudioError> {
        self.send(CueCommand::Play)
    }

    fn stop(&mut self) {
        let _ = self.send(CueCommand::Stop);
    }
}

fn playback_loop(
    bytes: &Arc<[u8]>,
    volume: f32,
    commands: &Receiver<CueCommand>,
    ready: &mpsc::SyncSender<Result<(), AudioError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => {
            let _ = ready.send(Ok(()));
            output
        }
        Err(err) => {
            let _ = ready.send(Err(AudioError::Output(err.to_string())));
            return;
        }
    };

    let mut current: Option<Sink> = None;
    while let Ok(command) = commands.recv() {
        if let Some(sink) = current.take() {
            sink.stop();
        }
        match command {
            CueCommand::Play => match start(&handle, bytes, volume) {
                Ok(sink) => current = Some(sink),
                Err(err) => warn!(error = %err, "sound cue playback failed"),
            },
            CueCommand::Stop => trace!("sound cue stopped"),
        }
    }
    if let Some(sink) = current.take() {
        sink.stop();
    }
}

fn start(handle: &OutputStreamHandle, bytes: &Arc<[u8]>, volume: f32) -> Result<Sink, AudioError> {
    let sink = Sink::try_new(handle).map_err(|err| AudioError::Output(err.to_string()))?;
    let source = Decoder::new(Cursor::new(Arc::clone(bytes)))
        .map_err(|err| AudioError::Decode(err.to_string()))?;
    sink.set_volume(volume);
    sink.append(source);
    Ok(sink)
}
