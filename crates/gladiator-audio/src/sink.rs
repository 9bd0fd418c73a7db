use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::{AudioConfig, Channel};
use crate::cue::{MusicTrack, SoundCue};

/// Receiver for fire-and-forget audio notifications.
///
/// Implementations must never fail back into the caller.
pub trait SoundSink {
    fn play_sound(&mut self, cue: &SoundCue);
    fn play_music(&mut self, track: MusicTrack);
    fn stop_music(&mut self);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play_sound(&mut self, _cue: &SoundCue) {}
    fn play_music(&mut self, _track: MusicTrack) {}
    fn stop_music(&mut self) {}
}

/// Logs cues through `tracing` and tracks the current music track.
///
/// Used by the console front end, which has no audio device.
#[derive(Debug)]
pub struct TracingSink {
    config: AudioConfig,
    current_track: Option<MusicTrack>,
}

impl TracingSink {
    pub fn new(config: AudioConfig) -> Self {
        info!(
            sfx = config.volume(Channel::Effects),
            music = config.volume(Channel::Music),
            "Audio sink initialized"
        );
        Self {
            config,
            current_track: None,
        }
    }

    pub fn update_volumes(&mut self, config: AudioConfig) {
        self.config = config;
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }
}

impl SoundSink for TracingSink {
    fn play_sound(&mut self, cue: &SoundCue) {
        if !self.config.is_audible(Channel::Effects) {
            return;
        }
        debug!(cue = %cue, volume = self.config.volume(Channel::Effects), "sfx");
    }

    fn play_music(&mut self, track: MusicTrack) {
        if self.current_track == Some(track) {
            return;
        }
        debug!(track = %track, volume = self.config.volume(Channel::Music), "music");
        self.current_track = Some(track);
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current_track.take() {
            debug!(track = %track, "music stopped");
        }
    }
}

/// Records every cue name, for tests and replays.
///
/// Clones share the same log, so a test can keep one handle while the game
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sounds: Arc<Mutex<Vec<String>>>,
    music: Arc<Mutex<Option<MusicTrack>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every sound played so far, in order.
    pub fn sounds(&self) -> Vec<String> {
        self.sounds.lock().clone()
    }

    pub fn played(&self, name: &str) -> bool {
        self.sounds.lock().iter().any(|s| s == name)
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        *self.music.lock()
    }

    pub fn clear(&self) {
        self.sounds.lock().clear();
    }
}

impl SoundSink for RecordingSink {
    fn play_sound(&mut self, cue: &SoundCue) {
        self.sounds.lock().push(cue.name().into_owned());
    }

    fn play_music(&mut self, track: MusicTrack) {
        *self.music.lock() = Some(track);
    }

    fn stop_music(&mut self) {
        *self.music.lock() = None;
    }
}
