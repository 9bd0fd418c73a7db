//! Gladiator Audio - Sound and music notifications
//!
//! The game core never waits on audio. It emits named cues through a
//! [`SoundSink`] and moves on; the sink decides whether anything is heard.

mod config;
mod cue;
mod sink;

pub use config::{AudioConfig, Channel};
pub use cue::{MusicTrack, SoundCue};
pub use sink::{NullSink, RecordingSink, SoundSink, TracingSink};
