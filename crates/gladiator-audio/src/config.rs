/// Which mixer bus a cue plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Music,
    Effects,
}

/// Volume levels handed over from the game's audio settings
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    pub master_volume: f64,
    pub music_volume: f64,
    pub sfx_volume: f64,
    pub muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioConfig {
    /// `master × channel`, zero when muted
    pub fn volume(&self, channel: Channel) -> f64 {
        if self.muted {
            return 0.0;
        }
        let level = match channel {
            Channel::Music => self.music_volume,
            Channel::Effects => self.sfx_volume,
        };
        (self.master_volume * level).clamp(0.0, 1.0)
    }

    /// Whether anything on this channel would be heard
    pub fn is_audible(&self, channel: Channel) -> bool {
        self.volume(channel) > 0.0
    }
}
