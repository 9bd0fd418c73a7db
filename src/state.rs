//! Application state machine for Galactic Gladiator
//!
//! Manages the top-level screens: main menu, character creation, hub,
//! combat and exit. Each screen owns a music track.

use gladiator_audio::MusicTrack;

/// The current application state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationState {
    /// Title screen: continue or start a new character
    #[default]
    MainMenu,
    /// Character creation screen
    CharacterCreation,
    /// Between fights: shop, trainer, workshop, skills, gear
    Hub,
    /// An encounter is in progress
    Combat,
    /// Application is exiting
    Exiting,
}

impl ApplicationState {
    /// Music to play while in this state
    pub fn music_track(self) -> Option<MusicTrack> {
        match self {
            Self::MainMenu | Self::CharacterCreation => Some(MusicTrack::MainMenu),
            Self::Hub => Some(MusicTrack::Hub),
            Self::Combat => Some(MusicTrack::Combat),
            Self::Exiting => None,
        }
    }

    pub fn is_running(self) -> bool {
        self != Self::Exiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_per_state() {
        assert_eq!(ApplicationState::default().music_track(), Some(MusicTrack::MainMenu));
        assert_eq!(ApplicationState::Combat.music_track(), Some(MusicTrack::Combat));
        assert_eq!(ApplicationState::Exiting.music_track(), None);
        assert!(!ApplicationState::Exiting.is_running());
    }
}
