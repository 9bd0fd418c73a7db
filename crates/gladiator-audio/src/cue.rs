use std::borrow::Cow;
use std::fmt;

/// A named one-shot sound event.
///
/// Status and skill cues carry the lowercase key of the effect or the skill
/// id, producing names like `status_poison` or `skill_power_shot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoundCue {
    UiClick,
    PlayerAttack,
    EnemyAttack,
    EnemyHit,
    PlayerHit,
    Victory,
    Defeat,
    LevelUp,
    Status(String),
    Skill(String),
    EquipItem,
    BuyItem,
    SellItem,
    LearnSkill,
    TrainStat,
    CraftItem,
    SaveGame,
    NgPlusStart,
    CharacterCreated,
}

impl SoundCue {
    /// Wire name of the cue, as used by sound banks.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::UiClick => Cow::Borrowed("ui_click"),
            Self::PlayerAttack => Cow::Borrowed("player_attack"),
            Self::EnemyAttack => Cow::Borrowed("enemy_attack"),
            Self::EnemyHit => Cow::Borrowed("enemy_hit"),
            Self::PlayerHit => Cow::Borrowed("player_hit"),
            Self::Victory => Cow::Borrowed("victory"),
            Self::Defeat => Cow::Borrowed("defeat"),
            Self::LevelUp => Cow::Borrowed("level_up"),
            Self::Status(key) => Cow::Owned(format!("status_{}", key)),
            Self::Skill(id) => Cow::Owned(format!("skill_{}", id)),
            Self::EquipItem => Cow::Borrowed("equip_item"),
            Self::BuyItem => Cow::Borrowed("buy_item"),
            Self::SellItem => Cow::Borrowed("sell_item"),
            Self::LearnSkill => Cow::Borrowed("learn_skill"),
            Self::TrainStat => Cow::Borrowed("train_stat"),
            Self::CraftItem => Cow::Borrowed("craft_item"),
            Self::SaveGame => Cow::Borrowed("save_game"),
            Self::NgPlusStart => Cow::Borrowed("ng_plus_start"),
            Self::CharacterCreated => Cow::Borrowed("character_created"),
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Background music tracks, one per major screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    MainMenu,
    Hub,
    Combat,
}

impl MusicTrack {
    pub fn name(self) -> &'static str {
        match self {
            Self::MainMenu => "main_menu_theme",
            Self::Hub => "hub_theme",
            Self::Combat => "combat_music",
        }
    }
}

impl fmt::Display for MusicTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_cue_names() {
        assert_eq!(SoundCue::PlayerAttack.name(), "player_attack");
        assert_eq!(SoundCue::NgPlusStart.name(), "ng_plus_start");
        assert_eq!(SoundCue::CharacterCreated.to_string(), "character_created");
    }

    #[test]
    fn parameterised_cue_names() {
        assert_eq!(SoundCue::Status("poison".into()).name(), "status_poison");
        assert_eq!(SoundCue::Skill("mana_bolt".into()).name(), "skill_mana_bolt");
    }

    #[test]
    fn music_track_names() {
        assert_eq!(MusicTrack::MainMenu.name(), "main_menu_theme");
        assert_eq!(MusicTrack::Hub.name(), "hub_theme");
        assert_eq!(MusicTrack::Combat.name(), "combat_music");
    }
}
