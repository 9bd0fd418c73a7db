//! Line-oriented console front end
//!
//! Reads commands from any `BufRead` and writes plain text to any `Write`,
//! so the whole game can be driven from a script in tests.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use gladiator_audio::{MusicTrack, SoundCue, SoundSink, TracingSink};
use gladiator_core::{ArenaId, ItemId, RecipeId, SkillId, StatKind};
use gladiator_game::catalog::TreeOwner;
use gladiator_game::hub::{shop_stock, training_cost};
use gladiator_game::player::creation::FREE_POINTS;
use gladiator_game::{
    Catalog, CharacterDraft, CombatOutcome, Game, GameError, Gender, ItemSlot, PlayerAction,
    PlayerClass, PointAllocation, Race, SaveStorage, TurnPhase, TurnReport,
};
use gladiator_integration::{generate_backstory_or_fallback, BackstoryRequest, NarrativeClient};
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::settings::GameSettings;
use crate::state::ApplicationState;

pub struct Console<R, W> {
    input: R,
    output: W,
    settings: GameSettings,
    storage: Box<dyn SaveStorage>,
    narrative: Option<NarrativeClient>,
    menu_sink: TracingSink,
    state: ApplicationState,
    game: Option<Game>,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        input: R,
        output: W,
        settings: GameSettings,
        storage: Box<dyn SaveStorage>,
        narrative: Option<NarrativeClient>,
        rng: StdRng,
    ) -> Self {
        let menu_sink = TracingSink::new(settings.audio.to_config());
        Self {
            input,
            output,
            settings,
            storage,
            narrative,
            menu_sink,
            state: ApplicationState::default(),
            game: None,
            rng,
        }
    }

    pub fn state(&self) -> ApplicationState {
        self.state
    }

    fn sink(&self) -> Box<dyn SoundSink> {
        Box::new(TracingSink::new(self.settings.audio.to_config()))
    }

    fn set_state(&mut self, state: ApplicationState) {
        if self.state == state {
            return;
        }
        info!(from = ?self.state, to = ?state, "State change");
        self.state = state;
        match state.music_track() {
            Some(track) => self.active_sink().play_music(track),
            None => self.active_sink().stop_music(),
        }
    }

    /// The game's sink once a character is loaded, the menu sink before
    fn active_sink(&mut self) -> &mut dyn SoundSink {
        match self.game.as_mut() {
            Some(game) => game.sink_mut(),
            None => &mut self.menu_sink,
        }
    }

    /// Run until the player quits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.menu_sink.play_music(MusicTrack::MainMenu);
        while self.state.is_running() {
            match self.state {
                ApplicationState::MainMenu => self.main_menu()?,
                ApplicationState::CharacterCreation => self.character_creation()?,
                ApplicationState::Hub => self.hub_menu()?,
                ApplicationState::Combat => self.combat_turn()?,
                ApplicationState::Exiting => {}
            }
        }
        writeln!(self.output, "Farewell, gladiator.")?;
        Ok(())
    }

    // --- Input helpers ---

    /// One trimmed line; `None` once input is exhausted
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Pick from a numbered list; `None` for back or end of input
    fn choose(&mut self, title: &str, options: &[String]) -> Result<Option<usize>> {
        writeln!(self.output, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }
        loop {
            let Some(answer) = self.prompt("choose (blank to go back)")? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    self.active_sink().play_sound(&SoundCue::UiClick);
                    return Ok(Some(n - 1));
                }
                _ => writeln!(self.output, "Please enter a number from 1 to {}.", options.len())?,
            }
        }
    }

    fn report_error(&mut self, err: &GameError) -> Result<()> {
        writeln!(self.output, "! {err}")?;
        Ok(())
    }

    fn print_report(&mut self, report: &TurnReport) -> Result<()> {
        for line in &report.log {
            writeln!(self.output, "  {line}")?;
        }
        Ok(())
    }

    /// Scroll-back of the last `combat_log_limit` lines of the fight
    fn print_history(&mut self) -> Result<()> {
        let limit = self.settings.gameplay.combat_log_limit.max(1);
        let recent: Vec<String> = self
            .game
            .as_ref()
            .and_then(Game::session)
            .map(|session| {
                let history = session.history();
                history[history.len().saturating_sub(limit)..].to_vec()
            })
            .unwrap_or_default();
        writeln!(self.output, "--- combat log ---")?;
        for line in recent {
            writeln!(self.output, "  {line}")?;
        }
        Ok(())
    }

    // --- Main menu ---

    fn main_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== GALACTIC GLADIATOR ===")?;
        let can_continue = Game::has_save(self.storage.as_ref());
        let mut options = vec!["New character".to_string()];
        if can_continue {
            options.insert(0, "Continue".to_string());
        }
        options.push("Quit".to_string());

        let choice = self.choose("Main menu", &options)?;
        let label = choice.and_then(|i| options.get(i)).map(String::as_str);
        match label {
            Some("Continue") => match Game::load(Catalog::standard(), self.storage.as_ref(), self.sink()) {
                Ok(Some(game)) => {
                    writeln!(self.output, "Welcome back, {}.", game.player().name)?;
                    self.game = Some(game);
                    self.set_state(ApplicationState::Hub);
                }
                Ok(None) => writeln!(self.output, "No save found.")?,
                Err(err) => {
                    warn!(error = %err, "Failed to load save");
                    writeln!(self.output, "! Could not load the save: {err}")?;
                }
            },
            Some("New character") => self.set_state(ApplicationState::CharacterCreation),
            _ => self.set_state(ApplicationState::Exiting),
        }
        Ok(())
    }

    // --- Character creation ---

    fn character_creation(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== CREATE YOUR GLADIATOR ===")?;
        let Some(name) = self.prompt("name")? else {
            self.set_state(ApplicationState::Exiting);
            return Ok(());
        };

        let genders: Vec<String> = Gender::all().iter().map(|g| g.name().to_string()).collect();
        let races: Vec<String> = Race::all()
            .iter()
            .map(|r| format!("{} - {} ({})", r, r.description(), r.stat_bonuses()))
            .collect();
        let classes: Vec<String> = PlayerClass::all()
            .iter()
            .map(|c| format!("{} - {} ({})", c, c.description(), c.stat_bonuses()))
            .collect();

        let gender = self.choose("Gender", &genders)?.and_then(|i| Gender::all().get(i).copied());
        let race = self.choose("Race", &races)?.and_then(|i| Race::all().get(i).copied());
        let class = self.choose("Class", &classes)?.and_then(|i| PlayerClass::all().get(i).copied());
        let (Some(gender), Some(race), Some(class)) = (gender, race, class) else {
            writeln!(self.output, "Creation cancelled.")?;
            self.set_state(ApplicationState::MainMenu);
            return Ok(());
        };

        let Some(allocation) = self.allocate_points()? else {
            self.set_state(ApplicationState::MainMenu);
            return Ok(());
        };

        let mut draft = CharacterDraft::new(&name, gender, race, class).with_allocation(allocation);
        let backstory = self
            .prompt("backstory ('g' to generate, blank for default)")?
            .unwrap_or_default();
        if backstory.eq_ignore_ascii_case("g") {
            let text = match &self.narrative {
                Some(client) => {
                    let request = BackstoryRequest::new(&name, gender.name(), race.name(), class.name());
                    generate_backstory_or_fallback(client, &request)
                }
                None => gladiator_integration::FALLBACK_NO_API_KEY.to_string(),
            };
            writeln!(self.output, "{text}")?;
            draft = draft.with_backstory(text);
        } else {
            draft = draft.with_backstory(backstory);
        }

        match Game::create(Catalog::standard(), draft, self.sink()) {
            Ok(game) => {
                writeln!(self.output, "{} enters the arena circuit.", game.player().name)?;
                self.game = Some(game);
                self.set_state(ApplicationState::Hub);
            }
            Err(err) => {
                self.report_error(&err)?;
                self.set_state(ApplicationState::MainMenu);
            }
        }
        Ok(())
    }

    /// `+str`, `-dex`, ... until `done`; `None` when cancelled
    fn allocate_points(&mut self) -> Result<Option<PointAllocation>> {
        let mut allocation = PointAllocation::new();
        writeln!(
            self.output,
            "Distribute {FREE_POINTS} points with +stat / -stat (e.g. +str, -lck). Type 'done' when finished."
        )?;
        loop {
            writeln!(
                self.output,
                "  {}  ({} points left)",
                allocation.stats(),
                allocation.points_remaining()
            )?;
            let Some(command) = self.prompt("allocate")? else {
                return Ok(None);
            };
            if command.eq_ignore_ascii_case("done") {
                return Ok(Some(allocation));
            }
            let mut chars = command.chars();
            let sign = chars.next();
            let result = match (sign, StatKind::from_str(chars.as_str())) {
                (Some('+'), Ok(kind)) => allocation.raise(kind).map_err(|e| e.to_string()),
                (Some('-'), Ok(kind)) => allocation.lower(kind).map_err(|e| e.to_string()),
                (_, Err(err)) => Err(err.to_string()),
                _ => Err("use +stat or -stat".to_string()),
            };
            if let Err(message) = result {
                writeln!(self.output, "! {message}")?;
            }
        }
    }

    // --- Hub ---

    fn hub_menu(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            self.set_state(ApplicationState::MainMenu);
            return Ok(());
        };
        let player = game.player();
        writeln!(
            self.output,
            "\n=== HUB === {} | Lv {} | HP {}/{} | MP {}/{} | {} gold",
            player.name,
            player.level,
            player.current_health,
            player.max_health(),
            player.current_mana,
            player.max_mana(),
            player.gold
        )?;

        let options: Vec<String> = [
            "Fight",
            "Character sheet",
            "Skill tree",
            "Inventory",
            "Shop",
            "Trainer",
            "Workshop",
            "Save game",
            "New Game+",
            "Quit to main menu",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        match self.choose("What next?", &options)? {
            Some(0) => self.pick_arena()?,
            Some(1) => self.character_sheet()?,
            Some(2) => self.skill_tree()?,
            Some(3) => self.inventory_menu()?,
            Some(4) => self.shop_menu()?,
            Some(5) => self.trainer_menu()?,
            Some(6) => self.workshop_menu()?,
            Some(7) => self.save_game()?,
            Some(8) => self.new_game_plus()?,
            Some(9) => {
                self.game = None;
                self.set_state(ApplicationState::MainMenu);
            }
            _ => {
                if self.input_exhausted()? {
                    self.set_state(ApplicationState::Exiting);
                }
            }
        }
        Ok(())
    }

    fn input_exhausted(&mut self) -> Result<bool> {
        Ok(self.input.fill_buf()?.is_empty())
    }

    fn with_game<T>(&mut self, action: impl FnOnce(&mut Game) -> Result<T, GameError>) -> Result<Option<T>> {
        let Some(game) = self.game.as_mut() else {
            return Ok(None);
        };
        match action(game) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.report_error(&err)?;
                Ok(None)
            }
        }
    }

    fn character_sheet(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let player = game.player();
        let mut lines = vec![
            format!("{} - {} {} {}", player.name, player.gender.name(), player.race, player.class),
            format!("Level {} ({}/{} XP), NG+ {}", player.level, player.xp, player.xp_to_next_level, player.ng_plus),
            format!("Stats: {}", player.effective_stats()),
            format!("Skill points: {}", player.skill_points),
            format!("Backstory: {}", player.backstory),
        ];
        for &slot in ItemSlot::all() {
            let item = player.equipment.get(slot).map_or("-", |i| i.name.as_str());
            lines.push(format!("{}: {}", slot.name(), item));
        }
        let skills: Vec<&str> = player
            .skills
            .iter()
            .filter_map(|id| game.catalog().skill(id))
            .map(|s| s.name.as_str())
            .collect();
        lines.push(format!("Skills: {}", skills.join(", ")));
        for line in lines {
            writeln!(self.output, "  {line}")?;
        }
        Ok(())
    }

    fn pick_arena(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let arenas: Vec<(ArenaId, String)> = game
            .unlocked_arenas()
            .iter()
            .map(|a| {
                let effects: Vec<&str> = a.effects.iter().map(|e| e.description()).collect();
                (a.id.clone(), format!("{} - {} [{}]", a.name, a.description, effects.join("; ")))
            })
            .collect();
        let labels: Vec<String> = arenas.iter().map(|(_, label)| label.clone()).collect();
        let Some(index) = self.choose("Choose an arena", &labels)? else {
            return Ok(());
        };
        let Some((arena_id, _)) = arenas.get(index).cloned() else {
            return Ok(());
        };

        let mut rng = self.rng.clone();
        let opening = self.with_game(|game| {
            game.start_fight(&arena_id, &mut rng)
                .map(|session| session.history().to_vec())
        })?;
        self.rng = rng;
        if let Some(opening) = opening {
            for line in opening {
                writeln!(self.output, "  {line}")?;
            }
            self.set_state(ApplicationState::Combat);
        }
        Ok(())
    }

    fn skill_tree(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let player = game.player();
        let skills: Vec<(SkillId, String)> = game
            .catalog()
            .tree_skills(TreeOwner::Class(player.class))
            .iter()
            .map(|s| {
                let mark = if player.knows_skill(&s.id) { "*" } else { " " };
                (s.id.clone(), format!("[{mark}] {} (Lv {}) - {}", s.name, s.level_required, s.description))
            })
            .collect();
        writeln!(self.output, "Skill points: {}", player.skill_points)?;
        let labels: Vec<String> = skills.iter().map(|(_, l)| l.clone()).collect();
        if let Some((id, _)) = self.choose("Learn which skill?", &labels)?.and_then(|i| skills.get(i).cloned()) {
            if let Some(name) = self.with_game(|game| game.learn_skill(&id))? {
                writeln!(self.output, "Learned {name}.")?;
            }
        }
        Ok(())
    }

    fn inventory_menu(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        for (i, item) in game.player().inventory.iter().enumerate() {
            writeln!(self.output, "  [{}] {} ({}, {})", i, item.name, item.kind.name(), item.rarity.name())?;
        }
        let options: Vec<String> = ["Equip", "Unequip", "Sell", "Sort", "Optimize gear"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        match self.choose("Inventory", &options)? {
            Some(0) => {
                if let Some(index) = self.read_index()? {
                    if let Some(item) = self.with_game(|game| game.equip(index))? {
                        writeln!(self.output, "Equipped {}.", item.name)?;
                    }
                }
            }
            Some(1) => {
                let slots: Vec<String> = ItemSlot::all().iter().map(|s| s.name().to_string()).collect();
                if let Some(slot) = self.choose("Slot", &slots)?.and_then(|i| ItemSlot::all().get(i).copied()) {
                    if let Some(item) = self.with_game(|game| game.unequip(slot))? {
                        writeln!(self.output, "Unequipped {}.", item.name)?;
                    }
                }
            }
            Some(2) => {
                if let Some(index) = self.read_index()? {
                    if let Some(price) = self.with_game(|game| game.sell(index))? {
                        writeln!(self.output, "Sold for {price} gold.")?;
                    }
                }
            }
            Some(3) => {
                self.with_game(|game| game.sort_inventory())?;
            }
            Some(4) => {
                if let Some(changed) = self.with_game(|game| game.optimize_gear())? {
                    let names: Vec<&str> = changed.iter().map(|i| i.name.as_str()).collect();
                    match names.is_empty() {
                        true => writeln!(self.output, "Already wearing the best gear.")?,
                        false => writeln!(self.output, "Equipped {}.", names.join(", "))?,
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn read_index(&mut self) -> Result<Option<usize>> {
        let Some(answer) = self.prompt("item index")? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(index) => Ok(Some(index)),
            Err(_) => {
                writeln!(self.output, "! not a number")?;
                Ok(None)
            }
        }
    }

    fn shop_menu(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let stock: Vec<(ItemId, String)> = shop_stock(game.catalog())
            .iter()
            .map(|i| (i.id.clone(), format!("{} - {} gold ({})", i.name, i.cost, i.rarity.name())))
            .collect();
        let labels: Vec<String> = stock.iter().map(|(_, l)| l.clone()).collect();
        if let Some((id, _)) = self.choose("Buy", &labels)?.and_then(|i| stock.get(i).cloned()) {
            if let Some(item) = self.with_game(|game| game.buy(&id))? {
                writeln!(self.output, "Bought {}.", item.name)?;
            }
        }
        Ok(())
    }

    fn trainer_menu(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let cost = training_cost(game.player().level);
        let mut options: Vec<String> = StatKind::all()
            .iter()
            .map(|k| format!("Train {} ({cost} gold)", k.name()))
            .collect();
        let skills: Vec<(SkillId, String)> = game
            .catalog()
            .tree_skills(TreeOwner::Trainer)
            .iter()
            .map(|s| {
                let price = s.cost.unwrap_or_default();
                (s.id.clone(), format!("Learn {} (Lv {}, {price} gold) - {}", s.name, s.level_required, s.description))
            })
            .collect();
        options.extend(skills.iter().map(|(_, l)| l.clone()));

        let Some(choice) = self.choose("Trainer", &options)? else {
            return Ok(());
        };
        if let Some(&stat) = StatKind::all().get(choice) {
            if let Some(spent) = self.with_game(|game| game.train_stat(stat))? {
                writeln!(self.output, "{} trained for {spent} gold.", stat.name())?;
            }
        } else if let Some((id, _)) = skills.get(choice - StatKind::all().len()).cloned() {
            if let Some(name) = self.with_game(|game| game.buy_trainer_skill(&id))? {
                writeln!(self.output, "Learned {name}.")?;
            }
        }
        Ok(())
    }

    fn workshop_menu(&mut self) -> Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let catalog = game.catalog();
        let item_name = |id: &ItemId| catalog.item(id).map_or(id.to_string(), |i| i.name.clone());
        let recipes: Vec<(RecipeId, String)> = catalog
            .recipes()
            .iter()
            .map(|r| {
                let mut parts: Vec<String> = r
                    .materials
                    .iter()
                    .map(|(id, count)| format!("{count}x {}", item_name(id)))
                    .collect();
                if let Some(base) = &r.base_item {
                    parts.insert(0, format!("base {}", item_name(base)));
                }
                (r.id.clone(), format!("{} - {} gold, {}", item_name(&r.result), r.cost, parts.join(", ")))
            })
            .collect();
        let labels: Vec<String> = recipes.iter().map(|(_, l)| l.clone()).collect();
        if let Some((id, _)) = self.choose("Craft", &labels)?.and_then(|i| recipes.get(i).cloned()) {
            if let Some(item) = self.with_game(|game| game.craft(&id))? {
                writeln!(self.output, "Crafted {}.", item.name)?;
            }
        }
        Ok(())
    }

    fn save_game(&mut self) -> Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };
        match game.save(self.storage.as_mut()) {
            Ok(()) => writeln!(self.output, "Game saved.")?,
            Err(err) => {
                warn!(error = %err, "Save failed; continuing in memory");
                writeln!(self.output, "! Could not save: {err}")?;
            }
        }
        Ok(())
    }

    fn new_game_plus(&mut self) -> Result<()> {
        let answer = self
            .prompt("Start New Game+? Level, gold and gear reset; skills are kept (yes/no)")?
            .unwrap_or_default();
        let confirmed = answer.eq_ignore_ascii_case("yes");
        if !confirmed {
            writeln!(self.output, "New Game+ cancelled.")?;
            return Ok(());
        }
        if self.with_game(|game| game.new_game_plus(true))?.is_some() {
            writeln!(self.output, "A new cycle begins. Enemies grow stronger.")?;
        }
        Ok(())
    }

    // --- Combat ---

    fn combat_turn(&mut self) -> Result<()> {
        let delay = self.settings.gameplay.turn_delay();
        let mut rng = self.rng.clone();

        // Automatic stages: upkeep and the enemy's turn
        loop {
            let Some(game) = self.game.as_mut() else {
                self.set_state(ApplicationState::MainMenu);
                return Ok(());
            };
            let enemy_next = game.session().is_some_and(|s| s.phase() == TurnPhase::EnemyTurn);
            if enemy_next && !delay.is_zero() {
                std::thread::sleep(delay);
            }
            match game.step(&mut rng) {
                Ok(Some(report)) => self.print_report(&report)?,
                Ok(None) => break,
                Err(err) => {
                    self.report_error(&err)?;
                    break;
                }
            }
        }

        let over = self
            .game
            .as_ref()
            .and_then(Game::session)
            .map_or(true, |s| s.is_over());
        if over {
            let outcome = self.with_game(|game| game.finish(&mut rng))?;
            self.rng = rng;
            self.print_outcome(outcome)?;
            self.set_state(ApplicationState::Hub);
            return Ok(());
        }

        let Some(action) = self.choose_action()? else {
            self.rng = rng;
            if self.input_exhausted()? {
                self.set_state(ApplicationState::Exiting);
            }
            return Ok(());
        };
        if let Some(report) = self.with_game(|game| game.act(action, &mut rng))? {
            self.print_report(&report)?;
        }
        self.rng = rng;
        Ok(())
    }

    fn choose_action(&mut self) -> Result<Option<PlayerAction>> {
        let Some(session) = self.game.as_ref().and_then(Game::session) else {
            return Ok(None);
        };
        let (player, enemy) = (session.player(), session.enemy());
        let mana = player.mana.map_or(String::new(), |m| format!(" | MP {}/{}", m.current, m.max));
        let status = format!(
            "{} HP {}/{}{}  vs  {} HP {}/{}",
            player.name, player.current_health, player.max_health, mana,
            enemy.name, enemy.current_health, enemy.max_health
        );

        let mut actions = vec![PlayerAction::Attack];
        let mut labels = vec!["Attack".to_string()];
        if let Some(loadout) = &player.loadout {
            for slot in &loadout.skills {
                let cost = slot.skill.as_active().map_or(0, |a| a.mana_cost);
                let mut label = slot.skill.name.clone();
                if cost > 0 {
                    label.push_str(&format!(" ({cost} MP)"));
                }
                if slot.is_on_cooldown() {
                    label.push_str(&format!(" [cooldown {}]", slot.cooldown_remaining));
                }
                actions.push(PlayerAction::UseSkill(slot.skill.id.clone()));
                labels.push(label);
            }
        }

        labels.push("Combat log".to_string());

        writeln!(self.output, "\n{status}")?;
        loop {
            match self.choose("Your move", &labels)? {
                Some(i) if i == actions.len() => self.print_history()?,
                Some(i) => return Ok(actions.get(i).cloned()),
                None => return Ok(None),
            }
        }
    }

    fn print_outcome(&mut self, outcome: Option<CombatOutcome>) -> Result<()> {
        match outcome {
            Some(CombatOutcome::Victory(rewards)) => {
                writeln!(self.output, "VICTORY! +{} gold, +{} XP", rewards.gold, rewards.xp)?;
                for item in &rewards.loot {
                    writeln!(self.output, "  Loot: {}", item.name)?;
                }
                for level in &rewards.levels_gained {
                    writeln!(self.output, "  LEVEL UP! You are now level {level}.")?;
                }
            }
            Some(CombatOutcome::Defeat) => {
                writeln!(self.output, "DEFEAT. You are dragged from the arena and patched up.")?;
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gladiator_audio::NullSink;
    use gladiator_game::MemoryStorage;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        let mut settings = GameSettings::default();
        settings.gameplay.turn_delay_ms = 0;
        Console::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            settings,
            Box::new(MemoryStorage::new()),
            None,
            StdRng::seed_from_u64(11),
        )
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&console.output).into_owned()
    }

    /// A console sitting in the hub with a fresh Human Soldier
    fn console_in_hub(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        let mut console = console(script);
        let draft = CharacterDraft::new("Rook", Gender::Female, Race::Human, PlayerClass::Soldier);
        let game = Game::create(Catalog::standard(), draft, Box::new(NullSink)).unwrap();
        console.game = Some(game);
        console.set_state(ApplicationState::Hub);
        console
    }

    #[test]
    fn test_scripted_fight_returns_to_hub() {
        // first arena, one look at the log, then attack until it is over
        let script = format!("1\n2\n{}", "1\n".repeat(500));
        let mut console = console_in_hub(&script);

        console.pick_arena().unwrap();
        assert_eq!(console.state(), ApplicationState::Combat);
        while console.state() == ApplicationState::Combat {
            console.combat_turn().unwrap();
        }

        assert_eq!(console.state(), ApplicationState::Hub);
        let text = output(&console);
        assert!(text.contains("--- combat log ---"));
        assert!(text.contains("VICTORY!") || text.contains("DEFEAT."));
        assert!(console.game.as_ref().is_some_and(|g| !g.in_combat()));
    }

    #[test]
    fn test_combat_log_keeps_last_lines() {
        let mut console = console_in_hub("1\n");
        console.settings.gameplay.combat_log_limit = 1;
        console.pick_arena().unwrap();

        let last = console
            .game
            .as_ref()
            .and_then(Game::session)
            .and_then(|s| s.history().last().cloned())
            .unwrap();
        console.output.clear();
        console.print_history().unwrap();
        assert_eq!(output(&console), format!("--- combat log ---\n  {last}\n"));
    }

    #[test]
    fn test_saves_to_memory_without_data_dir() {
        let storage = crate::save::storage_or_memory(Err(gladiator_game::SaveError::Unavailable(
            "no data directory".into(),
        )));
        let mut console = console_in_hub("8\n");
        console.storage = storage;

        console.hub_menu().unwrap();
        assert!(output(&console).contains("Game saved."));
        assert!(Game::has_save(console.storage.as_ref()));
    }

    #[test]
    fn test_quit_from_main_menu() {
        let mut console = console("2\n");
        console.run().unwrap();
        assert_eq!(console.state(), ApplicationState::Exiting);
        assert!(output(&console).contains("Farewell"));
    }

    #[test]
    fn test_create_character_and_save() {
        // new, name, gender, race, class, two points, done, default backstory, save
        let script = "1\nRook\n1\n1\n1\n+str\n+con\ndone\n\n8\n";
        let mut console = console(script);
        console.run().unwrap();

        let text = output(&console);
        assert!(text.contains("Rook enters the arena circuit."));
        assert!(text.contains("Game saved."));
        assert!(Game::has_save(console.storage.as_ref()));
        let player = console.game.as_ref().map(|g| g.player().stats.strength);
        // base 5 + 1 allocated + human 1 + soldier 2
        assert_eq!(player, Some(9));
    }

    #[test]
    fn test_invalid_allocation_reported() {
        let script = "1\nRook\n1\n1\n1\n+foo\n*str\ndone\n\n";
        let mut console = console(script);
        console.run().unwrap();
        let text = output(&console);
        assert!(text.contains("unknown stat"));
        assert!(text.contains("use +stat or -stat"));
    }
}
