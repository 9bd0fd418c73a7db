//! Built-in Galactic Gladiator content

use gladiator_core::{ArenaId, EnemyId, StatKind, Stats};

use crate::catalog::{Catalog, Recipe, TreeOwner};
use crate::combat::arena::{Arena, EnvironmentalEffect};
use crate::combat::damage_type::{DamageType, Resistances};
use crate::combat::enemy::{EnemyTemplate, GoldDrop, LootEntry};
use crate::combat::item::{
    EffectTrigger, Item, ItemEffect, ItemEffectKind, ItemKind, ItemRarity, ItemSlot, WeaponDamage,
};
use crate::combat::skill::{ActiveSkill, PassiveSkill, Skill, SkillDamage, SkillStatus, StatusTarget};
use crate::combat::status::{StatusEffect, StatusKind};
use crate::player::PlayerClass;

use DamageType::*;
use ItemRarity::*;

pub fn standard_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for item in weapons()
        .into_iter()
        .chain(armors())
        .chain(implants())
        .chain(crafted())
        .chain(materials())
    {
        catalog.add_item(item);
    }
    for enemy in enemies() {
        catalog.add_enemy(enemy);
    }
    add_skill_trees(&mut catalog);
    for arena in arenas() {
        catalog.add_arena(arena);
    }
    for recipe in recipes() {
        catalog.add_recipe(recipe);
    }
    catalog
}

fn stat(kind: StatKind, value: i32) -> Stats {
    Stats::single(kind, value)
}

fn weapon(id: &str, name: &str, rarity: ItemRarity, kind: ItemKind, damage: (DamageType, i32), cost: u32) -> Item {
    Item::gear(id, name, kind, rarity, ItemSlot::Weapon, cost).with_damage(damage.0, damage.1)
}

fn armor(id: &str, name: &str, rarity: ItemRarity, kind: ItemKind, stats: Stats, resistances: Resistances, cost: u32) -> Item {
    Item::gear(id, name, kind, rarity, ItemSlot::Armor, cost)
        .with_stats(stats)
        .with_resistances(resistances)
}

fn implant(id: &str, name: &str, rarity: ItemRarity, stats: Stats, cost: u32) -> Item {
    Item::gear(id, name, ItemKind::Cybernetic, rarity, ItemSlot::Implant, cost).with_stats(stats)
}

fn on_hit_status(status: StatusEffect, chance: f64, description: &str) -> ItemEffect {
    ItemEffect::new(EffectTrigger::OnHit, ItemEffectKind::StatusEffect(status), 0.0, description)
        .with_chance(chance)
}

fn weapons() -> Vec<Item> {
    vec![
        weapon("item_weapon_001", "Basic Laser Pistol", Common, ItemKind::Pistol, (Energy, 4), 20)
            .described("A reliable, if uninspired, sidearm. Standard issue for just about everyone."),
        weapon("item_weapon_002", "Calibrated Laser Rifle", Uncommon, ItemKind::Rifle, (Energy, 8), 150)
            .with_stats(stat(StatKind::Intelligence, 1))
            .described("A more powerful laser weapon."),
        weapon("item_weapon_003", "Ion Blaster", Rare, ItemKind::Pistol, (Lightning, 12), 350)
            .described("Deals significant lightning damage."),
        weapon("item_weapon_004", "Corrosive Disintegrator", Epic, ItemKind::Rifle, (Energy, 10), 750)
            .with_stats(stat(StatKind::Strength, 1))
            .with_effect(
                ItemEffect::new(
                    EffectTrigger::OnHit,
                    ItemEffectKind::ArmorShred,
                    1.0,
                    "On Hit: 25% chance to reduce enemy defense.",
                )
                .with_chance(0.25),
            )
            .described("Fires projectiles that shred through defenses."),
        weapon("item_weapon_005", "Vibro-Knife", Uncommon, ItemKind::Melee, (Kinetic, 6), 120)
            .with_stats(stat(StatKind::Dexterity, 1))
            .described("A silent but deadly blade for close encounters."),
        weapon("item_weapon_006", "Concussion Grenade Launcher", Rare, ItemKind::Rifle, (Explosive, 15), 500)
            .with_stats(stat(StatKind::Strength, 1))
            .described("Lobs grenades that deal explosive damage."),
        weapon("item_weapon_007", "Incinerator Nozzle", Rare, ItemKind::Rifle, (Fire, 10), 450)
            .with_effect(on_hit_status(
                StatusEffect::new(StatusKind::Burn, 2, 5),
                0.3,
                "On Hit: 30% chance to Burn enemy.",
            ))
            .described("A weapon that spews a jet of plasma."),
        weapon("item_weapon_008", "Cryo Beam Emitter", Rare, ItemKind::Rifle, (Ice, 8), 420)
            .described("Fires a beam of supercooled particles."),
    ]
}

fn armors() -> Vec<Item> {
    use StatKind::{Constitution, Dexterity};
    vec![
        armor(
            "item_armor_001",
            "Worn Plasteel Vest",
            Common,
            ItemKind::MediumArmor,
            stat(Constitution, 1),
            Resistances::new().with(Kinetic, 0.1).with(Energy, 0.05),
            20,
        )
        .described("It has seen better days, but it can still stop a low-energy blast or two."),
        armor(
            "item_armor_002",
            "Reinforced Combat Armor",
            Uncommon,
            ItemKind::MediumArmor,
            stat(Constitution, 2),
            Resistances::new().with(Kinetic, 0.2).with(Explosive, 0.15),
            150,
        )
        .described("Standard military-grade armor."),
        armor(
            "item_armor_003",
            "Ablative Shielding",
            Rare,
            ItemKind::HeavyArmor,
            stat(Constitution, 3),
            Resistances::new().with(Kinetic, 0.3).with(Energy, 0.1).with(Fire, 0.1),
            350,
        )
        .described("Top-tier personal protection."),
        armor(
            "item_armor_004",
            "Kinetic Reflector Armor",
            Epic,
            ItemKind::HeavyArmor,
            stat(Constitution, 2),
            Resistances::new().with(Kinetic, 0.2),
            900,
        )
        .with_effect(ItemEffect::new(
            EffectTrigger::Passive,
            ItemEffectKind::DamageReflect,
            0.1,
            "Passive: Reflects 10% of incoming damage.",
        ))
        .described("This plating returns a portion of kinetic energy to its source."),
        armor(
            "item_armor_005",
            "Synth-Leather Jacket",
            Uncommon,
            ItemKind::LightArmor,
            stat(Dexterity, 1),
            Resistances::new().with(Energy, 0.1).with(Ice, -0.15),
            90,
        )
        .described("Favored by scoundrels and scouts for its flexibility."),
        armor(
            "item_armor_006",
            "Thermal Dampening Suit",
            Rare,
            ItemKind::MediumArmor,
            stat(Constitution, 1),
            Resistances::new().with(Fire, 0.5).with(Ice, 0.5),
            600,
        )
        .described("Provides excellent protection against extreme temperatures."),
        armor(
            "item_armor_007",
            "Asbestos-Lined Cloak",
            Uncommon,
            ItemKind::LightArmor,
            stat(Dexterity, 1),
            Resistances::new().with(Fire, 0.4).with(Kinetic, -0.15),
            180,
        )
        .described("A light cloak offering surprising protection against flames, though it provides little physical defense."),
        armor(
            "item_armor_008",
            "Cryo-Weave Tunic",
            Uncommon,
            ItemKind::MediumArmor,
            stat(Constitution, 1),
            Resistances::new().with(Ice, 0.4).with(Lightning, -0.2),
            190,
        )
        .described("Insulated plating that dissipates extreme cold but is susceptible to shock."),
        armor(
            "item_armor_009",
            "Faraday Cage Mesh",
            Rare,
            ItemKind::HeavyArmor,
            Stats::new(0, -1, 0, 2, 0),
            Resistances::new().with(Lightning, 0.6).with(Energy, 0.2),
            400,
        )
        .described("A heavy suit that grounds and disperses electrical attacks but is cumbersome."),
    ]
}

fn implants() -> Vec<Item> {
    vec![
        implant("item_implant_001", "Reflex Booster", Uncommon, stat(StatKind::Dexterity, 2), 200)
            .described("Subdermal implant to speed up reaction times."),
        implant("item_implant_002", "Probability Modulator", Uncommon, stat(StatKind::Luck, 2), 250)
            .described("A small device that subtly manipulates chance in your favor."),
        implant("item_implant_003", "Cognitive Enhancer", Uncommon, stat(StatKind::Intelligence, 2), 200)
            .described("Boosts tactical processing power."),
        implant("item_implant_004", "Nanite Blood-Leech", Epic, Stats::default(), 800)
            .with_effect(ItemEffect::new(
                EffectTrigger::OnHit,
                ItemEffectKind::Lifesteal,
                0.10,
                "On Hit: Heals for 10% of damage dealt.",
            ))
            .described("A swarm of nanites that repair your tissue by consuming enemy bio-matter."),
        implant("item_implant_005", "Scholar's Datachip", Epic, stat(StatKind::Intelligence, 1), 600)
            .with_effect(ItemEffect::new(
                EffectTrigger::Passive,
                ItemEffectKind::BonusXp,
                0.15,
                "Passive: Gain 15% more XP from combat.",
            ))
            .described("This implant analyzes combat data, accelerating the learning process."),
    ]
}

fn crafted() -> Vec<Item> {
    vec![
        weapon("item_weapon_cr_001", "Precision Laser Rifle", Rare, ItemKind::Rifle, (Energy, 11), 400)
            .with_stats(Stats::new(0, 0, 2, 0, 1))
            .described("An upgraded rifle with a superior focusing lens."),
        armor(
            "item_armor_cr_001",
            "Hardened Combat Armor",
            Rare,
            ItemKind::MediumArmor,
            stat(StatKind::Constitution, 3),
            Resistances::new().with(Kinetic, 0.25).with(Explosive, 0.2).with(Energy, 0.1),
            500,
        )
        .described("Combat armor reinforced with exotic alloys."),
        weapon("item_weapon_cr_002", "Venom-Tipped Vibro-Knife", Rare, ItemKind::Melee, (Kinetic, 7), 400)
            .with_stats(stat(StatKind::Dexterity, 1))
            .with_effect(on_hit_status(
                StatusEffect::new(StatusKind::Poison, 3, 4),
                0.4,
                "On Hit: 40% chance to Poison enemy.",
            ))
            .described("This blade carries a potent neurotoxin."),
    ]
}

fn materials() -> Vec<Item> {
    vec![
        Item::material("mat_scrap", "Scrap Metal", Common, 5)
            .described("Commonplace metal fragments. Useful for basic crafting."),
        Item::material("mat_energy_cell", "Energy Cell", Common, 10)
            .described("A standard power source for various technologies."),
        Item::material("mat_zylorian_crystal", "Zylorian Crystal", Rare, 100)
            .described("A rare crystal that hums with latent psionic energy."),
        Item::material("mat_focusing_lens", "Focusing Lens", Uncommon, 75)
            .described("A precision-cut lens used in advanced energy weapons."),
        Item::material("mat_hardened_plating", "Hardened Plating", Uncommon, 80)
            .described("Alloy plates used to reinforce armor."),
        Item::material("mat_neurotoxin", "Concentrated Neurotoxin", Uncommon, 90)
            .described("A potent poison harvested from alien creatures."),
    ]
}

fn enemies() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate {
            id: EnemyId::new("enemy_001"),
            name: "Space Pirate Grunt".into(),
            level: 1,
            stats: Stats::new(5, 4, 2, 6, 2),
            damage: WeaponDamage::new(Kinetic, 5),
            resistances: Resistances::new().with(Magic, -0.5),
            loot: vec![
                LootEntry::new("mat_scrap", 0.8, 1, 3),
                LootEntry::new("item_weapon_005", 0.05, 1, 1),
            ],
            gold: GoldDrop { min: 10, max: 25 },
            xp_value: 15,
            on_hit_status: None,
        },
        EnemyTemplate {
            id: EnemyId::new("enemy_002"),
            name: "Rogue Security Drone".into(),
            level: 2,
            stats: Stats::new(7, 5, 1, 8, 1),
            damage: WeaponDamage::new(Kinetic, 8),
            resistances: Resistances::new()
                .with(Kinetic, 0.25)
                .with(Energy, -0.25)
                .with(Magic, 0.5)
                .with(Explosive, -0.3)
                .with(Ice, 0.3)
                .with(Lightning, -0.4),
            loot: vec![
                LootEntry::new("mat_scrap", 0.5, 2, 4),
                LootEntry::new("mat_energy_cell", 0.7, 1, 2),
                LootEntry::new("mat_hardened_plating", 0.1, 1, 1),
            ],
            gold: GoldDrop { min: 20, max: 40 },
            xp_value: 25,
            on_hit_status: None,
        },
        EnemyTemplate {
            id: EnemyId::new("enemy_003"),
            name: "Void Lurker".into(),
            level: 3,
            stats: Stats::new(8, 8, 4, 7, 5),
            damage: WeaponDamage::new(Kinetic, 10),
            resistances: Resistances::new()
                .with(Energy, 0.2)
                .with(Magic, -0.2)
                .with(Fire, -0.3),
            loot: vec![LootEntry::new("mat_neurotoxin", 0.25, 1, 2)],
            gold: GoldDrop { min: 30, max: 60 },
            xp_value: 40,
            on_hit_status: Some(StatusEffect::new(StatusKind::Poison, 3, 3)),
        },
        EnemyTemplate {
            id: EnemyId::new("enemy_004"),
            name: "Psionic Shade".into(),
            level: 4,
            stats: Stats::new(5, 7, 10, 6, 4),
            damage: WeaponDamage::new(Magic, 12),
            resistances: Resistances::new().with(Magic, 0.5).with(Kinetic, 0.2),
            loot: vec![
                LootEntry::new("mat_zylorian_crystal", 0.2, 1, 1),
                LootEntry::new("mat_energy_cell", 0.5, 1, 3),
            ],
            gold: GoldDrop { min: 40, max: 70 },
            xp_value: 55,
            on_hit_status: None,
        },
    ]
}

fn strike(multiplier: f64) -> ActiveSkill {
    ActiveSkill {
        damage: Some(SkillDamage::weapon(multiplier, Kinetic)),
        heal: None,
        status: None,
        cooldown: 0,
        mana_cost: 0,
    }
}

fn add_skill_trees(catalog: &mut Catalog) {
    use StatKind::{Constitution, Intelligence, Luck, Strength};

    catalog.add_tree(
        "soldier_tree",
        "Soldier Skills",
        TreeOwner::Class(PlayerClass::Soldier),
        vec![
            Skill::active("power_shot", "Power Shot", 1, ActiveSkill { cooldown: 3, ..strike(1.5) })
                .described("A charged attack that deals 150% of normal weapon damage."),
            Skill::passive(
                "heavy_hitter",
                "Heavy Hitter",
                3,
                PassiveSkill {
                    stat_bonus: stat(Strength, 2),
                    ..PassiveSkill::default()
                },
            )
            .requires("power_shot")
            .described("Passive: Permanently increases Strength by 2."),
            Skill::active(
                "breaching_strike",
                "Breaching Strike",
                5,
                ActiveSkill {
                    damage: Some(SkillDamage::weapon(1.2, Kinetic).ignoring_defense(0.5)),
                    cooldown: 4,
                    ..strike(1.2)
                },
            )
            .requires("heavy_hitter")
            .described("An attack that ignores half of the enemy's defense."),
            Skill::active(
                "demolition_charge",
                "Demolition Charge",
                7,
                ActiveSkill {
                    damage: Some(SkillDamage::scaling(Strength, 1.2, Explosive)),
                    cooldown: 5,
                    ..strike(1.0)
                },
            )
            .requires("breaching_strike")
            .described("Deals damage equal to 120% of your Strength as Explosive damage."),
        ],
    );

    catalog.add_tree(
        "scoundrel_tree",
        "Scoundrel Skills",
        TreeOwner::Class(PlayerClass::Scoundrel),
        vec![
            Skill::active("swift_strike", "Swift Strike", 1, ActiveSkill { cooldown: 1, ..strike(0.8) })
                .described("A quick jab that deals 80% weapon damage but has a short cooldown."),
            Skill::active(
                "venomous_strike",
                "Venomous Strike",
                3,
                ActiveSkill {
                    status: Some(SkillStatus {
                        target: StatusTarget::Opponent,
                        effect: StatusEffect::new(StatusKind::Poison, 3, 4),
                        chance: Some(0.5),
                    }),
                    cooldown: 4,
                    ..strike(1.1)
                },
            )
            .requires("swift_strike")
            .described("An attack that has a 50% chance to poison the target for 3 turns."),
            Skill::passive(
                "double_tap",
                "Double Tap",
                5,
                PassiveSkill {
                    extra_strike_chance: 0.15,
                    ..PassiveSkill::default()
                },
            )
            .requires("venomous_strike")
            .described("Passive: Your basic attacks have a 15% chance to strike twice."),
        ],
    );

    catalog.add_tree(
        "mystic_tree",
        "Mystic Skills",
        TreeOwner::Class(PlayerClass::Mystic),
        vec![
            Skill::active(
                "mana_bolt",
                "Mana Bolt",
                1,
                ActiveSkill {
                    damage: Some(SkillDamage::scaling(Intelligence, 1.2, Magic)),
                    heal: None,
                    status: None,
                    cooldown: 2,
                    mana_cost: 10,
                },
            )
            .described("Attack using your intelligence, dealing 120% of your INT as Magic damage."),
            Skill::passive(
                "mental_fortitude",
                "Mental Fortitude",
                3,
                PassiveSkill {
                    stat_bonus: stat(Intelligence, 2),
                    ..PassiveSkill::default()
                },
            )
            .requires("mana_bolt")
            .described("Passive: Permanently increases Intelligence by 2."),
            Skill::active(
                "arcane_shield",
                "Arcane Shield",
                5,
                ActiveSkill {
                    damage: None,
                    heal: None,
                    status: Some(SkillStatus {
                        target: StatusTarget::Caster,
                        effect: StatusEffect::new(StatusKind::DefenseUp, 3, 5),
                        chance: None,
                    }),
                    cooldown: 6,
                    mana_cost: 20,
                },
            )
            .requires("mental_fortitude")
            .described("Raise a psionic barrier that adds 5 defense for 3 turns."),
            Skill::active(
                "mind_wrack",
                "Mind Wrack",
                7,
                ActiveSkill {
                    damage: Some(SkillDamage::scaling(Intelligence, 0.5, Magic)),
                    heal: None,
                    status: Some(SkillStatus {
                        target: StatusTarget::Opponent,
                        effect: StatusEffect::flag(StatusKind::Stun, 1),
                        chance: Some(0.3),
                    }),
                    cooldown: 5,
                    mana_cost: 25,
                },
            )
            .requires("arcane_shield")
            .described("Assault the enemy's mind, with a 30% chance to Stun them for 1 turn."),
        ],
    );

    catalog.add_tree(
        "trainer_tree",
        "Trainer Skills",
        TreeOwner::Trainer,
        vec![
            Skill::active(
                "first_aid",
                "First Aid",
                2,
                ActiveSkill {
                    damage: None,
                    heal: Some(25),
                    status: None,
                    cooldown: 5,
                    mana_cost: 0,
                },
            )
            .priced(500)
            .described("Apply a quick stimpack, healing for 25 health."),
            Skill::passive(
                "improved_constitution",
                "Improved Constitution",
                4,
                PassiveSkill {
                    stat_bonus: stat(Constitution, 2),
                    ..PassiveSkill::default()
                },
            )
            .requires("first_aid")
            .priced(1000)
            .described("Passive: Permanently increases Constitution by 2."),
            Skill::passive(
                "lucky_find",
                "Lucky Find",
                3,
                PassiveSkill {
                    stat_bonus: stat(Luck, 2),
                    ..PassiveSkill::default()
                },
            )
            .priced(750)
            .described("Passive: Permanently increases Luck by 2."),
        ],
    );
}

fn damage_mod(damage_type: DamageType, multiplier: f64, description: &str) -> EnvironmentalEffect {
    EnvironmentalEffect::DamageModifier {
        damage_type,
        multiplier,
        description: description.to_string(),
    }
}

fn turn_effect(status: StatusEffect, chance: f64, description: &str) -> EnvironmentalEffect {
    EnvironmentalEffect::TurnEffect {
        status,
        chance,
        description: description.to_string(),
    }
}

fn arenas() -> Vec<Arena> {
    vec![
        Arena {
            id: ArenaId::new("arena_001"),
            name: "The Scrapyard".into(),
            description: "A junkyard arena where tetanus is as dangerous as the enemy.".into(),
            level_range: (1, 3),
            possible_enemies: vec![EnemyId::new("enemy_001"), EnemyId::new("enemy_002")],
            effects: vec![
                damage_mod(Kinetic, 1.15, "+15% Kinetic Damage"),
                damage_mod(Explosive, 1.15, "+15% Explosive Damage"),
                turn_effect(
                    StatusEffect::new(StatusKind::Poison, 2, 2),
                    0.1,
                    "10% chance to Poison combatants each turn.",
                ),
            ],
        },
        Arena {
            id: ArenaId::new("arena_002"),
            name: "Volcanic Forge".into(),
            description: "A battleground amidst rivers of lava. The intense heat is a constant threat.".into(),
            level_range: (3, 5),
            possible_enemies: vec![EnemyId::new("enemy_002"), EnemyId::new("enemy_003")],
            effects: vec![
                damage_mod(Fire, 1.25, "+25% Fire Damage"),
                damage_mod(Ice, 0.75, "-25% Ice Damage"),
                turn_effect(
                    StatusEffect::new(StatusKind::Burn, 1, 4),
                    0.2,
                    "20% chance to Burn combatants each turn.",
                ),
            ],
        },
        Arena {
            id: ArenaId::new("arena_003"),
            name: "Zylorian Mind-Scape".into(),
            description: "A psychic battleground where reality is thin and thoughts are weapons.".into(),
            level_range: (4, 6),
            possible_enemies: vec![EnemyId::new("enemy_004")],
            effects: vec![
                damage_mod(Magic, 1.30, "+30% Magic Damage"),
                damage_mod(Kinetic, 0.80, "-20% Kinetic Damage"),
            ],
        },
    ]
}

fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::crafting(
            "craft_reinforced_armor",
            "item_armor_002",
            &[("mat_scrap", 10), ("mat_hardened_plating", 2)],
            100,
        ),
        Recipe::crafting(
            "craft_ion_blaster",
            "item_weapon_003",
            &[("mat_scrap", 8), ("mat_energy_cell", 5)],
            150,
        ),
        Recipe::modification(
            "mod_precise_rifle",
            "item_weapon_002",
            "item_weapon_cr_001",
            &[("mat_focusing_lens", 2), ("mat_energy_cell", 5)],
            200,
        ),
        Recipe::modification(
            "mod_hardened_armor",
            "item_armor_002",
            "item_armor_cr_001",
            &[("mat_hardened_plating", 4), ("mat_scrap", 10)],
            250,
        ),
        Recipe::modification(
            "mod_venom_knife",
            "item_weapon_005",
            "item_weapon_cr_002",
            &[("mat_neurotoxin", 3), ("mat_zylorian_crystal", 1)],
            300,
        ),
    ]
}
