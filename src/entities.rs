// src/entities.rs
// The two records everything else revolves around: a scraped player
// snapshot and one battle report line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One player as scraped from their profile page. Attribute and skill
/// values are the raw numbers shown there; the career block at the bottom
/// of the profile fills the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub level: u32,
    /// Good/evil axis, negative for evil.
    pub alignment: i32,
    pub current_hp: f64,
    pub max_hp: u32,
    pub experience: i64,
    /// Registration date ("Knight since").
    pub created_at: DateTime<Utc>,

    // Attributes.
    pub strength: u32,
    pub stamina: u32,
    pub dexterity: u32,
    pub fighting_ability: u32,
    pub parry: u32,

    // Skills.
    pub armour: u32,
    pub one_handed_attack: u32,
    pub two_handed_attack: u32,

    /// Profile page path, the canonical handle for queue entries.
    pub url: String,

    // Career totals.
    pub total_loot: u64,
    pub total_battles: u32,
    pub wins: u32,
    pub losses: u32,
    pub undecided: u32,
    pub gold_received: u64,
    pub gold_lost: u64,
    pub damage_to_enemies: u64,
    pub damage_from_enemies: u64,
}

impl Default for Player {
    /// A freshly registered level-1 character.
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            level: 1,
            alignment: 0,
            current_hp: 1.0,
            max_hp: 100,
            experience: 1,
            created_at: Utc::now(),
            strength: 5,
            stamina: 5,
            dexterity: 5,
            fighting_ability: 5,
            parry: 5,
            armour: 0,
            one_handed_attack: 0,
            two_handed_attack: 0,
            url: String::new(),
            total_loot: 0,
            total_battles: 0,
            wins: 0,
            losses: 0,
            undecided: 0,
            gold_received: 0,
            gold_lost: 0,
            damage_to_enemies: 0,
            damage_from_enemies: 0,
        }
    }
}

/// One fight, as listed in the attack-report messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub battle_id: u64,
    pub attacker_id: u32,
    pub victim_id: u32,
    pub winner_id: u32,
    pub date: DateTime<Utc>,
}
