// src/store/players.rs

use std::path::PathBuf;

use crate::entities::Player;
use crate::error::{Error, Result};
use crate::store::json;

/// Durable store of player snapshots, one JSON file, keyed by id.
///
/// The whole file is read per call and rewritten per mutation. That is the
/// intended scale here: one process, a few thousand records, no concurrent
/// writers.
pub struct PlayerStore {
    path: PathBuf,
}

impl PlayerStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<Player>> {
        json::read_or_default(&self.path)
    }

    /// Upsert by id: the latest scrape wins wholesale.
    pub fn store(&self, player: &Player) -> Result<()> {
        let mut players = self.load()?;
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(slot) => *slot = player.clone(),
            None => players.push(player.clone()),
        }
        json::write(&self.path, &players)
    }

    pub fn fetch_by_id(&self, id: u32) -> Result<Player> {
        self.load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("player {}", id)))
    }

    pub fn fetch_by_url(&self, url: &str) -> Result<Player> {
        let id = self
            .load()?
            .iter()
            .find(|p| p.url == url)
            .map(|p| p.id)
            .ok_or_else(|| Error::NotFound(format!("player with url {}", url)))?;

        self.fetch_by_id(id)
    }

    /// Players weaker than `reference` on every compared attribute, the
    /// reference itself excluded. Ordered by gold lost (profitable targets
    /// first), then by registration date, newest first.
    pub fn fetch_weaker_than(
        &self,
        reference: &Player,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Player>> {
        self.select(reference, limit, offset, is_weaker_than)
    }

    /// Weaker targets of strictly higher level. Compares a reduced attribute
    /// set, with the fighting-ability and parry terms crossed on purpose;
    /// see DESIGN.md before touching this.
    pub fn fetch_weaker_and_higher_level(
        &self,
        reference: &Player,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Player>> {
        self.select(reference, limit, offset, is_weaker_and_higher_level)
    }

    fn select(
        &self,
        reference: &Player,
        limit: usize,
        offset: usize,
        keep: fn(&Player, &Player) -> bool,
    ) -> Result<Vec<Player>> {
        let mut matches: Vec<Player> = self
            .load()?
            .into_iter()
            .filter(|p| p.id != reference.id && keep(p, reference))
            .collect();

        matches.sort_by(|a, b| {
            b.gold_lost
                .cmp(&a.gold_lost)
                .then(b.created_at.cmp(&a.created_at))
        });

        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }
}

fn is_weaker_than(candidate: &Player, reference: &Player) -> bool {
    candidate.strength <= reference.strength
        && candidate.stamina <= reference.stamina
        && candidate.dexterity <= reference.dexterity
        && candidate.fighting_ability <= reference.fighting_ability
        && candidate.parry <= reference.parry
        && candidate.armour <= reference.armour
        && candidate.one_handed_attack <= reference.one_handed_attack
        && candidate.two_handed_attack <= reference.two_handed_attack
}

fn is_weaker_and_higher_level(candidate: &Player, reference: &Player) -> bool {
    candidate.level > reference.level
        && candidate.strength <= reference.strength
        && candidate.stamina <= reference.stamina
        && candidate.fighting_ability <= reference.parry
        && candidate.parry <= reference.fighting_ability
}
