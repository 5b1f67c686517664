// src/targets.rs

use chrono::Utc;

use crate::entities::Player;
use crate::error::Result;
use crate::store::{BattleLedger, PlayerStore};

/// Picks opponents out of the scraped pool and enforces the per-victim
/// re-attack window. Reads the stores, never writes them.
pub struct TargetSelector<'a> {
    players: &'a PlayerStore,
    ledger: &'a BattleLedger,
}

impl<'a> TargetSelector<'a> {
    pub fn new(players: &'a PlayerStore, ledger: &'a BattleLedger) -> Self {
        Self { players, ledger }
    }

    /// Weaker targets ranked by historical gold lost: the farming list.
    pub fn farm(&self, me: &Player, limit: usize, offset: usize) -> Result<Vec<Player>> {
        self.players.fetch_weaker_than(me, limit, offset)
    }

    /// Weaker targets of higher level, for levelling up.
    pub fn level_up(&self, me: &Player, limit: usize, offset: usize) -> Result<Vec<Player>> {
        self.players.fetch_weaker_and_higher_level(me, limit, offset)
    }

    /// False while any recorded fight between the two players falls inside
    /// the trailing window: under a day old and fewer than `window_hours`
    /// whole hours ago.
    pub fn is_eligible(&self, attacker: &Player, victim: &Player, window_hours: i64) -> Result<bool> {
        let now = Utc::now();

        for report in self.ledger.find_by_pair(attacker.id, victim.id)? {
            let elapsed = now.signed_duration_since(report.date);
            if elapsed.num_days() == 0 && elapsed.num_hours() < window_hours {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
