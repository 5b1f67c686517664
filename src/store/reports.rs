// src/store/reports.rs

use std::path::PathBuf;

use crate::entities::BattleReport;
use crate::error::Result;
use crate::store::json;

/// Durable log of battle outcomes, one JSON file, keyed by battle id.
pub struct BattleLedger {
    path: PathBuf,
}

impl BattleLedger {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<BattleReport>> {
        json::read_or_default(&self.path)
    }

    /// Upsert by battle id; re-ingesting the same report is a no-op update.
    pub fn store(&self, report: &BattleReport) -> Result<()> {
        let mut reports = self.load()?;
        match reports.iter_mut().find(|r| r.battle_id == report.battle_id) {
            Some(slot) => *slot = report.clone(),
            None => reports.push(report.clone()),
        }
        json::write(&self.path, &reports)
    }

    /// Every recorded encounter between the two players, either direction.
    pub fn find_by_pair(&self, attacker_id: u32, victim_id: u32) -> Result<Vec<BattleReport>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| {
                (r.attacker_id == attacker_id && r.victim_id == victim_id)
                    || (r.attacker_id == victim_id && r.victim_id == attacker_id)
            })
            .collect())
    }
}
