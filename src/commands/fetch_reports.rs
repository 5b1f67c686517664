// src/commands/fetch_reports.rs
// Pages through the attack-report messages and folds every row into the
// battle ledger. These are the own account's outgoing attacks, so the
// attacker is always us.

use crate::entities::{BattleReport, Player};
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::scrape::reports;
use crate::session::GameClient;
use crate::store::{BattleLedger, PlayerStore};

const REPORTS_PAGE: &str = "nachrichten/angriff/";
const PAGE_STEP: u64 = 10;

pub fn run(
    client: &dyn GameClient,
    players: &PlayerStore,
    ledger: &BattleLedger,
    progress: &mut dyn Progress,
) -> Result<()> {
    let me = super::current_player(client, players)?;

    let mut count: u64 = 0;
    let mut total: Option<u64> = None;

    loop {
        let page = client.get(&format!("{}?count={}", REPORTS_PAGE, count))?;

        if total.is_none() {
            total = reports::total(&page);
            let known = total.unwrap_or(0);
            log::info!("Fetching {} battle reports.", known);
            progress.begin(known as usize);
        }

        let rows = reports::rows(&page);
        if rows.is_empty() {
            break;
        }
        for row in rows {
            ingest(&me, players, ledger, &row)?;
            progress.tick();
        }

        count += PAGE_STEP;
        if total.map(|t| count >= t).unwrap_or(true) {
            break;
        }
    }

    progress.finish();
    Ok(())
}

fn ingest(
    me: &Player,
    players: &PlayerStore,
    ledger: &BattleLedger,
    row: &reports::ReportRow,
) -> Result<()> {
    let victim = match players.fetch_by_url(&row.victim_url) {
        Ok(v) => v,
        Err(Error::NotFound(_)) => {
            log::debug!("Report {} names an unscraped victim, skipping.", row.battle_id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let winner_id = if row.winner_name == me.name {
        me.id
    } else {
        victim.id
    };

    ledger.store(&BattleReport {
        battle_id: row.battle_id,
        attacker_id: me.id,
        victim_id: victim.id,
        winner_id,
        date: row.date,
    })
}
