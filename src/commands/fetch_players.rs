// src/commands/fetch_players.rs
// Walks the loot highscore through its csrf-guarded pagination form, then
// scrapes every listed profile into the player store.

use crate::entities::Player;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::scrape::{highscore, profile};
use crate::session::GameClient;
use crate::store::PlayerStore;

const HIGHSCORE_PAGE: &str = "highscore/";
const PAGE_STEP: u64 = 100;

pub fn run(
    client: &dyn GameClient,
    players: &PlayerStore,
    progress: &mut dyn Progress,
) -> Result<()> {
    let first = client.get(HIGHSCORE_PAGE)?;
    let mut entries = highscore::entries(&first);
    let mut csrf = highscore::csrf_token(&first);

    // Each POST asks for the next block of 100. A page past the end shows
    // only the own pinned row, which is the stop signal.
    let mut count = PAGE_STEP;
    while let Some(token) = csrf.clone() {
        let fields = vec![
            ("ac".to_string(), "highscore".to_string()),
            ("sac".to_string(), "spieler".to_string()),
            ("sort".to_string(), "1".to_string()),
            ("csort".to_string(), "1".to_string()),
            ("filter".to_string(), "beute".to_string()),
            ("clanfilter".to_string(), "beute".to_string()),
            ("count".to_string(), count.to_string()),
            ("csrftoken".to_string(), token),
        ];
        let page = client.post_form(&format!("{}?fragment=1", HIGHSCORE_PAGE), &fields)?;

        let page_entries = highscore::entries(&page);
        if page_entries.len() <= 1 {
            break;
        }

        csrf = highscore::csrf_token(&page).or(csrf);
        entries.extend(page_entries);
        count += PAGE_STEP;
    }

    let mut seen: Vec<String> = Vec::new();
    entries.retain(|e| {
        if seen.iter().any(|u| u == &e.url) {
            false
        } else {
            seen.push(e.url.clone());
            true
        }
    });

    log::info!("Scraping {} player profiles.", entries.len());
    progress.begin(entries.len());
    for entry in &entries {
        match scrape_profile(client, entry) {
            Ok(player) => players.store(&player)?,
            // A single mangled profile should not sink the whole sweep.
            Err(Error::Scrape(msg)) => log::warn!("Skipping {}: {}", entry.name, msg),
            Err(e) => return Err(e),
        }
        progress.tick();
    }
    progress.finish();

    Ok(())
}

fn scrape_profile(client: &dyn GameClient, entry: &highscore::HighscoreEntry) -> Result<Player> {
    let page = client.get(&entry.url)?;
    profile::parse(&page, &entry.name, &entry.url, entry.level)
}
