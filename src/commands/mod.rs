// src/commands/mod.rs

pub mod fetch_players;
pub mod fetch_reports;
pub mod game;
pub mod load_stats;
pub mod queue;

use crate::entities::Player;
use crate::error::Result;
use crate::scrape::status;
use crate::session::GameClient;
use crate::store::PlayerStore;

/// The logged-in account's own record: id off the status page, the rest
/// from the player store. Fails with `NotFound` until the pool has been
/// scraped at least once.
pub fn current_player(client: &dyn GameClient, players: &PlayerStore) -> Result<Player> {
    let page = client.get("status/")?;
    let id = status::player_id(&page)?;
    players.fetch_by_id(id)
}
