// src/lock.rs

use crate::error::Result;
use crate::html::int_after;
use crate::session::GameClient;

/// The mission page embeds the remaining battle lock as
/// `var Secondscounter = N;`.
const LOCK_MARKER: &str = "var Secondscounter = ";
const MISSION_PAGE: &str = "raubzug/";

/// Derives the account's battle cooldown from the live mission page.
/// Never cached: the server owns this number, we just read it.
pub struct LockTracker<'a> {
    client: &'a dyn GameClient,
}

impl<'a> LockTracker<'a> {
    pub fn new(client: &'a dyn GameClient) -> Self {
        Self { client }
    }

    /// Seconds until the next attack is allowed; 0 when unlocked.
    /// A page without the marker means "not locked", not an error.
    pub fn current_lock_seconds(&self) -> Result<u64> {
        let page = self.client.get(MISSION_PAGE)?;
        Ok(parse_lock_seconds(&page))
    }
}

pub fn parse_lock_seconds(page: &str) -> u64 {
    int_after(page, LOCK_MARKER).unwrap_or(0)
}
