// src/scrape/status.rs

use crate::error::{Error, Result};
use crate::html::{digits_at, to_lower};

/// Current account's player id from the status page.
/// The page carries it inside an element of class `your_id`.
pub fn player_id(doc: &str) -> Result<u32> {
    let lc = to_lower(doc);
    let at = lc
        .find("your_id")
        .ok_or_else(|| Error::Scrape("status page has no your_id marker".into()))?;

    let (id, _) = digits_at(doc, at + "your_id".len())
        .ok_or_else(|| Error::Scrape("your_id marker carries no id".into()))?;

    u32::try_from(id).map_err(|_| Error::Scrape("your_id out of range".into()))
}
