// src/commands/queue.rs

use crate::error::{Error, Result};
use crate::store::{AttackQueue, PlayerStore};

/// Print the queue, resolving entries to player names where the pool
/// knows them.
pub fn list(queue: &AttackQueue, players: &PlayerStore) -> Result<()> {
    let entries = queue.list()?;
    if entries.is_empty() {
        println!("The attack queue is empty.");
        return Ok(());
    }

    println!("{:<4} {:<20} {:>5}  url", "#", "name", "level");
    for (i, url) in entries.iter().enumerate() {
        match players.fetch_by_url(url) {
            Ok(p) => println!("{:<4} {:<20} {:>5}  {}", i + 1, p.name, p.level, url),
            Err(Error::NotFound(_)) => {
                println!("{:<4} {:<20} {:>5}  {}", i + 1, "(unknown)", "-", url)
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Queue a target by id, resolved through the player pool.
pub fn add_by_id(queue: &AttackQueue, players: &PlayerStore, id: u32) -> Result<()> {
    let player = players.fetch_by_id(id)?;
    report_added(queue.enqueue(&player.url)?, &player.name);
    Ok(())
}

/// Queue a raw profile url. The pool is only consulted for the name.
pub fn add_by_url(queue: &AttackQueue, players: &PlayerStore, url: &str) -> Result<()> {
    let name = players
        .fetch_by_url(url)
        .map(|p| p.name)
        .unwrap_or_else(|_| url.to_string());
    report_added(queue.enqueue(url)?, &name);
    Ok(())
}

fn report_added(added: bool, name: &str) {
    if added {
        println!("Queued {}.", name);
    } else {
        println!("{} is already queued.", name);
    }
}
