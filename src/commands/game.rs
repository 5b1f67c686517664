// src/commands/game.rs
// Interactive console: browse the farm and level-up target lists, queue
// attacks, refresh the local data. Thin stdin/stdout shell over the
// selector and the stores.

use std::io::{self, BufRead, Write};

use crate::entities::Player;
use crate::error::{Error, Result};
use crate::progress::ConsoleProgress;
use crate::session::GameClient;
use crate::store::{AttackQueue, BattleLedger, PlayerStore};
use crate::targets::TargetSelector;

use super::{fetch_players, fetch_reports};

const PAGE_SIZE: usize = 5;

pub fn run(
    client: &dyn GameClient,
    players: &PlayerStore,
    ledger: &BattleLedger,
    queue: &AttackQueue,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let me = super::current_player(client, players)?;
    println!("Playing as {} (level {}).", me.name, me.level);

    loop {
        println!();
        println!("[a] attack targets  [u] update local data  [q] quit");
        match prompt(&mut input, "> ")?.as_str() {
            "a" => attack_menu(&mut input, &me, players, ledger, queue)?,
            "u" => {
                let mut progress = ConsoleProgress::default();
                fetch_players::run(client, players, &mut progress)?;
                fetch_reports::run(client, players, ledger, &mut progress)?;
            }
            "q" => return Ok(()),
            other => println!("Unknown choice: {}", other),
        }
    }
}

fn attack_menu(
    input: &mut dyn BufRead,
    me: &Player,
    players: &PlayerStore,
    ledger: &BattleLedger,
    queue: &AttackQueue,
) -> Result<()> {
    let selector = TargetSelector::new(players, ledger);

    println!("[f] farm list  [l] level-up list  [b] back");
    let mode = prompt(input, "> ")?;
    if mode != "f" && mode != "l" {
        return Ok(());
    }

    let mut offset = 0usize;
    loop {
        let page = if mode == "f" {
            selector.farm(me, PAGE_SIZE, offset)?
        } else {
            selector.level_up(me, PAGE_SIZE, offset)?
        };
        if page.is_empty() {
            println!("No more targets.");
            return Ok(());
        }

        for p in &page {
            println!(
                "  {:>6}  {:<20} lvl {:>3}  gold lost {:>10}",
                p.id, p.name, p.level, p.gold_lost
            );
        }
        println!("Enter an id to queue it, [n] next page, [b] back.");

        match prompt(input, "> ")?.as_str() {
            "n" => offset += PAGE_SIZE,
            "b" | "q" => return Ok(()),
            other => match other.parse::<u32>() {
                Ok(id) => match players.fetch_by_id(id) {
                    Ok(p) => {
                        if queue.enqueue(&p.url)? {
                            println!("Queued {}.", p.name);
                        } else {
                            println!("{} is already queued.", p.name);
                        }
                    }
                    Err(Error::NotFound(_)) => println!("No player with id {}.", id),
                    Err(e) => return Err(e),
                },
                Err(_) => println!("Unknown choice: {}", other),
            },
        }
    }
}

fn prompt(input: &mut dyn BufRead, text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    // EOF behaves like quitting the current menu.
    if input.read_line(&mut line)? == 0 {
        return Ok("q".to_string());
    }
    Ok(line.trim().to_string())
}
