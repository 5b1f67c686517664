// src/cli.rs
// Argument handling and command dispatch. One pass over the args, no
// framework; the help text lives in cli_help.txt.

use std::env;

use crate::autoplay::{AutoBattle, GameAttackExecutor, ThreadPacer};
use crate::commands::{self, fetch_players, fetch_reports, game, load_stats, queue as queue_cmd};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::lock::LockTracker;
use crate::logging;
use crate::progress::ConsoleProgress;
use crate::session::Session;
use crate::store::{AttackQueue, BattleLedger, PlayerStore};
use crate::targets::TargetSelector;

const HELP: &str = include_str!("cli_help.txt");

pub fn run() -> Result<()> {
    let mut args = env::args().skip(1);

    let mut command: Option<String> = None;
    let mut verbose = false;
    let mut data_dir: Option<String> = None;
    let mut id: Option<u32> = None;
    let mut url: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", HELP);
                return Ok(());
            }
            "-v" | "--verbose" => verbose = true,
            "--data-dir" => {
                data_dir = Some(
                    args.next()
                        .ok_or_else(|| Error::Config("--data-dir needs a path".into()))?,
                );
            }
            "--id" => {
                let raw = args
                    .next()
                    .ok_or_else(|| Error::Config("--id needs a number".into()))?;
                id = Some(
                    raw.parse()
                        .map_err(|_| Error::Config(format!("bad id: {}", raw)))?,
                );
            }
            "--url" => {
                url = Some(
                    args.next()
                        .ok_or_else(|| Error::Config("--url needs a value".into()))?,
                );
            }
            other if command.is_none() && !other.starts_with('-') => {
                command = Some(other.to_string());
            }
            other => return Err(Error::Config(format!("unknown argument: {}", other))),
        }
    }

    logging::init(verbose)
        .map_err(|e| Error::Config(format!("failed to set up logging: {}", e)))?;

    let Some(command) = command else {
        print!("{}", HELP);
        return Ok(());
    };

    let mut config = Config::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir.into();
    }

    let players = PlayerStore::open(config.players_path());
    let ledger = BattleLedger::open(config.reports_path());
    let queue = AttackQueue::open(config.queue_path());

    // Queue inspection works offline.
    match command.as_str() {
        "queue-list" => return queue_cmd::list(&queue, &players),
        "enqueue" => {
            return match (id, url) {
                (Some(id), None) => queue_cmd::add_by_id(&queue, &players, id),
                (None, Some(url)) => queue_cmd::add_by_url(&queue, &players, &url),
                _ => Err(Error::Config(
                    "enqueue needs exactly one of --id or --url".into(),
                )),
            };
        }
        _ => {}
    }

    let session = Session::login(&config)?;
    let mut progress = ConsoleProgress::default();

    match command.as_str() {
        "autoplay" => {
            let me = commands::current_player(&session, &players)?;
            let selector = TargetSelector::new(&players, &ledger);
            let lock = LockTracker::new(&session);
            let executor = GameAttackExecutor {
                client: &session,
                players: &players,
                ledger: &ledger,
            };
            AutoBattle::new(
                me,
                &queue,
                &players,
                selector,
                lock,
                executor,
                ThreadPacer,
                &mut progress,
            )
            .run()
        }
        "fetch-all-players" => fetch_players::run(&session, &players, &mut progress),
        "fetch-all-reports" => fetch_reports::run(&session, &players, &ledger, &mut progress),
        "load-stats" => load_stats::run(&session, &players),
        "game" => game::run(&session, &players, &ledger, &queue),
        other => Err(Error::Config(format!("unknown command: {}", other))),
    }
}
