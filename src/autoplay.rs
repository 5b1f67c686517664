// src/autoplay.rs
// The auto-battle loop: wait out the server lock, pull a target off the
// queue, check the re-attack window, fight, record, repeat.

use std::thread;
use std::time::Duration;

use crate::commands::fetch_reports;
use crate::entities::Player;
use crate::error::{Error, Result};
use crate::lock::LockTracker;
use crate::progress::{NullProgress, Progress};
use crate::scrape::form;
use crate::session::GameClient;
use crate::store::{AttackQueue, BattleLedger, PlayerStore};
use crate::targets::TargetSelector;

/// Hours a beaten victim stays off-limits.
pub const ELIGIBILITY_WINDOW_HOURS: i64 = 12;

/// Consecutive empty-queue attempts before the loop gives up.
pub const EMPTY_QUEUE_LIMIT: u32 = 10;

pub const EMPTY_QUEUE_PAUSE: Duration = Duration::from_secs(2);
pub const POST_ATTACK_PAUSE: Duration = Duration::from_secs(2);
const LOCK_TICK: Duration = Duration::from_secs(1);

/// Source of the account-wide battle cooldown.
pub trait LockSource {
    fn current_lock_seconds(&self) -> Result<u64>;
}

impl LockSource for LockTracker<'_> {
    fn current_lock_seconds(&self) -> Result<u64> {
        LockTracker::current_lock_seconds(self)
    }
}

/// Carries out one attack against a victim, including whatever follow-up
/// keeps the ledger current.
pub trait AttackExecutor {
    fn attack(&mut self, victim: &Player) -> Result<()>;
}

/// Where the loop sleeps. Tests swap in a recorder; the real thing blocks.
pub trait Pacer {
    fn pause(&mut self, d: Duration);
}

pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, d: Duration) {
        thread::sleep(d);
    }
}

pub struct AutoBattle<'a, L, E, P> {
    me: Player,
    queue: &'a AttackQueue,
    players: &'a PlayerStore,
    selector: TargetSelector<'a>,
    lock: L,
    executor: E,
    pacer: P,
    progress: &'a mut dyn Progress,
}

impl<'a, L, E, P> AutoBattle<'a, L, E, P>
where
    L: LockSource,
    E: AttackExecutor,
    P: Pacer,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        me: Player,
        queue: &'a AttackQueue,
        players: &'a PlayerStore,
        selector: TargetSelector<'a>,
        lock: L,
        executor: E,
        pacer: P,
        progress: &'a mut dyn Progress,
    ) -> Self {
        Self { me, queue, players, selector, lock, executor, pacer, progress }
    }

    /// Runs until the queue stays empty for `EMPTY_QUEUE_LIMIT` attempts or
    /// a fatal error surfaces. Transient states only ever log and loop.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting auto-battle as {}.", self.me.name);

        let mut empty_attempts = 0u32;
        loop {
            let mut lock = self.lock.current_lock_seconds()?;
            if lock > 0 {
                self.progress
                    .log(&format!("Locked for {} seconds. Waiting...", lock));
                self.progress.begin(lock as usize);
                while lock > 0 {
                    self.pacer.pause(LOCK_TICK);
                    lock -= 1;
                    self.progress.tick();
                }
                self.progress.finish();
                // The server owns the timer; re-derive instead of trusting
                // the local countdown (it may have been reset meanwhile).
                continue;
            }

            let Some(target) = self.queue.dequeue()? else {
                empty_attempts += 1;
                log::warn!(
                    "Attack queue is empty ({}/{}). Enqueue target urls.",
                    empty_attempts,
                    EMPTY_QUEUE_LIMIT
                );
                self.pacer.pause(EMPTY_QUEUE_PAUSE);
                if empty_attempts >= EMPTY_QUEUE_LIMIT {
                    log::warn!("Attack queue stayed empty; stopping auto-battle.");
                    return Ok(());
                }
                continue;
            };
            empty_attempts = 0;

            // The entry is consumed either way; bad or cooling-down targets
            // are dropped, not re-queued.
            let victim = match self.players.fetch_by_url(&target) {
                Ok(v) => v,
                Err(Error::NotFound(_)) => {
                    log::warn!("Dropping unknown queue entry {}.", target);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !self
                .selector
                .is_eligible(&self.me, &victim, ELIGIBILITY_WINDOW_HOURS)?
            {
                log::info!(
                    "{} was already fought within the last {} hours, skipping.",
                    victim.name,
                    ELIGIBILITY_WINDOW_HOURS
                );
                continue;
            }

            self.executor.attack(&victim)?;

            // Courtesy pause between fights.
            self.pacer.pause(POST_ATTACK_PAUSE);
        }
    }
}

/// The real executor: fetch the opponent's attack page, submit its
/// confirmation form, then pull the fresh battle reports so the ledger
/// reflects the fight we just started.
pub struct GameAttackExecutor<'a> {
    pub client: &'a dyn GameClient,
    pub players: &'a PlayerStore,
    pub ledger: &'a BattleLedger,
}

impl AttackExecutor for GameAttackExecutor<'_> {
    fn attack(&mut self, victim: &Player) -> Result<()> {
        log::info!("Attacking {}.", victim.name);

        let page = self
            .client
            .get(&format!("raubzug/gegner/?searchuserid={}", victim.id))?;
        let attack_form = form::first_form(&page)
            .ok_or_else(|| Error::Scrape(format!("no attack form for {}", victim.name)))?;

        // The confirmation form posts to the server root.
        self.client.post_form("/", &attack_form.fields)?;

        fetch_reports::run(self.client, self.players, self.ledger, &mut NullProgress)?;

        Ok(())
    }
}
