// tests/autoplay_loop.rs
// Drives the auto-battle loop with scripted locks, a recording pacer and a
// recording executor; no network, no sleeping.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration as StdDuration;

use chrono::{Duration, TimeZone, Utc};
use kf_raider::autoplay::{
    AttackExecutor, AutoBattle, LockSource, Pacer, EMPTY_QUEUE_LIMIT, EMPTY_QUEUE_PAUSE,
    POST_ATTACK_PAUSE,
};
use kf_raider::entities::{BattleReport, Player};
use kf_raider::error::Result;
use kf_raider::progress::NullProgress;
use kf_raider::store::{AttackQueue, BattleLedger, PlayerStore};
use kf_raider::targets::TargetSelector;

static NEXT: AtomicU32 = AtomicU32::new(0);

fn temp_path(name: &str) -> PathBuf {
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("kf_raider_loop_{}_{}_{}", std::process::id(), n, name))
}

fn player(id: u32, name: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        url: format!("/player/{}/", id),
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        ..Player::default()
    }
}

/// Returns the scripted lock values in order, then stays unlocked.
struct ScriptedLock {
    seq: RefCell<Vec<u64>>,
}

impl ScriptedLock {
    fn new(seq: Vec<u64>) -> Self {
        Self { seq: RefCell::new(seq) }
    }
}

impl LockSource for ScriptedLock {
    fn current_lock_seconds(&self) -> Result<u64> {
        let mut seq = self.seq.borrow_mut();
        if seq.is_empty() {
            Ok(0)
        } else {
            Ok(seq.remove(0))
        }
    }
}

struct RecordingPacer {
    pauses: Rc<RefCell<Vec<StdDuration>>>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, d: StdDuration) {
        self.pauses.borrow_mut().push(d);
    }
}

struct RecordingExecutor {
    attacked: Rc<RefCell<Vec<String>>>,
}

impl AttackExecutor for RecordingExecutor {
    fn attack(&mut self, victim: &Player) -> Result<()> {
        self.attacked.borrow_mut().push(victim.name.clone());
        Ok(())
    }
}

struct Harness {
    players: PlayerStore,
    ledger: BattleLedger,
    queue: AttackQueue,
    pauses: Rc<RefCell<Vec<StdDuration>>>,
    attacked: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    fn new(name: &str) -> Self {
        Self {
            players: PlayerStore::open(temp_path(&format!("{}_players.json", name))),
            ledger: BattleLedger::open(temp_path(&format!("{}_ledger.json", name))),
            queue: AttackQueue::open(temp_path(&format!("{}.queue", name))),
            pauses: Rc::new(RefCell::new(Vec::new())),
            attacked: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn run(&self, me: Player, locks: Vec<u64>) -> Result<()> {
        let selector = TargetSelector::new(&self.players, &self.ledger);
        let mut progress = NullProgress;
        AutoBattle::new(
            me,
            &self.queue,
            &self.players,
            selector,
            ScriptedLock::new(locks),
            RecordingExecutor { attacked: Rc::clone(&self.attacked) },
            RecordingPacer { pauses: Rc::clone(&self.pauses) },
            &mut progress,
        )
        .run()
    }
}

#[test]
fn persistently_empty_queue_ends_the_loop() {
    let h = Harness::new("empty");
    h.run(player(1, "me"), vec![]).unwrap();

    let pauses = h.pauses.borrow();
    assert_eq!(pauses.len(), EMPTY_QUEUE_LIMIT as usize);
    assert!(pauses.iter().all(|p| *p == EMPTY_QUEUE_PAUSE));
    assert!(h.attacked.borrow().is_empty());
}

#[test]
fn eligible_target_is_attacked_once() {
    let h = Harness::new("attack");
    h.players.store(&player(2, "victim")).unwrap();
    h.queue.enqueue("/player/2/").unwrap();

    h.run(player(1, "me"), vec![]).unwrap();

    assert_eq!(*h.attacked.borrow(), vec!["victim".to_string()]);

    // One courtesy pause after the fight, then the empty-queue wind-down.
    let pauses = h.pauses.borrow();
    assert_eq!(pauses.len(), 1 + EMPTY_QUEUE_LIMIT as usize);
    assert_eq!(pauses[0], POST_ATTACK_PAUSE);
}

#[test]
fn cooling_down_target_is_consumed_without_a_fight() {
    let h = Harness::new("cooldown");
    h.players.store(&player(2, "victim")).unwrap();
    h.queue.enqueue("/player/2/").unwrap();
    h.ledger
        .store(&BattleReport {
            battle_id: 1,
            attacker_id: 1,
            victim_id: 2,
            winner_id: 1,
            date: Utc::now() - Duration::hours(1),
        })
        .unwrap();

    h.run(player(1, "me"), vec![]).unwrap();

    assert!(h.attacked.borrow().is_empty());
    // The entry was dequeued and never put back.
    assert!(h.queue.list().unwrap().is_empty());
}

#[test]
fn unknown_queue_entry_is_dropped() {
    let h = Harness::new("unknown");
    h.queue.enqueue("/player/99/").unwrap();

    h.run(player(1, "me"), vec![]).unwrap();

    assert!(h.attacked.borrow().is_empty());
    assert!(h.queue.list().unwrap().is_empty());
}

#[test]
fn lock_is_waited_out_in_one_second_ticks() {
    let h = Harness::new("lock");
    h.run(player(1, "me"), vec![3]).unwrap();

    let pauses = h.pauses.borrow();
    assert_eq!(pauses.len(), 3 + EMPTY_QUEUE_LIMIT as usize);
    assert!(pauses[..3].iter().all(|p| *p == StdDuration::from_secs(1)));
    assert!(pauses[3..].iter().all(|p| *p == EMPTY_QUEUE_PAUSE));
}
