// tests/stores.rs

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{TimeZone, Utc};
use kf_raider::entities::{BattleReport, Player};
use kf_raider::error::Error;
use kf_raider::store::{BattleLedger, PlayerStore};

static NEXT: AtomicU32 = AtomicU32::new(0);

fn temp_path(name: &str) -> PathBuf {
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("kf_raider_stores_{}_{}_{}", std::process::id(), n, name))
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

/// All compared attributes and skills at 10.
fn reference(id: u32) -> Player {
    Player {
        strength: 10,
        stamina: 10,
        dexterity: 10,
        fighting_ability: 10,
        parry: 10,
        armour: 10,
        one_handed_attack: 10,
        two_handed_attack: 10,
        ..player(id, "reference")
    }
}

#[test]
fn store_then_fetch_roundtrip() {
    let store = PlayerStore::open(temp_path("roundtrip.json"));
    let alice = player(10, "Alice");
    store.store(&alice).unwrap();

    assert_eq!(store.fetch_by_id(10).unwrap(), alice);
    assert_eq!(store.fetch_by_url("/player/10/").unwrap(), alice);
}

#[test]
fn store_upserts_by_id() {
    let store = PlayerStore::open(temp_path("upsert.json"));
    let mut alice = player(10, "Alice");
    store.store(&alice).unwrap();

    alice.level = 9;
    store.store(&alice).unwrap();

    assert_eq!(store.fetch_by_id(10).unwrap().level, 9);
}

#[test]
fn fetch_missing_player_is_not_found() {
    let store = PlayerStore::open(temp_path("missing.json"));
    assert!(matches!(store.fetch_by_id(1), Err(Error::NotFound(_))));
    assert!(matches!(
        store.fetch_by_url("/player/1/"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn weaker_than_filters_on_every_attribute() {
    let store = PlayerStore::open(temp_path("weaker.json"));
    let me = reference(1);
    store.store(&me).unwrap();

    // All attributes at the defaults (5s and 0s): strictly weaker.
    store.store(&player(2, "Bob")).unwrap();

    // One attribute above the reference disqualifies.
    let mut carol = player(3, "Carol");
    carol.strength = 15;
    store.store(&carol).unwrap();

    let targets = store.fetch_weaker_than(&me, 10, 0).unwrap();
    let ids: Vec<u32> = targets.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn weaker_than_excludes_the_reference_itself() {
    let store = PlayerStore::open(temp_path("self.json"));
    let me = reference(1);
    store.store(&me).unwrap();

    // The reference ties with itself on every attribute but must not
    // show up in its own target list.
    assert!(store.fetch_weaker_than(&me, 10, 0).unwrap().is_empty());
}

#[test]
fn weaker_than_orders_by_gold_lost_then_registration() {
    let store = PlayerStore::open(temp_path("order.json"));
    let me = reference(1);

    let mut poor = player(2, "poor");
    poor.gold_lost = 100;

    let mut rich_old = player(3, "rich_old");
    rich_old.gold_lost = 300;
    rich_old.created_at = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();

    let mut rich_new = player(4, "rich_new");
    rich_new.gold_lost = 300;
    rich_new.created_at = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

    store.store(&poor).unwrap();
    store.store(&rich_old).unwrap();
    store.store(&rich_new).unwrap();

    let ids: Vec<u32> = store
        .fetch_weaker_than(&me, 10, 0)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![4, 3, 2]);
}

#[test]
fn weaker_than_paginates() {
    let store = PlayerStore::open(temp_path("page.json"));
    let me = reference(1);

    for id in 2..=5 {
        let mut p = player(id, "target");
        p.gold_lost = 1000 - id as u64;
        store.store(&p).unwrap();
    }

    let first: Vec<u32> = store
        .fetch_weaker_than(&me, 2, 0)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    let second: Vec<u32> = store
        .fetch_weaker_than(&me, 2, 2)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(first, vec![2, 3]);
    assert_eq!(second, vec![4, 5]);
}

#[test]
fn level_up_list_wants_higher_level_and_crossed_guard() {
    let store = PlayerStore::open(temp_path("levelup.json"));
    let mut me = reference(1);
    me.level = 10;
    me.fighting_ability = 10;
    me.parry = 2;

    // Higher level, fighting ability under my parry and parry under my
    // fighting ability: a valid level-up target. Dexterity and skills
    // are not compared here.
    let mut good = player(2, "good");
    good.level = 12;
    good.strength = 5;
    good.stamina = 5;
    good.dexterity = 99;
    good.fighting_ability = 2;
    good.parry = 10;

    // Fighting ability above my parry disqualifies.
    let mut risky = player(3, "risky");
    risky.level = 12;
    risky.strength = 5;
    risky.stamina = 5;
    risky.fighting_ability = 3;
    risky.parry = 10;

    // Same level disqualifies even when weaker everywhere.
    let mut peer = player(4, "peer");
    peer.level = 10;
    peer.fighting_ability = 2;
    peer.parry = 2;

    store.store(&good).unwrap();
    store.store(&risky).unwrap();
    store.store(&peer).unwrap();

    let ids: Vec<u32> = store
        .fetch_weaker_and_higher_level(&me, 10, 0)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn ledger_upserts_by_battle_id() {
    let ledger = BattleLedger::open(temp_path("ledger.json"));
    let mut report = BattleReport {
        battle_id: 77,
        attacker_id: 1,
        victim_id: 2,
        winner_id: 1,
        date: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    };
    ledger.store(&report).unwrap();

    report.winner_id = 2;
    ledger.store(&report).unwrap();

    let found = ledger.find_by_pair(1, 2).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].winner_id, 2);
}

#[test]
fn ledger_pair_lookup_matches_both_directions() {
    let ledger = BattleLedger::open(temp_path("pair.json"));
    ledger
        .store(&BattleReport {
            battle_id: 1,
            attacker_id: 1,
            victim_id: 2,
            winner_id: 1,
            date: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        })
        .unwrap();

    assert_eq!(ledger.find_by_pair(1, 2).unwrap().len(), 1);
    assert_eq!(ledger.find_by_pair(2, 1).unwrap().len(), 1);
    assert!(ledger.find_by_pair(1, 3).unwrap().is_empty());
}
