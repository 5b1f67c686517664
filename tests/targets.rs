// tests/targets.rs

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Duration, TimeZone, Utc};
use kf_raider::entities::{BattleReport, Player};
use kf_raider::store::{BattleLedger, PlayerStore};
use kf_raider::targets::TargetSelector;

static NEXT: AtomicU32 = AtomicU32::new(0);

fn temp_path(name: &str) -> PathBuf {
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("kf_raider_targets_{}_{}_{}", std::process::id(), n, name))
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

fn report(battle_id: u64, attacker_id: u32, victim_id: u32, hours_ago: i64) -> BattleReport {
    BattleReport {
        battle_id,
        attacker_id,
        victim_id,
        winner_id: attacker_id,
        date: Utc::now() - Duration::hours(hours_ago),
    }
}

#[test]
fn eligible_without_history() {
    let players = PlayerStore::open(temp_path("none.json"));
    let ledger = BattleLedger::open(temp_path("none_ledger.json"));
    let selector = TargetSelector::new(&players, &ledger);

    let me = player(1, "me");
    let victim = player(2, "victim");
    assert!(selector.is_eligible(&me, &victim, 12).unwrap());
}

#[test]
fn recent_fight_blocks_the_rematch() {
    let players = PlayerStore::open(temp_path("recent.json"));
    let ledger = BattleLedger::open(temp_path("recent_ledger.json"));
    ledger.store(&report(1, 1, 2, 1)).unwrap();

    let selector = TargetSelector::new(&players, &ledger);
    let me = player(1, "me");
    let victim = player(2, "victim");
    assert!(!selector.is_eligible(&me, &victim, 12).unwrap());
}

#[test]
fn fight_in_the_other_direction_blocks_too() {
    let players = PlayerStore::open(temp_path("reverse.json"));
    let ledger = BattleLedger::open(temp_path("reverse_ledger.json"));
    // They attacked us an hour ago.
    ledger.store(&report(1, 2, 1, 1)).unwrap();

    let selector = TargetSelector::new(&players, &ledger);
    let me = player(1, "me");
    let victim = player(2, "victim");
    assert!(!selector.is_eligible(&me, &victim, 12).unwrap());
}

#[test]
fn old_fight_does_not_block() {
    let players = PlayerStore::open(temp_path("old.json"));
    let ledger = BattleLedger::open(temp_path("old_ledger.json"));
    ledger.store(&report(1, 1, 2, 13)).unwrap();

    let selector = TargetSelector::new(&players, &ledger);
    let me = player(1, "me");
    let victim = player(2, "victim");
    assert!(selector.is_eligible(&me, &victim, 12).unwrap());
}

#[test]
fn farm_list_comes_from_the_player_pool() {
    let players = PlayerStore::open(temp_path("farm.json"));
    let ledger = BattleLedger::open(temp_path("farm_ledger.json"));

    let mut me = player(1, "me");
    me.strength = 10;
    me.stamina = 10;
    me.dexterity = 10;
    me.fighting_ability = 10;
    me.parry = 10;
    me.armour = 10;
    me.one_handed_attack = 10;
    me.two_handed_attack = 10;
    players.store(&me).unwrap();
    players.store(&player(2, "weakling")).unwrap();

    let selector = TargetSelector::new(&players, &ledger);
    let farm = selector.farm(&me, 10, 0).unwrap();
    assert_eq!(farm.len(), 1);
    assert_eq!(farm[0].id, 2);
}
