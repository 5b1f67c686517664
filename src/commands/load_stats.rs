// src/commands/load_stats.rs

use crate::error::{Error, Result};
use crate::session::GameClient;
use crate::store::PlayerStore;

/// Print the logged-in account's own stats from the local pool.
pub fn run(client: &dyn GameClient, players: &PlayerStore) -> Result<()> {
    let me = match super::current_player(client, players) {
        Err(Error::NotFound(_)) => {
            return Err(Error::NotFound(
                "own player is not in the local pool yet; run fetch-all-players first".into(),
            ));
        }
        other => other?,
    };

    println!();
    println!("{} (id {})", me.name, me.id);
    println!("  Level       {:>10}", me.level);
    println!("  Health      {:>10.2} of {}", me.current_hp, me.max_hp);
    println!("  Experience  {:>10}", me.experience);
    println!("  Alignment   {:>10}", me.alignment);
    println!("  Knight since {}", me.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!();
    println!("  Strength          {:>6}", me.strength);
    println!("  Stamina           {:>6}", me.stamina);
    println!("  Dexterity         {:>6}", me.dexterity);
    println!("  Fighting ability  {:>6}", me.fighting_ability);
    println!("  Parry             {:>6}", me.parry);
    println!("  Armour            {:>6}", me.armour);
    println!("  One-handed attack {:>6}", me.one_handed_attack);
    println!("  Two-handed attack {:>6}", me.two_handed_attack);
    println!();
    println!("  Battles {} ({} won, {} lost, {} undecided)",
        me.total_battles, me.wins, me.losses, me.undecided);
    println!("  Loot {}  gold received {}  gold lost {}",
        me.total_loot, me.gold_received, me.gold_lost);
    println!("  Damage dealt {}  taken {}",
        me.damage_to_enemies, me.damage_from_enemies);

    Ok(())
}
