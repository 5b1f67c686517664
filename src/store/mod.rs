// src/store/mod.rs

mod json;
mod players;
mod queue;
mod reports;

pub use players::PlayerStore;
pub use queue::AttackQueue;
pub use reports::BattleLedger;
