// src/scrape/mod.rs
// Page-body -> structured records. Every function here takes `&str` and
// never talks to the network; the session layer fetches, these extract.

pub mod form;
pub mod highscore;
pub mod profile;
pub mod reports;
pub mod status;
