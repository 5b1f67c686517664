// src/config.rs
// Runtime configuration comes from the environment; paths for the flat-file
// stores hang off one data directory.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const PLAYERS_FILE: &str = "players.json";
pub const REPORTS_FILE: &str = "battle_reports.json";
pub const QUEUE_FILE: &str = "attack.queue";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base url of the game server, e.g. `https://server5.knightfight.moonid.net`.
    pub server: String,
    pub account: String,
    pub password: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads `KF_SERVER`, `KF_ACCOUNT` and `KF_PASSWORD` (all required) and
    /// the optional `KF_DATA_DIR`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: required("KF_SERVER")?,
            account: required("KF_ACCOUNT")?,
            password: required("KF_PASSWORD")?,
            data_dir: env::var("KF_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
        })
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(PLAYERS_FILE)
    }

    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join(REPORTS_FILE)
    }

    pub fn queue_path(&self) -> PathBuf {
        self.data_dir.join(QUEUE_FILE)
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{} must be set", name))),
    }
}
