// src/lib.rs

pub mod autoplay;
pub mod cli;
pub mod commands;
pub mod config;
pub mod entities;
pub mod error;
pub mod html;
pub mod lock;
pub mod logging;
pub mod progress;
pub mod scrape;
pub mod session;
pub mod store;
pub mod targets;
